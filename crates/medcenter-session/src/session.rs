//! Session data structure

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Opaque auth token, empty when logged out
    pub token: String,
    /// Backend endpoint selected at build time
    pub api_base_url: String,
}

impl Session {
    pub fn new(token: String, api_base_url: String) -> Self {
        Self {
            token,
            api_base_url,
        }
    }

    /// Token presence is the only authentication signal at this layer.
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_authenticated() {
        let anonymous = Session::new(String::new(), "http://localhost:8080".to_string());
        assert!(!anonymous.is_authenticated());

        let logged_in = Session::new("abc".to_string(), "http://localhost:8080".to_string());
        assert!(logged_in.is_authenticated());
    }

    #[test]
    fn test_whitespace_token_counts_as_present() {
        let session = Session::new(" ".to_string(), "http://localhost:8080".to_string());
        assert!(session.is_authenticated());
    }
}
