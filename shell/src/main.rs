//! Medcenter client shell
//!
//! Boots the session store and router, then drives navigation from line
//! commands on stdin, printing where each navigation lands.

use anyhow::{bail, Context, Result};
use medcenter_core::{Config, Resolution, Shell};
use std::io::{self, BufRead, Write};

const HELP: &str = "commands: go <path> | name <route> | login <token> | logout | back | whoami | routes | quit";

enum Command<'a> {
    Go(&'a str),
    Name(&'a str),
    Login(&'a str),
    Logout,
    Back,
    WhoAmI,
    Routes,
    Help,
    Quit,
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Result<Self> {
        let mut parts = line.trim().splitn(2, ' ');
        let verb = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).unwrap_or_default();

        let command = match verb {
            "go" => Command::Go(if arg.is_empty() { "/" } else { arg }),
            "name" if !arg.is_empty() => Command::Name(arg),
            "login" if !arg.is_empty() => Command::Login(arg),
            "logout" => Command::Logout,
            "back" => Command::Back,
            "whoami" => Command::WhoAmI,
            "routes" => Command::Routes,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "name" | "login" => bail!("{} needs an argument", verb),
            other => bail!("unknown command: {}", other),
        };
        Ok(command)
    }
}

fn describe(resolution: &Resolution) -> String {
    let route = resolution.route();
    let mut line = format!("{} -> {} ({})", resolution.requested, route.name, route.view);
    if resolution.is_redirect_to_login() {
        line.push_str(" [login required]");
    }
    if let Some(from) = &resolution.redirected_from {
        line.push_str(&format!(" [redirected from {}]", from));
    }
    line
}

fn run(shell: &Shell) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}", describe(&shell.start()));

    for line in stdin.lock().lines() {
        let line = line.context("failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match command {
            Command::Go(path) => println!("{}", describe(&shell.navigate(path))),
            Command::Name(name) => match shell.navigate_named(name) {
                Ok(resolution) => println!("{}", describe(&resolution)),
                Err(e) => eprintln!("{}", e),
            },
            Command::Login(token) => {
                shell.login(token)?;
                println!("logged in");
            }
            Command::Logout => match shell.logout() {
                Some(resolution) => println!("logged out, {}", describe(&resolution)),
                None => println!("logged out"),
            },
            Command::Back => match shell.back() {
                Some(resolution) => println!("{}", describe(&resolution)),
                None => println!("no previous location"),
            },
            Command::WhoAmI => println!(
                "authenticated: {}, api: {}, history: {}, unmatched -> {}",
                shell.is_authenticated(),
                shell.api_base_url(),
                shell.router().history_len(),
                shell.router().table().fallback()
            ),
            Command::Routes => println!("{}", shell.routes_json()?),
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
        }

        stdout.flush()?;
    }

    Ok(())
}

fn main() -> Result<()> {
    medcenter_core::init_logging();

    let config = Config::from_env();
    let shell = Shell::new(config.clone()).with_context(|| {
        format!(
            "failed to open local storage at {}",
            config.database_path.display()
        )
    })?;

    tracing::info!(environment = %config.environment, "Medcenter shell started");

    run(&shell)
}
