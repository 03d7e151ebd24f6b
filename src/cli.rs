// src/cli.rs
use std::{env, path::PathBuf};

use crate::config::options::{ScrapeOptions, SyncOptions};
use crate::progress::Progress;
use crate::{scrape, sheets};

pub enum Command {
    Scrape(ScrapeOptions),
    Sync(SyncOptions),
}

/// Progress sink for terminal runs.
struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn log(&mut self, msg: &str) {
        println!("{}", msg);
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cmd = parse_cli(env::args().skip(1))?;
    let mut prog = ConsoleProgress;

    match cmd {
        Command::Scrape(opts) => {
            match scrape::run(&opts, Some(&mut prog))? {
                Some((path, added)) => println!("Saved {} new listings to {}", added, path.display()),
                None => println!("No listings found."),
            }
        }
        Command::Sync(opts) => {
            let written = sheets::run(&opts, Some(&mut prog))?;
            println!("Synced {} day file(s).", written.len());
        }
    }
    Ok(())
}

fn parse_cli<I: Iterator<Item = String>>(mut args: I) -> Result<Command, Box<dyn std::error::Error>> {
    let cmd = match args.next().as_deref() {
        Some("scrape") => Command::Scrape(parse_scrape(args)?),
        Some("sync") => Command::Sync(parse_sync(args)?),
        Some("-h") | Some("--help") | None => {
            eprintln!(include_str!("cli_help.txt"));
            std::process::exit(0);
        }
        Some(other) => return Err(format!("Unknown command: {}", other).into()),
    };
    Ok(cmd)
}

fn parse_scrape<I: Iterator<Item = String>>(mut args: I) -> Result<ScrapeOptions, Box<dyn std::error::Error>> {
    let mut opts = ScrapeOptions::default();
    while let Some(a) = args.next() {
        match a.as_str() {
            "--host" => opts.host = args.next().ok_or("Missing value for --host")?,
            "-o" | "--out" => {
                opts.out_dir = PathBuf::from(args.next().ok_or("Missing output directory")?);
            }
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }
    Ok(opts)
}

fn parse_sync<I: Iterator<Item = String>>(mut args: I) -> Result<SyncOptions, Box<dyn std::error::Error>> {
    let mut opts = SyncOptions::default();
    while let Some(a) = args.next() {
        match a.as_str() {
            "--creds" => {
                opts.creds_file = PathBuf::from(args.next().ok_or("Missing value for --creds")?);
            }
            "--sheet" => opts.spreadsheet_id = args.next().ok_or("Missing value for --sheet")?,
            "-o" | "--out" => {
                opts.out_dir = PathBuf::from(args.next().ok_or("Missing output directory")?);
            }
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }
    if opts.spreadsheet_id.is_empty() {
        return Err("sync requires --sheet <spreadsheet id>".into());
    }
    Ok(opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> std::vec::IntoIter<String> {
        v.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn scrape_defaults_and_overrides() {
        let Ok(Command::Scrape(o)) = parse_cli(args(&["scrape"])) else { panic!() };
        assert_eq!(o.host, "xivpf.com");
        assert_eq!(o.out_dir, PathBuf::from("exports"));

        let Ok(Command::Scrape(o)) =
            parse_cli(args(&["scrape", "--host", "example.net", "-o", "data"]))
        else { panic!() };
        assert_eq!(o.host, "example.net");
        assert_eq!(o.out_dir, PathBuf::from("data"));
    }

    #[test]
    fn sync_requires_sheet_id() {
        assert!(parse_cli(args(&["sync"])).is_err());
        let Ok(Command::Sync(o)) = parse_cli(args(&["sync", "--sheet", "abc123"])) else { panic!() };
        assert_eq!(o.spreadsheet_id, "abc123");
    }

    #[test]
    fn unknown_command_and_args_fail() {
        assert!(parse_cli(args(&["frobnicate"])).is_err());
        assert!(parse_cli(args(&["scrape", "--wat"])).is_err());
    }
}
