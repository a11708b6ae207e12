//! Pseudo Layout CLI
//!
//! Usage:
//!   pseudo-layout [OPTIONS] [SCENE]
//!
//! Options:
//!   -r, --relations  Also list every activated relation
//!   -v, --verbose    Increase log verbosity (-v debug, -vv trace)
//!   -h, --help       Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;

use pseudo_layout::{report, Scene};

#[derive(Parser)]
#[command(name = "pseudo-layout")]
#[command(about = "Resolve a scene of layout relations into view frames")]
struct Cli {
    /// Scene file in TOML format (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Also list every activated relation
    #[arg(short, long)]
    relations: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut solver = match Scene::from_str(&source).and_then(|scene| scene.build()) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    };
    solver.layout();

    print!("{}", report::frames(&solver));
    if cli.relations {
        println!();
        print!("{}", report::relations(&solver));
    }

    let broken = solver.broken_relations().count();
    if broken > 0 {
        log::warn!("{broken} relation(s) could not be satisfied");
    }
}
