//! contactdex CLI
//!
//! One-shot subcommands against the contact file, or an interactive shell.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use contactdex::config::SyncStrategy;
use contactdex::protocol::{Command, Response};
use contactdex::shell::Shell;
use contactdex::{Config, Directory};
use tracing_subscriber::{fmt, EnvFilter};

/// contactdex
#[derive(Parser, Debug)]
#[command(name = "contactdex")]
#[command(about = "Telephone directory backed by a balanced name index")]
#[command(version)]
struct Args {
    /// Contact file
    #[arg(short, long, default_value = "./contacts.txt")]
    file: PathBuf,

    /// Only fsync on exit instead of after every change
    #[arg(long)]
    no_sync: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a contact
    Add {
        name: String,
        number: String,
        group: String,
    },

    /// Look up a contact by name
    Find { name: String },

    /// Look up a contact by number
    Number { number: String },

    /// List every contact in name order
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Change a contact's number
    Update { name: String, number: String },

    /// Delete a contact
    Delete { name: String },

    /// List the contacts in a group
    Group { group: String },

    /// Find contacts whose name contains a fragment
    Search { fragment: String },

    /// Delete every contact
    Clear,

    /// Rewrite the contact file in name order
    Compact,

    /// Interactive shell (the default)
    Shell,
}

impl Commands {
    /// The shell command equivalent; `None` for `shell` itself
    fn into_command(self) -> Option<Command> {
        let command = match self {
            Commands::Add {
                name,
                number,
                group,
            } => Command::Add {
                name,
                number,
                group,
            },
            Commands::Find { name } => Command::Find { name },
            Commands::Number { number } => Command::FindNumber { number },
            Commands::List { .. } => Command::List,
            Commands::Update { name, number } => Command::Update { name, number },
            Commands::Delete { name } => Command::Delete { name },
            Commands::Group { group } => Command::Group { group },
            Commands::Search { fragment } => Command::Search { fragment },
            Commands::Clear => Command::Clear,
            Commands::Compact => Command::Compact,
            Commands::Shell => return None,
        };
        Some(command)
    }
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays clean for listings
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,contactdex=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .data_file(&args.file)
        .sync_strategy(if args.no_sync {
            SyncStrategy::OnClose
        } else {
            SyncStrategy::EveryWrite
        })
        .build();

    let mut directory = match Directory::open(config) {
        Ok(d) => d,
        Err(e) => {
            tracing::error!("Failed to open {}: {}", args.file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let status = match args.command {
        Some(Commands::List { json: true }) => print_json(&directory),
        Some(command) => match command.into_command() {
            Some(command) => run_once(&mut directory, command),
            None => run_shell(&mut directory),
        },
        None => run_shell(&mut directory),
    };

    if let Err(e) = directory.close() {
        tracing::error!("Failed to sync {}: {}", args.file.display(), e);
        return ExitCode::FAILURE;
    }

    status
}

fn run_shell(directory: &mut Directory) -> ExitCode {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        println!(
            "contactdex v{} ({} contacts). Type 'help' for commands.",
            contactdex::VERSION,
            directory.len()
        );
    }

    let result = Shell::new(directory)
        .show_prompt(interactive)
        .run(stdin.lock(), io::stdout().lock());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Shell error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_once(directory: &mut Directory, command: Command) -> ExitCode {
    match directory.execute(command) {
        Ok(response) => {
            println!("{}", response);
            match response {
                Response::NotFound | Response::AlreadyExists(_) => ExitCode::from(2),
                _ => ExitCode::SUCCESS,
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_json(directory: &Directory) -> ExitCode {
    match serde_json::to_string_pretty(&directory.list()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
