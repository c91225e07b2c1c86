//! dosie CLI - A cross-linked developer knowledge base.

use clap::Parser;
use dosie::app::AppState;
use dosie::cli::{Cli, Commands, ConfigCommands};
use dosie::commands::{self, Output};
use dosie::config::{ConfigFile, ConfigOverrides, OutputFormat, resolve};
use std::io::{self, IsTerminal};
use std::process;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "DOSIE_LOG";

fn main() {
    init_logging();

    let cli = Cli::parse();
    let mut human = cli.human_readable;

    let result = ConfigFile::locate(cli.config_dir.as_deref()).and_then(|config| {
        let overrides = if cli.human_readable {
            ConfigOverrides::default().with_output_format(OutputFormat::Human)
        } else {
            ConfigOverrides::default()
        };
        human = resolve(&config.load_or_default(), &overrides)
            .output_format()
            .is_human();
        run_command(cli.command, &config, human)
    });

    if let Err(e) = result {
        if human {
            eprintln!("Error: {}", e);
        } else {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
        }
        process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run_command(
    command: Option<Commands>,
    config: &ConfigFile,
    human: bool,
) -> Result<(), dosie::Error> {
    match command {
        Some(Commands::Session(command)) => {
            let mut state = AppState::seeded();
            let result = commands::execute(&mut state, command)?;
            println!("{}", commands::render(result.as_ref(), human));
        }
        Some(Commands::Shell) | None => run_shell(config, human)?,
        Some(Commands::Theme(args)) => {
            let result = commands::theme(config, args.change())?;
            output(&result, human);
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Get { key } => output(&commands::config_get(config, &key)?, human),
            ConfigCommands::Set { key, value } => {
                output(&commands::config_set(config, &key, &value)?, human)
            }
            ConfigCommands::List => output(&commands::config_list(config)?, human),
        },
    }
    Ok(())
}

fn run_shell(config: &ConfigFile, human: bool) -> Result<(), dosie::Error> {
    let mut state = AppState::seeded();
    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    commands::shell::run_shell(
        &mut state,
        config,
        stdin.lock(),
        io::stdout().lock(),
        human,
        prompt,
    )
}

fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
