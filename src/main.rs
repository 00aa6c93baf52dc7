use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;

use irc_helper::application::errors::BotError;
use irc_helper::application::messaging::Dispatcher;
use irc_helper::application::services::{BotRunner, CommandService};
use irc_helper::domain::entities::Flag;
use irc_helper::domain::traits::FlagStore;
use irc_helper::infrastructure::adapters::{ConsoleSession, IrcSession};
use irc_helper::infrastructure::config::Config;
use irc_helper::infrastructure::database::Database;
use irc_helper::infrastructure::webcrawler::HttpTitleFetcher;

#[derive(Parser)]
#[command(name = "irc-helper")]
#[command(about = "An IRC bot that learns triggers from its channel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to IRC and start the bot
    Run,
    /// Run against stdin/stdout instead of a server
    Console,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
    /// Grant a flag (name or code) to a user
    AddFlag { username: String, flag: String },
    /// Show a user's flags
    Flags { username: String },
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Version => {
            println!("irc-helper v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(&cli.config),
        command => load_config(&cli.config).and_then(|config| execute(command, config)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: &str) -> Result<Config, BotError> {
    let config = if std::path::Path::new(path).exists() {
        Config::load(path)?.apply_env()?
    } else {
        tracing::info!("No config at {}, using defaults", path);
        Config::load_env()?
    };
    tracing::info!("Loaded config for {} in {}", config.bot.nick, config.bot.channel);
    Ok(config)
}

fn execute(command: Commands, config: Config) -> Result<(), BotError> {
    match command {
        Commands::AddFlag { username, flag } => {
            let db = open_database(&config)?;
            let flags = db.add_flag_named(&username, &flag)?;
            println!("{}: {}", username, flags);
            Ok(())
        }
        Commands::Flags { username } => {
            let db = open_database(&config)?;
            println!("{}: {}", username, db.get_flags(&username)?);
            Ok(())
        }
        Commands::Run => {
            let dispatcher = build_dispatcher(&config)?;
            runtime()?.block_on(async {
                let session = IrcSession::connect(
                    &config.server.host,
                    config.server.port,
                    config.bot.nick.as_str(),
                    config.bot.channel.as_str(),
                )
                .await?;
                BotRunner::new(session, dispatcher).run().await
            })
        }
        Commands::Console => {
            let dispatcher = build_dispatcher(&config)?;
            let session = ConsoleSession::new(config.bot.nick.as_str(), config.bot.channel.as_str());
            runtime()?.block_on(BotRunner::new(session, dispatcher).run())
        }
        Commands::Version | Commands::InitConfig => Ok(()),
    }
}

/// Open the store, failing startup if it is unusable
fn open_database(config: &Config) -> Result<Database, BotError> {
    let db = Database::new(&config.database.path)?;
    tracing::info!("Database opened at {}", config.database.path.display());
    Ok(db)
}

/// Grant admin to configured users who don't have it yet
fn seed_admins(db: &Database, admins: &[String]) -> Result<(), BotError> {
    for admin in admins {
        if !db.has_flag(admin, Flag::Admin)? {
            db.add_flag(admin, Flag::Admin)?;
            tracing::info!("Granted admin to {}", admin);
        }
    }
    Ok(())
}

/// Everything runs on one thread, one event at a time
fn runtime() -> Result<tokio::runtime::Runtime, BotError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))
}

/// Open the store and register handlers. Runs before connecting, so a
/// broken store stops startup early.
fn build_dispatcher(config: &Config) -> Result<Dispatcher, BotError> {
    let db = open_database(config)?;
    seed_admins(&db, &config.admins)?;

    let fetcher = Arc::new(HttpTitleFetcher::new()?);
    let mut commands = CommandService::new();
    commands.register_defaults(fetcher, config.list_delay());
    tracing::info!("Registered {} handlers", commands.registry().len());

    Ok(Dispatcher::new(commands.into_registry(), Box::new(db)))
}

fn init_config(path: &str) -> Result<(), BotError> {
    if std::path::Path::new(path).exists() {
        println!("{} already exists, not overwriting", path);
        return Ok(());
    }

    let yaml = serde_yaml::to_string(&Config::default())
        .map_err(|e| BotError::Internal(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, yaml)
        .map_err(|e| BotError::Internal(format!("Failed to write {}: {}", path, e)))?;
    println!("Wrote default config to {}", path);
    Ok(())
}
