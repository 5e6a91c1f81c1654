use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::io::BufReader;

use dinner_bot::application::errors::BotError;
use dinner_bot::application::messaging::MessageDispatcher;
use dinner_bot::application::services::{Blacklist, CommandInterpreter, ListStore};
use dinner_bot::domain::entities::InboundMessage;
use dinner_bot::domain::traits::{ListBackend, ReplySender};
use dinner_bot::infrastructure::adapters::console::ConsoleAdapter;
use dinner_bot::infrastructure::adapters::line::{self, LineClient, WebhookState};
use dinner_bot::infrastructure::config::Config;
use dinner_bot::infrastructure::storage::{FileStore, MemoryStore};

#[derive(Parser)]
#[command(name = "dinner-bot")]
#[command(about = "Chat bot that keeps restaurant lists and picks dinner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the LINE webhook server
    Run,
    /// Type commands on stdin (dev mode)
    Console {
        /// Keep lists in memory instead of the list directory
        #[arg(long)]
        ephemeral: bool,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
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
        Commands::Run => block_on(run_server(&cli.config)),
        Commands::Console { ephemeral } => block_on(run_console(&cli.config, ephemeral)),
        Commands::Version => {
            println!("dinner-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn block_on<F>(fut: F) -> Result<(), BotError>
where
    F: std::future::Future<Output = Result<(), BotError>>,
{
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))?;
    rt.block_on(fut)
}

fn load_config(config_path: &str) -> Result<Config, BotError> {
    let mut config = Config::load_or_default(config_path)?;
    config.apply_env();
    config.validate()?;
    Ok(config)
}

/// Stores, interpreter and dispatcher over `backend`.
/// Missing list storage is created empty.
async fn build_dispatcher(
    config: &Config,
    backend: Arc<dyn ListBackend>,
) -> Result<Arc<MessageDispatcher>, BotError> {
    let timeout = config.storage_timeout();
    let lists = Arc::new(ListStore::new(backend.clone()).with_timeout(timeout));
    let blacklist = Arc::new(Blacklist::new(backend).with_timeout(timeout));

    lists.init().await?;
    blacklist.init().await?;

    // Reports empty categories once at startup
    let loaded = lists.load().await?;
    let total: usize = loaded.values().map(Vec::len).sum();
    let banned = blacklist.load().await?.len();
    tracing::info!("Loaded {} restaurants and {} blacklist patterns", total, banned);

    let interpreter = CommandInterpreter::new(lists, blacklist);
    Ok(Arc::new(MessageDispatcher::new(Arc::new(interpreter))))
}

async fn run_server(config_path: &str) -> Result<(), BotError> {
    let config = load_config(config_path)?;
    let credentials = config.line_credentials()?;

    tracing::info!("Starting {}", config.bot.name);

    let backend = Arc::new(FileStore::new(&config.storage.directory));
    let dispatcher = build_dispatcher(&config, backend).await?;
    let sender = LineClient::new(credentials.access_token, &config.line.api_base)?
        .with_name(&config.bot.name);

    let app = line::router(WebhookState {
        dispatcher,
        sender: Arc::new(sender),
        channel_secret: Arc::from(credentials.channel_secret),
    });

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| BotError::Internal(format!("Failed to bind {}: {}", address, e)))?;
    tracing::info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| BotError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn run_console(config_path: &str, ephemeral: bool) -> Result<(), BotError> {
    let config = load_config(config_path)?;

    let backend: Arc<dyn ListBackend> = if ephemeral {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileStore::new(&config.storage.directory))
    };
    let dispatcher = build_dispatcher(&config, backend).await?;

    let bot = ConsoleAdapter::new();
    let info = bot.bot_info();
    tracing::info!("Bot started: {} ({})", info.name, info.platform);

    let mut input = BufReader::new(tokio::io::stdin());
    while let Some(line) = bot.read_line(&mut input, "> ").await {
        if line == "/quit" {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let message = InboundMessage::new("console", line).with_platform("console");
        if dispatcher.process(&message, &bot).await? == 0 {
            println!("[BOT] (no reply)");
        }
    }
    Ok(())
}

fn init_config() -> Result<(), BotError> {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config)
        .map_err(|e| BotError::Internal(format!("Failed to render config: {}", e)))?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
