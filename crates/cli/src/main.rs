use bookbot_core::nlp::KeywordExtractor;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bookbot")]
#[command(about = "Bookbot CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Create the configuration directory and a template config.json (existing files are kept).
    Init {
        /// Config file path (default: BOOKBOT_CONFIG_PATH or ~/.bookbot/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,
    },

    /// Serve the Telegram webhook (POST /webhook). Needs the bot token and the Google Books API key.
    Serve {
        /// Config file path (default: BOOKBOT_CONFIG_PATH or ~/.bookbot/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,

        /// HTTP port (default from config or 5000)
        #[arg(long, short)]
        port: Option<u16>,

        /// Bind address (default from config or 127.0.0.1)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Print the topics extracted from TEXT, one per line.
    Keywords {
        /// Message text
        text: String,
    },

    /// Print the reply the bot would send for TEXT. Needs only the Google Books API key.
    Ask {
        /// Config file path (default: BOOKBOT_CONFIG_PATH or ~/.bookbot/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,

        /// Message text
        text: String,
    },
}

#[tokio::main]
async fn main() {
    // .env must be loaded before the logger so RUST_LOG from it applies.
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            println!("bookbot {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Init { config }) => {
            if let Err(e) = run_init(config) {
                log::error!("init failed: {:#}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Serve { config, port, bind }) => {
            if let Err(e) = run_serve(config, port, bind).await {
                log::error!("serve failed: {:#}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Keywords { text }) => {
            let chunker = bookbot_core::nlp::NounPhraseChunker::default();
            for keyword in chunker.extract(&text) {
                println!("{}", keyword);
            }
        }
        Some(Commands::Ask { config, text }) => {
            if let Err(e) = run_ask(config, text).await {
                log::error!("ask failed: {:#}", e);
                std::process::exit(1);
            }
        }
        None => {
            println!("Run with --help for usage");
        }
    }
}

fn run_init(config_path: Option<std::path::PathBuf>) -> anyhow::Result<()> {
    let path = config_path.unwrap_or_else(bookbot_core::config::default_config_path);
    let dir = bookbot_core::init::init_config_dir(&path)?;
    println!("initialized configuration at {}", dir.display());
    Ok(())
}

async fn run_serve(
    config_path: Option<std::path::PathBuf>,
    port: Option<u16>,
    bind: Option<String>,
) -> anyhow::Result<()> {
    let (mut config, path) = bookbot_core::config::load_config(config_path)?;
    config.apply_env(|k| std::env::var(k).ok());
    if let Some(p) = port {
        config.gateway.port = p;
    }
    if let Some(b) = bind {
        config.gateway.bind = b;
    }
    log::info!(
        "starting webhook on {}:{} (config {})",
        config.gateway.bind,
        config.gateway.port,
        path.display()
    );
    bookbot_core::gateway::run_gateway(config).await
}

async fn run_ask(config_path: Option<std::path::PathBuf>, text: String) -> anyhow::Result<()> {
    let (mut config, _) = bookbot_core::config::load_config(config_path)?;
    config.apply_env(|k| std::env::var(k).ok());
    let api_key = bookbot_core::config::resolve_books_api_key(&config).ok_or_else(|| {
        anyhow::anyhow!("missing Google Books API key (GOOGLE_BOOKS_API_KEY or books.apiKey)")
    })?;
    let books = bookbot_core::books::GoogleBooksClient::new(
        bookbot_core::config::resolve_books_api_base(&config),
        api_key,
        bookbot_core::config::build_http_client(&config)?,
    );
    let chunker = bookbot_core::nlp::NounPhraseChunker::default();
    let reply = bookbot_core::gateway::build_reply(&chunker, &books, &text).await;
    print!("{}", reply);
    if !reply.ends_with('\n') {
        println!();
    }
    Ok(())
}
