use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spy_cats::{api, config::Config, db};

#[derive(Parser)]
#[command(name = "spy-cats")]
#[command(about = "CRUD backend for spy cats and their missions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Address to bind, overrides SPY_CATS_HOST
        #[arg(long)]
        host: Option<String>,

        /// Port for the HTTP API, overrides SERVER_PORT
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Apply database migrations and exit
    Migrate,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "spy_cats=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn open_database(config: &Config) -> anyhow::Result<db::Database> {
    let db = match &config.db_path {
        Some(path) => db::Database::open(path.clone())?,
        None => db::Database::open_default()?,
    };

    db.migrate()?;
    let applied = db.migrate_dir(&config.migrations_dir)?;
    if applied > 0 {
        tracing::info!(
            "Applied {} migration file(s) from {}",
            applied,
            config.migrations_dir.display()
        );
    }

    Ok(db)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }

            let db = open_database(&config)?;
            let state = api::AppState::new(db, config.breed_catalog()?);
            let app = api::create_router(state);

            let addr = config.bind_address();
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("spy-cats listening on http://{}", addr);

            axum::serve(listener, app).await?;
        }
        Commands::Migrate => {
            open_database(&config)?;
            tracing::info!("Migrations complete");
        }
    }

    Ok(())
}
