use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "stattrack", version, about = "Esports stats tracker")]
struct Cli {
    #[command(flatten)]
    db: backend::DbConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the tables if they do not exist yet
    InitSchema,
    /// Load teams, agents, players, games and stats from CSV files
    Load {
        /// Directory containing teams.csv, agents.csv, players.csv, games.csv and stats.csv
        #[arg(long, default_value = ".")]
        data_dir: std::path::PathBuf,
        /// Assume the tables already exist
        #[arg(long)]
        skip_schema: bool,
    },
    /// Serve the management API
    Serve {
        #[arg(long, default_value = "0.0.0.0:3000")]
        listen: std::net::SocketAddr,
    },
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Backend(#[from] backend::Error),
    #[error(transparent)]
    Load(#[from] backend::loader::LoadFailure),
    #[error("serving the API: {0}")]
    Serve(#[from] std::io::Error),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let registry = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::filter_fn(|meta| {
            meta.target().contains("backend")
                || meta.target().contains("stattrack")
                || meta.target().contains("ingest")
        }));
    if let Err(e) = tracing::subscriber::set_global_default(registry) {
        eprintln!("Setting up logging: {}", e);
    }

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            std::process::ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), RunError> {
    match cli.command {
        Command::InitSchema => {
            let mut connection = backend::connect(&cli.db).await?;
            backend::tables::create_tables(&mut connection).await?;
        }
        Command::Load {
            data_dir,
            skip_schema,
        } => {
            let mut connection = backend::connect(&cli.db).await?;
            if !skip_schema {
                backend::tables::create_tables(&mut connection).await?;
            }

            let plan = backend::loader::LoadPlan::in_dir(&data_dir);
            let mut target = backend::target::PgTarget::new(&mut connection);
            let report = backend::loader::load(&plan, &mut target).await?;

            for (entity, rows) in report.loaded.iter() {
                tracing::info!("{}: {} rows", entity, rows);
            }
            tracing::info!("Database setup is complete");
        }
        Command::Serve { listen } => {
            let router = axum::Router::new().nest("/api", backend::api::router(cli.db));

            tracing::info!("Listening on {}", listen);
            let listener = tokio::net::TcpListener::bind(listen).await?;
            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}

fn report(error: &RunError) {
    let error = match error {
        RunError::Load(failure) => {
            for (entity, rows) in failure.committed.loaded.iter() {
                tracing::warn!("'{}' stays committed with {} rows", entity, rows);
            }
            tracing::error!("Stopped while loading '{}'", failure.entity);
            &failure.error
        }
        RunError::Backend(e) => e,
        RunError::Serve(e) => {
            tracing::error!("Serving the API: {}", e);
            return;
        }
    };

    match error {
        backend::Error::SourceNotFound(path) => tracing::error!(
            "The file '{}' was not found, check the data directory",
            path.display()
        ),
        backend::Error::ReferentialViolation(e) => tracing::error!(
            "Foreign key error, a row in a CSV file refers to an id that does not exist in a parent table: {}",
            e
        ),
        backend::Error::ConnectionUnavailable(e) => {
            tracing::error!("Could not connect to the database server, is it running? {}", e)
        }
        backend::Error::AccessDenied(e) => {
            tracing::error!("Access denied, check your username and password: {}", e)
        }
        backend::Error::UnknownDatabase(e) => tracing::error!("The database does not exist: {}", e),
        other => tracing::error!("{}", other),
    }
}
