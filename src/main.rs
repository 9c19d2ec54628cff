use clap::Parser;
use film_ticket_box::adapters::http;
use film_ticket_box::core::snapshot::SnapshotRepository;
use film_ticket_box::core::ConfigProvider;
use film_ticket_box::utils::error::ErrorCategory;
use film_ticket_box::utils::{logger, validation::Validate};
use film_ticket_box::{CinemaError, CinemaService, CliConfig, LocalStorage, ServiceConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if config.logging.json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.logging.verbose);
    }

    tracing::info!("Starting film-ticket-box");
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ Server stopped with error: {} (Category: {:?})",
            e,
            e.category()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Storage => 2,
            _ => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(config: ServiceConfig) -> Result<(), CinemaError> {
    config.validate()?;

    let policy = config.validation_policy();
    tracing::info!(
        "Cinema grids limited to {}x{} seats",
        policy.max_width,
        policy.max_height
    );

    let service = match config.data_dir() {
        Some(data_dir) => {
            tracing::info!(
                "📁 Persisting catalog to {}/{}",
                data_dir,
                config.snapshot_file()
            );
            let repository =
                SnapshotRepository::new(LocalStorage::new(data_dir), config.snapshot_file());
            CinemaService::bootstrap(policy, Arc::new(repository)).await?
        }
        None => {
            tracing::info!("Persistence disabled, catalog lives in memory only");
            CinemaService::new(policy)
        }
    };

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("✅ Listening on {}", listener.local_addr()?);

    http::serve(listener, Arc::new(service)).await?;
    tracing::info!("Server stopped");
    Ok(())
}
