use catserver::core::ConfigProvider;
use catserver::transport::{serve, shutdown_signal};
use catserver::utils::{logger, validation::Validate};
use catserver::{app, CliConfig, Settings};
use clap::Parser;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // Initialize logging
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting catserver");

    // Load configuration
    let settings = match Settings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // Validate configuration
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // Build service and router
    let router = match app::build_router(&settings) {
        Ok(router) => router,
        Err(e) => {
            tracing::error!("❌ Failed to build service: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // Serve until Ctrl-C
    let listener = TcpListener::bind(settings.listen_addr()).await?;

    serve(listener, router, shutdown_signal()).await?;

    Ok(())
}
