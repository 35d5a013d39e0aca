use std::path::PathBuf;

use clap::Parser;
use nova_pet::ServerConfig;

/// Digital pet simulator served over HTTP
#[derive(Debug, Parser)]
#[command(name = "nova-pet", version, about)]
struct Args {
    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, short)]
    port: Option<u16>,

    /// Name of the pet
    #[arg(long)]
    name: Option<String>,

    /// TOML config file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Log at INFO level
    #[arg(long, short)]
    verbose: bool,

    /// Log at DEBUG level
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn resolve_config(&self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let mut config = ServerConfig::from_file(path)?;
                config.apply_env();
                config
            }
            None => ServerConfig::from_env(),
        };

        if let Some(host) = &self.host {
            config.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(name) = &self.name {
            config.pet_name.clone_from(name);
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Set log level based on flags
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else if args.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting nova-pet version {}", env!("CARGO_PKG_VERSION"));

    let config = args.resolve_config()?;
    tracing::debug!("Resolved config: {:?}", config);

    match nova_pet::start_pet_server(config).await {
        Ok(()) => {
            tracing::info!("Server shutting down normally");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Server error: {}", e);
            if args.debug {
                tracing::debug!("Error details: {:?}", e);
            }
            Err(e.into())
        }
    }
}
