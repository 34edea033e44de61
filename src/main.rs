use clap::Parser;
use sentir::cli::{Cli, Commands};
use sentir::types::config::Config;
use sentir::SentirResult;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> SentirResult<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let config = Config::resolve(&cli.config)?;

    // Determine log level: CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        // Use config value if no flag was specified
        config.general.log_level.clone()
    };

    // Initialize logging with appropriate level
    let filter = EnvFilter::from_default_env().add_directive(
        format!("sentir={}", log_level)
            .parse()
            .unwrap_or_else(|_| "sentir=info".parse().expect("fallback directive is valid")),
    );

    if config.general.log_format == "json" {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    tracing::debug!("Configuration loaded from: {}", cli.config.display());

    match cli.command {
        Commands::Init { path } => {
            sentir::cli::commands::init(path).await?;
        }
        Commands::Serve { port } => {
            sentir::cli::commands::serve(port, &config).await?;
        }
        Commands::Predict { text, no_cache } => {
            sentir::cli::commands::predict(&text, no_cache, &config).await?;
        }
        Commands::Status => {
            sentir::cli::commands::status(&config).await?;
        }
        Commands::Config => {
            sentir::cli::commands::config_cmd(&cli.config).await?;
        }
        Commands::Doctor => {
            sentir::cli::commands::doctor(&config).await?;
        }
        Commands::Version => {
            sentir::cli::commands::version();
        }
    }

    Ok(())
}
