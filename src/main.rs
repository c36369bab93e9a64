use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use upcount::config::{Config, LogFormat};
use upcount::invoices::{InvoiceDraft, InvoiceSummary};

fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("upcount={}", config.app.log_level).into());
    let registry = tracing_subscriber::registry().with(filter);
    match config.app.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }

    tracing::debug!("Environment: {}", config.app.env);

    let draft = match std::env::args().nth(1) {
        Some(path) if path != "-" => {
            let file = std::fs::File::open(&path)
                .with_context(|| format!("Failed to open invoice {}", path))?;
            InvoiceDraft::from_reader(file)
                .with_context(|| format!("Failed to load invoice from {}", path))?
        }
        _ => InvoiceDraft::from_reader(std::io::stdin().lock())
            .context("Failed to load invoice from stdin")?,
    };
    let summary = InvoiceSummary::build(draft, &config.money)?;

    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
