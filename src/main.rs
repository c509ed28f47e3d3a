use anyhow::Result;
use clap::Parser;
use study_dashboard::cli::{self, Cli};
use study_dashboard::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "study_dashboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let mut tracker = cli::open_tracker(&cli, &config)?;
    let now = cli::now(&cli);

    match cli.command {
        Some(command) => cli::execute(command, &mut tracker, &config, now).await?,
        None => {
            // Launch TUI
            let mut app = App::new(config, tracker)?;
            app.run().await?;
        }
    }

    Ok(())
}
