use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use mindful_journal::{
    api::JournalClient,
    app::{App, Route, Timings},
    config::Config,
    logging,
    tui::Tui,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "mindful-journal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal client for your journaling server")]
struct Cli {
    /// Config file (default: <config dir>/mindful-journal/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Journal server URL, overrides the config file
    #[arg(short, long)]
    server: Option<String>,

    /// Start on the registration form instead of login
    #[arg(long)]
    register: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(server) = cli.server {
        config.server.url = server;
    }

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let _guard = logging::init(&config.logging)
        .map_err(|e| eyre!("Failed to set up logging in {:?}: {}", config.logging.dir, e))?;

    let base_url = config.server.base_url()?;
    let client = JournalClient::new(
        &base_url,
        Duration::from_secs(config.server.request_timeout_secs),
    )?;
    tracing::info!(server = %base_url, "starting journal client");

    let start = if cli.register {
        Route::Register
    } else {
        Route::Login
    };

    let mut tui = Tui::new()?;
    let mut app = App::new(client, Timings::default(), start);
    let result = app.run(&mut tui).await;
    drop(tui);

    if let Err(e) = &result {
        tracing::error!(error = %e, "journal client stopped with an error");
    }
    result
}
