//! wsmock CLI entry point.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use wsmock_client::cli::Cli;
use wsmock_client::config::ClientConfig;
use wsmock_client::dispatch::Dispatcher;
use wsmock_client::error::{ClientError, ClientResult};
use wsmock_client::logbuf::LogBuffer;
use wsmock_client::session::Session;
use wsmock_client::sink::{ConsoleSink, NotificationSink, PresentationSink, ToastSink};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.debug {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Level::WARN.to_string()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    // Load configuration, then let flags win
    let mut config = if let Some(ref path) = cli.config {
        ClientConfig::load_from(path).map_err(ClientError::Config)?
    } else {
        ClientConfig::load().unwrap_or_default()
    };
    cli.apply_overrides(&mut config);

    let log = LogBuffer::new(config.log.reset_threshold);

    if config.notifications.desktop {
        let toast = ToastSink::new(&config.notifications.app_name);
        run_session(Dispatcher::new(log, ConsoleSink, toast), &config).await
    } else {
        run_session(Dispatcher::new(log, ConsoleSink, ConsoleSink), &config).await
    }
}

async fn run_session<P, N>(dispatcher: Dispatcher<P, N>, config: &ClientConfig) -> ClientResult<()>
where
    P: PresentationSink,
    N: NotificationSink,
{
    let timeout = Duration::from_secs(config.connection.timeout);
    let mut session = Session::new(dispatcher, timeout);

    if let Some(ref url) = config.connection.url {
        session.connect(url);
    }

    session.run().await
}
