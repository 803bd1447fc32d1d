mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use screener::api_client::HttpScreenerClient;
use screener::config::Config;
use screener::results::download::DirDownloader;
use screener::results::notify::{ConsoleNotifier, NoticeKind, Notifier};
use screener::results::render::render_screen;
use screener::results::{NavigationState, ResultsView};
use screener::service::ScreenerService;
use screener::session::{FileStore, ResultsCache};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    let cli = Cli::parse();

    // Initialize structured logging on stderr so rendered output stays clean
    let level = if cli.verbose { "debug" } else { config.rust_log.as_str() };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("Screener client v{} -> {}", env!("CARGO_PKG_VERSION"), config.api_url);

    let client = HttpScreenerClient::new(&config.api_url, config.request_timeout)
        .context("Failed to build screener API client")?;
    let store = FileStore::new(&config.session_file);
    info!("Session cache at {}", store.path().display());
    let mut service =
        ScreenerService::new(Arc::new(client), ResultsCache::new(Box::new(store)));
    let mut notifier = ConsoleNotifier::new(cli.yes);

    // Commands that talk to the backend before there is anything to show.
    let nav = match &cli.command {
        Command::Analyze(args) => {
            let job = args.job_config()?;
            match service.analyze(&job, !args.uploaded).await {
                Ok(results) => NavigationState::with_results(1, results),
                Err(e) => {
                    notifier.notify(
                        NoticeKind::Failure,
                        &format!("Analysis failed: {}", e.detail()),
                    );
                    return Ok(());
                }
            }
        }
        Command::Fetch { session_id } => match service.fetch_session_results(session_id).await {
            Ok(results) => NavigationState::with_results(1, results),
            Err(e) => {
                notifier.notify(
                    NoticeKind::Failure,
                    &format!("Could not load session: {}", e.detail()),
                );
                return Ok(());
            }
        },
        Command::Upload { files } => {
            for file in files {
                match service.upload_resume(file).await {
                    Ok(ack) => notifier.notify(NoticeKind::Success, &ack.message),
                    Err(e) => notifier.notify(
                        NoticeKind::Failure,
                        &format!("Upload of {} failed: {}", file.display(), e.detail()),
                    ),
                }
            }
            return Ok(());
        }
        Command::ClearUploads => {
            match service.clear_upload_cache().await {
                Ok(ack) => notifier.notify(NoticeKind::Success, &ack.message),
                Err(e) => notifier.notify(
                    NoticeKind::Failure,
                    &format!("Clearing uploads failed: {}", e.detail()),
                ),
            }
            return Ok(());
        }
        _ => NavigationState::default(),
    };

    let mut view = ResultsView::new(
        service,
        Box::new(notifier),
        Box::new(DirDownloader::new(&config.download_dir)),
    );
    view.resolve(&nav);
    if let Some(filter) = cli.command.filter() {
        view.set_filter(filter);
    }

    match cli.command {
        Command::Analyze(_)
        | Command::Fetch { .. }
        | Command::Show { .. }
        | Command::Upload { .. }
        | Command::ClearUploads => {}
        Command::Export { .. } => {
            if let Some(path) = view.export_csv().await {
                println!("{}", path.display());
            }
            return Ok(());
        }
        Command::Summary { email } => {
            if let Some(path) = view.download_summary(&email).await {
                println!("{}", path.display());
            }
            return Ok(());
        }
        Command::Email { email } => {
            view.email_candidate(&email).await;
            return Ok(());
        }
        Command::BulkEmail { company, .. } => {
            view.email_filtered(&company).await;
            return Ok(());
        }
        Command::Notes { email, notes } => {
            view.update_notes(&email, &notes).await;
        }
        Command::Refresh => view.refresh(),
        Command::Clear => {
            view.clear_cache();
        }
    }

    print!("{}", render_screen(&view.screen()));
    Ok(())
}
