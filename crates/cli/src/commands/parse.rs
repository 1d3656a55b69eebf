//! Parse command implementation.

use anyhow::Result;
use logparse_client::{FilterFormController, Notification, NotificationLevel};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::args::FilterArgs;
use crate::cancellation::{CancellationToken, Cancelled};
use crate::commands::{build_client_from_config, fill_form};

pub async fn run(
    config: logparse_config::Config,
    args: &FilterArgs,
    metrics: bool,
    quiet: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = build_client_from_config(&config, metrics)?;
    info!("Submitting to {}", client.base_url());

    let (tx, mut rx) = mpsc::channel::<Notification>(4);
    let mut controller =
        FilterFormController::with_filter(client, args.base_filter()).with_notifier(tx);
    fill_form(&mut controller, args);

    let outcome = tokio::select! {
        res = controller.parse_log_file() => res,
        _ = cancel.cancelled() => return Err(Cancelled.into()),
    };

    // Failures are reported by `main` from the returned error.
    while let Ok(notification) = rx.try_recv() {
        match notification.level {
            NotificationLevel::Info => info!("{}", notification.message),
            NotificationLevel::Error => debug!("{}", notification.message),
        }
    }

    let handle = outcome?;
    if !quiet {
        println!("{}", handle.path.display());
    }
    Ok(())
}
