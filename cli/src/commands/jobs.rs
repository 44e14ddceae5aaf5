//! Job subcommands: list, watch, cancel.

use super::confirm;
use crate::error::{CliError, Result};
use crate::formatter::OutputFormatter;
use std::time::Duration;
use trainify_link::monitor::{MonitorEvent, MonitorOptions};
use trainify_link::TrainifyClient;

pub async fn list(client: &TrainifyClient, formatter: &OutputFormatter) -> Result<()> {
    let snapshot = client.jobs().fetch_snapshot().await?;
    println!("{}", formatter.jobs(&snapshot));
    Ok(())
}

/// Poll continuously, re-rendering on change, until Ctrl-C.
pub async fn watch(
    client: &TrainifyClient,
    formatter: &OutputFormatter,
    interval_ms: u64,
) -> Result<()> {
    let options = MonitorOptions {
        poll_interval: Duration::from_millis(interval_ms),
        rollback_on_failure: false,
    };
    let mut monitor = client.monitor_jobs(options);

    eprintln!("Watching jobs every {} ms. Ctrl-C to stop.", interval_ms);

    let mut last_rendered = None;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = monitor.next() => match event {
                Some(MonitorEvent::Snapshot(snapshot)) => {
                    // Only re-render when something actually changed.
                    if last_rendered.as_ref() != Some(&snapshot) {
                        println!("{}", formatter.jobs(&snapshot));
                        last_rendered = Some(snapshot);
                    }
                }
                Some(MonitorEvent::Notice(notice)) => {
                    eprintln!("{}", formatter.notice(&notice));
                }
                None => break,
            }
        }
    }

    monitor.close().await;
    eprintln!("Stopped.");
    Ok(())
}

pub async fn cancel(client: &TrainifyClient, id: &str, yes: bool) -> Result<()> {
    let snapshot = client.jobs().fetch_snapshot().await?;
    let job = snapshot
        .job(id)
        .ok_or_else(|| CliError::Input(format!("No job with id {}", id)))?;

    if job.status.is_terminal() {
        return Err(CliError::Input(format!(
            "Job \"{}\" is already {}",
            job.dataset_name, job.status
        )));
    }

    if !yes
        && !confirm(&format!(
            "Cancel the job for dataset \"{}\"? This will stop processing all remaining files.",
            job.dataset_name
        ))?
    {
        return Err(CliError::Cancelled);
    }

    client.jobs().cancel_job(id).await?;
    println!("Job \"{}\" has been canceled successfully", job.dataset_name);
    Ok(())
}
