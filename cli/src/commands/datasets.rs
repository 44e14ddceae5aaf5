//! Dataset subcommands: list, show, rename, delete, upload.

use super::confirm;
use crate::error::{CliError, Result};
use crate::formatter::OutputFormatter;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use trainify_link::datasets::{is_allowed_file, UploadFile};
use trainify_link::TrainifyClient;

pub async fn list(client: &TrainifyClient, formatter: &OutputFormatter) -> Result<()> {
    let datasets = client.datasets().list().await?;
    println!("{}", formatter.datasets(&datasets));
    Ok(())
}

pub async fn show(client: &TrainifyClient, formatter: &OutputFormatter, id: &str) -> Result<()> {
    let detail = client.datasets().detail(id).await?;
    println!("{}", formatter.dataset_detail(&detail));
    Ok(())
}

pub async fn rename(client: &TrainifyClient, id: &str, name: &str) -> Result<()> {
    client.datasets().rename(id, name).await?;
    println!("Renamed dataset {} to \"{}\"", id, name);
    Ok(())
}

pub async fn delete(client: &TrainifyClient, id: &str, yes: bool) -> Result<()> {
    let detail = client.datasets().detail(id).await?;
    if !yes
        && !confirm(&format!(
            "Delete \"{}\"? This cannot be undone.",
            detail.name
        ))?
    {
        return Err(CliError::Cancelled);
    }

    client.datasets().delete(id).await?;
    println!("Deleted \"{}\"", detail.name);
    Ok(())
}

pub async fn upload(client: &TrainifyClient, name: &str, paths: &[PathBuf]) -> Result<()> {
    // Validate extensions before reading anything into memory.
    for path in paths {
        let file_name = file_name_of(path)?;
        if !is_allowed_file(&file_name) {
            return Err(CliError::Input(format!(
                "File type not allowed: {}",
                file_name
            )));
        }
    }

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = std::fs::read(path)
            .map_err(|e| CliError::File(format!("Cannot read {}: {}", path.display(), e)))?;
        files.push(UploadFile {
            file_name: file_name_of(path)?,
            bytes,
        });
    }

    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let progress_bar = bar.clone();
    let progress: trainify_link::models::UploadProgressCallback =
        Arc::new(move |report: trainify_link::models::UploadProgress| {
            progress_bar.set_position(report.completed as u64);
            if !report.file_name.is_empty() {
                progress_bar.set_message(report.file_name.clone());
            }
        });

    client
        .datasets()
        .upload(name, files, Some(progress))
        .await?;
    bar.finish_with_message("uploaded");

    println!(
        "Uploaded {} file(s) as \"{}\". Track ingestion with `trainify jobs watch`.",
        paths.len(),
        name
    );
    Ok(())
}

fn file_name_of(path: &PathBuf) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| CliError::Input(format!("Not a file: {}", path.display())))
}
