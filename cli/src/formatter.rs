//! Output formatting: tables for listings, an indented tree for the job
//! monitor, raw JSON behind `--json`.

use colored::{ColoredString, Colorize};
use trainify_link::events::Notice;
use trainify_link::models::{Dataset, DatasetDetail, JobSnapshot, JobStatus, RagAnswer, RagHistory};

/// Maximum column width before truncation
const MAX_COLUMN_WIDTH: usize = 40;

/// Formats command results for display
pub struct OutputFormatter {
    json: bool,
    color: bool,
}

impl OutputFormatter {
    /// Create a new formatter
    pub fn new(json: bool, color: bool) -> Self {
        Self { json, color }
    }

    /// Serialize any payload for `--json` mode.
    pub fn to_json<T: serde::Serialize>(&self, value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
    }

    /// Format the dataset list as a table.
    pub fn datasets(&self, datasets: &[Dataset]) -> String {
        if self.json {
            return self.to_json(&datasets);
        }
        if datasets.is_empty() {
            return "No datasets found. Upload one with `trainify datasets upload`.".into();
        }

        let rows: Vec<Vec<String>> = datasets
            .iter()
            .map(|ds| {
                vec![
                    ds.id.clone(),
                    ds.name.clone(),
                    ds.chunk_count().to_string(),
                    fmt_time(&ds.created_at),
                ]
            })
            .collect();
        render_table(&["ID", "NAME", "CHUNKS", "CREATED"], &rows)
    }

    /// Format one dataset in detail.
    pub fn dataset_detail(&self, detail: &DatasetDetail) -> String {
        if self.json {
            return self.to_json(&detail);
        }

        let mut out = String::new();
        out.push_str(&format!("{}  ({})\n", detail.name, detail.id));
        out.push_str(&format!("Created: {}\n", fmt_time(&detail.created_at)));
        out.push_str(&format!("Chunks:  {}\n", detail.chunks.len()));
        out.push_str(&format!("Files ({}):\n", detail.files.len()));
        for file in &detail.files {
            out.push_str(&format!("  - {}\n", file));
        }
        out
    }

    /// Format a job snapshot: one block per job, its files indented below.
    pub fn jobs(&self, snapshot: &JobSnapshot) -> String {
        if self.json {
            return self.to_json(&snapshot);
        }
        if snapshot.is_empty() {
            return "No jobs found. Upload a dataset to see processing jobs here.".into();
        }

        let mut out = String::new();
        for job in &snapshot.jobs {
            out.push_str(&format!(
                "{}  [{}]  created {}",
                job.dataset_name,
                self.status_upper(job.status),
                fmt_time(&job.created_at),
            ));
            if let Some(finished) = &job.finished_at {
                out.push_str(&format!("  finished {}", fmt_time(finished)));
            }
            out.push('\n');

            if let Some(error) = &job.error {
                out.push_str(&format!("  error: {}\n", self.paint(error, "red")));
            }

            let files = snapshot.files_for(&job.id);
            if files.is_empty() {
                out.push_str("  (no files found for this job)\n");
            } else {
                for file in files {
                    out.push_str(&format!(
                        "  - {}  {}",
                        file.file_name,
                        self.status_lower(file.status)
                    ));
                    if let Some(error) = &file.error {
                        out.push_str(&format!("  ({})", self.paint(error, "red")));
                    }
                    out.push('\n');
                }
            }
        }
        out
    }

    /// Format the model name list.
    pub fn models(&self, models: &[String]) -> String {
        if self.json {
            return self.to_json(&models);
        }
        if models.is_empty() {
            return "No models available.".into();
        }
        models
            .iter()
            .map(|m| format!("- {}", m))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format the stored conversation.
    pub fn history(&self, history: &RagHistory) -> String {
        if self.json {
            return self.to_json(&history);
        }
        if history.messages.is_empty() {
            return "No query history yet.".into();
        }

        let mut out = String::new();
        out.push_str(&format!(
            "Model: {}  Dataset: {}\n\n",
            history.model, history.dataset
        ));
        for message in &history.messages {
            out.push_str(&format!("{} {}\n", self.paint("you:", "cyan"), message.prompt));
            if message.answer.is_empty() {
                out.push_str("  (pending)\n");
            } else {
                out.push_str(&format!("{}\n", message.answer));
            }
            out.push('\n');
        }
        out
    }

    /// Format one RAG answer with its context chunks.
    pub fn answer(&self, answer: &RagAnswer) -> String {
        if self.json {
            return self.to_json(&answer);
        }

        let mut out = String::new();
        out.push_str(&answer.answer);
        out.push('\n');
        if !answer.context.is_empty() {
            out.push_str(&format!("\n{}\n", self.paint("Context:", "cyan")));
            for chunk in &answer.context {
                out.push_str(&format!("  > {}\n", truncate(chunk, 120)));
            }
        }
        out
    }

    /// Format a transient notice.
    pub fn notice(&self, notice: &Notice) -> String {
        if notice.is_error() {
            format!("{} {}", self.paint("error:", "red"), notice.message)
        } else {
            format!("{} {}", self.paint("ok:", "green"), notice.message)
        }
    }

    fn status_upper(&self, status: JobStatus) -> ColoredString {
        self.status_colored(status, status.as_str().to_uppercase())
    }

    fn status_lower(&self, status: JobStatus) -> ColoredString {
        self.status_colored(status, status.as_str().to_string())
    }

    // Mirrors the status → color mapping of the web client's chips.
    fn status_colored(&self, status: JobStatus, text: String) -> ColoredString {
        if !self.color {
            return text.normal();
        }
        match status {
            JobStatus::Completed => text.green(),
            JobStatus::Failed | JobStatus::Canceled => text.red(),
            JobStatus::Processing => text.cyan(),
            JobStatus::Pending => text.yellow(),
            JobStatus::Unknown => text.normal(),
        }
    }

    fn paint(&self, text: &str, color: &str) -> ColoredString {
        if !self.color {
            return text.normal();
        }
        match color {
            "red" => text.red(),
            "green" => text.green(),
            "cyan" => text.cyan(),
            _ => text.normal(),
        }
    }
}

/// Drop the RFC3339 noise for terminal display.
fn fmt_time(raw: &str) -> String {
    if raw.is_empty() {
        return "-".into();
    }
    raw.replace('T', " ").trim_end_matches('Z').to_string()
}

fn truncate(value: &str, max_width: usize) -> String {
    if value.chars().count() <= max_width {
        value.to_string()
    } else {
        let cut: String = value.chars().take(max_width.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Terminal width, defaulting to 100 when unavailable.
fn terminal_width() -> usize {
    term_size::dimensions().map(|(w, _h)| w).unwrap_or(100)
}

/// Plain two-space-separated table with a dashed header rule.
///
/// Cells are only capped at [`MAX_COLUMN_WIDTH`] when the natural widths
/// would overflow the terminal.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let natural: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    let cap = if natural > terminal_width() {
        MAX_COLUMN_WIDTH
    } else {
        usize::MAX
    };

    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|c| truncate(c, cap)).collect())
        .collect();
    for width in widths.iter_mut() {
        *width = (*width).min(cap);
    }

    let mut out = String::new();
    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:<width$}", h, width = widths[i]))
        .collect();
    out.push_str(header_line.join("  ").trim_end());
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));
    out.push('\n');

    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use trainify_link::models::{Job, ProcessingFile};

    fn sample_snapshot() -> JobSnapshot {
        JobSnapshot {
            jobs: vec![Job {
                id: "j1".into(),
                owner: "u1".into(),
                dataset_name: "contracts".into(),
                status: JobStatus::Processing,
                created_at: "2026-05-01T10:00:00Z".into(),
                finished_at: None,
                error: None,
            }],
            processing_files: vec![ProcessingFile {
                id: "f1".into(),
                job_id: "j1".into(),
                file_name: "lease.pdf".into(),
                status: JobStatus::Processing,
                created_at: "2026-05-01T10:00:00Z".into(),
                finished_at: None,
                error: None,
            }],
        }
    }

    #[test]
    fn jobs_view_nests_files_under_their_job() {
        let formatter = OutputFormatter::new(false, false);
        let rendered = formatter.jobs(&sample_snapshot());
        assert!(rendered.contains("contracts"));
        assert!(rendered.contains("[PROCESSING]"));
        assert!(rendered.contains("  - lease.pdf  processing"));
    }

    #[test]
    fn empty_snapshot_has_hint() {
        let formatter = OutputFormatter::new(false, false);
        let rendered = formatter.jobs(&JobSnapshot::default());
        assert!(rendered.contains("No jobs found"));
    }

    #[test]
    fn json_mode_emits_wire_names() {
        let formatter = OutputFormatter::new(true, false);
        let rendered = formatter.jobs(&sample_snapshot());
        assert!(rendered.contains("\"processingFiles\""));
        assert!(rendered.contains("\"_id\": \"j1\""));
    }

    #[test]
    fn table_columns_align() {
        let rendered = render_table(
            &["ID", "NAME"],
            &[
                vec!["1".into(), "short".into()],
                vec!["22".into(), "a-much-longer-name".into()],
            ],
        );
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "ID  NAME");
        assert!(lines[2].starts_with("1   short"));
        assert!(lines[3].starts_with("22  a-much-longer-name"));
    }

    #[test]
    fn cells_are_capped_when_the_table_overflows() {
        // Wide enough to overflow any reasonable terminal.
        let long = "x".repeat(500);
        let rendered = render_table(&["V"], &[vec![long]]);
        assert!(rendered.lines().nth(2).unwrap().len() <= MAX_COLUMN_WIDTH);
        assert!(rendered.contains("..."));
    }
}
