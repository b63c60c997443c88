//! Report persistence and printing shared by the run commands.

use anyhow::Context;
use chrono::{DateTime, Local};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// `risk_analysis_<YYYYmmdd_HHMMSS>.txt` for the given time.
pub fn default_report_name(at: DateTime<Local>) -> String {
    format!("risk_analysis_{}.txt", at.format("%Y%m%d_%H%M%S"))
}

/// Writes `content` to `path`, or to a timestamped file in the current directory.
pub fn save_report(content: &str, path: Option<&Path>) -> anyhow::Result<PathBuf> {
    let path = path.map_or_else(|| PathBuf::from(default_report_name(Local::now())), Path::to_path_buf);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(path)
}

/// Prints a report with a heading.
pub fn print_report(title: &str, body: &str) {
    println!();
    println!("{}", title.bold().cyan());
    println!("{}", "=".repeat(title.len()).cyan());
    println!();
    println!("{}", body.trim_end());
    println!();
}

/// Handles `--save`: `None` skips, `Some(None)` uses the default name.
pub fn maybe_save(content: &str, save: Option<Option<PathBuf>>) -> anyhow::Result<()> {
    if let Some(target) = save {
        let path = save_report(content, target.as_deref())?;
        println!("{} Report saved to {}", "✓".green(), path.display().to_string().bold());
    }
    Ok(())
}
