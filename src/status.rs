// Artifact inventory display — what is cached, for which channels, how old.

use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Local};
use colored::Colorize;

use crate::pipeline::artifacts::ChannelPaths;

/// Display the cached artifact inventory for every channel in the data dir.
pub fn show(data_dir: &Path) -> Result<()> {
    if !data_dir.exists() {
        println!("Data directory {} does not exist yet.", data_dir.display());
        println!("\nRun `lexiscope analyze <channels.csv>` to populate it.");
        return Ok(());
    }

    let mut channels: Vec<String> = Vec::new();
    for entry in fs::read_dir(data_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            channels.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    channels.sort();

    if channels.is_empty() {
        println!("No channels analyzed yet in {}.", data_dir.display());
        return Ok(());
    }

    println!("Data directory: {}", data_dir.display());

    for channel in &channels {
        let paths = ChannelPaths::new(data_dir, channel);
        println!("\n{}", format!("=== {channel} ===").bold());
        describe(&paths.videos(), "videos");
        describe(&paths.transcripts(), "transcripts");
        describe(&paths.words(), "words");
        describe(&paths.stems(), "stems");
        for phrase_len in 2..=4 {
            describe(&paths.phrases(phrase_len), &format!("phrases (n={phrase_len})"));
        }
        describe(&paths.phrases_aggregate(), "phrases (aggregated)");
    }

    Ok(())
}

fn describe(path: &Path, label: &str) {
    match fs::metadata(path) {
        Ok(meta) => {
            let age = meta
                .modified()
                .ok()
                .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "unknown".to_string());
            println!(
                "  {:<22} {:>10}  (updated {})",
                label,
                format_bytes(meta.len()),
                age
            );
        }
        Err(_) => {
            println!("  {:<22} {}", label, "missing".dimmed());
        }
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
