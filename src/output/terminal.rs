// Colored terminal output for ranked vocabulary tables.
//
// This module handles all terminal-specific formatting: colors, tables,
// summary banners. The full tables live in the JSON artifacts; the terminal
// shows the head of each plus the corpus-level statistics.

use colored::Colorize;

use crate::analysis::phrases::PhraseRecord;
use crate::analysis::stems::StemRecord;
use crate::analysis::words::WordRecord;
use crate::output::truncate_chars;
use crate::pipeline::channel::ChannelSummary;

/// Display the head of a ranked word table.
pub fn display_word_table(words: &[WordRecord], top_n: usize) {
    if words.is_empty() {
        println!("No words survived filtering for this channel.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Word Table ({} words) ===", words.len()).bold()
    );
    println!();
    println!(
        "  {:>4}  {:<20} {:<5} {:>6}  {:>8}  {:>8}  {:>10}",
        "Rank".dimmed(),
        "Word".dimmed(),
        "Type".dimmed(),
        "Count".dimmed(),
        "RefZipf".dimmed(),
        "RelZipf".dimmed(),
        "Delta".dimmed(),
    );
    println!("  {}", "-".repeat(70).dimmed());

    for record in words.iter().take(top_n) {
        println!(
            "  {:>4}. {:<20} {:<5} {:>6}  {:>8.2}  {:>8.2}  {:>10.1}",
            record.rank,
            truncate_chars(&record.word, 20),
            record.word_class.as_str(),
            record.count,
            record.word_freq,
            record.relative_freq,
            record.freq_delta,
        );
    }
    if words.len() > top_n {
        println!("  {}", format!("... {} more", words.len() - top_n).dimmed());
    }
}

/// Display the head of a stem table plus the channel's unusuality index.
pub fn display_stem_table(stems: &[StemRecord], top_n: usize, unusuality_index: Option<f64>) {
    if stems.is_empty() {
        println!("No stem groups for this channel.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Stem Table ({} groups) ===", stems.len()).bold()
    );
    println!();
    println!(
        "  {:>4}  {:<16} {:<5} {:>6}  {:>8}  {:>10}  Forms",
        "Rank".dimmed(),
        "Stem".dimmed(),
        "Type".dimmed(),
        "Count".dimmed(),
        "RefZipf".dimmed(),
        "Delta".dimmed(),
    );
    println!("  {}", "-".repeat(78).dimmed());

    for record in stems.iter().take(top_n) {
        println!(
            "  {:>4}. {:<16} {:<5} {:>6}  {:>8.2}  {:>10.1}  {}",
            record.rank,
            truncate_chars(&record.stem, 16),
            record.word_class.as_str(),
            record.count,
            record.word_freq,
            record.freq_delta,
            truncate_chars(&record.word.join(", "), 32).dimmed(),
        );
    }
    if stems.len() > top_n {
        println!("  {}", format!("... {} more", stems.len() - top_n).dimmed());
    }

    match unusuality_index {
        Some(index) => println!("\n  Unusuality index: {}", format!("{index:.3}").bold()),
        None => println!("\n  Unusuality index: undefined (empty table)"),
    }
}

/// Display the head of a phrase table.
pub fn display_phrase_table(phrases: &[PhraseRecord], top_n: usize) {
    if phrases.is_empty() {
        println!("No phrases survived filtering for this channel.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Phrase Table ({} phrases) ===", phrases.len()).bold()
    );
    println!();
    println!(
        "  {:>4}  {:>3}  {:<44} {:>6}  {:>8}",
        "Rank".dimmed(),
        "Len".dimmed(),
        "Phrase".dimmed(),
        "Count".dimmed(),
        "RelZipf".dimmed(),
    );
    println!("  {}", "-".repeat(72).dimmed());

    for record in phrases.iter().take(top_n) {
        println!(
            "  {:>4}. {:>3}  {:<44} {:>6}  {:>8.2}",
            record.rank,
            record.phrase_len,
            truncate_chars(&record.phrase, 44),
            record.count,
            record.relative_freq,
        );
    }
    if phrases.len() > top_n {
        println!(
            "  {}",
            format!("... {} more", phrases.len() - top_n).dimmed()
        );
    }
}

/// Per-channel completion banner for the analyze run.
pub fn display_channel_summary(summary: &ChannelSummary) {
    println!("\n{}", format!("=== {} ===", summary.channel).bold());
    println!(
        "  {} videos, {} transcripts analyzed",
        summary.videos, summary.transcripts
    );
    println!(
        "  {} words, {} stem groups, {} phrases",
        summary.words, summary.stems, summary.phrases
    );
    match summary.unusuality_index {
        Some(index) => println!("  Unusuality index: {}", format!("{index:.3}").bold()),
        None => println!("  Unusuality index: undefined"),
    }
}
