use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::warn;

use lexiscope::analysis::lexicon::ReferenceLexicon;
use lexiscope::config::Config;
use lexiscope::pipeline::artifacts::ChannelPaths;
use lexiscope::pipeline::channel::{self, AnalysisOptions};
use lexiscope::youtube::client::YouTubeClient;
use lexiscope::youtube::transcripts::CaptionClient;
use lexiscope::youtube::YouTubeSource;

/// Lexiscope: vocabulary fingerprinting for YouTube channels.
///
/// Downloads channel transcripts and ranks the channel's words, stems, and
/// phrases against general-language frequency to surface the vocabulary
/// that makes the channel unusual.
#[derive(Parser)]
#[command(name = "lexiscope", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline for every channel in a channels file
    Analyze {
        /// CSV file of `channel_id,channel_name` lines
        channels: PathBuf,

        /// Build phrase tables for lengths 2 up to this value
        #[arg(long, default_value = "4")]
        max_phrase_len: usize,

        /// Drop words whose reference zipf is at or above this ceiling
        #[arg(long, default_value = "5.5")]
        max_zipf: f64,

        /// Redownload and recompute everything, ignoring cached artifacts
        #[arg(long)]
        refresh: bool,

        /// Number of transcripts to fetch in parallel
        #[arg(long, default_value = "8")]
        concurrency: usize,
    },

    /// Rebuild one channel's word table from its cached transcripts
    Words {
        /// Channel name (the artifact directory name)
        channel: String,

        /// Drop words whose reference zipf is at or above this ceiling
        #[arg(long, default_value = "5.5")]
        max_zipf: f64,
    },

    /// Rebuild one channel's stem table from its cached word table
    Stems {
        /// Channel name (the artifact directory name)
        channel: String,
    },

    /// Rebuild one phrase table from a channel's cached transcripts
    Phrases {
        /// Channel name (the artifact directory name)
        channel: String,

        /// Phrase length (number of tokens per window)
        #[arg(long, default_value = "3")]
        len: usize,
    },

    /// Show cached artifacts per channel
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lexiscope=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            channels,
            max_phrase_len,
            max_zipf,
            refresh,
            concurrency,
        } => {
            let config = Config::load()?;
            config.require_youtube()?;

            let lexicon = ReferenceLexicon::load(&config.lexicon_path)?;
            let channels = channel::read_channels_file(&channels)?;

            let source = YouTubeSource::new(
                YouTubeClient::new(&config.youtube_api_url, &config.youtube_api_key)?,
                CaptionClient::new(&config.caption_api_url)?,
                concurrency,
            );

            let options = AnalysisOptions {
                refresh,
                max_phrase_len,
                max_reference_zipf: max_zipf,
            };

            let total = channels.len();
            let mut analyzed = 0;

            for spec in &channels {
                println!("\nAnalyzing channel: {}", spec.name.bold());

                match channel::run_channel(&source, spec, &config.data_dir, &lexicon, &options)
                    .await
                {
                    Ok(summary) => {
                        lexiscope::output::terminal::display_channel_summary(&summary);
                        analyzed += 1;
                    }
                    Err(e) => {
                        warn!(channel = %spec.name, error = %e, "Channel analysis failed");
                        println!("  {} {e}", "Error:".red());
                    }
                }
            }

            println!(
                "\n{}",
                format!("{analyzed} of {total} channels analyzed.").bold()
            );
        }

        Commands::Words { channel, max_zipf } => {
            let config = Config::load()?;
            let lexicon = ReferenceLexicon::load(&config.lexicon_path)?;
            let paths = ChannelPaths::new(&config.data_dir, &channel);

            let words = channel::rebuild_words(&paths, &lexicon, max_zipf)?;
            lexiscope::output::terminal::display_word_table(&words, 25);
            println!("\nWord table saved to: {}", paths.words().display());
        }

        Commands::Stems { channel } => {
            let config = Config::load()?;
            let paths = ChannelPaths::new(&config.data_dir, &channel);

            let analysis = channel::rebuild_stems(&paths)?;
            lexiscope::output::terminal::display_stem_table(
                &analysis.records,
                25,
                analysis.unusuality_index,
            );
            println!("\nStem table saved to: {}", paths.stems().display());
        }

        Commands::Phrases { channel, len } => {
            let config = Config::load()?;
            let paths = ChannelPaths::new(&config.data_dir, &channel);

            let phrases = channel::rebuild_phrases(&paths, len)?;
            lexiscope::output::terminal::display_phrase_table(&phrases, 25);
            println!(
                "\nPhrase table saved to: {}",
                paths.phrases(len).display()
            );
        }

        Commands::Status => {
            let config = Config::load()?;
            lexiscope::status::show(&config.data_dir)?;
        }
    }

    Ok(())
}
