use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use console::Emoji;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use podgen::{
    LoftyProber, NoopReporter, ProgressEvent, ProgressReporter, SharedProgressReporter,
    generate_feed, load_config,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static MUSIC: Emoji<'_, '_> = Emoji("🎵 ", "[>] ");
static BROOM: Emoji<'_, '_> = Emoji("🧹 ", "[-] ");
static PARTY: Emoji<'_, '_> = Emoji("🎉 ", "[*] ");
static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");

/// Generate a podcast RSS feed from a folder of audio files
#[derive(Parser, Debug)]
#[command(name = "podgen")]
#[command(about = "Generate a podcast RSS feed from a folder of audio files")]
#[command(version)]
struct Args {
    /// TOML file with podcast configuration
    #[arg(short = 'c', long, value_name = "CONFIG.toml")]
    config: PathBuf,

    /// Quiet mode - suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

/// Progress reporter using indicatif for terminal output
struct ConsoleReporter {
    multi: MultiProgress,
    main_bar: ProgressBar,
    episode_bar: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    fn new() -> Self {
        let multi = MultiProgress::new();

        let main_style = ProgressStyle::default_bar()
            .template("{spinner:.green} {wide_msg}")
            .unwrap();

        let main_bar = multi.add(ProgressBar::new_spinner());
        main_bar.set_style(main_style);
        main_bar.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            multi,
            main_bar,
            episode_bar: Mutex::new(None),
        }
    }

    fn create_episode_bar(&self, total: usize) -> ProgressBar {
        let style = ProgressStyle::default_bar()
            .template(&format!(
                "  {MUSIC}[{{bar:30.cyan/blue}}] {{pos}}/{{len}} {{wide_msg}}"
            ))
            .unwrap()
            .progress_chars("█▓░");

        let bar = self.multi.add(ProgressBar::new(total as u64));
        bar.set_style(style);
        *self.episode_bar.lock().unwrap() = Some(bar.clone());
        bar
    }

    fn finish_episode_bar(&self) {
        if let Some(bar) = self.episode_bar.lock().unwrap().take() {
            bar.finish_and_clear();
        }
    }
}

impl ProgressReporter for ConsoleReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::ScanningFolder { path } => {
                self.main_bar.set_message(format!(
                    "{SEARCH}Scanning {}",
                    path.display().to_string().cyan()
                ));
            }

            ProgressEvent::ScanCompleted { audio_count, image } => {
                let image_note = match image {
                    Some(name) => format!("cover {}", name.green()),
                    None => "no cover image".dimmed().to_string(),
                };
                self.main_bar.set_message(format!(
                    "{HEADPHONES}{} audio files • {}",
                    audio_count.to_string().cyan(),
                    image_note
                ));
                if audio_count > 0 {
                    self.create_episode_bar(audio_count);
                }
            }

            ProgressEvent::ProcessingEpisode {
                episode_index,
                filename,
                ..
            } => {
                let bar = self.episode_bar.lock().unwrap().clone();
                if let Some(bar) = bar {
                    bar.set_position(episode_index as u64);
                    bar.set_message(truncate_name(&filename, 40));
                }
            }

            ProgressEvent::TagsStripped { filename, removed } => {
                let _ = self.multi.println(format!(
                    "  {BROOM}{} - {} tags removed",
                    truncate_name(&filename, 40).yellow(),
                    removed
                ));
            }

            ProgressEvent::FeedWritten {
                episode_count,
                path,
            } => {
                self.finish_episode_bar();
                self.main_bar.finish_and_clear();
                println!(
                    "\n{PARTY}{} {} episodes written to {}",
                    "Feed generated:".bold().green(),
                    episode_count.to_string().green().bold(),
                    path.file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default()
                        .cyan()
                );
            }
        }
    }
}

fn truncate_name(name: &str, max_len: usize) -> String {
    if name.len() <= max_len {
        name.to_string()
    } else {
        format!("{}...", &name[..max_len.saturating_sub(3)])
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.quiet {
        println!(
            "\n{}{} {}\n",
            MICROPHONE,
            "podgen".bold().magenta(),
            "- Podcast Feed Generator".dimmed()
        );
    }

    let config = load_config(&args.config).context("Failed to load configuration")?;

    let reporter: SharedProgressReporter = if args.quiet {
        NoopReporter::shared()
    } else {
        Arc::new(ConsoleReporter::new())
    };

    let prober = LoftyProber::new();
    let summary =
        generate_feed(&prober, &config, reporter).context("Failed to generate feed")?;

    if !args.quiet {
        if summary.tags_stripped > 0 {
            println!(
                "{BROOM}{} tags stripped from source files",
                summary.tags_stripped.to_string().yellow()
            );
        }
        println!(
            "\n{FOLDER}Feed: {}\n",
            summary.output_path.display().to_string().cyan()
        );
    }

    Ok(())
}
