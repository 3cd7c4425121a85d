// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use easysubs::app_config::{self, Config};
use easysubs::errors::AppError;
use easysubs::file_utils::FileManager;
use easysubs::playback::{run_realtime, ClockSource, DisplayFrame, DisplaySink, PlaybackMode, SubtitlePlayer};
use easysubs::reveal::RevealSequencer;
use easysubs::subtitle_processor::ParseReport;
use easysubs::timecode;

/// CLI Wrapper for PlaybackMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliPlaybackMode {
    Instant,
    CharacterByCharacter,
}

impl From<CliPlaybackMode> for PlaybackMode {
    fn from(cli_mode: CliPlaybackMode) -> Self {
        match cli_mode {
            CliPlaybackMode::Instant => PlaybackMode::Instant,
            CliPlaybackMode::CharacterByCharacter => PlaybackMode::CharacterByCharacter,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse subtitle files and list their cues and skipped blocks
    Inspect {
        /// Subtitle file, or a directory searched recursively for .srt files
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the cue active at a given time
    At {
        /// Subtitle file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Time in seconds (12.5) or as a timecode (00:00:12,500)
        #[arg(value_name = "TIME")]
        time: String,
    },

    /// Print the reveal snapshots of the cue active at a given time
    Reveal {
        /// Subtitle file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Time in seconds (12.5) or as a timecode (00:00:12,500)
        #[arg(value_name = "TIME")]
        time: String,
    },

    /// Play subtitles to the terminal in real time
    Play {
        /// Subtitle file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Display mode
        #[arg(short, long, value_enum)]
        mode: Option<CliPlaybackMode>,

        /// Playback speed multiplier
        #[arg(short, long)]
        speed: Option<f64>,
    },

    /// Generate shell completions for easysubs
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// easysubs - SubRip subtitle inspection and playback
#[derive(Parser, Debug)]
#[command(name = "easysubs")]
#[command(version)]
#[command(about = "Parse, query and play SRT subtitles")]
#[command(long_about = "easysubs parses SRT subtitle files (with optional X1/X2/Y1/Y2 position metadata), \
looks up the cue shown at any instant and plays cues back character by character.

EXAMPLES:
    easysubs inspect movie.srt                  # List cues and skipped blocks
    easysubs inspect --json subs/               # Every .srt under a directory, as JSON
    easysubs at movie.srt 00:01:02,500          # Cue on screen at 62.5s
    easysubs reveal movie.srt 62.5              # Reveal snapshots of that cue
    easysubs play -m instant -s 2 movie.srt     # Play at double speed
    easysubs completions bash > easysubs.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and label for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, label) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, label, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

// @struct: Display sink writing the current cue on one terminal line
struct TerminalDisplay;

impl DisplaySink for TerminalDisplay {
    fn show(&mut self, frame: &DisplayFrame) {
        let mut stdout = std::io::stdout();
        let _ = write!(stdout, "\r\x1B[2K{}", frame.text.replace('\n', " | "));
        let _ = stdout.flush();
    }

    fn clear(&mut self) {
        println!();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "easysubs", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cli_level) = &cli.log_level {
        let level: app_config::LogLevel = cli_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config_path).map_err(AppError::config)?;

    match &cli.log_level {
        Some(cli_level) => config.log_level = cli_level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    config
        .validate()
        .context("Configuration validation failed")
        .map_err(AppError::config)?;

    match cli.command {
        Commands::Inspect { path, json } => inspect(&path, json),
        Commands::At { file, time } => show_cue_at(&file, &time),
        Commands::Reveal { file, time } => show_reveal(&file, &time, &config),
        Commands::Play { file, mode, speed } => {
            if let Some(mode) = mode {
                config.playback.mode = mode.into();
            }
            if let Some(speed) = speed {
                config.playback.speed = speed;
            }
            config
                .validate()
                .context("Invalid playback options")
                .map_err(AppError::config)?;
            play(&file, &config).await
        }
        Commands::Completions { .. } => Ok(()),
    }
}

// Accepts either plain seconds or an SRT timecode
fn parse_time_arg(value: &str) -> Result<f64> {
    if value.contains(':') {
        return timecode::parse(value).map_err(|e| anyhow!("{}", e));
    }

    let seconds: f64 = value
        .parse()
        .map_err(|_| anyhow!("Invalid time '{}': expected seconds or HH:MM:SS,mmm", value))?;
    if seconds < 0.0 {
        return Err(anyhow!("Time must not be negative: {}", value));
    }
    Ok(seconds)
}

fn load_report(file: &Path) -> Result<ParseReport> {
    let report = FileManager::parse_file(file)
        .map_err(AppError::from)
        .with_context(|| format!("Failed to load subtitles: {}", file.display()))?;

    for skipped in &report.skipped {
        warn!("{}: skipped {}", file.display(), skipped);
    }
    Ok(report)
}

fn inspect(path: &Path, json: bool) -> Result<()> {
    let files = if FileManager::dir_exists(path) {
        FileManager::find_subtitle_files(path).map_err(|e| AppError::File(format!("{:#}", e)))?
    } else if FileManager::file_exists(path) {
        vec![path.to_path_buf()]
    } else {
        return Err(AppError::File(format!("Input path does not exist: {}", path.display())).into());
    };

    if files.is_empty() {
        warn!("No subtitle files found in {}", path.display());
        return Ok(());
    }

    for file in &files {
        let report = load_report(file)?;

        if json {
            let value = serde_json::json!({
                "file": file,
                "cues": report.cues,
                "skipped": report.skipped,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
            continue;
        }

        println!("# {}", file.display());
        for cue in &report.cues {
            println!("{}", cue);
        }

        match report.cues.duration() {
            Ok(duration) => info!(
                "{}: {} cues, {} skipped, duration {}",
                file.display(),
                report.cues.len(),
                report.skipped.len(),
                timecode::format(duration)
            ),
            Err(_) => warn!("{}: no cues parsed ({} blocks skipped)", file.display(), report.skipped.len()),
        }
    }

    Ok(())
}

fn show_cue_at(file: &Path, time: &str) -> Result<()> {
    let time = parse_time_arg(time)?;
    let report = load_report(file)?;

    match report.cues.lookup(time) {
        Some(cue) => print!("{}", cue),
        None => println!("No active cue at {}", timecode::format(time)),
    }
    Ok(())
}

fn show_reveal(file: &Path, time: &str, config: &Config) -> Result<()> {
    let time = parse_time_arg(time)?;
    let report = load_report(file)?;

    let Some(cue) = report.cues.lookup(time) else {
        println!("No active cue at {}", timecode::format(time));
        return Ok(());
    };

    let mut offset = cue.start();
    for snapshot in RevealSequencer::with_fraction(cue, config.playback.reveal_fraction) {
        println!("{}  {}", timecode::format(offset), snapshot.text.replace('\n', " | "));
        offset += snapshot.delay;
    }
    Ok(())
}

async fn play(file: &Path, config: &Config) -> Result<()> {
    let document = FileManager::read_document(file).map_err(AppError::from)?;

    let mut player = SubtitlePlayer::with_display(TerminalDisplay)
        .with_reveal_fraction(config.playback.reveal_fraction);

    let skipped = player
        .start(&document, config.playback.mode, ClockSource::elapsed())
        .map_err(AppError::from)?;
    for block in &skipped {
        warn!("{}: skipped {}", file.display(), block);
    }

    tokio::select! {
        result = run_realtime(&mut player, config.playback.tick_interval(), config.playback.speed) => result?,
        _ = tokio::signal::ctrl_c() => info!("Playback interrupted"),
    }

    player.stop();
    Ok(())
}
