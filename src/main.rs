//! AutoFlow - Workflow Recording and Automation Suggestions
//!
//! Records a screen workflow as sampled frames and asks a multimodal model
//! for automation suggestions.

use autoflow::analyzer::{AnalyzeFrames, WorkflowAnalyzer, WorkflowSuggestion};
use autoflow::app::cli::{Cli, Commands, ConfigAction};
use autoflow::app::config::Config;
use autoflow::app::present::render_markdown;
use autoflow::capture::{encode_jpeg, Frame, FrameSequence, ImageDirSource, MAX_FRAMES};
use autoflow::session::{drive_session, CaptureSession, SessionState};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    match cli.command {
        Commands::Record {
            frames,
            duration,
            output,
        } => {
            run_record(&frames, duration, output, &config)?;
        }
        Commands::Analyze { input, output } => {
            run_analyze(&input, output, &config)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

/// Record from an image-directory source, analyze, and present the result.
fn run_record(
    frames_dir: &Path,
    duration: u64,
    output: Option<PathBuf>,
    config: &Config,
) -> anyhow::Result<()> {
    let mut session = CaptureSession::new();
    let provider = ImageDirSource::provider(frames_dir);
    let analyzer = WorkflowAnalyzer::from_config(&config.analyzer);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let stop = CancellationToken::new();

        // Ctrl-C is the manual stop; a nonzero duration adds a deadline
        let watcher = {
            let stop = stop.clone();
            tokio::spawn(async move {
                if duration > 0 {
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => {}
                        _ = tokio::time::sleep(Duration::from_secs(duration)) => {}
                    }
                } else {
                    let _ = tokio::signal::ctrl_c().await;
                }
                stop.cancel();
            })
        };

        let result = drive_session(&mut session, &provider, &analyzer, stop).await;
        watcher.abort();
        result
    })?;

    present_session(&session, output)
}

/// Analyze a directory of already-captured frames without recording.
fn run_analyze(input: &Path, output: Option<PathBuf>, config: &Config) -> anyhow::Result<()> {
    let frames = load_frames(input)?;
    info!(frames = frames.len(), "analyzing captured frames");

    let analyzer = WorkflowAnalyzer::from_config(&config.analyzer);
    let rt = tokio::runtime::Runtime::new()?;

    match rt.block_on(analyzer.analyze(&frames)) {
        Ok(suggestions) => {
            print!("{}", render_markdown(&suggestions));
            write_output(output, &suggestions)?;
        }
        Err(e) => {
            eprintln!("Analysis failed: {}", e);
            eprintln!("Fix the problem and run the command again.");
        }
    }
    Ok(())
}

/// Build a frame sequence from the image files in a directory, in filename
/// order, re-encoded through the capture pipeline's JPEG path.
fn load_frames(dir: &Path) -> anyhow::Result<FrameSequence> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| matches!(e.to_ascii_lowercase().as_str(), "jpg" | "jpeg" | "png"))
                .unwrap_or(false)
        })
        .collect();
    paths.sort();

    if paths.len() > MAX_FRAMES {
        warn!(
            found = paths.len(),
            cap = MAX_FRAMES,
            "too many frames; analyzing the first {} only",
            MAX_FRAMES
        );
    }

    let mut frames = FrameSequence::new();
    for path in paths.iter().take(MAX_FRAMES) {
        let image = image::open(path)?.to_rgba8();
        frames.push(Frame::new(encode_jpeg(&image)?));
    }

    if frames.is_empty() {
        anyhow::bail!("no image files found in {}", dir.display());
    }
    Ok(frames)
}

/// Print the session outcome and optionally write the suggestions to a file.
fn present_session(session: &CaptureSession, output: Option<PathBuf>) -> anyhow::Result<()> {
    match session.state() {
        SessionState::Results => {
            print!("{}", render_markdown(session.suggestions()));
            write_output(output, session.suggestions())?;
        }
        SessionState::Error => {
            eprintln!(
                "Analysis failed: {}",
                session.error_message().unwrap_or("unknown error")
            );
            eprintln!("Start a new recording to try again.");
        }
        SessionState::Idle => {
            eprintln!("No recording was made (source acquisition did not complete).");
        }
        state => {
            warn!(?state, "session ended in an unexpected state");
        }
    }
    Ok(())
}

/// Write suggestions to a JSON file when an output path was given.
fn write_output(output: Option<PathBuf>, suggestions: &[WorkflowSuggestion]) -> anyhow::Result<()> {
    if let Some(path) = output {
        std::fs::write(&path, serde_json::to_string_pretty(suggestions)?)?;
        info!(path = %path.display(), "suggestions written");
    }
    Ok(())
}

/// Show or initialize the configuration.
fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Init { force } => {
            let path = Config::default_path();
            if path.exists() && !force {
                anyhow::bail!(
                    "config already exists at {} (use --force to overwrite)",
                    path.display()
                );
            }
            Config::default().save(&path)?;
            println!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}
