use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use crossterm::event::{poll as event_poll, read as event_read, Event as CrosstermEvent};
use fresh_pager::chunk_reader::FileChunkReader;
use fresh_pager::config::Config;
use fresh_pager::services::terminal_modes::{self, TerminalModes};
use fresh_pager::services::tracing_setup;
use fresh_pager::Pager;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Instant;

/// A pager for huge, still-growing log files
#[derive(Parser, Debug)]
#[command(name = "fpage")]
#[command(about = "View huge, growing log files with bounded memory", long_about = None)]
#[command(version)]
struct Args {
    /// File to view
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for diagnostics (default: system temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(tracing_setup::default_log_path);
    if let Err(e) = tracing_setup::init_global(&log_file) {
        eprintln!("Warning: logging disabled ({}): {}", log_file.display(), e);
    }
    tracing::info!("Pager starting");

    let config =
        Config::load_or_default(args.config.as_deref()).context("Failed to load configuration")?;

    // Open the file before touching the terminal so errors print normally.
    let (width, height) = crossterm::terminal::size().context("Failed to query terminal size")?;
    let mut pager = Pager::open(&args.file, &config, width, height)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        terminal_modes::emergency_cleanup();
        original_hook(panic);
    }));

    let mut modes = TerminalModes::enable().context("Failed to set up terminal")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let result = run_event_loop(&mut pager, &mut terminal);

    modes.undo();
    tracing::info!("Pager exiting");
    result.context("Pager loop returned an error")
}

/// Draw, wait for input until the next growth check is due, repeat
fn run_event_loop(
    pager: &mut Pager<FileChunkReader>,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> AnyhowResult<()> {
    let mut needs_render = true;

    loop {
        if pager.should_quit() {
            break;
        }

        if needs_render {
            terminal.draw(|frame| pager.render(frame))?;
            needs_render = false;
        }

        let timeout = pager.time_until_next_check(Instant::now());
        if event_poll(timeout)? {
            match event_read()? {
                CrosstermEvent::Key(key_event) => {
                    pager.handle_key(key_event);
                    needs_render = true;
                }
                CrosstermEvent::Resize(width, height) => {
                    pager.resize(width, height);
                    needs_render = true;
                }
                _ => {}
            }
        }

        if pager.tick(Instant::now()) {
            needs_render = true;
        }
    }

    Ok(())
}
