//! `pontren`, the terminal dashboard for the SI-Pedipontren institution registry.
//!
//! # Usage
//!
//! ```
//! pontren
//! pontren --seed data/lembaga.json --log-file /tmp/pontren.log
//! pontren --config ~/.config/pontren/config.toml
//! ```

mod app;
mod settings;
mod ui;

use std::{
  fs::File,
  io,
  path::{Path, PathBuf},
  sync::Mutex,
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use pontren_core::{seed, store::MemoryStore};
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::Settings;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "pontren", version, about = "Terminal dashboard for SI-Pedipontren")]
struct Args {
  /// Path to a TOML config file (seed_path, log_file, tick_ms).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// JSON file with the initial records (default: built-in seed).
  #[arg(long, value_name = "FILE")]
  seed: Option<PathBuf>,

  /// Log output file (default: pontren.log).
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let args = Args::parse();

  // CLI flags override the config file and environment.
  let mut settings = Settings::load(args.config.as_deref())?;
  if let Some(seed) = args.seed {
    settings.seed_path = Some(seed);
  }
  if let Some(log_file) = args.log_file {
    settings.log_file = log_file;
  }

  init_logging(&settings.log_file)?;

  let records = match &settings.seed_path {
    Some(path) => seed::load(path)
      .with_context(|| format!("loading seed file {}", path.display()))?,
    None => seed::mock_data(),
  };
  let store = MemoryStore::from_records(records).context("building record store")?;
  tracing::info!(records = store.len(), "starting dashboard");
  let mut app = App::new(store);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(
    &mut terminal,
    &mut app,
    Duration::from_millis(settings.tick_ms),
  );

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  if let Err(e) = &run_result {
    tracing::error!(error = %e, "dashboard exited with error");
  }
  run_result
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging(path: &Path) -> Result<()> {
  let file = File::create(path)
    .with_context(|| format!("creating log file {}", path.display()))?;

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var("PONTREN_LOG")
        .from_env_lossy(),
    )
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .init();
  Ok(())
}

// ─── Event loop ───────────────────────────────────────────────────────────────

fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
  tick: Duration,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    if !event::poll(tick).context("polling terminal events")? {
      continue;
    }
    match event::read().context("reading terminal event")? {
      // Windows reports releases as well; act on presses only.
      Event::Key(key) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key)? {
          break;
        }
      }
      // Resize redraws on the next iteration.
      _ => {}
    }
  }

  Ok(())
}
