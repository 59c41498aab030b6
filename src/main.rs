//! A terminal logo showcase: an endless logo scroller with hover-pause,
//! click-to-preview, drifting background orbs and a mouse-parallax hero.
//!
//! Run the binary to open the showcase.
//! Run with `--dump` to print the populated page outline without a terminal.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::{Block, Paragraph},
    Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    loader::{self, LoadUpdate},
    state::{ActiveView, AppState},
};
use crate::config::AppConfig;
use crate::core::logos::{self as logo_sources, LogoReference};
use crate::core::placeholder::placeholder_graphic;
use crate::core::view::View;
use crate::ui::{
    button::ButtonWidget,
    hero::HeroWidget,
    layout::CELL_W_PX,
    orbs::OrbField,
    popup::AlertPopup,
    scroller::ScrollerWidget,
    theme::Theme,
};

/// Rows assumed for `--dump`, which never opens a terminal.
const DUMP_ROWS: u16 = 40;

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Endless logo scroller for the terminal")]
struct Cli {
    /// Logo to show (repeatable).  Overrides `--logo-dir` and the config file.
    #[arg(long = "logo", value_name = "PATH")]
    logos: Vec<String>,

    /// Show every image found under this directory, sorted by path.
    #[arg(long, value_name = "DIR")]
    logo_dir: Option<PathBuf>,

    /// Number of background orbs.
    #[arg(long)]
    orbs: Option<usize>,

    /// Seed for the orb layout.
    #[arg(long)]
    seed: Option<u64>,

    /// Cap on loop copies reached by resize duplication.
    #[arg(long)]
    max_copies: Option<usize>,

    /// Print the placeholder SVG for this index and exit.
    #[arg(long, value_name = "N")]
    print_placeholder: Option<usize>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,

    /// Populate the page against `--viewport` and print its outline.
    #[arg(long)]
    dump: bool,

    /// Scroller viewport width in pixels for `--dump`.
    #[arg(long, default_value_t = 720)]
    viewport: u32,
}

impl Cli {
    /// Config file values with the CLI's overrides applied.
    fn effective_config(&self, mut config: AppConfig) -> Result<AppConfig> {
        if !self.logos.is_empty() {
            config.logos = self.logos.iter().map(LogoReference::new).collect();
        } else if let Some(dir) = &self.logo_dir {
            config.logos = logo_sources::discover(dir)
                .with_context(|| format!("scanning logo directory {}", dir.display()))?;
        }
        if let Some(orbs) = self.orbs {
            config.orb_count = orbs;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(max_copies) = self.max_copies {
            config.max_copies = max_copies;
        }
        Ok(config.clamped())
    }
}

fn page_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

// ───────────────────────────────────────── dump ──────────────

/// Mount the page in memory, resolve every load synchronously and return
/// the document outline.
fn dump_page(config: AppConfig, viewport_px: u32) -> Result<String> {
    // Columns whose interior is at least `viewport_px` wide, plus the border.
    let cols = (viewport_px as f64 / CELL_W_PX).ceil() as u16 + 2;
    let area = Rect::new(0, 0, cols, DUMP_ROWS);
    let mut rng = page_rng(config.seed);
    let mut state = AppState::mount(config, area, &mut rng)?;

    for reference in loader::distinct(&state.config.logos) {
        state.apply_load(loader::load_logo(reference));
    }

    let track = state.page.scroller.track();
    let mut out = state.doc.outline();
    out.push_str(&format!(
        "# items: {}, copies: {}, loaded: {}, placeholders: {}\n",
        state.doc.children(track).len(),
        state.page.scroller.copies(&state.doc),
        state.loaded,
        state.failed,
    ));
    Ok(out)
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (silent unless RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    // ── print-and-exit modes ──────────────────────────────────
    if let Some(index) = cli.print_placeholder {
        print!("{}", placeholder_graphic(index).to_svg());
        return Ok(());
    }

    let config = cli.effective_config(AppConfig::load())?;
    if cli.print_config {
        print!("{}", config.serialise());
        return Ok(());
    }
    if cli.dump {
        print!("{}", dump_page(config, cli.viewport)?);
        return Ok(());
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(
        stderr_handle,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let area = Rect::new(0, 0, size.width, size.height);
    let tick_rate = Duration::from_millis(config.tick_ms);
    let mut rng = page_rng(config.seed);
    let mut state = AppState::mount(config, area, &mut rng)?;

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(tick_rate);
    let (load_tx, mut load_rx) = tokio::sync::mpsc::unbounded_channel::<LoadUpdate>();
    let jobs = loader::spawn_logo_loads(load_tx, &state.config.logos);
    tracing::info!(jobs, "logo loads started");

    // ── event loop ────────────────────────────────────────────
    let result = run(&mut terminal, &mut state, &mut events, &mut load_rx).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    state: &mut AppState,
    events: &mut tokio::sync::mpsc::UnboundedReceiver<AppEvent>,
    load_rx: &mut tokio::sync::mpsc::UnboundedReceiver<LoadUpdate>,
) -> Result<()> {
    loop {
        // ── draw first ─────────────────────────────────────────
        let now = Instant::now();
        terminal.draw(|frame| {
            let area = frame.area();
            let layout = state.layout();
            let assets = state.assets();

            frame.render_widget(Block::default().style(Theme::page_style()), area);
            frame.render_widget(
                OrbField {
                    doc: &state.doc,
                    orbs: state.page.nodes.orbs,
                    now,
                },
                area,
            );
            frame.render_widget(
                HeroWidget {
                    doc: &state.doc,
                    hero: state.page.nodes.hero,
                    now,
                    assets,
                },
                layout.hero_area,
            );
            frame.render_widget(
                ButtonWidget {
                    doc: &state.doc,
                    button: state.page.nodes.play,
                },
                layout.play_area,
            );
            frame.render_widget(
                ScrollerWidget {
                    doc: &state.doc,
                    track: state.page.scroller.track(),
                    offset_px: state.marquee.offset_px(),
                    hovered: state.hovered,
                    assets,
                },
                layout.scroller_area,
            );
            frame.render_widget(
                Paragraph::new(state.status_line()).style(Theme::status_bar_style()),
                layout.status_area,
            );

            if let (ActiveView::Alert, Some(message)) = (state.active_view, state.alert.as_deref()) {
                frame.render_widget(AlertPopup { message }, area);
            }
        })?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m),
                    AppEvent::Resize(w, h) => handler::handle_resize(state, w, h),
                    AppEvent::FocusLost => handler::handle_focus_lost(state),
                    AppEvent::Tick(at) => state.tick(at),
                }
            }

            Some(update) = load_rx.recv() => {
                state.apply_load(update);
                // Drain everything currently queued before redrawing.
                while let Ok(update) = load_rx.try_recv() {
                    state.apply_load(update);
                }
            }
        }

        if state.should_quit {
            return Ok(());
        }
    }
}
