//! An infinite-loop review carousel for the terminal.
//!
//! Run the binary to browse reviews: drag, scroll, or click a card to
//! centre it.  Run with `--headless <secs>` to watch the controller on a
//! virtual clock without a terminal.

mod app;
mod carousel;
mod config;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::carousel::{Carousel, Notice};
use crate::config::AppConfig;
use crate::core::reviews::{self, Review};
use crate::core::surface::Surface;
use crate::core::track::Track;
use crate::ui::{
    carousel_widget::{dots, CarouselWidget},
    layout::AppLayout,
    theme::Theme,
};

/// Viewport width for headless runs (a typical desktop carousel).
const HEADLESS_VIEWPORT_PX: f64 = 1280.0;
/// Virtual frame length for headless runs (~60 fps).
const HEADLESS_FRAME: Duration = Duration::from_millis(16);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Infinite-loop review carousel")]
struct Cli {
    /// TOML file of `[[review]]` tables (defaults to built-in samples).
    #[arg(long)]
    reviews: Option<PathBuf>,

    /// Config file (defaults to `$XDG_CONFIG_HOME/reel/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start with auto-advance switched off.
    #[arg(long = "no-auto")]
    no_auto: bool,

    /// Write logs to this file (the TUI owns the terminal).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Run without a terminal for this many virtual seconds.
    #[arg(long, value_name = "SECS")]
    headless: Option<u64>,

    /// Print the effective configuration and exit.
    #[arg(long = "print-config")]
    print_config: bool,
}

// ───────────────────────────────────────── logging ───────────

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = |default: &str| {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter("info"))
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else if cli.headless.is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(filter("warn"))
            .with_writer(io::stderr) // stdout carries the run's own output
            .init();
    }
    Ok(())
}

// ───────────────────────────────────────── headless ──────────

fn run_headless(reviews: &[Review], config: &AppConfig, secs: u64) {
    if !config.carousel.auto_advance {
        tracing::warn!("auto-advance is off; nothing will move in a headless run");
    }

    let track = Track::uniform(
        reviews.len(),
        config.track.card_width_px,
        config.track.gap_px,
        HEADLESS_VIEWPORT_PX,
    );
    let mut carousel = Carousel::new(track, config.carousel.clone());

    let end = Duration::from_secs(secs);
    let mut now = Duration::ZERO;
    while now <= end {
        carousel.frame(now);
        for notice in carousel.take_notices() {
            let t = carousel.now().as_secs_f64();
            match notice {
                Notice::Advanced { amount } => {
                    println!("{t:>8.3}s  advance  {amount:+.0}px");
                }
                Notice::Warped { from, to, delta } => {
                    let author = reviews
                        .get(carousel.surface().source_index(to))
                        .map_or("", |r| r.author.as_str());
                    println!("{t:>8.3}s  warp     {from:>3} → {to:<3} {delta:+.0}px  {author}");
                }
                Notice::Rejected => println!("{t:>8.3}s  rejected (scroll in flight)"),
            }
        }
        now += HEADLESS_FRAME;
    }

    println!(
        "{} cards, {} warps in {secs}s, active card {}",
        carousel.surface().item_count(),
        carousel.warp_count(),
        carousel
            .active_item()
            .map_or_else(|| "none".to_string(), |i| i.to_string()),
    );
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());
    let track = state.carousel.surface();
    let active_review = state.carousel.active_item().map(|i| track.source_index(i));

    let block = Block::bordered()
        .title(" Customer reviews ")
        .title_style(Theme::title_style())
        .title_bottom(dots(active_review, state.reviews.len()).centered())
        .border_style(Theme::border_style());

    let widget = CarouselWidget::new(
        track,
        &state.reviews,
        &state.magnifier,
        state.config.display.px_per_cell,
    )
    .block(block);
    frame.render_widget(widget, layout.carousel_area);

    let status_text = match &state.status_message {
        Some(msg) => format!(" {msg}"),
        None => status_line(state),
    };
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);
}

fn status_line(state: &AppState) -> String {
    let carousel = &state.carousel;
    let position = match carousel.active_item() {
        Some(i) => format!(
            "review {}/{} · copy {}",
            carousel.surface().source_index(i) + 1,
            carousel.segment_len(),
            carousel.segment_of(i).map_or(0, |s| s + 1),
        ),
        None => "no reviews".to_string(),
    };
    let snap = if carousel.surface().snap_enabled() { "" } else { " (snap off)" };
    format!(
        " {}{snap} │ {position} │ warps {} │ auto {} │ ←/→ step · a auto · q quit",
        carousel.mode().label(),
        carousel.warp_count(),
        if carousel.auto_advance_enabled() { "on" } else { "off" },
    )
}

// ───────────────────────────────────────── TUI ───────────────

async fn run_tui(reviews: Vec<Review>, config: AppConfig) -> Result<()> {
    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, reviews, config).await;

    // ── teardown ──────────────────────────────────────────────
    // Always runs, even if the loop failed.
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    reviews: Vec<Review>,
    config: AppConfig,
) -> Result<()> {
    let size = terminal.size()?;
    let mut state = AppState::new(reviews, config, Rect::new(0, 0, size.width, size.height));

    let mut events = spawn_event_reader(Duration::from_millis(100));
    let mut frames = tokio::time::interval(state.config.display.frame_interval());
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        terminal.draw(|frame| draw(frame, &state))?;

        tokio::select! {
            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(w, h) => handler::handle_resize(&mut state, w, h),
                }
            }

            _ = frames.tick() => handler::on_frame(&mut state),
        }

        if state.should_quit {
            break;
        }
    }

    tracing::info!(warps = state.carousel.warp_count(), "session ended");
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if cli.no_auto {
        config.carousel.auto_advance = false;
    }

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let reviews = match &cli.reviews {
        Some(path) => reviews::load(path)
            .with_context(|| format!("failed to load reviews from {}", path.display()))?,
        None => reviews::samples(),
    };
    tracing::info!(count = reviews.len(), "reviews loaded");

    if let Some(secs) = cli.headless {
        run_headless(&reviews, &config, secs);
        return Ok(());
    }

    run_tui(reviews, config).await
}
