// main.rs - Game 4 Life: Conway's Game of Life in an egui window
// The board itself lives in the `conway` crate; this is the host loop and input handling.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use conway::{Board, GameConfig};
use eframe::egui;
use egui::Color32;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod ui;

pub const TOP_MARGIN: f32 = 50.0;
pub const BOTTOM_MARGIN: f32 = 50.0;
pub const SIDE_MARGIN: f32 = 20.0;

#[derive(Parser, Debug)]
#[command(name = "game4life", version, about = "Conway's Game of Life")]
struct Args {
    /// Properties file with panel.hcells, panel.vcells, panel.cell and delay.millis
    #[arg(short, long, default_value = "config.properties")]
    config: PathBuf,

    /// Override delay.millis
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=60_000))]
    delay_millis: Option<u64>,
}

fn main() -> Result<()> {
    init_tracing();
    info!("Starting the game of life...");

    let args = Args::parse();
    let config = load_config(&args)?;
    let app = GameOfLife::new(&config)?;

    let (width, height) = config.pixel_size();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([
            width as f32 + SIDE_MARGIN * 2.0,
            height as f32 + TOP_MARGIN + BOTTOM_MARGIN + 40.0,
        ]),
        ..Default::default()
    };

    eframe::run_native(
        "Game 4 Life",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|e| anyhow::anyhow!("window error: {e}"))
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,conway=debug".into()))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

fn load_config(args: &Args) -> Result<GameConfig> {
    info!("Loading configuration...");
    let mut config = if args.config.exists() {
        GameConfig::load(&args.config)
            .with_context(|| format!("failed to load configuration from {}", args.config.display()))?
    } else {
        warn!("Configuration file {} not found, using defaults", args.config.display());
        GameConfig::default()
    };

    if let Some(delay) = args.delay_millis {
        config.delay_millis = delay;
    }
    Ok(config)
}

/// Window state around a single board
pub struct GameOfLife {
    pub board: Board,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub live_color: Color32,
    pub dead_color: Color32,

    // Screen rect of the painted board, from the last frame
    pub board_rect: egui::Rect,

    // Cell toggled by the current press or drag
    drag_cell: Option<(usize, usize)>,
}

impl GameOfLife {
    pub fn new(config: &GameConfig) -> Result<Self> {
        let board = Board::from_config(config).context("invalid board configuration")?;
        Ok(Self {
            board,
            last_update: Instant::now(),
            update_interval: Duration::from_millis(config.delay_millis),
            live_color: Color32::BLACK,
            dead_color: Color32::WHITE,
            board_rect: egui::Rect::NOTHING,
            drag_cell: None,
        })
    }

    /// Advance one generation if playing and the delay has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.board.is_playing() || now.saturating_duration_since(self.last_update) < self.update_interval {
            return false;
        }
        self.update_generation();
        self.last_update = now;
        true
    }

    /// Time left before the next generation is due.
    pub fn time_to_next_tick(&self, now: Instant) -> Duration {
        self.update_interval.saturating_sub(now.saturating_duration_since(self.last_update))
    }
}

/// What the UI layer can ask of the game
pub trait GameOfLifeInterface {
    fn update_generation(&mut self);
    fn clear_grid(&mut self);
    fn toggle_playing(&mut self);
    fn toggle_cell_at(&mut self, x: f32, y: f32) -> Option<bool>;
    fn drag_over(&mut self, x: f32, y: f32) -> Option<bool>;
    fn release_at(&mut self, x: f32, y: f32) -> Option<bool>;
    fn end_drag(&mut self);
    fn apply_random_pattern(&mut self);
}

impl GameOfLifeInterface for GameOfLife {
    fn update_generation(&mut self) {
        self.board.step();
    }

    fn clear_grid(&mut self) {
        self.board.clear();
        self.drag_cell = None;
    }

    fn toggle_playing(&mut self) {
        self.board.toggle_playing();
        if self.board.is_playing() {
            self.last_update = Instant::now();
        }
    }

    fn toggle_cell_at(&mut self, x: f32, y: f32) -> Option<bool> {
        self.board.toggle_at(x, y)
    }

    /// Toggle the cell under a held pointer once per cell entered. The press itself
    /// counts as entering the first cell.
    fn drag_over(&mut self, x: f32, y: f32) -> Option<bool> {
        let cell = self.board.locate(x, y)?;
        if self.drag_cell == Some(cell) {
            return None;
        }
        self.drag_cell = Some(cell);
        self.board.toggle_at(x, y)
    }

    /// A completed click. Toggles only if the press did not already toggle a cell.
    fn release_at(&mut self, x: f32, y: f32) -> Option<bool> {
        if self.drag_cell.take().is_some() {
            return None;
        }
        self.board.toggle_at(x, y)
    }

    fn end_drag(&mut self) {
        self.drag_cell = None;
    }

    fn apply_random_pattern(&mut self) {
        self.board.stop();
        let seed = self.board.cycles();
        self.board.randomize(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> GameOfLife {
        let config = GameConfig { hcells: 5, vcells: 5, cell: 10, delay_millis: 100 };
        GameOfLife::new(&config).unwrap()
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["game4life"]).unwrap();
        assert_eq!(args.config, PathBuf::from("config.properties"));
        assert!(args.delay_millis.is_none());
    }

    #[test]
    fn test_args_reject_zero_delay() {
        assert!(Args::try_parse_from(["game4life", "--delay-millis", "0"]).is_err());
    }

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let args = Args::try_parse_from([
            "game4life", "--config", "/no/such/config.properties", "--delay-millis", "40",
        ])
        .unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.hcells, GameConfig::default().hcells);
        assert_eq!(config.delay_millis, 40);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig { hcells: 0, ..GameConfig::default() };
        assert!(GameOfLife::new(&config).is_err());
    }

    #[test]
    fn test_tick_only_while_playing() {
        let mut game = game();
        let later = game.last_update + Duration::from_millis(150);
        assert!(!game.tick(later));
        assert_eq!(game.board.cycles(), 0);

        game.toggle_playing();
        let start = game.last_update;
        assert!(!game.tick(start + Duration::from_millis(50)));
        assert!(game.tick(start + Duration::from_millis(100)));
        assert_eq!(game.board.cycles(), 1);
        assert_eq!(game.time_to_next_tick(start + Duration::from_millis(120)), Duration::from_millis(80));
    }

    #[test]
    fn test_clear_stops_and_cleans() {
        let mut game = game();
        game.toggle_cell_at(25.0, 25.0);
        game.toggle_playing();
        game.update_generation();

        game.clear_grid();
        assert!(!game.board.is_playing());
        assert_eq!(game.board.alive_cells(), 0);
        assert_eq!(game.board.cycles(), 0);
    }

    #[test]
    fn test_drag_toggles_each_cell_once() {
        let mut game = game();
        assert_eq!(game.drag_over(1.0, 1.0), Some(true));
        assert_eq!(game.drag_over(5.0, 8.0), None);
        assert_eq!(game.drag_over(12.0, 1.0), Some(true));
        assert_eq!(game.drag_over(-3.0, 1.0), None);
        game.end_drag();
        assert_eq!(game.drag_over(12.0, 1.0), Some(false));

        assert_eq!(game.board.alive_positions(), vec![(0, 0)]);
    }

    #[test]
    fn test_release_after_press_keeps_toggle() {
        let mut game = game();
        assert_eq!(game.drag_over(15.0, 15.0), Some(true));
        assert_eq!(game.release_at(15.0, 15.0), None);
        assert_eq!(game.board.alive_positions(), vec![(1, 1)]);

        // A click the drag path never saw still toggles
        assert_eq!(game.release_at(15.0, 15.0), Some(false));
        assert!(game.board.alive_positions().is_empty());
    }

    #[test]
    fn test_random_pattern_seeded_from_cycle() {
        let mut a = game();
        let mut b = game();
        a.update_generation();
        b.update_generation();
        a.apply_random_pattern();
        b.apply_random_pattern();
        assert_eq!(a.board.cells(), b.board.cells());
    }

    #[test]
    fn test_random_pattern_pauses() {
        let mut game = game();
        game.toggle_playing();
        game.apply_random_pattern();

        assert!(!game.board.is_playing());
        assert_eq!(game.board.cycles(), 0);
        assert_eq!(game.board.alive_cells() + game.board.dead_cells(), 25);
    }
}
