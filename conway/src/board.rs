// board.rs - The board and the generation step

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tracing::{debug, info, trace};

use crate::cell::Cell;
use crate::config::{pixel_extent, GameConfig};
use crate::error::{Error, Result};

/// A fixed-size Game of Life board.
///
/// Cells are stored row-major and addressed by `(col, row)`. The board keeps two
/// buffers: `step` reads the current generation and writes the next one into the
/// scratch buffer, then swaps them, so no cell ever sees a neighbour from the
/// generation being computed.
///
/// `alive_cells + dead_cells == width * height` holds after every public call.
#[derive(Debug, Clone)]
pub struct Board {
    width       : usize,
    height      : usize,
    cell_size   : u32,
    cells       : Vec<Cell>,
    next_cells  : Vec<Cell>,
    playing     : bool,
    alive_cells : usize,
    dead_cells  : usize,
    cycles      : u64,
}

impl Board {
    /// Build and initialize a board. Zero-sized boards or cells are rejected, and so
    /// are boards whose pixel extent does not fit in a `u32`.
    pub fn new(width: usize, height: usize, cell_size: u32) -> Result<Self> {
        if width == 0 {
            return Err(Error::InvalidDimension { name: "width" });
        }
        if height == 0 {
            return Err(Error::InvalidDimension { name: "height" });
        }
        if cell_size == 0 {
            return Err(Error::InvalidDimension { name: "cell size" });
        }
        if pixel_extent(width, cell_size).is_none() {
            return Err(Error::TooLarge { name: "width" });
        }
        if pixel_extent(height, cell_size).is_none() {
            return Err(Error::TooLarge { name: "height" });
        }

        let mut board = Self {
            width,
            height,
            cell_size,
            cells: Vec::new(),
            next_cells: Vec::new(),
            playing: false,
            alive_cells: 0,
            dead_cells: 0,
            cycles: 0,
        };
        board.initialize();
        Ok(board)
    }

    pub fn from_config(config: &GameConfig) -> Result<Self> {
        Self::new(config.hcells, config.vcells, config.cell)
    }

    /// Populate the grid with dead cells laid out on `cell_size` pixel steps and
    /// reset every counter and the playing flag.
    pub fn initialize(&mut self) {
        info!(
            "Init the board: width={}; height={}; cell_size={}",
            self.width, self.height, self.cell_size
        );

        let size = self.cell_size;
        self.cells = (0..self.height)
            .flat_map(|row| (0..self.width).map(move |col| (col, row)))
            .map(|(col, row)| Cell::new(col as u32 * size, row as u32 * size, size, size, false))
            .collect();
        self.next_cells = self.cells.clone();

        self.playing = false;
        self.alive_cells = 0;
        self.dead_cells = self.width * self.height;
        self.cycles = 0;
    }

    /// Advance one generation.
    pub fn step(&mut self) {
        let mut births = 0;
        let mut deaths = 0;

        for row in 0..self.height {
            for col in 0..self.width {
                let index = self.index(col, row);
                let current = self.cells[index];
                let neighbours = self.count_neighbours(col, row);

                let alive = match (current.is_alive(), neighbours) {
                    (true, 2) | (true, 3) => true,   // Survival
                    (false, 3)            => true,   // Birth
                    _                     => false,  // Death or stays dead
                };

                if current.is_alive() && !alive {
                    trace!(col, row, neighbours, "Die!");
                    self.count_dead_cell();
                    deaths += 1;
                } else if !current.is_alive() && alive {
                    trace!(col, row, neighbours, "Come to life!");
                    self.count_alive_cell();
                    births += 1;
                }

                self.next_cells[index] = current.next_state(alive);
            }
        }

        std::mem::swap(&mut self.cells, &mut self.next_cells);
        self.cycles += 1;

        debug!(
            cycle = self.cycles,
            births,
            deaths,
            alive = self.alive_cells,
            "Generation computed"
        );
    }

    /// Kill every cell in place and zero the counters. The playing flag is untouched.
    pub fn clean_board(&mut self) {
        info!("Clean board.");
        for cell in &mut self.cells {
            cell.set_alive(false);
        }

        self.alive_cells = 0;
        self.dead_cells = self.width * self.height;
        self.cycles = 0;
    }

    /// Clear request from the player: always pauses first.
    pub fn clear(&mut self) {
        self.stop();
        self.clean_board();
    }

    /// Cell under a pixel position relative to the board origin.
    pub fn get_cell(&self, x: f32, y: f32) -> Option<&Cell> {
        self.locate(x, y).and_then(|(col, row)| self.cell(col, row))
    }

    /// Grid coordinate under a pixel position, `None` outside the grid.
    pub fn locate(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let size = self.cell_size as f32;
        let col = (x / size).floor();
        let row = (y / size).floor();

        // Also rejects NaN
        if !(col >= 0.0 && row >= 0.0) {
            return None;
        }

        let (col, row) = (col as usize, row as usize);
        (col < self.width && row < self.height).then_some((col, row))
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        self.in_bounds(col, row).then(|| &self.cells[self.index(col, row)])
    }

    pub fn is_alive(&self, col: usize, row: usize) -> bool {
        self.cell(col, row).is_some_and(Cell::is_alive)
    }

    /// Set one cell's state, keeping the counters in step.
    /// Returns the previous state, or `None` if the coordinate is off the board.
    pub fn set_alive(&mut self, col: usize, row: usize, alive: bool) -> Option<bool> {
        if !self.in_bounds(col, row) {
            return None;
        }

        let index = self.index(col, row);
        let was_alive = self.cells[index].is_alive();
        if was_alive != alive {
            self.cells[index].set_alive(alive);
            if alive {
                self.count_alive_cell();
            } else {
                self.count_dead_cell();
            }
        }
        Some(was_alive)
    }

    /// Flip one cell. Returns its new state.
    pub fn toggle(&mut self, col: usize, row: usize) -> Option<bool> {
        let alive = !self.cell(col, row)?.is_alive();
        self.set_alive(col, row, alive)?;
        Some(alive)
    }

    /// Flip the cell under a pixel position. Returns its new state.
    pub fn toggle_at(&mut self, x: f32, y: f32) -> Option<bool> {
        let (col, row) = self.locate(x, y)?;
        let alive = self.toggle(col, row)?;
        debug!("Set {} on {}, {}", if alive { "alive" } else { "dead" }, x, y);
        Some(alive)
    }

    /// Fill the board with a deterministic soup (about a third alive) derived from
    /// `seed`. Resets the cycle counter.
    pub fn randomize(&mut self, seed: u64) {
        let mut hasher = DefaultHasher::new();
        seed.hash(&mut hasher);
        let mut state = hasher.finish();

        for row in 0..self.height {
            for col in 0..self.width {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                self.set_alive(col, row, (state >> 33) % 3 == 0);
            }
        }
        self.cycles = 0;
        info!("Randomized board: {} alive cells", self.alive_cells);
    }

    /// One more alive cell, one fewer dead. Saturates when no dead cell is left,
    /// so the two tallies always add up to the board size.
    pub fn count_alive_cell(&mut self) {
        if self.dead_cells > 0 {
            self.dead_cells -= 1;
            self.alive_cells += 1;
        }
    }

    /// One more dead cell, one fewer alive. Saturates at zero alive cells.
    pub fn count_dead_cell(&mut self) {
        if self.alive_cells > 0 {
            self.alive_cells -= 1;
            self.dead_cells += 1;
        }
    }

    /// Alive cells among the up to eight neighbours of `(col, row)`. The board does
    /// not wrap: neighbours past an edge do not exist.
    pub fn alive_neighbours(&self, col: usize, row: usize) -> Option<u8> {
        self.in_bounds(col, row).then(|| self.count_neighbours(col, row))
    }

    fn count_neighbours(&self, col: usize, row: usize) -> u8 {
        let mut count = 0;
        for r in row.saturating_sub(1)..=(row + 1).min(self.height - 1) {
            for c in col.saturating_sub(1)..=(col + 1).min(self.width - 1) {
                if (c, r) != (col, row) && self.cells[self.index(c, r)].is_alive() {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn start(&mut self) {
        if !self.playing {
            info!("Start!");
            self.playing = true;
        }
    }

    pub fn stop(&mut self) {
        if self.playing {
            info!("Stop!");
            self.playing = false;
        }
    }

    pub fn toggle_playing(&mut self) {
        if self.playing { self.stop() } else { self.start() }
    }

    pub fn set_playing(&mut self, playing: bool) {
        if playing { self.start() } else { self.stop() }
    }

    pub fn is_playing(&self) -> bool { self.playing }
    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn cell_size(&self) -> u32 { self.cell_size }
    pub fn alive_cells(&self) -> usize { self.alive_cells }
    pub fn dead_cells(&self) -> usize { self.dead_cells }
    pub fn cycles(&self) -> u64 { self.cycles }

    /// Read-only view of the current generation, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Every cell with its `(col, row)` coordinate.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i % self.width, i / self.width), cell))
    }

    /// Coordinates of the living cells, row by row.
    pub fn alive_positions(&self) -> Vec<(usize, usize)> {
        self.iter()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(pos, _)| pos)
            .collect()
    }

    fn in_bounds(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height
    }

    fn index(&self, col: usize, row: usize) -> usize {
        row * self.width + col
    }
}
