// cell.rs - A single board position

/// One cell of the board: where it is drawn, how big it is, and whether it lives.
///
/// Position and size are in pixels relative to the board origin. A cell carries no
/// behaviour of its own; the board decides when it lives or dies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    x      : u32,
    y      : u32,
    width  : u32,
    height : u32,
    alive  : bool,
}

impl Cell {
    pub fn new(x: u32, y: u32, width: u32, height: u32, alive: bool) -> Self {
        Self { x, y, width, height, alive }
    }

    /// Same position and size, new state.
    #[must_use]
    pub fn next_state(mut self, alive: bool) -> Self {
        self.alive = alive;
        self
    }

    pub fn x(&self) -> u32 { self.x }
    pub fn y(&self) -> u32 { self.y }
    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }
    pub fn size(&self) -> (u32, u32) { (self.width, self.height) }
    pub fn is_alive(&self) -> bool { self.alive }

    pub fn set_x(&mut self, x: u32) { self.x = x; }
    pub fn set_y(&mut self, y: u32) { self.y = y; }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn set_alive(&mut self, alive: bool) { self.alive = alive; }

    pub fn toggle(&mut self) { self.alive = !self.alive }
}
