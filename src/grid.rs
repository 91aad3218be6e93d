use std::fmt::Display;

use log::debug;
use serde::{Deserialize, Serialize};

/// The four moves available on the grid, in no particular order.
///
/// Traversal and neighbor queries use [`CANONICAL_ORDER`]; its exact sequence
/// decides tie-breaks everywhere, so it must not be reordered.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

/// Expansion order for neighbor queries and BFS.
pub const CANONICAL_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Down,
    Direction::Right,
];

/// Expansion order used by DFS so that, combined with stack semantics, the
/// up/left branches are explored deepest-first.
pub const REVERSE_ORDER: [Direction; 4] = [
    Direction::Right,
    Direction::Down,
    Direction::Left,
    Direction::Up,
];

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Index of a [`Wall`] in the grid's wall arena.
///
/// Interior walls are shared: the same id appears as the `Right` wall of one
/// cell and the `Left` wall of its east neighbor (same for `Down`/`Up`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WallId(usize);

/// A single edge between two adjacent cells, or between a cell and the
/// outside.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    orientation: Orientation,
    activated: bool,
    locked: bool,
}

impl Wall {
    fn new(orientation: Orientation, activated: bool, locked: bool) -> Self {
        Self {
            orientation,
            activated,
            locked,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// An activated wall blocks passage between the cells it separates.
    pub fn activated(&self) -> bool {
        self.activated
    }

    /// Boundary walls are locked and keep their activation forever.
    pub fn locked(&self) -> bool {
        self.locked
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CellKind {
    Default,
    Start,
    End,
    Path,
    Visited,
    PendingVisit,
}

impl Default for CellKind {
    fn default() -> Self {
        Self::Default
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    row: usize,
    col: usize,
    kind: CellKind,
    step: u32,
    // indexed by Direction discriminant: up, left, down, right
    walls: [WallId; 4],
}

impl Cell {
    pub fn point(&self) -> Point {
        Point {
            row: self.row,
            col: self.col,
        }
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    /// 1-based visit order of the last solve, 0 when unvisited.
    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn wall(&self, direction: Direction) -> WallId {
        self.walls[direction as usize]
    }

    /// Display-hint kinds never replace the `Start`/`End` roles; role kinds
    /// are always applied.
    pub(crate) fn mark(&mut self, kind: CellKind) {
        match kind {
            CellKind::Default | CellKind::Start | CellKind::End => self.kind = kind,
            _ => {
                if !matches!(self.kind, CellKind::Start | CellKind::End) {
                    self.kind = kind;
                }
            }
        }
    }

    pub(crate) fn set_step(&mut self, step: u32) {
        self.step = step;
        if step > 0 {
            self.mark(CellKind::Visited);
        }
    }
}

/// Per-cell wall activation flags used to build a [`Grid`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCell {
    pub left: bool,
    pub up: bool,
    pub right: bool,
    pub down: bool,
}

/// Plain construction data for a grid: wall flags per cell plus optional
/// start/end coordinates. Produced by the text decoder or [`RawGrid::blank`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawGrid {
    pub cells: Vec<Vec<RawCell>>,
    pub start: Option<Point>,
    pub end: Option<Point>,
}

impl RawGrid {
    /// An open grid with a solid perimeter and no interior walls.
    pub fn blank(rows: usize, cols: usize) -> Self {
        let mut cells = Vec::with_capacity(rows);
        for row in 0..rows {
            let mut line = Vec::with_capacity(cols);
            for col in 0..cols {
                line.push(RawCell {
                    left: col == 0,
                    up: row == 0,
                    right: col == cols - 1,
                    down: row == rows - 1,
                });
            }
            cells.push(line);
        }
        Self {
            cells,
            start: None,
            end: None,
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map(|row| row.len()).unwrap_or(0)
    }
}

impl Default for RawGrid {
    fn default() -> Self {
        Self::blank(8, 8)
    }
}

/// The maze: a rectangular cell matrix plus the arena of walls the cells
/// refer into.
///
/// The whole grid is replaced on every load or new-maze operation; it is
/// never resized in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Cell>>,
    walls: Vec<Wall>,
    start: Option<Point>,
    end: Option<Point>,
}

impl Grid {
    /// Builds the cell matrix left-to-right, top-to-bottom.
    ///
    /// A cell's `Left` wall is its west neighbor's `Right` wall and its `Up`
    /// wall is its north neighbor's `Down` wall, so interior edges exist
    /// exactly once in the arena. Only the first row/column allocate their
    /// own (locked) outer walls; `Right`/`Down` walls are always fresh,
    /// locked iff they lie on the outer edge.
    pub fn build(raw: &RawGrid) -> Self {
        let rows = raw.rows();
        let cols = raw.cols();
        let mut walls: Vec<Wall> = Vec::with_capacity(2 * rows * cols + rows + cols);
        let mut cells: Vec<Vec<Cell>> = Vec::with_capacity(rows);

        fn alloc(arena: &mut Vec<Wall>, wall: Wall) -> WallId {
            arena.push(wall);
            WallId(arena.len() - 1)
        }

        for row in 0..rows {
            let mut line: Vec<Cell> = Vec::with_capacity(cols);
            for col in 0..cols {
                let flags = raw.cells[row][col];

                let left = if col == 0 {
                    alloc(&mut walls, Wall::new(Orientation::Vertical, flags.left, true))
                } else {
                    line[col - 1].wall(Direction::Right)
                };
                let up = if row == 0 {
                    alloc(
                        &mut walls,
                        Wall::new(Orientation::Horizontal, flags.up, true),
                    )
                } else {
                    cells[row - 1][col].wall(Direction::Down)
                };
                let right = alloc(
                    &mut walls,
                    Wall::new(Orientation::Vertical, flags.right, col == cols - 1),
                );
                let down = alloc(
                    &mut walls,
                    Wall::new(Orientation::Horizontal, flags.down, row == rows - 1),
                );

                line.push(Cell {
                    row,
                    col,
                    kind: CellKind::Default,
                    step: 0,
                    walls: [up, left, down, right],
                });
            }
            cells.push(line);
        }

        let mut grid = Self {
            rows,
            cols,
            cells,
            walls,
            start: None,
            end: None,
        };
        // endpoints outside the grid (e.g. from a stale file) are dropped
        if let Some(start) = raw.start {
            if start.row < rows && start.col < cols {
                grid.set_start(Some(start));
            }
        }
        if let Some(end) = raw.end {
            if end.row < rows && end.col < cols {
                grid.set_end(Some(end));
            }
        }

        debug!(
            "built {}x{} grid with {} walls, start={:?} end={:?}",
            rows,
            cols,
            grid.walls.len(),
            grid.start,
            grid.end
        );

        grid
    }

    /// An open `rows` x `cols` maze with no endpoints set.
    pub fn blank(rows: usize, cols: usize) -> Self {
        Self::build(&RawGrid::blank(rows, cols))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn end(&self) -> Option<Point> {
        self.end
    }

    pub fn cell(&self, point: Point) -> &Cell {
        &self.cells[point.row][point.col]
    }

    pub(crate) fn cell_mut(&mut self, point: Point) -> &mut Cell {
        &mut self.cells[point.row][point.col]
    }

    /// Lookup with both axes clamped independently into range, so
    /// out-of-range coordinates resolve to the nearest edge or corner cell.
    /// Never fails.
    pub fn cell_clamped(&self, row: isize, col: isize) -> &Cell {
        let row = row.clamp(0, self.rows as isize - 1) as usize;
        let col = col.clamp(0, self.cols as isize - 1) as usize;
        &self.cells[row][col]
    }

    pub fn wall(&self, id: WallId) -> &Wall {
        &self.walls[id.0]
    }

    /// Flips a wall's activation. Locked (boundary) walls are left untouched.
    pub fn toggle_wall(&mut self, id: WallId) {
        let wall = &mut self.walls[id.0];
        if !wall.locked {
            wall.activated = !wall.activated;
        }
    }

    fn offset(&self, point: Point, direction: Direction) -> Option<Point> {
        let Point { row, col } = point;
        match direction {
            Direction::Up => (row > 0).then(|| Point { row: row - 1, col }),
            Direction::Left => (col > 0).then(|| Point { row, col: col - 1 }),
            Direction::Down => (row + 1 < self.rows).then(|| Point { row: row + 1, col }),
            Direction::Right => (col + 1 < self.cols).then(|| Point { row, col: col + 1 }),
        }
    }

    /// The cells reachable from `point` in one step: adjacent, inside the
    /// grid, and not blocked by an activated wall.
    ///
    /// Results come back in [`CANONICAL_ORDER`] (or [`REVERSE_ORDER`] when
    /// `reverse` is set); traversal tie-breaks depend on it.
    pub fn neighbors(&self, point: Point, reverse: bool) -> Vec<Point> {
        let order = if reverse {
            &REVERSE_ORDER
        } else {
            &CANONICAL_ORDER
        };

        let mut points = Vec::with_capacity(4);
        for &direction in order {
            // the boundary walls are always activated, but the edge check
            // keeps out-of-range candidates out even if they were not
            if let Some(next) = self.offset(point, direction) {
                if !self.wall(self.cell(point).wall(direction)).activated() {
                    points.push(next);
                }
            }
        }
        points
    }

    /// Clears all visit state: steps to zero, kinds back to `Default` except
    /// the `Start`/`End` roles.
    pub fn reset(&mut self) {
        for line in &mut self.cells {
            for cell in line {
                cell.step = 0;
                if !matches!(cell.kind, CellKind::Start | CellKind::End) {
                    cell.kind = CellKind::Default;
                }
            }
        }
    }

    /// Editor click on a cell: a `Default` cell becomes the start if none is
    /// set, else the end if none is set; clicking the start clears it (and
    /// re-assigns the cell as end when no end exists); clicking the end
    /// clears it.
    pub fn toggle_role(&mut self, point: Point) {
        match self.cell(point).kind() {
            CellKind::Default => {
                if self.start.is_none() {
                    self.set_start(Some(point));
                } else if self.end.is_none() {
                    self.set_end(Some(point));
                }
            }
            CellKind::Start => {
                self.start = None;
                self.cell_mut(point).mark(CellKind::Default);
                if self.end.is_none() {
                    self.set_end(Some(point));
                }
            }
            CellKind::End => {
                self.end = None;
                self.cell_mut(point).mark(CellKind::Default);
            }
            _ => {}
        }
    }

    /// Assigns the start cell, demoting any previous holder. There is at most
    /// one start cell at any time.
    pub fn set_start(&mut self, point: Option<Point>) {
        if let Some(previous) = self.start.take() {
            self.cell_mut(previous).mark(CellKind::Default);
        }
        if let Some(point) = point {
            // a cell cannot be both endpoints at once
            if self.end == Some(point) {
                self.end = None;
            }
            self.cell_mut(point).mark(CellKind::Start);
        }
        self.start = point;
    }

    /// Assigns the end cell, demoting any previous holder. There is at most
    /// one end cell at any time.
    pub fn set_end(&mut self, point: Option<Point>) {
        if let Some(previous) = self.end.take() {
            self.cell_mut(previous).mark(CellKind::Default);
        }
        if let Some(point) = point {
            if self.start == Some(point) {
                self.start = None;
            }
            self.cell_mut(point).mark(CellKind::End);
        }
        self.end = point;
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::text::encode(self))
    }
}
