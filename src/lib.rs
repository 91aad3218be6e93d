//! Maze model and solver core.
//!
//! The crate owns the grid/wall data structure, its plain-text file format,
//! and the DFS/BFS traversal with step-number path reconstruction. Rendering,
//! input handling and animation pacing belong to the embedding application:
//! it edits the model through [`Grid`], drives a [`Solver`] step by step (or
//! via [`solve`]/[`compare`] in one go) and maps [`CellKind`] tags to
//! whatever visuals it likes.

pub use error::*;
pub use find::*;
pub use grid::*;
pub use text::*;

mod error;
mod find;
mod grid;
mod text;
