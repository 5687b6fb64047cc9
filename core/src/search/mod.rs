//! Standalone search utilities over board coordinates and board snapshots.
//!
//! Neither search mutates the board it is given: path finding only needs the grid size, and the
//! adversarial evaluator explores moves on cloned [`PlayEngine`](crate::PlayEngine) snapshots.

pub use minimax::*;
pub use path::*;

mod minimax;
mod path;
