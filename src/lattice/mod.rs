//! Lattice module - spin grid and initial configurations.

mod grid;
mod init;

pub use grid::{Lattice, SPIN_DOWN, SPIN_UP};
pub use init::{initialize, InitStrategy};
