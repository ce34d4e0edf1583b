//! Command implementations for pileview.

pub mod simulate;
pub mod view;

pub use simulate::{SimulateCommand, SimulateConfig, SimulateStats};
pub use view::ViewCommand;
