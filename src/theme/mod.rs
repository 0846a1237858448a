//! Theme for Valentine Card Studio.

pub mod colors;
mod styles;

pub use styles::GLOBAL_STYLES;
