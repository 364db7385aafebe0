#![forbid(unsafe_code)]

pub mod content;
pub mod model;
pub mod phase;
pub mod scoring;
pub mod time;
pub mod transition;

pub use phase::{Phase, derive_phase};
pub use time::Clock;
pub use transition::{Event, apply};
