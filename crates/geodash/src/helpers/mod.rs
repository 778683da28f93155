pub mod coord_utils;
pub use coord_utils::*;

pub mod errors;
pub use errors::*;

pub mod logging;
pub use logging::*;

pub mod frame_clock;
pub use frame_clock::*;
