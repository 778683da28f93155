pub mod scatter;
pub use scatter::*;

pub mod size;
pub use size::*;

pub mod pulse;
pub use pulse::*;

pub mod field;
pub use field::*;
