pub mod camera;
pub use camera::*;

pub mod controller;
pub use controller::*;

pub mod orbit;
pub use orbit::*;

pub mod input_manager;
pub use input_manager::*;
