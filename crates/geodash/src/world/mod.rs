mod globe;
pub use globe::*;

mod config;
pub use config::*;
mod config_loader;
pub use config_loader::{default_config, load_config, LoadConfigError};

mod anchors;
pub use anchors::*;

mod input;
pub use input::*;
