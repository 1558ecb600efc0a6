mod config;
mod load;

pub use crate::config::*;
pub use load::{get, init, reload_from, ConfigError, ConfigResult, ConfigType};
