pub mod app;

pub use app::{load_config, ReplayApp, DEFAULT_CONFIG_PATH};
