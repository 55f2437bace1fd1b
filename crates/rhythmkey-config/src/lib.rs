// Tool configuration (bucket width, output mode, logging, capture terminators)

pub mod config;

pub use config::{Config, DEFAULT_LOG_FILTER};
