//! Configuration loaded from `.pwshelter.toml`.

pub mod settings;

pub use settings::Settings;
