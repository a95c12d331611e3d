//! Configuration management for the life simulator

pub mod settings;

pub use settings::{
    CliOverrides, DisplayConfig, FileSeedArg, NamedSeedArg, OutputConfig, OutputFormat, SeedConfig,
    Settings, SimulationConfig,
};
