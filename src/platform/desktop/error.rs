use std::path::PathBuf;

use thiserror::Error;

use crate::SimulationError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to access `{path}`: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("failed to parse `{path}`: {source}")]
    Yaml { path: PathBuf, source: serde_yaml::Error },

    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        source: serde_yaml::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid value `{value}` for --{name}: {message}")]
    Argument {
        name: &'static str,
        value: String,
        message: String,
    },

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> AppError {
        let path = path.into();
        move |source| AppError::Io { path, source }
    }
}
