use thiserror::Error;

/// Faults a simulation run can report. None of them is retried: construction
/// errors are fatal before the first tick and a failed tick never publishes
/// its particle state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Invalid configuration, invalid initial particle state or a thread pool
    /// that could not be built.
    #[error("initialization failed: {0}")]
    Initialization(String),

    /// A compute phase did not run to completion.
    #[error("dispatch of phase `{phase}` failed: {message}")]
    Dispatch { phase: &'static str, message: String },

    /// No usable event time or a degenerate contact geometry.
    #[error("numeric degeneracy: {0}")]
    NumericDegeneracy(String),
}

impl SimulationError {
    pub(crate) fn init(msg: impl Into<String>) -> Self {
        SimulationError::Initialization(msg.into())
    }
}
