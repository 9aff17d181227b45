//! Error types for the scenario runner
//!
//! Two families of errors exist. [`UsageError`] means the suite itself is
//! malformed and is returned straight to the caller. [`TestFailure`] is the
//! expected, recoverable outcome of a failing test; the runner catches it at
//! the scenario boundary and never lets it escape.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// What every test function, assertion and the visibility waiter return
pub type TestOutcome = std::result::Result<(), TestFailure>;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Usage(#[from] UsageError),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("Failed to write file '{path}': {error}")]
    FileWrite { path: String, error: String },
}

/// Programmer mistakes in how a suite is assembled or driven
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("No scenario to attach test case to. Call `begin_scenario` first")]
    NoScenarioToAttach,

    #[error("No scenario to run. Call `begin_scenario` first")]
    NoScenarioToRun,

    #[error("No scenario at index {index}; the suite has {len}")]
    ScenarioOutOfRange { index: usize, len: usize },

    #[error("Tests attached by name but never defined: {}", .names.join(", "))]
    UnresolvedTests { names: Vec<String> },
}

/// A failed test, carrying the message reported for it
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TestFailure {
    #[error("{0}")]
    Assertion(String),

    #[error("{0}")]
    Timeout(String),

    /// The test was attached by name and no definition ever showed up
    #[error("Test '{0}' is not defined")]
    Undefined(String),

    #[error("{0}")]
    Failed(String),
}

impl TestFailure {
    /// Create a generic failure from any message
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// The human-readable message reported for this failure
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<String> for TestFailure {
    fn from(message: String) -> Self {
        Self::Failed(message)
    }
}

impl From<&str> for TestFailure {
    fn from(message: &str) -> Self {
        Self::Failed(message.to_string())
    }
}

impl From<io::Error> for TestFailure {
    fn from(e: io::Error) -> Self {
        Self::Failed(e.to_string())
    }
}
