//! Mother - behavior-driven scenario runner for scripted UI tests
//!
//! Declare named tests, group them into ordered scenarios and run them
//! against a UI automation backend. Each scenario stops at its first failing
//! test; a failing scenario never stops the ones after it.

pub mod cli;
pub mod commands;
pub mod common;
pub mod testing;

// Re-export commonly used types for suites
pub use common::config::{Config, ScreenshotPolicy, WaitConfig};
pub use common::{Error, Result, TestFailure, TestOutcome, UsageError};
pub use testing::{
    assert_equal, assert_strict_equal, assert_true, wait_for, ConsoleLogger, Device,
    ExecutionContext, Runner, TestSuite, Value,
};
