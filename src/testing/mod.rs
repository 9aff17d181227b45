//! Scenario test runner
//!
//! Tests are registered into a [`TestSuite`] as ordered scenarios, then
//! executed by a [`Runner`] against a UI automation [`Device`]. Test bodies
//! use the assertion helpers and the visibility waiter, all of which return
//! a [`TestOutcome`](crate::common::TestOutcome).

pub mod assert;
mod context;
mod device;
mod logger;
mod runner;
mod suite;
pub mod wait;

pub use assert::{assert_equal, assert_strict_equal, assert_true, Value};
pub use context::ExecutionContext;
pub use device::{Application, Device, Element, Target, Window};
pub use logger::{ConsoleLogger, Logger};
pub use runner::{screenshot_name, RunSummary, Runner, ScenarioReport, SetUpFn, TearDownFn};
pub use suite::{Scenario, Test, TestFn, TestSuite};
pub use wait::wait_for;
