//! Progress reporting sink

use colored::Colorize;

/// Receives scenario progress from the runner
pub trait Logger {
    /// A scenario is about to run
    fn log_start(&self, name: &str);

    /// A scenario finished with every test passing
    fn log_pass(&self, name: &str);

    /// A test (or a lifecycle hook) failed
    fn log_fail(&self, message: &str);

    /// Free-form progress output
    fn log_message(&self, message: &str);
}

/// Colored terminal output, mirrored to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log_start(&self, name: &str) {
        tracing::debug!(scenario = name, "scenario started");
        println!("\n{} {}", "Running Scenario:".blue().bold(), name.white().bold());
    }

    fn log_pass(&self, name: &str) {
        tracing::debug!(scenario = name, "scenario passed");
        println!("  {} {}", "✓".green().bold(), "Scenario Passed".green().bold());
    }

    fn log_fail(&self, message: &str) {
        tracing::debug!(%message, "scenario failed");
        println!("  {} {}", "✗".red().bold(), message.red());
    }

    fn log_message(&self, message: &str) {
        tracing::trace!(%message);
        println!("  {}", message.dimmed());
    }
}
