//! Scenario execution engine
//!
//! Runs scenarios one at a time: set up, every test in order, tear down.
//! Within a scenario the first failing test stops the rest. Across scenarios
//! failures are isolated; a failed scenario is reported and the next one
//! still runs. Only [`UsageError`]s ever reach the caller.

use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use crate::common::config::Config;
use crate::common::{TestFailure, TestOutcome, UsageError};

use super::context::ExecutionContext;
use super::device::Device;
use super::logger::Logger;
use super::suite::{Test, TestFn, TestSuite};

/// Builds the execution context before each scenario
pub type SetUpFn = Box<dyn Fn(&dyn Device) -> Result<ExecutionContext, TestFailure>>;

/// Cleans up after each scenario, whatever its outcome
pub type TearDownFn = Box<dyn Fn(&mut ExecutionContext) -> TestOutcome>;

/// Result of one scenario run
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    pub name: String,
    pub passed: bool,
    pub tests_run: usize,
    pub tests_total: usize,
    /// Test that stopped the scenario, if a test did
    pub failed_test: Option<String>,
    /// Message of the failure that was logged
    pub error: Option<String>,
}

/// Reports for every scenario of a `run_all`, in registration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub scenarios: Vec<ScenarioReport>,
}

impl RunSummary {
    pub fn all_passed(&self) -> bool {
        self.scenarios.iter().all(|s| s.passed)
    }

    pub fn passed(&self) -> impl Iterator<Item = &ScenarioReport> {
        self.scenarios.iter().filter(|s| s.passed)
    }

    pub fn failed(&self) -> impl Iterator<Item = &ScenarioReport> {
        self.scenarios.iter().filter(|s| !s.passed)
    }
}

/// Runs the scenarios of a [`TestSuite`] against a device
pub struct Runner {
    device: Rc<dyn Device>,
    logger: Rc<dyn Logger>,
    config: Config,
    set_up: SetUpFn,
    tear_down: TearDownFn,
}

impl Runner {
    /// A runner with default configuration and the default lifecycle hooks
    ///
    /// The default set up resolves target, front-most app and main window
    /// from `device`; the default tear down does nothing.
    pub fn new(device: Rc<dyn Device>, logger: Rc<dyn Logger>) -> Self {
        Self {
            device,
            logger,
            config: Config::default(),
            set_up: Box::new(|device| Ok(ExecutionContext::from_device(device))),
            tear_down: Box::new(|_| Ok(())),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Replace the set up hook
    pub fn set_up<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&dyn Device) -> Result<ExecutionContext, TestFailure> + 'static,
    {
        self.set_up = Box::new(f);
        self
    }

    /// Replace the tear down hook
    pub fn tear_down<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut ExecutionContext) -> TestOutcome + 'static,
    {
        self.tear_down = Box::new(f);
        self
    }

    /// Run every scenario in registration order
    pub fn run_all(&self, suite: &mut TestSuite) -> RunSummary {
        let scenarios: Vec<ScenarioReport> =
            (0..suite.len()).map(|index| self.run_index(suite, index)).collect();
        let summary = RunSummary { scenarios };

        tracing::info!(
            passed = summary.passed().count(),
            failed = summary.failed().count(),
            "run finished"
        );
        summary
    }

    /// Run only the most recently begun scenario
    pub fn run_current(&self, suite: &mut TestSuite) -> Result<ScenarioReport, UsageError> {
        let index = suite.len().checked_sub(1).ok_or(UsageError::NoScenarioToRun)?;
        Ok(self.run_index(suite, index))
    }

    /// Run the scenario at `index`
    pub fn run_scenario(&self, suite: &mut TestSuite, index: usize) -> Result<ScenarioReport, UsageError> {
        if index >= suite.len() {
            return Err(UsageError::ScenarioOutOfRange {
                index,
                len: suite.len(),
            });
        }
        Ok(self.run_index(suite, index))
    }

    fn run_index(&self, suite: &mut TestSuite, index: usize) -> ScenarioReport {
        suite.scenarios_mut()[index].passed_tests.clear();

        let scenario = &suite.scenarios()[index];
        let name = scenario.name().to_string();
        let plan: Vec<(Test, Option<TestFn>)> = scenario
            .tests()
            .iter()
            .map(|test| (test.clone(), suite.resolve(test)))
            .collect();

        let (report, passed) = self.execute(&name, plan);
        suite.scenarios_mut()[index].passed_tests = passed;
        report
    }

    fn execute(&self, name: &str, plan: Vec<(Test, Option<TestFn>)>) -> (ScenarioReport, Vec<Test>) {
        let _span = tracing::info_span!("scenario", name).entered();
        let mut report = ScenarioReport {
            name: name.to_string(),
            passed: false,
            tests_run: 0,
            tests_total: plan.len(),
            failed_test: None,
            error: None,
        };
        let mut passed = Vec::with_capacity(plan.len());

        self.logger.log_start(name);

        let mut ctx = match catch(|| (self.set_up)(self.device.as_ref())) {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                let message = format!("Error in set up of scenario '{}'. {}", name, e);
                tracing::warn!(error = %e, "set up failed");
                self.logger.log_fail(&message);
                report.error = Some(message);
                None
            }
        };

        if let Some(ctx) = ctx.as_mut() {
            ctx.wait = self.config.wait;
            match self.run_tests(name, plan, ctx, &mut passed) {
                Ok(()) => {
                    report.passed = true;
                    self.logger.log_pass(name);
                }
                Err((test, message)) => {
                    report.failed_test = Some(test);
                    report.error = Some(message);
                }
            }
            report.tests_run = passed.len() + usize::from(report.failed_test.is_some());
        }

        let mut ctx = ctx.unwrap_or_default();
        if let Err(e) = catch(|| (self.tear_down)(&mut ctx)) {
            let message = format!("Error in tear down of scenario '{}'. {}", name, e);
            tracing::warn!(error = %e, "tear down failed");
            self.logger.log_fail(&message);
            report.passed = false;
            report.error.get_or_insert(message);
        }

        (report, passed)
    }

    /// Run tests in order, stopping at the first failure
    ///
    /// On failure returns the failing test's name and the logged message.
    fn run_tests(
        &self,
        scenario: &str,
        plan: Vec<(Test, Option<TestFn>)>,
        ctx: &mut ExecutionContext,
        passed: &mut Vec<Test>,
    ) -> Result<(), (String, String)> {
        for (test, function) in plan {
            if self.config.verbose {
                self.logger.log_message(test.name());
            }

            let outcome = match function {
                Some(f) => catch(|| f(ctx)),
                None => Err(TestFailure::Undefined(test.name().to_string())),
            };

            match outcome {
                Ok(()) => {
                    tracing::debug!(test = test.name(), "test passed");
                    if self.config.screenshot.captures_on_pass() {
                        self.capture(scenario, test.name());
                    }
                    passed.push(test);
                }
                Err(e) => {
                    let message = format!(
                        "Error in test '{}' of scenario '{}'. {}",
                        test.name(),
                        scenario,
                        e.message()
                    );
                    tracing::debug!(test = test.name(), error = %e, "test failed");
                    self.logger.log_fail(&message);

                    if self.config.screenshot.captures_on_failure() {
                        self.capture(scenario, test.name());
                    }
                    if self.config.verbose {
                        self.device.local_target().log_element_tree();
                    }
                    return Err((test.name().to_string(), message));
                }
            }
        }
        Ok(())
    }

    fn capture(&self, scenario: &str, test: &str) {
        let name = screenshot_name(scenario, test);
        tracing::debug!(screenshot = %name, "capturing screen");
        self.device.local_target().capture_screen_with_name(&name);
    }
}

/// Name a screenshot is stored under: `"{scenario} ({test})"`
pub fn screenshot_name(scenario: &str, test: &str) -> String {
    format!("{} ({})", scenario, test)
}

/// Turn a panic inside user code into a test failure
fn catch<T>(f: impl FnOnce() -> Result<T, TestFailure>) -> Result<T, TestFailure> {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let detail = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(TestFailure::msg(format!("panicked: {}", detail)))
    })
}
