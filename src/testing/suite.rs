//! Scenario and test registry
//!
//! A [`TestSuite`] holds the named test definitions and the ordered list of
//! scenarios. Scenarios are append-only and the last one begun is the
//! "current" scenario that tests get attached to.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::common::{TestOutcome, UsageError};

use super::context::ExecutionContext;

/// A test body
pub type TestFn = Rc<dyn Fn(&mut ExecutionContext) -> TestOutcome>;

/// A named test attached to a scenario
#[derive(Clone)]
pub struct Test {
    name: String,
    function: Option<TestFn>,
}

impl Test {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a function was bound when the test was attached
    ///
    /// Unbound tests are looked up by name when their scenario runs.
    pub fn is_bound(&self) -> bool {
        self.function.is_some()
    }

    pub(crate) fn function(&self) -> Option<&TestFn> {
        self.function.as_ref()
    }
}

impl fmt::Debug for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Test")
            .field("name", &self.name)
            .field("bound", &self.is_bound())
            .finish()
    }
}

/// An ordered, named group of tests modelling one end-to-end flow
#[derive(Debug, Clone)]
pub struct Scenario {
    name: String,
    tests: Vec<Test>,
    pub(crate) passed_tests: Vec<Test>,
}

impl Scenario {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: Vec::new(),
            passed_tests: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    /// Tests that passed in the most recent run, always a prefix of `tests`
    pub fn passed_tests(&self) -> &[Test] {
        &self.passed_tests
    }

    pub fn test_names(&self) -> impl Iterator<Item = &str> {
        self.tests.iter().map(Test::name)
    }

    pub fn passed_test_names(&self) -> impl Iterator<Item = &str> {
        self.passed_tests.iter().map(Test::name)
    }
}

/// Test definitions plus the scenarios that use them
#[derive(Default)]
pub struct TestSuite {
    definitions: HashMap<String, TestFn>,
    scenarios: Vec<Scenario>,
}

impl TestSuite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new scenario and make it current
    ///
    /// Scenario names need not be unique.
    pub fn begin_scenario(&mut self, name: impl Into<String>) -> &mut Self {
        let scenario = Scenario::new(name);
        tracing::debug!(scenario = %scenario.name, "scenario registered");
        self.scenarios.push(scenario);
        self
    }

    /// Define `name` as `f` and attach it to the current scenario
    ///
    /// The definition is global to the suite: later [`reuse_test`] calls in
    /// any scenario pick up the latest definition. Copies already attached
    /// keep the function they were attached with.
    ///
    /// [`reuse_test`]: TestSuite::reuse_test
    pub fn attach_test<F>(&mut self, name: impl Into<String>, f: F) -> Result<&mut Self, UsageError>
    where
        F: Fn(&mut ExecutionContext) -> TestOutcome + 'static,
    {
        let name = name.into();
        let function: TestFn = Rc::new(f);
        let scenario = self.current_mut()?;
        scenario.tests.push(Test {
            name: name.clone(),
            function: Some(function.clone()),
        });
        self.definitions.insert(name, function);
        Ok(self)
    }

    /// Attach a previously defined test to the current scenario
    ///
    /// If `name` has no definition yet, the test is attached unbound and
    /// resolved by name when the scenario runs.
    pub fn reuse_test(&mut self, name: impl Into<String>) -> Result<&mut Self, UsageError> {
        let name = name.into();
        let function = self.definitions.get(&name).cloned();
        if function.is_none() {
            tracing::debug!(test = %name, "attaching test before its definition");
        }
        self.current_mut()?.tests.push(Test { name, function });
        Ok(self)
    }

    /// Add or replace a definition without attaching it anywhere
    pub fn define<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&mut ExecutionContext) -> TestOutcome + 'static,
    {
        self.definitions.insert(name.into(), Rc::new(f));
        self
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn current_scenario(&self) -> Option<&Scenario> {
        self.scenarios.last()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Fail if any attached test could not be resolved right now
    pub fn validate(&self) -> Result<(), UsageError> {
        let mut names: Vec<String> = self
            .scenarios
            .iter()
            .flat_map(|s| s.tests.iter())
            .filter(|t| t.function.is_none() && !self.definitions.contains_key(&t.name))
            .map(|t| t.name.clone())
            .collect();

        if names.is_empty() {
            return Ok(());
        }
        names.sort();
        names.dedup();
        Err(UsageError::UnresolvedTests { names })
    }

    /// The function a test runs: its bound copy, else the current definition
    pub(crate) fn resolve(&self, test: &Test) -> Option<TestFn> {
        test.function()
            .cloned()
            .or_else(|| self.definitions.get(&test.name).cloned())
    }

    pub(crate) fn scenarios_mut(&mut self) -> &mut [Scenario] {
        &mut self.scenarios
    }

    fn current_mut(&mut self) -> Result<&mut Scenario, UsageError> {
        self.scenarios.last_mut().ok_or(UsageError::NoScenarioToAttach)
    }
}

impl fmt::Debug for TestSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut defined: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        defined.sort_unstable();
        f.debug_struct("TestSuite")
            .field("definitions", &defined)
            .field("scenarios", &self.scenarios)
            .finish()
    }
}
