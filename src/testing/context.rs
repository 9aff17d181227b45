//! Execution context threaded through set up, every test and tear down

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::common::config::WaitConfig;
use crate::common::{TestFailure, TestOutcome};

use super::device::{Application, Device, Element, Target, Window};
use super::wait;

/// Handles and shared state for one scenario run
///
/// Built by the set up hook, then handed mutably to every test of the
/// scenario in order and finally to the tear down hook.
#[derive(Default)]
pub struct ExecutionContext {
    target: Option<Rc<dyn Target>>,
    app: Option<Rc<dyn Application>>,
    main_window: Option<Rc<dyn Window>>,
    pub(crate) wait: WaitConfig,
    state: HashMap<String, Box<dyn Any>>,
}

impl ExecutionContext {
    /// An empty context, for set up hooks that resolve nothing from the device
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve target, front-most app and its main window from the device
    pub fn from_device(device: &dyn Device) -> Self {
        let target = device.local_target();
        let app = target.front_most_app();
        let main_window = app.main_window();
        Self {
            target: Some(target),
            app: Some(app),
            main_window: Some(main_window),
            ..Self::default()
        }
    }

    pub fn with_target(mut self, target: Rc<dyn Target>) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_app(mut self, app: Rc<dyn Application>) -> Self {
        self.app = Some(app);
        self
    }

    pub fn with_main_window(mut self, window: Rc<dyn Window>) -> Self {
        self.main_window = Some(window);
        self
    }

    pub fn target(&self) -> Result<&Rc<dyn Target>, TestFailure> {
        self.target.as_ref().ok_or_else(|| missing("target"))
    }

    pub fn app(&self) -> Result<&Rc<dyn Application>, TestFailure> {
        self.app.as_ref().ok_or_else(|| missing("app"))
    }

    pub fn main_window(&self) -> Result<&Rc<dyn Window>, TestFailure> {
        self.main_window.as_ref().ok_or_else(|| missing("main window"))
    }

    /// Wait for `element` on this context's target
    ///
    /// `None` uses the runner's configured default timeout.
    pub fn wait_for<E: Element + ?Sized>(&self, element: &E, timeout_secs: Option<f64>) -> TestOutcome {
        let target = self.target()?;
        wait::wait_for_with(
            &**target,
            element,
            timeout_secs.unwrap_or(self.wait.timeout_secs),
            self.wait.poll_interval_secs,
        )
    }

    /// Store a value for later tests of the same scenario run
    pub fn insert<T: Any>(&mut self, key: impl Into<String>, value: T) -> Option<Box<dyn Any>> {
        self.state.insert(key.into(), Box::new(value))
    }

    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.state.get(key).and_then(|v| v.downcast_ref())
    }

    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.state.get_mut(key).and_then(|v| v.downcast_mut())
    }

    pub fn remove(&mut self, key: &str) -> Option<Box<dyn Any>> {
        self.state.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.state.contains_key(key)
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.state.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("ExecutionContext")
            .field("target", &self.target.is_some())
            .field("app", &self.app.is_some())
            .field("main_window", &self.main_window.is_some())
            .field("wait", &self.wait)
            .field("state", &keys)
            .finish()
    }
}

fn missing(what: &str) -> TestFailure {
    TestFailure::msg(format!("No {} in execution context. Was it resolved during set up?", what))
}
