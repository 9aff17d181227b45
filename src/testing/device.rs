//! UI automation surface the runner drives
//!
//! These traits are implemented by whatever automation backend hosts the
//! suite. The runner only ever talks to the device through them, which keeps
//! the engine testable against in-memory fakes.

use std::rc::Rc;

/// Entry point into the automation backend
pub trait Device {
    /// The target (simulator or physical device) tests run against
    fn local_target(&self) -> Rc<dyn Target>;
}

/// A running automation target
pub trait Target {
    /// Block the calling flow for the given number of seconds
    fn delay(&self, seconds: f64);

    /// Capture the screen and store it under `name`
    fn capture_screen_with_name(&self, name: &str);

    /// The application currently in the foreground
    fn front_most_app(&self) -> Rc<dyn Application>;

    /// Dump the element hierarchy for diagnostics
    fn log_element_tree(&self);
}

/// An application running on the target
pub trait Application {
    fn main_window(&self) -> Rc<dyn Window>;
}

/// Anything whose on-screen visibility can be queried
pub trait Element {
    fn is_visible(&self) -> bool;
}

/// A top-level window; itself an element
pub trait Window: Element {}
