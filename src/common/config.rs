//! Configuration file handling

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::paths::config_path;
use super::{Error, Result};

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Log each test name as it runs and dump the element tree on failure
    #[serde(default)]
    pub verbose: bool,

    /// When to capture a screenshot after a test
    #[serde(default)]
    pub screenshot: ScreenshotPolicy,

    /// Visibility polling settings
    #[serde(default)]
    pub wait: WaitConfig,
}

/// When the runner captures the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScreenshotPolicy {
    #[serde(alias = "NEVER", alias = "Never")]
    Never,
    /// Only for the test that failed
    #[default]
    #[serde(alias = "ERROR", alias = "Error")]
    Error,
    /// After every test that ran, passed or failed
    #[serde(alias = "ALWAYS", alias = "Always")]
    Always,
}

impl ScreenshotPolicy {
    pub fn captures_on_pass(self) -> bool {
        self == Self::Always
    }

    pub fn captures_on_failure(self) -> bool {
        matches!(self, Self::Always | Self::Error)
    }
}

impl fmt::Display for ScreenshotPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Never => "never",
            Self::Error => "error",
            Self::Always => "always",
        };
        f.write_str(s)
    }
}

impl FromStr for ScreenshotPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "never" => Ok(Self::Never),
            "error" => Ok(Self::Error),
            "always" => Ok(Self::Always),
            other => Err(Error::Config(format!(
                "Unknown screenshot policy '{}'. Supported: never, error, always",
                other
            ))),
        }
    }
}

/// Visibility polling settings in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaitConfig {
    /// Default timeout for `wait_for` when the caller gives none
    #[serde(default = "default_wait_timeout")]
    pub timeout_secs: f64,

    /// Delay between two visibility checks
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: f64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_wait_timeout(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

fn default_wait_timeout() -> f64 {
    5.0
}
fn default_poll_interval() -> f64 {
    0.1
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load and validate configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        let config: Self =
            toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the waiter cannot work with
    pub fn validate(&self) -> Result<()> {
        let wait = &self.wait;
        if !wait.poll_interval_secs.is_finite() || wait.poll_interval_secs <= 0.0 {
            return Err(Error::Config(format!(
                "wait.poll_interval_secs must be a positive number, got {}",
                wait.poll_interval_secs
            )));
        }
        if !wait.timeout_secs.is_finite() || wait.timeout_secs < 0.0 {
            return Err(Error::Config(format!(
                "wait.timeout_secs must be zero or a positive number, got {}",
                wait.timeout_secs
            )));
        }
        Ok(())
    }

    /// Render as TOML, the same format `load_from` reads
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.verbose);
        assert_eq!(config.screenshot, ScreenshotPolicy::Error);
        assert_eq!(config.wait.timeout_secs, 5.0);
        assert_eq!(config.wait.poll_interval_secs, 0.1);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("ALWAYS".parse::<ScreenshotPolicy>().unwrap(), ScreenshotPolicy::Always);
        assert_eq!(" never ".parse::<ScreenshotPolicy>().unwrap(), ScreenshotPolicy::Never);
        assert!("sometimes".parse::<ScreenshotPolicy>().is_err());
    }

    #[test]
    fn test_policy_capture_rules() {
        assert!(!ScreenshotPolicy::Never.captures_on_pass());
        assert!(!ScreenshotPolicy::Never.captures_on_failure());
        assert!(!ScreenshotPolicy::Error.captures_on_pass());
        assert!(ScreenshotPolicy::Error.captures_on_failure());
        assert!(ScreenshotPolicy::Always.captures_on_pass());
        assert!(ScreenshotPolicy::Always.captures_on_failure());
    }

    #[test]
    fn test_load_from_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "verbose = true\nscreenshot = \"ALWAYS\"\n\n[wait]\ntimeout_secs = 2.5").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert!(config.verbose);
        assert_eq!(config.screenshot, ScreenshotPolicy::Always);
        assert_eq!(config.wait.timeout_secs, 2.5);
        assert_eq!(config.wait.poll_interval_secs, 0.1);
    }

    #[test]
    fn test_load_rejects_bad_interval() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[wait]\npoll_interval_secs = 0.0").unwrap();

        assert!(matches!(Config::load_from(file.path()), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_rejects_unknown_policy() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "screenshot = \"sometimes\"").unwrap();

        assert!(matches!(Config::load_from(file.path()), Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            verbose: true,
            screenshot: ScreenshotPolicy::Never,
            wait: WaitConfig::default(),
        };
        let text = config.to_toml().unwrap();
        assert!(text.contains("screenshot = \"never\""));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
