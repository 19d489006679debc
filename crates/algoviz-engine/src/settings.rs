//! Settings parser for .algoviz/config.toml

use std::path::Path;

use serde::{Deserialize, Serialize};

use algoviz_core::prelude::*;

const CONFIG_FILENAME: &str = "config.toml";
const ALGOVIZ_DIR: &str = ".algoviz";

/// Playback settings, from the `[playback]` table of `.algoviz/config.toml`.
///
/// Unknown keys are ignored; out-of-range values are clamped back to the
/// defaults with a warning, so a bad config file degrades rather than
/// breaks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial playback speed in steps per second
    pub default_speed: f64,

    /// Lower bound for `SetSpeed`
    pub min_speed: f64,

    /// Upper bound for `SetSpeed`
    pub max_speed: f64,

    /// Floor for the tick interval in milliseconds, so extreme speeds
    /// cannot busy-loop the ticker
    pub min_tick_ms: u64,

    /// Maximum number of values accepted in a custom input. Bounds trace
    /// length, which grows quadratically for some generators.
    pub max_input_len: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_speed: 1.0,
            min_speed: 0.25,
            max_speed: 8.0,
            min_tick_ms: 10,
            max_input_len: 64,
        }
    }
}

/// On-disk shape of the config file.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    playback: Settings,
}

impl Settings {
    /// Load settings from `<project_root>/.algoviz/config.toml`.
    ///
    /// A missing file yields the defaults silently; an unreadable or
    /// unparsable file yields the defaults with a warning.
    pub fn load(project_root: &Path) -> Settings {
        let path = project_root.join(ALGOVIZ_DIR).join(CONFIG_FILENAME);
        if !path.exists() {
            return Settings::default();
        }

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!("could not read {}: {err}; using defaults", path.display());
                return Settings::default();
            }
        };

        match toml::from_str::<ConfigFile>(&contents) {
            Ok(config) => config.playback.validated(),
            Err(err) => {
                warn!("could not parse {}: {err}; using defaults", path.display());
                Settings::default()
            }
        }
    }

    /// Clamp out-of-range values back to the defaults.
    fn validated(mut self) -> Settings {
        let defaults = Settings::default();

        if !(self.min_speed.is_finite() && self.min_speed > 0.0) {
            warn!("invalid min_speed {}; using default", self.min_speed);
            self.min_speed = defaults.min_speed;
        }
        if !(self.max_speed.is_finite() && self.max_speed >= self.min_speed) {
            warn!("invalid max_speed {}; using default", self.max_speed);
            self.max_speed = defaults.max_speed.max(self.min_speed);
        }
        if !(self.default_speed.is_finite() && self.default_speed > 0.0) {
            warn!("invalid default_speed {}; using default", self.default_speed);
            self.default_speed = defaults.default_speed;
        }
        self.default_speed = self.default_speed.clamp(self.min_speed, self.max_speed);
        if self.max_input_len == 0 {
            warn!("max_input_len of 0 would reject every input; using default");
            self.max_input_len = defaults.max_input_len;
        }
        self
    }

    /// Clamp a requested speed to the configured range.
    pub fn clamp_speed(&self, speed: f64) -> f64 {
        if !speed.is_finite() {
            return self.default_speed;
        }
        speed.clamp(self.min_speed, self.max_speed)
    }
}
