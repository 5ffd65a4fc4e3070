//! Run configuration.
//!
//! Every field has a default matching the Gecko tree, so an empty (or
//! missing) `idl-counters.toml` gives the stock behavior.

use crate::base::constants::{
    CONFIG_FILE_NAME, GLOBAL_INTERFACE, INSTRUMENTED_PROPS, USE_COUNTER_DIRECTIVE,
};
use crate::compat::EngineSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Extended attribute holding the counted property names
    pub annotation: String,
    /// Interface whose annotation lists missing global constructors
    pub global_interface: String,
    /// Globals a candidate interface must be exposed on
    pub exposure_globals: Vec<String>,
    /// Compat entries whose name starts with one of these are never candidates
    pub skip_prefixes: Vec<String>,
    pub engines: EngineSet,
    /// Interfaces described by another interface's compat entry
    pub data_aliases: BTreeMap<String, String>,
    /// Values never removed, per interface
    pub exceptions: BTreeMap<String, Vec<String>>,
    /// First word of every use-counter line in the conf file
    pub conf_directive: String,
    /// Also instrument missing members of interfaces that carry the annotation
    pub instrument_members: bool,
    /// Compat sub-features that are not interface members
    pub ignored_subfeatures: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            annotation: INSTRUMENTED_PROPS.to_string(),
            global_interface: GLOBAL_INTERFACE.to_string(),
            exposure_globals: vec![GLOBAL_INTERFACE.to_string()],
            skip_prefixes: ["_", "EXT_", "KHR_", "OES_", "WEBGL_"]
                .into_iter()
                .map(String::from)
                .collect(),
            engines: EngineSet::default(),
            data_aliases: BTreeMap::from([("HTMLDocument".to_string(), "Document".to_string())]),
            exceptions: BTreeMap::from([(
                GLOBAL_INTERFACE.to_string(),
                [
                    "CanvasCaptureMediaStreamTrack",
                    "DeviceMotionEventAcceleration",
                    "DeviceMotionEventRotationRate",
                    "External",
                    "InputDeviceInfo",
                    "Touch",
                    "TouchEvent",
                    "TouchList",
                ]
                .into_iter()
                .map(String::from)
                .collect(),
            )]),
            conf_directive: USE_COUNTER_DIRECTIVE.to_string(),
            instrument_members: true,
            ignored_subfeatures: ["worker_support", "secure_context_required"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl SyncConfig {
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text, path)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// `explicit` if given, else `idl-counters.toml` in `corpus_dir` if it
    /// exists, else the defaults.
    pub fn discover(explicit: Option<&Path>, corpus_dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = corpus_dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn is_skipped(&self, name: &str) -> bool {
        self.skip_prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }

    /// The compat entry name describing `interface`
    pub fn data_name<'a>(&'a self, interface: &'a str) -> &'a str {
        self.data_aliases
            .get(interface)
            .map(String::as_str)
            .unwrap_or(interface)
    }

    pub fn exceptions_for(&self, interface: &str) -> rustc_hash::FxHashSet<&str> {
        self.exceptions
            .get(interface)
            .map(|values| values.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Sub-feature names that never denote a member
    pub fn is_ignored_subfeature(&self, name: &str) -> bool {
        name.ends_with("_event") || self.ignored_subfeatures.iter().any(|s| s == name)
    }
}
