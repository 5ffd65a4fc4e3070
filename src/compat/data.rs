//! Serde model of browser-compat-data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CompatError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid compat data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Support statements keyed by browser identifier (`firefox`, `chrome_android`, ...)
pub type SupportBlock = BTreeMap<String, SupportStatement>;

/// The parts of browser-compat-data this crate reads
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CompatData {
    #[serde(default)]
    pub api: BTreeMap<String, Feature>,
    #[serde(default)]
    pub javascript: JavaScript,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct JavaScript {
    #[serde(default)]
    pub builtins: BTreeMap<String, Feature>,
}

/// A feature node: its own compat record plus named sub-features
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Feature {
    #[serde(rename = "__compat", default, skip_serializing_if = "Option::is_none")]
    pub compat: Option<Compat>,
    #[serde(flatten)]
    pub subfeatures: BTreeMap<String, Feature>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Compat {
    #[serde(default)]
    pub support: SupportBlock,
}

/// One record, or a history of records newest first.
///
/// Anything else is kept as `Malformed` so a single bad record never fails
/// the whole load; it reads as "not supported".
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SupportStatement {
    List(Vec<SimpleSupportStatement>),
    Single(SimpleSupportStatement),
    Malformed(serde_json::Value),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SimpleSupportStatement {
    #[serde(default)]
    pub version_added: Option<VersionValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_removed: Option<VersionValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_name: Option<String>,
}

/// `"120"`, `"preview"`, `true`, `false`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum VersionValue {
    Flag(bool),
    Version(String),
}

impl VersionValue {
    /// Whether the value names a release, or says support exists
    pub fn is_set(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Version(version) => !version.is_empty(),
        }
    }
}

impl SupportStatement {
    /// The record describing current support: the first one without a
    /// vendor prefix
    pub fn current(&self) -> Option<&SimpleSupportStatement> {
        match self {
            Self::Single(statement) => Some(statement),
            Self::List(list) => list.iter().find(|s| !has_text(&s.prefix)),
            Self::Malformed(_) => None,
        }
    }
}

pub(crate) fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

impl Feature {
    pub fn support(&self) -> Option<&SupportBlock> {
        self.compat.as_ref().map(|c| &c.support)
    }

    pub fn member(&self, name: &str) -> Option<&Feature> {
        self.subfeatures.get(name)
    }
}

impl CompatData {
    /// Parse browser-compat-data JSON.
    ///
    /// Accepts the full data set (`{"api": ..., "javascript": ...}`) or a
    /// bare api map whose top-level keys are interface names.
    pub fn from_json(text: &str) -> Result<Self, CompatError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let is_full = value
            .as_object()
            .is_some_and(|o| o.contains_key("api") || o.contains_key("javascript"));
        if is_full {
            Ok(serde_json::from_value(value)?)
        } else {
            Ok(Self {
                api: serde_json::from_value(value)?,
                javascript: JavaScript::default(),
            })
        }
    }

    pub fn load(path: &Path) -> Result<Self, CompatError> {
        let text = std::fs::read_to_string(path).map_err(|source| CompatError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::from_json(&text)?;
        debug!(
            path = %path.display(),
            interfaces = data.api.len(),
            builtins = data.javascript.builtins.len(),
            "loaded compat data"
        );
        Ok(data)
    }

    pub fn interface(&self, name: &str) -> Option<&Feature> {
        self.api.get(name)
    }

    pub fn builtin(&self, name: &str) -> Option<&Feature> {
        self.javascript.builtins.get(name)
    }
}
