//! Support predicates.
//!
//! An engine *family* pairs a desktop and a mobile browser bucket. The
//! target family is the engine whose use counters are maintained; the
//! reference families are the competition.

use super::data::{SupportBlock, SupportStatement, VersionValue, has_text};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineFamily {
    pub desktop: String,
    pub mobile: String,
}

impl EngineFamily {
    pub fn new(desktop: impl Into<String>, mobile: impl Into<String>) -> Self {
        Self {
            desktop: desktop.into(),
            mobile: mobile.into(),
        }
    }

    /// Stable on both desktop and mobile
    pub fn supported_everywhere(&self, support: &SupportBlock) -> bool {
        has_stable_support(support.get(&self.desktop))
            && has_stable_support(support.get(&self.mobile))
    }

    /// Stable on desktop or mobile
    pub fn supported_anywhere(&self, support: &SupportBlock) -> bool {
        has_stable_support(support.get(&self.desktop))
            || has_stable_support(support.get(&self.mobile))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineSet {
    pub target: EngineFamily,
    pub references: Vec<EngineFamily>,
}

impl Default for EngineSet {
    fn default() -> Self {
        Self {
            target: EngineFamily::new("firefox", "firefox_android"),
            references: vec![
                EngineFamily::new("chrome", "chrome_android"),
                EngineFamily::new("safari", "safari_ios"),
            ],
        }
    }
}

/// Where a feature stands relative to the target engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Stable in the target engine on desktop and mobile
    SupportedByTarget,
    /// Missing in the target engine but shipped by a reference family
    MissingOnlyInTarget,
    /// No reference engine ships it stably either
    MissingEverywhere,
    /// Some reference bucket ships it, but no whole family does
    Partial,
}

/// Whether a browser bucket ships the feature in a stable release, enabled
/// by default and under its standard name.
pub fn has_stable_support(statement: Option<&SupportStatement>) -> bool {
    let Some(current) = statement.and_then(SupportStatement::current) else {
        return false;
    };
    let released = match &current.version_added {
        Some(VersionValue::Version(version)) => !version.is_empty() && version != "preview",
        Some(VersionValue::Flag(flag)) => *flag,
        None => false,
    };
    released
        && !current.version_removed.as_ref().is_some_and(|v| v.is_set())
        && current.flags.is_none()
        && !has_text(&current.prefix)
        && !has_text(&current.alternative_name)
}

impl EngineSet {
    pub fn supported_everywhere_in_target(&self, support: &SupportBlock) -> bool {
        self.target.supported_everywhere(support)
    }

    /// The target lacks full support while a reference family has it
    pub fn lacks_only_target_engine_support(&self, support: &SupportBlock) -> bool {
        !self.supported_everywhere_in_target(support)
            && self
                .references
                .iter()
                .any(|family| family.supported_everywhere(support))
    }

    /// No reference bucket has stable support
    pub fn lacks_all_other_engine_support(&self, support: &SupportBlock) -> bool {
        !self
            .references
            .iter()
            .any(|family| family.supported_anywhere(support))
    }

    pub fn supported_by_target_engine_everywhere(&self, support: &SupportBlock) -> bool {
        self.supported_everywhere_in_target(support)
    }

    pub fn classify(&self, support: &SupportBlock) -> Classification {
        if self.supported_everywhere_in_target(support) {
            Classification::SupportedByTarget
        } else if self.lacks_only_target_engine_support(support) {
            Classification::MissingOnlyInTarget
        } else if self.lacks_all_other_engine_support(support) {
            Classification::MissingEverywhere
        } else {
            Classification::Partial
        }
    }
}
