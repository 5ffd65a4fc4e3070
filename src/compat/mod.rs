//! Browser compatibility data and the support predicates built on it.
//!
//! [`data`] is the serde model of MDN browser-compat-data; [`classify`]
//! answers "which engines ship this feature" questions over it. Predicates
//! are total: missing or malformed records count as "not supported".

pub mod classify;
pub mod data;

pub use classify::{Classification, EngineFamily, EngineSet, has_stable_support};
pub use data::{
    Compat, CompatData, CompatError, Feature, SimpleSupportStatement, SupportBlock,
    SupportStatement, VersionValue,
};

#[cfg(test)]
mod tests;
