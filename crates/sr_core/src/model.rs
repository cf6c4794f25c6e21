//! crates/sr_core/src/model.rs
//! Report data as produced by the data-generation step. Read-only to the core.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::errors::CoreError;
use crate::ids::ClusterId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Immutable report descriptor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReportConfig {
    pub name: String,
    pub question: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub intro: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub translation: Option<TranslationSettings>,
}

/// Target languages, in the column order used by the translation table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TranslationSettings {
    #[cfg_attr(feature = "serde", serde(default))]
    pub languages: Vec<String>,
}

/// A single weighted statement. Owned by exactly one `Cluster`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Argument {
    #[cfg_attr(feature = "serde", serde(default))]
    pub arg_id: String,
    pub argument: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub comment_id: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub x: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub y: f64,
    /// Weight (agreement/probability score); typically in [0, 1].
    pub p: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cluster {
    #[cfg_attr(feature = "serde", serde(rename = "cluster"))]
    pub label: String,
    pub cluster_id: ClusterId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub takeaways: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub arguments: Vec<Argument>,
}

impl Cluster {
    pub fn argument_count(&self) -> usize { self.arguments.len() }
}

/// One translation-table value: a single localized string, or one string per
/// configured language (column `i` translates into `languages[i]`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum TranslationEntry {
    Single(String),
    PerLanguage(Vec<String>),
}

impl TranslationEntry {
    /// Value for a language column. `Single` answers every column.
    pub fn column(&self, index: usize) -> Option<&str> {
        match self {
            TranslationEntry::Single(s) => Some(s.as_str()),
            TranslationEntry::PerLanguage(v) => v.get(index).map(|s| s.as_str()),
        }
    }
}

/// Which translation column to display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LanguageSelection {
    /// Source text as written; the translation table is not consulted.
    #[default]
    Original,
    Column(usize),
}

impl LanguageSelection {
    /// Resolve a language name against the configured list (case-insensitive).
    pub fn by_name(settings: Option<&TranslationSettings>, name: &str) -> Result<Self, CoreError> {
        let languages = settings.map(|s| s.languages.as_slice()).unwrap_or(&[]);
        languages
            .iter()
            .position(|l| l.eq_ignore_ascii_case(name.trim()))
            .map(LanguageSelection::Column)
            .ok_or(CoreError::InvalidLanguageColumn)
    }
}

/// Full input report.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Report {
    pub config: ReportConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub overview: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub clusters: Vec<Cluster>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub translations: BTreeMap<String, TranslationEntry>,
}

impl Report {
    /// Cluster ids in input order.
    pub fn cluster_ids(&self) -> Vec<ClusterId> {
        self.clusters.iter().map(|c| c.cluster_id.clone()).collect()
    }

    pub fn cluster(&self, id: &ClusterId) -> Option<&Cluster> {
        self.clusters.iter().find(|c| &c.cluster_id == id)
    }
}
