//! sr_report: localized report model and offline renderers.
//!
//! Flow: `Report` → `Localization` (overrides + translation table) →
//! `build_model` → `render_json` / `render_html`.
//! Nothing here performs I/O; loading and writing live in sr_io.

pub mod i18n;
pub mod markdown;
pub mod structure;

#[cfg(feature = "render_json")]
pub mod render_json;
#[cfg(feature = "render_html")]
pub mod render_html;

use std::fmt;

use sr_core::{LanguageSelection, Report};

pub use i18n::{
    I18nError, Locale, LocaleOverrides, Replacements, TranslationResolver, TranslationTable, UiLabel,
};
pub use markdown::{escape_html, MarkdownRenderer, PlainParagraphs};
pub use structure::{build_model, BuildOptions, ClusterBlock, ReportModel, STATS_TEMPLATE};

#[cfg(feature = "render_json")]
pub use render_json::render_json;
#[cfg(feature = "render_html")]
pub use render_html::{render_html, PresentationMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    Json(String),
    Template(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Json(m) => write!(f, "json render: {m}"),
            ReportError::Template(m) => write!(f, "html template: {m}"),
        }
    }
}

impl std::error::Error for ReportError {}

/// Owns the two translation sources so resolvers can borrow them.
#[derive(Clone, Debug, Default)]
pub struct Localization {
    pub overrides: LocaleOverrides,
    pub table: TranslationTable,
}

impl Localization {
    pub fn new(report: &Report, language: LanguageSelection, overrides: LocaleOverrides) -> Self {
        Self { overrides, table: TranslationTable::from_report(&report.translations, language) }
    }

    pub fn resolver(&self) -> TranslationResolver<'_> {
        TranslationResolver::new(&self.overrides, &self.table)
    }
}
