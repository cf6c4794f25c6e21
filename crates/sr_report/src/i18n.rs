//! crates/sr_report/src/i18n.rs
//!
//! Display-string resolution.
//!
//! Lookup order for `TranslationResolver::resolve`, first match wins:
//! 1. `LocaleOverrides` (static UI chrome, exact source-text match)
//! 2. `TranslationTable` (exact match), then `{token}` substitution from the
//!    bound `Replacements`
//! 3. the input text, unchanged
//!
//! Absent or empty input is returned as-is. The resolver holds no global
//! state; everything it reads is passed in.

use std::collections::BTreeMap;
use std::fmt;

use sr_core::{LanguageSelection, TranslationEntry};

// ------------------------- UI labels -------------------------

/// Every static UI string that a locale may override.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UiLabel {
    OpenFullScreenMap,
    Overview,
    Arguments,
    OfTotal,
    ClusterAnalysis,
    RepresentativeComments,
    Introduction,
    Clusters,
    Appendix,
    BackToReport,
    HideLabels,
    ShowLabels,
    ShowFilters,
    HideFilters,
    MinVotes,
    Consensus,
    Showing,
    ResetZoom,
    ClickAnywhereToClose,
    ClickDotForDetails,
    Agree,
    Disagree,
    Language,
    English,
    PercentClose,
    DataMap,
    ClusterDetails,
    ClusterDistribution,
    TouchMapUnavailable,
}

impl UiLabel {
    pub const ALL: [UiLabel; 29] = [
        UiLabel::OpenFullScreenMap,
        UiLabel::Overview,
        UiLabel::Arguments,
        UiLabel::OfTotal,
        UiLabel::ClusterAnalysis,
        UiLabel::RepresentativeComments,
        UiLabel::Introduction,
        UiLabel::Clusters,
        UiLabel::Appendix,
        UiLabel::BackToReport,
        UiLabel::HideLabels,
        UiLabel::ShowLabels,
        UiLabel::ShowFilters,
        UiLabel::HideFilters,
        UiLabel::MinVotes,
        UiLabel::Consensus,
        UiLabel::Showing,
        UiLabel::ResetZoom,
        UiLabel::ClickAnywhereToClose,
        UiLabel::ClickDotForDetails,
        UiLabel::Agree,
        UiLabel::Disagree,
        UiLabel::Language,
        UiLabel::English,
        UiLabel::PercentClose,
        UiLabel::DataMap,
        UiLabel::ClusterDetails,
        UiLabel::ClusterDistribution,
        UiLabel::TouchMapUnavailable,
    ];

    /// English source text; this is also the lookup key.
    pub const fn source(self) -> &'static str {
        match self {
            UiLabel::OpenFullScreenMap => "Open full-screen map",
            UiLabel::Overview => "Overview",
            UiLabel::Arguments => "arguments",
            UiLabel::OfTotal => "of total",
            UiLabel::ClusterAnalysis => "Cluster analysis",
            UiLabel::RepresentativeComments => "Representative comments",
            UiLabel::Introduction => "Introduction",
            UiLabel::Clusters => "Clusters",
            UiLabel::Appendix => "Appendix",
            UiLabel::BackToReport => "Back to report",
            UiLabel::HideLabels => "Hide labels",
            UiLabel::ShowLabels => "Show labels",
            UiLabel::ShowFilters => "Show filters",
            UiLabel::HideFilters => "Hide filters",
            UiLabel::MinVotes => "Min. votes",
            UiLabel::Consensus => "Consensus",
            UiLabel::Showing => "Showing",
            UiLabel::ResetZoom => "Reset zoom",
            UiLabel::ClickAnywhereToClose => "Click anywhere on the map to close this",
            UiLabel::ClickDotForDetails => "Click on the dot for details",
            UiLabel::Agree => "agree",
            UiLabel::Disagree => "disagree",
            UiLabel::Language => "Language",
            UiLabel::English => "English",
            UiLabel::PercentClose => "%)",
            UiLabel::DataMap => "Data map",
            UiLabel::ClusterDetails => "Cluster details",
            UiLabel::ClusterDistribution => "Map of this cluster",
            UiLabel::TouchMapUnavailable => {
                "Interactive maps are not yet available on touch devices. Please try from a desktop computer."
            }
        }
    }

    pub fn from_source(text: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|l| l.source() == text)
    }
}

// ------------------------- locales -------------------------

/// Built-in override presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Ja,
}

impl Locale {
    pub const fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ja => "ja",
        }
    }

    /// Case-insensitive, tolerant of region tags ("ja-JP", "en_US").
    pub fn parse(value: &str) -> Option<Self> {
        let lower = value.trim().to_ascii_lowercase();
        match lower.split(['-', '_']).next().unwrap_or("") {
            "en" => Some(Locale::En),
            "ja" => Some(Locale::Ja),
            _ => None,
        }
    }
}

const JA_LABELS: &[(UiLabel, &str)] = &[
    (UiLabel::OpenFullScreenMap, "フルスクリーンマップを開く"),
    (UiLabel::Overview, "概要"),
    (UiLabel::Arguments, "個の議論"),
    (UiLabel::OfTotal, "（全体の"),
    (UiLabel::ClusterAnalysis, "クラスター分析"),
    (UiLabel::RepresentativeComments, "代表的なコメント"),
    (UiLabel::Introduction, "はじめに"),
    (UiLabel::Clusters, "クラスター"),
    (UiLabel::Appendix, "付録"),
    (UiLabel::BackToReport, "レポートに戻る"),
    (UiLabel::HideLabels, "ラベルを隠す"),
    (UiLabel::ShowLabels, "ラベルを表示"),
    (UiLabel::ShowFilters, "フィルターを表示"),
    (UiLabel::HideFilters, "フィルターを隠す"),
    (UiLabel::MinVotes, "最小投票数"),
    (UiLabel::Consensus, "合意度"),
    (UiLabel::Showing, "表示中"),
    (UiLabel::ResetZoom, "ズームをリセット"),
    (UiLabel::ClickAnywhereToClose, "マップのどこかをクリックして閉じる"),
    (UiLabel::ClickDotForDetails, "詳細を見るには点をクリック"),
    (UiLabel::Agree, "賛成"),
    (UiLabel::Disagree, "反対"),
    (UiLabel::Language, "言語"),
    (UiLabel::English, "英語"),
    (UiLabel::PercentClose, "%）"),
    (UiLabel::DataMap, "データ可視化マップ"),
    (UiLabel::ClusterDetails, "クラスター別詳細分析"),
    (UiLabel::ClusterDistribution, "このクラスターの分布"),
    (
        UiLabel::TouchMapUnavailable,
        "インタラクティブマップはタッチデバイスではまだ利用できません。デスクトップコンピューターからお試しください。",
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    UnknownOverrideKey(String),
}

impl fmt::Display for I18nError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            I18nError::UnknownOverrideKey(k) => write!(f, "unknown override key: {k:?}"),
        }
    }
}

impl std::error::Error for I18nError {}

/// Highest-priority, build-time-fixed label replacements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocaleOverrides {
    entries: BTreeMap<UiLabel, String>,
}

impl LocaleOverrides {
    pub fn none() -> Self { Self::default() }

    pub fn japanese() -> Self {
        Self { entries: JA_LABELS.iter().map(|(l, s)| (*l, (*s).to_string())).collect() }
    }

    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self::none(),
            Locale::Ja => Self::japanese(),
        }
    }

    /// Build from a `source text → text` map (the on-disk override format).
    pub fn from_source_map(map: &BTreeMap<String, String>) -> Result<Self, I18nError> {
        let mut out = Self::none();
        for (k, v) in map {
            let label = UiLabel::from_source(k).ok_or_else(|| I18nError::UnknownOverrideKey(k.clone()))?;
            out.entries.insert(label, v.clone());
        }
        Ok(out)
    }

    pub fn with(mut self, label: UiLabel, text: impl Into<String>) -> Self {
        self.entries.insert(label, text.into());
        self
    }

    /// Entries of `other` replace ours.
    pub fn merged(mut self, other: LocaleOverrides) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn get(&self, label: UiLabel) -> Option<&str> {
        self.entries.get(&label).map(String::as_str)
    }

    /// Exact match on the English source text.
    pub fn lookup(&self, text: &str) -> Option<&str> {
        UiLabel::from_source(text).and_then(|l| self.get(l))
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

// ------------------------- translation table -------------------------

/// `source text → localized text` for one selected language.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranslationTable {
    entries: BTreeMap<String, String>,
}

impl TranslationTable {
    pub fn new() -> Self { Self::default() }

    /// Flatten the report's translation rows for one language column.
    /// `Original` yields an empty table; rows without that column are skipped.
    pub fn from_report(rows: &BTreeMap<String, TranslationEntry>, selection: LanguageSelection) -> Self {
        let LanguageSelection::Column(col) = selection else {
            return Self::new();
        };
        let entries = rows
            .iter()
            .filter_map(|(src, e)| e.column(col).map(|t| (src.clone(), t.to_string())))
            .collect();
        Self { entries }
    }

    pub fn insert(&mut self, source: impl Into<String>, translated: impl Into<String>) {
        self.entries.insert(source.into(), translated.into());
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries.get(source).map(String::as_str)
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

// ------------------------- placeholder values -------------------------

/// Ordered `{token} → value` bindings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Replacements {
    values: Vec<(String, String)>,
}

impl Replacements {
    pub fn new() -> Self { Self::default() }

    /// Bind (or rebind) `key`.
    pub fn bind(mut self, key: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        match self.values.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.values.push((key.to_string(), value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    /// Replace every bound `{token}` in one left-to-right pass. Substituted
    /// values are not rescanned; unbound tokens stay verbatim.
    pub fn apply(&self, template: &str) -> String {
        if self.values.is_empty() || !template.contains('{') {
            return template.to_string();
        }
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let bound = after
                .find('}')
                .map(|close| (&after[..close], close))
                .filter(|(name, _)| is_token_name(name))
                .and_then(|(name, close)| self.get(name).map(|v| (v, close)));
            match bound {
                Some((value, close)) => {
                    out.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

fn is_token_name(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

// ------------------------- resolver -------------------------

/// Pure function of (text, overrides, table + replacements).
#[derive(Clone, Debug)]
pub struct TranslationResolver<'a> {
    overrides: &'a LocaleOverrides,
    table: &'a TranslationTable,
    replacements: Replacements,
}

impl<'a> TranslationResolver<'a> {
    pub fn new(overrides: &'a LocaleOverrides, table: &'a TranslationTable) -> Self {
        Self { overrides, table, replacements: Replacements::new() }
    }

    /// Same sources, different placeholder bindings.
    pub fn with_replacements(&self, replacements: Replacements) -> TranslationResolver<'a> {
        TranslationResolver { overrides: self.overrides, table: self.table, replacements }
    }

    /// Localized text if an override or table entry exists.
    pub fn lookup(&self, text: &str) -> Option<String> {
        if let Some(s) = self.overrides.lookup(text) {
            return Some(s.to_string());
        }
        self.table.get(text).map(|s| self.replacements.apply(s))
    }

    /// Absent stays absent, empty stays empty, misses return the input.
    pub fn resolve(&self, text: Option<&str>) -> Option<String> {
        match text {
            None => None,
            Some("") => Some(String::new()),
            Some(t) => Some(self.lookup(t).unwrap_or_else(|| t.to_string())),
        }
    }

    /// `resolve` for text that is always present.
    pub fn t(&self, text: &str) -> String {
        self.resolve(Some(text)).unwrap_or_default()
    }

    pub fn label(&self, label: UiLabel) -> String {
        self.t(label.source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, &str)]) -> TranslationTable {
        let mut t = TranslationTable::new();
        for (k, v) in pairs {
            t.insert(*k, *v);
        }
        t
    }

    #[test]
    fn overrides_win_over_table() {
        let ov = LocaleOverrides::japanese();
        let tb = table(&[("Overview", "Resumen")]);
        let r = TranslationResolver::new(&ov, &tb);
        assert_eq!(r.t("Overview"), "概要");
    }

    #[test]
    fn every_override_is_returned_regardless_of_table() {
        let ov = LocaleOverrides::japanese();
        let tb = table(&UiLabel::ALL.map(|l| (l.source(), "from table")));
        let r = TranslationResolver::new(&ov, &tb);
        for label in UiLabel::ALL {
            assert_eq!(Some(r.label(label).as_str()), ov.get(label), "{label:?}");
        }
    }

    #[test]
    fn misses_and_empties_are_identity() {
        let ov = LocaleOverrides::none();
        let tb = TranslationTable::new();
        let r = TranslationResolver::new(&ov, &tb);
        assert_eq!(r.resolve(None), None);
        assert_eq!(r.resolve(Some("")), Some(String::new()));
        assert_eq!(r.t("not translated"), "not translated");
    }

    #[test]
    fn table_path_substitutes_placeholders() {
        let ov = LocaleOverrides::none();
        let tb = table(&[("{count} arguments", "{count} 個の議論（{percent}%）")]);
        let r = TranslationResolver::new(&ov, &tb)
            .with_replacements(Replacements::new().bind("count", 12).bind("percent", 40));
        assert_eq!(r.t("{count} arguments"), "12 個の議論（40%）");
    }

    #[test]
    fn override_path_is_static() {
        let ov = LocaleOverrides::none().with(UiLabel::Showing, "Showing {count}");
        let tb = TranslationTable::new();
        let r = TranslationResolver::new(&ov, &tb).with_replacements(Replacements::new().bind("count", 3));
        assert_eq!(r.label(UiLabel::Showing), "Showing {count}");
    }

    #[test]
    fn unbound_and_malformed_tokens_stay_verbatim() {
        let r = Replacements::new().bind("a", "X");
        assert_eq!(r.apply("{a}-{b}-{ a }-{"), "X-{b}-{ a }-{");
        assert_eq!(r.apply("{{a}}"), "{X}");
        // values are not rescanned
        let r = Replacements::new().bind("a", "{b}").bind("b", "no");
        assert_eq!(r.apply("{a}"), "{b}");
    }

    #[test]
    fn rebinding_replaces_value() {
        let r = Replacements::new().bind("n", 1).bind("n", 2);
        assert_eq!(r.apply("{n}"), "2");
    }

    #[test]
    fn table_from_report_columns() {
        let mut rows = BTreeMap::new();
        rows.insert("hello".to_string(), TranslationEntry::PerLanguage(vec!["bonjour".into(), "hallo".into()]));
        rows.insert("bye".to_string(), TranslationEntry::PerLanguage(vec!["au revoir".into()]));
        rows.insert("ok".to_string(), TranslationEntry::Single("d'accord".into()));

        assert!(TranslationTable::from_report(&rows, LanguageSelection::Original).is_empty());

        let de = TranslationTable::from_report(&rows, LanguageSelection::Column(1));
        assert_eq!(de.get("hello"), Some("hallo"));
        assert_eq!(de.get("bye"), None);
        assert_eq!(de.get("ok"), Some("d'accord"));
    }

    #[test]
    fn override_map_rejects_unknown_keys() {
        let mut m = BTreeMap::new();
        m.insert("Overview".to_string(), "Vue d'ensemble".to_string());
        let ov = LocaleOverrides::from_source_map(&m).unwrap();
        assert_eq!(ov.lookup("Overview"), Some("Vue d'ensemble"));

        m.insert("Nope".to_string(), "x".to_string());
        assert_eq!(
            LocaleOverrides::from_source_map(&m),
            Err(I18nError::UnknownOverrideKey("Nope".into()))
        );
    }

    #[test]
    fn locale_parse_tolerates_regions() {
        assert_eq!(Locale::parse("ja-JP"), Some(Locale::Ja));
        assert_eq!(Locale::parse("EN_us"), Some(Locale::En));
        assert_eq!(Locale::parse("fr"), None);
    }

    #[test]
    fn japanese_preset_covers_every_label() {
        assert_eq!(LocaleOverrides::japanese().len(), UiLabel::ALL.len());
    }

    mod props {
        use crate::i18n::*;
        use proptest::prelude::*;

        fn arb_table() -> impl Strategy<Value = Vec<(String, String)>> {
            proptest::collection::vec(("k[a-z ]{0,12}", "\\PC{0,16}"), 0..8)
        }

        proptest! {
            #[test]
            fn overrides_win_for_any_table(idx in 0..UiLabel::ALL.len(), rows in arb_table(), shadow in "\\PC{0,16}") {
                let label = UiLabel::ALL[idx];
                let mut tb = TranslationTable::new();
                for (k, v) in &rows {
                    tb.insert(k.as_str(), v.as_str());
                }
                tb.insert(label.source(), shadow);
                let ov = LocaleOverrides::japanese();
                let r = TranslationResolver::new(&ov, &tb)
                    .with_replacements(Replacements::new().bind("count", 1));
                prop_assert_eq!(r.t(label.source()), ov.get(label).unwrap());
            }

            #[test]
            fn misses_are_identity(text in "x:\\PC{0,24}", rows in arb_table()) {
                let mut tb = TranslationTable::new();
                for (k, v) in &rows {
                    tb.insert(k.as_str(), v.as_str());
                }
                let ov = LocaleOverrides::japanese();
                let r = TranslationResolver::new(&ov, &tb)
                    .with_replacements(Replacements::new().bind("count", 7).bind("percent", 50));
                prop_assert_eq!(r.resolve(Some(text.as_str())), Some(text.clone()));
                prop_assert_eq!(r.resolve(Some("")), Some(String::new()));
                prop_assert_eq!(r.resolve(None), None);
            }

            #[test]
            fn brace_free_text_is_unchanged_by_substitution(text in "[^{}]{0,32}") {
                let reps = Replacements::new().bind("count", 3).bind("cluster", "{count}");
                prop_assert_eq!(reps.apply(&text), text);
            }
        }
    }
}
