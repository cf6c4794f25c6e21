//! crates/sr_report/src/structure.rs
//! Report data model and its builder.
//!
//! Rules:
//! - Every user-visible string passes through the `TranslationResolver` once.
//! - Counts and shares come from a single `Snapshot`; nothing is recomputed later.
//! - Cluster order is the ranked order (count desc, ties keep input order).
//! - Author text becomes HTML only through the supplied `MarkdownRenderer`.

use serde::Serialize;
use tracing::debug;

use sr_algo::{top_arguments, ColorMap, Snapshot, DEFAULT_TOP_ARGUMENTS};
use sr_core::{LanguageSelection, Report};

use crate::i18n::{Locale, Replacements, TranslationResolver, UiLabel};
use crate::markdown::MarkdownRenderer;

/// Table key for the per-cluster statistics line. Bound tokens: `count`,
/// `percent`, `total`, `rank`, `cluster`.
pub const STATS_TEMPLATE: &str = "{count} arguments ({percent}% of total)";

// -------------------- model --------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportModel {
    pub cover: CoverBlock,
    pub overview: OverviewBlock,
    pub labels: UiStrings,
    pub totals: Totals,
    pub clusters: Vec<ClusterBlock>,
    pub languages: Vec<String>,
    pub integrity: IntegrityBlock,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CoverBlock {
    pub title: String,
    pub question: String,
    pub intro_html: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverviewBlock {
    pub heading: String,
    pub body_html: String,
}

/// Resolved chrome strings the renderers need.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UiStrings {
    pub introduction: String,
    pub clusters: String,
    pub cluster_analysis: String,
    pub cluster_details: String,
    pub cluster_distribution: String,
    pub data_map: String,
    pub open_full_screen_map: String,
    pub representative_comments: String,
    pub back_to_report: String,
    pub language: String,
    pub appendix: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub clusters: usize,
    pub arguments: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClusterBlock {
    pub rank: usize,
    pub cluster_id: String,
    pub label: String,
    pub color: String,
    pub argument_count: usize,
    pub share_pct: u32,
    pub stats_line: String,
    pub takeaways_html: String,
    pub top_arguments: Vec<ArgumentLine>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArgumentLine {
    pub arg_id: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IntegrityBlock {
    pub input_sha256: Option<String>,
    /// "original" or the configured language name.
    pub language: String,
    pub locale: String,
    pub top_n: usize,
}

// -------------------- builder --------------------

/// Knobs for `build_model`.
pub struct BuildOptions<'a> {
    pub top_n: usize,
    pub markdown: &'a dyn MarkdownRenderer,
    pub language: LanguageSelection,
    pub locale: Locale,
    pub input_sha256: Option<&'a str>,
}

impl<'a> BuildOptions<'a> {
    pub fn new(markdown: &'a dyn MarkdownRenderer) -> Self {
        Self {
            top_n: DEFAULT_TOP_ARGUMENTS,
            markdown,
            language: LanguageSelection::Original,
            locale: Locale::En,
            input_sha256: None,
        }
    }
}

pub fn build_model(
    report: &Report,
    colors: &ColorMap,
    resolver: &TranslationResolver<'_>,
    opts: &BuildOptions<'_>,
) -> ReportModel {
    let snapshot = Snapshot::new(&report.clusters);
    let t = |s: &str| resolver.t(s);

    let cover = CoverBlock {
        title: t(&report.config.name),
        question: t(&report.config.question),
        intro_html: resolver
            .resolve(report.config.intro.as_deref())
            .filter(|s| !s.trim().is_empty())
            .map(|s| opts.markdown.to_html(&s)),
    };

    let overview = OverviewBlock {
        heading: resolver.label(UiLabel::Overview),
        body_html: opts.markdown.to_html(&t(&report.overview)),
    };

    let clusters: Vec<ClusterBlock> = snapshot
        .ranked()
        .into_iter()
        .zip(snapshot.ranked_stats())
        .map(|(cluster, stats)| {
            let bound = resolver.with_replacements(
                Replacements::new()
                    .bind("count", stats.argument_count)
                    .bind("percent", stats.share_pct)
                    .bind("total", snapshot.total())
                    .bind("rank", stats.rank)
                    .bind("cluster", resolver.t(&cluster.label)),
            );
            let stats_line = bound.lookup(STATS_TEMPLATE).unwrap_or_else(|| {
                format!(
                    "{} {} · {}%",
                    stats.argument_count,
                    resolver.label(UiLabel::Arguments),
                    stats.share_pct
                )
            });
            ClusterBlock {
                rank: stats.rank,
                cluster_id: cluster.cluster_id.to_string(),
                label: bound.t(&cluster.label),
                color: colors.css(&cluster.cluster_id),
                argument_count: stats.argument_count,
                share_pct: stats.share_pct,
                stats_line,
                takeaways_html: opts.markdown.to_html(&bound.t(&cluster.takeaways)),
                top_arguments: top_arguments(cluster, opts.top_n)
                    .into_iter()
                    .map(|a| ArgumentLine { arg_id: a.arg_id.clone(), text: bound.t(&a.argument) })
                    .collect(),
            }
        })
        .collect();

    let languages = report
        .config
        .translation
        .as_ref()
        .map(|s| s.languages.clone())
        .unwrap_or_default();

    let language = match opts.language {
        LanguageSelection::Original => "original".to_string(),
        LanguageSelection::Column(i) => languages.get(i).cloned().unwrap_or_else(|| format!("#{i}")),
    };

    debug!(clusters = clusters.len(), total = snapshot.total(), %language, "report model built");

    ReportModel {
        cover,
        overview,
        labels: UiStrings {
            introduction: resolver.label(UiLabel::Introduction),
            clusters: resolver.label(UiLabel::Clusters),
            cluster_analysis: resolver.label(UiLabel::ClusterAnalysis),
            cluster_details: resolver.label(UiLabel::ClusterDetails),
            cluster_distribution: resolver.label(UiLabel::ClusterDistribution),
            data_map: resolver.label(UiLabel::DataMap),
            open_full_screen_map: resolver.label(UiLabel::OpenFullScreenMap),
            representative_comments: resolver.label(UiLabel::RepresentativeComments),
            back_to_report: resolver.label(UiLabel::BackToReport),
            language: resolver.label(UiLabel::Language),
            appendix: resolver.label(UiLabel::Appendix),
        },
        totals: Totals { clusters: clusters.len(), arguments: snapshot.total() },
        clusters,
        languages,
        integrity: IntegrityBlock {
            input_sha256: opts.input_sha256.map(str::to_string),
            language,
            locale: opts.locale.as_str().to_string(),
            top_n: opts.top_n,
        },
    }
}

/// Small fixed model for renderer tests.
#[cfg(test)]
pub(crate) fn sample_model() -> ReportModel {
    ReportModel {
        cover: CoverBlock { title: "T".into(), question: "Q".into(), intro_html: None },
        overview: OverviewBlock { heading: "Overview".into(), body_html: "<p>o</p>".into() },
        labels: UiStrings {
            introduction: "Introduction".into(),
            clusters: "Clusters".into(),
            cluster_analysis: "Cluster analysis".into(),
            cluster_details: "Cluster details".into(),
            cluster_distribution: "Map of this cluster".into(),
            data_map: "Data map".into(),
            open_full_screen_map: "Open full-screen map".into(),
            representative_comments: "Representative comments".into(),
            back_to_report: "Back to report".into(),
            language: "Language".into(),
            appendix: "Appendix".into(),
        },
        totals: Totals { clusters: 1, arguments: 2 },
        clusters: vec![ClusterBlock {
            rank: 1,
            cluster_id: "c1".into(),
            label: "Parks".into(),
            color: "#1f77b4".into(),
            argument_count: 2,
            share_pct: 100,
            stats_line: "2 arguments · 100%".into(),
            takeaways_html: String::new(),
            top_arguments: vec![ArgumentLine { arg_id: "a1".into(), text: "more trees".into() }],
        }],
        languages: vec![],
        integrity: IntegrityBlock {
            input_sha256: None,
            language: "original".into(),
            locale: "en".into(),
            top_n: 5,
        },
    }
}
