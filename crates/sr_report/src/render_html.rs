//! crates/sr_report/src/render_html.rs
//!
//! Offline, self-contained HTML through an embedded minijinja template.
//! - Plain strings are auto-escaped (template name ends in `.html`).
//! - `*_html` fields come from the MarkdownRenderer and are marked `safe`.
//! - No external assets; interactive maps are placeholders carrying
//!   `data-map` targets for the view layer.

use minijinja::{context, Environment};

use crate::structure::ReportModel;
use crate::ReportError;

/// Layout choice; both layouts read the same model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PresentationMode {
    /// Sectioned document: overview, cluster list, per-cluster detail.
    #[default]
    Standard,
    /// Card layout with one summary card per cluster.
    Compact,
}

impl PresentationMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(PresentationMode::Standard),
            "compact" => Some(PresentationMode::Compact),
            _ => None,
        }
    }
}

const TEMPLATE_NAME: &str = "report.html";

const TEMPLATE: &str = r##"<!doctype html>
<html lang="{{ m.integrity.locale }}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>{{ m.cover.title }}</title>
<style>
body{font-family:system-ui,-apple-system,Segoe UI,Roboto,Arial,sans-serif;margin:24px;max-width:960px}
h1,h2,h3{margin:.3em 0}
.muted{opacity:.75}
.swatch{display:inline-block;width:.8em;height:.8em;border-radius:50%;margin-right:.4em}
.map{border:1px solid #ddd;display:flex;align-items:center;justify-content:center}
.cards{display:grid;grid-template-columns:repeat(auto-fill,minmax(260px,1fr));gap:12px}
.card{border:1px solid #ddd;border-radius:8px;padding:12px}
footer{margin-top:2em;font-size:.85em}
</style>
</head>
<body>
<h1>{{ m.cover.title }}</h1>
<h2 class="muted">{{ m.cover.question }}</h2>
{% if m.cover.intro_html %}<section id="introduction"><h2>{{ m.labels.introduction }}</h2>{{ m.cover.intro_html|safe }}</section>{% endif %}
<section id="overview">
<h2>{{ m.overview.heading }}</h2>
{{ m.overview.body_html|safe }}
</section>
{% if compact %}
<section id="clusters">
<h2>{{ m.labels.cluster_analysis }}</h2>
<div class="cards">
{% for c in m.clusters %}
<div class="card" id="cluster-{{ c.cluster_id }}">
<h3><span class="swatch" style="background:{{ c.color }}"></span>{{ c.label }}</h3>
<p class="muted">{{ c.stats_line }}</p>
<ul>{% for a in c.top_arguments %}<li>{{ a.text }}</li>{% endfor %}</ul>
</div>
{% endfor %}
</div>
</section>
{% else %}
<section id="map">
<h2>{{ m.labels.data_map }}</h2>
<div class="map" data-map="main" style="width:450px;height:450px"><button data-open-map="main">{{ m.labels.open_full_screen_map }}</button></div>
</section>
<section id="clusters">
<h2>{{ m.labels.clusters }}</h2>
<ul>
{% for c in m.clusters %}<li><span class="swatch" style="background:{{ c.color }}"></span><a href="#cluster-{{ c.cluster_id }}">{{ c.label }}</a> <span class="muted">{{ c.stats_line }}</span></li>
{% endfor %}</ul>
</section>
<section id="details">
<h2>{{ m.labels.cluster_details }}</h2>
{% for c in m.clusters %}
<article id="cluster-{{ c.cluster_id }}">
<h3><span class="swatch" style="background:{{ c.color }}"></span>{{ c.rank }}. {{ c.label }}</h3>
<p class="muted">{{ c.stats_line }}</p>
<h4>{{ m.labels.cluster_analysis }}</h4>
{{ c.takeaways_html|safe }}
<h4>{{ m.labels.cluster_distribution }}</h4>
<div class="map" data-map="{{ c.cluster_id }}" style="width:350px;height:350px"><button data-open-map="{{ c.cluster_id }}">{{ m.labels.open_full_screen_map }}</button></div>
<h4>{{ m.labels.representative_comments }}</h4>
<ul>{% for a in c.top_arguments %}<li data-arg="{{ a.arg_id }}">{{ a.text }}</li>{% endfor %}</ul>
</article>
{% endfor %}
</section>
{% endif %}
<footer class="muted">
{% if m.languages %}<p>{{ m.labels.language }}: {{ m.integrity.language }}</p>{% endif %}
{% if m.integrity.input_sha256 %}<p>sha256: <code>{{ m.integrity.input_sha256 }}</code></p>{% endif %}
</footer>
</body>
</html>
"##;

pub fn render_html(model: &ReportModel, mode: PresentationMode) -> Result<String, ReportError> {
    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, TEMPLATE)
        .map_err(|e| ReportError::Template(e.to_string()))?;
    let tmpl = env
        .get_template(TEMPLATE_NAME)
        .map_err(|e| ReportError::Template(e.to_string()))?;
    tmpl.render(context! { m => model, compact => mode == PresentationMode::Compact })
        .map_err(|e| ReportError::Template(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::sample_model;

    #[test]
    fn standard_layout_has_maps_and_details() {
        let html = render_html(&sample_model(), PresentationMode::Standard).unwrap();
        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains(r#"data-map="main""#));
        assert!(html.contains(r#"data-map="c1""#));
        assert!(html.contains("width:450px"));
        assert!(html.contains("width:350px"));
        assert!(html.contains("more trees"));
        assert!(html.contains("<p>o</p>"));
    }

    #[test]
    fn standard_layout_heads_takeaways_with_cluster_analysis() {
        let mut m = sample_model();
        m.labels.cluster_analysis = "クラスター分析".into();
        m.clusters[0].takeaways_html = "<p>Shade matters.</p>".into();
        let html = render_html(&m, PresentationMode::Standard).unwrap();
        let heading = html.find("<h4>クラスター分析</h4>").unwrap();
        let takeaways = html.find("<p>Shade matters.</p>").unwrap();
        assert!(heading < takeaways);
    }

    #[test]
    fn compact_layout_has_cards_only() {
        let html = render_html(&sample_model(), PresentationMode::Compact).unwrap();
        assert!(html.contains(r#"class="card""#));
        assert!(!html.contains("data-map="));
        assert!(html.contains("2 arguments · 100%"));
    }

    #[test]
    fn plain_fields_are_escaped() {
        let mut m = sample_model();
        m.cover.title = "<b>bold</b>".into();
        let html = render_html(&m, PresentationMode::Standard).unwrap();
        assert!(!html.contains("<b>bold"));
        assert!(html.contains("&lt;b&gt;bold"));
    }

    #[test]
    fn mode_parse() {
        assert_eq!(PresentationMode::parse("Compact"), Some(PresentationMode::Compact));
        assert_eq!(PresentationMode::parse("cards"), None);
    }
}
