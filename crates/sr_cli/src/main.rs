// crates/sr_cli/src/main.rs
//
// load → localize → derive (colours, ranking) → build model → render
// → optional full-screen map export.
// Exit codes are stable: see `exitcodes`.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
    pub const RENDER: i32 = 5;
}

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use serde_json::json;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use args::{parse_and_validate as parse_cli, Args};

use sr_algo::ClusterColorAssigner;
use sr_core::{LanguageSelection, Report};
use sr_io::prelude::*;
use sr_report::{
    build_model, BuildOptions, I18nError, Localization, LocaleOverrides, PlainParagraphs, ReportError,
    ReportModel, TranslationResolver,
};
use sr_view::{
    FixedDevice, FrameRecorder, MapTarget, MemoryViewport, PreparedReport, ReportViewController, Transition,
    ViewError,
};

/// Viewport assumed for the exported full-screen frame.
const FULL_SCREEN_SIZE: (u32, u32) = (1280, 800);

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Schema / JSON shape / structural checks / bad flag values
    Validation(String),
    /// Read/write/path/limits
    Io(String),
    /// Model serialization or template failures
    Render(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("sr: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };
    init_tracing(&args);

    let result = if args.validate_only { validate_only(&args) } else { run_once(&args) };
    let rc = match result {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("sr: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

/// `--quiet`/`--verbose` win over RUST_LOG; otherwise RUST_LOG, then `info`.
fn init_tracing(args: &Args) {
    let filter = if args.quiet {
        EnvFilter::new("warn")
    } else if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Io(_) => IO,
        MainError::Render(_) => RENDER,
    }
}

fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Schema { .. } | IoError::Json { .. } | IoError::Invalid(_) => MainError::Validation(e.to_string()),
        IoError::Path(_) | IoError::Limit(_) | IoError::Hash(_) => MainError::Io(e.to_string()),
    }
}

fn map_i18n_err(e: I18nError) -> MainError {
    MainError::Validation(format!("--overrides: {e}"))
}

fn map_view_err(e: ViewError) -> MainError {
    MainError::Validation(format!("--full-screen: {e}"))
}

fn map_report_err(e: ReportError) -> MainError {
    MainError::Render(e.to_string())
}

/// Everything the run needs after loading and flag resolution.
struct Inputs {
    loaded: LoadedReport,
    language: LanguageSelection,
    overrides: LocaleOverrides,
}

fn load_inputs(args: &Args) -> Result<Inputs, MainError> {
    let loaded = load_report(&args.input).map_err(map_io_err)?;

    let language = match &args.language {
        None => LanguageSelection::Original,
        Some(name) => LanguageSelection::by_name(loaded.report.config.translation.as_ref(), name)
            .map_err(|e| MainError::Validation(format!("--language {name}: {e}")))?,
    };

    let mut overrides = LocaleOverrides::for_locale(args.locale);
    if let Some(path) = &args.overrides {
        let map = load_overrides(path).map_err(map_io_err)?;
        overrides = overrides.merged(LocaleOverrides::from_source_map(&map).map_err(map_i18n_err)?);
    }
    debug!(?language, overrides = overrides.len(), "inputs resolved");
    Ok(Inputs { loaded, language, overrides })
}

fn validate_only(args: &Args) -> Result<(), MainError> {
    let inputs = load_inputs(args)?;
    if let Some(raw) = &args.full_screen {
        let target = MapTarget::parse(raw).map_err(map_view_err)?;
        if let Some(id) = target.cluster() {
            if inputs.loaded.report.cluster(id).is_none() {
                return Err(map_view_err(ViewError::UnknownCluster(id.clone())));
            }
        }
    }
    info!(
        clusters = inputs.loaded.report.clusters.len(),
        sha256 = %inputs.loaded.input_sha256,
        "validate-only: inputs OK"
    );
    Ok(())
}

fn run_once(args: &Args) -> Result<(), MainError> {
    let Inputs { loaded, language, overrides } = load_inputs(args)?;
    let report = &loaded.report;

    let l10n = Localization::new(report, language, overrides);
    let resolver = l10n.resolver();

    let mut assigner = ClusterColorAssigner::new();
    let prepared = PreparedReport::prepare(report, &mut assigner);

    let opts = BuildOptions {
        top_n: usize::from(args.top),
        markdown: &PlainParagraphs,
        language,
        locale: args.locale,
        input_sha256: Some(&loaded.input_sha256),
    };
    let model = build_model(report, prepared.colors(), &resolver, &opts);

    if !args.render.is_empty() || args.full_screen.is_some() {
        fs::create_dir_all(&args.out).map_err(|e| MainError::Io(format!("create {}: {e}", args.out.display())))?;
    }

    for kind in &args.render {
        match kind.as_str() {
            "json" => write_json(&model, &args.out)?,
            "html" => write_html(&model, &args.mode, &args.out)?,
            other => return Err(MainError::Validation(format!("unknown renderer {other}"))),
        }
    }

    if let Some(raw) = &args.full_screen {
        export_full_screen(args, report, prepared, &resolver, raw)?;
    }

    info!(
        clusters = model.totals.clusters,
        arguments = model.totals.arguments,
        out = %args.out.display(),
        "run complete"
    );
    Ok(())
}

#[cfg(feature = "report-json")]
fn write_json(model: &ReportModel, out: &Path) -> Result<(), MainError> {
    let value = sr_report::render_json(model).map_err(map_report_err)?;
    write_canonical_file(&value, &out.join("report.json")).map_err(map_io_err)
}

#[cfg(not(feature = "report-json"))]
fn write_json(_model: &ReportModel, _out: &Path) -> Result<(), MainError> {
    Err(MainError::Render("json renderer not built (feature report-json)".into()))
}

#[cfg(feature = "report-html")]
fn write_html(model: &ReportModel, mode: &str, out: &Path) -> Result<(), MainError> {
    let mode = sr_report::PresentationMode::parse(mode)
        .ok_or_else(|| MainError::Validation(format!("--mode {mode}")))?;
    let html = sr_report::render_html(model, mode).map_err(map_report_err)?;
    let path = out.join("report.html");
    sr_io::canonical_json::write_atomic(&path, html.as_bytes())
        .map_err(|e| MainError::Io(format!("write {}: {e}", path.display())))?;
    info!(path = %path.display(), "wrote html");
    Ok(())
}

#[cfg(not(feature = "report-html"))]
fn write_html(_model: &ReportModel, _mode: &str, _out: &Path) -> Result<(), MainError> {
    Err(MainError::Render("html renderer not built (feature report-html)".into()))
}

/// Drive the view controller through open → render → back and write the
/// full-screen frame. A refusal (touch-only device) is reported, not fatal.
fn export_full_screen(
    args: &Args,
    report: &Report,
    prepared: PreparedReport<'_>,
    resolver: &TranslationResolver<'_>,
    raw: &str,
) -> Result<(), MainError> {
    let target = MapTarget::parse(raw).map_err(map_view_err)?;
    let mut ctl = ReportViewController::new(prepared, FixedDevice { touch_only: args.touch_only });
    let mut viewport = MemoryViewport::new(FULL_SCREEN_SIZE.0, FULL_SCREEN_SIZE.1);

    match ctl.open_map(target.clone(), &viewport, resolver).map_err(map_view_err)? {
        Transition::Refused(notice) => {
            warn!(notice = %notice.text, "full-screen map not exported");
            if !args.quiet {
                eprintln!("{}", notice.text);
            }
            return Ok(());
        }
        Transition::Entered(_) | Transition::Returned => {}
    }

    let mut recorder = FrameRecorder::default();
    ctl.render_maps(&mut recorder, &viewport, resolver);
    let frame = recorder.frames.pop().ok_or_else(|| MainError::Render("no map frame produced".into()))?;

    // digest of the frame alone, so identical frames match across reports
    let frame_sha256 = sr_io::hasher::sha256_canonical(&frame).map_err(map_io_err)?;
    let doc = json!({
        "report": report.config.name,
        "target": target.as_str(),
        "frame": frame,
        "frame_sha256": frame_sha256,
    });
    write_canonical_file(&doc, &args.out.join("map.json")).map_err(map_io_err)?;

    ctl.back().map_err(map_view_err)?;
    ctl.finish_render_pass(&mut viewport);
    Ok(())
}
