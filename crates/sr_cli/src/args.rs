// crates/sr_cli/src/args.rs
//
// Offline CLI argument surface for `sr`.
//
// Rules:
// - No networked paths (reject any scheme:// like http/https/file)
// - --input must be an existing local file; --overrides too when given
// - --render [json|html]* (omit to skip rendering)
// - --full-screen takes `main` or a cluster id
// - --validate-only loads and checks inputs without writing anything

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use sr_report::Locale;
use sr_view::MapTarget;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "sr",
    disable_help_subcommand = true,
    about = "Offline renderer for clustered-argument scatter reports"
)]
pub struct Args {
    /// Report JSON (config, overview, clusters, translations).
    #[arg(long)]
    pub input: PathBuf,

    /// Output directory (default: current directory).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Renderer(s) to emit. Choose up to 2 (json, html). Omit to skip rendering.
    #[arg(long, value_parser = ["json", "html"], num_args = 0..=2)]
    pub render: Vec<String>,

    /// Built-in UI label set.
    #[arg(long, default_value = "en", value_parser = parse_locale)]
    pub locale: Locale,

    /// JSON object of UI label overrides keyed by English source text.
    #[arg(long)]
    pub overrides: Option<PathBuf>,

    /// Translation column by name (from config.translation.languages). Default: original text.
    #[arg(long)]
    pub language: Option<String>,

    /// Representative arguments per cluster.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..=50))]
    pub top: u16,

    /// HTML layout: standard | compact.
    #[arg(long, default_value = "standard", value_parser = ["standard", "compact"])]
    pub mode: String,

    /// Export the full-screen map frame (`main` or a cluster id) as map.json.
    #[arg(long = "full-screen", value_name = "main|CLUSTER_ID")]
    pub full_screen: Option<String>,

    /// Treat the device as touch-only (full-screen maps are refused).
    #[arg(long)]
    pub touch_only: bool,

    /// Validate inputs only (load + schema + structure), write nothing.
    #[arg(long)]
    pub validate_only: bool,

    /// Only warnings and errors on stderr.
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Debug-level logs on stderr.
    #[arg(long)]
    pub verbose: bool,
}

/// Errors surfaced by argument validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
    BadValue(&'static str, String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            NotFound(p) => write!(f, "file not found: {p}"),
            BadValue(flag, v) => write!(f, "invalid value for {flag}: {v}"),
        }
    }
}
impl std::error::Error for CliError {}

pub fn parse_locale(s: &str) -> Result<Locale, String> {
    Locale::parse(s).ok_or_else(|| format!("unsupported locale {s:?} (expected en or ja)"))
}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

/// Checks that need more than clap's per-flag parsers; normalizes paths.
pub fn validate(mut args: Args) -> Result<Args, CliError> {
    for p in [Some(args.input.as_path()), args.overrides.as_deref(), Some(args.out.as_path())]
        .into_iter()
        .flatten()
    {
        ensure_local_path(p)?;
    }

    ensure_local_exists(&args.input, "--input")?;
    if let Some(o) = &args.overrides {
        ensure_local_exists(o, "--overrides")?;
    }

    if let Some(target) = &args.full_screen {
        MapTarget::parse(target).map_err(|_| CliError::BadValue("--full-screen", target.clone()))?;
    }
    if let Some(lang) = &args.language {
        if lang.trim().is_empty() {
            return Err(CliError::BadValue("--language", lang.clone()));
        }
    }

    args.input = normalize_path(&args.input);
    args.overrides = args.overrides.take().map(|p| normalize_path(&p));
    args.out = normalize_path(&args.out);
    Ok(args)
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    sr_io::looks_like_url_strict(&lower)
        || lower.starts_with("http:")
        || lower.starts_with("https:")
        || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {}", p.display())))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!("{label} {}", p.display())));
    }
    Ok(())
}

/// Best-effort absolute path; falls back to CWD-joined when the path does not exist yet.
fn normalize_path(p: &Path) -> PathBuf {
    fs::canonicalize(p).unwrap_or_else(|_| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(p)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn input_file() -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"{}").unwrap();
        f
    }

    fn parse(extra: &[&str], input: &Path) -> Result<Args, clap::Error> {
        let mut argv = vec!["sr".to_string(), "--input".to_string(), input.display().to_string()];
        argv.extend(extra.iter().map(|s| s.to_string()));
        Args::try_parse_from(argv)
    }

    #[test]
    fn defaults() {
        let f = input_file();
        let a = validate(parse(&[], f.path()).unwrap()).unwrap();
        assert_eq!(a.top, 5);
        assert_eq!(a.locale, Locale::En);
        assert_eq!(a.mode, "standard");
        assert!(a.render.is_empty());
        assert!(a.input.is_absolute() && a.out.is_absolute());
    }

    #[test]
    fn clap_rejects_out_of_range_and_unknown_values() {
        let f = input_file();
        assert!(parse(&["--top", "0"], f.path()).is_err());
        assert!(parse(&["--top", "51"], f.path()).is_err());
        assert!(parse(&["--render", "pdf"], f.path()).is_err());
        assert!(parse(&["--locale", "fr"], f.path()).is_err());
        assert!(parse(&["--quiet", "--verbose"], f.path()).is_err());
        assert_eq!(parse(&["--locale", "ja"], f.path()).unwrap().locale, Locale::Ja);
    }

    #[test]
    fn rejects_schemes_and_missing_files() {
        let f = input_file();
        let a = parse(&["--out", "https://example.com/out"], f.path()).unwrap();
        assert!(matches!(validate(a), Err(CliError::NonLocalPath(_))));

        let a = parse(&["--overrides", "/definitely/not/here.json"], f.path()).unwrap();
        assert!(matches!(validate(a), Err(CliError::NotFound(_))));
    }

    #[test]
    fn full_screen_target_must_be_non_blank() {
        let f = input_file();
        let a = parse(&["--full-screen", " "], f.path()).unwrap();
        assert!(matches!(validate(a), Err(CliError::BadValue("--full-screen", _))));
        let a = parse(&["--full-screen", "main"], f.path()).unwrap();
        assert!(validate(a).is_ok());
    }

    #[test]
    fn has_scheme_cases() {
        assert!(has_scheme("http://x"));
        assert!(has_scheme("FILE:///tmp/x"));
        assert!(!has_scheme("/tmp/file.json"));
        assert!(!has_scheme(r"C:\local\file.json"));
    }
}
