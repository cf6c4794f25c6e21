//! crates/sr_report/src/render_json.rs
//! JSON rendering of the report model.
//!
//! Object keys come out sorted; callers that need stable bytes still pass the
//! value through sr_io's canonical writer.

use serde_json::{json, Value};

use crate::structure::ReportModel;
use crate::ReportError;

/// Tag written alongside the model so consumers can reject unknown layouts.
pub const MODEL_FORMAT: &str = "scatter_report.model.v1";

pub fn render_json(model: &ReportModel) -> Result<Value, ReportError> {
    let body = serde_json::to_value(model).map_err(|e| ReportError::Json(e.to_string()))?;
    Ok(json!({ "format": MODEL_FORMAT, "report": body }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::sample_model as tiny;

    #[test]
    fn wraps_model_with_format_tag() {
        let v = render_json(&tiny()).unwrap();
        assert_eq!(v["format"], MODEL_FORMAT);
        assert_eq!(v["report"]["clusters"][0]["share_pct"], 100);
        assert_eq!(v["report"]["clusters"][0]["top_arguments"][0]["text"], "more trees");
        assert!(v["report"]["cover"]["intro_html"].is_null());
    }
}
