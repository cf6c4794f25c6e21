//! Black-box tests for the `sr` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};

fn fixture() -> Value {
    let args = |id: &str, n: usize| -> Vec<Value> {
        (0..n)
            .map(|i| json!({
                "arg_id": format!("{id}-{i}"),
                "argument": format!("argument {i} of {id}"),
                "x": i as f64,
                "y": 1.0,
                "p": (i as f64) / 10.0
            }))
            .collect()
    };
    json!({
        "config": {
            "name": "Town hall",
            "question": "What should the town fund?",
            "intro": "Collected over **two weeks**.",
            "translation": { "languages": ["Japanese"] }
        },
        "overview": "Residents care about parks and transit.",
        "clusters": [
            { "cluster": "Parks", "cluster_id": "c1", "takeaways": "Green space.", "arguments": args("c1", 2) },
            { "cluster": "Transit", "cluster_id": "c2", "takeaways": "More buses.", "arguments": args("c2", 6) }
        ],
        "translations": {
            "Transit": ["交通"],
            "Parks": ["公園"]
        }
    })
}

fn write_input(dir: &Path, doc: &Value) -> PathBuf {
    let p = dir.join("input.json");
    fs::write(&p, serde_json::to_vec_pretty(doc).unwrap()).unwrap();
    p
}

fn sr() -> Command {
    Command::cargo_bin("sr").unwrap()
}

fn read_json(p: &Path) -> Value {
    serde_json::from_slice(&fs::read(p).unwrap()).unwrap()
}

#[test]
fn validate_only_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_input(tmp.path(), &fixture());
    let out = tmp.path().join("out");
    sr().arg("--input").arg(&input).arg("--out").arg(&out).arg("--validate-only").arg("--render").arg("json")
        .assert()
        .success();
    assert!(!out.exists());
}

#[test]
fn renders_json_and_html() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_input(tmp.path(), &fixture());
    let out = tmp.path().join("out");
    sr().arg("--input").arg(&input).arg("--out").arg(&out).args(["--render", "json", "html", "--top", "3"])
        .assert()
        .success();

    let v = read_json(&out.join("report.json"));
    let clusters = v["report"]["clusters"].as_array().unwrap();
    assert_eq!(clusters[0]["cluster_id"], "c2");
    assert_eq!(clusters[0]["share_pct"], 75);
    assert_eq!(clusters[1]["share_pct"], 25);
    assert_eq!(clusters[0]["top_arguments"].as_array().unwrap().len(), 3);
    assert_eq!(clusters[0]["top_arguments"][0]["arg_id"], "c2-5");
    assert_eq!(v["report"]["integrity"]["input_sha256"].as_str().unwrap().len(), 64);

    let html = fs::read_to_string(out.join("report.html")).unwrap();
    assert!(html.contains("Town hall"));
    assert!(html.contains(r#"data-map="main""#));
}

#[test]
fn japanese_locale_and_language_column() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_input(tmp.path(), &fixture());
    let out = tmp.path().join("out");
    sr().arg("--input").arg(&input).arg("--out").arg(&out)
        .args(["--render", "json", "--locale", "ja", "--language", "japanese"])
        .assert()
        .success();

    let v = read_json(&out.join("report.json"));
    assert_eq!(v["report"]["overview"]["heading"], "概要");
    assert_eq!(v["report"]["clusters"][0]["label"], "交通");
    assert_eq!(v["report"]["integrity"]["language"], "Japanese");
    assert_eq!(v["report"]["integrity"]["locale"], "ja");
}

#[test]
fn unknown_language_is_a_validation_error() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_input(tmp.path(), &fixture());
    sr().arg("--input").arg(&input).args(["--validate-only", "--language", "Klingon"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--language Klingon"));
}

#[test]
fn schema_violation_exits_2_with_pointer() {
    let tmp = tempfile::tempdir().unwrap();
    let mut doc = fixture();
    doc["clusters"][0]["arguments"][0]["p"] = json!("high");
    let input = write_input(tmp.path(), &doc);
    sr().arg("--input").arg(&input).arg("--validate-only")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("/clusters/0/arguments/0/p"));
}

#[test]
fn missing_input_exits_2() {
    sr().args(["--input", "/no/such/report.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn url_input_is_rejected() {
    sr().args(["--input", "https://example.com/report.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no scheme"));
}

#[test]
fn unknown_override_key_exits_2() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_input(tmp.path(), &fixture());
    let overrides = tmp.path().join("labels.json");
    fs::write(&overrides, r#"{"Overview":"Aperçu","Not a label":"x"}"#).unwrap();
    sr().arg("--input").arg(&input).arg("--overrides").arg(&overrides).arg("--validate-only")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Not a label"));
}

#[test]
fn full_screen_export_writes_map_frame() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_input(tmp.path(), &fixture());
    let out = tmp.path().join("out");
    sr().arg("--input").arg(&input).arg("--out").arg(&out).args(["--full-screen", "c2", "--quiet"])
        .assert()
        .success();

    let v = read_json(&out.join("map.json"));
    assert_eq!(v["target"], "c2");
    assert_eq!(v["frame"]["full_screen"], true);
    assert_eq!(v["frame"]["only_cluster"], "c2");
    assert_eq!(v["frame"]["width"], 1280);
    assert_eq!(v["frame"]["points"].as_array().unwrap().len(), 6);
    assert_eq!(v["frame"]["back_label"], "Back to report");
    let digest = v["frame_sha256"].as_str().unwrap();
    assert_eq!(digest.len(), 64);
    assert!(digest.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
}

#[test]
fn frame_digest_ignores_report_name_and_is_stable() {
    let tmp = tempfile::tempdir().unwrap();
    let mut renamed = fixture();
    renamed["config"]["name"] = json!("Another title");

    let mut digests = Vec::new();
    for (i, doc) in [fixture(), fixture(), renamed].iter().enumerate() {
        let dir = tmp.path().join(format!("run{i}"));
        fs::create_dir_all(&dir).unwrap();
        let input = write_input(&dir, doc);
        let out = dir.join("out");
        sr().arg("--input").arg(&input).arg("--out").arg(&out).args(["--full-screen", "main", "--quiet"])
            .assert()
            .success();
        digests.push(read_json(&out.join("map.json"))["frame_sha256"].as_str().unwrap().to_string());
    }
    assert_eq!(digests[0], digests[1]);
    assert_eq!(digests[0], digests[2]);
}

#[test]
fn touch_only_device_gets_notice_and_no_map() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_input(tmp.path(), &fixture());
    let out = tmp.path().join("out");
    sr().arg("--input").arg(&input).arg("--out").arg(&out)
        .args(["--full-screen", "main", "--touch-only", "--locale", "ja"])
        .assert()
        .success()
        .stderr(predicate::str::contains("タッチデバイス"));
    assert!(!out.join("map.json").exists());
}

#[test]
fn unknown_full_screen_cluster_exits_2() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_input(tmp.path(), &fixture());
    sr().arg("--input").arg(&input).arg("--out").arg(tmp.path()).args(["--full-screen", "c9"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown cluster id: c9"));
}
