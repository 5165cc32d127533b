mod common;

use common::{TestEnv, APP_YAML};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

fn load_schema(name: &str) -> Value {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let raw = fs::read_to_string(root.join("docs/contracts").join(name)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn validate(schema_name: &str, data: &Value) {
    let schema = load_schema(schema_name);
    let validator = JSONSchema::compile(&schema).expect("compile schema");
    let msgs: Vec<String> = match validator.validate(data) {
        Ok(()) => return,
        Err(errors) => errors.map(|e| e.to_string()).collect(),
    };
    panic!("schema validation failed: {}", msgs.join(" | "));
}

fn fixture() -> TestEnv {
    let env = TestEnv::new();
    env.write("app.yaml", APP_YAML);
    env.write_config(
        "app.yaml",
        "out.yaml",
        Some(&env.path("cache")),
        "  - key: database\n    include:\n      - key: credentials\n  - key: cache\n",
    );
    env
}

#[test]
fn trim_report_matches_contract() {
    let env = fixture();
    let v = env.run_json(&["trim"]);
    validate("trim-report.schema.json", &v);
    assert_eq!(v["data"]["source"], "file");
    assert_eq!(v["data"]["rule_count"], 3);
}

#[test]
fn check_report_matches_contract() {
    let env = fixture();
    let v = env.run_json(&["check"]);
    validate("check-report.schema.json", &v);
    assert_eq!(v["data"]["rules"][0]["include"][0]["key"], "credentials");
    assert!(v["data"]["rules"][1].get("include").is_none());
}

#[test]
fn cache_clear_report_matches_contract() {
    let env = fixture();
    let v = env.run_json(&["cache", "clear"]);
    validate("cache-clear-report.schema.json", &v);
    assert_eq!(v["data"]["removed"], 0);
}
