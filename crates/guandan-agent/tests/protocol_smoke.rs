use std::fs;

use guandan_agent::config::{AgentConfig, ConfigError};
use guandan_agent::session::serve;
use serde_json::{Value, json};
use tempfile::tempdir;

const CONFIG_YAML: &str = r#"
strategy:
  pass_cost: 125
  features:
    smart_opening: false
logging:
  tracing_level: warn
"#;

fn run(lines: &[Value], config: &AgentConfig) -> Vec<Value> {
    let input: String = lines.iter().map(|line| format!("{line}\n")).collect();
    let mut output = Vec::new();
    serve(input.as_bytes(), &mut output, &config.strategy).expect("serve loop");
    String::from_utf8(output)
        .expect("utf8")
        .lines()
        .map(|line| serde_json::from_str(line).expect("json response"))
        .collect()
}

#[test]
fn config_file_drives_the_serve_loop() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("agent.yaml");
    fs::write(&path, CONFIG_YAML).expect("write config");
    let config = AgentConfig::from_path(&path).expect("config loads");
    assert!(!config.strategy.features.smart_opening);

    let hand = json!([
        {"color": "Spade", "number": 9},
        {"color": "Heart", "number": 9},
        {"color": "Club", "number": 6},
        {"color": "Diamond", "number": 13}
    ]);
    let responses = run(
        &[
            json!({"msg": "ping"}),
            json!({"msg": "ai_call", "request_id": 1, "your_cards": hand}),
            json!({
                "msg": "ai_call",
                "request_id": 2,
                "last_move": [{"color": "Spade", "number": 7}, {"color": "Heart", "number": 7}],
                "your_cards": hand
            }),
            json!({"msg": "ai_call", "level": 0, "your_cards": hand}),
        ],
        &config,
    );

    assert_eq!(responses.len(), 4);
    assert_eq!(responses[0], json!({"status": "healthy"}));
    // Smart opening is off, so the lowest card leads.
    assert_eq!(
        responses[1],
        json!({"action": "play_cards", "cards": [{"color": "Club", "number": 6}], "request_id": 1})
    );
    assert_eq!(responses[2]["request_id"], json!(2));
    assert_eq!(responses[2]["cards"].as_array().map(Vec::len), Some(2));
    assert!(responses[3].get("error").is_some());
}

#[test]
fn bomb_answers_over_the_wire() {
    let nines: Vec<Value> = ["Spade", "Heart", "Club", "Diamond"]
        .into_iter()
        .map(|color| json!({"color": color, "number": 9}))
        .collect();
    let responses = run(
        &[json!({
            "msg": "ai_call",
            "level": 2,
            "last_move": [{"color": "Spade", "number": 7}],
            "your_cards": nines
        })],
        &AgentConfig::default(),
    );
    assert_eq!(responses[0]["cards"].as_array().map(Vec::len), Some(4));
}

#[test]
fn invalid_config_reports_its_path() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("bad.yaml");
    fs::write(&path, "strategy:\n  max_candidates: 0\n").expect("write config");

    let err = AgentConfig::from_path(&path).expect_err("zero cap rejected");
    assert!(matches!(err, ConfigError::Invalid { .. }));
    assert_eq!(err.path(), path.as_path());
    assert!(err.to_string().contains("strategy.max_candidates"));
}

#[test]
fn missing_config_is_a_read_error() {
    let dir = tempdir().expect("temp dir");
    let err = AgentConfig::from_path(dir.path().join("absent.yaml")).expect_err("missing");
    assert!(matches!(err, ConfigError::Read { .. }));
}
