//! Configuration precedence: defaults, then ACTLINE_CONFIG, then ACTLINE_* variables.

use actline_cli::run;
use serde_json::Value;
use serial_test::serial;
use std::io::Write;

const VARS: &[&str] = &[
    "ACTLINE_CONFIG",
    "ACTLINE_STACK_SIZE",
    "ACTLINE_SMALL_BLIND",
    "ACTLINE_BIG_BLIND",
    "ACTLINE_NUM_STREETS",
    "ACTLINE_WORKERS",
    "ACTLINE_AI",
    "ACTLINE_SEED",
];

fn clear_env() {
    for v in VARS {
        unsafe {
            std::env::remove_var(v);
        }
    }
}

fn cfg_json() -> (i32, Value, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(["actline", "cfg"], &mut out, &mut err);
    let stdout = String::from_utf8(out).unwrap();
    let json = serde_json::from_str(&stdout).unwrap_or(Value::Null);
    (code, json, String::from_utf8(err).unwrap())
}

#[test]
#[serial]
fn cfg_shows_defaults() {
    clear_env();
    let (code, json, _) = cfg_json();
    assert_eq!(code, 0);
    assert_eq!(json["stack_size"]["value"].as_u64(), Some(20000));
    assert_eq!(json["small_blind"]["value"].as_u64(), Some(50));
    assert_eq!(json["big_blind"]["value"].as_u64(), Some(100));
    assert_eq!(json["num_streets"]["value"].as_u64(), Some(4));
    assert_eq!(json["workers"]["value"].as_u64(), Some(1));
    assert_eq!(json["ai"]["value"].as_str(), Some("random"));
    assert!(json["seed"]["value"].is_null());
    for key in ["stack_size", "ai", "seed"] {
        assert_eq!(json[key]["source"].as_str(), Some("default"));
    }
}

#[test]
#[serial]
fn env_overrides_file() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "stack_size = 10000\nseed = 456\nai = \"passive\"").unwrap();
    unsafe {
        std::env::set_var("ACTLINE_CONFIG", file.path());
    }

    let (code, json, _) = cfg_json();
    assert_eq!(code, 0);
    assert_eq!(json["stack_size"]["value"].as_u64(), Some(10000));
    assert_eq!(json["stack_size"]["source"].as_str(), Some("file"));
    assert_eq!(json["seed"]["value"].as_u64(), Some(456));
    assert_eq!(json["ai"]["source"].as_str(), Some("file"));

    unsafe {
        std::env::set_var("ACTLINE_SEED", "123");
        std::env::set_var("ACTLINE_WORKERS", "3");
    }
    let (code, json, _) = cfg_json();
    assert_eq!(code, 0);
    assert_eq!(json["seed"]["value"].as_u64(), Some(123));
    assert_eq!(json["seed"]["source"].as_str(), Some("env"));
    assert_eq!(json["workers"]["value"].as_u64(), Some(3));
    assert_eq!(json["stack_size"]["source"].as_str(), Some("file"));
    clear_env();
}

#[test]
#[serial]
fn table_settings_reach_the_decoder() {
    clear_env();
    unsafe {
        std::env::set_var("ACTLINE_STACK_SIZE", "1000");
    }
    let mut out = Vec::new();
    let mut err = Vec::new();
    // an all-in call on a 1000-chip stack ends the betting
    let code = run(["actline", "decode", "b1000c"], &mut out, &mut err);
    clear_env();
    assert_eq!(code, 0, "{}", String::from_utf8_lossy(&err));
    let json: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["state"]["terminal"].as_str(), Some("all_in_runout"));
    assert_eq!(json["state"]["street"].as_u64(), Some(3));
}

#[test]
#[serial]
fn invalid_values_are_rejected() {
    clear_env();
    unsafe {
        std::env::set_var("ACTLINE_SEED", "not-a-number");
    }
    let (code, _, stderr) = cfg_json();
    assert_eq!(code, 2);
    assert!(stderr.contains("ACTLINE_SEED"), "{}", stderr);

    clear_env();
    unsafe {
        std::env::set_var("ACTLINE_SMALL_BLIND", "500");
    }
    let (code, _, stderr) = cfg_json();
    assert_eq!(code, 2);
    assert!(stderr.contains("Invalid blinds"), "{}", stderr);

    clear_env();
    unsafe {
        std::env::set_var("ACTLINE_STACK_SIZE", "4000000000");
    }
    let (code, _, stderr) = cfg_json();
    assert_eq!(code, 2);
    assert!(stderr.contains("exceeds the maximum"), "{}", stderr);
    clear_env();
}

#[test]
#[serial]
fn unknown_file_keys_are_rejected() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "level = 3").unwrap();
    unsafe {
        std::env::set_var("ACTLINE_CONFIG", file.path());
    }
    let (code, _, stderr) = cfg_json();
    clear_env();
    assert_eq!(code, 2);
    assert!(stderr.starts_with("Error: Configuration error:"), "{}", stderr);
}
