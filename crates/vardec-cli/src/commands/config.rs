//! `vardec config` command — get or set configuration values.
//!
//!   vardec config                        # dump full config as JSON
//!   vardec config tab_size               # get one value
//!   vardec config tab_size 2             # set it
//!   vardec config languages ts,go        # lists are comma-separated

use std::path::Path;

use vardec_core::config::{VardecConfig, CONFIG_DIR};

pub fn run(key: Option<String>, value: Option<String>) -> i32 {
    let cwd = match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("vardec config: failed to get current directory: {}", e);
            return 2;
        }
    };

    let config_dir = cwd.join(CONFIG_DIR);

    match (key, value) {
        (None, None) => dump_config(&config_dir),
        (Some(k), None) => get_config(&config_dir, &k),
        (Some(k), Some(v)) => set_config(&config_dir, &k, &v),
        (None, Some(_)) => {
            eprintln!("vardec config: value provided without key");
            2
        }
    }
}

fn dump_config(config_dir: &Path) -> i32 {
    let config = VardecConfig::load(config_dir);
    match serde_json::to_string_pretty(&config) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("vardec config: failed to serialize: {}", e);
            2
        }
    }
}

fn get_config(config_dir: &Path, key: &str) -> i32 {
    let config = VardecConfig::load(config_dir);
    let json_value = match serde_json::to_value(&config) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("vardec config: failed to serialize: {}", e);
            return 2;
        }
    };

    match json_value.get(key) {
        Some(v) => {
            let output = match v {
                serde_json::Value::String(s) => s.to_string(),
                other => other.to_string(),
            };
            println!("{}", output);
            0
        }
        None => {
            eprintln!("vardec config: unknown key '{}'", key);
            1
        }
    }
}

fn set_config(config_dir: &Path, key: &str, value: &str) -> i32 {
    let config = VardecConfig::load(config_dir);
    let mut json_value = match serde_json::to_value(&config) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("vardec config: failed to serialize: {}", e);
            return 2;
        }
    };

    let Some(slot) = json_value.get_mut(key) else {
        eprintln!("vardec config: unknown key '{}'", key);
        return 1;
    };
    let parsed = parse_value(slot, value);
    *slot = parsed;

    // Validate by deserializing back to VardecConfig
    let updated: VardecConfig = match serde_json::from_value(json_value) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("vardec config: invalid value for '{}': {}", key, e);
            return 1;
        }
    };

    match updated.save(config_dir) {
        Ok(()) => {
            eprintln!("vardec config: {} = {}", key, value);
            0
        }
        Err(e) => {
            eprintln!("vardec config: failed to write config: {}", e);
            2
        }
    }
}

/// Parse a command-line value into the JSON shape of the value it replaces.
fn parse_value(current: &serde_json::Value, value: &str) -> serde_json::Value {
    if current.is_array() {
        let items = value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| serde_json::Value::String(s.to_string()))
            .collect();
        return serde_json::Value::Array(items);
    }
    if current.is_string() {
        return serde_json::Value::String(value.to_string());
    }
    match value {
        "true" => serde_json::Value::Bool(true),
        "false" => serde_json::Value::Bool(false),
        _ => match value.parse::<u64>() {
            Ok(n) => serde_json::Value::Number(n.into()),
            Err(_) => serde_json::Value::String(value.to_string()),
        },
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
