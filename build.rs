use std::env;
use std::fs;
use std::path::Path;

// Claves que AppConfig::from_env() lee con option_env!
const CONFIG_KEYS: &[&str] = &[
    "API_BASE_URL",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "NETWORK_TIMEOUT_SECONDS",
    "TOKEN_REFRESH_MINUTES",
    "SEARCH_DEBOUNCE_MS",
    "SEARCH_SUGGESTION_LIMIT",
    "CATALOG_PAGE_SIZE",
    "CART_MAX_QUANTITY",
];

fn main() {
    let env_file = Path::new(".env");

    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    match fs::read_to_string(env_file) {
        Ok(contents) => {
            println!("cargo:rerun-if-changed=.env");
            for (key, value) in contents.lines().filter_map(parse_line) {
                if !CONFIG_KEYS.contains(&key) {
                    println!("cargo:warning=Unknown key {} in .env, ignored", key);
                    continue;
                }
                // La variable de entorno real tiene prioridad sobre .env
                if env::var(key).is_err() {
                    println!("cargo:rustc-env={}={}", key, value);
                }
            }
        }
        Err(_) => {
            println!("cargo:warning=No .env file found, using defaults (API_BASE_URL=http://127.0.0.1:8000)");
        }
    }

    println!("cargo:rerun-if-changed=build.rs");
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    let value = value.trim().trim_matches('"');
    Some((key.trim(), value))
}
