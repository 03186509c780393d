use std::fs;

const CONFIG_PATH: &str = "src/default_config.toml";

fn main() {
    println!("cargo:rerun-if-changed={}", CONFIG_PATH);

    let content = fs::read_to_string(CONFIG_PATH).expect("Failed to read default_config.toml");
    let config = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    let spacing = section(&config, "spacing");
    for key in ["heading", "body"] {
        let height = string(spacing, "spacing", key);
        if !is_css_length(height) {
            panic!("spacing.{} must be a CSS length such as \"30px\", got {:?}", key, height);
        }
    }

    let highlight = section(&config, "highlight");
    if !matches!(highlight.get("enabled"), Some(toml::Value::Boolean(_))) {
        panic!("highlight.enabled must be a boolean");
    }
    if string(highlight, "highlight", "theme").is_empty() {
        panic!("highlight.theme must not be empty");
    }

    let clipboard = section(&config, "clipboard");
    let command = match clipboard.get("command") {
        Some(toml::Value::Array(items)) => items,
        _ => panic!("clipboard.command must be an array of strings"),
    };
    if command.is_empty() || !command.iter().all(|item| item.is_str()) {
        panic!("clipboard.command must name a program followed by string arguments");
    }
}

fn section<'a>(config: &'a toml::Table, name: &str) -> &'a toml::Table {
    match config.get(name) {
        Some(toml::Value::Table(table)) => table,
        _ => panic!("default_config.toml is missing the [{}] table", name),
    }
}

fn string<'a>(table: &'a toml::Table, section: &str, key: &str) -> &'a str {
    match table.get(key) {
        Some(toml::Value::String(value)) => value,
        _ => panic!("{}.{} must be a string", section, key),
    }
}

fn is_css_length(value: &str) -> bool {
    ["px", "em", "rem", "pt"].iter().any(|unit| {
        value
            .strip_suffix(unit)
            .is_some_and(|number| !number.is_empty() && number.parse::<f32>().is_ok_and(|n| n >= 0.0))
    })
}
