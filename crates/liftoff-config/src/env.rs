use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExpansionError {
    #[error("placeholder `{0}` is not scoped with `env.`")]
    Unscoped(String),

    #[error("environment variable `{0}` is not set and has no default")]
    Unset(String),
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\)\s*)?\}\}"#)
            .expect("placeholder pattern is valid")
    })
}

/// Substitute `{{ env.VAR }}` and `{{ env.VAR | default("x") }}` in one property value
///
/// Runs on already-parsed string values, so substituted text never needs
/// TOML quoting and placeholders inside comments are never seen.
pub fn expand_value(value: &str) -> Result<String, ExpansionError> {
    if !value.contains("{{") {
        return Ok(value.to_owned());
    }

    let mut expanded = String::with_capacity(value.len());
    let mut rest = 0;

    for captures in placeholder().captures_iter(value) {
        let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        expanded.push_str(&value[rest..whole.start()]);
        expanded.push_str(&resolve(key.as_str(), captures.get(2).map(|m| m.as_str()))?);
        rest = whole.end();
    }

    expanded.push_str(&value[rest..]);
    Ok(expanded)
}

fn resolve(key: &str, default: Option<&str>) -> Result<String, ExpansionError> {
    let name = key
        .strip_prefix("env.")
        .filter(|name| !name.is_empty() && !name.contains('.'))
        .ok_or_else(|| ExpansionError::Unscoped(key.to_owned()))?;

    match (std::env::var(name), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_owned()),
        (Err(_), None) => Err(ExpansionError::Unset(name.to_owned())),
    }
}
