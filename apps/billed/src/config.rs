use std::{
    fs, io,
    path::{Path, PathBuf},
};

use shared::domain::{UserKind, UserSession};
use storage::{default_bills_path, fixtures::FIXTURE_EMAIL};

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bills_path: PathBuf,
    pub user_type: UserKind,
    pub user_email: String,
    pub modal_width: f64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bills_path: default_bills_path(),
            user_type: UserKind::Employee,
            user_email: FIXTURE_EMAIL.into(),
            modal_width: 800.0,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn session(&self) -> UserSession {
        UserSession {
            kind: self.user_type,
            email: self.user_email.clone(),
        }
    }
}

/// Settings plus the values that were skipped while reading them. Loading
/// happens before the subscriber exists, so the caller logs these afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub warnings: Vec<String>,
}

/// Defaults, then `config_path` if it exists, then environment variables.
pub fn load_settings(config_path: &Path) -> LoadedSettings {
    let mut settings = Settings::default();
    let mut warnings = Vec::new();

    match fs::read_to_string(config_path) {
        Ok(raw) => apply_file(&mut settings, &raw, &mut warnings),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => warnings.push(format!("cannot read {}: {err}", config_path.display())),
    }
    apply_env(&mut settings, |key| std::env::var(key).ok(), &mut warnings);

    LoadedSettings { settings, warnings }
}

pub(crate) fn apply_file(settings: &mut Settings, raw: &str, warnings: &mut Vec<String>) {
    let table = match raw.parse::<toml::Table>() {
        Ok(table) => table,
        Err(err) => {
            warnings.push(format!("malformed config file: {err}"));
            return;
        }
    };

    if let Some(v) = table.get("bills_path").and_then(|v| v.as_str()) {
        settings.bills_path = PathBuf::from(v);
    }
    if let Some(v) = table.get("user_email").and_then(|v| v.as_str()) {
        settings.user_email = v.to_string();
    }
    if let Some(v) = table.get("user_type").and_then(|v| v.as_str()) {
        match v.parse::<UserKind>() {
            Ok(kind) => settings.user_type = kind,
            Err(err) => warnings.push(format!("user_type: {err}")),
        }
    }
    if let Some(v) = table.get("modal_width") {
        match v.as_float().or_else(|| v.as_integer().map(|i| i as f64)) {
            Some(width) => settings.modal_width = width,
            None => warnings.push(format!("modal_width is not a number: {v}")),
        }
    }
    if let Some(v) = table.get("log_filter").and_then(|v| v.as_str()) {
        settings.log_filter = v.to_string();
    }
}

pub(crate) fn apply_env(
    settings: &mut Settings,
    var: impl Fn(&str) -> Option<String>,
    warnings: &mut Vec<String>,
) {
    if let Some(v) = var("BILLED_BILLS_PATH") {
        settings.bills_path = PathBuf::from(v);
    }
    if let Some(v) = var("APP__BILLS_PATH") {
        settings.bills_path = PathBuf::from(v);
    }

    // Whole session blob first so the finer-grained keys can override it.
    if let Some(v) = var("APP__SESSION") {
        match UserSession::from_json(&v) {
            Ok(session) => {
                settings.user_type = session.kind;
                settings.user_email = session.email;
            }
            Err(err) => warnings.push(format!("APP__SESSION: {err}")),
        }
    }
    if let Some(v) = var("APP__USER_EMAIL") {
        settings.user_email = v;
    }
    if let Some(v) = var("APP__USER_TYPE") {
        match v.parse::<UserKind>() {
            Ok(kind) => settings.user_type = kind,
            Err(err) => warnings.push(format!("APP__USER_TYPE: {err}")),
        }
    }

    if let Some(v) = var("APP__MODAL_WIDTH") {
        match v.parse::<f64>() {
            Ok(parsed) => settings.modal_width = parsed,
            Err(err) => warnings.push(format!("APP__MODAL_WIDTH={v}: {err}")),
        }
    }

    if let Some(v) = var("RUST_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = var("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
