use anyhow::{Result, bail};

use super::{AppConfig, defaults};

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let errors = collect_errors(cfg, cfg!(debug_assertions));

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

fn collect_errors(cfg: &AppConfig, debug_build: bool) -> Vec<String> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    if cfg.database.url.trim().is_empty() {
        errors.push("database.url must not be empty".to_string());
    }

    if cfg.database.max_connections == 0 {
        errors.push("database.max_connections must be > 0".to_string());
    }

    if cfg.database.min_idle > cfg.database.max_connections {
        errors.push(format!(
            "database.min_idle ({}) must be <= database.max_connections ({})",
            cfg.database.min_idle, cfg.database.max_connections
        ));
    }

    if cfg.session.secret.trim().is_empty() {
        errors.push("session.secret must not be empty".to_string());
    } else if !debug_build && cfg.session.secret == defaults::DEV_SESSION_SECRET {
        errors.push("session.secret must be set explicitly in release builds".to_string());
    }

    if cfg.session.ttl_secs == 0 {
        errors.push("session.ttl_secs must be > 0".to_string());
    }

    errors
}
