//! User configuration: logo list, orb count and loop tuning.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/logo-showcase/config.toml` (default
//! `~/.config/logo-showcase/config.toml`).  Unknown keys and unparsable
//! values are ignored; numeric values are clamped to their valid range.

use std::path::PathBuf;

use crate::core::logos::{default_logos, LogoReference};
use crate::core::orbs::DEFAULT_ORB_COUNT;
use crate::core::scroller::DEFAULT_MAX_COPIES;

// ───────────────────────────────────────── bounds ────────────

const ORB_COUNT_MAX: usize = 64;
const MAX_COPIES_MIN: usize = 2;
const MAX_COPIES_MAX: usize = 64;
const TICK_MS_MIN: u64 = 16;
const TICK_MS_MAX: u64 = 500;
const DEFAULT_TICK_MS: u64 = 33;

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Logo references in display order.
    pub logos: Vec<LogoReference>,
    /// Number of background orbs created at startup.
    pub orb_count: usize,
    /// Fixed RNG seed for reproducible orb layouts.
    pub seed: Option<u64>,
    /// Upper bound on loop copies reached through resize duplication.
    pub max_copies: usize,
    /// Redraw interval of the terminal host.
    pub tick_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logos: default_logos(),
            orb_count: DEFAULT_ORB_COUNT,
            seed: None,
            max_copies: DEFAULT_MAX_COPIES,
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

impl AppConfig {
    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Self::parse_config(&contents)
            }
            Err(_) => Self::default(),
        }
    }

    pub fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();

            match key.trim() {
                "logos" => {
                    let parsed: Vec<LogoReference> = value
                        .split(',')
                        .map(|part| part.trim().trim_matches('"'))
                        .filter(|part| !part.is_empty())
                        .map(LogoReference::from)
                        .collect();
                    // An explicit empty list is allowed: it leaves the scroller empty.
                    config.logos = parsed;
                }
                "orb_count" => {
                    if let Ok(v) = value.parse::<usize>() {
                        config.orb_count = v.min(ORB_COUNT_MAX);
                    }
                }
                "seed" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.seed = Some(v);
                    }
                }
                "max_copies" => {
                    if let Ok(v) = value.parse::<usize>() {
                        config.max_copies = v.clamp(MAX_COPIES_MIN, MAX_COPIES_MAX);
                    }
                }
                "tick_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.tick_ms = v.clamp(TICK_MS_MIN, TICK_MS_MAX);
                    }
                }
                _ => {}
            }
        }

        config
    }

    pub fn serialise(&self) -> String {
        let logos: Vec<&str> = self.logos.iter().map(LogoReference::as_str).collect();
        let mut lines = vec![
            "# logo-showcase configuration".to_string(),
            String::new(),
            "# Logos, in display order (comma separated)".to_string(),
            format!("logos = {}", logos.join(", ")),
            String::new(),
            "# Page".to_string(),
            format!("orb_count = {}", self.orb_count),
            format!("max_copies = {}", self.max_copies),
            format!("tick_ms = {}", self.tick_ms),
        ];
        if let Some(seed) = self.seed {
            lines.push(format!("seed = {seed}"));
        }
        lines.push(String::new());
        lines.join("\n")
    }

    /// Clamp values that came from outside the config file (CLI flags).
    pub fn clamped(mut self) -> Self {
        self.orb_count = self.orb_count.min(ORB_COUNT_MAX);
        self.max_copies = self.max_copies.clamp(MAX_COPIES_MIN, MAX_COPIES_MAX);
        self.tick_ms = self.tick_ms.clamp(TICK_MS_MIN, TICK_MS_MAX);
        self
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/logo-showcase/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("logo-showcase").join("config.toml")
}
