//! Runtime configuration
//!
//! Built-in defaults, optionally overridden by `drift.toml` in the working
//! directory. Every key is optional.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

const CONFIG_FILE: &str = "drift.toml";

/// Scrolling and visibility tracking
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Fraction of a unit that must be on screen for it to become active
    pub visibility_threshold: f64,
    pub snap_duration_ms: u64,
    /// Idle time after wheel scrolling before snapping to a unit
    pub wheel_settle_ms: u64,
    pub wheel_step_rows: u16,
    pub footer_rows: u16,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: 0.6,
            snap_duration_ms: 180,
            wheel_settle_ms: 150,
            wheel_step_rows: 2,
            footer_rows: 3,
        }
    }
}

impl FeedConfig {
    pub fn snap_duration(&self) -> Duration {
        Duration::from_millis(self.snap_duration_ms)
    }

    pub fn wheel_settle(&self) -> Duration {
        Duration::from_millis(self.wheel_settle_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Debounce before an embedded player starts loading
    pub embed_load_delay_ms: u64,
    /// Host autoplay policy for direct video
    pub autoplay_allowed: bool,
    pub start_muted: bool,
    /// Duration of the progress sweep along the bottom of the active unit
    pub progress_sweep_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            embed_load_delay_ms: 100,
            autoplay_allowed: true,
            start_muted: true,
            progress_sweep_ms: 3000,
        }
    }
}

impl PlaybackConfig {
    pub fn embed_load_delay(&self) -> Duration {
        Duration::from_millis(self.embed_load_delay_ms)
    }

    pub fn progress_sweep(&self) -> Duration {
        Duration::from_millis(self.progress_sweep_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub tick_rate_ms: u64,
    /// How long status notices stay on screen
    pub notice_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            notice_ms: 5000,
        }
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn notice_lifetime(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub playback: PlaybackConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Load `drift.toml` if present, defaults otherwise
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        tracing::info!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let threshold = self.feed.visibility_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            bail!("feed.visibility_threshold must be in (0, 1], got {}", threshold);
        }
        if self.ui.tick_rate_ms == 0 {
            bail!("ui.tick_rate_ms must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.feed.visibility_threshold, 0.6);
        assert_eq!(config.playback.embed_load_delay(), Duration::from_millis(100));
        assert!(config.playback.start_muted);
        assert!(config.playback.autoplay_allowed);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [playback]
            autoplay_allowed = false

            [feed]
            snap_duration_ms = 0
            "#,
        )
        .unwrap();
        assert!(!config.playback.autoplay_allowed);
        assert_eq!(config.feed.snap_duration(), Duration::ZERO);
        assert_eq!(config.feed.visibility_threshold, 0.6);
        assert_eq!(config.ui.notice_ms, 5000);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        assert!(Config::from_toml_str("[feed]\nvisibility_threshold = 0.0").is_err());
        assert!(Config::from_toml_str("[feed]\nvisibility_threshold = 1.5").is_err());
        assert!(Config::from_toml_str("[feed]\nvisibility_threshold = 1.0").is_ok());
    }

    #[test]
    fn missing_file_is_default() {
        let config = Config::load_from(Path::new("definitely/not/here.toml")).unwrap();
        assert_eq!(config.ui.tick_rate_ms, 50);
    }
}
