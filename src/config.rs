//! User configuration — carousel timings, card geometry, and display.
//!
//! Stored as TOML at `$XDG_CONFIG_HOME/reel/config.toml`
//! (default `~/.config/reel/config.toml`).  Every field has a default, so
//! a partial file only overrides what it names.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ───────────────────────────────────────── carousel ──────────

/// Timing and gesture constants for the continuity controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselSettings {
    /// Scroll-end debounce before a continuity correction may run.
    pub quiescence_ms: u64,
    /// Wheel-end debounce before snap is re-enabled.
    pub wheel_quiescence_ms: u64,
    /// Assumed duration of a smooth scroll.  A heuristic, not a guarantee.
    pub settle_ms: u64,
    /// Length of the smooth-scroll animation itself.
    pub scroll_animation_ms: u64,
    pub auto_advance_ms: u64,
    pub auto_advance: bool,
    /// Delay before the first positioning, once layout has settled.
    pub init_delay_ms: u64,
    /// Offsets below this jump to the middle copy on init/resize.
    pub init_jump_threshold_px: f64,
    pub drag_threshold_px: f64,
    pub drag_speed: f64,
    /// Animation frames to wait before restoring transitions after a warp.
    pub restore_frames: u8,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            quiescence_ms: 60,
            wheel_quiescence_ms: 150,
            settle_ms: 800,
            scroll_animation_ms: 600,
            auto_advance_ms: 5000,
            auto_advance: true,
            init_delay_ms: 10,
            init_jump_threshold_px: 50.0,
            drag_threshold_px: 5.0,
            drag_speed: 2.0,
            restore_frames: 2,
        }
    }
}

impl CarouselSettings {
    pub fn quiescence(&self) -> Duration {
        Duration::from_millis(self.quiescence_ms)
    }

    pub fn wheel_quiescence(&self) -> Duration {
        Duration::from_millis(self.wheel_quiescence_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn scroll_animation(&self) -> Duration {
        Duration::from_millis(self.scroll_animation_ms)
    }

    pub fn auto_advance_period(&self) -> Duration {
        Duration::from_millis(self.auto_advance_ms)
    }

    pub fn init_delay(&self) -> Duration {
        Duration::from_millis(self.init_delay_ms)
    }
}

// ───────────────────────────────────────── track / display ───

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackSettings {
    pub card_width_px: f64,
    pub gap_px: f64,
}

impl Default for TrackSettings {
    fn default() -> Self {
        Self {
            card_width_px: 320.0,
            gap_px: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Horizontal pixels represented by one terminal column.
    pub px_per_cell: f64,
    pub fps: u32,
    /// Pixels scrolled per mouse-wheel notch.
    pub wheel_step_px: f64,
    /// Magnification easing per frame; higher settles faster.
    pub magnify_speed: f64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            px_per_cell: 8.0,
            fps: 30,
            wheel_step_px: 120.0,
            magnify_speed: 0.35,
        }
    }
}

impl DisplaySettings {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }
}

// ───────────────────────────────────────── config ────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub carousel: CarouselSettings,
    pub track: TrackSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl AppConfig {
    /// Load config from `explicit`, or from the default location.
    ///
    /// A missing file at the default location means defaults; a missing
    /// explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let p = config_path();
                if !p.exists() {
                    tracing::debug!("no config at {}, using defaults", p.display());
                    return Ok(Self::default());
                }
                p
            }
        };

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse(&contents, &path)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controller cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });
        let c = &self.carousel;
        if c.auto_advance_ms == 0 {
            return invalid("carousel.auto_advance_ms", "must be greater than zero");
        }
        if c.quiescence_ms == 0 {
            return invalid("carousel.quiescence_ms", "must be greater than zero");
        }
        if !(c.drag_speed > 0.0) {
            return invalid("carousel.drag_speed", "must be positive");
        }
        if c.drag_threshold_px < 0.0 {
            return invalid("carousel.drag_threshold_px", "must not be negative");
        }
        if c.restore_frames == 0 {
            return invalid("carousel.restore_frames", "must be at least 1");
        }
        if !(self.track.card_width_px > 0.0) {
            return invalid("track.card_width_px", "must be positive");
        }
        if self.track.gap_px < 0.0 {
            return invalid("track.gap_px", "must not be negative");
        }
        let d = &self.display;
        if !(d.px_per_cell > 0.0) {
            return invalid("display.px_per_cell", "must be positive");
        }
        if d.fps == 0 || d.fps > 240 {
            return invalid("display.fps", "must be between 1 and 240");
        }
        if !(d.magnify_speed > 0.0 && d.magnify_speed < 1.0) {
            return invalid("display.magnify_speed", "must be between 0 and 1");
        }
        Ok(())
    }

    /// Effective configuration as TOML.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/reel/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("reel").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::parse(s, Path::new("config.toml"))
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.carousel.settle(), Duration::from_millis(800));
        assert_eq!(config.carousel.drag_threshold_px, 5.0);
    }

    #[test]
    fn partial_sections_override_only_named_fields() {
        let config = parse(
            r#"
            [carousel]
            settle_ms = 650
            auto_advance = false

            [display]
            fps = 60
            "#,
        )
        .unwrap();
        assert_eq!(config.carousel.settle_ms, 650);
        assert!(!config.carousel.auto_advance);
        assert_eq!(config.carousel.quiescence_ms, 60);
        assert_eq!(config.display.fps, 60);
        assert_eq!(config.display.frame_interval(), Duration::from_millis(16));
        assert_eq!(config.track, TrackSettings::default());
    }

    #[test]
    fn rejects_unusable_values() {
        let err = parse("[display]\nfps = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "display.fps", .. }));

        let err = parse("[carousel]\ndrag_speed = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "carousel.drag_speed", .. }));

        let err = parse("[carousel]\nauto_advance_ms = 0").unwrap_err();
        assert!(err.to_string().contains("auto_advance_ms"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = parse("[carousel\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn serialised_config_parses_back() {
        let mut config = AppConfig::default();
        config.track.gap_px = 32.0;
        let text = config.to_toml().unwrap();
        assert!(text.contains("[carousel]"));
        assert_eq!(parse(&text).unwrap(), config);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/no/such/reel.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
