//! Sandbox settings
//!
//! Loaded from an optional JSON file in the working directory. Missing fields
//! fall back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use glam::Vec2;

use crate::error::SettingsError;
use crate::sim::Rect;

/// Sandbox tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    /// Logical window width in pixels (also the field width)
    pub window_width: u32,
    /// Logical window height in pixels (field + inventory strip)
    pub window_height: u32,

    // === Balls ===
    /// Number of balls in play (field + inventory)
    pub initial_balls: usize,
    /// Radius range for spawned balls (min, max)
    pub ball_radius_range: (f32, f32),
    /// Speed range for spawned balls in pixels/s (min, max)
    pub ball_speed_range: (f32, f32),
    /// RNG seed; `None` picks one from the clock at startup
    pub seed: Option<u64>,

    // === Vacuum ===
    /// Capture radius around the cursor
    pub capture_radius: f32,
    /// Flick velocity divisor applied when releasing a ball
    pub spit_speed_divisor: f32,
    /// Flicks slower than this release with a random velocity instead
    pub min_flick_speed: f32,

    // === Inventory strip ===
    pub inventory_strip_height: f32,
    pub inventory_slot_size: f32,
    pub inventory_padding: f32,

    // === Delete zone ===
    /// Delete zone size (width, height)
    pub delete_zone_size: (f32, f32),
    /// Distance between the delete zone and the field's bottom right corner
    pub delete_zone_margin: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 1100,
            window_height: 720,

            initial_balls: 35,
            ball_radius_range: (12.0, 24.0),
            ball_speed_range: (50.0, 150.0),
            seed: None,

            capture_radius: 80.0,
            spit_speed_divisor: 8.0,
            min_flick_speed: 20.0,

            inventory_strip_height: 130.0,
            inventory_slot_size: 56.0,
            inventory_padding: 20.0,

            delete_zone_size: (150.0, 90.0),
            delete_zone_margin: 24.0,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path`, or defaults if the file does not exist
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::info!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Height of the playfield (window minus inventory strip)
    pub fn field_height(&self) -> f32 {
        (self.window_height as f32 - self.inventory_strip_height).max(1.0)
    }

    /// Playfield rectangle, anchored at the window origin
    pub fn field_rect(&self) -> Rect {
        Rect::from_size(self.window_width as f32, self.field_height())
    }

    /// Delete zone, anchored to the bottom-right corner of the field
    pub fn delete_zone_rect(&self) -> Rect {
        let width = self.window_width as f32;
        let height = self.field_height();
        let (zone_w, zone_h) = self.delete_zone_size;
        let margin = self.delete_zone_margin;
        Rect::new(
            Vec2::new(width - zone_w - margin, height - zone_h - margin),
            Vec2::new(width - margin, height - margin),
        )
    }

    /// Reject settings the simulation cannot honor
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: String| Err(SettingsError::Invalid(msg));

        if self.window_width == 0 || self.window_height == 0 {
            return invalid("window size must be non-zero".into());
        }
        if self.inventory_strip_height < 0.0
            || self.inventory_strip_height >= self.window_height as f32
        {
            return invalid(format!(
                "inventory_strip_height {} must be in [0, {})",
                self.inventory_strip_height, self.window_height
            ));
        }
        let (r_min, r_max) = self.ball_radius_range;
        if !(r_min > 0.0 && r_min <= r_max) {
            return invalid(format!("ball_radius_range ({r_min}, {r_max}) is not a positive range"));
        }
        let (s_min, s_max) = self.ball_speed_range;
        if !(s_min >= 0.0 && s_min <= s_max) {
            return invalid(format!("ball_speed_range ({s_min}, {s_max}) is not a valid range"));
        }
        if self.capture_radius < 0.0 {
            return invalid("capture_radius must not be negative".into());
        }
        if self.spit_speed_divisor <= 0.0 {
            return invalid("spit_speed_divisor must be positive".into());
        }
        if self.inventory_slot_size <= 0.0 {
            return invalid("inventory_slot_size must be positive".into());
        }

        let (zw, zh) = self.delete_zone_size;
        if zw <= 0.0 || zh <= 0.0 {
            return invalid("delete_zone_size must be positive".into());
        }
        if self.delete_zone_margin < 0.0 {
            return invalid("delete_zone_margin must not be negative".into());
        }

        // Respawns need a spot for the largest ball whose center is outside the zone.
        let field = self.field_rect();
        if field.width() < 2.0 * r_max || field.height() < 2.0 * r_max {
            return invalid(format!("field is too small for balls of radius {r_max}"));
        }
        let zone = self.delete_zone_rect();
        if field.inset(r_max).corners().iter().all(|&c| zone.contains(c)) {
            return invalid("delete zone leaves no room on the field for respawns".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.field_height(), 590.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "initial_balls": 12, "seed": 7 }"#).unwrap();
        assert_eq!(settings.initial_balls, 12);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.capture_radius, Settings::default().capture_radius);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            seed: Some(42),
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_bad_radius_range() {
        let err = Settings::from_json(r#"{ "ball_radius_range": [10.0, 5.0] }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_rejects_strip_taller_than_window() {
        let settings = Settings {
            inventory_strip_height: 800.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_delete_zone_covering_field() {
        let settings = Settings {
            delete_zone_size: (2000.0, 2000.0),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_delete_zone_leaving_no_respawn_room() {
        // A thin band above the zone, narrower than the smallest ball
        let settings = Settings {
            ball_radius_range: (20.0, 24.0),
            delete_zone_size: (1100.0, 570.0),
            delete_zone_margin: 0.0,
            ..Default::default()
        };
        assert_eq!(settings.delete_zone_rect().min, Vec2::new(0.0, 20.0));
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_accepts_delete_zone_with_band_for_largest_ball() {
        let settings = Settings {
            ball_radius_range: (20.0, 24.0),
            delete_zone_size: (1100.0, 560.0),
            delete_zone_margin: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_delete_zone_margin() {
        let settings = Settings {
            delete_zone_margin: -10.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_field_smaller_than_a_ball() {
        let settings = Settings {
            window_height: 170,
            ..Default::default()
        };
        // 170 - 130 leaves a 40px field for radius 24
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_default_zone_rect() {
        let zone = Settings::default().delete_zone_rect();
        assert_eq!(zone.min, Vec2::new(926.0, 476.0));
        assert_eq!(zone.max, Vec2::new(1076.0, 566.0));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load(Path::new("definitely/not/here.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
