//! Match configuration and variant presets
//!
//! Fixed at initialization; a running match never sees its configuration change.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Rgb;

/// Which game the arena plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Two vertical paddles, first to the win score
    #[default]
    #[value(alias = "pong", alias = "2p")]
    TwoPlayer,
    /// One horizontal paddle at the bottom, limited lives
    #[value(alias = "1p")]
    Squash,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::TwoPlayer => "two-player",
            Variant::Squash => "squash",
        }
    }

    /// Stock configuration for this variant
    pub fn preset(&self) -> Config {
        match self {
            Variant::TwoPlayer => Config::two_player(),
            Variant::Squash => Config::squash(),
        }
    }
}

/// Rejected configuration, reported when a match is constructed
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("playfield must be within 1..={max} per side, got {width}x{height}", max = MAX_PLAYFIELD)]
    Playfield { width: i32, height: i32 },
    #[error("paddle must be positive, got {width}x{height}")]
    PaddleSize { width: i32, height: i32 },
    #[error("paddle does not fit the playfield (inset {inset})")]
    PaddleOutOfField { inset: i32 },
    #[error("ball radius must be positive, got {0}")]
    BallRadius(i32),
    #[error("ball of diameter {diameter} does not fit a {width}x{height} playfield")]
    BallOutOfField { diameter: i32, width: i32, height: i32 },
    #[error("velocity range {min}..={max} must satisfy 0 < min <= max")]
    VelocityRange { min: i32, max: i32 },
    #[error("max velocity {max} would tunnel through a body {limit} px thick")]
    VelocityTooFast { max: i32, limit: i32 },
    #[error("pause of {0} ms exceeds {max} ms", max = MAX_PAUSE_MS)]
    PauseTooLong(u64),
    #[error("tick rate must be non-zero")]
    TickRate,
    #[error("terminal threshold must be non-zero for {0:?}")]
    Threshold(Variant),
    #[error("tally does not fit a {0:?} match")]
    TallyMismatch(Variant),
    #[error("config file is for {file:?} but {requested:?} was requested")]
    VariantMismatch { requested: Variant, file: Variant },
    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable configuration of one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub variant: Variant,

    // === Playfield ===
    pub width: i32,
    pub height: i32,

    // === Paddles ===
    pub paddle_width: i32,
    pub paddle_height: i32,
    /// Gap between a paddle and the wall it guards
    pub paddle_inset: i32,
    pub paddle_color: Rgb,

    // === Ball ===
    pub ball_radius: i32,
    pub ball_color: Rgb,

    // === Velocity bounds (pixels/tick) ===
    /// Smallest launch magnitude per axis
    pub min_velocity: i32,
    /// Largest launch magnitude per axis, also the paddle speed
    pub max_velocity: i32,

    // === Terminal thresholds ===
    /// Points needed to win (two-player)
    pub win_score: u32,
    /// Lives at match start (squash)
    pub starting_lives: u32,

    // === Timing ===
    pub pause_ms: u64,
    pub tick_rate: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self::two_player()
    }
}

impl Config {
    /// Classic two-player Pong
    pub fn two_player() -> Self {
        Self {
            variant: Variant::TwoPlayer,
            width: PONG_WIDTH,
            height: PONG_HEIGHT,
            paddle_width: PONG_PADDLE_WIDTH,
            paddle_height: PONG_PADDLE_HEIGHT,
            paddle_inset: PONG_PADDLE_INSET,
            paddle_color: PADDLE_COLOR,
            ball_radius: BALL_RADIUS,
            ball_color: BALL_COLOR,
            min_velocity: PONG_MIN_VELOCITY,
            max_velocity: PONG_MAX_VELOCITY,
            win_score: PONG_WIN_SCORE,
            starting_lives: 0,
            pause_ms: RESTART_PAUSE_MS,
            tick_rate: TICK_RATE,
        }
    }

    /// Single-player squash
    pub fn squash() -> Self {
        Self {
            variant: Variant::Squash,
            width: SQUASH_WIDTH,
            height: SQUASH_HEIGHT,
            paddle_width: SQUASH_PADDLE_WIDTH,
            paddle_height: SQUASH_PADDLE_HEIGHT,
            paddle_inset: SQUASH_PADDLE_INSET,
            paddle_color: PADDLE_COLOR,
            ball_radius: BALL_RADIUS,
            ball_color: BALL_COLOR,
            min_velocity: SQUASH_MIN_VELOCITY,
            max_velocity: SQUASH_MAX_VELOCITY,
            win_score: 0,
            starting_lives: SQUASH_LIVES,
            pause_ms: RESTART_PAUSE_MS,
            tick_rate: TICK_RATE,
        }
    }

    /// Load a configuration from JSON.
    ///
    /// Fields the document leaves out fall back to the preset of its
    /// `variant` (two-player when that is missing too). Unknown keys are
    /// rejected.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::overlay(None, json)
    }

    /// Load a JSON override on top of `variant`'s preset. A document that
    /// names a different variant is rejected.
    pub fn from_json_for(variant: Variant, json: &str) -> Result<Self, ConfigError> {
        Self::overlay(Some(variant), json)
    }

    fn overlay(requested: Option<Variant>, json: &str) -> Result<Self, ConfigError> {
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let file_variant = match overrides.get("variant") {
            Some(v) => Some(serde_json::from_value::<Variant>(v.clone())?),
            None => None,
        };
        let variant = match (requested, file_variant) {
            (Some(requested), Some(file)) if requested != file => {
                return Err(ConfigError::VariantMismatch { requested, file });
            }
            (Some(variant), _) | (None, Some(variant)) => variant,
            (None, None) => Variant::default(),
        };

        let mut merged = serde_json::to_value(variant.preset())?;
        if let (Some(base), Some(patch)) = (merged.as_object_mut(), overrides.as_object()) {
            for (key, value) in patch {
                base.insert(key.clone(), value.clone());
            }
        }

        let config: Config = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every construction precondition. A config that passes keeps
    /// all tick-time arithmetic far from `i32`/`u64` limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let playfield = 1..=MAX_PLAYFIELD;
        if !playfield.contains(&self.width) || !playfield.contains(&self.height) {
            return Err(ConfigError::Playfield {
                width: self.width,
                height: self.height,
            });
        }
        if self.paddle_width <= 0 || self.paddle_height <= 0 {
            return Err(ConfigError::PaddleSize {
                width: self.paddle_width,
                height: self.paddle_height,
            });
        }
        if self.ball_radius <= 0 {
            return Err(ConfigError::BallRadius(self.ball_radius));
        }

        let diameter = self.ball_radius.saturating_mul(2);
        if diameter > self.width || diameter > self.height {
            return Err(ConfigError::BallOutOfField {
                diameter,
                width: self.width,
                height: self.height,
            });
        }

        let paddle_fits = self.paddle_inset >= 0
            && match self.variant {
                Variant::TwoPlayer => {
                    self.paddle_inset
                        .checked_add(self.paddle_width)
                        .and_then(|span| span.checked_mul(2))
                        .is_some_and(|span| span <= self.width)
                        && self.paddle_height <= self.height
                }
                Variant::Squash => {
                    self.paddle_inset
                        .checked_add(self.paddle_height)
                        .is_some_and(|span| span <= self.height)
                        && self.paddle_width <= self.width
                }
            };
        if !paddle_fits {
            return Err(ConfigError::PaddleOutOfField {
                inset: self.paddle_inset,
            });
        }

        if self.min_velocity <= 0 || self.min_velocity > self.max_velocity {
            return Err(ConfigError::VelocityRange {
                min: self.min_velocity,
                max: self.max_velocity,
            });
        }
        // One tick must not carry the ball across a paddle or its own size
        let limit = diameter.min(self.paddle_thickness());
        if self.max_velocity > limit {
            return Err(ConfigError::VelocityTooFast {
                max: self.max_velocity,
                limit,
            });
        }

        if self.tick_rate == 0 {
            return Err(ConfigError::TickRate);
        }
        if self.pause_ms > MAX_PAUSE_MS {
            return Err(ConfigError::PauseTooLong(self.pause_ms));
        }

        let threshold = match self.variant {
            Variant::TwoPlayer => self.win_score,
            Variant::Squash => self.starting_lives,
        };
        if threshold == 0 {
            return Err(ConfigError::Threshold(self.variant));
        }

        Ok(())
    }

    /// Paddle extent along the ball's approach axis
    #[inline]
    pub fn paddle_thickness(&self) -> i32 {
        match self.variant {
            Variant::TwoPlayer => self.paddle_width,
            Variant::Squash => self.paddle_height,
        }
    }

    #[inline]
    pub fn ball_diameter(&self) -> i32 {
        2 * self.ball_radius
    }

    /// Ball rest position (playfield center)
    #[inline]
    pub fn ball_center(&self) -> (i32, i32) {
        (self.width / 2, self.height / 2)
    }

    /// Reset pause converted to simulation ticks (rounded up)
    pub fn pause_ticks(&self) -> u64 {
        self.pause_ms
            .saturating_mul(u64::from(self.tick_rate))
            .div_ceil(1000)
    }

    /// Wall-clock length of one tick
    pub fn tick_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.tick_rate as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(Config::two_player().validate().is_ok());
        assert!(Config::squash().validate().is_ok());
    }

    #[test]
    fn test_variant_from_cli_value() {
        assert_eq!(Variant::from_str("squash", true), Ok(Variant::Squash));
        assert_eq!(Variant::from_str("pong", true), Ok(Variant::TwoPlayer));
        assert!(Variant::from_str("chess", true).is_err());
        assert_eq!(
            Variant::from_str(Variant::TwoPlayer.as_str(), false),
            Ok(Variant::TwoPlayer)
        );
    }

    #[test]
    fn test_pause_ticks() {
        let config = Config::two_player();
        assert_eq!(config.pause_ticks(), 120);

        let config = Config {
            pause_ms: 10,
            tick_rate: 60,
            ..Config::two_player()
        };
        // 0.6 ticks rounds up to a full tick
        assert_eq!(config.pause_ticks(), 1);
    }

    #[test]
    fn test_rejects_non_positive_playfield() {
        let config = Config {
            width: 0,
            ..Config::two_player()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Playfield { width: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_bad_velocity_range() {
        let config = Config {
            min_velocity: 6,
            ..Config::two_player()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::VelocityRange { min: 6, max: 5 })
        ));

        let config = Config {
            min_velocity: 0,
            ..Config::squash()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_ball_and_paddle() {
        let config = Config {
            ball_radius: 300,
            ..Config::two_player()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BallOutOfField { .. })
        ));

        let config = Config {
            paddle_inset: 470,
            ..Config::squash()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PaddleOutOfField { inset: 470 })
        ));
    }

    #[test]
    fn test_rejects_oversized_playfield() {
        let config = Config {
            width: i32::MAX,
            ..Config::two_player()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Playfield { .. })
        ));
    }

    #[test]
    fn test_huge_ball_radius_is_an_error() {
        let config = Config {
            ball_radius: i32::MAX,
            ..Config::two_player()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BallOutOfField { .. })
        ));
    }

    #[test]
    fn test_huge_paddle_is_an_error() {
        let config = Config {
            paddle_inset: i32::MAX,
            ..Config::two_player()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PaddleOutOfField { .. })
        ));

        let config = Config {
            paddle_height: i32::MAX,
            ..Config::squash()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PaddleOutOfField { .. })
        ));
    }

    #[test]
    fn test_rejects_tunnelling_velocity() {
        let config = Config {
            min_velocity: i32::MAX,
            max_velocity: i32::MAX,
            ..Config::two_player()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::VelocityTooFast { limit: 15, .. })
        ));

        // Squash paddle is 15 px tall
        let config = Config {
            max_velocity: 16,
            ..Config::squash()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::VelocityTooFast { max: 16, limit: 15 })
        ));

        let config = Config {
            max_velocity: 15,
            ..Config::squash()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_long_pause() {
        let config = Config {
            pause_ms: u64::MAX,
            ..Config::two_player()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PauseTooLong(u64::MAX))
        ));

        let config = Config {
            pause_ms: MAX_PAUSE_MS,
            tick_rate: u32::MAX,
            ..Config::two_player()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.pause_ticks(), 3_600 * u64::from(u32::MAX));
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let config = Config {
            starting_lives: 0,
            ..Config::squash()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Threshold(Variant::Squash))
        ));
    }

    #[test]
    fn test_from_json_fills_from_variant_preset() {
        let config = Config::from_json(r#"{ "variant": "squash", "starting_lives": 5 }"#)
            .expect("valid override");
        assert_eq!(config.variant, Variant::Squash);
        assert_eq!(config.starting_lives, 5);
        assert_eq!(config.width, SQUASH_WIDTH);
        assert_eq!(config.max_velocity, SQUASH_MAX_VELOCITY);

        let config = Config::from_json("{}").expect("empty override");
        assert_eq!(config, Config::two_player());
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            Config::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{ "height": -1 }"#),
            Err(ConfigError::Playfield { .. })
        ));
        assert!(matches!(
            Config::from_json(r#"{ "pause_ms": 18446744073709551615 }"#),
            Err(ConfigError::PauseTooLong(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_unknown_keys() {
        assert!(matches!(
            Config::from_json(r#"{ "pause_msec": 10 }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_from_json_for_variant() {
        let config = Config::from_json_for(Variant::Squash, r#"{ "starting_lives": 5 }"#)
            .expect("valid override");
        assert_eq!(config.variant, Variant::Squash);
        assert_eq!(config.starting_lives, 5);
        assert_eq!(config.paddle_width, SQUASH_PADDLE_WIDTH);

        let config = Config::from_json_for(Variant::Squash, r#"{ "variant": "squash" }"#)
            .expect("matching variant");
        assert_eq!(config, Config::squash());

        assert!(matches!(
            Config::from_json_for(Variant::TwoPlayer, r#"{ "variant": "squash" }"#),
            Err(ConfigError::VariantMismatch {
                requested: Variant::TwoPlayer,
                file: Variant::Squash
            })
        ));
    }
}
