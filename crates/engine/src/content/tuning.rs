use serde::Deserialize;
use thiserror::Error;

/// Movement tuning for one actor class.
///
/// Defaults are the values the game shipped with. The horizontal clamp is
/// the only per-actor knob: heavier actors override it via
/// `with_max_move_speed`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MoveTuning {
    pub move_acceleration: f32,
    pub max_move_speed: f32,
    pub ground_drag_factor: f32,
    pub air_drag_factor: f32,
    pub gravity_acceleration: f32,
    pub max_fall_speed: f32,
    pub max_jump_time_seconds: f32,
    pub jump_launch_velocity: f32,
    pub jump_control_power: f32,
}

impl Default for MoveTuning {
    fn default() -> Self {
        Self {
            move_acceleration: 13000.0,
            max_move_speed: 1750.0,
            ground_drag_factor: 0.48,
            air_drag_factor: 0.58,
            gravity_acceleration: 3000.0,
            max_fall_speed: 550.0,
            max_jump_time_seconds: 0.35,
            jump_launch_velocity: -2500.0,
            jump_control_power: 0.14,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    #[error("max_jump_time_seconds must be > 0, got {value}")]
    NonPositiveMaxJumpTime { value: f32 },
    #[error("tuning field {field} must be finite")]
    NonFiniteField { field: &'static str },
}

impl MoveTuning {
    pub fn with_max_move_speed(mut self, max_move_speed: f32) -> Self {
        self.max_move_speed = max_move_speed;
        self
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Startup validation. A zero `max_jump_time_seconds` would divide to NaN
    /// inside the jump curve and corrupt positions, so it is rejected here
    /// rather than guarded per frame.
    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, value) in self.fields() {
            if !value.is_finite() {
                return Err(TuningError::NonFiniteField { field });
            }
        }
        if self.max_jump_time_seconds <= 0.0 {
            return Err(TuningError::NonPositiveMaxJumpTime {
                value: self.max_jump_time_seconds,
            });
        }
        Ok(())
    }

    fn fields(&self) -> [(&'static str, f32); 9] {
        [
            ("move_acceleration", self.move_acceleration),
            ("max_move_speed", self.max_move_speed),
            ("ground_drag_factor", self.ground_drag_factor),
            ("air_drag_factor", self.air_drag_factor),
            ("gravity_acceleration", self.gravity_acceleration),
            ("max_fall_speed", self.max_fall_speed),
            ("max_jump_time_seconds", self.max_jump_time_seconds),
            ("jump_launch_velocity", self.jump_launch_velocity),
            ("jump_control_power", self.jump_control_power),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        MoveTuning::default().validate().expect("defaults are valid");
    }

    #[test]
    fn zero_max_jump_time_is_a_startup_error() {
        let tuning = MoveTuning {
            max_jump_time_seconds: 0.0,
            ..MoveTuning::default()
        };
        assert_eq!(
            tuning.validate().expect_err("err"),
            TuningError::NonPositiveMaxJumpTime { value: 0.0 }
        );
    }

    #[test]
    fn non_finite_field_is_a_startup_error() {
        let tuning = MoveTuning {
            gravity_acceleration: f32::NAN,
            ..MoveTuning::default()
        };
        assert_eq!(
            tuning.validate().expect_err("err"),
            TuningError::NonFiniteField {
                field: "gravity_acceleration"
            }
        );
    }

    #[test]
    fn json_overrides_merge_over_defaults() {
        let tuning =
            MoveTuning::from_json_str(r#"{ "max_move_speed": 400.0 }"#).expect("tuning");
        assert_eq!(tuning.max_move_speed, 400.0);
        assert_eq!(tuning.gravity_acceleration, 3000.0);
    }

    #[test]
    fn unknown_json_field_is_rejected() {
        assert!(MoveTuning::from_json_str(r#"{ "gravity": 1.0 }"#).is_err());
    }

    #[test]
    fn with_max_move_speed_changes_only_the_clamp() {
        let tuning = MoveTuning::default().with_max_move_speed(400.0);
        assert_eq!(tuning.max_move_speed, 400.0);
        assert_eq!(
            tuning.move_acceleration,
            MoveTuning::default().move_acceleration
        );
    }
}
