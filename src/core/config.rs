use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunables for horizontal movement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Blend rate toward the target speed while input is held.
    pub accel_rate: f32,
    pub ground_decel_rate: f32,
    pub air_decel_rate: f32,
    /// Fraction of control kept while pushing into a wall mid-air.
    pub wall_control_factor: f32,
    /// Speed factor applied while the Shrink ability is active.
    pub shrink_speed_factor: f32,
    /// Speed factor applied while the BouncyBall ability is active.
    pub bouncy_speed_factor: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 200.0,
            run_speed: 320.0,
            accel_rate: 10.0,
            ground_decel_rate: 15.0,
            air_decel_rate: 5.0,
            wall_control_factor: 0.3,
            shrink_speed_factor: 1.2,
            bouncy_speed_factor: 1.5,
        }
    }
}

/// Tunables for the single jump.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    pub jump_power: f32,
    /// Grace window after leaving the ground during which a jump is still
    /// permitted.
    pub coyote_time: f32,
    /// Grace window during which a jump request is remembered and honored
    /// on landing.
    pub jump_buffer_time: f32,
    /// Power factor applied while IronBlock is active.
    pub iron_block_factor: f32,
    /// Power factor applied while Shrink is active.
    pub shrink_factor: f32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            jump_power: 400.0,
            coyote_time: 0.1,
            jump_buffer_time: 0.1,
            iron_block_factor: 0.6,
            shrink_factor: 0.8,
        }
    }
}

/// Tunables for the double jump.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoubleJumpConfig {
    pub first_jump_power: f32,
    pub second_jump_power: f32,
    pub coyote_time: f32,
    pub jump_buffer_time: f32,
    /// Minimum spacing between the two jumps, guards against double-fires.
    pub jump_cooldown: f32,
    /// Fraction of upward velocity preserved when the second jump fires.
    pub keep_upward_fraction: f32,
    pub air_control_multiplier: f32,
    pub air_control_rate: f32,
    /// Ground speed the airborne control blends toward.
    pub air_move_speed: f32,
    pub iron_block_factor: f32,
    pub shrink_factor: f32,
}

impl Default for DoubleJumpConfig {
    fn default() -> Self {
        Self {
            first_jump_power: 400.0,
            second_jump_power: 400.0,
            coyote_time: 0.1,
            jump_buffer_time: 0.1,
            jump_cooldown: 0.1,
            keep_upward_fraction: 0.2,
            air_control_multiplier: 0.8,
            air_control_rate: 5.0,
            air_move_speed: 200.0,
            iron_block_factor: 0.6,
            shrink_factor: 0.8,
        }
    }
}

/// Tunables for the dash.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub dash_impulse: f32,
    pub cooldown: f32,
    pub dash_duration: f32,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            dash_impulse: 600.0,
            cooldown: 1.0,
            dash_duration: 0.15,
        }
    }
}

/// Tunables for the iron block.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IronBlockConfig {
    pub mass_multiplier: f32,
    pub gravity_multiplier: f32,
}

impl Default for IronBlockConfig {
    fn default() -> Self {
        Self {
            mass_multiplier: 3.0,
            gravity_multiplier: 1.0,
        }
    }
}

/// Tunables for the balloon glide.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalloonConfig {
    /// Gravity scale factor while gliding.
    pub glide_gravity_scale: f32,
    /// Maximum downward speed while gliding.
    pub max_fall_speed: f32,
}

impl Default for BalloonConfig {
    fn default() -> Self {
        Self {
            glide_gravity_scale: 0.3,
            max_fall_speed: 100.0,
        }
    }
}

/// Tunables for the gravity flip.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityFlipConfig {
    pub flip_cooldown: f32,
}

impl Default for GravityFlipConfig {
    fn default() -> Self {
        Self {
            flip_cooldown: 0.5,
        }
    }
}

/// Tunables for the ice block slide.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IceBlockConfig {
    /// Fraction of drag and surface friction removed while enabled.
    pub friction_reduction: f32,
    pub slide_speed_multiplier: f32,
    /// Ground speed the slide amplifies.
    pub base_speed: f32,
    pub accel_rate: f32,
}

impl Default for IceBlockConfig {
    fn default() -> Self {
        Self {
            friction_reduction: 0.9,
            slide_speed_multiplier: 2.0,
            base_speed: 200.0,
            accel_rate: 3.0,
        }
    }
}

/// Tunables for the shrink transition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShrinkConfig {
    /// Target fraction of the original scale, in (0, 1].
    pub shrink_scale: f32,
    pub transition_duration: f32,
    pub mass_multiplier: f32,
}

impl Default for ShrinkConfig {
    fn default() -> Self {
        Self {
            shrink_scale: 0.5,
            transition_duration: 0.3,
            mass_multiplier: 1.0,
        }
    }
}

/// Tunables for the bouncy ball.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BouncyBallConfig {
    pub bounce_impulse: f32,
    /// Speeds below this do not trigger a bounce, avoiding micro-bounce
    /// jitter.
    pub minimum_bounce_speed: f32,
    /// Window after a bounce during which no further bounce fires.
    pub bounce_cooldown: f32,
    pub wall_bounce: bool,
    pub ground_bounce: bool,
}

impl Default for BouncyBallConfig {
    fn default() -> Self {
        Self {
            bounce_impulse: 600.0,
            minimum_bounce_speed: 200.0,
            bounce_cooldown: 0.3,
            wall_bounce: true,
            ground_bounce: true,
        }
    }
}

/// Static per-ability configuration, loadable from JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityTunables {
    pub movement: MovementConfig,
    pub jump: JumpConfig,
    pub double_jump: DoubleJumpConfig,
    pub dash: DashConfig,
    pub iron_block: IronBlockConfig,
    pub balloon: BalloonConfig,
    pub gravity_flip: GravityFlipConfig,
    pub ice_block: IceBlockConfig,
    pub shrink: ShrinkConfig,
    pub bouncy_ball: BouncyBallConfig,
}

/// Tunables loading errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigLoadError {
    FileNotFound(String),
    IoError(String, String),
    ParseError(String, String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigLoadError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigLoadError::IoError(path, err) => {
                write!(f, "IO error reading config file {}: {}", path, err)
            }
            ConfigLoadError::ParseError(path, err) => {
                write!(f, "Failed to parse config file {}: {}", path, err)
            }
            ConfigLoadError::ValidationError(msg) => write!(f, "Config validation error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigLoadError {}

/// Load ability tunables from a JSON file. Missing fields fall back to the
/// canonical defaults.
pub fn load_tunables_from_file(path: &str) -> Result<AbilityTunables, ConfigLoadError> {
    if !Path::new(path).exists() {
        return Err(ConfigLoadError::FileNotFound(path.to_string()));
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| ConfigLoadError::IoError(path.to_string(), e.to_string()))?;

    let tunables: AbilityTunables = serde_json::from_str(&contents)
        .map_err(|e| ConfigLoadError::ParseError(path.to_string(), e.to_string()))?;

    validate_tunables(&tunables)?;

    Ok(tunables)
}

/// Reject configurations the abilities cannot operate under.
pub fn validate_tunables(tunables: &AbilityTunables) -> Result<(), ConfigLoadError> {
    if tunables.movement.walk_speed <= 0.0 || tunables.movement.run_speed <= 0.0 {
        return Err(ConfigLoadError::ValidationError(
            "Movement speeds must be positive".to_string(),
        ));
    }
    if tunables.jump.jump_power <= 0.0 {
        return Err(ConfigLoadError::ValidationError(
            "Jump power must be positive".to_string(),
        ));
    }
    if tunables.shrink.shrink_scale <= 0.0 || tunables.shrink.shrink_scale > 1.0 {
        return Err(ConfigLoadError::ValidationError(
            "Shrink scale must be in (0, 1]".to_string(),
        ));
    }
    if tunables.shrink.transition_duration <= 0.0 {
        return Err(ConfigLoadError::ValidationError(
            "Shrink transition duration must be positive".to_string(),
        ));
    }
    if tunables.iron_block.mass_multiplier <= 0.0 {
        return Err(ConfigLoadError::ValidationError(
            "Iron block mass multiplier must be positive".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&tunables.ice_block.friction_reduction) {
        return Err(ConfigLoadError::ValidationError(
            "Ice block friction reduction must be in [0, 1]".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_pass_validation() {
        assert!(validate_tunables(&AbilityTunables::default()).is_ok());
    }

    #[test]
    fn test_load_tunables_from_file_success() {
        let tunables = AbilityTunables::default();
        let json = serde_json::to_string_pretty(&tunables).unwrap();

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(json.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let loaded = load_tunables_from_file(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(loaded, tunables);
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(br#"{ "jump": { "jump_power": 500.0 } }"#)
            .unwrap();
        temp_file.flush().unwrap();

        let loaded = load_tunables_from_file(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(loaded.jump.jump_power, 500.0);
        assert_eq!(loaded.movement, MovementConfig::default());
    }

    #[test]
    fn test_load_tunables_file_not_found() {
        let result = load_tunables_from_file("nonexistent.json");
        assert!(matches!(result, Err(ConfigLoadError::FileNotFound(_))));
    }

    #[test]
    fn test_load_tunables_invalid_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"{ invalid json }").unwrap();
        temp_file.flush().unwrap();

        let result = load_tunables_from_file(temp_file.path().to_str().unwrap());
        assert!(matches!(result, Err(ConfigLoadError::ParseError(_, _))));
    }

    #[test]
    fn test_invalid_shrink_scale_rejected() {
        let mut tunables = AbilityTunables::default();
        tunables.shrink.shrink_scale = 0.0;
        assert!(matches!(
            validate_tunables(&tunables),
            Err(ConfigLoadError::ValidationError(_))
        ));
        tunables.shrink.shrink_scale = 1.5;
        assert!(matches!(
            validate_tunables(&tunables),
            Err(ConfigLoadError::ValidationError(_))
        ));
    }

    #[test]
    fn test_negative_jump_power_rejected() {
        let mut tunables = AbilityTunables::default();
        tunables.jump.jump_power = -10.0;
        assert!(matches!(
            validate_tunables(&tunables),
            Err(ConfigLoadError::ValidationError(_))
        ));
    }
}
