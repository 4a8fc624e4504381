use super::PlayerError;

pub const MIN_SPEED: f64 = 0.5;
pub const MAX_SPEED: f64 = 2.0;
pub const SPEED_STEP: f64 = 0.25;

/// 速度滑桿上可選的所有值
pub const SPEED_OPTIONS: [f64; 7] = [0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0];

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub playing: bool,
    pub volume: f64,
    pub speed: f64,
    pub fullscreen: bool,
    pub position: f64,
    pub duration: Option<f64>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            playing: false,
            volume: 1.0,
            speed: 1.0,
            fullscreen: false,
            position: 0.0,
            duration: None,
        }
    }
}

pub(crate) fn validate_volume(volume: f64) -> Result<f64, PlayerError> {
    if volume.is_finite() && (0.0..=1.0).contains(&volume) {
        Ok(volume)
    } else {
        Err(PlayerError::InvalidVolume(volume))
    }
}

/// 只接受 0.5 ~ 2.0 之間 0.25 的倍數，回傳對齊後的值
pub(crate) fn validate_speed(speed: f64) -> Result<f64, PlayerError> {
    if !speed.is_finite() || !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
        return Err(PlayerError::InvalidSpeed(speed));
    }

    let steps = (speed - MIN_SPEED) / SPEED_STEP;
    if (steps - steps.round()).abs() > 1e-9 {
        return Err(PlayerError::InvalidSpeed(speed));
    }
    Ok(steps.round().mul_add(SPEED_STEP, MIN_SPEED))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_bounds() {
        assert_eq!(validate_volume(0.0).unwrap(), 0.0);
        assert_eq!(validate_volume(1.0).unwrap(), 1.0);
        assert!(validate_volume(1.01).is_err());
        assert!(validate_volume(-0.1).is_err());
        assert!(validate_volume(f64::NAN).is_err());
    }

    #[test]
    fn test_speed_options_are_all_valid() {
        for speed in SPEED_OPTIONS {
            assert_eq!(validate_speed(speed).unwrap(), speed);
        }
    }

    #[test]
    fn test_speed_rejects_off_grid_values() {
        assert!(validate_speed(0.6).is_err());
        assert!(validate_speed(0.25).is_err());
        assert!(validate_speed(2.25).is_err());
        assert!(validate_speed(f64::INFINITY).is_err());
    }
}
