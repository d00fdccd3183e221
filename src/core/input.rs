/// Per-tick snapshot of player input, decoupled from any concrete device.
///
/// The host captures whatever input backend it uses into this struct once
/// per frame; abilities only ever read the snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// Horizontal axis in [-1, 1]; positive is rightward.
    pub horizontal: f32,
    /// Vertical axis in [-1, 1]; positive is upward input.
    pub vertical: f32,
    /// Jump was pressed this tick (edge).
    pub jump_pressed: bool,
    /// Jump is currently held.
    pub jump_held: bool,
    /// Run modifier is currently held.
    pub run_held: bool,
    /// Dash was pressed this tick (edge).
    pub dash_pressed: bool,
    /// Gravity-flip was pressed this tick (edge).
    pub flip_pressed: bool,
}

impl InputSnapshot {
    /// True when the horizontal axis is meaningfully deflected.
    pub fn has_horizontal(&self) -> bool {
        self.horizontal.abs() > 0.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_is_neutral() {
        let input = InputSnapshot::default();
        assert_eq!(input.horizontal, 0.0);
        assert!(!input.jump_pressed);
        assert!(!input.has_horizontal());
    }

    #[test]
    fn test_has_horizontal_deadzone() {
        let mut input = InputSnapshot::default();
        input.horizontal = 0.05;
        assert!(!input.has_horizontal());
        input.horizontal = -0.5;
        assert!(input.has_horizontal());
    }
}
