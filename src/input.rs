pub(crate) mod defaults {
    pub const THRUST_ACCEL: f64 = 4.5;
    pub const ROTATION_ACCEL: f64 = 60.;
}

/// Snapshot of the control signals held during one step. Collaborators
/// translate raw platform events into this before a step begins, so a
/// single step always observes a consistent set.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlSignals {
    pub thrust: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
}

impl ControlSignals {
    pub fn with_thrust(self, thrust: bool) -> Self {
        Self { thrust, ..self }
    }

    pub fn with_rotate_left(self, rotate_left: bool) -> Self {
        Self {
            rotate_left,
            ..self
        }
    }

    pub fn with_rotate_right(self, rotate_right: bool) -> Self {
        Self {
            rotate_right,
            ..self
        }
    }
}

/// Accelerations commanded for one step: linear thrust magnitude along the
/// vehicle's current orientation and signed angular acceleration.
#[derive(Clone, Debug, Default)]
pub struct Command {
    pub thrust: f64,
    pub torque: f64,
}

pub struct InputMapper {
    thrust_accel: f64,
    rotation_accel: f64,
}

impl Default for InputMapper {
    fn default() -> Self {
        Self {
            thrust_accel: defaults::THRUST_ACCEL,
            rotation_accel: defaults::ROTATION_ACCEL,
        }
    }
}

impl InputMapper {
    pub fn with_thrust_accel(self, thrust_accel: f64) -> Self {
        Self {
            thrust_accel,
            ..self
        }
    }

    pub fn with_rotation_accel(self, rotation_accel: f64) -> Self {
        Self {
            rotation_accel,
            ..self
        }
    }

    /// Thrust is full-or-none; opposite rotations held together cancel.
    pub fn map(&self, signals: ControlSignals) -> Command {
        let thrust = if signals.thrust { self.thrust_accel } else { 0. };
        let torque = match (signals.rotate_left, signals.rotate_right) {
            (true, false) => -self.rotation_accel,
            (false, true) => self.rotation_accel,
            _ => 0.,
        };
        Command { thrust, torque }
    }
}

#[cfg(test)]
mod input_mapper_tests {
    use super::*;

    #[test]
    fn idle_signals_command_nothing() {
        let cmd = InputMapper::default().map(ControlSignals::default());
        assert_eq!(cmd.thrust, 0.);
        assert_eq!(cmd.torque, 0.);
    }

    #[test]
    fn thrust_is_full_intensity() {
        let cmd = InputMapper::default()
            .with_thrust_accel(3.)
            .map(ControlSignals::default().with_thrust(true));
        assert_eq!(cmd.thrust, 3.);
        assert_eq!(cmd.torque, 0.);
    }

    #[test]
    fn rotations_map_to_signed_torque() {
        let mapper = InputMapper::default().with_rotation_accel(45.);
        let left = mapper.map(ControlSignals::default().with_rotate_left(true));
        let right = mapper.map(ControlSignals::default().with_rotate_right(true));
        assert_eq!(left.torque, -45.);
        assert_eq!(right.torque, 45.);
    }

    #[test]
    fn opposite_rotations_cancel() {
        let cmd = InputMapper::default().map(
            ControlSignals::default()
                .with_rotate_left(true)
                .with_rotate_right(true),
        );
        assert_eq!(cmd.torque, 0.);
    }
}
