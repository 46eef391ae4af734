use crate::input::Command;

pub(crate) mod defaults {
    pub const G: f64 = 1.62;
    pub const FUEL_RATE: f64 = 10.;
}

/// Kinematic and fuel state of the vehicle. Angle is in degrees, 0 is
/// upright, positive tilts toward +x, and it stays within [-180, 180).
/// Mutated only by `Physics::iterate`.
#[derive(Clone, Debug, Default)]
pub struct VehicleState {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub angle: f64,
    pub angular_vel: f64,
    pub fuel: f64,
    pub thrusting: bool,
}

impl VehicleState {
    pub fn with_x(self, x: f64) -> Self {
        Self { x, ..self }
    }

    pub fn with_y(self, y: f64) -> Self {
        Self { y, ..self }
    }

    pub fn with_vx(self, vx: f64) -> Self {
        Self { vx, ..self }
    }

    pub fn with_vy(self, vy: f64) -> Self {
        Self { vy, ..self }
    }

    pub fn with_angle(self, angle: f64) -> Self {
        Self { angle, ..self }
    }

    pub fn with_angular_vel(self, angular_vel: f64) -> Self {
        Self {
            angular_vel,
            ..self
        }
    }

    pub fn with_fuel(self, fuel: f64) -> Self {
        Self { fuel, ..self }
    }

    /// Absolute deviation from upright, in degrees.
    pub fn tilt(&self) -> f64 {
        self.angle.abs()
    }
}

fn normalize_angle(angle: f64) -> f64 {
    (angle + 180.).rem_euclid(360.) - 180.
}

pub struct Physics {
    g: f64,
    fuel_rate: f64,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            g: defaults::G,
            fuel_rate: defaults::FUEL_RATE,
        }
    }
}

impl Physics {
    pub fn with_g(self, g: f64) -> Self {
        Self { g, ..self }
    }

    pub fn with_fuel_rate(self, fuel_rate: f64) -> Self {
        Self { fuel_rate, ..self }
    }

    /// Semi-implicit Euler step: velocities advance before positions, so
    /// the position update already sees this step's acceleration. Thrust
    /// only contributes while fuel remains; an empty tank falls ballistic.
    pub fn iterate(&self, mut vehicle: VehicleState, cmd: &Command, dt: f64) -> VehicleState {
        let thrusting = cmd.thrust > 0. && vehicle.fuel > 0.;

        // vectorize thrust along the current orientation
        let (t_x, t_y) = if thrusting {
            let (sin, cos) = vehicle.angle.to_radians().sin_cos();
            (sin * cmd.thrust, cos * cmd.thrust)
        } else {
            (0., 0.)
        };

        // update velocity
        vehicle.vx += t_x * dt;
        vehicle.vy += (t_y - self.g) * dt;

        // update position
        vehicle.x += vehicle.vx * dt;
        vehicle.y += vehicle.vy * dt;

        // update rotation
        vehicle.angular_vel += cmd.torque * dt;
        vehicle.angle = normalize_angle(vehicle.angle + vehicle.angular_vel * dt);

        // consume fuel
        if thrusting {
            vehicle.fuel = (vehicle.fuel - self.fuel_rate * dt).max(0.);
        }
        vehicle.thrusting = thrusting;
        vehicle
    }
}
