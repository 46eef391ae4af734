use crate::physics::VehicleState;
use crate::terrain::Terrain;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrashCause {
    OutOfBounds,
    OffPad,
    ExcessSpeed,
    ExcessTilt,
}

/// Metrics captured at the moment of a safe touchdown, used for scoring
/// and telemetry.
#[derive(Clone, Debug)]
pub struct Touchdown {
    pub speed: f64,
    pub tilt: f64,
    pub fuel: f64,
    pub pad_offset: f64,
}

#[derive(Clone, Debug)]
pub enum Outcome {
    Flying,
    Landed(Touchdown),
    Crashed(CrashCause),
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Flying)
    }
}

/// Classify the vehicle against the terrain. Checks run in a fixed order
/// so the reported cause is deterministic: out-of-bounds, then contact,
/// then off-pad, excess speed, excess tilt. Leaving the playfield is
/// terminal even without ground contact; an empty tank is not.
pub fn evaluate(terrain: &Terrain, vehicle: &VehicleState) -> Outcome {
    let ground = match terrain.height_at(vehicle.x) {
        Some(ground) => ground,
        None => return Outcome::Crashed(CrashCause::OutOfBounds),
    };
    if vehicle.y > ground {
        return Outcome::Flying;
    }

    if !terrain.on_pad(vehicle.x) {
        return Outcome::Crashed(CrashCause::OffPad);
    }
    let limits = terrain.limits();
    if vehicle.vy.abs() > limits.max_vertical_speed
        || vehicle.vx.abs() > limits.max_horizontal_speed
    {
        return Outcome::Crashed(CrashCause::ExcessSpeed);
    }
    if vehicle.tilt() > limits.max_tilt {
        return Outcome::Crashed(CrashCause::ExcessTilt);
    }

    Outcome::Landed(Touchdown {
        speed: (vehicle.vx * vehicle.vx + vehicle.vy * vehicle.vy).sqrt(),
        tilt: vehicle.tilt(),
        fuel: vehicle.fuel,
        pad_offset: vehicle.x - terrain.pad_center(),
    })
}
