use crate::collision::Outcome;

pub(crate) mod defaults {
    pub const BASE_BONUS: f64 = 50.;
    pub const FUEL_BONUS: f64 = 1.;
    pub const PRECISION_CAP: f64 = 100.;
    pub const SPEED_PENALTY: f64 = 25.;
    pub const TILT_PENALTY: f64 = 5.;
}

/// Fixed scoring configuration. A crash is always worth zero; a landing
/// earns the base bonus, a per-unit bonus on remaining fuel, and a
/// precision bonus that shrinks with impact speed and tilt, floored at
/// zero.
#[derive(Clone, Debug)]
pub struct ScoreWeights {
    base_bonus: f64,
    fuel_bonus: f64,
    precision_cap: f64,
    speed_penalty: f64,
    tilt_penalty: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            base_bonus: defaults::BASE_BONUS,
            fuel_bonus: defaults::FUEL_BONUS,
            precision_cap: defaults::PRECISION_CAP,
            speed_penalty: defaults::SPEED_PENALTY,
            tilt_penalty: defaults::TILT_PENALTY,
        }
    }
}

impl ScoreWeights {
    pub fn with_base_bonus(self, base_bonus: f64) -> Self {
        Self { base_bonus, ..self }
    }

    pub fn with_fuel_bonus(self, fuel_bonus: f64) -> Self {
        Self { fuel_bonus, ..self }
    }

    pub fn with_precision_cap(self, precision_cap: f64) -> Self {
        Self {
            precision_cap,
            ..self
        }
    }

    pub fn with_speed_penalty(self, speed_penalty: f64) -> Self {
        Self {
            speed_penalty,
            ..self
        }
    }

    pub fn with_tilt_penalty(self, tilt_penalty: f64) -> Self {
        Self {
            tilt_penalty,
            ..self
        }
    }

    pub fn base_bonus(&self) -> f64 {
        self.base_bonus
    }

    pub fn score(&self, outcome: &Outcome) -> f64 {
        match outcome {
            Outcome::Landed(touchdown) => {
                let precision = (self.precision_cap
                    - self.speed_penalty * touchdown.speed
                    - self.tilt_penalty * touchdown.tilt)
                    .max(0.);
                self.base_bonus + self.fuel_bonus * touchdown.fuel + precision
            }
            _ => 0.,
        }
    }
}
