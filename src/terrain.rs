use std::fmt::Display;

pub(crate) mod defaults {
    pub const MAX_VERTICAL_SPEED: f64 = 2.;
    pub const MAX_HORIZONTAL_SPEED: f64 = 2.;
    pub const MAX_TILT: f64 = 10.;
}

#[derive(Debug)]
pub enum ConfigError {
    NotEnoughSamples(usize),
    MismatchedSamples { x: usize, y: usize },
    NonFiniteSample { index: usize },
    UnorderedSamples { index: usize },
    DegeneratePad { start: f64, end: f64 },
    PadOutsidePlayfield { start: f64, end: f64 },
    NonPositiveLimit(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Safety thresholds a touchdown on the pad must stay within.
#[derive(Clone, Debug)]
pub struct PadLimits {
    pub max_vertical_speed: f64,
    pub max_horizontal_speed: f64,
    pub max_tilt: f64,
}

impl Default for PadLimits {
    fn default() -> Self {
        Self {
            max_vertical_speed: defaults::MAX_VERTICAL_SPEED,
            max_horizontal_speed: defaults::MAX_HORIZONTAL_SPEED,
            max_tilt: defaults::MAX_TILT,
        }
    }
}

impl PadLimits {
    pub fn with_max_vertical_speed(self, max_vertical_speed: f64) -> Self {
        Self {
            max_vertical_speed,
            ..self
        }
    }

    pub fn with_max_horizontal_speed(self, max_horizontal_speed: f64) -> Self {
        Self {
            max_horizontal_speed,
            ..self
        }
    }

    pub fn with_max_tilt(self, max_tilt: f64) -> Self {
        Self { max_tilt, ..self }
    }
}

/// Static ground profile: ordered height samples spanning the playfield
/// plus the landing-pad extent and its safety limits. Immutable once built.
#[derive(Clone, Debug)]
pub struct Terrain {
    x: Vec<f64>,
    y: Vec<f64>,
    pad_start: f64,
    pad_end: f64,
    limits: PadLimits,
}

impl Terrain {
    pub fn try_new(
        x: Vec<f64>,
        y: Vec<f64>,
        pad: (f64, f64),
        limits: PadLimits,
    ) -> Result<Self, ConfigError> {
        if x.len() != y.len() {
            return Err(ConfigError::MismatchedSamples {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.len() < 2 {
            return Err(ConfigError::NotEnoughSamples(x.len()));
        }
        for (index, (&sx, &sy)) in x.iter().zip(y.iter()).enumerate() {
            if !sx.is_finite() || !sy.is_finite() {
                return Err(ConfigError::NonFiniteSample { index });
            }
        }
        if let Some(index) = x.windows(2).position(|w| w[0] >= w[1]) {
            return Err(ConfigError::UnorderedSamples { index: index + 1 });
        }

        let (pad_start, pad_end) = pad;
        if !(pad_start < pad_end) {
            return Err(ConfigError::DegeneratePad {
                start: pad_start,
                end: pad_end,
            });
        }
        if pad_start < x[0] || pad_end > x[x.len() - 1] {
            return Err(ConfigError::PadOutsidePlayfield {
                start: pad_start,
                end: pad_end,
            });
        }

        for (name, limit) in [
            ("max_vertical_speed", limits.max_vertical_speed),
            ("max_horizontal_speed", limits.max_horizontal_speed),
            ("max_tilt", limits.max_tilt),
        ] {
            if !(limit > 0.) || !limit.is_finite() {
                return Err(ConfigError::NonPositiveLimit(name));
            }
        }

        Ok(Self {
            x,
            y,
            pad_start,
            pad_end,
            limits,
        })
    }

    pub fn with_default_limits(
        x: Vec<f64>,
        y: Vec<f64>,
        pad: (f64, f64),
    ) -> Result<Self, ConfigError> {
        Self::try_new(x, y, pad, PadLimits::default())
    }

    /// Ground height at `x` by linear interpolation between the nearest
    /// samples; `None` outside the playfield, never extrapolated.
    pub fn height_at(&self, x: f64) -> Option<f64> {
        if !x.is_finite() || x < self.x[0] || x > self.x[self.x.len() - 1] {
            return None;
        }
        let i = self.x.partition_point(|&sx| sx <= x).min(self.x.len() - 1);
        let (x0, x1) = (self.x[i - 1], self.x[i]);
        let (y0, y1) = (self.y[i - 1], self.y[i]);
        Some(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
    }

    pub fn on_pad(&self, x: f64) -> bool {
        self.pad_start <= x && x <= self.pad_end
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    pub fn pad(&self) -> (f64, f64) {
        (self.pad_start, self.pad_end)
    }

    pub fn pad_center(&self) -> f64 {
        (self.pad_start + self.pad_end) / 2.
    }

    pub fn limits(&self) -> &PadLimits {
        &self.limits
    }

    pub fn iter_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().zip(self.y.iter()).map(|(&x, &y)| (x, y))
    }
}
