use std::fmt::Display;

use crate::collision::{evaluate, Outcome};
use crate::input::{ControlSignals, InputMapper};
use crate::physics::{Physics, VehicleState};
use crate::score::ScoreWeights;
use crate::terrain::Terrain;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Flying,
    Landed,
    Crashed,
}

#[derive(Debug)]
pub enum StepError {
    InvalidTimestep(f64),
    SessionFinished(Phase),
}

impl Display for StepError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Observable state returned by `step` and `reset`.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub phase: Phase,
    pub vehicle: VehicleState,
    pub outcome: Outcome,
    pub score: f64,
}

/// One game session: spawns the vehicle, advances a step per external
/// tick, and stops at the first terminal outcome until reset. The first
/// `step` call doubles as the start signal.
pub struct Session {
    mapper: InputMapper,
    physics: Physics,
    weights: ScoreWeights,
    terrain: Terrain,
    spawn: VehicleState,
    vehicle: VehicleState,
    phase: Phase,
    outcome: Outcome,
    score: f64,
}

impl Session {
    pub fn new(terrain: Terrain, spawn: VehicleState) -> Self {
        Self {
            mapper: InputMapper::default(),
            physics: Physics::default(),
            weights: ScoreWeights::default(),
            terrain,
            vehicle: spawn.clone(),
            spawn,
            phase: Phase::Ready,
            outcome: Outcome::Flying,
            score: 0.,
        }
    }

    pub fn with_mapper(self, mapper: InputMapper) -> Self {
        Self { mapper, ..self }
    }

    pub fn with_physics(self, physics: Physics) -> Self {
        Self { physics, ..self }
    }

    pub fn with_weights(self, weights: ScoreWeights) -> Self {
        Self { weights, ..self }
    }

    /// Advance one tick: map signals, integrate, classify, and on a
    /// terminal outcome score once and stop. Stepping a finished session
    /// is a misuse error, not a silent re-run.
    pub fn step(&mut self, signals: ControlSignals, dt: f64) -> Result<SessionState, StepError> {
        if let Phase::Landed | Phase::Crashed = self.phase {
            return Err(StepError::SessionFinished(self.phase));
        }
        if !dt.is_finite() || dt <= 0. {
            return Err(StepError::InvalidTimestep(dt));
        }
        self.phase = Phase::Flying;

        let cmd = self.mapper.map(signals);
        self.vehicle = self.physics.iterate(self.vehicle.clone(), &cmd, dt);
        self.outcome = evaluate(&self.terrain, &self.vehicle);

        if self.outcome.is_terminal() {
            self.pin_to_ground();
            self.phase = match self.outcome {
                Outcome::Landed(_) => Phase::Landed,
                _ => Phase::Crashed,
            };
            self.score = self.weights.score(&self.outcome);
        }
        Ok(self.state())
    }

    /// Full respawn, valid from any phase including a mid-flight abort.
    pub fn reset(&mut self) -> SessionState {
        self.vehicle = self.spawn.clone();
        self.phase = Phase::Ready;
        self.outcome = Outcome::Flying;
        self.score = 0.;
        self.state()
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            phase: self.phase,
            vehicle: self.vehicle.clone(),
            outcome: self.outcome.clone(),
            score: self.score,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    fn pin_to_ground(&mut self) {
        if let Some(ground) = self.terrain.height_at(self.vehicle.x) {
            if self.vehicle.y < ground {
                self.vehicle.y = ground;
            }
        }
    }
}

/// Per-step telemetry of a single flight, for drivers and tests.
#[derive(Clone)]
pub struct VehicleHistory {
    x: Vec<f64>,
    y: Vec<f64>,
    vx: Vec<f64>,
    vy: Vec<f64>,
    angle: Vec<f64>,
    fuel: Vec<f64>,
}

impl VehicleHistory {
    pub fn with_initial_state(state: &VehicleState) -> Self {
        let mut history = Self {
            x: Vec::new(),
            y: Vec::new(),
            vx: Vec::new(),
            vy: Vec::new(),
            angle: Vec::new(),
            fuel: Vec::new(),
        };
        history.append_state(state);
        history
    }

    pub fn append_state(&mut self, state: &VehicleState) {
        self.x.push(state.x);
        self.y.push(state.y);
        self.vx.push(state.vx);
        self.vy.push(state.vy);
        self.angle.push(state.angle);
        self.fuel.push(state.fuel);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn iter_positions(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().zip(self.y.iter()).map(|(&x, &y)| (x, y))
    }

    pub fn vx(&self) -> &[f64] {
        &self.vx
    }

    pub fn vy(&self) -> &[f64] {
        &self.vy
    }

    pub fn angle(&self) -> &[f64] {
        &self.angle
    }

    pub fn fuel(&self) -> &[f64] {
        &self.fuel
    }

    pub fn pretty_to_string(&self) -> String {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.vx)
            .zip(&self.vy)
            .zip(&self.angle)
            .zip(&self.fuel)
            .fold(
                format!(
                    "{:>9}{:>9}{:>9}{:>9}{:>9}{:>9}",
                    "X", "Y", "VX", "VY", "ANGLE", "FUEL"
                ),
                |out, (((((x, y), vx), vy), angle), fuel)| {
                    out + &format!(
                        "\n{x:9.2}{y:9.2}{vx:9.2}{vy:9.2}{angle:9.2}{fuel:9.2}"
                    )
                },
            )
    }
}

#[cfg(test)]
mod session_tests {
    use super::*;
    use crate::collision::CrashCause;
    use crate::score;

    fn assert_feq(left: f64, right: f64) {
        if (left - right).abs() > 1e-9 {
            panic!("Float equal assertion failed, {left} != {right}");
        }
    }

    // flat ground at 100 across [0, 1000], pad over [400, 600]
    fn pad_terrain() -> Terrain {
        Terrain::with_default_limits(vec![0., 1000.], vec![100., 100.], (400., 600.))
            .unwrap()
    }

    fn above_pad() -> VehicleState {
        VehicleState::default().with_x(500.).with_y(500.).with_fuel(100.)
    }

    #[test]
    fn first_step_starts_the_flight() {
        let mut session = Session::new(pad_terrain(), above_pad());
        assert_eq!(session.phase(), Phase::Ready);
        let state = session.step(ControlSignals::default(), 1. / 60.).unwrap();
        assert_eq!(state.phase, Phase::Flying);
    }

    #[test]
    fn rejects_bad_timesteps() {
        let mut session = Session::new(pad_terrain(), above_pad());
        for dt in [0., -0.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                session.step(ControlSignals::default(), dt),
                Err(StepError::InvalidTimestep(_))
            ));
        }
        // the session is still startable afterwards
        assert!(session.step(ControlSignals::default(), 1. / 60.).is_ok());
    }

    #[test]
    fn free_fall_onto_the_pad_crashes_fast() {
        let mut session = Session::new(pad_terrain(), above_pad());
        let state = loop {
            let state = session.step(ControlSignals::default(), 1. / 60.).unwrap();
            if state.phase != Phase::Flying {
                break state;
            }
        };
        assert_eq!(state.phase, Phase::Crashed);
        assert!(matches!(
            state.outcome,
            Outcome::Crashed(CrashCause::ExcessSpeed)
        ));
        assert_eq!(state.score, 0.);
        // the wreck rests on the ground, not below it
        assert_feq(state.vehicle.y, 100.);
    }

    #[test]
    fn finished_session_rejects_further_steps() {
        let mut session = Session::new(pad_terrain(), above_pad());
        while session.step(ControlSignals::default(), 1. / 60.).unwrap().phase
            == Phase::Flying
        {}
        let score_before = session.state().score;
        assert!(matches!(
            session.step(ControlSignals::default(), 1. / 60.),
            Err(StepError::SessionFinished(Phase::Crashed))
        ));
        assert_feq(session.state().score, score_before);
    }

    #[test]
    fn side_exit_crashes_out_of_bounds_while_airborne() {
        let spawn = VehicleState::default().with_x(999.).with_y(500.).with_vx(30.);
        let mut session = Session::new(pad_terrain(), spawn);
        let state = session.step(ControlSignals::default(), 0.1).unwrap();
        assert_eq!(state.phase, Phase::Crashed);
        assert!(matches!(
            state.outcome,
            Outcome::Crashed(CrashCause::OutOfBounds)
        ));
        assert!(state.vehicle.y > 400.);
    }

    #[test]
    fn reset_restores_the_spawn_state() {
        let mut session = Session::new(pad_terrain(), above_pad());
        while session.step(ControlSignals::default(), 1. / 60.).unwrap().phase
            == Phase::Flying
        {}
        let state = session.reset();
        assert_eq!(state.phase, Phase::Ready);
        assert_feq(state.vehicle.y, 500.);
        assert_feq(state.vehicle.fuel, 100.);
        assert_eq!(state.score, 0.);
        assert!(matches!(state.outcome, Outcome::Flying));
        assert!(session.step(ControlSignals::default(), 1. / 60.).is_ok());
    }

    #[test]
    fn reset_mid_flight_aborts_cleanly() {
        let mut session = Session::new(pad_terrain(), above_pad());
        for _ in 0..5 {
            session.step(ControlSignals::default(), 1. / 60.).unwrap();
        }
        let state = session.reset();
        assert_eq!(state.phase, Phase::Ready);
        assert_feq(state.vehicle.vy, 0.);
    }

    #[test]
    fn fuel_starves_then_lands_without_fuel_bonus() {
        // barely any fuel: one thrusting tick empties the tank, then the
        // vehicle falls ballistic from about a unit up and still lands
        let spawn = VehicleState::default().with_x(500.).with_y(101.).with_fuel(0.5);
        let mut session = Session::new(pad_terrain(), spawn);
        let held = ControlSignals::default().with_thrust(true);

        let mut last_fuel = f64::INFINITY;
        let state = loop {
            let state = session.step(held, 0.05).unwrap();
            assert!(state.vehicle.fuel <= last_fuel);
            assert!(state.vehicle.fuel >= 0.);
            last_fuel = state.vehicle.fuel;
            if state.phase != Phase::Flying {
                break state;
            }
        };

        assert_eq!(state.phase, Phase::Landed);
        match &state.outcome {
            Outcome::Landed(touchdown) => assert_feq(touchdown.fuel, 0.),
            other => panic!("Expected Landed, got {other:?}"),
        }
        // no fuel bonus left: base plus whatever precision remained
        assert!(state.score >= score::defaults::BASE_BONUS);
        assert!(state.score <= score::defaults::BASE_BONUS + score::defaults::PRECISION_CAP);
    }

    #[test]
    fn identical_inputs_reproduce_the_outcome() {
        let run = || {
            let mut session = Session::new(pad_terrain(), above_pad());
            let mut step = 0usize;
            loop {
                let signals = ControlSignals::default().with_thrust(step % 3 != 0);
                let state = session.step(signals, 1. / 60.).unwrap();
                if state.phase != Phase::Flying {
                    break state;
                }
                step += 1;
            }
        };
        let (a, b) = (run(), run());
        assert_eq!(a.phase, b.phase);
        assert_feq(a.score, b.score);
        assert_feq(a.vehicle.x, b.vehicle.x);
        assert_feq(a.vehicle.vy, b.vehicle.vy);
    }

    #[test]
    fn history_records_each_step() {
        let mut session = Session::new(pad_terrain(), above_pad());
        let mut history = VehicleHistory::with_initial_state(session.vehicle());
        for _ in 0..3 {
            let state = session.step(ControlSignals::default(), 1. / 60.).unwrap();
            history.append_state(&state.vehicle);
        }
        assert_eq!(history.len(), 4);
        assert_eq!(history.iter_positions().count(), 4);
        let table = history.pretty_to_string();
        assert!(table.starts_with(&format!("{:>9}", "X")));
        assert_eq!(table.lines().count(), 5);
    }
}
