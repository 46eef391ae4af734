use crate::input::ControlSignals;
use crate::physics::VehicleState;
use crate::session::{Phase, Session, SessionState, VehicleHistory};

mod defaults {
    pub const DT: f64 = 1. / 60.;
    pub const MAX_STEPS: usize = 100_000;
}

/// Supplies the control snapshot for each step; stands in for whatever
/// the hosting environment polls its input from.
pub trait CommandProvider {
    fn signals(&mut self, step: usize, vehicle: &VehicleState) -> ControlSignals;
}

/// Drives a session at a fixed timestep until touchdown, recording the
/// flight for reporting.
pub struct App {
    session: Session,
    history: VehicleHistory,
    dt: f64,
    max_steps: usize,
}

impl App {
    pub fn new(session: Session) -> Self {
        let history = VehicleHistory::with_initial_state(session.vehicle());
        Self {
            session,
            history,
            dt: defaults::DT,
            max_steps: defaults::MAX_STEPS,
        }
    }

    pub fn with_dt(self, dt: f64) -> Self {
        Self { dt, ..self }
    }

    pub fn with_max_steps(self, max_steps: usize) -> Self {
        Self { max_steps, ..self }
    }

    pub fn run(&mut self, pilot: &mut dyn CommandProvider) -> Result<SessionState, String> {
        for step in 0..self.max_steps {
            let signals = pilot.signals(step, self.session.vehicle());
            let state = self
                .session
                .step(signals, self.dt)
                .map_err(|e| e.to_string())?;
            self.history.append_state(&state.vehicle);
            if state.phase != Phase::Flying {
                return Ok(state);
            }
        }
        Err(format!("No touchdown within {} steps", self.max_steps))
    }

    pub fn reset(&mut self) {
        let state = self.session.reset();
        self.history = VehicleHistory::with_initial_state(&state.vehicle);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn history(&self) -> &VehicleHistory {
        &self.history
    }

    pub fn print_flight_summary(&self) {
        println!("{}", self.history.pretty_to_string());
        let state = self.session.state();
        println!("Finished {:?} with score {:.1}", state.outcome, state.score);
    }
}
