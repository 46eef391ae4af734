use std::path::PathBuf;

use clap::Parser;
use lander::{App, CommandProvider, ControlSignals, Phase, VehicleState};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Scenario json file path
    #[arg(long, value_name = "FILE")]
    scenario: PathBuf,

    /// Simulation timestep in seconds
    #[arg(long, default_value_t = 1. / 60.)]
    dt: f64,

    /// Maximal number of steps before giving up
    #[arg(long, short, default_value_t = 100_000)]
    max_steps: usize,
}

/// Levels the vehicle with bang-bang attitude control, then rides the
/// brake speed down to the pad.
struct DescentPilot {
    brake_speed: f64,
}

impl CommandProvider for DescentPilot {
    fn signals(&mut self, _: usize, vehicle: &VehicleState) -> ControlSignals {
        // lead the angle by the current spin so the controller damps
        // instead of oscillating
        let lead = vehicle.angle + vehicle.angular_vel * 0.5;
        ControlSignals::default()
            .with_rotate_left(lead > 0.5)
            .with_rotate_right(lead < -0.5)
            .with_thrust(vehicle.tilt() < 15. && vehicle.vy < -self.brake_speed)
    }
}

fn main() -> Result<(), String> {
    let cli = Cli::parse();

    let mut app = App::try_from_file(&cli.scenario)?
        .with_dt(cli.dt)
        .with_max_steps(cli.max_steps);

    let state = app.run(&mut DescentPilot { brake_speed: 1.8 })?;
    app.print_flight_summary();

    if state.phase == Phase::Landed {
        Ok(())
    } else {
        Err(format!("Flight ended {:?}", state.outcome))
    }
}
