use lander::{App, CommandProvider, ControlSignals, VehicleState};
use rand::Rng;
use std::env;

/// Holds the sink rate near the safe touchdown speed, with a little
/// threshold jitter so successive flights differ.
struct JitterPilot;

impl CommandProvider for JitterPilot {
    fn signals(&mut self, _: usize, vehicle: &VehicleState) -> ControlSignals {
        let threshold = 1.5 + rand::thread_rng().gen_range(-0.3..0.3);
        ControlSignals::default().with_thrust(vehicle.vy < -threshold)
    }
}

fn main() -> Result<(), String> {
    let scenario_path = env::args().nth(1).ok_or("Lacking scenario path argument")?;

    let mut app = App::try_from_file(&scenario_path)?;
    let now = std::time::Instant::now();
    let result = app.run(&mut JitterPilot);
    let elapsed = now.elapsed();
    println!("Run ended with result: {result:?} time: {elapsed:?}");

    app.print_flight_summary();
    Ok(())
}
