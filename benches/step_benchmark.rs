use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use lander::{init, App, CommandProvider, ControlSignals, Session, VehicleState};

const SCENARIO: &str = r#"{
    "Vehicle": { "X": 480, "Y": 250, "VX": 0, "VY": 0, "Angle": 0, "Fuel": 400 },
    "Terrain": [[0, 60], [250, 140], [400, 100], [600, 100], [750, 180], [1000, 220]],
    "Pad": { "Start": 400, "End": 600 },
    "Limits": { "MaxVerticalSpeed": 2, "MaxHorizontalSpeed": 2, "MaxTilt": 10 }
}"#;

struct BrakePilot;

impl CommandProvider for BrakePilot {
    fn signals(&mut self, _: usize, vehicle: &VehicleState) -> ControlSignals {
        ControlSignals::default().with_thrust(vehicle.vy < -1.8)
    }
}

fn build_app() -> App {
    let (spawn, terrain) = init::json::parse_scenario(SCENARIO).unwrap();
    App::new(Session::new(terrain, spawn))
}

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("parse_scenario", |b| {
        b.iter(|| init::json::parse_scenario(black_box(SCENARIO)).unwrap())
    });

    c.bench_function("powered_descent", |b| {
        b.iter_batched(
            build_app,
            |mut app| app.run(&mut BrakePilot).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
