use std::env;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use lander::{App, CommandProvider, ControlSignals, CrashCause, Outcome, VehicleState};
use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

// https://docs.rs/axum/latest/axum/index.html#using-the-state-extractor

#[derive(Serialize, Default)]
struct Telemetry {
    vx: Vec<f64>,
    vy: Vec<f64>,
    angle: Vec<f64>,
    fuel: Vec<f64>,
}

#[derive(Serialize)]
enum FlightState {
    Flying,
    Landed,
    CrashedOutOfBounds,
    CrashedOffPad,
    CrashedExcessSpeed,
    CrashedExcessTilt,
}

impl From<&Outcome> for FlightState {
    fn from(value: &Outcome) -> Self {
        match value {
            Outcome::Flying => Self::Flying,
            Outcome::Landed(_) => Self::Landed,
            Outcome::Crashed(CrashCause::OutOfBounds) => Self::CrashedOutOfBounds,
            Outcome::Crashed(CrashCause::OffPad) => Self::CrashedOffPad,
            Outcome::Crashed(CrashCause::ExcessSpeed) => Self::CrashedExcessSpeed,
            Outcome::Crashed(CrashCause::ExcessTilt) => Self::CrashedExcessTilt,
        }
    }
}

#[derive(Serialize)]
struct Flight {
    positions: Vec<(f64, f64)>,
    telemetry: Telemetry,
    flight_state: FlightState,
    score: f64,
}

#[derive(Clone)]
struct HudState {
    state: Arc<Mutex<App>>,
}

struct JitterPilot;

impl CommandProvider for JitterPilot {
    fn signals(&mut self, _: usize, vehicle: &VehicleState) -> ControlSignals {
        let threshold = 1.5 + rand::thread_rng().gen_range(-0.3..0.3);
        ControlSignals::default().with_thrust(vehicle.vy < -threshold)
    }
}

#[tokio::main]
async fn main() {
    let scenario_path = env::args().nth(1).expect("Lacking scenario path argument");

    let mut app = match App::try_from_file(&scenario_path) {
        Ok(app) => app,
        Err(e) => panic!("{e}"),
    };
    if let Err(e) = app.run(&mut JitterPilot) {
        eprintln!("Initial flight failed: {e}");
    }

    let hud = HudState {
        state: Arc::new(Mutex::new(app)),
    };

    let router = Router::new()
        .route("/terrain", get(handle_terrain))
        .route("/flight", get(handle_flight))
        .route("/reset", put(handle_reset))
        .with_state(hud)
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    axum::serve(listener, router).await.unwrap();
}

async fn handle_terrain(State(hud): State<HudState>) -> Json<Value> {
    let app = hud.state.lock().unwrap();
    let terrain = app.session().terrain();
    let points = terrain
        .iter_points()
        .map(|(x, y)| vec![x, y])
        .collect::<Vec<_>>();
    let (pad_start, pad_end) = terrain.pad();
    Json(serde_json::json!({
        "points": points,
        "pad": [pad_start, pad_end],
    }))
}

async fn handle_flight(State(hud): State<HudState>) -> Json<Value> {
    let app = hud.state.lock().unwrap();
    let history = app.history();
    let state = app.session().state();
    let flight = Flight {
        positions: history.iter_positions().collect(),
        telemetry: Telemetry {
            vx: history.vx().to_vec(),
            vy: history.vy().to_vec(),
            angle: history.angle().to_vec(),
            fuel: history.fuel().to_vec(),
        },
        flight_state: FlightState::from(&state.outcome),
        score: state.score,
    };
    Json(serde_json::to_value(flight).unwrap())
}

async fn handle_reset(State(hud): State<HudState>) -> Result<(), (StatusCode, String)> {
    let mut app = hud.state.lock().unwrap();
    app.reset();
    app.run(&mut JitterPilot).map(|_| ()).map_err(|e| {
        let e = format!("Refly failed: {e}");
        eprintln!("{e}");
        (StatusCode::INTERNAL_SERVER_ERROR, e)
    })
}
