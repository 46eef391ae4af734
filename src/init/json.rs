use crate::{PadLimits, Terrain, VehicleState};
use json::{self, JsonValue};
use std::{fs::File, io::Read, path::Path};

pub fn from_file<P: AsRef<Path>>(path: P) -> Result<(VehicleState, Terrain), String> {
    let path = path.as_ref();
    let mut file_content = String::new();
    let mut file = File::open(path)
        .map_err(|e| format!("Error while opening file {}: {e}", path.display()))?;
    file.read_to_string(&mut file_content)
        .map_err(|e| format!("Failed to read file: {e}"))?;
    parse_scenario(&file_content)
}

/// Parse a scenario document: spawn state, terrain samples, pad extent,
/// optional safety limits (defaults apply when absent).
pub fn parse_scenario(source: &str) -> Result<(VehicleState, Terrain), String> {
    let scenario = json::parse(source).map_err(|e| format!("Json error: {e}"))?;
    Ok((parse_vehicle(&scenario)?, parse_terrain(&scenario)?))
}

fn get_f64(value: &JsonValue, path: &str) -> Result<f64, String> {
    value.as_f64().ok_or(format!("Couldn't find {path}"))
}

fn parse_vehicle(scenario: &JsonValue) -> Result<VehicleState, String> {
    let vehicle = &scenario["Vehicle"];
    if vehicle.is_null() {
        return Err("Lacking /Vehicle key".to_string());
    }
    Ok(VehicleState::default()
        .with_x(get_f64(&vehicle["X"], "/Vehicle/X")?)
        .with_y(get_f64(&vehicle["Y"], "/Vehicle/Y")?)
        .with_vx(get_f64(&vehicle["VX"], "/Vehicle/VX")?)
        .with_vy(get_f64(&vehicle["VY"], "/Vehicle/VY")?)
        .with_angle(get_f64(&vehicle["Angle"], "/Vehicle/Angle")?)
        .with_fuel(get_f64(&vehicle["Fuel"], "/Vehicle/Fuel")?))
}

fn parse_terrain(scenario: &JsonValue) -> Result<Terrain, String> {
    let points = &scenario["Terrain"];
    if points.is_null() {
        return Err("Lacking /Terrain key".to_string());
    }
    let (x, y) = points
        .members()
        .map(|point| {
            let err_str = "Terrain has to contain numeric [x, y] pairs";
            let x = point[0].as_f64().ok_or(err_str)?;
            let y = point[1].as_f64().ok_or(err_str)?;
            Ok((x, y))
        })
        .try_fold(
            (Vec::new(), Vec::new()),
            |(mut xs, mut ys), xy: Result<(f64, f64), String>| {
                let (x, y) = xy?;
                xs.push(x);
                ys.push(y);
                Ok::<(Vec<f64>, Vec<f64>), String>((xs, ys))
            },
        )?;

    let pad = (
        get_f64(&scenario["Pad"]["Start"], "/Pad/Start")?,
        get_f64(&scenario["Pad"]["End"], "/Pad/End")?,
    );
    let limits = parse_limits(&scenario["Limits"])?;
    Terrain::try_new(x, y, pad, limits).map_err(|e| e.to_string())
}

fn parse_limits(limits: &JsonValue) -> Result<PadLimits, String> {
    if limits.is_null() {
        return Ok(PadLimits::default());
    }
    Ok(PadLimits::default()
        .with_max_vertical_speed(get_f64(
            &limits["MaxVerticalSpeed"],
            "/Limits/MaxVerticalSpeed",
        )?)
        .with_max_horizontal_speed(get_f64(
            &limits["MaxHorizontalSpeed"],
            "/Limits/MaxHorizontalSpeed",
        )?)
        .with_max_tilt(get_f64(&limits["MaxTilt"], "/Limits/MaxTilt")?))
}

#[cfg(test)]
mod json_tests {
    use super::*;

    const SCENARIO: &str = r#"{
        "Vehicle": { "X": 500, "Y": 400, "VX": 0, "VY": 0, "Angle": 0, "Fuel": 100 },
        "Terrain": [[0, 60], [250, 140], [400, 100], [600, 100], [1000, 220]],
        "Pad": { "Start": 400, "End": 600 },
        "Limits": { "MaxVerticalSpeed": 2, "MaxHorizontalSpeed": 2, "MaxTilt": 10 }
    }"#;

    #[test]
    fn parses_a_full_scenario() {
        let (spawn, terrain) = parse_scenario(SCENARIO).unwrap();
        assert_eq!(spawn.x, 500.);
        assert_eq!(spawn.fuel, 100.);
        assert_eq!(terrain.pad(), (400., 600.));
        assert_eq!(terrain.iter_points().count(), 5);
        assert_eq!(terrain.limits().max_tilt, 10.);
    }

    #[test]
    fn limits_are_optional() {
        let source = r#"{
            "Vehicle": { "X": 10, "Y": 50, "VX": 0, "VY": 0, "Angle": 0, "Fuel": 5 },
            "Terrain": [[0, 0], [100, 0]],
            "Pad": { "Start": 20, "End": 80 }
        }"#;
        let (_, terrain) = parse_scenario(source).unwrap();
        assert_eq!(
            terrain.limits().max_vertical_speed,
            crate::terrain::defaults::MAX_VERTICAL_SPEED
        );
    }

    #[test]
    fn missing_keys_are_reported_by_path() {
        let source = r#"{ "Terrain": [[0, 0], [100, 0]], "Pad": { "Start": 20, "End": 80 } }"#;
        let err = parse_scenario(source).unwrap_err();
        assert!(err.contains("/Vehicle"));
    }

    #[test]
    fn invalid_terrain_fails_construction() {
        let source = r#"{
            "Vehicle": { "X": 10, "Y": 50, "VX": 0, "VY": 0, "Angle": 0, "Fuel": 5 },
            "Terrain": [[0, 0], [100, 0]],
            "Pad": { "Start": 20, "End": 200 }
        }"#;
        assert!(parse_scenario(source)
            .unwrap_err()
            .contains("PadOutsidePlayfield"));
    }
}
