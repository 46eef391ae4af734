use std::path::Path;

use super::json;
use crate::{App, Session};

impl App {
    pub fn try_from_file<P: AsRef<Path>>(scenario_path: P) -> Result<Self, String> {
        let (spawn, terrain) = json::from_file(scenario_path)?;
        Ok(App::new(Session::new(terrain, spawn)))
    }
}
