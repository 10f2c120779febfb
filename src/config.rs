use serde::{Deserialize, Serialize};

use crate::util::cwarn;

pub const SNAPSHOT_KEY: &str = "workplace-data";
pub const SETTINGS_KEY: &str = "workplace-settings";
/// Smallest ruler label spacing accepted from an override, in world units.
pub const MIN_RULER_STEP: f64 = 10.0;

/// Tunables for the workspace. Every field falls back to its default when
/// missing from a stored override.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Scale change per unit of wheel `deltaY`.
    pub wheel_sensitivity: f64,
    /// Multiplier applied by the zoom buttons.
    pub button_zoom_factor: f64,
    pub grid_size: f64,
    pub ruler_base_step: f64,
    pub shape_padding: f64,
    pub tray_min: u32,
    pub tray_max: u32,
    pub snapshot_key: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.2,
            max_scale: 10.0,
            wheel_sensitivity: 0.001,
            button_zoom_factor: 1.25,
            grid_size: 20.0,
            ruler_base_step: 50.0,
            shape_padding: 5.0,
            tray_min: 5,
            tray_max: 20,
            snapshot_key: SNAPSHOT_KEY.to_string(),
        }
    }
}

impl WorkspaceConfig {
    /// Parses an override blob. Inverted or non-positive bounds are repaired.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut cfg: WorkspaceConfig = serde_json::from_str(raw)?;
        cfg.sanitize();
        Ok(cfg)
    }

    fn sanitize(&mut self) {
        let defaults = WorkspaceConfig::default();
        if !(self.min_scale > 0.0) {
            self.min_scale = defaults.min_scale;
        }
        if !(self.max_scale >= self.min_scale) {
            self.max_scale = self.min_scale.max(defaults.max_scale);
        }
        if !(self.grid_size > 0.0) {
            self.grid_size = defaults.grid_size;
        }
        if !(self.ruler_base_step > 0.0 && self.ruler_base_step.is_finite()) {
            self.ruler_base_step = defaults.ruler_base_step;
        }
        self.ruler_base_step = self.ruler_base_step.max(MIN_RULER_STEP);
        if !(self.button_zoom_factor > 1.0) {
            self.button_zoom_factor = defaults.button_zoom_factor;
        }
        if self.tray_max < self.tray_min {
            std::mem::swap(&mut self.tray_min, &mut self.tray_max);
        }
    }

    /// Reads the optional override from local storage.
    pub fn load() -> Self {
        let Some(raw) = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|store| store.get_item(SETTINGS_KEY).ok().flatten())
        else {
            return Self::default();
        };
        match Self::from_json(&raw) {
            Ok(cfg) => cfg,
            Err(err) => {
                cwarn(&format!("ignoring malformed {SETTINGS_KEY}: {err}"));
                Self::default()
            }
        }
    }
}
