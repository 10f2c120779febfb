//! Workspace snapshot stored under a single local-storage key.
//!
//! ```json
//! { "transform": "translate(x,y) scale(s)",
//!   "polygons": [{ "points": "x1,y1 x2,y2", "fill": "...",
//!                  "transform": "translate(x,y)", "dataId": "..." }] }
//! ```
//! Transform strings are only produced and parsed here; the rest of the crate
//! works with [`Viewport`] and [`Point`].

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use web_sys::Storage;

use crate::error::{Result, WorkspaceError};
use crate::geometry::{self, Point};
use crate::model::{Board, Shape};
use crate::state::viewport::Viewport;

// Leading number of an argument; trailing units or extra arguments are ignored.
const NUM: &str = r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?";

static TRANSLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"translate\(\s*({NUM})[^,\s)]*(?:\s*,\s*|\s+)({NUM})")).expect("translate pattern")
});
static SCALE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"scale\(\s*({NUM})")).expect("scale pattern"));

/// Translation in a transform string; `(0,0)` when absent or malformed.
pub fn parse_translate(raw: &str) -> Point {
    TRANSLATE_RE
        .captures(raw)
        .and_then(|caps| {
            let x = caps[1].parse::<f64>().ok()?;
            let y = caps[2].parse::<f64>().ok()?;
            (x.is_finite() && y.is_finite()).then_some(Point::new(x, y))
        })
        .unwrap_or(Point::ORIGIN)
}

/// Scale in a transform string; `1` when absent or malformed.
pub fn parse_scale(raw: &str) -> f64 {
    SCALE_RE
        .captures(raw)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(1.0)
}

pub fn parse_viewport(raw: &str) -> Viewport {
    let t = parse_translate(raw);
    Viewport::new(t.x, t.y, parse_scale(raw))
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonRecord {
    #[serde(default)]
    pub points: String,
    #[serde(default)]
    pub fill: String,
    #[serde(default)]
    pub transform: String,
    #[serde(rename = "dataId", default)]
    pub data_id: String,
}

impl PolygonRecord {
    pub fn from_shape(shape: &Shape) -> Self {
        Self {
            points: shape.points_attr(),
            fill: shape.fill.clone(),
            transform: shape
                .transform_attr()
                .unwrap_or_else(|| "translate(0,0)".to_string()),
            data_id: shape.id.clone(),
        }
    }

    /// Records without an id get a fresh one; empty fills get the default.
    pub fn into_shape(self) -> Shape {
        let id = if self.data_id.trim().is_empty() {
            Shape::new_id()
        } else {
            self.data_id
        };
        let fill = if self.fill.trim().is_empty() {
            crate::model::DEFAULT_FILL.to_string()
        } else {
            self.fill
        };
        Shape {
            id,
            points: geometry::parse_points(&self.points),
            fill,
            placement: Some(parse_translate(&self.transform)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub transform: String,
    #[serde(default)]
    pub polygons: Vec<PolygonRecord>,
}

impl Snapshot {
    pub fn capture(board: &Board) -> Self {
        Self {
            transform: board.viewport.transform_attr(),
            polygons: board.workspace.iter().map(PolygonRecord::from_shape).collect(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        parse_viewport(&self.transform)
    }

    /// Shapes in paint order.
    pub fn into_shapes(self) -> Vec<Shape> {
        let mut seen = std::collections::HashSet::new();
        self.polygons
            .into_iter()
            .map(PolygonRecord::into_shape)
            .filter(|s| seen.insert(s.id.clone()))
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(WorkspaceError::Encode)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(WorkspaceError::Decode)
    }
}

fn storage() -> Result<Storage> {
    web_sys::window()
        .ok_or(WorkspaceError::StorageUnavailable)?
        .local_storage()
        .map_err(|e| WorkspaceError::Storage(format!("{e:?}")))?
        .ok_or(WorkspaceError::StorageUnavailable)
}

pub fn load(key: &str) -> Result<Option<Snapshot>> {
    let raw = storage()?
        .get_item(key)
        .map_err(|e| WorkspaceError::Storage(format!("{e:?}")))?;
    match raw {
        Some(raw) if !raw.trim().is_empty() => Snapshot::from_json(&raw).map(Some),
        _ => Ok(None),
    }
}

pub fn save(key: &str, snapshot: &Snapshot) -> Result<()> {
    let json = snapshot.to_json()?;
    storage()?
        .set_item(key, &json)
        .map_err(|e| WorkspaceError::Storage(format!("{e:?}")))
}

pub fn clear(key: &str) -> Result<()> {
    storage()?
        .remove_item(key)
        .map_err(|e| WorkspaceError::Storage(format!("{e:?}")))
}
