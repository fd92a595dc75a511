use serde::{Deserialize, Deserializer, Serialize};

use super::id::{ElementId, GroupId};

/// Fill pattern for closed shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillStyle {
    #[default]
    Hachure,
    CrossHatch,
    Solid,
    Zigzag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Corner rounding. `kind` is the rounding algorithm, `value` an optional radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roundness {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// What kind of element declares a binding to the owner of a `boundElements` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundElementType {
    Arrow,
    Text,
}

/// Entry in a bound-to element's `boundElements` index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundElement {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: BoundElementType,
}

impl BoundElement {
    pub fn arrow(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            kind: BoundElementType::Arrow,
        }
    }

    pub fn text(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            kind: BoundElementType::Text,
        }
    }
}

/// Fields shared by every element variant.
///
/// Geometry and style are orthogonal to reconciliation and copied verbatim.
/// `version`/`version_nonce` are authoritative for ordering; `updated` is advisory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementBase {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
    pub stroke_color: String,
    pub background_color: String,
    pub fill_style: FillStyle,
    pub stroke_width: f64,
    pub stroke_style: StrokeStyle,
    pub roundness: Option<Roundness>,
    pub roughness: f64,
    pub opacity: f64,
    /// Seed for deterministic hand-drawn rendering.
    pub seed: i64,
    pub version: u64,
    pub version_nonce: i64,
    /// Epoch milliseconds of the last mutation.
    pub updated: i64,
    pub is_deleted: bool,
    /// Innermost group first.
    pub group_ids: Vec<GroupId>,
    pub frame_id: Option<ElementId>,
    #[serde(deserialize_with = "null_as_empty")]
    pub bound_elements: Vec<BoundElement>,
    pub link: Option<String>,
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<serde_json::Value>,
}

impl Default for ElementBase {
    fn default() -> Self {
        Self {
            id: ElementId::default(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            angle: 0.0,
            stroke_color: "#1e1e1e".to_string(),
            background_color: "transparent".to_string(),
            fill_style: FillStyle::default(),
            stroke_width: 2.0,
            stroke_style: StrokeStyle::default(),
            roundness: None,
            roughness: 1.0,
            opacity: 100.0,
            seed: 0,
            version: 0,
            version_nonce: 0,
            updated: 0,
            is_deleted: false,
            group_ids: Vec::new(),
            frame_id: None,
            bound_elements: Vec::new(),
            link: None,
            locked: false,
            custom_data: None,
        }
    }
}

impl ElementBase {
    /// Whether `boundElements` lists `id` with the given binding type.
    pub fn lists_bound(&self, id: &ElementId, kind: BoundElementType) -> bool {
        self.bound_elements
            .iter()
            .any(|bound| &bound.id == id && bound.kind == kind)
    }

    /// Geometry fields by name, for finiteness checks.
    pub(crate) fn geometry(&self) -> [(&'static str, f64); 8] {
        [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
            ("angle", self.angle),
            ("strokeWidth", self.stroke_width),
            ("roughness", self.roughness),
            ("opacity", self.opacity),
        ]
    }
}

/// `boundElements` is persisted as either `null` or an array.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<BoundElement>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<BoundElement>>::deserialize(deserializer)?.unwrap_or_default())
}
