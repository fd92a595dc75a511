//! Variant-specific element data.
//!
//! The `type` tag of the persisted record selects the variant. Unit variants
//! carry geometry only; everything they need lives in [`super::ElementBase`].

use serde::{Deserialize, Serialize};

use super::id::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrowhead {
    Arrow,
    Bar,
    Dot,
    Circle,
    Triangle,
    Diamond,
}

/// Persistence state of an image's binary content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    #[default]
    Pending,
    Saved,
    Error,
}

/// Which end of a linear element a binding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingEnd {
    Start,
    End,
}

/// Attachment of one end of a linear element to a bindable element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointBinding {
    pub element_id: ElementId,
    /// Attachment point parameter along the target's outline, -1..=1.
    pub focus: f64,
    /// Visual offset from the target's outline.
    pub gap: f64,
}

impl PointBinding {
    pub fn new(element_id: impl Into<ElementId>) -> Self {
        Self {
            element_id: element_id.into(),
            focus: 0.0,
            gap: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextData {
    /// Rendered text, possibly wrapped for display.
    pub text: String,
    /// Source of truth for edits.
    pub original_text: String,
    pub font_size: f64,
    pub font_family: u32,
    pub text_align: TextAlign,
    pub vertical_align: VerticalAlign,
    pub container_id: Option<ElementId>,
    pub line_height: f64,
    pub auto_resize: bool,
}

impl Default for TextData {
    fn default() -> Self {
        Self {
            text: String::new(),
            original_text: String::new(),
            font_size: 20.0,
            font_family: 1,
            text_align: TextAlign::default(),
            vertical_align: VerticalAlign::default(),
            container_id: None,
            line_height: 1.25,
            auto_resize: true,
        }
    }
}

/// Lines and arrows: local-space points plus optional end bindings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinearData {
    pub points: Vec<[f64; 2]>,
    pub last_committed_point: Option<[f64; 2]>,
    pub start_binding: Option<PointBinding>,
    pub end_binding: Option<PointBinding>,
    pub start_arrowhead: Option<Arrowhead>,
    pub end_arrowhead: Option<Arrowhead>,
    pub elbowed: bool,
}

impl LinearData {
    pub fn binding(&self, end: BindingEnd) -> Option<&PointBinding> {
        match end {
            BindingEnd::Start => self.start_binding.as_ref(),
            BindingEnd::End => self.end_binding.as_ref(),
        }
    }

    pub fn binding_mut(&mut self, end: BindingEnd) -> &mut Option<PointBinding> {
        match end {
            BindingEnd::Start => &mut self.start_binding,
            BindingEnd::End => &mut self.end_binding,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FreedrawData {
    pub points: Vec<[f64; 2]>,
    /// One value per point unless `simulate_pressure` is set.
    pub pressures: Vec<f64>,
    pub simulate_pressure: bool,
    pub last_committed_point: Option<[f64; 2]>,
}

impl Default for FreedrawData {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            pressures: Vec::new(),
            simulate_pressure: true,
            last_committed_point: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageData {
    /// Opaque reference resolved by the external file store.
    pub file_id: Option<String>,
    pub status: FileStatus,
    /// Axis flip factors, each 1 or -1.
    pub scale: [f64; 2],
}

impl Default for ImageData {
    fn default() -> Self {
        Self {
            file_id: None,
            status: FileStatus::default(),
            scale: [1.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameData {
    pub name: Option<String>,
}

/// One variant per element kind, discriminated by the record's `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Rectangle,
    Diamond,
    Ellipse,
    Selection,
    Text(TextData),
    Line(LinearData),
    Arrow(LinearData),
    Freedraw(FreedrawData),
    Image(ImageData),
    Frame(FrameData),
    #[serde(rename = "magicframe")]
    MagicFrame(FrameData),
    Embeddable,
    Iframe,
}

impl ElementKind {
    /// Every persisted `type` tag.
    pub const TYPE_NAMES: [&'static str; 13] = [
        "rectangle",
        "diamond",
        "ellipse",
        "selection",
        "text",
        "line",
        "arrow",
        "freedraw",
        "image",
        "frame",
        "magicframe",
        "embeddable",
        "iframe",
    ];

    /// The persisted `type` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Diamond => "diamond",
            Self::Ellipse => "ellipse",
            Self::Selection => "selection",
            Self::Text(_) => "text",
            Self::Line(_) => "line",
            Self::Arrow(_) => "arrow",
            Self::Freedraw(_) => "freedraw",
            Self::Image(_) => "image",
            Self::Frame(_) => "frame",
            Self::MagicFrame(_) => "magicframe",
            Self::Embeddable => "embeddable",
            Self::Iframe => "iframe",
        }
    }

    /// Valid target for an arrow's start/end binding.
    pub fn is_bindable(&self) -> bool {
        matches!(
            self,
            Self::Rectangle
                | Self::Diamond
                | Self::Ellipse
                | Self::Text(_)
                | Self::Image(_)
                | Self::Frame(_)
                | Self::MagicFrame(_)
                | Self::Embeddable
                | Self::Iframe
        )
    }

    /// Valid owner of a bound text element (`containerId`).
    pub fn is_text_container(&self) -> bool {
        matches!(
            self,
            Self::Rectangle | Self::Diamond | Self::Ellipse | Self::Arrow(_)
        )
    }

    pub fn is_frame_like(&self) -> bool {
        matches!(self, Self::Frame(_) | Self::MagicFrame(_))
    }

    pub fn is_linear(&self) -> bool {
        matches!(self, Self::Line(_) | Self::Arrow(_))
    }

    pub fn as_text(&self) -> Option<&TextData> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextData> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_linear(&self) -> Option<&LinearData> {
        match self {
            Self::Line(linear) | Self::Arrow(linear) => Some(linear),
            _ => None,
        }
    }

    pub fn as_linear_mut(&mut self) -> Option<&mut LinearData> {
        match self {
            Self::Line(linear) | Self::Arrow(linear) => Some(linear),
            _ => None,
        }
    }

    /// The owning container of a text element.
    pub fn container_id(&self) -> Option<&ElementId> {
        self.as_text().and_then(|text| text.container_id.as_ref())
    }

    /// Declared start/end bindings of a linear element.
    pub fn bindings(&self) -> impl Iterator<Item = (BindingEnd, &PointBinding)> {
        let linear = self.as_linear();
        [BindingEnd::Start, BindingEnd::End]
            .into_iter()
            .filter_map(move |end| linear.and_then(|l| l.binding(end)).map(|b| (end, b)))
    }
}
