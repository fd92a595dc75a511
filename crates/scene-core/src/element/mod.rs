//! The element data model.
//!
//! Every drawable object is an [`Element`]: a shared [`ElementBase`] plus an
//! [`ElementKind`] carrying the variant-specific fields. Cross-references
//! between elements are plain ids resolved through the scene on demand.

pub mod base;
pub mod id;
pub mod kind;
pub mod record;
pub mod stamp;

pub use base::{BoundElement, BoundElementType, ElementBase, FillStyle, Roundness, StrokeStyle};
pub use record::Element;
pub use id::{ElementId, GroupId};
pub use kind::{
    Arrowhead, BindingEnd, ElementKind, FileStatus, FrameData, FreedrawData, ImageData,
    LinearData, PointBinding, TextAlign, TextData, VerticalAlign,
};
pub use stamp::VersionStamp;
