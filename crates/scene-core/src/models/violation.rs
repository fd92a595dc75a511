use std::fmt;

use serde::{Deserialize, Serialize};

use crate::element::{BindingEnd, ElementId, VersionStamp};

/// The scene invariants a collection must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Invariant {
    /// 1. No two records share an id.
    UniqueId,
    /// 2. `boundElements` entries and start/end bindings agree in both directions.
    BindingSymmetry,
    /// 3. A text's `containerId` names a live container that lists it.
    ContainerText,
    /// 4. Group nesting forms a forest.
    GroupForest,
    /// 5. `frameId` names a live frame-like element.
    FrameMembership,
    /// 6. Stamps never move backwards and every change bumps the stamp.
    Monotonicity,
    /// 7. Deletion leaves every other field untouched.
    SoftDelete,
    /// Per-record shape rules (pressure counts, zero version, non-finite geometry).
    RecordShape,
}

impl Invariant {
    /// Numbered invariants; `RecordShape` is unnumbered.
    pub fn number(self) -> Option<u8> {
        match self {
            Self::UniqueId => Some(1),
            Self::BindingSymmetry => Some(2),
            Self::ContainerText => Some(3),
            Self::GroupForest => Some(4),
            Self::FrameMembership => Some(5),
            Self::Monotonicity => Some(6),
            Self::SoftDelete => Some(7),
            Self::RecordShape => None,
        }
    }
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UniqueId => "unique-id",
            Self::BindingSymmetry => "binding-symmetry",
            Self::ContainerText => "container-text",
            Self::GroupForest => "group-forest",
            Self::FrameMembership => "frame-membership",
            Self::Monotonicity => "monotonicity",
            Self::SoftDelete => "soft-delete",
            Self::RecordShape => "record-shape",
        };
        match self.number() {
            Some(n) => write!(f, "#{n} {name}"),
            None => f.write_str(name),
        }
    }
}

/// Suggested fix for a violation. Repairs only ever touch live records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Repair {
    /// Discard a duplicate record of `id`, keeping the newer stamp.
    DropDuplicate {
        id: ElementId,
        kept: VersionStamp,
        dropped: VersionStamp,
    },
    /// Remove `bound` from `container`'s `boundElements`.
    PruneBoundElement {
        container: ElementId,
        bound: ElementId,
    },
    /// Null one end binding of a linear element.
    ClearBinding { element: ElementId, end: BindingEnd },
    /// Null a text element's `containerId`.
    ClearContainer { text: ElementId },
    /// Null an element's `frameId`.
    ClearFrame { element: ElementId },
    /// Remove repeated entries from an element's `groupIds`.
    DedupeGroups { element: ElementId },
    /// Keep only the first `keep` entries of an element's `groupIds`.
    TruncateGroups { element: ElementId, keep: usize },
    /// Nothing can be repaired in place; report only.
    ReportOnly,
}

impl Repair {
    /// The element the repair mutates, if any.
    pub fn target(&self) -> Option<&ElementId> {
        match self {
            Self::DropDuplicate { id, .. } => Some(id),
            Self::PruneBoundElement { container, .. } => Some(container),
            Self::ClearBinding { element, .. }
            | Self::ClearFrame { element }
            | Self::DedupeGroups { element }
            | Self::TruncateGroups { element, .. } => Some(element),
            Self::ClearContainer { text } => Some(text),
            Self::ReportOnly => None,
        }
    }
}

/// One failed invariant check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub invariant: Invariant,
    /// Offending element ids, the element carrying the bad field first.
    pub element_ids: Vec<ElementId>,
    pub message: String,
    pub repair: Repair,
}

impl Violation {
    pub fn new(
        invariant: Invariant,
        element_ids: Vec<ElementId>,
        message: impl Into<String>,
        repair: Repair,
    ) -> Self {
        Self {
            invariant,
            element_ids,
            message: message.into(),
            repair,
        }
    }

    pub fn is_repairable(&self) -> bool {
        !matches!(self.repair, Repair::ReportOnly)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.invariant, self.message)
    }
}
