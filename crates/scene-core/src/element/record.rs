//! The versioned element record and its lifecycle.
//!
//! A record is created at version 1. Every semantic mutation bumps the
//! version and re-randomizes the nonce; deletion is itself a mutation and
//! leaves every other field in place.
//!
//! # Examples
//!
//! ```
//! use scene_core::{Element, ElementKind};
//!
//! let mut rect = Element::new("r1", ElementKind::Rectangle);
//! assert_eq!(rect.stamp().version, 1);
//!
//! rect.mutate(|el| el.base.width = 120.0);
//! rect.mark_deleted();
//! assert_eq!(rect.stamp().version, 3);
//! assert_eq!(rect.base.width, 120.0);
//! ```

use rand::Rng;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::base::ElementBase;
use super::id::{ElementId, GroupId};
use super::kind::ElementKind;
use super::stamp::VersionStamp;
use crate::constants::INITIAL_VERSION;
use crate::errors::{RecordError, SceneError, SceneResult};

/// One drawable object: shared base fields plus variant data.
///
/// Deserializing goes through [`Element::from_json`], so a record missing
/// `id`, `type`, `version` or `versionNonce` is an error rather than a
/// defaulted value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    #[serde(flatten)]
    pub base: ElementBase,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    /// Create a new record at version 1 with a random nonce and seed.
    pub fn new(id: impl Into<ElementId>, kind: ElementKind) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            base: ElementBase {
                id: id.into(),
                seed: rng.gen_range(1..i64::from(i32::MAX)),
                version: INITIAL_VERSION,
                version_nonce: random_nonce(),
                updated: now_millis(),
                ..ElementBase::default()
            },
            kind,
        }
    }

    pub fn id(&self) -> &ElementId {
        &self.base.id
    }

    pub fn stamp(&self) -> VersionStamp {
        VersionStamp::new(self.base.version, self.base.version_nonce)
    }

    pub fn is_deleted(&self) -> bool {
        self.base.is_deleted
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Apply a semantic mutation and bump the version.
    pub fn mutate<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self),
    {
        f(self);
        self.bump_version();
    }

    /// Increment the version, re-randomize the nonce, refresh `updated`.
    pub fn bump_version(&mut self) {
        self.base.version += 1;
        self.base.version_nonce = random_nonce();
        self.base.updated = now_millis();
    }

    /// Soft-delete. All other fields are retained so a later undelete can
    /// restore the element as it was.
    pub fn mark_deleted(&mut self) {
        self.mutate(|el| el.base.is_deleted = true);
    }

    /// Undelete via a still-higher version.
    pub fn restore(&mut self) {
        self.mutate(|el| el.base.is_deleted = false);
    }

    // --- Builder helpers ---

    pub fn with_geometry(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.base.x = x;
        self.base.y = y;
        self.base.width = width;
        self.base.height = height;
        self
    }

    pub fn with_stamp(mut self, version: u64, nonce: i64) -> Self {
        self.base.version = version;
        self.base.version_nonce = nonce;
        self
    }

    pub fn with_groups<I, G>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<GroupId>,
    {
        self.base.group_ids = groups.into_iter().map(Into::into).collect();
        self
    }

    pub fn in_frame(mut self, frame_id: impl Into<ElementId>) -> Self {
        self.base.frame_id = Some(frame_id.into());
        self
    }

    pub fn deleted(mut self) -> Self {
        self.base.is_deleted = true;
        self
    }

    // --- Validation & persistence ---

    /// Structural sanity of a single record, independent of the scene.
    pub fn check(&self) -> Result<(), RecordError> {
        if self.base.id.is_empty() {
            return Err(RecordError::EmptyId);
        }
        if let Some((field, _)) = self
            .base
            .geometry()
            .into_iter()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(RecordError::NonFiniteGeometry {
                field: field.to_string(),
            });
        }
        Ok(())
    }

    /// Decode a raw persisted record.
    ///
    /// `id`, `type`, `version` and `versionNonce` are required; the version
    /// fields must be integers. Everything else falls back to defaults.
    pub fn from_json(value: Value) -> SceneResult<Self> {
        let id = value
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| SceneError::invalid_record("<unknown>", missing("id")))?;

        let type_name = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| SceneError::invalid_record(&id, missing("type")))?;
        if !ElementKind::TYPE_NAMES.contains(&type_name) {
            return Err(SceneError::invalid_record(
                &id,
                RecordError::UnknownType {
                    type_name: type_name.to_string(),
                },
            ));
        }

        require_integer(&value, &id, "version", Value::is_u64)?;
        require_integer(&value, &id, "versionNonce", Value::is_i64)?;

        let Fields { base, kind } = serde_json::from_value(value).map_err(|e| {
            SceneError::invalid_record(
                &id,
                RecordError::Malformed {
                    message: e.to_string(),
                },
            )
        })?;
        let element = Element { base, kind };
        element
            .check()
            .map_err(|source| SceneError::invalid_record(&id, source))?;
        Ok(element)
    }

    pub fn to_json(&self) -> SceneResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Deterministic byte encoding used to order records whose stamps tie.
    pub fn canonical_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Lenient field decoding behind [`Element::from_json`], which checks the
/// required fields first.
#[derive(Deserialize)]
struct Fields {
    #[serde(flatten)]
    base: ElementBase,
    #[serde(flatten)]
    kind: ElementKind,
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Element::from_json(value).map_err(de::Error::custom)
    }
}

fn missing(field: &str) -> RecordError {
    RecordError::MissingField {
        field: field.to_string(),
    }
}

fn require_integer(
    value: &Value,
    id: &str,
    field: &str,
    is_integer: fn(&Value) -> bool,
) -> SceneResult<()> {
    match value.get(field) {
        None | Some(Value::Null) => Err(SceneError::invalid_record(id, missing(field))),
        Some(v) if is_integer(v) => Ok(()),
        Some(v) => Err(SceneError::invalid_record(
            id,
            RecordError::NonNumeric {
                field: field.to_string(),
                found: v.to_string(),
            },
        )),
    }
}

fn random_nonce() -> i64 {
    rand::thread_rng().gen_range(0..i64::from(i32::MAX))
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
