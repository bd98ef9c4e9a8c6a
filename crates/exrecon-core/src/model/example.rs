use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use super::metadata::ExampleMetadata;
use super::payload::Payload;
use crate::rules::RowStatus;

/// One entity annotation inside an utterance
///
/// Only `entity` (the type) takes part in matching; value and span are
/// carried for the store and the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAnnotation {
    pub entity: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
}

impl EntityAnnotation {
    pub fn new(entity: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            value: value.into(),
            start: None,
            end: None,
        }
    }

    pub fn with_span(mut self, start: usize, end: usize) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }
}

/// Transient edit provenance, owned by the engine and never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Provenance {
    /// Not yet known to the backing store
    pub is_new: bool,
    pub edited: bool,
    /// Reversible until commit
    pub deleted: bool,
    /// Intent/entity types no longer match the session payload
    pub invalid: bool,
    /// `metadata.canonical` differs from what the store holds
    pub canonical_edited: bool,
    /// The example currently focused by the host view
    pub is_displayed: bool,
}

impl Provenance {
    /// Any marker the user would lose on cancel
    pub fn is_dirty(&self) -> bool {
        self.edited || self.is_new || self.invalid || self.canonical_edited || self.deleted
    }
}

/// A training example under edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub id: String,
    pub text: String,
    pub intent: String,
    #[serde(default)]
    pub entities: Vec<EntityAnnotation>,
    #[serde(default)]
    pub metadata: ExampleMetadata,
    #[serde(default)]
    pub provenance: Provenance,
}

impl Example {
    pub fn new(id: impl Into<String>, text: impl Into<String>, intent: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            intent: intent.into(),
            entities: Vec::new(),
            metadata: ExampleMetadata::default(),
            provenance: Provenance::default(),
        }
    }

    pub fn with_entity(mut self, entity: EntityAnnotation) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn with_metadata(mut self, metadata: ExampleMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Distinct entity types, sorted
    pub fn entity_types(&self) -> BTreeSet<&str> {
        self.entities.iter().map(|e| e.entity.as_str()).collect()
    }

    pub fn is_canonical(&self) -> bool {
        self.metadata.canonical
    }

    pub fn is_deleted(&self) -> bool {
        self.provenance.deleted
    }

    /// Row label for the host list view, see [`RowStatus::of`]
    pub fn modification_label(&self, payload: &Payload) -> Option<RowStatus> {
        RowStatus::of(self, payload)
    }

    /// Same persisted content, ignoring provenance
    pub fn same_content(&self, other: &Example) -> bool {
        self.text == other.text
            && self.intent == other.intent
            && self.entities == other.entities
            && self.metadata == other.metadata
    }
}

/// A candidate example produced by a parser or typed by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub id: Option<String>,
    pub text: String,
    pub intent: String,
    #[serde(default)]
    pub entities: Vec<EntityAnnotation>,
    #[serde(default)]
    pub metadata: ExampleMetadata,
}

impl Candidate {
    pub fn new(text: impl Into<String>, intent: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            intent: intent.into(),
            entities: Vec::new(),
            metadata: ExampleMetadata::default(),
        }
    }

    pub fn with_entity(mut self, entity: EntityAnnotation) -> Self {
        self.entities.push(entity);
        self
    }

    /// Turn into a working-set record flagged `is_new`
    ///
    /// A candidate without an id gets a UUIDv7 placeholder so it can be
    /// edited and deleted before it is ever persisted.
    pub fn into_new_example(self) -> Example {
        Example {
            id: self.id.unwrap_or_else(|| Uuid::now_v7().to_string()),
            text: self.text,
            intent: self.intent,
            entities: self.entities,
            metadata: self.metadata,
            provenance: Provenance {
                is_new: true,
                ..Provenance::default()
            },
        }
    }
}
