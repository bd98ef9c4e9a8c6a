use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted metadata of a training example
///
/// `canonical` and `draft` are the two flags the engine reasons about. Any
/// other key the store or the UI attaches (language, import source, ...)
/// rides along in `extra` as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExampleMetadata {
    /// Designated representative of its canonical group
    #[serde(default)]
    pub canonical: bool,

    /// Produced by an unverified parse rather than curated
    #[serde(default)]
    pub draft: bool,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ExampleMetadata {
    pub fn canonical() -> Self {
        Self {
            canonical: true,
            ..Self::default()
        }
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.extra.insert(key.into(), value);
    }

    /// Shallow merge: flags come from `incoming`, extra keys are unioned
    /// with `incoming` winning on conflicts.
    pub fn merged_with(&self, incoming: &ExampleMetadata) -> ExampleMetadata {
        let mut extra = self.extra.clone();
        extra.extend(
            incoming
                .extra
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        ExampleMetadata {
            canonical: incoming.canonical,
            draft: incoming.draft,
            extra,
        }
    }
}
