//! Partial-update patch types for task mutation.

use serde::{Deserialize, Deserializer};

/// A partial set of proposed field updates for an existing task.
///
/// Each field is independently present or absent; absent fields leave the
/// task untouched. Unknown keys in the source document are ignored, and an
/// explicit JSON `null` is treated the same as an absent key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskPatch {
    /// Proposed title, untrimmed as received.
    pub title: Option<String>,
    /// Proposed description, untrimmed as received.
    pub description: Option<String>,
    /// Proposed completion flag, retaining type mismatches for validation.
    pub completed: Option<CompletedPatch>,
}

impl TaskPatch {
    /// Returns `true` when the patch proposes no changes at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

/// Proposed value for the `completed` flag.
///
/// Deserialisation never fails on a wrongly typed value: the mismatch is
/// carried through so field validation can report it alongside any other
/// violations instead of aborting the request at the parse stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletedPatch {
    /// The patch carried a boolean value.
    Flag(bool),
    /// The patch carried a value of some other type.
    NotABoolean,
}

impl<'de> Deserialize<'de> for CompletedPatch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Bool(flag) => Self::Flag(flag),
            _ => Self::NotABoolean,
        })
    }
}

/// Fully validated changes staged for a single atomic apply.
///
/// Produced only after every field check has passed; committing is a plain
/// field-by-field move with no remaining failure paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedUpdate {
    /// Trimmed replacement title, when the patch carried one.
    pub title: Option<String>,
    /// Trimmed replacement description, when the patch carried one.
    pub description: Option<String>,
    /// Replacement completion flag, when the patch carried one.
    pub completed: Option<bool>,
}
