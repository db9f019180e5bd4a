//! Slot values and sentinel markers
//!
//! Slot values arrive in three shapes: integers (record ids), plain text,
//! and lists of text (multi-valued answers such as `["anything"]`).
//! Equality is shape-sensitive, so `Int(5)` never equals `Text("5")`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Marker for a value the user does not know yet
pub const UNKNOWN: &str = "UNK";

/// Marker an agent uses for a slot it has not filled in
pub const PLACEHOLDER: &str = "PLACEHOLDER";

/// Value the agent informs when no record satisfies the constraints
pub const NO_MATCH: &str = "no match available";

/// Generic "don't care" value the user falls back to
pub const ANYTHING: &str = "anything";

/// Ordered slot-name to value mapping
///
/// Ordered so that random tie-breaks over slot candidates are reproducible
/// for a given seed.
pub type SlotMap = BTreeMap<String, SlotValue>;

/// A single slot value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    /// Integer value (record ids, counts)
    Int(i64),
    /// Single text value
    Text(String),
    /// Multi-valued answer
    List(Vec<String>),
}

impl SlotValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// The `"UNK"` marker
    pub fn unknown() -> Self {
        Self::Text(UNKNOWN.to_string())
    }

    /// The `["anything"]` answer
    pub fn anything() -> Self {
        Self::List(vec![ANYTHING.to_string()])
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Text(s) if s == UNKNOWN)
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Text(s) if s == PLACEHOLDER)
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::Text(s) if s == NO_MATCH)
    }

    /// Whether the value already says "anything"
    ///
    /// Text matches on substring, lists on membership. Integers never match.
    pub fn mentions_anything(&self) -> bool {
        match self {
            Self::Int(_) => false,
            Self::Text(s) => s.contains(ANYTHING),
            Self::List(items) => items.iter().any(|item| item == ANYTHING),
        }
    }

    /// Length for text and lists, `None` for integers
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Int(_) => None,
            Self::Text(s) => Some(s.len()),
            Self::List(items) => Some(items.len()),
        }
    }

    /// True for an empty string or an empty list
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// The value rendered as text (`Int(7)` becomes `Text("7")`)
    pub fn stringified(&self) -> SlotValue {
        match self {
            Self::Text(_) => self.clone(),
            other => Self::Text(other.to_string()),
        }
    }

    /// Interpret the value as a record id
    pub fn as_record_id(&self) -> Option<i64> {
        match self {
            Self::Int(id) => Some(*id),
            Self::Text(s) => s.trim().parse().ok(),
            Self::List(_) => None,
        }
    }
}

impl fmt::Display for SlotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotValue::Int(v) => write!(f, "{}", v),
            SlotValue::Text(s) => write!(f, "{}", s),
            SlotValue::List(items) => {
                let quoted: Vec<String> = items.iter().map(|i| format!("'{}'", i)).collect();
                write!(f, "[{}]", quoted.join(", "))
            },
        }
    }
}

impl From<&str> for SlotValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SlotValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for SlotValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Vec<String>> for SlotValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}
