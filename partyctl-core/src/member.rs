//! Party member records as served by the party store

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Maximum number of moves a member can have selected
pub const MAX_SELECTED_MOVES: usize = 4;

/// Server-assigned member identifier.
///
/// Stores hand out either numeric or string ids. Two ids are equal when they
/// render to the same path segment, so `1` and `"1"` name the same member.
/// Numbers that are not integers (`1.5`, `1e3`) are kept as their JSON text.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MemberId {
    Number(i64),
    Text(String),
}

impl MemberId {
    /// Percent-encoded path segment used in `/party/{id}`
    pub fn as_path_segment(&self) -> String {
        urlencoding::encode(&self.to_string()).into_owned()
    }
}

impl<'de> Deserialize<'de> for MemberId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => Ok(match n.as_i64() {
                Some(n) => MemberId::Number(n),
                None => MemberId::Text(n.to_string()),
            }),
            Value::String(s) => Ok(MemberId::Text(s)),
            other => Err(de::Error::custom(format!(
                "expected a number or string id, got {}",
                other
            ))),
        }
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberId::Number(n) => write!(f, "{}", n),
            MemberId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl PartialEq for MemberId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MemberId::Number(a), MemberId::Number(b)) => a == b,
            (MemberId::Text(a), MemberId::Text(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl Eq for MemberId {}

impl Hash for MemberId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl From<i64> for MemberId {
    fn from(n: i64) -> Self {
        MemberId::Number(n)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        MemberId::Text(s.to_string())
    }
}

impl FromStr for MemberId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<i64>() {
            Ok(n) => MemberId::Number(n),
            Err(_) => MemberId::Text(s.to_string()),
        })
    }
}

/// One creature in the party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyMember {
    pub id: MemberId,
    pub name: String,
    #[serde(default)]
    pub official_artwork: String,
    #[serde(default)]
    pub learnable_moves: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_moves: Option<Vec<String>>,

    /// Fields the store sends that we do not interpret (types, sprites, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PartyMember {
    /// Moves shown outside of move editing: the stored selection, or the
    /// first four learnable moves when nothing has been selected yet.
    pub fn displayed_moves(&self) -> &[String] {
        match self.selected_moves.as_deref() {
            Some(selected) => selected,
            None => {
                let end = self.learnable_moves.len().min(MAX_SELECTED_MOVES);
                &self.learnable_moves[..end]
            }
        }
    }

    /// Whether `name` is one of this member's learnable moves
    pub fn can_learn(&self, name: &str) -> bool {
        self.learnable_moves.iter().any(|m| m == name)
    }
}

/// Partial update body for `PATCH /party/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_moves: Option<Vec<String>>,
}

impl MemberPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn moves(moves: Vec<String>) -> Self {
        Self {
            selected_moves: Some(moves),
            ..Self::default()
        }
    }

    /// Apply this patch to a copy of `member`
    pub fn applied_to(&self, member: &PartyMember) -> PartyMember {
        let mut updated = member.clone();
        if let Some(ref name) = self.name {
            updated.name = name.clone();
        }
        if let Some(ref moves) = self.selected_moves {
            updated.selected_moves = Some(moves.clone());
        }
        updated
    }
}
