use std::{
    fmt,
    fmt::Display,
    str::FromStr,
};

use anyhow::Error;
use serde_string_enum::{
    DeserializeStringEnum,
    SerializeStringEnum,
};

use crate::common::Id;

/// The type of battle a format is played in.
///
/// Game types outside of the three known to this crate are kept as an opaque identifier rather
/// than rejected, so engines with more battle types can still receive them.
#[derive(
    Debug, Default, Clone, PartialEq, Eq, Hash, SerializeStringEnum, DeserializeStringEnum,
)]
pub enum GameType {
    /// One Mon from each player battles at a time.
    #[default]
    Singles,
    /// Two Mons from each player battle at a time.
    Doubles,
    /// Three Mons from each player battle at a time.
    Triples,
    /// A game type unknown to this crate.
    ///
    /// Prefer building game types with [`GameType::from`], which never produces `Other` for a known
    /// or empty ID. Helpers canonicalize game types before using them either way.
    Other(Id),
}

impl GameType {
    /// The canonical identifier of the game type.
    pub fn id(&self) -> Id {
        match self {
            Self::Singles => Id::from_known("singles"),
            Self::Doubles => Id::from_known("doubles"),
            Self::Triples => Id::from_known("triples"),
            Self::Other(id) => id.clone(),
        }
    }

    /// The canonical form of the game type.
    ///
    /// `Other` values that name a known game type, or nothing at all, are folded into the matching
    /// variant, so equal game types always compare and hash equal.
    pub fn canonical(&self) -> Self {
        match self {
            Self::Other(id) => Self::from(id.clone()),
            known => known.clone(),
        }
    }

    /// The word used for this game type in custom format names.
    ///
    /// Singles is the default and is left out of names entirely.
    pub fn name_prefix(&self) -> Option<String> {
        match self {
            Self::Singles => None,
            _ => Some(capitalize(self.id().as_ref())),
        }
    }
}

impl From<Id> for GameType {
    fn from(value: Id) -> Self {
        match value.as_ref() {
            "" | "singles" => Self::Singles,
            "doubles" => Self::Doubles,
            "triples" => Self::Triples,
            _ => Self::Other(value),
        }
    }
}

impl FromStr for GameType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(Id::from(s)))
    }
}

impl Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
