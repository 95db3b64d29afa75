use std::{
    fmt,
    fmt::Display,
    ops::{
        BitOr,
        BitOrAssign,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

/// An optional rule toggle that can be layered onto a custom format.
///
/// Each option owns one bit of a [`FormatMask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleOption {
    /// Only Pokémon may be used.
    Pokemon,
    /// Illegal and unreleased content is banned.
    Legality,
    /// Teams are revealed before the battle starts.
    Preview,
    /// At most one foe may be put to sleep.
    SleepClause,
    /// Choices can be cancelled before the turn resolves.
    Cancel,
}

impl RuleOption {
    /// Every option, in the order their tags are applied to a format.
    pub const ALL: [RuleOption; 5] = [
        Self::Pokemon,
        Self::Legality,
        Self::Preview,
        Self::SleepClause,
        Self::Cancel,
    ];

    /// The bit this option sets in a [`FormatMask`].
    pub const fn bit(&self) -> u8 {
        match self {
            Self::Pokemon => 1,
            Self::Legality => 2,
            Self::Preview => 4,
            Self::SleepClause => 8,
            Self::Cancel => 16,
        }
    }

    /// Ruleset tags added to a format when the option is active.
    pub fn ruleset_tags(&self) -> &'static [&'static str] {
        match self {
            Self::Pokemon => &["Pokemon"],
            Self::Legality => &[],
            Self::Preview => &["Team Preview"],
            Self::SleepClause => &["Sleep Clause Mod"],
            Self::Cancel => &["Cancel Mod"],
        }
    }

    /// Banlist tags added to a format when the option is active.
    pub fn banlist_tags(&self) -> &'static [&'static str] {
        match self {
            Self::Legality => &["Illegal", "Unreleased"],
            _ => &[],
        }
    }
}

/// The set of active [`RuleOption`]s, as a bit mask.
///
/// Two option sets with the same mask describe the same custom format.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatMask(u8);

impl FormatMask {
    /// A mask with no options set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// The raw mask value.
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Checks if the option is set.
    pub fn contains(&self, option: RuleOption) -> bool {
        self.0 & option.bit() != 0
    }
}

impl Display for FormatMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl BitOr<RuleOption> for FormatMask {
    type Output = FormatMask;

    fn bitor(self, rhs: RuleOption) -> Self::Output {
        Self(self.0 | rhs.bit())
    }
}

impl BitOrAssign<RuleOption> for FormatMask {
    fn bitor_assign(&mut self, rhs: RuleOption) {
        self.0 |= rhs.bit();
    }
}

impl FromIterator<RuleOption> for FormatMask {
    fn from_iter<T: IntoIterator<Item = RuleOption>>(iter: T) -> Self {
        iter.into_iter().fold(Self::empty(), |mask, option| mask | option)
    }
}
