use anyhow::Result;
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    common::Id,
    config::{
        FormatDefinition,
        FormatDescriptor,
    },
    engine::{
        BattleSession,
        BattleSessionOptions,
    },
};

/// A mod known to the engine, which is a named ruleset variant such as a past generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModDescriptor {
    pub id: Id,
    /// The generation the mod's data belongs to.
    pub generation: u8,
    /// Whether this is the engine's default mod, which all other mods are built on top of.
    #[serde(default)]
    pub is_base: bool,
}

/// The battle simulation engine that formats are installed into and battles are created by.
///
/// This trait can be implemented for different engines. The engine owns battle mechanics
/// entirely; helpers only look up mods and formats, install custom formats, and start battles.
pub trait SimulationEngine: Send + Sync {
    /// Gets a mod by ID.
    fn get_mod(&self, id: &Id) -> Result<Option<ModDescriptor>>;

    /// Gets an entry of the format registry by ID.
    ///
    /// Entries are not necessarily formats; callers should check the effect type.
    fn get_format(&self, id: &Id) -> Result<Option<FormatDescriptor>>;

    /// Installs a format so that battles can later be created with its ID.
    fn install_format(&self, format: &FormatDefinition) -> Result<()>;

    /// Creates a new battle under an installed format.
    fn create_battle(&self, options: BattleSessionOptions) -> Result<Box<dyn BattleSession>>;
}
