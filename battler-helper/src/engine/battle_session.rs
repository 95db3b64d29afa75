use anyhow::Result;
use battler_prng::PrngSeed;
use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

use crate::{
    common::Id,
    graph::GraphValue,
};

/// Options for constructing a battle on the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSessionOptions {
    /// ID of an installed format.
    pub format_id: Id,
    /// Seed of the battle's random number generator.
    pub seed: PrngSeed,
}

/// A player joining a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideOptions {
    /// One-based player slot.
    pub slot: usize,
    /// Display name of the player.
    pub name: String,
    pub priority: u32,
    /// Sets of the player's team, in order. Their contents are up to the engine.
    pub team: Vec<Value>,
}

impl SideOptions {
    /// The conventional ID of the slot, such as `p1`.
    pub fn slot_id(&self) -> String {
        format!("p{}", self.slot)
    }
}

/// A battle owned by the engine.
pub trait BattleSession {
    /// Seats a player in the battle.
    fn join(&mut self, side: SideOptions) -> Result<()>;

    /// The battle's object graph, as it currently stands.
    ///
    /// The graph may share objects between fields and contain cycles.
    fn snapshot(&self) -> GraphValue;
}
