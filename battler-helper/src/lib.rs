//! # battler-helper
//!
//! **battler-helper** sits in front of a Pokémon battle simulation engine. It derives custom
//! formats from a handful of rule toggles, installs each one into the engine once, creates battles
//! in those formats, and snapshots the battle's object graph as JSON even when the graph shares
//! objects or contains cycles.
//!
//! The engine itself is abstracted behind [`SimulationEngine`]. Start with a [`FormatService`],
//! which resolves mods, generations, and base formats to a [`HelperInstance`].
extern crate alloc;

pub mod common;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod helper;

pub use battler_prng::PrngSeed;
pub use common::Id;
pub use config::{
    FormatDefinition,
    FormatOptions,
    GameType,
    RuleOption,
};
pub use engine::{
    BattleSession,
    SimulationEngine,
};
pub use helper::{
    BattleOptions,
    DEFAULT_SEED,
    FormatService,
    FormatServiceOptions,
    HelperInstance,
};
