mod battle_session;
mod engine;

pub use battle_session::{
    BattleSession,
    BattleSessionOptions,
    SideOptions,
};
pub use engine::{
    ModDescriptor,
    SimulationEngine,
};
