mod battle;
mod instance;
mod service;

pub use battle::{
    BattleOptions,
    DEFAULT_SEED,
};
pub use instance::HelperInstance;
pub use service::{
    FormatService,
    FormatServiceOptions,
};
