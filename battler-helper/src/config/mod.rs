mod format;
mod format_options;
mod game_type;
mod rule_option;
mod truthy;

pub use format::{
    EffectType,
    FormatDefinition,
    FormatDescriptor,
};
pub use format_options::FormatOptions;
pub use game_type::GameType;
pub use rule_option::{
    FormatMask,
    RuleOption,
};
pub(crate) use truthy::is_truthy;
