mod context;
mod error;
mod helper_error;

pub use error::{
    WrapError,
    WrapOptionError,
    WrapResultError,
};
pub use helper_error::{
    CyclicStructureError,
    GeneralError,
    InvalidTeamError,
    NotFoundError,
    UnknownModError,
    general_error,
    invalid_team_error,
    not_found_error,
    unknown_mod_error,
};
