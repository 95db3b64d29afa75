mod error_assert;
mod test_battle;
mod test_engine;

pub use error_assert::{
    assert_error_message,
    assert_error_message_contains,
};
pub use test_battle::TestBattle;
pub use test_engine::{
    TestEngine,
    TestEngineBuilder,
};
