mod hash;
mod id;
#[cfg(test)]
mod test_util;

pub use hash::{
    FastHashMap,
    FastHashSet,
};
pub use id::{
    Id,
    Identifiable,
};
#[cfg(test)]
pub use test_util::{
    test_string_deserialization,
    test_string_serialization,
};
