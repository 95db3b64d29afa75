//! Object graphs and their JSON serialization.
//!
//! Engines describe battle state as a [`GraphValue`], in which objects are shared by reference and
//! may form cycles. [`CircularSafeSerializer`] turns such a graph into JSON without failing.

mod serializer;
mod value;

pub use serializer::{
    CircularSafeSerializer,
    DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_DETACHED_DEPTH,
    serialize,
    serialize_to_value,
};
pub use value::{
    GraphObject,
    GraphValue,
    WeakGraphObject,
};
