use anyhow::Result;
use serde_json::{
    Map,
    Value,
};

use crate::{
    common::FastHashSet,
    error::{
        CyclicStructureError,
        WrapResultError,
    },
    graph::{
        GraphObject,
        GraphValue,
    },
};

/// Default limit on how deep the serialized graph may nest.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Default limit on how deep a detached copy of a re-visited object may go.
pub const DEFAULT_MAX_DETACHED_DEPTH: usize = 256;

/// Serializes an object graph to JSON in a single pass, without failing on shared or cyclic
/// objects.
///
/// Every object reached is remembered for the rest of the pass. When an object is reached again,
/// it is emitted as a detached copy: an isolated, strict serialization of that object alone.
/// If the object cannot be copied because it reaches itself, the field that referenced it is left
/// out. An array element that cannot be emitted is written as null, so later elements keep their
/// positions.
///
/// Values nested deeper than the depth limit are dropped the same way, so arbitrarily deep graphs
/// still serialize.
///
/// As a consequence, an object referenced from two sibling fields is fully emitted twice, and
/// reference identity is not recoverable from the output.
pub struct CircularSafeSerializer {
    visited: FastHashSet<usize>,
    max_depth: usize,
    max_detached_depth: usize,
}

impl CircularSafeSerializer {
    /// Creates a new serializer.
    pub fn new() -> Self {
        Self {
            visited: FastHashSet::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_detached_depth: DEFAULT_MAX_DETACHED_DEPTH,
        }
    }

    /// Sets the nesting limit of the output. Objects and arrays nested deeper are dropped.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the depth limit of detached copies. A copy that would go deeper is left out.
    pub fn with_max_detached_depth(mut self, max_detached_depth: usize) -> Self {
        self.max_detached_depth = max_detached_depth;
        self
    }

    /// Serializes the graph to a JSON value.
    ///
    /// A root that is absent (a dropped weak reference) serializes as null.
    pub fn to_value(mut self, root: &GraphValue) -> Value {
        self.visit(root, 0).unwrap_or(Value::Null)
    }

    /// Serializes the graph to JSON text.
    pub fn to_json(self, root: &GraphValue) -> Result<String> {
        serde_json::to_string(&self.to_value(root))
            .wrap_error_with_message("failed to write object graph as JSON")
    }

    fn visit(&mut self, value: &GraphValue, depth: usize) -> Option<Value> {
        match value {
            GraphValue::Null => Some(Value::Null),
            GraphValue::Bool(value) => Some(Value::Bool(*value)),
            GraphValue::Number(value) => Some(Value::Number(value.clone())),
            GraphValue::String(value) => Some(Value::String(value.clone())),
            GraphValue::Array(values) => {
                if depth >= self.max_depth {
                    log::trace!("leaving out array nested {depth} levels deep");
                    return None;
                }
                Some(Value::Array(
                    values
                        .iter()
                        .map(|value| self.visit(value, depth + 1).unwrap_or(Value::Null))
                        .collect(),
                ))
            }
            GraphValue::Object(object) => self.visit_object(object, depth),
            GraphValue::WeakObject(object) => object
                .upgrade()
                .and_then(|object| self.visit_object(&object, depth)),
        }
    }

    fn visit_object(&mut self, object: &GraphObject, depth: usize) -> Option<Value> {
        if depth >= self.max_depth {
            log::trace!(
                "leaving out object {:#x} nested {depth} levels deep",
                object.address()
            );
            return None;
        }

        if !self.visited.insert(object.address()) {
            return match self.detached_copy(object, depth) {
                Ok(value) => {
                    log::trace!("emitting detached copy of object {:#x}", object.address());
                    Some(value)
                }
                Err(error) => {
                    log::trace!("leaving out object {:#x}: {error}", object.address());
                    None
                }
            };
        }

        let fields = object.fields();
        let mut map = Map::with_capacity(fields.len());
        for (key, value) in fields.iter() {
            if let Some(value) = self.visit(value, depth + 1) {
                map.insert(key.clone(), value);
            }
        }
        Some(Value::Object(map))
    }

    fn detached_copy(
        &self,
        object: &GraphObject,
        depth: usize,
    ) -> Result<Value, CyclicStructureError> {
        // The copy is nested at `depth`, so it must also fit under the output limit.
        let limit = self.max_detached_depth.min(self.max_depth - depth);
        let mut ancestors = Vec::new();
        self.strict_object(object, &mut ancestors, 0, limit)
    }

    fn strict_value(
        &self,
        value: &GraphValue,
        ancestors: &mut Vec<usize>,
        depth: usize,
        limit: usize,
    ) -> Result<Option<Value>, CyclicStructureError> {
        match value {
            GraphValue::Array(values) => {
                if depth >= limit {
                    return Err(CyclicStructureError { depth });
                }
                let mut array = Vec::with_capacity(values.len());
                for value in values {
                    array.push(
                        self.strict_value(value, ancestors, depth + 1, limit)?
                            .unwrap_or(Value::Null),
                    );
                }
                Ok(Some(Value::Array(array)))
            }
            GraphValue::Object(object) => {
                self.strict_object(object, ancestors, depth, limit).map(Some)
            }
            GraphValue::WeakObject(object) => match object.upgrade() {
                Some(object) => self.strict_object(&object, ancestors, depth, limit).map(Some),
                None => Ok(None),
            },
            GraphValue::Null => Ok(Some(Value::Null)),
            GraphValue::Bool(value) => Ok(Some(Value::Bool(*value))),
            GraphValue::Number(value) => Ok(Some(Value::Number(value.clone()))),
            GraphValue::String(value) => Ok(Some(Value::String(value.clone()))),
        }
    }

    fn strict_object(
        &self,
        object: &GraphObject,
        ancestors: &mut Vec<usize>,
        depth: usize,
        limit: usize,
    ) -> Result<Value, CyclicStructureError> {
        let address = object.address();
        if depth >= limit || ancestors.contains(&address) {
            return Err(CyclicStructureError { depth });
        }

        ancestors.push(address);
        let fields = object.fields();
        let mut map = Map::with_capacity(fields.len());
        for (key, value) in fields.iter() {
            if let Some(value) = self.strict_value(value, ancestors, depth + 1, limit)? {
                map.insert(key.clone(), value);
            }
        }
        ancestors.pop();
        Ok(Value::Object(map))
    }
}

impl Default for CircularSafeSerializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes an object graph to JSON text with a fresh [`CircularSafeSerializer`].
pub fn serialize(root: &GraphValue) -> Result<String> {
    CircularSafeSerializer::new().to_json(root)
}

/// Serializes an object graph to a JSON value with a fresh [`CircularSafeSerializer`].
pub fn serialize_to_value(root: &GraphValue) -> Value {
    CircularSafeSerializer::new().to_value(root)
}
