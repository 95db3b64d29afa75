use serde::{
    Deserialize,
    Deserializer,
};
use serde_json::Value;

/// Checks if a loosely-typed option value should count as "on".
///
/// Callers historically sent toggles as any JSON value, so `1`, `"yes"`, and `{}` all turn an
/// option on while `0`, `""`, and `null` leave it off.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(value) => *value,
        Value::Number(value) => value.as_f64().is_some_and(|value| value != 0.0),
        Value::String(value) => !value.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub(crate) fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| is_truthy(&value))
}
