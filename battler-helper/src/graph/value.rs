use std::{
    cell::{
        Ref,
        RefCell,
    },
    fmt,
    fmt::Debug,
    rc::{
        Rc,
        Weak,
    },
};

use indexmap::IndexMap;
use serde_json::{
    Number,
    Value,
};

type Fields = IndexMap<String, GraphValue>;

/// A shared object in a [`GraphValue`] tree.
///
/// Objects have reference identity: cloning the handle yields the same object, and the same object
/// can appear under many parents or inside itself. Fields keep their insertion order.
#[derive(Clone, Default)]
pub struct GraphObject(Rc<RefCell<Fields>>);

impl GraphObject {
    /// Creates an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an object with the given fields.
    pub fn with_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<GraphValue>,
    {
        Self(Rc::new(RefCell::new(
            fields
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )))
    }

    /// Sets a field, returning the previous value.
    ///
    /// An existing field keeps its position.
    pub fn insert<K, V>(&self, key: K, value: V) -> Option<GraphValue>
    where
        K: Into<String>,
        V: Into<GraphValue>,
    {
        self.0.borrow_mut().insert(key.into(), value.into())
    }

    /// Gets a field.
    pub fn get(&self, key: &str) -> Option<GraphValue> {
        self.0.borrow().get(key).cloned()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Checks if the object has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Creates a weak handle to the object, for back-references that should not keep it alive.
    pub fn downgrade(&self) -> WeakGraphObject {
        WeakGraphObject(Rc::downgrade(&self.0))
    }

    /// Checks if two handles point to the same object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// The identity of the object, which is stable while the object is alive.
    pub(crate) fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub(crate) fn fields(&self) -> Ref<'_, Fields> {
        self.0.borrow()
    }
}

impl Debug for GraphObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Fields are left out since the object may contain itself.
        f.debug_struct("GraphObject")
            .field("address", &format_args!("{:#x}", self.address()))
            .field("keys", &self.0.borrow().keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A weak handle to a [`GraphObject`].
#[derive(Clone, Default)]
pub struct WeakGraphObject(Weak<RefCell<Fields>>);

impl WeakGraphObject {
    /// Gets the object, if it is still alive.
    pub fn upgrade(&self) -> Option<GraphObject> {
        self.0.upgrade().map(GraphObject)
    }
}

impl Debug for WeakGraphObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(object) => f.debug_tuple("WeakGraphObject").field(&object).finish(),
            None => write!(f, "WeakGraphObject(<dropped>)"),
        }
    }
}

/// A value in an object graph, such as the state of a battle.
///
/// Scalars and arrays are plain values. Objects are shared by reference, so a graph may reuse an
/// object in many places or contain cycles.
#[derive(Debug, Clone, Default)]
pub enum GraphValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<GraphValue>),
    Object(GraphObject),
    /// A reference to an object that is owned elsewhere in the graph.
    ///
    /// A reference whose object has been dropped is treated as absent.
    WeakObject(WeakGraphObject),
}

impl GraphValue {
    /// The object behind the value, if it is one.
    pub fn as_object(&self) -> Option<GraphObject> {
        match self {
            Self::Object(object) => Some(object.clone()),
            Self::WeakObject(object) => object.upgrade(),
            _ => None,
        }
    }
}

impl From<bool> for GraphValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for GraphValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for GraphValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for GraphValue {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u16> for GraphValue {
    fn from(value: u16) -> Self {
        Self::Number(value.into())
    }
}

impl From<usize> for GraphValue {
    fn from(value: usize) -> Self {
        Self::Number((value as u64).into())
    }
}

impl From<f64> for GraphValue {
    /// Non-finite numbers have no JSON representation and become null.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for GraphValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for GraphValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<GraphObject> for GraphValue {
    fn from(value: GraphObject) -> Self {
        Self::Object(value)
    }
}

impl From<WeakGraphObject> for GraphValue {
    fn from(value: WeakGraphObject) -> Self {
        Self::WeakObject(value)
    }
}

impl<T> From<Vec<T>> for GraphValue
where
    T: Into<GraphValue>,
{
    fn from(value: Vec<T>) -> Self {
        Self::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<T> From<Option<T>> for GraphValue
where
    T: Into<GraphValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Value> for GraphValue {
    /// Every JSON object becomes a new, unshared [`GraphObject`].
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(value) => Self::Bool(value),
            Value::Number(value) => Self::Number(value),
            Value::String(value) => Self::String(value),
            Value::Array(values) => values.into(),
            Value::Object(fields) => Self::Object(GraphObject::with_fields(fields)),
        }
    }
}
