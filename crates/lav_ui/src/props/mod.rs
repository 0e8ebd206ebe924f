//! Element property sets
//!
//! A small key/value store with change tracking. The rendering layer drains the changed
//! keys each frame to decide what to re-upload.

use std::collections::{HashMap, HashSet};

use serde::{Serialize, Deserialize};

use crate::error::PropError;
use crate::foundation::math::{Vec2, Vec4};

/// Well-known property keys
pub mod keys {
    /// RGBA color (`PropValue::Color`)
    pub const COLOR: &str = "color";
    /// Display text (`PropValue::Text`)
    pub const TEXT: &str = "text";
    /// Visibility flag (`PropValue::Bool`); missing means visible
    pub const VISIBLE: &str = "visible";
    /// Numeric value of a value-carrying widget (`PropValue::Float`)
    pub const VALUE: &str = "value";
    /// Image source identifier (`PropValue::Text`)
    pub const IMAGE: &str = "image";
    /// Widget interaction state name (`PropValue::Text`)
    pub const STATE: &str = "state";
    /// Split pane handle color (`PropValue::Color`)
    pub const HANDLE_COLOR: &str = "handle_color";
}

/// A single property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropValue {
    /// Boolean flag
    Bool(bool),
    /// Integer
    Int(i64),
    /// Float
    Float(f32),
    /// Text
    Text(String),
    /// RGBA color
    Color(Vec4),
    /// 2D vector
    Vec2(Vec2),
}

impl PropValue {
    /// Identity used for change tracking: floats compare by bit pattern, so a stored NaN
    /// equals itself
    pub fn same_value(&self, other: &PropValue) -> bool {
        fn same_floats<'a>(a: impl IntoIterator<Item = &'a f32>, b: impl IntoIterator<Item = &'a f32>) -> bool {
            a.into_iter().map(|v| v.to_bits()).eq(b.into_iter().map(|v| v.to_bits()))
        }

        match (self, other) {
            (PropValue::Float(a), PropValue::Float(b)) => a.to_bits() == b.to_bits(),
            (PropValue::Color(a), PropValue::Color(b)) => same_floats(a.iter(), b.iter()),
            (PropValue::Vec2(a), PropValue::Vec2(b)) => same_floats(a.iter(), b.iter()),
            _ => self == other,
        }
    }

    /// Name of the held type, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            PropValue::Bool(_) => "bool",
            PropValue::Int(_) => "int",
            PropValue::Float(_) => "float",
            PropValue::Text(_) => "text",
            PropValue::Color(_) => "color",
            PropValue::Vec2(_) => "vec2",
        }
    }
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        PropValue::Bool(v)
    }
}

impl From<i64> for PropValue {
    fn from(v: i64) -> Self {
        PropValue::Int(v)
    }
}

impl From<f32> for PropValue {
    fn from(v: f32) -> Self {
        PropValue::Float(v)
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        PropValue::Text(v.to_string())
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        PropValue::Text(v)
    }
}

impl From<Vec4> for PropValue {
    fn from(v: Vec4) -> Self {
        PropValue::Color(v)
    }
}

impl From<Vec2> for PropValue {
    fn from(v: Vec2) -> Self {
        PropValue::Vec2(v)
    }
}

/// Typed extraction from a [`PropValue`]
pub trait FromPropValue: Sized {
    /// Type name used in mismatch errors
    const TYPE_NAME: &'static str;

    /// Extract when the variant matches
    fn from_prop(value: &PropValue) -> Option<Self>;
}

macro_rules! impl_from_prop {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl FromPropValue for $ty {
            const TYPE_NAME: &'static str = $name;

            fn from_prop(value: &PropValue) -> Option<Self> {
                match value {
                    PropValue::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

impl_from_prop!(bool, Bool, "bool");
impl_from_prop!(i64, Int, "int");
impl_from_prop!(f32, Float, "float");
impl_from_prop!(String, Text, "text");
impl_from_prop!(Vec4, Color, "color");
impl_from_prop!(Vec2, Vec2, "vec2");

/// Property map with change tracking
///
/// Change tracking is value based: storing a value equal to the current one does not mark
/// the key changed.
#[derive(Debug, Clone, Default)]
pub struct PropsBase {
    values: HashMap<String, PropValue>,
    changed: HashSet<String>,
}

impl PropsBase {
    /// Create an empty property set
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`
    ///
    /// # Returns
    /// `true` when the stored value changed (new key or different value)
    pub fn set(&mut self, key: &str, value: impl Into<PropValue>) -> bool {
        let value = value.into();
        if self.values.get(key).is_some_and(|current| current.same_value(&value)) {
            return false;
        }
        self.values.insert(key.to_string(), value);
        self.changed.insert(key.to_string());
        true
    }

    /// Builder form of [`Self::set`]
    pub fn with(mut self, key: &str, value: impl Into<PropValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Read a value
    pub fn get(&self, key: &str) -> Result<&PropValue, PropError> {
        self.values
            .get(key)
            .ok_or_else(|| PropError::NotFound(key.to_string()))
    }

    /// Read a value as a concrete type
    pub fn get_as<T: FromPropValue>(&self, key: &str) -> Result<T, PropError> {
        let value = self.get(key)?;
        T::from_prop(value).ok_or_else(|| PropError::TypeMismatch {
            key: key.to_string(),
            expected: T::TYPE_NAME,
            found: value.type_name(),
        })
    }

    /// Typed read with a fallback for missing or mistyped keys
    pub fn get_or<T: FromPropValue>(&self, key: &str, default: T) -> T {
        self.get_as(key).unwrap_or(default)
    }

    /// True when a value is stored under `key`
    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Remove a key; the removal counts as a change
    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        let removed = self.values.remove(key);
        if removed.is_some() {
            self.changed.insert(key.to_string());
        }
        removed
    }

    /// True when `key` changed since the last [`Self::take_changed`]
    pub fn is_changed(&self, key: &str) -> bool {
        self.changed.contains(key)
    }

    /// True when any key changed since the last [`Self::take_changed`]
    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }

    /// Drain the set of changed keys
    pub fn take_changed(&mut self) -> HashSet<String> {
        std::mem::take(&mut self.changed)
    }

    /// Iterate over all stored entries
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
