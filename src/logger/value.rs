//! Renderable values passed as log messages and arguments.
//!
//! # Design Decisions
//! - Plain containers (`Array`, `Object`) are trees and cannot loop
//! - `SharedValue` is a reference-counted cell; cloning it aliases the same
//!   node, which is how callers can build structures that contain themselves
//! - Object entries keep insertion order

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use serde_json::Number;

/// Any value a caller may hand to the logger.
#[derive(Debug, Clone, Default)]
pub enum LogValue {
    /// Absent value (a missing message, an optional argument that is `None`).
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<LogValue>),
    Object(Vec<(String, LogValue)>),
    Shared(SharedValue),
}

impl LogValue {
    /// Build an object from key/value pairs, keeping their order.
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<LogValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        LogValue::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LogValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, LogValue::Undefined)
    }
}

/// A mutable, aliased node. Two clones point at the same value.
///
/// Cycles built through `SharedValue` are never freed by reference counting;
/// call [`SharedValue::set`] with a leaf value to break one when done.
#[derive(Clone, Default)]
pub struct SharedValue(Arc<RwLock<LogValue>>);

// Identity only: printing the contents would not terminate on a cycle.
impl fmt::Debug for SharedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedValue")
            .field(&format_args!("{:#x}", self.id()))
            .finish()
    }
}

impl SharedValue {
    pub fn new(value: impl Into<LogValue>) -> Self {
        Self(Arc::new(RwLock::new(value.into())))
    }

    /// Replace the node's contents.
    pub fn set(&self, value: impl Into<LogValue>) {
        let mut guard = self.0.write().unwrap_or_else(|e| e.into_inner());
        *guard = value.into();
    }

    /// Append to the node if it holds an array. Returns false otherwise.
    pub fn push(&self, value: impl Into<LogValue>) -> bool {
        let mut guard = self.0.write().unwrap_or_else(|e| e.into_inner());
        match &mut *guard {
            LogValue::Array(items) => {
                items.push(value.into());
                true
            }
            _ => false,
        }
    }

    /// Insert into the node if it holds an object. Returns false otherwise.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<LogValue>) -> bool {
        let mut guard = self.0.write().unwrap_or_else(|e| e.into_inner());
        match &mut *guard {
            LogValue::Object(entries) => {
                entries.push((key.into(), value.into()));
                true
            }
            _ => false,
        }
    }

    /// Read access. A poisoned lock is recovered, rendering must not fail.
    pub fn read(&self) -> RwLockReadGuard<'_, LogValue> {
        self.0.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Identity of the node, used for cycle detection.
    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &SharedValue) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<SharedValue> for LogValue {
    fn from(value: SharedValue) -> Self {
        LogValue::Shared(value)
    }
}

impl From<&str> for LogValue {
    fn from(value: &str) -> Self {
        LogValue::String(value.to_string())
    }
}

impl From<String> for LogValue {
    fn from(value: String) -> Self {
        LogValue::String(value)
    }
}

impl From<bool> for LogValue {
    fn from(value: bool) -> Self {
        LogValue::Bool(value)
    }
}

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for LogValue {
                fn from(value: $t) -> Self {
                    LogValue::Number(Number::from(value))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for LogValue {
    /// Non-finite floats have no numeric form and become `Null`.
    fn from(value: f64) -> Self {
        Number::from_f64(value)
            .map(LogValue::Number)
            .unwrap_or(LogValue::Null)
    }
}

impl From<f32> for LogValue {
    fn from(value: f32) -> Self {
        LogValue::from(f64::from(value))
    }
}

impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(LogValue::Undefined)
    }
}

impl<T: Into<LogValue>> From<Vec<T>> for LogValue {
    fn from(value: Vec<T>) -> Self {
        LogValue::Array(value.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for LogValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => LogValue::Null,
            serde_json::Value::Bool(b) => LogValue::Bool(b),
            serde_json::Value::Number(n) => LogValue::Number(n),
            serde_json::Value::String(s) => LogValue::String(s),
            serde_json::Value::Array(items) => {
                LogValue::Array(items.into_iter().map(LogValue::from).collect())
            }
            serde_json::Value::Object(map) => {
                LogValue::Object(map.into_iter().map(|(k, v)| (k, LogValue::from(v))).collect())
            }
        }
    }
}
