//! Static field tables shared by the file and environment layers.
//!
//! Responsibilities:
//! - Provide the `JsonMerge` trait and the `config_table!` macro, which
//!   declares each field's JSON key and environment binding in one place.
//! - Decode the keys a JSON object actually contains into their fields.
//!
//! Does NOT handle:
//! - Reading files or classifying filesystem errors (see `loader::file`).
//! - Environment coercion (see `overlay`).
//!
//! Invariants:
//! - Fields whose key is absent from the object are never touched.
//! - A JSON `null` never clears a value.
//! - The current value of the target is never serialized.

use serde::Deserialize;
use serde::de::{DeserializeOwned, Error as _, Unexpected};
use serde_json::error::Category;
use serde_json::{Map, Value};
use thiserror::Error;

/// A configuration type with a static table of JSON keys.
///
/// Implement it with [`config_table!`](crate::config_table) rather than by hand.
pub trait JsonMerge {
    /// Decode every declared key present in `object` into its field.
    ///
    /// Stops at the first key that does not decode; fields visited before it
    /// may already have been assigned.
    fn merge_json(&mut self, object: &Map<String, Value>) -> Result<(), MergeError>;
}

impl<T: JsonMerge + ?Sized> JsonMerge for Box<T> {
    fn merge_json(&mut self, object: &Map<String, Value>) -> Result<(), MergeError> {
        (**self).merge_json(object)
    }
}

impl<T: JsonMerge + ?Sized> JsonMerge for &mut T {
    fn merge_json(&mut self, object: &Map<String, Value>) -> Result<(), MergeError> {
        (**self).merge_json(object)
    }
}

/// A JSON value that could not be decoded into its field.
#[derive(Error, Debug)]
#[error("Invalid value for `{field}`: {source}")]
pub struct MergeError {
    field: String,
    #[source]
    source: serde_json::Error,
}

impl MergeError {
    fn at(key: &str, source: serde_json::Error) -> Self {
        Self {
            field: key.to_string(),
            source,
        }
    }

    fn within(mut self, parent: &str) -> Self {
        self.field = format!("{}.{}", parent, self.field);
        self
    }

    /// Dotted path of the JSON key, e.g. `database.pool_size`.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn category(&self) -> Category {
        self.source.classify()
    }
}

/// Decode `object[key]` into `field`, replacing it as a whole.
#[doc(hidden)]
pub fn merge_leaf<F: DeserializeOwned>(
    object: &Map<String, Value>,
    key: &str,
    field: &mut F,
) -> Result<(), MergeError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(()),
        Some(value) => {
            *field = F::deserialize(value).map_err(|e| MergeError::at(key, e))?;
            Ok(())
        }
    }
}

/// Merge the object at `object[key]` into a nested table.
#[doc(hidden)]
pub fn merge_nested<F: JsonMerge + ?Sized>(
    object: &Map<String, Value>,
    key: &str,
    field: &mut F,
) -> Result<(), MergeError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Object(inner)) => field.merge_json(inner).map_err(|e| e.within(key)),
        Some(other) => Err(MergeError::at(key, not_an_object(other))),
    }
}

pub(crate) fn not_an_object(value: &Value) -> serde_json::Error {
    let unexpected = match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(_) => Unexpected::Other("string"),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    };
    serde_json::Error::invalid_type(unexpected, &"a JSON object")
}

/// Declare the JSON keys and environment bindings of a configuration struct.
///
/// Each entry is `field: "jsonKey" => binding`, where the binding is a
/// variable name, `nested` for a field whose type has its own table, or
/// `none` for a field only files can set. Implements both
/// [`JsonMerge`] and [`EnvOverlay`](crate::EnvOverlay).
///
/// ```rust,ignore
/// config_table!(ServerConfig {
///     host: "host" => "SERVER_HOST",
///     max_conns: "maxConns" => none,
///     tls: "tls" => nested,
/// });
/// ```
#[macro_export]
macro_rules! config_table {
    ($ty:ty { $($field:ident : $key:literal => $binding:tt),* $(,)? }) => {
        $crate::env_overlay!($ty { $($field => $binding),* });

        impl $crate::JsonMerge for $ty {
            #[allow(unused_variables)]
            fn merge_json(
                &mut self,
                object: &$crate::__private::Map<String, $crate::__private::Value>,
            ) -> Result<(), $crate::MergeError> {
                $( $crate::config_table!(@merge self, object, $field, $key, $binding); )*
                Ok(())
            }
        }
    };
    (@merge $target:ident, $object:ident, $field:ident, $key:literal, nested) => {
        $crate::__private::merge_nested($object, $key, &mut $target.$field)?;
    };
    (@merge $target:ident, $object:ident, $field:ident, $key:literal, $binding:tt) => {
        $crate::__private::merge_leaf($object, $key, &mut $target.$field)?;
    };
}
