//! Three-valued optional wire fields.
//!
//! Several API fields distinguish between "not sent", "sent as `null`" and
//! "sent with a value". Collapsing them into `Option<T>` loses the difference
//! between a user who never configured an attribute and one who removed it,
//! so the mapping layer carries [`Tristate`] end to end.
//!
//! # Serde usage
//!
//! Fields must be declared with both `default` and `skip_serializing_if` so
//! that an absent field deserialises to [`Tristate::Unset`] and an unset field
//! is omitted again on the way out:
//!
//! ```rust
//! use access_provider::Tristate;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Patch {
//!     #[serde(default, skip_serializing_if = "Tristate::is_unset")]
//!     description: Tristate<String>,
//! }
//!
//! let unset: Patch = serde_json::from_str("{}").unwrap();
//! assert!(unset.description.is_unset());
//!
//! let cleared: Patch = serde_json::from_str(r#"{"description":null}"#).unwrap();
//! assert!(cleared.description.is_null());
//! assert_eq!(serde_json::to_string(&cleared).unwrap(), r#"{"description":null}"#);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A wire field that is either absent, explicitly null, or present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tristate<T> {
    /// The field was not sent.
    Unset,
    /// The field was sent as `null`.
    Null,
    /// The field was sent with a value.
    Value(T),
}

impl<T> Tristate<T> {
    /// Returns true when the field was not sent.
    pub fn is_unset(&self) -> bool {
        matches!(self, Tristate::Unset)
    }

    /// Returns true when the field was sent as `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Tristate::Null)
    }

    /// Returns true when the field carries a value.
    pub fn is_value(&self) -> bool {
        matches!(self, Tristate::Value(_))
    }

    /// Borrow the carried value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Tristate::Value(v) => Some(v),
            Tristate::Unset | Tristate::Null => None,
        }
    }

    /// Collapse to a two-valued option. Both `Unset` and `Null` become `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Tristate::Value(v) => Some(v),
            Tristate::Unset | Tristate::Null => None,
        }
    }

    /// Convert by reference.
    pub fn as_ref(&self) -> Tristate<&T> {
        match self {
            Tristate::Unset => Tristate::Unset,
            Tristate::Null => Tristate::Null,
            Tristate::Value(v) => Tristate::Value(v),
        }
    }

    /// Map the carried value, preserving `Unset` and `Null`.
    pub fn map<U, F>(self, f: F) -> Tristate<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Tristate::Unset => Tristate::Unset,
            Tristate::Null => Tristate::Null,
            Tristate::Value(v) => Tristate::Value(f(v)),
        }
    }

    /// Fallible map, preserving `Unset` and `Null`.
    pub fn try_map<U, E, F>(self, f: F) -> Result<Tristate<U>, E>
    where
        F: FnOnce(T) -> Result<U, E>,
    {
        Ok(match self {
            Tristate::Unset => Tristate::Unset,
            Tristate::Null => Tristate::Null,
            Tristate::Value(v) => Tristate::Value(f(v)?),
        })
    }

    /// Apply this field as a patch over `current`.
    ///
    /// `Unset` leaves the current value alone, `Null` clears it and a value
    /// replaces it.
    pub fn apply_to(self, current: Tristate<T>) -> Tristate<T> {
        match self {
            Tristate::Unset => current,
            other => other,
        }
    }

    /// Encode an optional attribute for a create request.
    ///
    /// An attribute the user did not configure is simply not sent.
    pub fn from_optional_create(value: Option<T>) -> Self {
        match value {
            Some(v) => Tristate::Value(v),
            None => Tristate::Unset,
        }
    }

    /// Encode an optional attribute for an update request.
    ///
    /// Updates replace the whole object server-side, so an attribute missing
    /// from the plan is sent as an explicit `null` to clear it.
    pub fn from_optional_update(value: Option<T>) -> Self {
        match value {
            Some(v) => Tristate::Value(v),
            None => Tristate::Null,
        }
    }
}

// No `T: Default` bound, unlike the derive.
impl<T> Default for Tristate<T> {
    fn default() -> Self {
        Tristate::Unset
    }
}

impl<T> From<Option<T>> for Tristate<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Tristate::Value(v),
            None => Tristate::Null,
        }
    }
}

impl<T: Serialize> Serialize for Tristate<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Tristate::Value(v) => serializer.serialize_some(v),
            // Unset fields are skipped by the container; if one slips through
            // it is indistinguishable from null on the wire.
            Tristate::Unset | Tristate::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Tristate<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the field is present; absence is handled by
        // `#[serde(default)]` on the container field.
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(v) => Tristate::Value(v),
            None => Tristate::Null,
        })
    }
}
