// Copyright (C) 2026 The tracing-graylog developers
//
// This file is part of tracing-graylog.
//
// tracing-graylog is free software: you can redistribute it and/or modify it under the terms of
// the GNU General Public License as published by the Free Software Foundation, either version 3 of
// the License, or (at your option) any later version.
//
// tracing-graylog is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See
// the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with tracing-graylog.
// If not, see <http://www.gnu.org/licenses/>.
//! Typed values for GELF extra fields.
//!
//! Graylog renders extra fields as text, so every [`FieldValue`] variant carries an explicit
//! stringification rule, given by its [`Display`] implementation. Using a closed enumeration
//! rather than a bag of `Box<dyn Any>` keeps the set of accepted types (and how each one ends up
//! on the wire) checkable at compile time.
//!
//! [`Display`]: std::fmt::Display

type StdResult<T, E> = std::result::Result<T, E>;

/// A value attached to an outgoing message as an extra field.
///
/// Instances are built either from the [`From`] conversions (for the primitive variants) or from
/// [`FieldValue::error`] (for error-typed values, which render as the error's message). The
/// [`Visit`] callbacks in the [`layer`](crate::layer) module produce the same variants for fields
/// recorded on individual events, so static and per-event fields stringify identically.
///
/// [`Visit`]: https://docs.rs/tracing-core/latest/tracing_core/field/trait.Visit.html
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    /// An error-typed value, reduced to its message at capture time
    Error(String),
    /// Anything else, reduced to its `Debug` rendering at capture time
    Other(String),
}

impl FieldValue {
    /// Capture an error (or anything else with a message) as a [`FieldValue::Error`].
    ///
    /// Taking `impl Display` rather than `impl std::error::Error` lets callers hand us
    /// `&dyn Error` trait objects as well as concrete error types.
    pub fn error<E: std::fmt::Display>(err: E) -> FieldValue {
        FieldValue::Error(err.to_string())
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> StdResult<(), std::fmt::Error> {
        match self {
            FieldValue::Str(s) | FieldValue::Error(s) | FieldValue::Other(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::UInt(u) => write!(f, "{}", u),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(x: &str) -> Self {
        FieldValue::Str(x.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(x: String) -> Self {
        FieldValue::Str(x)
    }
}

impl From<i64> for FieldValue {
    fn from(x: i64) -> Self {
        FieldValue::Int(x)
    }
}

impl From<i32> for FieldValue {
    fn from(x: i32) -> Self {
        FieldValue::Int(x.into())
    }
}

impl From<u64> for FieldValue {
    fn from(x: u64) -> Self {
        FieldValue::UInt(x)
    }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        FieldValue::Float(x)
    }
}

impl From<bool> for FieldValue {
    fn from(x: bool) -> Self {
        FieldValue::Bool(x)
    }
}
