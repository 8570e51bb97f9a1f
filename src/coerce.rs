// Copyright (c) 2025 - Cowboy AI, Inc.
//! Raw-to-typed coercion boundary
//!
//! Builders accept each record either as an untyped JSON object or as an
//! already-typed record ([`Input`]). [`coerce`] is the only place that sees
//! both forms: raw objects are deserialized into a loosely-typed `Raw`
//! shape (with the failing field path tracked by `serde_path_to_error`) and
//! then checked field by field by [`Record::from_raw`]. Everything past this
//! module works on typed records only.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::{Cidr, Priority};
use crate::errors::{RecordKind, RecordLocator, ValidationResult, Violation};

/// A record in either raw or typed form
#[derive(Debug, Clone, PartialEq)]
pub enum Input<T> {
    Raw(Value),
    Typed(T),
}

impl<T> From<Value> for Input<T> {
    fn from(value: Value) -> Self {
        Input::Raw(value)
    }
}

/// A record kind with a raw form
pub trait Record: Sized {
    const KIND: RecordKind;

    /// Raw key holding the record's name, used to label errors
    const NAME_KEY: Option<&'static str>;

    type Raw: DeserializeOwned;

    /// Check a deserialized raw record and apply defaults
    fn from_raw(raw: Self::Raw, locator: &RecordLocator) -> ValidationResult<Self>;

    /// Checks a typed record must pass to match its raw form
    ///
    /// Covers what the type system cannot, such as empty names.
    fn validate(&self, _locator: &RecordLocator) -> ValidationResult<()> {
        Ok(())
    }
}

/// Coerce an input into its typed record
///
/// Typed records carry validated value objects; they are only run through
/// [`Record::validate`] so both forms reject the same records.
pub fn coerce<R: Record>(input: Input<R>, locator: RecordLocator) -> ValidationResult<R> {
    match input {
        Input::Typed(record) => {
            record.validate(&locator)?;
            Ok(record)
        }
        Input::Raw(value) => coerce_value(value, locator),
    }
}

/// Coerce a raw JSON object into a typed record
pub fn coerce_value<R: Record>(value: Value, locator: RecordLocator) -> ValidationResult<R> {
    let name = R::NAME_KEY
        .and_then(|key| value.get(key))
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(str::to_string);
    let locator = match name {
        Some(name) => locator.with_name(Some(name)),
        None => locator,
    };

    if !value.is_object() {
        return Err(locator.error(
            ".",
            Violation::Malformed(format!("expected a key-value record, found {}", describe(&value))),
        ));
    }

    let raw: R::Raw = serde_path_to_error::deserialize(value).map_err(|err| {
        let field = err.path().to_string();
        locator.error(field, Violation::Malformed(err.into_inner().to_string()))
    })?;

    R::from_raw(raw, &locator)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a record",
    }
}

// ============================================================================
// Lenient scalar deserializers
// ============================================================================

/// Boolean accepting `true`/`false` as JSON booleans or strings
pub(crate) fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(flag)),
        Some(Value::String(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(D::Error::custom(format!("expected a boolean, found \"{}\"", text))),
        },
        Some(other) => Err(D::Error::custom(format!(
            "expected a boolean, found {}",
            describe(&other)
        ))),
    }
}

/// Integer accepting JSON integers, whole-number floats or numeric strings
pub(crate) fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(whole))
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected an integer, found {}", number))),
        Some(Value::String(text)) => text
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected an integer, found \"{}\"", text))),
        Some(other) => Err(D::Error::custom(format!(
            "expected an integer, found {}",
            describe(&other)
        ))),
    }
}

/// A float with no fractional part that fits in `i64`
fn whole(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.fract() == 0.0 && in_range).then(|| value as i64)
}

/// Float accepting JSON numbers or numeric strings
pub(crate) fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_f64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a number, found {}", number))),
        Some(Value::String(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected a number, found \"{}\"", text))),
        Some(other) => Err(D::Error::custom(format!(
            "expected a number, found {}",
            describe(&other)
        ))),
    }
}

// ============================================================================
// Field checks shared by the record kinds
// ============================================================================

/// Required text field; an empty string counts as missing
pub(crate) fn required_text(
    value: Option<String>,
    locator: &RecordLocator,
    field: &str,
) -> ValidationResult<String> {
    value
        .filter(|text| !text.is_empty())
        .ok_or_else(|| locator.error(field, Violation::Missing))
}

/// Text already present on a typed record; empty counts as missing
pub(crate) fn non_empty(value: &str, locator: &RecordLocator, field: &str) -> ValidationResult<()> {
    if value.is_empty() {
        Err(locator.error(field, Violation::Missing))
    } else {
        Ok(())
    }
}

pub(crate) fn cidr(value: &str, locator: &RecordLocator, field: &str) -> ValidationResult<Cidr> {
    Cidr::new(value).map_err(|err| locator.error(field, Violation::InvalidCidr(err)))
}

pub(crate) fn required_cidr(
    value: Option<String>,
    locator: &RecordLocator,
    field: &str,
) -> ValidationResult<Cidr> {
    let value = required_text(value, locator, field)?;
    cidr(&value, locator, field)
}

/// Priority with the 1000 default applied when absent
pub(crate) fn priority(
    value: Option<i64>,
    locator: &RecordLocator,
    field: &str,
) -> ValidationResult<Priority> {
    match value {
        None => Ok(Priority::DEFAULT),
        Some(value) => Priority::new(value).map_err(|rejected| {
            locator.error(
                field,
                Violation::IntegerOutOfRange {
                    value: rejected,
                    min: Priority::MIN,
                    max: Priority::MAX,
                },
            )
        }),
    }
}

/// Map a raw string onto a closed enum, applying its default when absent
pub(crate) fn enumeration<T: Default>(
    value: Option<String>,
    parse: fn(&str) -> Option<T>,
    expected: &'static [&'static str],
    locator: &RecordLocator,
    field: &str,
) -> ValidationResult<T> {
    match value {
        None => Ok(T::default()),
        Some(text) => parse(&text).ok_or_else(|| {
            locator.error(
                field,
                Violation::UnknownVariant {
                    value: text,
                    expected,
                },
            )
        }),
    }
}
