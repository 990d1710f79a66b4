//! Report data model.
//!
//! - **Report** ([`report`]): root value with drives, disc and titles
//! - **Disc** ([`disc`]): disc level attributes
//! - **Title** ([`title`]): title attributes and its streams
//! - **Stream** ([`stream`]): audio, video and subtitle stream attributes
//! - **Values** ([`value`]): typed attribute values
//!
//! Every entity has a fixed set of optional fields. Translated attributes are
//! checked against that set, values of the wrong shape are rejected.

use crate::codes::attributes::Field;
use crate::structs::value::Value;
use crate::utils::errors::TranslateError;

pub mod disc;
pub mod report;
pub mod stream;
pub mod title;
pub mod value;

pub(crate) fn text(value: Value) -> Option<String> {
    Some(value.into_text())
}

pub(crate) fn integer<T: TryFrom<u64>>(
    entity: &'static str,
    field: Field,
    value: Value,
) -> Result<Option<T>, TranslateError> {
    match value.as_integer().map(T::try_from) {
        Some(Ok(n)) => Ok(Some(n)),
        _ => Err(TranslateError::InvalidValue {
            entity,
            field,
            value,
        }),
    }
}

pub(crate) fn parsed<T: std::str::FromStr>(
    entity: &'static str,
    field: Field,
    value: Value,
) -> Result<Option<T>, TranslateError> {
    let parsed = match &value {
        Value::Text(s) => s.parse().ok(),
        Value::Integer(_) => None,
    };
    match parsed {
        Some(v) => Ok(Some(v)),
        None => Err(TranslateError::InvalidValue {
            entity,
            field,
            value,
        }),
    }
}
