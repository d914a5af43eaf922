//! Conversions between polars cells and model values.

use cohort_model::Value;
use polars::prelude::{AnyValue, Expr, lit};

/// Converts a cell to a [`Value`].
///
/// Nulls and cells of non-scalar types (dates, lists, ...) yield `None`.
/// Booleans become `0`/`1` integers.
pub fn any_to_value(value: AnyValue<'_>) -> Option<Value> {
    match value {
        AnyValue::Null => None,
        AnyValue::Boolean(b) => Some(Value::Integer(i64::from(b))),
        AnyValue::Int8(v) => Some(Value::Integer(i64::from(v))),
        AnyValue::Int16(v) => Some(Value::Integer(i64::from(v))),
        AnyValue::Int32(v) => Some(Value::Integer(i64::from(v))),
        AnyValue::Int64(v) => Some(Value::Integer(v)),
        AnyValue::UInt8(v) => Some(Value::Integer(i64::from(v))),
        AnyValue::UInt16(v) => Some(Value::Integer(i64::from(v))),
        AnyValue::UInt32(v) => Some(Value::Integer(i64::from(v))),
        AnyValue::UInt64(v) => i64::try_from(v).ok().map(Value::Integer),
        AnyValue::Float32(v) => Some(Value::Float(f64::from(v))),
        AnyValue::Float64(v) => Some(Value::Float(v)),
        AnyValue::String(s) => Some(Value::Text(s.to_string())),
        AnyValue::StringOwned(s) => Some(Value::Text(s.to_string())),
        _ => None,
    }
}

/// Builds a polars literal matching the value's type.
pub fn value_to_lit(value: &Value) -> Expr {
    match value {
        Value::Integer(v) => lit(*v),
        Value::Float(v) => lit(*v),
        Value::Text(text) => lit(text.as_str()),
    }
}
