//! Custom GraphQL scalar types backing the date, datetime and decimal
//! column kinds. Dates and datetimes travel as ISO 8601 strings,
//! decimals as exact string-encoded numbers.

use async_graphql::dynamic::Scalar;
use async_graphql::Value;
use chrono::{DateTime as ChronoDateTime, NaiveDate};

/// ISO 8601 date scalar (YYYY-MM-DD)
#[derive(Debug, Clone)]
pub struct Date;

/// ISO 8601 datetime scalar with timezone
#[derive(Debug, Clone)]
pub struct DateTime;

/// String-encoded arbitrary-precision decimal
#[derive(Debug, Clone)]
pub struct Decimal;

/// Register custom scalars in the schema builder
pub fn register_custom_scalars() -> Vec<Scalar> {
    vec![date_scalar(), datetime_scalar(), decimal_scalar()]
}

fn date_scalar() -> Scalar {
    Scalar::new("Date")
        .description("ISO 8601 date format (YYYY-MM-DD)")
        .validator(|value| match value {
            Value::Null => true,
            Value::String(s) => NaiveDate::parse_from_str(s.as_str(), "%Y-%m-%d").is_ok(),
            _ => false,
        })
}

fn datetime_scalar() -> Scalar {
    Scalar::new("DateTime")
        .description("ISO 8601 datetime format with timezone")
        .validator(|value| match value {
            Value::Null => true,
            Value::String(s) => ChronoDateTime::parse_from_rfc3339(s.as_str()).is_ok(),
            _ => false,
        })
}

fn decimal_scalar() -> Scalar {
    Scalar::new("Decimal")
        .description("Arbitrary-precision decimal encoded as a string")
        .validator(|value| match value {
            Value::Null => true,
            Value::String(s) => s.parse::<f64>().is_ok(),
            Value::Number(_) => true,
            _ => false,
        })
}
