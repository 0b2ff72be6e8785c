use google_sheets4::api::ValueRange;
use serde_json::Value;

pub trait ValueRangeFactory {
    /// Builds a row-major value range. Row `i` of the output has exactly as many cells as row `i`
    /// of `table`, so jagged tables are sent as-is.
    fn from_table<R: AsRef<[T]>, T: AsRef<str>>(table: &[R]) -> Self;
}

fn wrap_value<T: AsRef<str>>(value: T) -> Value {
    Value::String(value.as_ref().to_owned())
}

impl ValueRangeFactory for ValueRange {
    fn from_table<R: AsRef<[T]>, T: AsRef<str>>(table: &[R]) -> Self {
        let values = table
            .iter()
            .map(|row| row.as_ref().iter().map(wrap_value).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(values),
        }
    }
}
