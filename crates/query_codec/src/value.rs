use serde_json::Value as JsonValue;

use crate::raw::RawValue;

/// A decoded query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
	/// Plain text value.
	String(String),
	/// Numeric value, always carried as `f64`.
	Number(f64),
	/// Boolean value, `true`/`false` on the wire.
	Bool(bool),
	/// Array of text values.
	StringArray(Vec<String>),
	/// Array of numeric values.
	NumberArray(Vec<f64>),
	/// Value produced by a caller-supplied decoder.
	Custom(JsonValue),
}

impl ParamValue {
	/// Returns the string value if this is a `String` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			ParamValue::String(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the numeric value if this is a `Number` variant.
	pub fn as_number(&self) -> Option<f64> {
		match self {
			ParamValue::Number(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			ParamValue::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the elements if this is a `StringArray` variant.
	pub fn as_string_array(&self) -> Option<&[String]> {
		match self {
			ParamValue::StringArray(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the elements if this is a `NumberArray` variant.
	pub fn as_number_array(&self) -> Option<&[f64]> {
		match self {
			ParamValue::NumberArray(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the JSON payload if this is a `Custom` variant.
	pub fn as_custom(&self) -> Option<&JsonValue> {
		match self {
			ParamValue::Custom(v) => Some(v),
			_ => None,
		}
	}

	/// Returns true for values that must never reach the wire: the empty
	/// string, an empty array, and a null or empty custom value.
	///
	/// Blank values neither override defaults nor survive an update.
	pub fn is_blank(&self) -> bool {
		match self {
			ParamValue::String(v) => v.is_empty(),
			ParamValue::StringArray(vs) => vs.is_empty(),
			ParamValue::NumberArray(vs) => vs.is_empty(),
			ParamValue::Custom(JsonValue::Null) => true,
			ParamValue::Custom(JsonValue::String(v)) => v.is_empty(),
			_ => false,
		}
	}

	/// Returns the type name of this value.
	pub fn type_name(&self) -> &'static str {
		match self {
			ParamValue::String(_) => "string",
			ParamValue::Number(_) => "number",
			ParamValue::Bool(_) => "boolean",
			ParamValue::StringArray(_) => "string[]",
			ParamValue::NumberArray(_) => "number[]",
			ParamValue::Custom(_) => "custom",
		}
	}

	/// Encodes this value into its wire form.
	pub fn to_raw(&self) -> RawValue {
		match self {
			ParamValue::String(v) => RawValue::Single(v.clone()),
			ParamValue::Number(v) => RawValue::Single(format_number(*v)),
			ParamValue::Bool(v) => RawValue::Single(v.to_string()),
			ParamValue::StringArray(vs) => RawValue::Multi(vs.clone()),
			ParamValue::NumberArray(vs) => RawValue::Multi(vs.iter().copied().map(format_number).collect()),
			ParamValue::Custom(JsonValue::Null) => RawValue::Single(String::new()),
			ParamValue::Custom(JsonValue::String(v)) => RawValue::Single(v.clone()),
			ParamValue::Custom(v) => RawValue::Single(v.to_string()),
		}
	}
}

/// Formats a number in plain decimal form: `2`, `0.5`, `-3`.
///
/// Uses the shortest representation that parses back to the same `f64`.
/// Negative zero is written as `0`.
pub fn format_number(v: f64) -> String {
	if v == 0.0 { "0".to_string() } else { v.to_string() }
}

impl From<String> for ParamValue {
	fn from(v: String) -> Self {
		ParamValue::String(v)
	}
}

impl From<&str> for ParamValue {
	fn from(v: &str) -> Self {
		ParamValue::String(v.to_string())
	}
}

impl From<bool> for ParamValue {
	fn from(v: bool) -> Self {
		ParamValue::Bool(v)
	}
}

impl From<f64> for ParamValue {
	fn from(v: f64) -> Self {
		ParamValue::Number(v)
	}
}

impl From<f32> for ParamValue {
	fn from(v: f32) -> Self {
		ParamValue::Number(f64::from(v))
	}
}

macro_rules! impl_from_int {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for ParamValue {
				fn from(v: $ty) -> Self {
					ParamValue::Number(v as f64)
				}
			}
		)*
	};
}

impl_from_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<Vec<String>> for ParamValue {
	fn from(v: Vec<String>) -> Self {
		ParamValue::StringArray(v)
	}
}

impl From<Vec<&str>> for ParamValue {
	fn from(v: Vec<&str>) -> Self {
		ParamValue::StringArray(v.into_iter().map(str::to_string).collect())
	}
}

impl From<Vec<f64>> for ParamValue {
	fn from(v: Vec<f64>) -> Self {
		ParamValue::NumberArray(v)
	}
}

impl From<Vec<i64>> for ParamValue {
	fn from(v: Vec<i64>) -> Self {
		ParamValue::NumberArray(v.into_iter().map(|n| n as f64).collect())
	}
}

impl From<JsonValue> for ParamValue {
	fn from(v: JsonValue) -> Self {
		ParamValue::Custom(v)
	}
}
