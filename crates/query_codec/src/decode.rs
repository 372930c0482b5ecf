use std::fmt;
use std::sync::Arc;

use crate::raw::RawValue;
use crate::value::ParamValue;

#[cfg(test)]
mod tests;

type DecodeFn = dyn Fn(&RawValue) -> Option<ParamValue> + Send + Sync;

/// Caller-supplied decoder for parameters whose wire form is not one of the
/// built-in types (date ranges, enums, compound sort keys).
///
/// Returning `None` means "not decodable", which readers treat like any other
/// malformed value.
#[derive(Clone)]
pub struct CustomDecoder(Arc<DecodeFn>);

impl CustomDecoder {
	/// Wraps a decode function.
	pub fn new(f: impl Fn(&RawValue) -> Option<ParamValue> + Send + Sync + 'static) -> Self {
		Self(Arc::new(f))
	}

	/// Runs the decoder.
	pub fn decode(&self, raw: &RawValue) -> Option<ParamValue> {
		(self.0)(raw)
	}
}

impl fmt::Debug for CustomDecoder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("CustomDecoder(..)")
	}
}

/// The expected decode type of a parameter.
#[derive(Debug, Clone)]
pub enum ParamType {
	/// Text, passed through as-is.
	String,
	/// Finite decimal numeral.
	Number,
	/// The literals `true` and `false`.
	Boolean,
	/// One or more text values.
	StringArray,
	/// One or more numerals.
	NumberArray,
	/// Decoded by a caller-supplied function.
	Custom(CustomDecoder),
}

impl ParamType {
	/// Returns the declaration name: `string`, `number`, `boolean`,
	/// `string[]`, `number[]` or `custom`.
	pub fn name(&self) -> &'static str {
		match self {
			ParamType::String => "string",
			ParamType::Number => "number",
			ParamType::Boolean => "boolean",
			ParamType::StringArray => "string[]",
			ParamType::NumberArray => "number[]",
			ParamType::Custom(_) => "custom",
		}
	}

	/// Parses a built-in type name. Custom decoders have no name form.
	pub fn from_name(name: &str) -> Option<Self> {
		match name {
			"string" => Some(ParamType::String),
			"number" => Some(ParamType::Number),
			"boolean" => Some(ParamType::Boolean),
			"string[]" => Some(ParamType::StringArray),
			"number[]" => Some(ParamType::NumberArray),
			_ => None,
		}
	}

	/// Infers the decode type from a default value.
	///
	/// Custom defaults carry no type information and return `None`.
	pub fn of_default(default: &ParamValue) -> Option<Self> {
		match default {
			ParamValue::String(_) => Some(ParamType::String),
			ParamValue::Number(_) => Some(ParamType::Number),
			ParamValue::Bool(_) => Some(ParamType::Boolean),
			ParamValue::StringArray(_) => Some(ParamType::StringArray),
			ParamValue::NumberArray(_) => Some(ParamType::NumberArray),
			ParamValue::Custom(_) => None,
		}
	}

	/// Returns true if `value` has the shape this type decodes to.
	///
	/// Custom types accept anything.
	pub fn accepts(&self, value: &ParamValue) -> bool {
		matches!(
			(self, value),
			(ParamType::String, ParamValue::String(_))
				| (ParamType::Number, ParamValue::Number(_))
				| (ParamType::Boolean, ParamValue::Bool(_))
				| (ParamType::StringArray, ParamValue::StringArray(_))
				| (ParamType::NumberArray, ParamValue::NumberArray(_))
				| (ParamType::Custom(_), _)
		)
	}
}

/// Decodes a raw wire value as `ty`.
///
/// This is the only typed decode path; both the merged view and single-key
/// reads go through it so they cannot disagree. Returns `None` for:
///
/// * numbers that are blank, unparseable or non-finite
/// * booleans other than the literals `true` and `false`
/// * scalar types given more than one value
/// * arrays with no non-empty element
/// * number arrays with any malformed element
///
/// Array types skip empty elements, the same ones serialization drops, so a
/// value reads the same before and after it is written back.
pub fn decode_value(raw: &RawValue, ty: &ParamType) -> Option<ParamValue> {
	match ty {
		ParamType::String => raw.as_single().map(|v| ParamValue::String(v.to_string())),
		ParamType::Number => raw.as_single().and_then(parse_number).map(ParamValue::Number),
		ParamType::Boolean => raw.as_single().and_then(parse_bool).map(ParamValue::Bool),
		ParamType::StringArray => {
			let values: Vec<String> = non_empty(raw).cloned().collect();
			(!values.is_empty()).then_some(ParamValue::StringArray(values))
		}
		ParamType::NumberArray => non_empty(raw)
			.map(|v| parse_number(v))
			.collect::<Option<Vec<_>>>()
			.filter(|ns| !ns.is_empty())
			.map(ParamValue::NumberArray),
		ParamType::Custom(decoder) => decoder.decode(raw),
	}
}

/// Best-effort decode for parameters with no declared type.
///
/// `true`/`false` become booleans and unambiguous numerals become numbers;
/// everything else stays text. Arrays drop empty elements and become number
/// arrays only when every remaining element is numeric; an array with nothing
/// left is an empty (blank) string array.
pub fn infer_value(raw: &RawValue) -> ParamValue {
	match raw {
		RawValue::Single(v) => {
			if let Some(b) = parse_bool(v) {
				ParamValue::Bool(b)
			} else if let Some(n) = parse_number(v) {
				ParamValue::Number(n)
			} else {
				ParamValue::String(v.clone())
			}
		}
		RawValue::Multi(_) => {
			let values: Vec<String> = non_empty(raw).cloned().collect();
			let numbers = (!values.is_empty())
				.then(|| values.iter().map(|v| parse_number(v)).collect::<Option<Vec<_>>>())
				.flatten();
			match numbers {
				Some(ns) => ParamValue::NumberArray(ns),
				None => ParamValue::StringArray(values),
			}
		}
	}
}

/// Parses a decimal numeral, ignoring surrounding whitespace.
///
/// Blank input and non-finite results (`NaN`, `inf`, overflow) are rejected.
pub fn parse_number(v: &str) -> Option<f64> {
	let v = v.trim();
	if v.is_empty() {
		return None;
	}
	v.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn non_empty(raw: &RawValue) -> impl Iterator<Item = &String> {
	raw.values().iter().filter(|v| !v.is_empty())
}

fn parse_bool(v: &str) -> Option<bool> {
	match v {
		"true" => Some(true),
		"false" => Some(false),
		_ => None,
	}
}
