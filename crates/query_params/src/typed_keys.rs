//! Typed parameter handles.

use std::marker::PhantomData;

use taskpad_query_codec::ParamValue;


/// Conversion from a decoded parameter into a Rust type.
///
/// Returns `None` when the value has a different shape. Integer targets also
/// reject fractional and out-of-range numbers.
pub trait FromParamValue: Sized {
	/// Converts `value`, or returns `None` if it does not fit.
	fn from_param(value: &ParamValue) -> Option<Self>;
}

impl FromParamValue for ParamValue {
	fn from_param(value: &ParamValue) -> Option<Self> {
		Some(value.clone())
	}
}

impl FromParamValue for String {
	fn from_param(value: &ParamValue) -> Option<Self> {
		value.as_str().map(str::to_string)
	}
}

impl FromParamValue for f64 {
	fn from_param(value: &ParamValue) -> Option<Self> {
		value.as_number()
	}
}

impl FromParamValue for bool {
	fn from_param(value: &ParamValue) -> Option<Self> {
		value.as_bool()
	}
}

impl FromParamValue for Vec<String> {
	fn from_param(value: &ParamValue) -> Option<Self> {
		value.as_string_array().map(<[String]>::to_vec)
	}
}

impl FromParamValue for Vec<f64> {
	fn from_param(value: &ParamValue) -> Option<Self> {
		value.as_number_array().map(<[f64]>::to_vec)
	}
}

impl FromParamValue for serde_json::Value {
	fn from_param(value: &ParamValue) -> Option<Self> {
		value.as_custom().cloned()
	}
}

impl FromParamValue for i64 {
	fn from_param(value: &ParamValue) -> Option<Self> {
		let n = whole_number(value)?;
		// i64::MAX rounds up to 2^63 as f64, so the upper bound is exclusive.
		(n >= i64::MIN as f64 && n < i64::MAX as f64).then_some(n as i64)
	}
}

impl FromParamValue for u64 {
	fn from_param(value: &ParamValue) -> Option<Self> {
		let n = whole_number(value)?;
		(n >= 0.0 && n < u64::MAX as f64).then_some(n as u64)
	}
}

impl FromParamValue for u32 {
	fn from_param(value: &ParamValue) -> Option<Self> {
		u64::from_param(value).and_then(|n| u32::try_from(n).ok())
	}
}

impl FromParamValue for usize {
	fn from_param(value: &ParamValue) -> Option<Self> {
		u64::from_param(value).and_then(|n| usize::try_from(n).ok())
	}
}

fn whole_number(value: &ParamValue) -> Option<f64> {
	value.as_number().filter(|n| n.fract() == 0.0)
}

/// Typed handle to a query parameter with compile-time type information.
///
/// ```
/// use taskpad_query_params::TypedParamKey;
///
/// const PAGE: TypedParamKey<u32> = TypedParamKey::new("page");
/// assert_eq!(PAGE.name(), "page");
/// ```
pub struct TypedParamKey<T: FromParamValue> {
	name: &'static str,
	_marker: PhantomData<T>,
}

impl<T: FromParamValue> Clone for TypedParamKey<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T: FromParamValue> Copy for TypedParamKey<T> {}

impl<T: FromParamValue> std::fmt::Debug for TypedParamKey<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("TypedParamKey").field(&self.name).finish()
	}
}

impl<T: FromParamValue> TypedParamKey<T> {
	/// Creates a typed key for `name`.
	pub const fn new(name: &'static str) -> Self {
		Self {
			name,
			_marker: PhantomData,
		}
	}

	/// Returns the parameter name.
	pub const fn name(&self) -> &'static str {
		self.name
	}
}
