use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use url::form_urlencoded;


/// Wire representation of a single query key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
	/// `key=value`, seen once without a bracket suffix.
	Single(String),
	/// `key[]=a&key[]=b`, or a plain key repeated on the wire.
	Multi(Vec<String>),
}

impl RawValue {
	/// Returns the value if this is a `Single` variant.
	pub fn as_single(&self) -> Option<&str> {
		match self {
			RawValue::Single(v) => Some(v),
			RawValue::Multi(_) => None,
		}
	}

	/// Returns every value in wire order.
	pub fn values(&self) -> &[String] {
		match self {
			RawValue::Single(v) => std::slice::from_ref(v),
			RawValue::Multi(vs) => vs,
		}
	}

	/// Returns true for a `Multi` value, even one with a single element.
	pub fn is_multi(&self) -> bool {
		matches!(self, RawValue::Multi(_))
	}

	/// Returns true when serialization would emit nothing for this value.
	pub fn is_blank(&self) -> bool {
		self.values().iter().all(String::is_empty)
	}

	/// Appends another occurrence, promoting a `Single` to `Multi`.
	pub fn push(&mut self, value: String) {
		match self {
			RawValue::Single(first) => {
				let first = std::mem::take(first);
				*self = RawValue::Multi(vec![first, value]);
			}
			RawValue::Multi(vs) => vs.push(value),
		}
	}
}

impl From<&str> for RawValue {
	fn from(v: &str) -> Self {
		RawValue::Single(v.to_string())
	}
}

impl From<String> for RawValue {
	fn from(v: String) -> Self {
		RawValue::Single(v)
	}
}

impl From<Vec<String>> for RawValue {
	fn from(vs: Vec<String>) -> Self {
		RawValue::Multi(vs)
	}
}

/// Parsed query string, keyed by parameter name.
///
/// Keys are kept sorted so that serialization is deterministic: the same
/// mapping always produces the same query string regardless of insertion
/// order. Bracket suffixes are stripped on parse and re-added on
/// serialization for `Multi` values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQuery {
	params: BTreeMap<String, RawValue>,
}

impl RawQuery {
	/// Creates an empty query.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a query string, with or without its leading `?`.
	///
	/// Percent escapes and `+` are decoded. `key[]` occurrences and repeated
	/// plain keys collect into [`RawValue::Multi`] in wire order. A key with no
	/// `=` is present with an empty value. Empty key names are dropped.
	pub fn parse(query: &str) -> Self {
		let query = query.strip_prefix('?').unwrap_or(query);
		let mut params = BTreeMap::new();

		for (key, value) in form_urlencoded::parse(query.as_bytes()) {
			let (name, bracketed) = match key.strip_suffix("[]") {
				Some(name) => (name, true),
				None => (&*key, false),
			};
			if name.is_empty() {
				continue;
			}

			let value = value.into_owned();
			match params.entry(name.to_string()) {
				Entry::Vacant(slot) => {
					slot.insert(if bracketed {
						RawValue::Multi(vec![value])
					} else {
						RawValue::Single(value)
					});
				}
				Entry::Occupied(mut slot) => slot.get_mut().push(value),
			}
		}

		Self { params }
	}

	/// Serializes back to a query string without the leading `?`.
	///
	/// Arrays use the bracket format (`key[]=a&key[]=b`). Empty single values
	/// and empty array elements are skipped, so a blank value never shows up
	/// as `key=` on the wire.
	pub fn to_query_string(&self) -> String {
		let mut pairs = Vec::new();
		for (key, value) in &self.params {
			let key = encode(key);
			match value {
				RawValue::Single(v) if v.is_empty() => {}
				RawValue::Single(v) => pairs.push(format!("{key}={}", encode(v))),
				RawValue::Multi(vs) => {
					for v in vs.iter().filter(|v| !v.is_empty()) {
						pairs.push(format!("{key}[]={}", encode(v)));
					}
				}
			}
		}
		pairs.join("&")
	}

	/// Returns the raw value for `key`.
	pub fn get(&self, key: &str) -> Option<&RawValue> {
		self.params.get(key)
	}

	/// Returns true if `key` appeared on the wire, whatever its value.
	pub fn contains_key(&self, key: &str) -> bool {
		self.params.contains_key(key)
	}

	/// Inserts or replaces `key`.
	pub fn insert(&mut self, key: impl Into<String>, value: RawValue) -> Option<RawValue> {
		self.params.insert(key.into(), value)
	}

	/// Removes `key`, returning its previous value.
	pub fn remove(&mut self, key: &str) -> Option<RawValue> {
		self.params.remove(key)
	}

	/// Iterates keys in sorted order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
		self.params.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Returns the number of distinct keys.
	pub fn len(&self) -> usize {
		self.params.len()
	}

	/// Returns true if no keys are present.
	pub fn is_empty(&self) -> bool {
		self.params.is_empty()
	}
}

impl fmt::Display for RawQuery {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_query_string())
	}
}

impl<K: Into<String>> FromIterator<(K, RawValue)> for RawQuery {
	fn from_iter<I: IntoIterator<Item = (K, RawValue)>>(iter: I) -> Self {
		Self {
			params: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
		}
	}
}

fn encode(s: &str) -> String {
	form_urlencoded::byte_serialize(s.as_bytes()).collect()
}
