//! Batched parameter changes.

use indexmap::IndexMap;
use taskpad_query_codec::{ParamValue, RawQuery};

/// A batch of parameter changes applied with a single navigation.
///
/// Changes are recorded in call order; touching the same key twice keeps the
/// last change. Blank values (`""`, null) count as removals.
///
/// Each store mutation re-reads the committed URL, so two separate calls
/// issued before the router commits the first one race, and the second wins.
/// Collecting every change for one user action into a single batch avoids
/// that.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamUpdates {
	changes: IndexMap<String, Option<ParamValue>>,
}

impl ParamUpdates {
	/// Creates an empty batch.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets `key` to `value`.
	pub fn set(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
		self.changes.insert(key.into(), Some(value.into()));
		self
	}

	/// Removes `key`.
	pub fn unset(mut self, key: impl Into<String>) -> Self {
		self.changes.insert(key.into(), None);
		self
	}

	/// Records a change in place; `None` removes the key.
	pub fn insert(&mut self, key: impl Into<String>, value: Option<ParamValue>) {
		self.changes.insert(key.into(), value);
	}

	/// Returns the number of keys touched.
	pub fn len(&self) -> usize {
		self.changes.len()
	}

	/// Returns true if the batch touches no keys.
	pub fn is_empty(&self) -> bool {
		self.changes.is_empty()
	}

	/// Iterates changes in recording order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&ParamValue>)> {
		self.changes.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
	}

	/// Merges this batch over `raw`, removing keys set to blank values.
	pub(crate) fn apply_to(&self, raw: &mut RawQuery) {
		for (key, change) in &self.changes {
			match change {
				Some(value) if !value.is_blank() => {
					raw.insert(key.clone(), value.to_raw());
				}
				_ => {
					raw.remove(key);
				}
			}
		}
	}
}

impl<K: Into<String>> FromIterator<(K, Option<ParamValue>)> for ParamUpdates {
	fn from_iter<I: IntoIterator<Item = (K, Option<ParamValue>)>>(iter: I) -> Self {
		Self {
			changes: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
		}
	}
}
