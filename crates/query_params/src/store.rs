//! Typed access to the current location's query parameters.

use std::sync::Arc;

use parking_lot::Mutex;
use taskpad_query_codec::{ParamValue, RawQuery};

use crate::effective::EffectiveParams;
use crate::navigator::{NavigateOptions, Navigator};
use crate::schema::ParamSchema;
use crate::typed_keys::{FromParamValue, TypedParamKey};
use crate::updates::ParamUpdates;


#[derive(Debug)]
struct Memo {
	query: String,
	params: Arc<EffectiveParams>,
}

/// Reads and updates query parameters against a [`ParamSchema`].
///
/// The URL owned by the [`Navigator`] is the only state. Reads parse the
/// navigator's current query string; writes compute a new one and navigate
/// to it, keeping the scroll offset. Nothing here fails: malformed URL
/// values fall back to their defaults.
///
/// Writes read the *committed* location. If the navigator applies
/// navigations asynchronously, two writes issued before the first commits
/// both start from the same URL and the second overwrites the first. Batch
/// related changes into one [`ParamUpdates`].
#[derive(Debug)]
pub struct QueryParamsStore<N> {
	navigator: N,
	schema: Arc<ParamSchema>,
	memo: Mutex<Option<Memo>>,
}

impl<N: Navigator> QueryParamsStore<N> {
	/// Creates a store over `navigator`.
	pub fn new(navigator: N, schema: impl Into<Arc<ParamSchema>>) -> Self {
		Self {
			navigator,
			schema: schema.into(),
			memo: Mutex::new(None),
		}
	}

	/// Returns the schema.
	pub fn schema(&self) -> &ParamSchema {
		&self.schema
	}

	/// Returns the navigator.
	pub fn navigator(&self) -> &N {
		&self.navigator
	}

	/// Returns the schema defaults overlaid with the current URL values.
	///
	/// The result is cached until the query string changes.
	pub fn params(&self) -> Arc<EffectiveParams> {
		let query = self.navigator.query();
		let mut memo = self.memo.lock();
		if let Some(cached) = memo.as_ref()
			&& cached.query == query
		{
			return Arc::clone(&cached.params);
		}

		let params = Arc::new(EffectiveParams::resolve(&self.schema, &RawQuery::parse(&query)));
		*memo = Some(Memo {
			query,
			params: Arc::clone(&params),
		});
		params
	}

	/// Returns the effective value behind a typed key.
	pub fn value<T: FromParamValue>(&self, key: TypedParamKey<T>) -> Option<T> {
		self.params().get_typed(key)
	}

	/// Returns true if `key` appears in the URL, whatever its value.
	pub fn has(&self, key: &str) -> bool {
		self.raw().contains_key(key)
	}

	/// Decodes `key` from the URL alone, ignoring its default.
	///
	/// Returns `None` if the key is absent or its value does not fit the
	/// key's type. Agrees with [`params`](Self::params) on every value that
	/// decodes and is not blank.
	pub fn get_param(&self, key: &str) -> Option<ParamValue> {
		let raw = self.raw();
		raw.get(key).and_then(|value| self.schema.decode(key, value))
	}

	/// Applies `updates` over the current URL and navigates once.
	///
	/// Keys not mentioned keep their current URL value. Keys set to blank
	/// values, and blank values already in the URL, are dropped.
	pub fn set_params(&self, updates: ParamUpdates) {
		let destination = self.href_with(&updates);
		self.navigate(destination);
	}

	/// Sets a single key.
	pub fn set_param(&self, key: impl Into<String>, value: impl Into<ParamValue>) {
		self.set_params(ParamUpdates::new().set(key, value));
	}

	/// Removes `key` from the URL. Removing an absent key re-navigates to the
	/// same location.
	pub fn delete_param(&self, key: &str) {
		let mut raw = self.raw();
		raw.remove(key);
		let destination = self.href_for(&raw);
		self.navigate(destination);
	}

	/// Navigates to the bare current path, dropping every parameter.
	pub fn reset_params(&self) {
		let destination = self.navigator.path();
		self.navigate(destination);
	}

	/// Returns true if any schema key differs from its default.
	pub fn has_filters(&self) -> bool {
		!self.params().is_default(&self.schema)
	}

	/// Returns the location [`set_params`](Self::set_params) would navigate
	/// to, without navigating.
	pub fn href_with(&self, updates: &ParamUpdates) -> String {
		let mut raw = self.raw();
		updates.apply_to(&mut raw);
		self.href_for(&raw)
	}

	fn raw(&self) -> RawQuery {
		RawQuery::parse(&self.navigator.query())
	}

	fn href_for(&self, raw: &RawQuery) -> String {
		let path = self.navigator.path();
		let query = raw.to_query_string();
		if query.is_empty() {
			path
		} else {
			format!("{path}?{query}")
		}
	}

	fn navigate(&self, destination: String) {
		tracing::debug!(domain = "query_params", %destination, "navigating");
		self.navigator.navigate(&destination, NavigateOptions::keep_scroll());
	}
}
