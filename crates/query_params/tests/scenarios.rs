//! End-to-end behavior of the store over an in-memory history.

use pretty_assertions::assert_eq;
use taskpad_query_params::{
	CommitMode, MemoryHistory, NavigateOptions, Navigator, ParamSchema, ParamUpdates, ParamValue,
	QueryParamsStore,
};

fn init_tracing() {
	let _ = tracing_subscriber::fmt::try_init();
}

fn list_store() -> QueryParamsStore<MemoryHistory> {
	init_tracing();
	let schema = ParamSchema::builder()
		.param("page", 1)
		.param("limit", 10)
		.param("search", "")
		.build()
		.unwrap();
	QueryParamsStore::new(MemoryHistory::new("/list"), schema)
}

#[test]
fn empty_query_yields_defaults() {
	let store = list_store();
	let params = store.params();
	let expected: Vec<_> = store.schema().defaults().iter().map(|(k, v)| (k.as_str(), v)).collect();
	assert_eq!(params.iter().collect::<Vec<_>>(), expected);
}

#[test]
fn list_filter_walkthrough() {
	let store = list_store();

	store.set_param("page", 2);
	assert_eq!(store.navigator().href(), "/list?page=2");

	store.set_params(ParamUpdates::new().set("search", "foo").set("page", 1));
	assert_eq!(store.navigator().href(), "/list?page=1&search=foo");

	store.delete_param("search");
	assert_eq!(store.navigator().href(), "/list?page=1");

	store.reset_params();
	assert_eq!(store.navigator().href(), "/list");
}

#[test]
fn untouched_keys_survive_updates() {
	init_tracing();
	let schema = ParamSchema::builder().param("a", 1).param("b", "x").build().unwrap();
	let store = QueryParamsStore::new(MemoryHistory::new("/p?a=5"), schema);

	store.set_param("b", "y");

	let params = store.params();
	assert_eq!(params["a"], ParamValue::Number(5.0));
	assert_eq!(params["b"], ParamValue::String("y".into()));
}

#[test]
fn delete_is_idempotent() {
	let store = list_store();
	store.set_params(ParamUpdates::new().set("page", 3).set("search", "q"));

	store.delete_param("page");
	let once = store.navigator().href();
	store.delete_param("page");
	assert_eq!(store.navigator().href(), once);
	assert_eq!(once, "/list?search=q");
}

#[test]
fn has_filters_follows_page() {
	init_tracing();
	let schema = ParamSchema::builder().param("page", 1).build().unwrap();
	let store = QueryParamsStore::new(MemoryHistory::new("/list"), schema);

	assert!(!store.has_filters());
	store.set_param("page", 2);
	assert!(store.has_filters());
	store.reset_params();
	assert!(!store.has_filters());
}

#[test]
fn empty_search_is_not_written() {
	let store = list_store();
	store.set_param("search", "");
	assert_eq!(store.navigator().href(), "/list");
	assert!(!store.has("search"));
}

#[test]
fn tags_round_trip_through_brackets() {
	init_tracing();
	let schema = ParamSchema::builder().param("tags", Vec::<String>::new()).build().unwrap();
	let store = QueryParamsStore::new(MemoryHistory::new("/board"), schema);

	store.set_param("tags", vec!["a", "b"]);

	assert!(store.navigator().href().contains("tags[]=a&tags[]=b"));
	assert_eq!(
		store.params()["tags"],
		ParamValue::StringArray(vec!["a".into(), "b".into()])
	);
}

#[test]
fn updates_keep_scroll_position() {
	let store = list_store();
	store.navigator().set_scroll(640);

	store.set_param("page", 4);
	assert_eq!(store.navigator().scroll(), 640);
	store.delete_param("page");
	assert_eq!(store.navigator().scroll(), 640);
	store.reset_params();
	assert_eq!(store.navigator().scroll(), 640);

	// A plain navigation elsewhere does reset it.
	store.navigator().navigate("/other", NavigateOptions::default());
	assert_eq!(store.navigator().scroll(), 0);
}

#[test]
fn one_navigation_per_batch() {
	let store = list_store();
	store.set_params(
		ParamUpdates::new()
			.set("page", 9)
			.set("limit", 50)
			.set("search", "x")
			.unset("owner"),
	);
	assert_eq!(store.navigator().requests(), 1);
}

#[test]
fn back_navigation_is_observed() {
	let store = list_store();
	store.set_param("page", 2);
	store.set_param("page", 3);
	assert!(store.navigator().back());
	assert_eq!(store.params()["page"], ParamValue::Number(2.0));
}

#[test]
fn deferred_commits_are_invisible_until_flushed() {
	init_tracing();
	let schema = ParamSchema::builder().param("page", 1).build().unwrap();
	let history = MemoryHistory::with_mode("/list", CommitMode::Deferred);
	let store = QueryParamsStore::new(&history, schema);

	store.set_param("page", 2);
	assert_eq!(store.params()["page"], ParamValue::Number(1.0));
	history.flush();
	assert_eq!(store.params()["page"], ParamValue::Number(2.0));
}
