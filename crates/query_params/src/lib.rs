//! Schema-driven query parameter state.
//!
//! A [`QueryParamsStore`] gives typed read access to the current location's
//! query string against a caller-declared [`ParamSchema`], and turns updates
//! into a single navigation to the new URL. The URL is the only source of
//! truth: the store keeps no state beyond a memoized parse.
//!
//! ```
//! use taskpad_query_params::{MemoryHistory, ParamSchema, ParamUpdates, QueryParamsStore};
//!
//! let schema = ParamSchema::builder()
//! 	.param("page", 1)
//! 	.param("search", "")
//! 	.build()?;
//! let store = QueryParamsStore::new(MemoryHistory::new("/tasks"), schema);
//!
//! store.set_params(ParamUpdates::new().set("page", 2).set("search", "login"));
//! assert_eq!(store.navigator().href(), "/tasks?page=2&search=login");
//! assert_eq!(store.params().get_as::<i64>("page"), Some(2));
//! assert!(store.has_filters());
//!
//! store.reset_params();
//! assert_eq!(store.navigator().href(), "/tasks");
//! # Ok::<(), taskpad_query_params::SchemaError>(())
//! ```
//!
//! Schemas can also be declared in TOML; see [`config`].

pub mod config;
pub mod effective;
pub mod error;
pub mod history;
pub mod navigator;
pub mod schema;
pub mod store;
pub mod typed_keys;
pub mod updates;

pub use config::{ParamConfig, SchemaConfig};
pub use effective::EffectiveParams;
pub use error::{Result, SchemaError};
pub use history::{CommitMode, HistoryEntry, MemoryHistory};
pub use navigator::{NavigateOptions, Navigator};
pub use schema::{ParamSchema, ParamSchemaBuilder};
pub use store::QueryParamsStore;
pub use taskpad_query_codec::{CustomDecoder, ParamType, ParamValue, RawQuery, RawValue};
pub use typed_keys::{FromParamValue, TypedParamKey};
pub use updates::ParamUpdates;
