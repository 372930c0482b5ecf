//! Error types for schema construction and loading.
//!
//! Reading and updating query parameters never fails; only declaring a
//! schema can.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when building or loading a [`ParamSchema`].
///
/// [`ParamSchema`]: crate::ParamSchema
#[derive(Debug, Error)]
pub enum SchemaError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a schema file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A key is empty or ends in the reserved `[]` suffix.
	#[error("invalid parameter key {0:?}")]
	InvalidKey(String),

	/// A declared type cannot hold the key's default value.
	#[error("type mismatch for parameter '{key}': expected {expected}, got {got}")]
	TypeMismatch {
		/// Parameter name.
		key: String,
		/// Declared type name.
		expected: &'static str,
		/// Type name of the default value.
		got: &'static str,
	},

	/// A type name is not one of the built-in types.
	#[error("unknown type '{name}' for parameter '{key}'")]
	UnknownType {
		/// Parameter name.
		key: String,
		/// The unrecognized type name.
		name: String,
	},

	/// A number default is NaN or infinite.
	#[error("default for parameter '{0}' is not a finite number")]
	NonFiniteDefault(String),

	/// A config entry declares neither a type nor a default.
	#[error("parameter '{0}' declares neither a type nor a default")]
	Undeclared(String),

	/// A default array mixes element types.
	#[error("default for parameter '{0}' mixes strings and numbers")]
	MixedArray(String),

	/// A default uses a TOML value with no query string form.
	#[error("unsupported default for parameter '{key}': {kind}")]
	UnsupportedDefault {
		/// Parameter name.
		key: String,
		/// TOML value kind.
		kind: &'static str,
	},
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
