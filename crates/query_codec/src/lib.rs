//! Query string wire format and typed parameter values.
//!
//! This crate owns everything that touches the raw `?key=value` text:
//!
//! * [`RawQuery`]: parsing and bracket-array serialization (`tags[]=a&tags[]=b`)
//! * [`ParamValue`]: the decoded, typed form of a single parameter
//! * [`ParamType`] and [`decode_value`]: the one decode path every reader shares
//!
//! Decoding never fails loudly. A value that does not fit its declared type
//! decodes to `None` and callers fall back to their defaults.

/// Typed decoding of raw wire values.
pub mod decode;
/// Raw query parsing and serialization.
pub mod raw;
/// Decoded parameter values.
pub mod value;

pub use decode::{CustomDecoder, ParamType, decode_value, infer_value, parse_number};
pub use raw::{RawQuery, RawValue};
pub use value::ParamValue;
