//! The navigation subsystem the store reads from and writes to.

use std::rc::Rc;
use std::sync::Arc;

/// Options passed along with a navigation request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
	/// Keep the current scroll offset instead of jumping to the top.
	pub preserve_scroll: bool,
}

impl NavigateOptions {
	/// Options for an in-place update that keeps the scroll offset.
	pub const fn keep_scroll() -> Self {
		Self { preserve_scroll: true }
	}
}

/// Owner of the current location.
///
/// Implementations wrap whatever router or history API the host provides.
/// `navigate` is fire-and-forget: the host may apply it later, and readers
/// only observe the new location once it has been committed.
pub trait Navigator {
	/// Returns the current path, without query string.
	fn path(&self) -> String;

	/// Returns the current encoded query string, with or without leading `?`.
	fn query(&self) -> String;

	/// Requests navigation to `destination` (`/path` or `/path?query`).
	fn navigate(&self, destination: &str, options: NavigateOptions);
}

macro_rules! forward_navigator {
	($($ptr:ident),*) => {
		$(
			impl<N: Navigator + ?Sized> Navigator for $ptr<N> {
				fn path(&self) -> String {
					(**self).path()
				}

				fn query(&self) -> String {
					(**self).query()
				}

				fn navigate(&self, destination: &str, options: NavigateOptions) {
					(**self).navigate(destination, options)
				}
			}
		)*
	};
}

forward_navigator!(Arc, Rc, Box);

impl<N: Navigator + ?Sized> Navigator for &N {
	fn path(&self) -> String {
		(**self).path()
	}

	fn query(&self) -> String {
		(**self).query()
	}

	fn navigate(&self, destination: &str, options: NavigateOptions) {
		(**self).navigate(destination, options)
	}
}

/// Splits a destination into its path and query parts.
///
/// The query part excludes the `?` and is empty when there is none.
pub fn split_destination(destination: &str) -> (&str, &str) {
	destination.split_once('?').unwrap_or((destination, ""))
}
