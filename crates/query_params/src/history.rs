//! In-memory navigation history.
//!
//! [`MemoryHistory`] stands in for a browser history or router when the store
//! runs headless. It can apply navigations immediately or queue them the way
//! an asynchronous router does, which makes read-before-commit races
//! reproducible.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::navigator::{NavigateOptions, Navigator, split_destination};


/// One committed location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
	/// Path without query string.
	pub path: String,
	/// Encoded query string without leading `?`.
	pub query: String,
	/// Vertical scroll offset at this location.
	pub scroll: u32,
}

impl HistoryEntry {
	fn parse(href: &str, scroll: u32) -> Self {
		let (path, query) = split_destination(href);
		Self {
			path: path.to_string(),
			query: query.to_string(),
			scroll,
		}
	}

	/// Returns `path?query`, or just the path when the query is empty.
	pub fn href(&self) -> String {
		if self.query.is_empty() {
			self.path.clone()
		} else {
			format!("{}?{}", self.path, self.query)
		}
	}
}

/// When navigation requests take effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommitMode {
	/// Each request is committed before `navigate` returns.
	#[default]
	Immediate,
	/// Requests queue until [`MemoryHistory::flush`].
	Deferred,
}

#[derive(Debug)]
struct HistoryState {
	past: Vec<HistoryEntry>,
	current: HistoryEntry,
	pending: VecDeque<(String, NavigateOptions)>,
	mode: CommitMode,
	requests: usize,
}

impl HistoryState {
	fn commit(&mut self, destination: &str, options: NavigateOptions) {
		let scroll = if options.preserve_scroll {
			self.current.scroll
		} else {
			0
		};
		let mut next = HistoryEntry::parse(destination, scroll);
		if next.path.is_empty() {
			next.path = self.current.path.clone();
		}
		tracing::trace!(
			domain = "query_params",
			from = %self.current.href(),
			to = %next.href(),
			scroll,
			"history commit",
		);
		let previous = std::mem::replace(&mut self.current, next);
		self.past.push(previous);
	}
}

/// Navigation history held in memory.
#[derive(Debug)]
pub struct MemoryHistory {
	state: Mutex<HistoryState>,
}

impl MemoryHistory {
	/// Creates a history positioned at `href`, committing immediately.
	pub fn new(href: &str) -> Self {
		Self::with_mode(href, CommitMode::Immediate)
	}

	/// Creates a history positioned at `href` with the given commit mode.
	pub fn with_mode(href: &str, mode: CommitMode) -> Self {
		Self {
			state: Mutex::new(HistoryState {
				past: Vec::new(),
				current: HistoryEntry::parse(href, 0),
				pending: VecDeque::new(),
				mode,
				requests: 0,
			}),
		}
	}

	/// Returns the committed location as `path?query`.
	pub fn href(&self) -> String {
		self.state.lock().current.href()
	}

	/// Returns the committed entry.
	pub fn current(&self) -> HistoryEntry {
		self.state.lock().current.clone()
	}

	/// Returns every committed entry, oldest first.
	pub fn entries(&self) -> Vec<HistoryEntry> {
		let state = self.state.lock();
		state.past.iter().chain(std::iter::once(&state.current)).cloned().collect()
	}

	/// Returns the number of committed entries.
	pub fn len(&self) -> usize {
		self.state.lock().past.len() + 1
	}

	/// Always false: a history has at least its initial entry.
	pub fn is_empty(&self) -> bool {
		false
	}

	/// Steps back one entry. Returns false at the initial entry.
	pub fn back(&self) -> bool {
		let mut state = self.state.lock();
		match state.past.pop() {
			Some(previous) => {
				state.current = previous;
				true
			}
			None => false,
		}
	}

	/// Sets the scroll offset of the committed entry.
	pub fn set_scroll(&self, offset: u32) {
		self.state.lock().current.scroll = offset;
	}

	/// Returns the scroll offset of the committed entry.
	pub fn scroll(&self) -> u32 {
		self.state.lock().current.scroll
	}

	/// Returns the number of queued, uncommitted navigations.
	pub fn pending(&self) -> usize {
		self.state.lock().pending.len()
	}

	/// Returns the total number of navigation requests received.
	pub fn requests(&self) -> usize {
		self.state.lock().requests
	}

	/// Commits queued navigations in request order. Returns how many ran.
	pub fn flush(&self) -> usize {
		let mut state = self.state.lock();
		let queued: Vec<_> = state.pending.drain(..).collect();
		for (destination, options) in &queued {
			state.commit(destination, *options);
		}
		queued.len()
	}
}

impl Navigator for MemoryHistory {
	fn path(&self) -> String {
		self.state.lock().current.path.clone()
	}

	fn query(&self) -> String {
		self.state.lock().current.query.clone()
	}

	fn navigate(&self, destination: &str, options: NavigateOptions) {
		let mut state = self.state.lock();
		state.requests += 1;
		match state.mode {
			CommitMode::Immediate => state.commit(destination, options),
			CommitMode::Deferred => state.pending.push_back((destination.to_string(), options)),
		}
	}
}
