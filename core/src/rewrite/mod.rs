//! Transforms inline function definitions into macros and rewrites their call sites to match.
//!
//! The three passes run in a fixed order, driven by [`crate::driver`]: non-void definitions are
//! rewritten to the out-parameter convention first ([`non_void`]), then every caller in the
//! translation unit is rewritten to match ([`caller`]), and finally every now-void candidate
//! (originally void-returning, or just rewritten to be) is macroized ([`void_macro`]).

pub mod caller;
pub mod non_void;
pub mod void_macro;

use std::collections::{HashMap, HashSet};

/// A single α-rename binding: the alias assigned to a source name, and whether a nested scope may
/// shadow it with an alias of its own.
#[derive(Debug, Clone)]
pub struct Symbol {
	pub alias:        String,
	pub overwritable: bool,
}

/// A scope-stacked symbol table used by the α-renamer. Entering a scope clones the table and
/// marks every existing binding overwritable, so a declaration in the nested scope can shadow a
/// parameter without corrupting the parent scope's view; exiting a scope simply drops the clone.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
	bindings: HashMap<String, Symbol>,
}

impl AliasTable {
	pub fn new() -> Self { Self::default() }

	pub fn register(&mut self, name: &str, alias: &str, overwritable: bool) {
		self.bindings.insert(name.to_string(), Symbol { alias: alias.to_string(), overwritable });
	}

	pub fn lookup(&self, name: &str) -> Option<&str> { self.bindings.get(name).map(|s| s.alias.as_str()) }

	pub fn enter_scope(&self) -> Self {
		let mut cloned = self.clone();
		for symbol in cloned.bindings.values_mut() {
			symbol.overwritable = true;
		}
		cloned
	}
}

/// A scope-stacked set of names bound in the current lexical scope. Used by the caller rewriter
/// to decide whether a call site's callee name is shadowed by a local declaration or parameter
/// rather than referring to a macroized function.
#[derive(Debug, Clone, Default)]
pub struct ShadowSet {
	names: HashSet<String>,
}

impl ShadowSet {
	pub fn new() -> Self { Self::default() }

	pub fn bind(&mut self, name: &str) { self.names.insert(name.to_string()); }

	pub fn contains(&self, name: &str) -> bool { self.names.contains(name) }

	pub fn enter_scope(&self) -> Self { self.clone() }
}
