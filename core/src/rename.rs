//! Process-wide collision-free fresh name allocation, shared by the α-renamer
//! ([`crate::rewrite::void_macro`]) and the caller rewriter's temporary hoisting
//! ([`crate::rewrite::caller`]).

use std::collections::HashSet;

use rand::Rng;

use crate::error::RewriteError;

const ALIAS_LEN: usize = 16;
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const MAX_ATTEMPTS: usize = 1 << 20;

/// A collision-free identifier allocator, seeded with every name already declared in the
/// translation unit being rewritten so a minted alias can never collide with a source identifier,
/// only with an alias this same pool has already issued.
#[derive(Debug, Default)]
pub struct NamePool {
	issued: HashSet<String>,
}

impl NamePool {
	/// Create an empty pool
	pub fn new() -> Self { Self::default() }

	/// Register every identifier already visible in the source so minted names never shadow them
	pub fn seed<I: IntoIterator<Item = String>>(&mut self, names: I) { self.issued.extend(names); }

	/// Mint a fresh, never-before-issued identifier
	pub fn fresh(&mut self, src_file: &str) -> Result<String, RewriteError> {
		for _ in 0..MAX_ATTEMPTS {
			let candidate = random_alias();
			if !self.issued.contains(&candidate) {
				self.issued.insert(candidate.clone());
				return Ok(candidate);
			}
		}

		Err(RewriteError::NamesExhausted { src_file: src_file.to_string() })
	}
}

fn random_alias() -> String {
	let mut rng = rand::thread_rng();
	(0..ALIAS_LEN).map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fresh_names_are_unique() {
		let mut pool = NamePool::new();
		let mut seen = HashSet::new();
		for _ in 0..256 {
			let name = pool.fresh("test.c").unwrap();
			assert_eq!(name.len(), ALIAS_LEN);
			assert!(seen.insert(name), "fresh() issued a duplicate name");
		}
	}

	#[test]
	fn seeded_names_are_never_reissued() {
		let mut pool = NamePool::new();
		pool.seed(["preseeded".to_string()]);
		for _ in 0..64 {
			assert_ne!(pool.fresh("test.c").unwrap(), "preseeded");
		}
	}
}
