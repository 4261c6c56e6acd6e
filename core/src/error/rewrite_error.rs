#![allow(missing_docs)]

use std::fmt::{Display, Formatter};

use super::print::make_info_note;

/// An internal invariant violation. Unlike a classifier refusal (which is not an error — the
/// function is simply left alone) these indicate the rewrite reached a state §3's invariants say
/// cannot happen.
#[derive(Debug)]
pub enum RewriteError {
	/// The fresh-name pool exhausted its alphabet without finding an unused alias. Cannot happen
	/// for any translation unit smaller than the alphabet's cardinality.
	NamesExhausted { src_file: String },
	/// A non-void rewrite candidate had no resolvable return type
	MissingReturnType { src_file: String, function: String },
	/// A candidate was macroized but a caller rewrite still finds its name in the shadow set at
	/// the point the void macroizer runs, meaning the caller pass ran out of order
	OutOfOrderRewrite { src_file: String, function: String },
}

impl Display for RewriteError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let repr = match self {
			Self::NamesExhausted { src_file } => {
				make_info_note("fresh-name pool exhausted", src_file)
			},
			Self::MissingReturnType { src_file, function } => make_info_note(
				&format!("could not determine the return type of `{}`", function),
				src_file,
			),
			Self::OutOfOrderRewrite { src_file, function } => make_info_note(
				&format!("internal ordering violation rewriting callers of `{}`", function),
				src_file,
			),
		};

		write!(f, "{}", repr)
	}
}
