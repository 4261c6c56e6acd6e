#![allow(missing_docs)]

use std::fmt::{Display, Formatter};

use super::print::make_info_note;

/// An error produced by the C parser or printer adapter
#[derive(Debug)]
pub enum ParseError {
	/// The C parser rejected the preprocessed translation unit
	Syntax { src_file: String, message: String },
	/// A `#line` marker in the preprocessed text could not be matched back to an `#include`
	/// directive in the original source
	UnresolvedInclude { src_file: String, header: String },
	/// The printer was asked to render a node shape it does not know how to emit
	Unprintable { src_file: String, node: String },
}

impl Display for ParseError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let repr = match self {
			Self::Syntax { src_file, message } => {
				let mut pretty_err = make_info_note("failed to parse preprocessed translation unit", src_file);
				pretty_err.push_str(message.trim_end());
				pretty_err.push('\n');
				pretty_err
			},
			Self::UnresolvedInclude { src_file, header } => make_info_note(
				&format!("could not find an `#include` directive contributing header `{}`", header),
				src_file,
			),
			Self::Unprintable { src_file, node } => {
				make_info_note(&format!("don't know how to print a `{}` node", node), src_file)
			},
		};

		write!(f, "{}", repr)
	}
}
