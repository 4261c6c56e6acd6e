//! Error types produced by the rewrite engine

use std::fmt::{Display, Formatter};

mod parse_error;
mod preprocess_error;
mod print;
mod rewrite_error;

pub use parse_error::ParseError;
pub use preprocess_error::PreprocessError;
pub use rewrite_error::RewriteError;

/// Any error the rewrite engine can produce
#[derive(Debug)]
pub enum Error {
	/// Wrapper around [`std::io::Error`]
	Io(std::io::Error),
	/// An error produced by the preprocessor adapter
	Preprocess(PreprocessError),
	/// An error produced by the parser/printer adapter
	Parse(ParseError),
	/// An internal invariant violation raised by one of the rewrite passes
	Rewrite(RewriteError),
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Io(err) => write!(f, "{}", err),
			Self::Preprocess(err) => write!(f, "{}", err),
			Self::Parse(err) => write!(f, "{}", err),
			Self::Rewrite(err) => write!(f, "{}", err),
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(value: std::io::Error) -> Self { Self::Io(value) }
}

impl From<PreprocessError> for Error {
	fn from(value: PreprocessError) -> Self { Self::Preprocess(value) }
}

impl From<ParseError> for Error {
	fn from(value: ParseError) -> Self { Self::Parse(value) }
}

impl From<RewriteError> for Error {
	fn from(value: RewriteError) -> Self { Self::Rewrite(value) }
}
