//! Top-level error types

use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub(super) enum Error {
	Core(cinline_core::error::Error),
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Core(err) => write!(f, "{}", err),
		}
	}
}

impl From<cinline_core::error::Error> for Error {
	fn from(value: cinline_core::error::Error) -> Self { Self::Core(value) }
}
