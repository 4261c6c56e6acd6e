#![allow(missing_docs)]

use std::fmt::{Display, Formatter};

use super::print::make_info_note;

/// An error produced while invoking the external C preprocessor
#[derive(Debug)]
pub enum PreprocessError {
	/// The preprocessor binary could not be spawned at all (not on `PATH`, permission denied, …)
	Spawn { src_file: String, command: String, message: String },
	/// The preprocessor ran but exited with a non-zero status
	NonZeroExit { src_file: String, command: String, status: i32, stderr: String },
}

impl Display for PreprocessError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let repr = match self {
			Self::Spawn { src_file, command, message } => {
				let mut pretty_err =
					make_info_note(&format!("failed to run `{}`: {}", command, message), src_file);
				pretty_err.push('\n');
				pretty_err
			},
			Self::NonZeroExit { src_file, command, status, stderr } => {
				let mut pretty_err = make_info_note(
					&format!("`{}` exited with status {}", command, status),
					src_file,
				);
				if !stderr.is_empty() {
					pretty_err.push_str(stderr.trim_end());
					pretty_err.push('\n');
				}
				pretty_err
			},
		};

		write!(f, "{}", repr)
	}
}
