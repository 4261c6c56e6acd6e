//! Invokes the system C preprocessor. Mirrors the `-U__GNUC__` plus stub-include-path incantation
//! needed to preprocess real-world headers without pulling in the host's actual libc headers.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::PreprocessError;

/// Options forwarded to the preprocessor adapter
#[derive(Debug, Clone)]
pub struct PreprocessOptions {
	/// Preprocessor binary to invoke
	pub command:    String,
	/// Extra flags forwarded verbatim after this crate's own flags, e.g. extra `-I`/`-D` options
	pub extra_flags: Vec<String>,
}

impl Default for PreprocessOptions {
	fn default() -> Self { Self { command: "cc".to_string(), extra_flags: Vec::new() } }
}

/// Directory bundled with this crate standing in for opaque compiler builtin headers, so
/// `-U__GNUC__` preprocessing of real-world headers still parses without the host's actual libc.
pub fn stub_include_dir() -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("stub_include")
}

/// Run the preprocessor over `input`, returning its stdout with `_Pragma(...)` lines filtered
/// (the downstream parser does not understand `_Pragma`, and it carries no rewrite-relevant
/// information).
pub fn preprocess(input: &Path, opts: &PreprocessOptions) -> Result<String, PreprocessError> {
	let src_file = input.display().to_string();

	let mut cmd = Command::new(&opts.command);
	cmd.arg("-E")
		.arg("-U__GNUC__")
		.arg("-I")
		.arg(stub_include_dir())
		.args(&opts.extra_flags)
		.arg(input);

	let output = cmd.output().map_err(|e| PreprocessError::Spawn {
		src_file: src_file.clone(),
		command:  opts.command.clone(),
		message:  e.to_string(),
	})?;

	if !output.status.success() {
		return Err(PreprocessError::NonZeroExit {
			src_file,
			command: opts.command.clone(),
			status:  output.status.code().unwrap_or(-1),
			stderr:  String::from_utf8_lossy(&output.stderr).into_owned(),
		});
	}

	Ok(strip_pragmas(&String::from_utf8_lossy(&output.stdout)))
}

fn strip_pragmas(text: &str) -> String {
	text.lines()
		.filter(|line| !line.trim_start().starts_with("_Pragma("))
		.map(|line| format!("{}\n", line))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn strips_pragma_lines_only() {
		let text = "int x;\n_Pragma(\"pack(1)\")\nint y;\n";
		let stripped = strip_pragmas(text);
		assert_eq!(stripped, "int x;\nint y;\n");
	}

	#[test]
	fn stub_include_dir_is_under_the_crate_root() {
		assert!(stub_include_dir().ends_with("stub_include"));
	}
}
