//! Writes the pretty-printed translation unit to a numbered checkpoint file under a record-trace
//! directory, purely so a maintainer can diff what a given pass did to a given input. Has no effect
//! on the rewrite itself; when no directory is configured, every call is a no-op, so the driver can
//! call it unconditionally without branching on whether tracing is enabled.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Writes numbered checkpoint files to a directory, or does nothing if unconfigured.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
	dir: Option<PathBuf>,
}

impl Recorder {
	/// A recorder that writes every checkpoint under `dir`, creating it if necessary.
	pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: Some(dir.into()) } }

	/// A recorder that discards every checkpoint.
	pub fn disabled() -> Self { Self { dir: None } }

	/// Write `contents` to `<dir>/<step>-<label>.c`. A no-op if this recorder is disabled.
	pub fn checkpoint(&self, step: u32, label: &str, contents: &str) -> Result<(), Error> {
		let Some(dir) = &self.dir else { return Ok(()) };
		fs::create_dir_all(dir)?;
		fs::write(checkpoint_path(dir, step, label), contents)?;
		Ok(())
	}
}

fn checkpoint_path(dir: &Path, step: u32, label: &str) -> PathBuf { dir.join(format!("{:02}-{}.c", step, label)) }

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn disabled_recorder_writes_nothing() {
		let recorder = Recorder::disabled();
		recorder.checkpoint(1, "preprocessed", "int x;").unwrap();
	}

	#[test]
	fn enabled_recorder_writes_a_numbered_file() {
		let dir = std::env::temp_dir().join(format!("cinline-record-test-{}", std::process::id()));
		let recorder = Recorder::new(&dir);

		recorder.checkpoint(1, "preprocessed", "int x;\n").unwrap();

		let contents = fs::read_to_string(dir.join("01-preprocessed.c")).unwrap();
		assert_eq!(contents, "int x;\n");

		fs::remove_dir_all(&dir).ok();
	}
}
