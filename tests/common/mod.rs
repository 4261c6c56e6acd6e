use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

fn scratch_dir() -> PathBuf {
	let n = COUNTER.fetch_add(1, Ordering::SeqCst);
	let dir = std::env::temp_dir().join(format!("cinline-test-{}-{}", std::process::id(), n));
	fs::create_dir_all(&dir).expect("create scratch dir");
	dir
}

/// Rewrite `src` (written to a scratch file) with default options, returning the rewritten text.
pub fn rewrite(src: &str) -> String {
	let dir = scratch_dir();
	let file = dir.join("input.c");
	fs::write(&file, src).expect("write fixture");

	let config = cinline_core::driver::Config::default();
	let result = cinline_core::rewrite_file(&file, &config).expect("rewrite_file must succeed");

	fs::remove_dir_all(&dir).ok();
	result
}

/// Like [`rewrite`], but writes an extra header file alongside the primary source first, so a
/// `#include "name"` directive in `src` resolves.
pub fn rewrite_with_header(src: &str, header_name: &str, header_src: &str) -> String {
	let dir = scratch_dir();
	fs::write(dir.join(header_name), header_src).expect("write header fixture");
	let file = dir.join("input.c");
	fs::write(&file, src).expect("write fixture");

	let config = cinline_core::driver::Config::default();
	let result = cinline_core::rewrite_file(&file, &config).expect("rewrite_file must succeed");

	fs::remove_dir_all(&dir).ok();
	result
}
