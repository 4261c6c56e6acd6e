//! Partitions preprocessed C text into the primary translation unit's own code and the code
//! contributed by `#include`d headers, recovering the original `#include` directive text by
//! walking the preprocessor's `#line` markers.

use std::collections::HashSet;

use crate::error::ParseError;

/// The result of splitting preprocessed text against its original source
pub struct Split {
	/// `#include` directive lines, verbatim, in the order their headers first appear
	pub directives:   Vec<String>,
	/// Concatenated code contributed by headers (`#line` markers stripped), to be parsed
	/// separately and subtracted from the primary AST
	pub header_code:  String,
	/// The subset of the preprocessed text attributable to the primary file, `#line` markers and
	/// `_Pragma(...)` lines stripped, ready to be parsed as the primary translation unit
	pub primary_code: String,
}

/// Split `preprocessed` (the preprocessor's output for `primary_file`) against `original` (the
/// primary file's own unpreprocessed text).
pub fn split(primary_file: &str, preprocessed: &str, original: &str) -> Result<Split, ParseError> {
	let original_lines: Vec<&str> = original.lines().collect();

	let mut directives = Vec::new();
	let mut seen_headers = HashSet::new();
	let mut header_code = String::new();
	let mut primary_code = String::new();

	let mut in_primary = true;
	let mut last_primary_orig_line: usize = 0;

	for line in preprocessed.lines() {
		if let Some((lineno, file)) = parse_line_marker(line) {
			if is_primary_file(primary_file, &file) {
				in_primary = true;
				last_primary_orig_line = lineno.saturating_sub(1);
			} else {
				in_primary = false;
				if seen_headers.insert(file.clone()) {
					let directive = find_include_directive(&original_lines, last_primary_orig_line, &file)
						.ok_or_else(|| ParseError::UnresolvedInclude {
							src_file: primary_file.to_string(),
							header:   file.clone(),
						})?;
					directives.push(directive);
				}
			}
			continue;
		}

		if line.trim_start().starts_with("_Pragma(") {
			continue;
		}

		if in_primary {
			primary_code.push_str(line);
			primary_code.push('\n');
		} else {
			header_code.push_str(line);
			header_code.push('\n');
		}
	}

	Ok(Split { directives, header_code, primary_code })
}

fn is_primary_file(primary_file: &str, candidate: &str) -> bool {
	candidate == primary_file || candidate.ends_with(&format!("/{}", primary_file))
}

/// Parse a GCC-style linemarker (`# 12 "path.h" 1`) or classic `#line 12 "path.h"` directive.
fn parse_line_marker(line: &str) -> Option<(usize, String)> {
	let line = line.trim_start();
	if !line.starts_with('#') {
		return None;
	}

	let rest = line.trim_start_matches('#').trim_start();
	let rest = rest.strip_prefix("line").map(str::trim_start).unwrap_or(rest);

	let mut parts = rest.splitn(2, char::is_whitespace);
	let lineno: usize = parts.next()?.parse().ok()?;
	let remainder = parts.next()?.trim_start();
	let path = remainder.strip_prefix('"')?;
	let end = path.find('"')?;

	Some((lineno, path[..end].to_string()))
}

/// Find the `#include` directive in `original_lines` that plausibly produced `header`. Searches
/// forward from the last confirmed primary-file line first (the common case for a linear stream
/// of includes), then falls back to a full scan for nested or reordered includes.
fn find_include_directive(original_lines: &[&str], from_line: usize, header: &str) -> Option<String> {
	let basename = header.rsplit('/').next().unwrap_or(header);

	let forward = original_lines.iter().skip(from_line).find_map(|l| match_include(l, basename));
	forward.or_else(|| original_lines.iter().find_map(|l| match_include(l, basename)))
}

fn match_include(line: &str, basename: &str) -> Option<String> {
	let trimmed = line.trim_start();
	if trimmed.starts_with("#include") && trimmed.contains(basename) {
		Some(trimmed.to_string())
	} else {
		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn recovers_include_directive_and_separates_header_code() {
		let original = "#include \"util.h\"\nint main(void) { return 0; }\n";
		let preprocessed = "# 1 \"main.c\"\n# 1 \"util.h\" 1\ntypedef long mylong;\n# 2 \"main.c\" 2\nint main(void) { return 0; }\n";

		let split = split("main.c", preprocessed, original).unwrap();

		assert_eq!(split.directives, vec!["#include \"util.h\"".to_string()]);
		assert!(split.header_code.contains("typedef long mylong;"));
		assert!(split.primary_code.contains("int main(void) { return 0; }"));
		assert!(!split.primary_code.contains("typedef long mylong;"));
	}

	#[test]
	fn unresolved_header_is_an_error() {
		let original = "int main(void) { return 0; }\n";
		let preprocessed = "# 1 \"main.c\"\n# 1 \"missing.h\" 1\nint x;\n# 1 \"main.c\" 2\nint main(void) { return 0; }\n";

		assert!(split("main.c", preprocessed, original).is_err());
	}
}
