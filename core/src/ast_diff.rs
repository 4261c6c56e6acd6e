//! Multiset-based structural subtraction of top-level declarations, used to remove from the
//! primary translation unit's AST whatever was already contributed by its `#include`d headers.

use std::collections::HashMap;

use lang_c::ast::{ExternalDeclaration, TranslationUnit};

use crate::classify::declarator_name;

/// A structural-equality key for a top-level declaration. Two function definitions are equal iff
/// their declared names match — an inline function's body may have already been rewritten in the
/// primary file in ways that no longer match the header text verbatim, so only the name can be
/// trusted to identify "the same declaration".
#[derive(PartialEq, Eq, Hash, Clone)]
enum DeclKey {
	FunctionName(String),
	Exact(String),
}

fn decl_key(ext: &ExternalDeclaration) -> DeclKey {
	match ext {
		ExternalDeclaration::FunctionDefinition(def) => {
			let name = declarator_name(&def.node.declarator.node).unwrap_or_default();
			DeclKey::FunctionName(name)
		},
		other => DeclKey::Exact(format!("{:?}", other)),
	}
}

/// Remove from `primary` every top-level declaration that also structurally occurs in `headers`.
/// Declarations are matched as a multiset: if a header contributes the same declaration twice
/// (e.g. via a nested include guard quirk), only that many copies are removed from `primary`.
pub fn subtract(primary: &mut TranslationUnit, headers: &TranslationUnit) {
	let mut counts: HashMap<DeclKey, usize> = HashMap::new();
	for ext in &headers.0 {
		*counts.entry(decl_key(&ext.node)).or_insert(0) += 1;
	}

	let mut keep = Vec::with_capacity(primary.0.len());
	for ext in primary.0.drain(..) {
		let key = decl_key(&ext.node);
		match counts.get_mut(&key) {
			Some(count) if *count > 0 => *count -= 1,
			_ => keep.push(ext),
		}
	}

	primary.0 = keep;
}

#[cfg(test)]
mod tests {
	use lang_c::driver::{parse_preprocessed, Config};

	use super::*;

	fn parse_str(src: &str) -> TranslationUnit {
		let cfg = Config::default();
		parse_preprocessed(&cfg, src.to_string()).expect("test fixture must parse").unit
	}

	#[test]
	fn removes_declarations_present_in_both() {
		let mut primary = parse_str("typedef long mylong;\nint f(void) { return 0; }\n");
		let headers = parse_str("typedef long mylong;\n");

		subtract(&mut primary, &headers);

		assert_eq!(primary.0.len(), 1);
	}

	#[test]
	fn function_definitions_match_by_name_only() {
		let mut primary = parse_str("int f(void) { return 1; }\n");
		let headers = parse_str("int f(void) { return 0; }\n");

		subtract(&mut primary, &headers);

		assert!(primary.0.is_empty());
	}
}
