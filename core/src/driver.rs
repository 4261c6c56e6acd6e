//! Orchestrates the full pipeline: preprocess, split out header contributions, parse, subtract
//! header declarations, classify, rewrite non-void definitions, rewrite callers, macroize, and
//! finally splice the original `#include` directives back over the printed result.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use lang_c::ast::{DeclarationSpecifier, DerivedDeclarator, ExternalDeclaration, FunctionDefinition, TranslationUnit, TypeSpecifier};

use crate::classify::{self, declarator_name};
use crate::error::{Error, ParseError};
use crate::preprocess::{self, PreprocessOptions};
use crate::record::Recorder;
use crate::rename::NamePool;
use crate::rewrite::caller::{self, RewrittenFunction, RewrittenFunctions};
use crate::rewrite::{non_void, void_macro};
use crate::{ast_diff, include_split, printer};

/// Options threaded through a single rewrite run, sourced from the CLI
#[derive(Debug, Clone, Default)]
pub struct Config {
	/// Flags forwarded verbatim to the preprocessor, after this crate's own `-U__GNUC__`/`-I` flags
	pub preprocess: PreprocessOptions,
	/// When set, each pass's intermediate AST is written here for inspection
	pub record_dir: Option<PathBuf>,
}

/// Rewrite `input`, returning the full text of the rewritten translation unit (original `#include`
/// directives, minted `#define` macros, then the rewritten body).
pub fn rewrite_file(input: &Path, config: &Config) -> Result<String, Error> {
	let original = fs::read_to_string(input)?;
	let src_file = input.display().to_string();
	let primary_file_name = input.file_name().and_then(|n| n.to_str()).unwrap_or(&src_file).to_string();

	let recorder = match &config.record_dir {
		Some(dir) => Recorder::new(dir.clone()),
		None => Recorder::disabled(),
	};

	debug!("{}: preprocessing", src_file);
	let preprocessed = preprocess::preprocess(input, &config.preprocess)?;
	recorder.checkpoint(1, "preprocessed", &preprocessed)?;

	let split = include_split::split(&primary_file_name, &preprocessed, &original)?;

	let parser_config = lang_c::driver::Config::default();
	let mut primary_unit = lang_c::driver::parse_preprocessed(&parser_config, split.primary_code.clone())
		.map_err(|e| ParseError::Syntax { src_file: src_file.clone(), message: e.to_string() })?
		.unit;
	let header_unit = if split.header_code.trim().is_empty() {
		TranslationUnit(vec![])
	} else {
		lang_c::driver::parse_preprocessed(&parser_config, split.header_code.clone())
			.map_err(|e| ParseError::Syntax { src_file: src_file.clone(), message: e.to_string() })?
			.unit
	};

	ast_diff::subtract(&mut primary_unit, &header_unit);
	recorder.checkpoint(2, "header-subtracted", &printer::print_translation_unit(&primary_unit, &src_file)?)?;

	let mut pool = NamePool::new();
	pool.seed(tokenize(&split.primary_code));
	pool.seed(tokenize(&split.header_code));

	let mut candidates: Vec<String> = Vec::new();
	for ext in &primary_unit.0 {
		if let ExternalDeclaration::FunctionDefinition(def) = &ext.node {
			let Some(name) = declarator_name(&def.node.declarator.node) else { continue };
			match classify::classify(&def.node, &name) {
				Ok(()) => candidates.push(name),
				Err(refusal) => info!("{}: leaving `{}` unchanged ({})", src_file, name, refusal),
			}
		}
	}

	let mut rewritten: RewrittenFunctions = HashMap::new();
	for ext in primary_unit.0.iter_mut() {
		if let ExternalDeclaration::FunctionDefinition(def) = &mut ext.node {
			let Some(name) = declarator_name(&def.node.declarator.node) else { continue };
			if candidates.contains(&name) && !is_void_returning(&def.node) {
				debug!("{}: rewriting `{}` to the out-parameter convention", src_file, name);
				let return_specifiers = non_void::rewrite_definition(&mut def.node, &src_file)?;
				rewritten.insert(name, RewrittenFunction { return_specifiers });
			}
		}
	}
	recorder.checkpoint(3, "nonvoid-defs-rewritten", &printer::print_translation_unit(&primary_unit, &src_file)?)?;

	for ext in primary_unit.0.iter_mut() {
		if let ExternalDeclaration::FunctionDefinition(def) = &mut ext.node {
			caller::rewrite_callers(&mut def.node, &rewritten, &mut pool, &src_file)?;
		}
	}
	recorder.checkpoint(4, "callers-rewritten", &printer::print_translation_unit(&primary_unit, &src_file)?)?;

	let mut macros = Vec::new();
	let mut keep = Vec::with_capacity(primary_unit.0.len());
	for ext in primary_unit.0.drain(..) {
		let is_candidate = matches!(&ext.node, ExternalDeclaration::FunctionDefinition(def)
			if declarator_name(&def.node.declarator.node).is_some_and(|n| candidates.contains(&n)));

		if is_candidate {
			if let ExternalDeclaration::FunctionDefinition(def) = &ext.node {
				let name = declarator_name(&def.node.declarator.node).expect("checked above");
				debug!("{}: macroizing `{}`", src_file, name);
				macros.push(void_macro::macroize(&def.node, &name, &mut pool, &src_file)?);
			}
		} else {
			keep.push(ext);
		}
	}
	primary_unit.0 = keep;
	recorder.checkpoint(5, "void-macroized", &printer::print_translation_unit(&primary_unit, &src_file)?)?;

	let body_text = printer::print_translation_unit(&primary_unit, &src_file)?;

	let mut out = String::new();
	for directive in &split.directives {
		out.push_str(directive);
		out.push('\n');
	}
	if !split.directives.is_empty() {
		out.push('\n');
	}
	for m in &macros {
		out.push_str(m);
		out.push('\n');
	}
	out.push_str(&body_text);

	Ok(out)
}

/// True only for an unqualified `void` return type; `void *` is a pointer return and still goes
/// through the out-parameter rewrite.
fn is_void_returning(def: &FunctionDefinition) -> bool {
	let has_void_specifier = def
		.specifiers
		.iter()
		.any(|s| matches!(&s.node, DeclarationSpecifier::TypeSpecifier(t) if t.node == TypeSpecifier::Void));
	let has_pointer_return =
		def.declarator.node.derived.iter().any(|d| matches!(d.node, DerivedDeclarator::Pointer(_)));
	has_void_specifier && !has_pointer_return
}

/// A coarse token split used only to seed the fresh-name pool against collisions: every maximal
/// run of alphanumeric/underscore characters, whether it is a real identifier or a keyword, is a
/// name a freshly minted alias must not equal.
fn tokenize(text: &str) -> Vec<String> {
	let mut names = Vec::new();
	let mut current = String::new();
	for ch in text.chars() {
		if ch.is_alphanumeric() || ch == '_' {
			current.push(ch);
		} else if !current.is_empty() {
			names.push(std::mem::take(&mut current));
		}
	}
	if !current.is_empty() {
		names.push(current);
	}
	names
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn void_returning_excludes_pointer_return() {
		let cfg = lang_c::driver::Config::default();
		let unit = lang_c::driver::parse_preprocessed(&cfg, "void *f(int x) { return 0; }\n".to_string()).unwrap().unit;
		let ExternalDeclaration::FunctionDefinition(def) = &unit.0[0].node else { panic!("expected a function") };
		assert!(!is_void_returning(&def.node));
	}

	#[test]
	fn void_returning_true_for_plain_void() {
		let cfg = lang_c::driver::Config::default();
		let unit = lang_c::driver::parse_preprocessed(&cfg, "void f(int x) { x = x; }\n".to_string()).unwrap().unit;
		let ExternalDeclaration::FunctionDefinition(def) = &unit.0[0].node else { panic!("expected a function") };
		assert!(is_void_returning(&def.node));
	}

	#[test]
	fn tokenize_splits_on_punctuation() {
		let tokens = tokenize("int f(int x) { return x + 1; }");
		assert!(tokens.contains(&"f".to_string()));
		assert!(tokens.contains(&"x".to_string()));
		assert!(tokens.contains(&"1".to_string()));
	}
}
