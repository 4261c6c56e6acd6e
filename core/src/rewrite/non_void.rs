//! Rewrites a non-void-returning inline function definition into the out-parameter convention:
//! `T f(Args)` becomes `void f(T *retval, Args)`, with every `return E` inside rewritten to
//! `*retval = E;` followed by a bare `return;`.

use lang_c::ast::{DeclarationSpecifier, DerivedDeclarator, FunctionDefinition, ParameterDeclaration, Statement};
use lang_c::span::Node;

use crate::ast_build::{self, assign, expr_stmt, indirection, return_stmt, stmt_item};
use crate::classify::declarator_name;
use crate::error::RewriteError;

const RETVAL_PARAM: &str = "retval";

/// Rewrite `def` in place, returning the declaration specifiers its return type used to have
/// (needed by the caller rewriter to type a hoisted temporary). Errors only if `def`'s return
/// type cannot be determined — the classifier is expected to have already excluded
/// `void`-returning and variadic candidates, so this should not happen for a function that
/// reached this pass.
pub fn rewrite_definition(
	def: &mut FunctionDefinition,
	src_file: &str,
) -> Result<Vec<Node<DeclarationSpecifier>>, RewriteError> {
	let retval_specifiers = return_type_specifiers(&def.specifiers);
	if retval_specifiers.is_empty() {
		return Err(RewriteError::MissingReturnType {
			src_file: src_file.to_string(),
			function: declarator_name(&def.declarator.node).unwrap_or_default(),
		});
	}

	let retval_param = ast_build::node(ParameterDeclaration {
		specifiers: retval_specifiers.clone(),
		declarator: Some(ast_build::pointer_declarator(RETVAL_PARAM)),
		extensions: vec![],
	});

	for derived in &mut def.declarator.node.derived {
		if let DerivedDeclarator::Function(func) = &mut derived.node {
			func.node.parameters.insert(0, retval_param);
			break;
		}
	}

	make_void_return(&mut def.specifiers);
	rewrite_returns_in_statement(&mut def.statement.node);

	Ok(retval_specifiers)
}

/// The `TypeSpecifier`/`TypeQualifier` slots of a function's declaration specifiers describe its
/// return type; storage-class and `inline`/`_Noreturn` specifiers describe the function itself
/// and stay put.
fn return_type_specifiers(specifiers: &[Node<DeclarationSpecifier>]) -> Vec<Node<DeclarationSpecifier>> {
	specifiers
		.iter()
		.filter(|s| matches!(s.node, DeclarationSpecifier::TypeSpecifier(_) | DeclarationSpecifier::TypeQualifier(_)))
		.cloned()
		.collect()
}

fn make_void_return(specifiers: &mut Vec<Node<DeclarationSpecifier>>) {
	let mut replaced = false;
	let mut rewritten = Vec::with_capacity(specifiers.len());

	for spec in specifiers.drain(..) {
		match &spec.node {
			DeclarationSpecifier::TypeSpecifier(_) if !replaced => {
				rewritten.push(ast_build::node(DeclarationSpecifier::TypeSpecifier(ast_build::node(
					lang_c::ast::TypeSpecifier::Void,
				))));
				replaced = true;
			},
			DeclarationSpecifier::TypeSpecifier(_) => {},
			_ => rewritten.push(spec),
		}
	}

	if !replaced {
		rewritten.push(ast_build::node(DeclarationSpecifier::TypeSpecifier(ast_build::node(
			lang_c::ast::TypeSpecifier::Void,
		))));
	}

	*specifiers = rewritten;
}

fn rewrite_returns_in_items(items: &mut Vec<Node<lang_c::ast::BlockItem>>) {
	let mut i = 0;
	while i < items.len() {
		let is_direct_return = matches!(
			&items[i].node,
			lang_c::ast::BlockItem::Statement(s) if matches!(s.node, Statement::Return(Some(_)))
		);

		if is_direct_return {
			if let lang_c::ast::BlockItem::Statement(s) = &items[i].node {
				if let Statement::Return(Some(expr)) = &s.node {
					let assign_item = stmt_item(expr_stmt(assign(
						indirection(ast_build::ident_expr(RETVAL_PARAM)),
						(**expr).clone(),
					)));
					let bare_return = stmt_item(return_stmt(None));
					items.splice(i..=i, [assign_item, bare_return]);
					i += 2;
					continue;
				}
			}
		} else if let lang_c::ast::BlockItem::Statement(s) = &mut items[i].node {
			rewrite_returns_in_statement(&mut s.node);
		}

		i += 1;
	}
}

fn rewrite_returns_in_statement(stmt: &mut Statement) {
	match stmt {
		Statement::Compound(items) => rewrite_returns_in_items(items),
		Statement::If(if_stmt) => {
			rewrite_single_statement(&mut if_stmt.node.then_statement.node);
			if let Some(else_stmt) = &mut if_stmt.node.else_statement {
				rewrite_single_statement(&mut else_stmt.node);
			}
		},
		Statement::While(w) => rewrite_single_statement(&mut w.node.statement.node),
		Statement::DoWhile(d) => rewrite_single_statement(&mut d.node.statement.node),
		Statement::For(f) => rewrite_single_statement(&mut f.node.statement.node),
		Statement::Switch(s) => rewrite_single_statement(&mut s.node.statement.node),
		Statement::Labeled(l) => rewrite_single_statement(&mut l.node.statement.node),
		_ => {},
	}
}

/// Rewrite a single-statement control-flow body (the non-compound branch of an `if`/`while`/…).
/// A bare `return E;` here has no sibling list to splice into, so it is wrapped in a synthetic
/// compound containing the assignment and the trailing bare `return;`.
fn rewrite_single_statement(stmt: &mut Statement) {
	if let Statement::Return(Some(expr)) = stmt {
		let assign_stmt =
			expr_stmt(assign(indirection(ast_build::ident_expr(RETVAL_PARAM)), (**expr).clone()));
		let bare_return = return_stmt(None);
		*stmt = Statement::Compound(vec![stmt_item(assign_stmt), stmt_item(bare_return)]);
	} else {
		rewrite_returns_in_statement(stmt);
	}
}

#[cfg(test)]
mod tests {
	use lang_c::ast::ExternalDeclaration;
	use lang_c::driver::{parse_preprocessed, Config};

	use super::*;
	use crate::printer::print_translation_unit;

	fn parse_one_function(src: &str) -> FunctionDefinition {
		let cfg = Config::default();
		let unit = parse_preprocessed(&cfg, src.to_string()).unwrap().unit;
		for ext in unit.0 {
			if let ExternalDeclaration::FunctionDefinition(def) = ext.node {
				return def.node;
			}
		}
		panic!("fixture did not contain a function definition");
	}

	#[test]
	fn adds_retval_parameter_and_voids_return_type() {
		let mut def = parse_one_function("int fun(int x) { return x; }\n");
		let original_return = rewrite_definition(&mut def, "test.c").unwrap();
		assert_eq!(original_return.len(), 1);

		assert!(def.specifiers.iter().any(|s| matches!(
			s.node,
			DeclarationSpecifier::TypeSpecifier(ref t) if t.node == lang_c::ast::TypeSpecifier::Void
		)));

		let mut out = String::new();
		let unit = lang_c::ast::TranslationUnit(vec![ast_build::node(
			ExternalDeclaration::FunctionDefinition(ast_build::node(def)),
		)]);
		out.push_str(&print_translation_unit(&unit, "test.c").unwrap());

		assert!(out.contains("*retval = x"));
		assert!(out.contains("retval"));
	}

	#[test]
	fn rewrites_return_inside_if_branch() {
		let mut def = parse_one_function("int fun(int x) { if (x) return 1; return 0; }\n");
		rewrite_definition(&mut def, "test.c").unwrap();

		let unit = lang_c::ast::TranslationUnit(vec![ast_build::node(
			ExternalDeclaration::FunctionDefinition(ast_build::node(def)),
		)]);
		let out = print_translation_unit(&unit, "test.c").unwrap();

		assert!(out.contains("*retval = 1"));
		assert!(out.contains("*retval = 0"));
	}
}
