//! Rewrites call sites of macroized non-void functions. Two passes run over every function body
//! in the translation unit, whether or not that function is itself a macroization candidate:
//!
//! 1. **Declaration split** — `T x = E;` becomes `T x;` hoisted to the top of its enclosing
//!    compound, plus `x = E;` left in place, so a call-with-result always sits inside a statement
//!    this pass controls rather than tangled inside a declarator.
//! 2. **Comma lowering** — every remaining call of a rewritten function is replaced by
//!    `(f(&dst, args…), dst)`, where `dst` is the assignment's left-hand side when the call is the
//!    entire right-hand side of an assignment, or a fresh temporary hoisted to the top of the
//!    enclosing function body otherwise.

use std::collections::HashMap;

use lang_c::ast::*;
use lang_c::span::Node;

use crate::ast_build::{address_of, assign, comma, decl_item, expr_stmt, ident_expr, plain_declaration, simple_declarator, stmt_item};
use crate::classify::{call_callee_name, declarator_name};
use crate::error::RewriteError;
use crate::rename::NamePool;
use crate::rewrite::ShadowSet;

/// What the caller rewriter needs to know about a function that was rewritten to the
/// out-parameter convention: its return type, to type a hoisted temporary.
#[derive(Debug, Clone)]
pub struct RewrittenFunction {
	pub return_specifiers: Vec<Node<DeclarationSpecifier>>,
}

/// Functions rewritten so far, keyed by name
pub type RewrittenFunctions = HashMap<String, RewrittenFunction>;

/// Rewrite every caller inside `def`'s body.
pub fn rewrite_callers(
	def: &mut FunctionDefinition,
	rewritten: &RewrittenFunctions,
	pool: &mut NamePool,
	src_file: &str,
) -> Result<(), RewriteError> {
	let mut shadow = ShadowSet::new();
	for derived in &def.declarator.node.derived {
		if let DerivedDeclarator::Function(func) = &derived.node {
			for param in &func.node.parameters {
				if let Some(d) = &param.node.declarator {
					if let Some(name) = declarator_name(&d.node) {
						shadow.bind(&name);
					}
				}
			}
		}
	}

	split_decls_in_statement(&mut def.statement.node);

	let mut hoisted: Vec<Node<BlockItem>> = Vec::new();
	rewrite_calls_in_statement(&mut def.statement.node, rewritten, pool, &mut shadow, &mut hoisted, src_file)?;

	if !hoisted.is_empty() {
		if let Statement::Compound(items) = &mut def.statement.node {
			hoisted.append(items);
			*items = hoisted;
		}
	}

	Ok(())
}

// ---------------------------------------------------------------------------------------------
// Phase 1: declaration split
// ---------------------------------------------------------------------------------------------

fn split_decls_in_statement(stmt: &mut Statement) {
	match stmt {
		Statement::Compound(items) => split_decls_in_items(items),
		Statement::If(if_stmt) => {
			split_decls_in_statement(&mut if_stmt.node.then_statement.node);
			if let Some(e) = &mut if_stmt.node.else_statement {
				split_decls_in_statement(&mut e.node);
			}
		},
		Statement::While(w) => split_decls_in_statement(&mut w.node.statement.node),
		Statement::DoWhile(d) => split_decls_in_statement(&mut d.node.statement.node),
		Statement::For(f) => split_decls_in_statement(&mut f.node.statement.node),
		Statement::Switch(s) => split_decls_in_statement(&mut s.node.statement.node),
		Statement::Labeled(l) => split_decls_in_statement(&mut l.node.statement.node),
		_ => {},
	}
}

fn split_decls_in_items(items: &mut Vec<Node<BlockItem>>) {
	let mut hoisted = Vec::new();
	let mut rest = Vec::new();

	for item in items.drain(..) {
		match item.node {
			BlockItem::Declaration(decl) => {
				let Declaration { specifiers, declarators } = decl.node;
				for init_decl in declarators {
					let InitDeclarator { declarator, initializer } = init_decl.node;
					hoisted.push(decl_item(plain_declaration(specifiers.clone(), declarator.clone())));

					if let Some(init) = initializer {
						if let Initializer::Expression(expr) = init.node {
							let lhs = declarator_to_lvalue(&declarator.node);
							rest.push(stmt_item(expr_stmt(assign(lhs, *expr))));
						} else {
							// Aggregate initializers are left attached to the (now hoisted)
							// declaration; they contain no call-with-result to lower.
							let idx = hoisted.len() - 1;
							if let BlockItem::Declaration(d) = &mut hoisted[idx].node {
								if let Some(last) = d.node.declarators.last_mut() {
									last.node.initializer = Some(init);
								}
							}
						}
					}
				}
			},
			BlockItem::Statement(mut s) => {
				split_decls_in_statement(&mut s.node);
				rest.push(stmt_item(s.node));
			},
			other => rest.push(crate::ast_build::node(other)),
		}
	}

	hoisted.append(&mut rest);
	*items = hoisted;
}

fn declarator_to_lvalue(declarator: &Declarator) -> Node<Expression> {
	match &declarator.kind.node {
		DeclaratorKind::Identifier(id) => ident_expr(&id.node.name),
		_ => ident_expr("__cinline_unsupported_declarator"),
	}
}

// ---------------------------------------------------------------------------------------------
// Phase 2: comma lowering
// ---------------------------------------------------------------------------------------------

fn rewrite_calls_in_items(
	items: &mut [Node<BlockItem>],
	rewritten: &RewrittenFunctions,
	pool: &mut NamePool,
	shadow: &mut ShadowSet,
	hoist_target: &mut Vec<Node<BlockItem>>,
	src_file: &str,
) -> Result<(), RewriteError> {
	for item in items.iter_mut() {
		match &mut item.node {
			BlockItem::Declaration(decl) => {
				for d in &decl.node.declarators {
					if let Some(name) = declarator_name(&d.node.declarator.node) {
						shadow.bind(&name);
					}
				}
			},
			BlockItem::Statement(s) => {
				rewrite_calls_in_statement(&mut s.node, rewritten, pool, shadow, hoist_target, src_file)?;
			},
			BlockItem::StaticAssert(_) => {},
		}
	}
	Ok(())
}

fn rewrite_calls_in_statement(
	stmt: &mut Statement,
	rewritten: &RewrittenFunctions,
	pool: &mut NamePool,
	shadow: &mut ShadowSet,
	hoist_target: &mut Vec<Node<BlockItem>>,
	src_file: &str,
) -> Result<(), RewriteError> {
	match stmt {
		Statement::Compound(items) => {
			let mut nested = shadow.enter_scope();
			rewrite_calls_in_items(items, rewritten, pool, &mut nested, hoist_target, src_file)?;
		},
		Statement::Expression(Some(expr)) => {
			rewrite_expression_statement(expr, rewritten, pool, shadow, hoist_target, src_file)?;
		},
		Statement::If(if_stmt) => {
			lower_calls_in_expr(&mut if_stmt.node.condition, rewritten, pool, shadow, hoist_target, src_file)?;
			rewrite_calls_in_statement(&mut if_stmt.node.then_statement.node, rewritten, pool, shadow, hoist_target, src_file)?;
			if let Some(e) = &mut if_stmt.node.else_statement {
				rewrite_calls_in_statement(&mut e.node, rewritten, pool, shadow, hoist_target, src_file)?;
			}
		},
		Statement::While(w) => {
			lower_calls_in_expr(&mut w.node.expression, rewritten, pool, shadow, hoist_target, src_file)?;
			rewrite_calls_in_statement(&mut w.node.statement.node, rewritten, pool, shadow, hoist_target, src_file)?;
		},
		Statement::DoWhile(d) => {
			lower_calls_in_expr(&mut d.node.expression, rewritten, pool, shadow, hoist_target, src_file)?;
			rewrite_calls_in_statement(&mut d.node.statement.node, rewritten, pool, shadow, hoist_target, src_file)?;
		},
		Statement::For(f) => {
			if let Some(cond) = &mut f.node.condition {
				lower_calls_in_expr(cond, rewritten, pool, shadow, hoist_target, src_file)?;
			}
			if let Some(step) = &mut f.node.step {
				lower_calls_in_expr(step, rewritten, pool, shadow, hoist_target, src_file)?;
			}
			rewrite_calls_in_statement(&mut f.node.statement.node, rewritten, pool, shadow, hoist_target, src_file)?;
		},
		Statement::Switch(s) => {
			lower_calls_in_expr(&mut s.node.expression, rewritten, pool, shadow, hoist_target, src_file)?;
			rewrite_calls_in_statement(&mut s.node.statement.node, rewritten, pool, shadow, hoist_target, src_file)?;
		},
		Statement::Return(Some(expr)) => {
			lower_calls_in_expr(expr, rewritten, pool, shadow, hoist_target, src_file)?;
		},
		Statement::Labeled(l) => {
			rewrite_calls_in_statement(&mut l.node.statement.node, rewritten, pool, shadow, hoist_target, src_file)?;
		},
		_ => {},
	}

	Ok(())
}

/// Handles the `lv = f(args)` special case directly, so the rewritten expression is exactly
/// `(f(&lv, args), lv)` rather than first lowering into a fresh temporary and then assigning it
/// to `lv` redundantly.
fn rewrite_expression_statement(
	expr: &mut Node<Expression>,
	rewritten: &RewrittenFunctions,
	pool: &mut NamePool,
	shadow: &ShadowSet,
	hoist_target: &mut Vec<Node<BlockItem>>,
	src_file: &str,
) -> Result<(), RewriteError> {
	let direct_target = match &expr.node {
		Expression::BinaryOperator(bin) if bin.node.operator.node == BinaryOperator::Assign => {
			match &bin.node.rhs.node {
				Expression::Call(call) => call_callee_name(&call.node.callee.node)
					.filter(|name| rewritten.contains_key(name) && !shadow.contains(name)),
				_ => None,
			}
		},
		_ => None,
	};

	if direct_target.is_some() {
		let placeholder = comma(vec![]);
		let original = std::mem::replace(expr, placeholder);
		let (lhs, mut call_expr) = match original.node {
			Expression::BinaryOperator(bin) => (*bin.node.lhs, *bin.node.rhs),
			_ => unreachable!("direct_target only set for BinaryOperator assign nodes"),
		};

		if let Expression::Call(call) = &mut call_expr.node {
			for arg in call.node.arguments.iter_mut() {
				lower_calls_in_expr(arg, rewritten, pool, shadow, hoist_target, src_file)?;
			}
			let mut new_args = Vec::with_capacity(call.node.arguments.len() + 1);
			new_args.push(address_of(lhs.clone()));
			new_args.append(&mut call.node.arguments);
			call.node.arguments = new_args;
		}

		*expr = comma(vec![call_expr, lhs]);
		return Ok(());
	}

	lower_calls_in_expr(expr, rewritten, pool, shadow, hoist_target, src_file)
}

/// Recursively lower every qualifying call inside `expr`, replacing the innermost-first so a
/// fresh temporary's initializing call always executes before any outer expression reads it
/// (guaranteed by the comma operator's left-to-right evaluation order).
fn lower_calls_in_expr(
	expr: &mut Node<Expression>,
	rewritten: &RewrittenFunctions,
	pool: &mut NamePool,
	shadow: &ShadowSet,
	hoist_target: &mut Vec<Node<BlockItem>>,
	src_file: &str,
) -> Result<(), RewriteError> {
	match &mut expr.node {
		Expression::Call(call) => {
			for arg in call.node.arguments.iter_mut() {
				lower_calls_in_expr(arg, rewritten, pool, shadow, hoist_target, src_file)?;
			}
			lower_calls_in_expr(&mut call.node.callee, rewritten, pool, shadow, hoist_target, src_file)?;
		},
		Expression::BinaryOperator(b) => {
			lower_calls_in_expr(&mut b.node.lhs, rewritten, pool, shadow, hoist_target, src_file)?;
			lower_calls_in_expr(&mut b.node.rhs, rewritten, pool, shadow, hoist_target, src_file)?;
		},
		Expression::UnaryOperator(u) => {
			lower_calls_in_expr(&mut u.node.operand, rewritten, pool, shadow, hoist_target, src_file)?;
		},
		Expression::Member(m) => {
			lower_calls_in_expr(&mut m.node.expression, rewritten, pool, shadow, hoist_target, src_file)?;
		},
		Expression::Conditional(c) => {
			lower_calls_in_expr(&mut c.node.condition, rewritten, pool, shadow, hoist_target, src_file)?;
			lower_calls_in_expr(&mut c.node.then_expression, rewritten, pool, shadow, hoist_target, src_file)?;
			lower_calls_in_expr(&mut c.node.else_expression, rewritten, pool, shadow, hoist_target, src_file)?;
		},
		Expression::Comma(items) => {
			for item in items.iter_mut() {
				lower_calls_in_expr(item, rewritten, pool, shadow, hoist_target, src_file)?;
			}
		},
		Expression::Cast(c) => {
			lower_calls_in_expr(&mut c.node.expression, rewritten, pool, shadow, hoist_target, src_file)?;
		},
		_ => {},
	}

	let qualifying_name = match &expr.node {
		Expression::Call(call) => call_callee_name(&call.node.callee.node)
			.filter(|name| rewritten.contains_key(name) && !shadow.contains(name)),
		_ => None,
	};

	if let Some(name) = qualifying_name {
		let info = rewritten.get(&name).expect("checked by contains_key above");
		let tmp_name = pool.fresh(src_file)?;

		hoist_target.push(decl_item(plain_declaration(info.return_specifiers.clone(), simple_declarator(&tmp_name))));

		if let Expression::Call(call) = &mut expr.node {
			let mut new_args = Vec::with_capacity(call.node.arguments.len() + 1);
			new_args.push(address_of(ident_expr(&tmp_name)));
			new_args.append(&mut call.node.arguments);
			call.node.arguments = new_args;
		}

		let call_clone = expr.clone();
		*expr = comma(vec![call_clone, ident_expr(&tmp_name)]);
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use lang_c::driver::{parse_preprocessed, Config};

	use super::*;
	use crate::printer::print_translation_unit;

	fn parse_unit(src: &str) -> TranslationUnit {
		let cfg = Config::default();
		parse_preprocessed(&cfg, src.to_string()).unwrap().unit
	}

	fn int_return() -> RewrittenFunction {
		RewrittenFunction {
			return_specifiers: vec![crate::ast_build::node(DeclarationSpecifier::TypeSpecifier(
				crate::ast_build::node(TypeSpecifier::Int),
			))],
		}
	}

	fn find_fn_mut(unit: &mut TranslationUnit, name: &str) -> &mut FunctionDefinition {
		for ext in unit.0.iter_mut() {
			if let ExternalDeclaration::FunctionDefinition(def) = &mut ext.node {
				if declarator_name(&def.node.declarator.node).as_deref() == Some(name) {
					return &mut def.node;
				}
			}
		}
		panic!("no such function: {}", name);
	}

	#[test]
	fn rewrites_direct_assignment_call() {
		let mut unit = parse_unit("int caller(void) { int y; y = fun(5); return y; }\n");
		let mut rewritten = RewrittenFunctions::new();
		rewritten.insert("fun".to_string(), int_return());
		let mut pool = crate::rename::NamePool::new();

		rewrite_callers(find_fn_mut(&mut unit, "caller"), &rewritten, &mut pool, "test.c").unwrap();

		let printed = print_translation_unit(&unit, "test.c").unwrap();
		assert!(printed.contains("fun(&y, 5)"));
	}

	#[test]
	fn does_not_rewrite_shadowed_call() {
		let mut unit = parse_unit("int caller(int fun) { return fun; }\n");
		let mut rewritten = RewrittenFunctions::new();
		rewritten.insert("fun".to_string(), int_return());
		let mut pool = crate::rename::NamePool::new();

		rewrite_callers(find_fn_mut(&mut unit, "caller"), &rewritten, &mut pool, "test.c").unwrap();

		let printed = print_translation_unit(&unit, "test.c").unwrap();
		assert!(!printed.contains("&fun"));
	}

	#[test]
	fn splits_declaration_with_initializer() {
		let mut unit = parse_unit("int caller(void) { int r = fun(0); return r; }\n");
		let mut rewritten = RewrittenFunctions::new();
		rewritten.insert("fun".to_string(), int_return());
		let mut pool = crate::rename::NamePool::new();

		rewrite_callers(find_fn_mut(&mut unit, "caller"), &rewritten, &mut pool, "test.c").unwrap();

		let printed = print_translation_unit(&unit, "test.c").unwrap();
		assert!(printed.contains("int r;"));
		assert!(printed.contains("fun(&r, 0)"));
	}
}
