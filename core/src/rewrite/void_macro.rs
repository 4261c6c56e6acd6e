//! Turns a (by now void-returning) function definition into a `#define` macro: every renamable
//! parameter is α-renamed inside the body and given a local copy at the top, so the macro's own
//! formal parameters — which are raw, unevaluated token sequences once expanded — are read exactly
//! once regardless of how many times the body refers to them.

use lang_c::ast::*;
use lang_c::span::Node;

use crate::ast_build;
use crate::classify::declarator_name;
use crate::error::Error;
use crate::rename::NamePool;
use crate::rewrite::AliasTable;

/// Render `def` (declared as `name`) as `#define` macro text. `def` is consumed — the definition
/// itself is dropped from the translation unit by the caller once this returns.
pub fn macroize(def: &FunctionDefinition, name: &str, pool: &mut NamePool, src_file: &str) -> Result<String, Error> {
	let func = function_declarator(&def.declarator.node);

	let mut macro_params = Vec::new();
	let mut alias_decls: Vec<Node<BlockItem>> = Vec::new();
	let mut table = AliasTable::new();

	if let Some(func) = func {
		for param in &func.parameters {
			let Some(declarator) = &param.node.declarator else { continue };
			let Some(pname) = declarator_name(&declarator.node) else { continue };
			macro_params.push(pname.clone());

			if is_renamable(&declarator.node) {
				let alias = pool.fresh(src_file)?;
				table.register(&pname, &alias, false);

				let aliased = with_name(&declarator.node, &alias);
				let decl = ast_build::declaration_with_init(param.node.specifiers.clone(), aliased, ast_build::ident_expr(&pname));
				alias_decls.push(ast_build::decl_item(decl));
			} else {
				// Function-pointer and array parameters keep their own name throughout; a local
				// copy of either is either meaningless (arrays can't be copy-initialized this way)
				// or pointless (a function pointer is already cheap to re-read).
				table.register(&pname, &pname, false);
			}
		}
	}

	let mut body = def.statement.node.clone();
	rename_in_statement(&mut body, &table);

	let mut items = alias_decls;
	if let Statement::Compound(body_items) = body {
		items.extend(body_items);
	}

	let body_text = crate::printer::print_block_items(&items, src_file)?;
	Ok(render_macro(name, &macro_params, &body_text))
}

fn render_macro(name: &str, params: &[String], body_text: &str) -> String {
	let mut out = String::new();
	out.push_str(&format!("#define {}({}) \\\n", name, params.join(", ")));
	out.push_str("\tdo { \\\n");
	for line in body_text.lines() {
		out.push('\t');
		out.push('\t');
		out.push_str(line);
		out.push_str(" \\\n");
	}
	out.push_str("\t} while (0)\n");
	out
}

fn function_declarator(declarator: &Declarator) -> Option<&FunctionDeclarator> {
	declarator.derived.iter().find_map(|d| match &d.node {
		DerivedDeclarator::Function(func) => Some(&func.node),
		_ => None,
	})
}

/// A parameter qualifies for α-renaming unless its declarator is an array, a (possibly nested)
/// function declarator, or a parenthesized declarator — the shapes a function pointer takes.
fn is_renamable(declarator: &Declarator) -> bool {
	if matches!(declarator.kind.node, DeclaratorKind::Declarator(_)) {
		return false;
	}
	!declarator.derived.iter().any(|d| {
		matches!(d.node, DerivedDeclarator::Array(_) | DerivedDeclarator::Function(_) | DerivedDeclarator::KRFunction(_))
	})
}

fn with_name(declarator: &Declarator, alias: &str) -> Node<Declarator> {
	let mut cloned = declarator.clone();
	cloned.kind = ast_build::node(DeclaratorKind::Identifier(ast_build::ident(alias)));
	ast_build::node(cloned)
}

// -------------------------------------------------------------------------------------------
// Identifier renaming
// -------------------------------------------------------------------------------------------

fn rename_in_statement(stmt: &mut Statement, table: &AliasTable) {
	match stmt {
		Statement::Compound(items) => {
			let mut scoped = table.enter_scope();
			rename_in_items(items, &mut scoped);
		},
		Statement::Expression(Some(expr)) => rename_in_expr(&mut expr.node, table),
		Statement::If(if_stmt) => {
			rename_in_expr(&mut if_stmt.node.condition.node, table);
			rename_in_statement(&mut if_stmt.node.then_statement.node, table);
			if let Some(e) = &mut if_stmt.node.else_statement {
				rename_in_statement(&mut e.node, table);
			}
		},
		Statement::While(w) => {
			rename_in_expr(&mut w.node.expression.node, table);
			rename_in_statement(&mut w.node.statement.node, table);
		},
		Statement::DoWhile(d) => {
			rename_in_expr(&mut d.node.expression.node, table);
			rename_in_statement(&mut d.node.statement.node, table);
		},
		Statement::For(f) => {
			let mut scoped = table.enter_scope();
			match &mut f.node.initializer.node {
				ForInitializer::Declaration(d) => bind_declaration(&d.node, &mut scoped),
				ForInitializer::Expression(e) => rename_in_expr(&mut e.node, &scoped),
				_ => {},
			}
			if let Some(c) = &mut f.node.condition {
				rename_in_expr(&mut c.node, &scoped);
			}
			if let Some(s) = &mut f.node.step {
				rename_in_expr(&mut s.node, &scoped);
			}
			rename_in_statement(&mut f.node.statement.node, &scoped);
		},
		Statement::Switch(s) => {
			rename_in_expr(&mut s.node.expression.node, table);
			rename_in_statement(&mut s.node.statement.node, table);
		},
		Statement::Return(Some(e)) => rename_in_expr(&mut e.node, table),
		Statement::Labeled(l) => rename_in_statement(&mut l.node.statement.node, table),
		_ => {},
	}
}

fn rename_in_items(items: &mut Vec<Node<BlockItem>>, table: &mut AliasTable) {
	for item in items.iter_mut() {
		match &mut item.node {
			BlockItem::Declaration(decl) => {
				bind_declaration(&decl.node, table);
				for d in decl.node.declarators.iter_mut() {
					if let Some(init) = &mut d.node.initializer {
						rename_in_initializer(&mut init.node, table);
					}
				}
			},
			BlockItem::Statement(s) => rename_in_statement(&mut s.node, table),
			BlockItem::StaticAssert(_) => {},
		}
	}
}

/// A local declaration's own name is never rewritten. It is re-registered as its own alias so that
/// any parameter alias it shadows stops applying for the rest of this scope.
fn bind_declaration(decl: &Declaration, table: &mut AliasTable) {
	for d in &decl.declarators {
		if let Some(name) = declarator_name(&d.node.declarator.node) {
			table.register(&name, &name, true);
		}
	}
}

fn rename_in_initializer(init: &mut Initializer, table: &AliasTable) {
	match init {
		Initializer::Expression(e) => rename_in_expr(&mut e.node, table),
		Initializer::List(items) => {
			for item in items.iter_mut() {
				rename_in_initializer(&mut item.node.initializer.node, table);
			}
		},
	}
}

fn rename_in_expr(expr: &mut Expression, table: &AliasTable) {
	match expr {
		Expression::Identifier(id) => {
			if let Some(alias) = table.lookup(&id.node.name) {
				id.node.name = alias.to_string();
			}
		},
		Expression::Call(call) => {
			rename_in_expr(&mut call.node.callee.node, table);
			for arg in call.node.arguments.iter_mut() {
				rename_in_expr(&mut arg.node, table);
			}
		},
		// The member name itself is never an identifier reference; only the base expression is.
		Expression::Member(m) => rename_in_expr(&mut m.node.expression.node, table),
		Expression::UnaryOperator(u) => rename_in_expr(&mut u.node.operand.node, table),
		Expression::BinaryOperator(b) => {
			rename_in_expr(&mut b.node.lhs.node, table);
			rename_in_expr(&mut b.node.rhs.node, table);
		},
		Expression::Conditional(c) => {
			rename_in_expr(&mut c.node.condition.node, table);
			rename_in_expr(&mut c.node.then_expression.node, table);
			rename_in_expr(&mut c.node.else_expression.node, table);
		},
		Expression::Comma(items) => {
			for e in items.iter_mut() {
				rename_in_expr(&mut e.node, table);
			}
		},
		Expression::Cast(c) => rename_in_expr(&mut c.node.expression.node, table),
		_ => {},
	}
}

#[cfg(test)]
mod tests {
	use lang_c::ast::ExternalDeclaration;
	use lang_c::driver::{parse_preprocessed, Config};

	use super::*;

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
	fn macroizes_a_void_function_and_renames_its_parameter() {
		let def = parse_one_function("void fun(int x) { x = x + 1; }\n");
		let mut pool = NamePool::new();
		let text = macroize(&def, "fun", &mut pool, "test.c").unwrap();

		assert!(text.starts_with("#define fun(x) \\\n"));
		assert!(text.contains("do { \\\n"));
		assert!(text.contains("} while (0)"));
		assert!(text.contains(" = x;"), "expected a local copy initialized from the raw parameter: {text}");
		assert!(!text.contains("x = x + 1"), "body should reference the alias, not the raw parameter name");
	}

	#[test]
	fn does_not_rename_function_pointer_parameters() {
		let def = parse_one_function("void fun(void (*cb)(int)) { cb(1); }\n");
		let mut pool = NamePool::new();
		let text = macroize(&def, "fun", &mut pool, "test.c").unwrap();

		assert!(text.contains("cb(1)"));
		assert!(!text.contains(" = cb;"));
	}

	#[test]
	fn shadowed_parameter_is_left_unrenamed_inside_the_shadowing_scope() {
		let def = parse_one_function("void fun(int x) { { int x = 0; x = x + 1; } x = x + 2; }\n");
		let mut pool = NamePool::new();
		let text = macroize(&def, "fun", &mut pool, "test.c").unwrap();

		assert!(text.contains("x = x + 1"), "the shadowing inner x must not be renamed: {text}");
		assert!(!text.contains("x = x + 2"), "the outer x must still be renamed to its alias: {text}");
	}
}
