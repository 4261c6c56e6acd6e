//! Decides which syntactically `inline` function definitions in a translation unit are
//! candidates for macroization.

use lang_c::ast::{
	BlockItem, DeclarationSpecifier, Declarator, DeclaratorKind, DerivedDeclarator, Ellipsis,
	Expression, FunctionDefinition, FunctionSpecifier, Statement,
};
use lang_c::span::Node;

/// Why a syntactically `inline` function was refused macroization. Not an [`crate::error::Error`]
/// — a refusal is a normal, expected outcome; the function is simply left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
	/// Not declared `inline` at all, so there is nothing to do
	NotInline,
	/// Contains a `goto` or a label, which cannot be linearized into a macro body
	ContainsJump,
	/// Calls itself; macro expansion of a recursive call would not terminate
	Recursive,
	/// Has a variadic (`...`) parameter list, which macro parameter lists cannot express
	Variadic,
}

impl std::fmt::Display for Refusal {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let msg = match self {
			Self::NotInline => "not declared inline",
			Self::ContainsJump => "contains a goto or a label",
			Self::Recursive => "calls itself",
			Self::Variadic => "has a variadic parameter list",
		};
		write!(f, "{}", msg)
	}
}

/// Decide whether `def` (whose declared name is `name`) qualifies for macroization.
pub fn classify(def: &FunctionDefinition, name: &str) -> Result<(), Refusal> {
	if !is_inline(def) {
		return Err(Refusal::NotInline);
	}
	if is_variadic(&def.declarator.node) {
		return Err(Refusal::Variadic);
	}
	if stmt_contains_jump(&def.statement.node) {
		return Err(Refusal::ContainsJump);
	}
	if stmt_calls_name(&def.statement.node, name) {
		return Err(Refusal::Recursive);
	}

	Ok(())
}

fn is_inline(def: &FunctionDefinition) -> bool {
	def.specifiers.iter().any(|spec| {
		matches!(&spec.node, DeclarationSpecifier::Function(f) if f.node == FunctionSpecifier::Inline)
	})
}

fn is_variadic(declarator: &Declarator) -> bool {
	declarator.derived.iter().any(|derived| match &derived.node {
		DerivedDeclarator::Function(func) => func.node.ellipsis == Ellipsis::Some,
		_ => false,
	})
}

/// Extract the plain name a declarator ultimately binds, unwrapping parenthesized declarators
/// (`(*f)(args)` style) down to the bare identifier.
pub fn declarator_name(declarator: &Declarator) -> Option<String> {
	match &declarator.kind.node {
		DeclaratorKind::Identifier(id) => Some(id.node.name.clone()),
		DeclaratorKind::Declarator(inner) => declarator_name(&inner.node),
		DeclaratorKind::Abstract => None,
	}
}

fn stmt_contains_jump(stmt: &Statement) -> bool {
	match stmt {
		Statement::Goto(_) | Statement::Labeled(_) => true,
		Statement::Compound(items) => items.iter().any(|item| match &item.node {
			BlockItem::Statement(s) => stmt_contains_jump(&s.node),
			_ => false,
		}),
		Statement::If(if_stmt) => {
			stmt_contains_jump(&if_stmt.node.then_statement.node)
				|| if_stmt
					.node
					.else_statement
					.as_ref()
					.is_some_and(|e| stmt_contains_jump(&e.node))
		},
		Statement::Switch(s) => stmt_contains_jump(&s.node.statement.node),
		Statement::While(s) => stmt_contains_jump(&s.node.statement.node),
		Statement::DoWhile(s) => stmt_contains_jump(&s.node.statement.node),
		Statement::For(s) => stmt_contains_jump(&s.node.statement.node),
		_ => false,
	}
}

fn stmt_calls_name(stmt: &Statement, name: &str) -> bool {
	match stmt {
		Statement::Compound(items) => items.iter().any(|item| match &item.node {
			BlockItem::Statement(s) => stmt_calls_name(&s.node, name),
			BlockItem::Declaration(d) => d.node.declarators.iter().any(|decl| {
				decl.node
					.initializer
					.as_ref()
					.is_some_and(|init| initializer_calls_name(&init.node, name))
			}),
			_ => false,
		}),
		Statement::Expression(Some(expr)) => expr_calls_name(&expr.node, name),
		Statement::If(s) => {
			expr_calls_name(&s.node.condition.node, name)
				|| stmt_calls_name(&s.node.then_statement.node, name)
				|| s.node.else_statement.as_ref().is_some_and(|e| stmt_calls_name(&e.node, name))
		},
		Statement::Switch(s) => {
			expr_calls_name(&s.node.expression.node, name) || stmt_calls_name(&s.node.statement.node, name)
		},
		Statement::While(s) => {
			expr_calls_name(&s.node.expression.node, name) || stmt_calls_name(&s.node.statement.node, name)
		},
		Statement::DoWhile(s) => {
			expr_calls_name(&s.node.expression.node, name) || stmt_calls_name(&s.node.statement.node, name)
		},
		Statement::For(s) => stmt_calls_name(&s.node.statement.node, name),
		Statement::Return(Some(expr)) => expr_calls_name(&expr.node, name),
		_ => false,
	}
}

fn initializer_calls_name(init: &lang_c::ast::Initializer, name: &str) -> bool {
	match init {
		lang_c::ast::Initializer::Expression(expr) => expr_calls_name(&expr.node, name),
		lang_c::ast::Initializer::List(items) => items.iter().any(|item| match &item.node.initializer.node {
			lang_c::ast::Initializer::Expression(expr) => expr_calls_name(&expr.node, name),
			lang_c::ast::Initializer::List(_) => false,
		}),
	}
}

fn expr_calls_name(expr: &Expression, name: &str) -> bool {
	match expr {
		Expression::Call(call) => {
			call_callee_name(&call.node.callee.node).as_deref() == Some(name)
				|| expr_calls_name(&call.node.callee.node, name)
				|| call.node.arguments.iter().any(|a| expr_calls_name(&a.node, name))
		},
		Expression::Member(m) => expr_calls_name(&m.node.expression.node, name),
		Expression::UnaryOperator(u) => expr_calls_name(&u.node.operand.node, name),
		Expression::BinaryOperator(b) => {
			expr_calls_name(&b.node.lhs.node, name) || expr_calls_name(&b.node.rhs.node, name)
		},
		_ => false,
	}
}

/// Resolve the plain callee name of a call expression, unwrapping the `f`, `(*f)`, and `s->f`
/// shapes a callee may take. A member-access callee (`s->f`) resolves to the member name, never
/// the struct name — this mirrors the fact that `f` shadows the macroized identifier regardless of
/// which struct it was pulled off of.
pub(crate) fn call_callee_name(callee: &Expression) -> Option<String> {
	match callee {
		Expression::Identifier(id) => Some(id.node.name.clone()),
		Expression::UnaryOperator(u) => call_callee_name(&u.node.operand.node),
		Expression::Member(m) => Some(m.node.identifier.node.name.clone()),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn refusal_messages_name_the_reason() {
		assert_eq!(Refusal::NotInline.to_string(), "not declared inline");
		assert_eq!(Refusal::ContainsJump.to_string(), "contains a goto or a label");
		assert_eq!(Refusal::Recursive.to_string(), "calls itself");
		assert_eq!(Refusal::Variadic.to_string(), "has a variadic parameter list");
	}
}
