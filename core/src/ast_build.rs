//! Constructors for synthesized `lang_c` AST nodes. Every rewrite pass needs to fabricate nodes
//! that never came from the parser (a hoisted temporary's declaration, a rewritten `return`, the
//! `&tmp` argument prepended to a call); centralizing the boilerplate here keeps the rewrite
//! passes themselves readable.

use lang_c::ast::*;
use lang_c::span::{Node, Span};

/// Every synthesized node carries an empty span — it has no position in the original source.
pub fn node<T>(value: T) -> Node<T> { Node::new(value, Span::none()) }

pub fn ident(name: &str) -> Node<Identifier> { node(Identifier { name: name.to_string() }) }

pub fn ident_expr(name: &str) -> Node<Expression> { node(Expression::Identifier(ident(name))) }

pub fn address_of(expr: Node<Expression>) -> Node<Expression> {
	node(Expression::UnaryOperator(node(UnaryOperatorExpression {
		operator: node(UnaryOperator::Address),
		operand:  Box::new(expr),
	})))
}

pub fn call(callee: Node<Expression>, arguments: Vec<Node<Expression>>) -> Node<Expression> {
	node(Expression::Call(node(CallExpression { callee: Box::new(callee), arguments })))
}

pub fn assign(lhs: Node<Expression>, rhs: Node<Expression>) -> Node<Expression> {
	node(Expression::BinaryOperator(node(BinaryOperatorExpression {
		operator: node(BinaryOperator::Assign),
		lhs:      Box::new(lhs),
		rhs:      Box::new(rhs),
	})))
}

pub fn comma(exprs: Vec<Node<Expression>>) -> Node<Expression> { node(Expression::Comma(Box::new(exprs))) }

pub fn expr_stmt(expr: Node<Expression>) -> Node<Statement> { node(Statement::Expression(Some(Box::new(expr)))) }

pub fn return_stmt(expr: Option<Node<Expression>>) -> Node<Statement> {
	node(Statement::Return(expr.map(Box::new)))
}

/// A bare `type name;` declaration with no initializer, built from the same specifiers as an
/// existing declarator so the hoisted copy has an identical type.
pub fn plain_declaration(
	specifiers: Vec<Node<DeclarationSpecifier>>,
	declarator: Node<Declarator>,
) -> Node<Declaration> {
	node(Declaration {
		specifiers,
		declarators: vec![node(InitDeclarator { declarator, initializer: None })],
	})
}

/// A declarator binding a plain identifier with no derived pointer/array/function parts.
pub fn simple_declarator(name: &str) -> Node<Declarator> {
	node(Declarator { kind: node(DeclaratorKind::Identifier(ident(name))), derived: vec![], extensions: vec![] })
}

/// Wraps a single declaration as a `BlockItem`.
pub fn decl_item(decl: Node<Declaration>) -> Node<BlockItem> { node(BlockItem::Declaration(decl)) }

pub fn stmt_item(stmt: Node<Statement>) -> Node<BlockItem> { node(BlockItem::Statement(stmt)) }

/// A `type name = init;` declaration, used to emit a renamed parameter's local copy at the top of
/// a macroized body.
pub fn declaration_with_init(
	specifiers: Vec<Node<DeclarationSpecifier>>,
	declarator: Node<Declarator>,
	init: Node<Expression>,
) -> Node<Declaration> {
	node(Declaration {
		specifiers,
		declarators: vec![node(InitDeclarator {
			declarator,
			initializer: Some(node(Initializer::Expression(Box::new(init)))),
		})],
	})
}

/// A pointer declarator: `T *name`.
pub fn pointer_declarator(name: &str) -> Node<Declarator> {
	node(Declarator {
		kind:       node(DeclaratorKind::Identifier(ident(name))),
		derived:    vec![node(DerivedDeclarator::Pointer(vec![]))],
		extensions: vec![],
	})
}

pub fn indirection(expr: Node<Expression>) -> Node<Expression> {
	node(Expression::UnaryOperator(node(UnaryOperatorExpression {
		operator: node(UnaryOperator::Indirection),
		operand:  Box::new(expr),
	})))
}
