//! Renders a `lang_c` AST back to compilable C source. `lang-c` parses C but does not print it;
//! this module exists purely because no crate in reach of this one covers that half of the
//! Parser/Printer adapter. It covers exactly the grammar subset this pipeline itself produces and
//! consumes, falling back to [`ParseError::Unprintable`] for constructs that reach it unvisited.

use lang_c::ast::*;
use lang_c::span::Node;

use crate::error::ParseError;

/// Render a full translation unit back to C source text
pub fn print_translation_unit(unit: &TranslationUnit, src_file: &str) -> Result<String, ParseError> {
	let mut out = String::new();
	for ext in &unit.0 {
		print_external_declaration(&ext.node, &mut out, src_file)?;
		out.push('\n');
	}
	Ok(out)
}

fn print_external_declaration(
	ext: &ExternalDeclaration,
	out: &mut String,
	src_file: &str,
) -> Result<(), ParseError> {
	match ext {
		ExternalDeclaration::Declaration(decl) => {
			print_declaration(&decl.node, out, src_file)?;
			out.push_str(";\n");
		},
		ExternalDeclaration::FunctionDefinition(def) => {
			print_function_definition(&def.node, out, src_file)?;
		},
		ExternalDeclaration::StaticAssert(_) => {
			return Err(ParseError::Unprintable {
				src_file: src_file.to_string(),
				node:     "StaticAssert".to_string(),
			})
		},
	}
	Ok(())
}

fn print_function_definition(
	def: &FunctionDefinition,
	out: &mut String,
	src_file: &str,
) -> Result<(), ParseError> {
	print_specifiers(&def.specifiers, out);
	out.push(' ');
	print_declarator(&def.declarator.node, out, src_file)?;
	out.push(' ');
	print_statement(&def.statement.node, out, src_file, 0)?;
	out.push('\n');
	Ok(())
}

fn print_declaration(decl: &Declaration, out: &mut String, src_file: &str) -> Result<(), ParseError> {
	print_specifiers(&decl.specifiers, out);
	let mut first = true;
	for init_decl in &decl.declarators {
		if first {
			out.push(' ');
			first = false;
		} else {
			out.push_str(", ");
		}
		print_declarator(&init_decl.node.declarator.node, out, src_file)?;
		if let Some(init) = &init_decl.node.initializer {
			out.push_str(" = ");
			print_initializer(&init.node, out, src_file)?;
		}
	}
	Ok(())
}

fn print_initializer(init: &Initializer, out: &mut String, src_file: &str) -> Result<(), ParseError> {
	match init {
		Initializer::Expression(expr) => print_expression(&expr.node, out, src_file),
		Initializer::List(items) => {
			out.push('{');
			for (i, item) in items.iter().enumerate() {
				if i > 0 {
					out.push_str(", ");
				}
				print_initializer(&item.node.initializer.node, out, src_file)?;
			}
			out.push('}');
			Ok(())
		},
	}
}

fn print_specifiers(specifiers: &[Node<DeclarationSpecifier>], out: &mut String) {
	let parts: Vec<String> = specifiers.iter().map(|s| specifier_text(&s.node)).collect();
	out.push_str(&parts.join(" "));
}

fn specifier_text(spec: &DeclarationSpecifier) -> String {
	match spec {
		DeclarationSpecifier::StorageClass(s) => storage_class_text(&s.node).to_string(),
		DeclarationSpecifier::TypeSpecifier(t) => type_specifier_text(&t.node),
		DeclarationSpecifier::TypeQualifier(q) => type_qualifier_text(&q.node).to_string(),
		DeclarationSpecifier::Function(f) => function_specifier_text(&f.node).to_string(),
		DeclarationSpecifier::Alignment(_) => "_Alignas(/* unsupported */)".to_string(),
		DeclarationSpecifier::Extension(_) => String::new(),
	}
}

fn storage_class_text(s: &StorageClassSpecifier) -> &'static str {
	match s {
		StorageClassSpecifier::Typedef => "typedef",
		StorageClassSpecifier::Extern => "extern",
		StorageClassSpecifier::Static => "static",
		StorageClassSpecifier::ThreadLocal => "_Thread_local",
		StorageClassSpecifier::Auto => "auto",
		StorageClassSpecifier::Register => "register",
	}
}

fn type_qualifier_text(q: &TypeQualifier) -> &'static str {
	match q {
		TypeQualifier::Const => "const",
		TypeQualifier::Restrict => "restrict",
		TypeQualifier::Volatile => "volatile",
		TypeQualifier::Atomic => "_Atomic",
		TypeQualifier::Nonnull => "_Nonnull",
		TypeQualifier::Nullable => "_Nullable",
	}
}

fn function_specifier_text(f: &FunctionSpecifier) -> &'static str {
	match f {
		FunctionSpecifier::Inline => "inline",
		FunctionSpecifier::Noreturn => "_Noreturn",
	}
}

fn type_specifier_text(t: &TypeSpecifier) -> String {
	match t {
		TypeSpecifier::Void => "void".to_string(),
		TypeSpecifier::Char => "char".to_string(),
		TypeSpecifier::Short => "short".to_string(),
		TypeSpecifier::Int => "int".to_string(),
		TypeSpecifier::Long => "long".to_string(),
		TypeSpecifier::Float => "float".to_string(),
		TypeSpecifier::Double => "double".to_string(),
		TypeSpecifier::Signed => "signed".to_string(),
		TypeSpecifier::Unsigned => "unsigned".to_string(),
		TypeSpecifier::Bool => "_Bool".to_string(),
		TypeSpecifier::Complex => "_Complex".to_string(),
		TypeSpecifier::TypedefName(id) => id.node.name.clone(),
		TypeSpecifier::Struct(s) => struct_or_union_text(&s.node),
		TypeSpecifier::Enum(e) => enum_text(&e.node),
		_ => "/* unsupported type specifier */".to_string(),
	}
}

fn struct_or_union_text(s: &StructType) -> String {
	let kw = match s.kind.node {
		StructKind::Struct => "struct",
		StructKind::Union => "union",
	};
	let name = s.identifier.as_ref().map(|i| format!(" {}", i.node.name)).unwrap_or_default();
	match &s.declarations {
		Some(decls) => {
			let mut body = String::new();
			for d in decls {
				if let StructDeclaration::Field(field) = &d.node {
					print_struct_field(&field.node, &mut body);
				}
			}
			format!("{}{} {{\n{}}}", kw, name, body)
		},
		None => format!("{}{}", kw, name),
	}
}

fn print_struct_field(field: &StructField, out: &mut String) {
	print_specifiers_spec_qualifiers(&field.specifiers, out);
	let mut first = true;
	for declarator in &field.declarators {
		if first {
			out.push(' ');
			first = false;
		} else {
			out.push_str(", ");
		}
		if let Some(d) = &declarator.node.declarator {
			let mut decl_text = String::new();
			let _ = print_declarator(&d.node, &mut decl_text, "");
			out.push_str(&decl_text);
		}
	}
	out.push_str(";\n");
}

fn print_specifiers_spec_qualifiers(specifiers: &[Node<SpecifierQualifier>], out: &mut String) {
	let parts: Vec<String> = specifiers
		.iter()
		.map(|s| match &s.node {
			SpecifierQualifier::TypeSpecifier(t) => type_specifier_text(&t.node),
			SpecifierQualifier::TypeQualifier(q) => type_qualifier_text(&q.node).to_string(),
		})
		.collect();
	out.push_str(&parts.join(" "));
}

fn enum_text(e: &EnumType) -> String {
	let name = e.identifier.as_ref().map(|i| format!(" {}", i.node.name)).unwrap_or_default();
	if e.enumerators.is_empty() {
		format!("enum{}", name)
	} else {
		let variants: Vec<String> = e.enumerators.iter().map(|v| v.node.identifier.node.name.clone()).collect();
		format!("enum{} {{ {} }}", name, variants.join(", "))
	}
}

fn print_declarator(declarator: &Declarator, out: &mut String, src_file: &str) -> Result<(), ParseError> {
	for derived in declarator.derived.iter().rev() {
		if let DerivedDeclarator::Pointer(_) = &derived.node {
			out.push('*');
		}
	}

	match &declarator.kind.node {
		DeclaratorKind::Identifier(id) => out.push_str(&id.node.name),
		DeclaratorKind::Declarator(inner) => {
			out.push('(');
			print_declarator(&inner.node, out, src_file)?;
			out.push(')');
		},
		DeclaratorKind::Abstract => {},
	}

	for derived in &declarator.derived {
		match &derived.node {
			DerivedDeclarator::Pointer(_) => {},
			DerivedDeclarator::Array(arr) => {
				out.push('[');
				if let ArraySize::VariableExpression(expr) = &arr.node.size {
					print_expression(&expr.node, out, src_file)?;
				}
				out.push(']');
			},
			DerivedDeclarator::Function(func) => {
				out.push('(');
				let params: Result<Vec<String>, ParseError> = func
					.node
					.parameters
					.iter()
					.map(|p| {
						let mut s = String::new();
						print_specifiers(&p.node.specifiers, &mut s);
						if let Some(d) = &p.node.declarator {
							s.push(' ');
							print_declarator(&d.node, &mut s, src_file)?;
						}
						Ok(s)
					})
					.collect();
				let mut params = params?;
				if func.node.ellipsis == Ellipsis::Some {
					params.push("...".to_string());
				}
				if params.is_empty() {
					out.push_str("void");
				} else {
					out.push_str(&params.join(", "));
				}
				out.push(')');
			},
			DerivedDeclarator::KRFunction(idents) => {
				out.push('(');
				let names: Vec<String> = idents.iter().map(|i| i.node.name.clone()).collect();
				out.push_str(&names.join(", "));
				out.push(')');
			},
			DerivedDeclarator::Block(_) => {
				return Err(ParseError::Unprintable {
					src_file: src_file.to_string(),
					node:     "DerivedDeclarator::Block".to_string(),
				})
			},
		}
	}

	Ok(())
}

fn print_statement(stmt: &Statement, out: &mut String, src_file: &str, indent: usize) -> Result<(), ParseError> {
	let pad = "\t".repeat(indent);
	match stmt {
		Statement::Compound(items) => {
			out.push_str("{\n");
			for item in items {
				print_block_item(&item.node, out, src_file, indent + 1)?;
			}
			out.push_str(&pad);
			out.push('}');
		},
		Statement::Expression(expr) => {
			out.push_str(&pad);
			if let Some(e) = expr {
				print_expression(&e.node, out, src_file)?;
			}
			out.push(';');
		},
		Statement::If(if_stmt) => {
			out.push_str(&pad);
			out.push_str("if (");
			print_expression(&if_stmt.node.condition.node, out, src_file)?;
			out.push_str(") ");
			print_statement(&if_stmt.node.then_statement.node, out, src_file, indent)?;
			if let Some(else_stmt) = &if_stmt.node.else_statement {
				out.push_str(" else ");
				print_statement(&else_stmt.node, out, src_file, indent)?;
			}
		},
		Statement::While(w) => {
			out.push_str(&pad);
			out.push_str("while (");
			print_expression(&w.node.expression.node, out, src_file)?;
			out.push_str(") ");
			print_statement(&w.node.statement.node, out, src_file, indent)?;
		},
		Statement::DoWhile(d) => {
			out.push_str(&pad);
			out.push_str("do ");
			print_statement(&d.node.statement.node, out, src_file, indent)?;
			out.push_str(" while (");
			print_expression(&d.node.expression.node, out, src_file)?;
			out.push_str(");");
		},
		Statement::For(f) => {
			out.push_str(&pad);
			out.push_str("for (");
			match &f.node.initializer.node {
				ForInitializer::Empty => {},
				ForInitializer::Expression(e) => print_expression(&e.node, out, src_file)?,
				ForInitializer::Declaration(d) => print_declaration(&d.node, out, src_file)?,
				ForInitializer::StaticAssert(_) => {
					return Err(ParseError::Unprintable {
						src_file: src_file.to_string(),
						node:     "ForInitializer::StaticAssert".to_string(),
					})
				},
			}
			out.push_str("; ");
			if let Some(cond) = &f.node.condition {
				print_expression(&cond.node, out, src_file)?;
			}
			out.push_str("; ");
			if let Some(step) = &f.node.step {
				print_expression(&step.node, out, src_file)?;
			}
			out.push_str(") ");
			print_statement(&f.node.statement.node, out, src_file, indent)?;
		},
		Statement::Return(expr) => {
			out.push_str(&pad);
			out.push_str("return");
			if let Some(e) = expr {
				out.push(' ');
				print_expression(&e.node, out, src_file)?;
			}
			out.push(';');
		},
		Statement::Goto(label) => {
			out.push_str(&pad);
			out.push_str(&format!("goto {};", label.node.name));
		},
		Statement::Continue => {
			out.push_str(&pad);
			out.push_str("continue;");
		},
		Statement::Break => {
			out.push_str(&pad);
			out.push_str("break;");
		},
		Statement::Labeled(labeled) => {
			out.push_str(&pad);
			match &labeled.node.label.node {
				Label::Identifier(id) => out.push_str(&format!("{}:\n", id.node.name)),
				Label::Case(e) => {
					out.push_str("case ");
					print_expression(&e.node, out, src_file)?;
					out.push_str(":\n");
				},
				Label::Default => out.push_str("default:\n"),
			}
			print_statement(&labeled.node.statement.node, out, src_file, indent)?;
		},
		Statement::Switch(s) => {
			out.push_str(&pad);
			out.push_str("switch (");
			print_expression(&s.node.expression.node, out, src_file)?;
			out.push_str(") ");
			print_statement(&s.node.statement.node, out, src_file, indent)?;
		},
		_ => {
			return Err(ParseError::Unprintable {
				src_file: src_file.to_string(),
				node:     "Statement".to_string(),
			})
		},
	}
	out.push('\n');
	Ok(())
}

/// Render a compound statement's inner items with no enclosing braces, for embedding into a
/// macro body.
pub(crate) fn print_block_items(items: &[Node<BlockItem>], src_file: &str) -> Result<String, ParseError> {
	let mut out = String::new();
	for item in items {
		print_block_item(&item.node, &mut out, src_file, 0)?;
	}
	Ok(out)
}

fn print_block_item(item: &BlockItem, out: &mut String, src_file: &str, indent: usize) -> Result<(), ParseError> {
	let pad = "\t".repeat(indent);
	match item {
		BlockItem::Declaration(decl) => {
			out.push_str(&pad);
			print_declaration(&decl.node, out, src_file)?;
			out.push_str(";\n");
		},
		BlockItem::Statement(stmt) => {
			print_statement(&stmt.node, out, src_file, indent)?;
		},
		BlockItem::StaticAssert(_) => {
			return Err(ParseError::Unprintable {
				src_file: src_file.to_string(),
				node:     "StaticAssert".to_string(),
			})
		},
	}
	Ok(())
}

fn print_expression(expr: &Expression, out: &mut String, src_file: &str) -> Result<(), ParseError> {
	match expr {
		Expression::Identifier(id) => out.push_str(&id.node.name),
		Expression::Constant(c) => out.push_str(&constant_text(&c.node)),
		Expression::StringLiteral(s) => out.push_str(&s.node.join("")),
		Expression::Call(call) => {
			print_expression(&call.node.callee.node, out, src_file)?;
			out.push('(');
			for (i, arg) in call.node.arguments.iter().enumerate() {
				if i > 0 {
					out.push_str(", ");
				}
				print_expression(&arg.node, out, src_file)?;
			}
			out.push(')');
		},
		Expression::Member(m) => {
			print_expression(&m.node.expression.node, out, src_file)?;
			let op = match m.node.operator.node {
				MemberOperator::Direct => ".",
				MemberOperator::Indirect => "->",
			};
			out.push_str(op);
			out.push_str(&m.node.identifier.node.name);
		},
		Expression::UnaryOperator(u) => {
			let (prefix, postfix) = unary_operator_text(&u.node.operator.node);
			let operand_min_prec = match u.node.operator.node {
				UnaryOperator::PostIncrement | UnaryOperator::PostDecrement => PREC_ATOM,
				_ => PREC_UNARY,
			};
			out.push_str(prefix);
			print_child_expression(&u.node.operand.node, operand_min_prec, out, src_file)?;
			out.push_str(postfix);
		},
		Expression::BinaryOperator(b) => {
			let op = &b.node.operator.node;
			if *op == BinaryOperator::Index {
				print_child_expression(&b.node.lhs.node, PREC_ATOM, out, src_file)?;
				out.push('[');
				print_expression(&b.node.rhs.node, out, src_file)?;
				out.push(']');
			} else {
				let prec = binary_operator_precedence(op);
				let (lhs_min, rhs_min) =
					if is_assignment_operator(op) { (prec + 1, prec) } else { (prec, prec + 1) };
				print_child_expression(&b.node.lhs.node, lhs_min, out, src_file)?;
				out.push_str(&format!(" {} ", binary_operator_text(op)));
				print_child_expression(&b.node.rhs.node, rhs_min, out, src_file)?;
			}
		},
		Expression::Conditional(c) => {
			out.push('(');
			print_expression(&c.node.condition.node, out, src_file)?;
			out.push_str(" ? ");
			print_expression(&c.node.then_expression.node, out, src_file)?;
			out.push_str(" : ");
			print_expression(&c.node.else_expression.node, out, src_file)?;
			out.push(')');
		},
		Expression::Comma(exprs) => {
			out.push('(');
			for (i, e) in exprs.iter().enumerate() {
				if i > 0 {
					out.push_str(", ");
				}
				print_expression(&e.node, out, src_file)?;
			}
			out.push(')');
		},
		Expression::Cast(c) => {
			out.push('(');
			out.push('(');
			print_specifiers_type_name(&c.node.type_name.node, out, src_file)?;
			out.push_str(")");
			print_expression(&c.node.expression.node, out, src_file)?;
			out.push(')');
		},
		Expression::SizeOfVal(e) => {
			out.push_str("sizeof(");
			print_expression(&e.node.0.node, out, src_file)?;
			out.push(')');
		},
		Expression::SizeOfTy(t) => {
			out.push_str("sizeof(");
			print_specifiers_type_name(&t.node.0.node, out, src_file)?;
			out.push(')');
		},
		_ => {
			return Err(ParseError::Unprintable { src_file: src_file.to_string(), node: "Expression".to_string() })
		},
	}
	Ok(())
}

fn print_specifiers_type_name(type_name: &TypeName, out: &mut String, src_file: &str) -> Result<(), ParseError> {
	print_specifiers_spec_qualifiers(&type_name.specifiers, out);
	if let Some(d) = &type_name.declarator {
		out.push(' ');
		print_declarator(&d.node, out, src_file)?;
	}
	Ok(())
}

fn constant_text(c: &Constant) -> String {
	match c {
		Constant::Integer(i) => i.number.to_string(),
		Constant::Float(f) => f.number.to_string(),
		Constant::Character(s) => s.clone(),
	}
}

fn unary_operator_text(op: &UnaryOperator) -> (&'static str, &'static str) {
	match op {
		UnaryOperator::PostIncrement => ("", "++"),
		UnaryOperator::PostDecrement => ("", "--"),
		UnaryOperator::PreIncrement => ("++", ""),
		UnaryOperator::PreDecrement => ("--", ""),
		UnaryOperator::Address => ("&", ""),
		UnaryOperator::Indirection => ("*", ""),
		UnaryOperator::Plus => ("+", ""),
		UnaryOperator::Minus => ("-", ""),
		UnaryOperator::Complement => ("~", ""),
		UnaryOperator::Negate => ("!", ""),
		UnaryOperator::SizeOf => ("sizeof", ""),
	}
}

/// Precedence tier for atoms and postfix expressions (identifiers, calls, member access,
/// subscripting, and the handful of expression kinds that already delimit themselves with their
/// own parens/brackets). Larger numbers bind tighter.
const PREC_ATOM: u8 = 16;
const PREC_UNARY: u8 = 15;

/// Precedence of `expr` when it appears as the child of some other expression, used to decide
/// whether `print_child_expression` needs to wrap it in parens.
fn expr_precedence(expr: &Expression) -> u8 {
	match expr {
		Expression::Identifier(_)
		| Expression::Constant(_)
		| Expression::StringLiteral(_)
		| Expression::Call(_)
		| Expression::Member(_)
		| Expression::SizeOfVal(_)
		| Expression::SizeOfTy(_)
		| Expression::Conditional(_)
		| Expression::Comma(_)
		| Expression::Cast(_) => PREC_ATOM,
		Expression::UnaryOperator(u) => match u.node.operator.node {
			UnaryOperator::PostIncrement | UnaryOperator::PostDecrement => PREC_ATOM,
			_ => PREC_UNARY,
		},
		Expression::BinaryOperator(b) => match b.node.operator.node {
			BinaryOperator::Index => PREC_ATOM,
			ref op => binary_operator_precedence(op),
		},
		_ => 0,
	}
}

/// Print `expr` as the child of a unary/binary operator, wrapping it in parens only when its own
/// precedence is lower than what this position requires.
fn print_child_expression(
	expr: &Expression,
	min_prec: u8,
	out: &mut String,
	src_file: &str,
) -> Result<(), ParseError> {
	if expr_precedence(expr) < min_prec {
		out.push('(');
		print_expression(expr, out, src_file)?;
		out.push(')');
	} else {
		print_expression(expr, out, src_file)?;
	}
	Ok(())
}

fn is_assignment_operator(op: &BinaryOperator) -> bool {
	matches!(
		op,
		BinaryOperator::Assign
			| BinaryOperator::AssignMultiply
			| BinaryOperator::AssignDivide
			| BinaryOperator::AssignModulo
			| BinaryOperator::AssignPlus
			| BinaryOperator::AssignMinus
			| BinaryOperator::AssignShiftLeft
			| BinaryOperator::AssignShiftRight
			| BinaryOperator::AssignBitwiseAnd
			| BinaryOperator::AssignBitwiseXor
			| BinaryOperator::AssignBitwiseOr
	)
}

/// C operator precedence, left-to-right from loosest to tightest. Larger numbers bind tighter;
/// `Index` is handled separately by its caller and never reaches here through the generic path.
fn binary_operator_precedence(op: &BinaryOperator) -> u8 {
	match op {
		BinaryOperator::Index => PREC_ATOM,
		BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo => 13,
		BinaryOperator::Plus | BinaryOperator::Minus => 12,
		BinaryOperator::ShiftLeft | BinaryOperator::ShiftRight => 11,
		BinaryOperator::Less
		| BinaryOperator::Greater
		| BinaryOperator::LessOrEqual
		| BinaryOperator::GreaterOrEqual => 10,
		BinaryOperator::Equals | BinaryOperator::NotEquals => 9,
		BinaryOperator::BitwiseAnd => 8,
		BinaryOperator::BitwiseXor => 7,
		BinaryOperator::BitwiseOr => 6,
		BinaryOperator::LogicalAnd => 5,
		BinaryOperator::LogicalOr => 4,
		BinaryOperator::Assign
		| BinaryOperator::AssignMultiply
		| BinaryOperator::AssignDivide
		| BinaryOperator::AssignModulo
		| BinaryOperator::AssignPlus
		| BinaryOperator::AssignMinus
		| BinaryOperator::AssignShiftLeft
		| BinaryOperator::AssignShiftRight
		| BinaryOperator::AssignBitwiseAnd
		| BinaryOperator::AssignBitwiseXor
		| BinaryOperator::AssignBitwiseOr => 2,
	}
}

fn binary_operator_text(op: &BinaryOperator) -> &'static str {
	match op {
		BinaryOperator::Index => "[]",
		BinaryOperator::Multiply => "*",
		BinaryOperator::Divide => "/",
		BinaryOperator::Modulo => "%",
		BinaryOperator::Plus => "+",
		BinaryOperator::Minus => "-",
		BinaryOperator::ShiftLeft => "<<",
		BinaryOperator::ShiftRight => ">>",
		BinaryOperator::Less => "<",
		BinaryOperator::Greater => ">",
		BinaryOperator::LessOrEqual => "<=",
		BinaryOperator::GreaterOrEqual => ">=",
		BinaryOperator::Equals => "==",
		BinaryOperator::NotEquals => "!=",
		BinaryOperator::BitwiseAnd => "&",
		BinaryOperator::BitwiseXor => "^",
		BinaryOperator::BitwiseOr => "|",
		BinaryOperator::LogicalAnd => "&&",
		BinaryOperator::LogicalOr => "||",
		BinaryOperator::Assign => "=",
		BinaryOperator::AssignMultiply => "*=",
		BinaryOperator::AssignDivide => "/=",
		BinaryOperator::AssignModulo => "%=",
		BinaryOperator::AssignPlus => "+=",
		BinaryOperator::AssignMinus => "-=",
		BinaryOperator::AssignShiftLeft => "<<=",
		BinaryOperator::AssignShiftRight => ">>=",
		BinaryOperator::AssignBitwiseAnd => "&=",
		BinaryOperator::AssignBitwiseXor => "^=",
		BinaryOperator::AssignBitwiseOr => "|=",
	}
}

#[cfg(test)]
mod tests {
	use lang_c::driver::{parse_preprocessed, Config};

	use super::*;

	fn roundtrip(src: &str) -> String {
		let cfg = Config::default();
		let unit = parse_preprocessed(&cfg, src.to_string()).expect("test fixture must parse").unit;
		print_translation_unit(&unit, "test.c").expect("printer must cover test fixture grammar")
	}

	#[test]
	fn prints_a_trivial_function() {
		let printed = roundtrip("int f(void) { return 0; }\n");
		assert!(printed.contains("int f(void)"));
		assert!(printed.contains("return 0;"));
	}

	#[test]
	fn prints_a_define_untouched() {
		// #define is consumed by the preprocessor before this stage ever sees it; confirm a
		// plain declaration still prints.
		let printed = roundtrip("typedef long mylong;\n");
		assert!(printed.contains("typedef long mylong"));
	}
}
