mod common;
use common::{rewrite, rewrite_with_header};

#[test]
fn macroizes_a_void_function() {
	let out = rewrite(
		"static inline void bump(int *p) { *p = *p + 1; }\n\
		 int main(void) { int x = 0; bump(&x); return x; }\n",
	);

	assert!(out.contains("#define bump(p)"), "{out}");
	assert!(!out.contains("void bump("), "original definition should be gone: {out}");
}

#[test]
fn rewrites_a_nonvoid_single_return_function_and_its_caller() {
	let out = rewrite(
		"static inline int square(int x) { return x * x; }\n\
		 int main(void) { int y = square(5); return y; }\n",
	);

	assert!(out.contains("#define square("), "{out}");
	assert!(out.contains("*retval = "), "{out}");
	assert!(out.contains("square(&y, 5)"), "{out}");
}

#[test]
fn lowers_nested_calls_to_rewritten_functions() {
	let out = rewrite(
		"static inline int inc(int x) { return x + 1; }\n\
		 int main(void) { int z; z = inc(inc(3)); return z; }\n",
	);

	let occurrences = out.matches("inc(&").count();
	assert!(occurrences >= 2, "expected both the inner and outer call rewritten: {out}");
}

#[test]
fn does_not_rewrite_a_call_through_a_shadowing_parameter() {
	let out = rewrite(
		"static inline int fun(int x) { return x; }\n\
		 typedef int (*fn_t)(int);\n\
		 int caller(fn_t fun) { return fun(2); }\n",
	);

	assert!(out.contains("#define fun("), "`fun` itself still qualifies: {out}");
	assert!(out.contains("fun(2)"), "the shadowed call site must be left alone: {out}");
	assert!(!out.contains("fun(&"), "{out}");
}

#[test]
fn refuses_to_macroize_a_function_containing_goto() {
	let out = rewrite(
		"static inline int risky(int x) { if (x) goto done; x = 1; done: return x; }\n\
		 int main(void) { return risky(5); }\n",
	);

	assert!(!out.contains("#define risky"), "{out}");
	assert!(out.contains("risky(int x)"), "the original definition must survive unchanged: {out}");
	assert!(out.contains("goto done"), "{out}");
	assert!(out.contains("risky(5)"), "the caller must be left alone since risky was refused: {out}");
}

#[test]
fn subtracts_declarations_already_contributed_by_an_included_header() {
	let out = rewrite_with_header(
		"#include \"header.h\"\n\
		 mylong value;\n\
		 int main(void) { return 0; }\n",
		"header.h",
		"typedef long mylong;\n",
	);

	assert!(out.contains("#include \"header.h\""), "{out}");
	assert!(out.contains("mylong value"), "{out}");
	assert_eq!(out.matches("typedef long mylong").count(), 0, "header-contributed typedef must not be duplicated: {out}");
}
