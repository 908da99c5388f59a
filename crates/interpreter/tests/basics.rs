use brewin_interpreter::{BufferConsole, ErrorKind, Interpreter, RuntimeError};
use brewin_lexer::Lexer;
use brewin_parser::Parser;

fn run(src: &str) -> (Result<(), RuntimeError>, String) {
    let tokens = Lexer::new(src).scan_tokens().expect("lex error");
    let (program, diags) = Parser::new(tokens).parse();
    assert!(diags.is_empty(), "parse diagnostics: {:?}", diags);
    let console = BufferConsole::new();
    let sink = console.sink();
    let mut interp = Interpreter::new(Box::new(console));
    let result = interp.interpret(&program);
    let output = sink.borrow().clone();
    (result, output)
}

fn run_ok(src: &str) -> String {
    let (result, output) = run(src);
    assert!(result.is_ok(), "runtime error: {:?}", result);
    output
}

#[test]
fn division_truncates_toward_negative_infinity() {
    let output = run_ok("func main() { x = 10 / 4; print(x); print(-7 / 2); }");
    assert_eq!(output, "2\n-4\n");
}

#[test]
fn first_assignment_declares_the_variable() {
    let output = run_ok("func main() { x = 41; x = x + 1; print(x); }");
    assert_eq!(output, "42\n");
}

#[test]
fn assignment_copies_primitive_values() {
    let output = run_ok("func main() { x = 1; y = x; x = 2; print(y); }");
    assert_eq!(output, "1\n");
}

#[test]
fn reassignment_can_change_the_kind() {
    let output = run_ok("func main() { x = 1; x = \"now a string\"; print(x); }");
    assert_eq!(output, "now a string\n");
}

#[test]
fn if_else_branches() {
    let output = run_ok(
        "func main() {
            if (1 < 2) { print(\"then\"); } else { print(\"else\"); }
            if (false) { print(\"no\"); } else { print(\"yes\"); }
        }",
    );
    assert_eq!(output, "then\nyes\n");
}

#[test]
fn int_condition_coerces_to_bool() {
    let output = run_ok(
        "func main() {
            if (3) { print(\"nonzero\"); }
            if (0) { print(\"zero\"); } else { print(\"not taken\"); }
        }",
    );
    assert_eq!(output, "nonzero\nnot taken\n");
}

#[test]
fn while_reevaluates_its_condition() {
    let output = run_ok(
        "func main() {
            n = 3;
            while (n > 0) { print(n); n = n - 1; }
        }",
    );
    assert_eq!(output, "3\n2\n1\n");
}

#[test]
fn while_condition_may_be_int() {
    let output = run_ok(
        "func main() {
            n = 2;
            while (n) { print(n); n = n - 1; }
        }",
    );
    assert_eq!(output, "2\n1\n");
}

#[test]
fn logical_operators_evaluate_both_sides() {
    let output = run_ok(
        "func side(x) { print(x); return x; }
         func main() { b = side(0) || side(1); print(b); }",
    );
    // no short-circuit: both calls run before '||' applies
    assert_eq!(output, "0\n1\ntrue\n");
}

#[test]
fn string_concatenation() {
    let output = run_ok("func main() { s = \"foo\" + \"bar\"; print(s); }");
    assert_eq!(output, "foobar\n");
}

#[test]
fn unary_negation_and_not() {
    let output = run_ok("func main() { print(-(2 + 3)); print(!0); print(!true); }");
    assert_eq!(output, "-5\ntrue\nfalse\n");
}

#[test]
fn blocks_do_not_leak_assignments_made_outside() {
    // 'set' walks outward, so the loop body updates main's variable
    let output = run_ok(
        "func main() {
            total = 0;
            i = 0;
            while (i < 3) { total = total + i; i = i + 1; }
            print(total);
        }",
    );
    assert_eq!(output, "3\n");
}

#[test]
fn string_condition_is_a_type_error() {
    let (result, _) = run("func main() { if (\"x\") { print(1); } }");
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn nil_condition_is_a_type_error() {
    let (result, _) = run("func main() { while (nil) { print(1); } }");
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Type);
}

#[test]
fn program_without_main_is_a_name_error() {
    let (result, _) = run("func helper() { return 1; }");
    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Name);
    assert!(err.to_string().contains("main"));
}
