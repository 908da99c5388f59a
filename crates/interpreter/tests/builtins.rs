use brewin_interpreter::{BufferConsole, ErrorKind, Interpreter, RuntimeError};
use brewin_lexer::Lexer;
use brewin_parser::Parser;

fn run_with_input(src: &str, input: &[&str]) -> (Result<(), RuntimeError>, String) {
    let tokens = Lexer::new(src).scan_tokens().expect("lex error");
    let (program, diags) = Parser::new(tokens).parse();
    assert!(diags.is_empty(), "parse diagnostics: {:?}", diags);
    let console = BufferConsole::with_input(input.iter().copied());
    let sink = console.sink();
    let mut interp = Interpreter::new(Box::new(console));
    let result = interp.interpret(&program);
    let output = sink.borrow().clone();
    (result, output)
}

fn run(src: &str) -> (Result<(), RuntimeError>, String) {
    run_with_input(src, &[])
}

#[test]
fn print_concatenates_printable_forms() {
    let (result, output) = run("func main() { print(\"a\", 1, true, false); }");
    assert!(result.is_ok());
    assert_eq!(output, "a1truefalse\n");
}

#[test]
fn print_with_no_arguments_emits_an_empty_line() {
    let (result, output) = run("func main() { print(); }");
    assert!(result.is_ok());
    assert_eq!(output, "\n");
}

#[test]
fn print_returns_nil() {
    let (result, output) = run("func main() { r = print(\"x\"); print(r == nil); }");
    assert!(result.is_ok());
    assert_eq!(output, "x\ntrue\n");
}

#[test]
fn printing_an_object_is_a_type_error() {
    let (result, _) = run("func main() { o = @; print(o); }");
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Type);
}

#[test]
fn printing_a_closure_is_a_type_error() {
    let (result, _) = run("func main() { print(lambda() { return 1; }); }");
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Type);
}

#[test]
fn printing_nil_is_a_type_error() {
    let (result, _) = run("func main() { print(nil); }");
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Type);
}

#[test]
fn inputi_reads_an_integer() {
    let (result, output) = run_with_input(
        "func main() { n = inputi(); print(n + 1); }",
        &["41"],
    );
    assert!(result.is_ok(), "runtime error: {:?}", result);
    assert_eq!(output, "42\n");
}

#[test]
fn inputi_prints_its_prompt_first() {
    let (result, output) = run_with_input(
        "func main() { n = inputi(\"enter n:\"); print(n); }",
        &["7"],
    );
    assert!(result.is_ok());
    assert_eq!(output, "enter n:\n7\n");
}

#[test]
fn inputs_reads_a_string() {
    let (result, output) = run_with_input(
        "func main() { s = inputs(\"name?\"); print(\"hi \" + s); }",
        &["ada"],
    );
    assert!(result.is_ok());
    assert_eq!(output, "name?\nhi ada\n");
}

#[test]
fn input_with_two_arguments_is_a_name_error() {
    let (result, _) = run_with_input("func main() { inputi(\"a\", \"b\"); }", &["1"]);
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Name);
}

#[test]
fn inputi_on_a_non_integer_line_is_a_type_error() {
    let (result, _) = run_with_input("func main() { n = inputi(); }", &["not a number"]);
    assert_eq!(result.unwrap_err().kind(), ErrorKind::Type);
}

#[test]
fn builtins_are_not_overridable() {
    // a user definition named `print` never shadows the builtin
    let (result, output) = run(
        "func print(x) { return 0; }
         func main() { print(\"builtin\"); }",
    );
    assert!(result.is_ok());
    assert_eq!(output, "builtin\n");
}

#[test]
fn scripted_input_lines_are_consumed_in_order() {
    let (result, output) = run_with_input(
        "func main() {
            a = inputi();
            b = inputi();
            print(a + b);
         }",
        &["40", "2"],
    );
    assert!(result.is_ok());
    assert_eq!(output, "42\n");
}
