use assert_cmd::Command;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_program(src: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(src.as_bytes()).expect("write program");
    file
}

fn brewin() -> Command {
    Command::cargo_bin("brewin").expect("binary builds")
}

#[test]
fn run_executes_main() {
    let file = write_program("func main() { x = 10 / 4; print(x); }");
    brewin()
        .arg("run")
        .arg(file.path())
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn run_reads_stdin_for_input_builtins() {
    let file = write_program("func main() { n = inputi(\"n?\"); print(n * 2); }");
    brewin()
        .arg("run")
        .arg(file.path())
        .write_stdin("21\n")
        .assert()
        .success()
        .stdout("n?\n42\n");
}

#[test]
fn parse_errors_render_diagnostics_and_exit_65() {
    let file = write_program("func main() { x = 1 }");
    let assert = brewin().arg("run").arg(file.path()).assert().failure().code(65);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("parse error"), "stderr: {}", stderr);
}

#[test]
fn runtime_errors_report_their_kind_and_exit_70() {
    let file = write_program("func main() { foo(); }");
    let assert = brewin().arg("run").arg(file.path()).assert().failure().code(70);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("name error"), "stderr: {}", stderr);
}

#[test]
fn type_errors_are_labelled_as_such() {
    let file = write_program("func main() { x = 1 + \"s\"; }");
    let assert = brewin().arg("run").arg(file.path()).assert().failure().code(70);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("type error"), "stderr: {}", stderr);
}

#[test]
fn missing_file_exits_74() {
    brewin()
        .arg("run")
        .arg("definitely/not/here.br")
        .assert()
        .failure()
        .code(74);
}

#[test]
fn ast_json_dump_lists_functions() {
    let file = write_program("func main() { print(1); }");
    let assert = brewin()
        .arg("ast")
        .arg(file.path())
        .arg("--json")
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("\"main\""), "stdout: {}", stdout);
    assert!(stdout.contains("functions"), "stdout: {}", stdout);
}
