pub mod console;
pub mod environment;
pub mod errors;
pub mod functions;
pub mod interpreter;
pub mod object;
pub mod operators;
pub mod values;

pub use console::{BufferConsole, Console, StdConsole};
pub use errors::{ErrorKind, Result, RuntimeError};
pub use interpreter::Interpreter;
pub use values::{Kind, Value};

use brewin_core::ast::Program;
use brewin_diagnostics::Diagnostic;

/// Everything that can stop a run: front-end diagnostics, or the first
/// runtime error.
#[derive(Debug)]
pub enum Error {
    Compile(Vec<Diagnostic>),
    Runtime(RuntimeError),
}

/// Source text to AST, or the collected front-end diagnostics.
pub fn parse(source: &str) -> std::result::Result<Program, Vec<Diagnostic>> {
    let tokens = brewin_lexer::Lexer::new(source)
        .scan_tokens()
        .map_err(|d| vec![d])?;
    let (program, diagnostics) = brewin_parser::Parser::new(tokens).parse();
    if !diagnostics.is_empty() {
        return Err(diagnostics);
    }
    Ok(program)
}

/// Parses and executes a whole program against the given console.
pub fn run(source: &str, console: Box<dyn Console>) -> std::result::Result<(), Error> {
    let program = parse(source).map_err(Error::Compile)?;
    Interpreter::new(console)
        .interpret(&program)
        .map_err(Error::Runtime)
}
