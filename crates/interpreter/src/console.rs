use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::BufRead;
use std::rc::Rc;

/// The interpreter's only window to the outside world: `print` and the
/// input builtins go through this, so tests and embedders can capture
/// output and script input.
pub trait Console {
    /// Emit one line of program output.
    fn output(&mut self, text: &str);

    /// Read one line of input, without the trailing newline. Exhausted
    /// input reads as the empty string.
    fn input(&mut self) -> String;
}

/// Stdout/stdin console used by the CLI.
#[derive(Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn output(&mut self, text: &str) {
        println!("{}", text);
    }

    fn input(&mut self) -> String {
        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line).is_err() {
            return String::new();
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        line
    }
}

/// Buffer-backed console for tests: scripted input lines in, captured
/// output out. The output buffer is shared so callers can keep a handle
/// while the console itself is owned by the interpreter.
pub struct BufferConsole {
    out: Rc<RefCell<String>>,
    inputs: VecDeque<String>,
}

impl BufferConsole {
    pub fn new() -> Self {
        BufferConsole {
            out: Rc::new(RefCell::new(String::new())),
            inputs: VecDeque::new(),
        }
    }

    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut console = Self::new();
        console.inputs = lines.into_iter().map(Into::into).collect();
        console
    }

    /// Shared handle to the captured output.
    pub fn sink(&self) -> Rc<RefCell<String>> {
        self.out.clone()
    }
}

impl Default for BufferConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for BufferConsole {
    fn output(&mut self, text: &str) {
        let mut out = self.out.borrow_mut();
        out.push_str(text);
        out.push('\n');
    }

    fn input(&mut self) -> String {
        self.inputs.pop_front().unwrap_or_default()
    }
}
