use std::fmt;

use crate::values::{Kind, Value};

/// Runtime failures are fatal: the first one aborts the run. Each variant
/// classifies as a name/resolution error or a type error via [`RuntimeError::kind`].
#[derive(Debug, Clone)]
pub enum RuntimeError {
    UndefinedVariable(String),
    /// A bare name that is neither a variable nor a function.
    UndefinedName(String),
    UndefinedFunction { name: String, arity: usize },
    /// A bare reference to an overloaded function name: without a call there
    /// is no arity to disambiguate with.
    AmbiguousFunction(String),
    UndefinedProperty(String),
    UndefinedMethod(String),
    NoPrototype(String),
    WrongArgumentCount { name: String, expected: usize, found: usize },
    BuiltinArity { name: &'static str },
    NotAnObject(String),
    CallNonClosure { name: String, kind: Kind },
    MethodNotCallable { method: String, kind: Kind },
    ProtoNotObject(Kind),
    IncompatibleTypes { op: String, left: Kind, right: Kind },
    UnsupportedOperator { op: String, kind: Kind },
    ConditionNotBool { construct: &'static str, kind: Kind },
    UnaryTypeMismatch { op: String, kind: Kind },
    Unprintable(Kind),
    InputNotInt(String),
    DivisionByZero,
    /// Internal unwinding channel for `return`; caught at every call
    /// boundary and never surfaced to the host.
    Return(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Name,
    Type,
}

impl RuntimeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::UndefinedVariable(_)
            | RuntimeError::UndefinedName(_)
            | RuntimeError::UndefinedFunction { .. }
            | RuntimeError::AmbiguousFunction(_)
            | RuntimeError::UndefinedProperty(_)
            | RuntimeError::UndefinedMethod(_)
            | RuntimeError::NoPrototype(_)
            | RuntimeError::WrongArgumentCount { .. }
            | RuntimeError::BuiltinArity { .. } => ErrorKind::Name,
            _ => ErrorKind::Type,
        }
    }
}

impl ErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Name => "name",
            ErrorKind::Type => "type",
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::UndefinedVariable(name) => {
                write!(f, "undefined variable '{}'", name)
            }
            RuntimeError::UndefinedName(name) => {
                write!(f, "'{}' is neither a variable nor a function", name)
            }
            RuntimeError::UndefinedFunction { name, arity } => {
                write!(f, "no function '{}' taking {} argument(s)", name, arity)
            }
            RuntimeError::AmbiguousFunction(name) => {
                write!(f, "function '{}' has multiple overloads", name)
            }
            RuntimeError::UndefinedProperty(name) => {
                write!(f, "undefined property '{}'", name)
            }
            RuntimeError::UndefinedMethod(name) => {
                write!(f, "undefined method '{}'", name)
            }
            RuntimeError::NoPrototype(name) => {
                write!(f, "'{}' has no prototype", name)
            }
            RuntimeError::WrongArgumentCount { name, expected, found } => {
                write!(
                    f,
                    "'{}' expects {} argument(s), got {}",
                    name, expected, found
                )
            }
            RuntimeError::BuiltinArity { name } => {
                write!(f, "'{}' takes at most one argument", name)
            }
            RuntimeError::NotAnObject(name) => {
                write!(f, "'{}' is not an object", name)
            }
            RuntimeError::CallNonClosure { name, kind } => {
                write!(f, "cannot call '{}': it holds a {} value", name, kind)
            }
            RuntimeError::MethodNotCallable { method, kind } => {
                write!(f, "'{}' resolves to a {} value, not a closure", method, kind)
            }
            RuntimeError::ProtoNotObject(kind) => {
                write!(f, "prototype must be an object, got {}", kind)
            }
            RuntimeError::IncompatibleTypes { op, left, right } => {
                write!(f, "incompatible types for '{}': {} and {}", op, left, right)
            }
            RuntimeError::UnsupportedOperator { op, kind } => {
                write!(f, "operator '{}' is not defined for {}", op, kind)
            }
            RuntimeError::ConditionNotBool { construct, kind } => {
                write!(f, "{} condition must be int or bool, got {}", construct, kind)
            }
            RuntimeError::UnaryTypeMismatch { op, kind } => {
                write!(f, "operator '{}' is not defined for {}", op, kind)
            }
            RuntimeError::Unprintable(kind) => {
                write!(f, "{} values have no printable form", kind)
            }
            RuntimeError::InputNotInt(text) => {
                write!(f, "inputi read a non-integer line: '{}'", text)
            }
            RuntimeError::DivisionByZero => write!(f, "division by zero"),
            RuntimeError::Return(val) => {
                write!(f, "internal: unhandled return of {}", val)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
