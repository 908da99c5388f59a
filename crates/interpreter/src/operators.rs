use brewin_core::{Token, TokenType};
use std::rc::Rc;

use crate::errors::{Result, RuntimeError};
use crate::values::Value;

/// Binary operator evaluation over already-evaluated operands. Both sides
/// are always evaluated before this runs, so `&&`/`||` do not short-circuit.
pub fn binary(operator: &Token, left: Value, right: Value) -> Result<Value> {
    // objects admit identity comparison and nothing else
    if matches!(left, Value::Object(_)) || matches!(right, Value::Object(_)) {
        let same = match (&left, &right) {
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        };
        return match operator.token_type {
            TokenType::EqualEqual => Ok(Value::Bool(same)),
            TokenType::BangEqual => Ok(Value::Bool(!same)),
            _ => Err(RuntimeError::IncompatibleTypes {
                op: operator.lexeme.clone(),
                left: left.kind(),
                right: right.kind(),
            }),
        };
    }

    let (left, right) = promote(&operator.token_type, left, right);

    if matches!(
        operator.token_type,
        TokenType::EqualEqual | TokenType::BangEqual
    ) {
        let equal = values_equal(&left, &right);
        let result = if operator.token_type == TokenType::EqualEqual {
            equal
        } else {
            !equal
        };
        return Ok(Value::Bool(result));
    }

    if left.kind() != right.kind() {
        return Err(RuntimeError::IncompatibleTypes {
            op: operator.lexeme.clone(),
            left: left.kind(),
            right: right.kind(),
        });
    }
    apply(operator, left, right)
}

pub fn unary(operator: &Token, value: Value) -> Result<Value> {
    match operator.token_type {
        TokenType::Minus => match value {
            Value::Int(n) => Ok(Value::Int(-n)),
            other => Err(RuntimeError::UnaryTypeMismatch {
                op: operator.lexeme.clone(),
                kind: other.kind(),
            }),
        },
        TokenType::Bang => match int_to_bool(value) {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            other => Err(RuntimeError::UnaryTypeMismatch {
                op: operator.lexeme.clone(),
                kind: other.kind(),
            }),
        },
        _ => Err(RuntimeError::UnsupportedOperator {
            op: operator.lexeme.clone(),
            kind: value.kind(),
        }),
    }
}

/// Int/Bool promotion. For operators that exist on bools (`&&`, `||`, `==`,
/// `!=`), ints coerce to bool unless the operator also exists on ints and
/// both sides already are ints. For operators that exist on ints, any bool
/// coerces to int (true → 1, false → 0).
fn promote(op: &TokenType, left: Value, right: Value) -> (Value, Value) {
    let on_bools = matches!(
        op,
        TokenType::AndAnd | TokenType::OrOr | TokenType::EqualEqual | TokenType::BangEqual
    );
    let on_ints = matches!(
        op,
        TokenType::Plus
            | TokenType::Minus
            | TokenType::Star
            | TokenType::Slash
            | TokenType::EqualEqual
            | TokenType::BangEqual
            | TokenType::Less
            | TokenType::LessEqual
            | TokenType::Greater
            | TokenType::GreaterEqual
    );

    let mut left = left;
    let mut right = right;
    if on_bools {
        let both_int = matches!(left, Value::Int(_)) && matches!(right, Value::Int(_));
        if !(on_ints && both_int) {
            left = int_to_bool(left);
            right = int_to_bool(right);
        }
    }
    if on_ints {
        left = bool_to_int(left);
        right = bool_to_int(right);
    }
    (left, right)
}

fn int_to_bool(v: Value) -> Value {
    match v {
        Value::Int(n) => Value::Bool(n != 0),
        other => other,
    }
}

fn bool_to_int(v: Value) -> Value {
    match v {
        Value::Bool(b) => Value::Int(b as i64),
        other => other,
    }
}

/// Equality after promotion. Mismatched kinds compare unequal rather than
/// erroring; same-kind values compare by payload, closures by identity.
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Nil, Value::Nil) => true,
        (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}

fn apply(operator: &Token, left: Value, right: Value) -> Result<Value> {
    match (&operator.token_type, left, right) {
        (TokenType::Plus, Value::Int(a), Value::Int(b)) => Ok(Value::Int(a + b)),
        (TokenType::Minus, Value::Int(a), Value::Int(b)) => Ok(Value::Int(a - b)),
        (TokenType::Star, Value::Int(a), Value::Int(b)) => Ok(Value::Int(a * b)),
        (TokenType::Slash, Value::Int(_), Value::Int(0)) => Err(RuntimeError::DivisionByZero),
        (TokenType::Slash, Value::Int(a), Value::Int(b)) => Ok(Value::Int(floor_div(a, b))),
        (TokenType::Less, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a < b)),
        (TokenType::LessEqual, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a <= b)),
        (TokenType::Greater, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a > b)),
        (TokenType::GreaterEqual, Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a >= b)),
        (TokenType::Plus, Value::Str(a), Value::Str(b)) => {
            Ok(Value::Str(format!("{}{}", a, b).into()))
        }
        (TokenType::AndAnd, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(a && b)),
        (TokenType::OrOr, Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(a || b)),
        (_, left, _) => Err(RuntimeError::UnsupportedOperator {
            op: operator.lexeme.clone(),
            kind: left.kind(),
        }),
    }
}

/// Integer division truncates toward negative infinity.
fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b != 0 && (a < 0) != (b < 0) {
        q - 1
    } else {
        q
    }
}
