use brewin_core::ast::{
    AssignTarget, CallExpr, Expr, FunctionDef, LiteralValue, MethodCallExpr, Program, Stmt,
};
use brewin_core::{intern, Token};
use std::collections::HashMap;
use std::rc::Rc;

use crate::console::Console;
use crate::environment::{Environment, Scope};
use crate::errors::{Result, RuntimeError};
use crate::functions::FunctionTable;
use crate::object::{self, Object, ObjectRef};
use crate::operators;
use crate::values::{slot, Closure, Slot, Value};

pub struct Interpreter {
    env: Environment,
    functions: FunctionTable,
    console: Box<dyn Console>,
}

impl Interpreter {
    pub fn new(console: Box<dyn Console>) -> Self {
        Interpreter {
            env: Environment::new(),
            functions: FunctionTable::new(),
            console,
        }
    }

    /// Builds the function table, then executes the body of the
    /// zero-argument `main`.
    pub fn interpret(&mut self, program: &Program) -> Result<()> {
        self.functions = FunctionTable::build(program);
        self.env = Environment::new();
        let main = self.functions.lookup("main", 0).ok_or_else(|| {
            RuntimeError::UndefinedFunction { name: "main".to_string(), arity: 0 }
        })?;
        match self.run_statements(&main.def.body) {
            Ok(()) | Err(RuntimeError::Return(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Runs a statement list in its own scope. The scope is popped on every
    /// exit path: fallthrough, `return` unwinding and runtime errors alike.
    fn run_statements(&mut self, statements: &[Stmt]) -> Result<()> {
        self.env.push();
        let mut result = Ok(());
        for statement in statements {
            result = self.execute(statement);
            if result.is_err() {
                break;
            }
        }
        self.env.pop();
        result
    }

    fn execute(&mut self, statement: &Stmt) -> Result<()> {
        match statement {
            Stmt::Call(call) => {
                self.call_function(call)?;
                Ok(())
            }
            Stmt::MethodCall(mcall) => {
                self.call_method(mcall)?;
                Ok(())
            }
            Stmt::Assign { target, value } => self.assign(target, value),
            Stmt::Return { value, .. } => {
                let result = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                // unwinds through every enclosing statement list up to the
                // nearest call boundary
                Err(RuntimeError::Return(result))
            }
            Stmt::If { condition, then_body, else_body } => {
                if self.condition(condition, "if")? {
                    self.run_statements(then_body)
                } else if let Some(else_body) = else_body {
                    self.run_statements(else_body)
                } else {
                    Ok(())
                }
            }
            Stmt::While { condition, body } => {
                while self.condition(condition, "while")? {
                    self.run_statements(body)?;
                }
                Ok(())
            }
        }
    }

    /// Int conditions coerce to bool (nonzero is true); anything else
    /// non-bool is a type error.
    fn condition(&mut self, expr: &Expr, construct: &'static str) -> Result<bool> {
        match self.evaluate(expr)? {
            Value::Bool(b) => Ok(b),
            Value::Int(n) => Ok(n != 0),
            other => Err(RuntimeError::ConditionNotBool { construct, kind: other.kind() }),
        }
    }

    fn assign(&mut self, target: &AssignTarget, value: &Expr) -> Result<()> {
        let src = self.evaluate(value)?;
        let name = target.name.lexeme.as_str();
        match &target.field {
            None => {
                self.env.set(name, src);
                Ok(())
            }
            Some(field) if field.lexeme == "proto" => {
                let obj = match self.env.get(name) {
                    Some(s) => {
                        let current = s.borrow();
                        match &*current {
                            Value::Object(o) => o.clone(),
                            _ => return Err(RuntimeError::NotAnObject(name.to_string())),
                        }
                    }
                    // assigning a prototype to an unbound name declares it
                    // as a fresh object
                    None => {
                        let o = Object::new_ref();
                        self.env.set(name, Value::Object(o.clone()));
                        o
                    }
                };
                match src {
                    Value::Object(proto) => {
                        obj.borrow_mut().set_proto(proto);
                        Ok(())
                    }
                    other => Err(RuntimeError::ProtoNotObject(other.kind())),
                }
            }
            Some(field) => {
                let s = self
                    .env
                    .get(name)
                    .ok_or_else(|| RuntimeError::UndefinedVariable(name.to_string()))?;
                let obj = {
                    let current = s.borrow();
                    match &*current {
                        Value::Object(o) => o.clone(),
                        _ => return Err(RuntimeError::NotAnObject(name.to_string())),
                    }
                };
                obj.borrow_mut().set_field(&field.lexeme, src);
                Ok(())
            }
        }
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(lit) => Ok(match lit {
                LiteralValue::Int(n) => Value::Int(*n),
                LiteralValue::Str(s) => Value::Str(Rc::from(s.as_str())),
                LiteralValue::Bool(b) => Value::Bool(*b),
                LiteralValue::Nil => Value::Nil,
            }),
            Expr::Variable { name } => self.eval_name(name),
            Expr::Field { object, field } => self.eval_field(object, field),
            Expr::Call(call) => self.call_function(call),
            Expr::MethodCall(mcall) => self.call_method(mcall),
            Expr::Binary { left, operator, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                operators::binary(operator, left, right)
            }
            Expr::Unary { operator, right } => {
                let value = self.evaluate(right)?;
                operators::unary(operator, value)
            }
            Expr::Grouping { expression } => self.evaluate(expression),
            Expr::Lambda { def } => Ok(Value::Closure(Rc::new(self.capture_closure(def)))),
            Expr::ObjectLit => Ok(Value::Object(Object::new_ref())),
        }
    }

    /// A bare name resolves through the environment first; failing that it
    /// may reference a (non-overloaded) top-level function as a value.
    fn eval_name(&mut self, name: &Token) -> Result<Value> {
        if let Some(s) = self.env.get(&name.lexeme) {
            return Ok(s.borrow().clone());
        }
        match self.functions.lookup_unique(&name.lexeme) {
            Some(Ok(closure)) => Ok(Value::Closure(closure)),
            Some(Err(())) => Err(RuntimeError::AmbiguousFunction(name.lexeme.clone())),
            None => Err(RuntimeError::UndefinedName(name.lexeme.clone())),
        }
    }

    fn eval_field(&mut self, object: &Token, field: &Token) -> Result<Value> {
        let obj = self.object_named(object)?;
        if field.lexeme == "proto" {
            let proto = obj.borrow().proto();
            return match proto {
                Some(p) => Ok(Value::Object(p)),
                None => Err(RuntimeError::NoPrototype(object.lexeme.clone())),
            };
        }
        match object::resolve_property(&obj, &field.lexeme) {
            Some(s) => Ok(s.borrow().clone()),
            None => Err(RuntimeError::UndefinedProperty(field.lexeme.clone())),
        }
    }

    fn object_named(&mut self, name: &Token) -> Result<ObjectRef> {
        let s = self
            .env
            .get(&name.lexeme)
            .ok_or_else(|| RuntimeError::UndefinedVariable(name.lexeme.clone()))?;
        let value = s.borrow();
        match &*value {
            Value::Object(o) => Ok(o.clone()),
            _ => Err(RuntimeError::NotAnObject(name.lexeme.clone())),
        }
    }

    /// Snapshot of the defining frame: every visible name, innermost
    /// occurrence first, copied into slots owned by the closure.
    fn capture_closure(&self, def: &Rc<FunctionDef>) -> Closure {
        let mut captured = HashMap::new();
        for (name, s) in self.env.visible() {
            captured.insert(name, slot(s.borrow().clone()));
        }
        Closure { def: def.clone(), captured }
    }

    fn call_function(&mut self, call: &CallExpr) -> Result<Value> {
        match call.name.lexeme.as_str() {
            "print" => return self.builtin_print(&call.args),
            "inputi" => return self.builtin_input(&call.args, true),
            "inputs" => return self.builtin_input(&call.args, false),
            _ => {}
        }
        let closure = self.resolve_call_target(&call.name, call.args.len())?;
        self.call_closure(&closure, &call.args, None)
    }

    /// Exact (name, arity) match in the function table; when the name is not
    /// a top-level function at all, a closure-valued variable of matching
    /// arity is callable too.
    fn resolve_call_target(&mut self, name: &Token, arity: usize) -> Result<Rc<Closure>> {
        if self.functions.contains(&name.lexeme) {
            return self.functions.lookup(&name.lexeme, arity).ok_or_else(|| {
                RuntimeError::UndefinedFunction { name: name.lexeme.clone(), arity }
            });
        }
        let s = self.env.get(&name.lexeme).ok_or_else(|| {
            RuntimeError::UndefinedFunction { name: name.lexeme.clone(), arity }
        })?;
        let value = s.borrow();
        match &*value {
            Value::Closure(c) => {
                if c.arity() != arity {
                    return Err(RuntimeError::WrongArgumentCount {
                        name: name.lexeme.clone(),
                        expected: c.arity(),
                        found: arity,
                    });
                }
                Ok(c.clone())
            }
            other => Err(RuntimeError::CallNonClosure {
                name: name.lexeme.clone(),
                kind: other.kind(),
            }),
        }
    }

    fn call_method(&mut self, mcall: &MethodCallExpr) -> Result<Value> {
        let receiver = self.object_named(&mcall.recv)?;
        let found = object::resolve_property(&receiver, &mcall.method.lexeme)
            .ok_or_else(|| RuntimeError::UndefinedMethod(mcall.method.lexeme.clone()))?;
        let closure = {
            let value = found.borrow();
            match &*value {
                Value::Closure(c) => c.clone(),
                other => {
                    return Err(RuntimeError::MethodNotCallable {
                        method: mcall.method.lexeme.clone(),
                        kind: other.kind(),
                    })
                }
            }
        };
        // `this` is the original receiver even when the method came from a
        // prototype up the chain
        self.call_closure(&closure, &mcall.args, Some(receiver))
    }

    /// Invocation: arguments are evaluated in the caller's frame, then a
    /// fresh isolated frame is installed containing `this` (methods), the
    /// captured slots and the parameters, in that order, so parameters
    /// shadow captured names. The caller's frame is restored on all paths.
    fn call_closure(
        &mut self,
        closure: &Closure,
        args: &[Expr],
        this: Option<ObjectRef>,
    ) -> Result<Value> {
        let formals = &closure.def.params;
        if formals.len() != args.len() {
            return Err(RuntimeError::WrongArgumentCount {
                name: closure.def.name.lexeme.clone(),
                expected: formals.len(),
                found: args.len(),
            });
        }

        let mut bindings = Scope::new();
        if let Some(obj) = this {
            bindings.insert(intern("this"), slot(Value::Object(obj)));
        }
        for (&name, s) in &closure.captured {
            bindings.insert(name, s.clone());
        }
        for (formal, actual) in formals.iter().zip(args) {
            let s = if formal.by_ref {
                self.ref_argument(actual)?
            } else {
                slot(self.evaluate(actual)?)
            };
            bindings.insert(intern(&formal.name.lexeme), s);
        }

        let saved = std::mem::replace(&mut self.env, Environment::from_scope(bindings));
        let result = self.run_statements(&closure.def.body);
        self.env = saved;
        match result {
            Ok(()) => Ok(Value::Nil),
            Err(RuntimeError::Return(v)) => Ok(v),
            Err(e) => Err(e),
        }
    }

    /// A by-reference argument aliases the caller's slot when the argument
    /// is a variable or an object field; any other expression falls back to
    /// a fresh slot, so callee writes go nowhere observable.
    fn ref_argument(&mut self, expr: &Expr) -> Result<Slot> {
        match expr {
            Expr::Variable { name } => {
                if let Some(s) = self.env.get(&name.lexeme) {
                    return Ok(s);
                }
                // a function-valued name: nothing in the environment to alias
                Ok(slot(self.evaluate(expr)?))
            }
            Expr::Field { object, field } if field.lexeme != "proto" => {
                let obj = self.object_named(object)?;
                object::resolve_property(&obj, &field.lexeme)
                    .ok_or_else(|| RuntimeError::UndefinedProperty(field.lexeme.clone()))
            }
            other => Ok(slot(self.evaluate(other)?)),
        }
    }

    fn builtin_print(&mut self, args: &[Expr]) -> Result<Value> {
        let mut output = String::new();
        for arg in args {
            let value = self.evaluate(arg)?;
            match value.printable() {
                Some(text) => output.push_str(&text),
                None => return Err(RuntimeError::Unprintable(value.kind())),
            }
        }
        self.console.output(&output);
        Ok(Value::Nil)
    }

    fn builtin_input(&mut self, args: &[Expr], as_int: bool) -> Result<Value> {
        let name = if as_int { "inputi" } else { "inputs" };
        if args.len() > 1 {
            return Err(RuntimeError::BuiltinArity { name });
        }
        if let Some(prompt) = args.first() {
            let value = self.evaluate(prompt)?;
            match value.printable() {
                Some(text) => self.console.output(&text),
                None => return Err(RuntimeError::Unprintable(value.kind())),
            }
        }
        let line = self.console.input();
        if as_int {
            match line.trim().parse::<i64>() {
                Ok(n) => Ok(Value::Int(n)),
                Err(_) => Err(RuntimeError::InputNotInt(line)),
            }
        } else {
            Ok(Value::Str(line.into()))
        }
    }
}
