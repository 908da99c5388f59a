use brewin_core::{intern, Symbol};
use std::collections::HashMap;

use crate::values::{slot, Slot, Value};

pub type Scope = HashMap<Symbol, Slot>;

/// One call frame: a stack of lexical scopes, innermost last. Frames are
/// not chained to the caller's: a call sees only its captured variables,
/// its parameters and (for methods) `this`.
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        Environment { scopes: vec![Scope::new()] }
    }

    /// A frame pre-seeded with call bindings; the body's own scope is
    /// pushed on top by statement execution.
    pub fn from_scope(bindings: Scope) -> Self {
        Environment { scopes: vec![bindings] }
    }

    /// Innermost binding wins.
    pub fn get(&self, name: &str) -> Option<Slot> {
        for scope in self.scopes.iter().rev() {
            if let Some(s) = scope.get(name) {
                return Some(s.clone());
            }
        }
        None
    }

    /// Upsert with shadow-search: overwrite the nearest existing binding in
    /// place, or create one in the innermost scope. First assignment is the
    /// declaration in this language.
    pub fn set(&mut self, name: &str, value: Value) {
        if let Some(existing) = self.get(name) {
            *existing.borrow_mut() = value;
            return;
        }
        self.create(name, slot(value));
    }

    /// Unconditionally bind in the innermost scope, shadowing any outer
    /// binding of the same name.
    pub fn create(&mut self, name: &str, s: Slot) {
        let sym = intern(name);
        self.scopes
            .last_mut()
            .expect("environment always has a scope")
            .insert(sym, s);
    }

    pub fn push(&mut self) {
        self.scopes.push(Scope::new());
    }

    pub fn pop(&mut self) {
        self.scopes.pop();
    }

    /// Visible bindings, innermost occurrence of each name first. This is
    /// the iteration order closure capture relies on.
    pub fn visible(&self) -> Vec<(Symbol, Slot)> {
        let mut seen: Vec<(Symbol, Slot)> = Vec::new();
        for scope in self.scopes.iter().rev() {
            for (&name, s) in scope {
                if !seen.iter().any(|(n, _)| *n == name) {
                    seen.push((name, s.clone()));
                }
            }
        }
        seen
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
