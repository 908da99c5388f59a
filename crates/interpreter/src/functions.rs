use brewin_core::ast::Program;
use brewin_core::{intern, Symbol};
use std::collections::HashMap;
use std::rc::Rc;

use crate::values::Closure;

/// Top-level functions keyed by name, then by arity: definitions with the
/// same name and different parameter counts coexist as overloads. Built
/// once at load time, never mutated afterward.
pub struct FunctionTable {
    funcs: HashMap<Symbol, HashMap<usize, Rc<Closure>>>,
}

impl FunctionTable {
    pub fn new() -> Self {
        FunctionTable { funcs: HashMap::new() }
    }

    pub fn build(program: &Program) -> Self {
        let mut funcs: HashMap<Symbol, HashMap<usize, Rc<Closure>>> = HashMap::new();
        for def in &program.functions {
            let name = intern(&def.name.lexeme);
            let arity = def.params.len();
            // a later definition with the same name and arity replaces the
            // earlier one
            funcs
                .entry(name)
                .or_default()
                .insert(arity, Rc::new(Closure::top_level(def.clone())));
        }
        FunctionTable { funcs }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.funcs.contains_key(name)
    }

    pub fn lookup(&self, name: &str, arity: usize) -> Option<Rc<Closure>> {
        self.funcs.get(name)?.get(&arity).cloned()
    }

    /// Lookup without an arity, used when a bare name references a function
    /// as a value. `Err(())` means the name is overloaded and there is no
    /// way to pick.
    pub fn lookup_unique(&self, name: &str) -> Option<std::result::Result<Rc<Closure>, ()>> {
        let by_arity = self.funcs.get(name)?;
        if by_arity.len() > 1 {
            return Some(Err(()));
        }
        by_arity.values().next().cloned().map(Ok)
    }
}

impl Default for FunctionTable {
    fn default() -> Self {
        Self::new()
    }
}
