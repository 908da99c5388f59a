use brewin_core::{intern, Symbol};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::values::{slot, Slot, Value};

pub type ObjectRef = Rc<RefCell<Object>>;

/// A field table plus an optional prototype link. Identity is the `Rc`
/// pointer: two objects are equal only when they are the same allocation.
#[derive(Debug, Default)]
pub struct Object {
    fields: HashMap<Symbol, Slot>,
    proto: Option<ObjectRef>,
}

impl Object {
    /// The `@` literal: no fields, no prototype.
    pub fn new_ref() -> ObjectRef {
        Rc::new(RefCell::new(Object::default()))
    }

    /// Writes always hit the receiver's own table, never a prototype's.
    /// The field is rebound to a fresh slot, matching assignment-replaces
    /// semantics for fields.
    pub fn set_field(&mut self, name: &str, value: Value) {
        self.fields.insert(intern(name), slot(value));
    }

    pub fn own_field(&self, name: &str) -> Option<Slot> {
        self.fields.get(name).cloned()
    }

    pub fn proto(&self) -> Option<ObjectRef> {
        self.proto.clone()
    }

    pub fn set_proto(&mut self, proto: ObjectRef) {
        self.proto = Some(proto);
    }
}

/// Prototype-chain delegation: the receiver's own field wins, otherwise the
/// chain is searched outward, so the most-derived definition shadows.
/// Returns the slot so by-reference arguments can alias a field.
pub fn resolve_property(obj: &ObjectRef, name: &str) -> Option<Slot> {
    let mut current = Some(obj.clone());
    while let Some(o) = current {
        let o = o.borrow();
        if let Some(s) = o.own_field(name) {
            return Some(s);
        }
        current = o.proto();
    }
    None
}
