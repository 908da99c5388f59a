use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

/// Interned identifier. Environment scopes and object field tables key on
/// these so repeated lookups hash a pointer-sized value.
pub type Symbol = &'static str;

fn pool() -> &'static Mutex<HashSet<&'static str>> {
    static POOL: OnceLock<Mutex<HashSet<&'static str>>> = OnceLock::new();
    POOL.get_or_init(|| Mutex::new(HashSet::new()))
}

/// Interns `s`, returning a unique `&'static str` for its content. Symbols
/// are leaked; the set of distinct names in a program is small and grows
/// monotonically.
pub fn intern(s: &str) -> Symbol {
    let mut set = pool().lock().unwrap();
    if let Some(&existing) = set.get(s) {
        return existing;
    }
    let leaked: &'static str = Box::leak(s.to_string().into_boxed_str());
    set.insert(leaked);
    leaked
}

#[cfg(test)]
mod tests {
    use super::intern;

    #[test]
    fn same_content_same_pointer() {
        let a = intern("counter");
        let b = intern(&("count".to_string() + "er"));
        assert!(std::ptr::eq(a, b));
    }
}
