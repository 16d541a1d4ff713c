use crate::core;
use crate::types::{Function, Symbol};
use itertools::Itertools;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, PartialEq)]
pub struct UnknownSymbol(pub Symbol);

impl fmt::Display for UnknownSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' not found", self.0)
    }
}

/// One scope in a chain of scopes. A scope is shared (`Rc`) between its
/// children, the closures that captured it and whatever is evaluating in it;
/// it never owns its children.
#[derive(Default)]
pub struct Environment {
    data: RefCell<HashMap<Symbol, Function>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    pub fn spawn_from(parent: &Rc<Environment>) -> Rc<Self> {
        Rc::new(Self {
            data: RefCell::new(HashMap::new()),
            parent: Some(parent.clone()),
        })
    }

    /// Binds `key` in this scope only, replacing any previous binding here.
    pub fn set<T>(&self, key: T, value: Function) -> Option<Function>
    where
        T: Into<Symbol>,
    {
        self.data.borrow_mut().insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<Function> {
        let mut env = self;
        loop {
            if let Some(value) = env.data.borrow().get(key) {
                return Some(value.clone());
            }
            match &env.parent {
                Some(parent) => env = parent.as_ref(),
                None => return None,
            }
        }
    }

    pub fn fetch(&self, key: &Symbol) -> Result<Function, UnknownSymbol> {
        self.get(key).ok_or_else(|| UnknownSymbol(key.clone()))
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data.borrow();
        write!(
            f,
            "Environment(root? {}) {{{}}}",
            self.is_root(),
            data.keys().map(|k| k.as_str()).sorted().join(" ")
        )
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// The global scope, populated with the built-in functions.
pub fn repl_env() -> Rc<Environment> {
    let env = Environment::default();
    for (&name, &func) in core::CORE.iter() {
        env.set(name, Function::Primitive(func));
    }
    Rc::new(env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    fn constant(n: i64) -> Function {
        Function::from(Value::Integer(n))
    }

    #[test]
    fn lookup_walks_up_the_chain() {
        let root = Rc::new(Environment::default());
        root.set("outer", constant(1));
        let child = Environment::spawn_from(&root);
        let grandchild = Environment::spawn_from(&child);
        assert_eq!(grandchild.get("outer"), Some(constant(1)));
        assert!(root.is_root());
        assert!(!grandchild.is_root());
    }

    #[test]
    fn inner_bindings_shadow_outer_ones() {
        let root = Rc::new(Environment::default());
        let outer = constant(1);
        let inner = constant(2);
        root.set("x", outer.clone());
        let child = Environment::spawn_from(&root);
        child.set("x", inner.clone());
        assert_eq!(child.get("x"), Some(inner));
        assert_eq!(root.get("x"), Some(outer));
    }

    #[test]
    fn set_never_touches_ancestors() {
        let root = Rc::new(Environment::default());
        let child = Environment::spawn_from(&root);
        child.set("y", constant(5));
        assert!(root.get("y").is_none());
    }

    #[test]
    fn children_see_later_parent_bindings() {
        let root = Rc::new(Environment::default());
        let child = Environment::spawn_from(&root);
        assert!(child.get("late").is_none());
        let late = constant(9);
        root.set("late", late.clone());
        assert_eq!(child.get("late"), Some(late));
    }

    #[test]
    fn rebinding_replaces_in_place() {
        let env = Environment::default();
        let first = constant(1);
        let second = constant(2);
        assert!(env.set("x", first.clone()).is_none());
        assert_eq!(env.set("x", second.clone()), Some(first));
        assert_eq!(env.data.borrow().len(), 1);
        assert_eq!(env.get("x"), Some(second));
    }

    #[test]
    fn fetch_reports_unknown_symbols() {
        let root = Rc::new(Environment::default());
        let child = Environment::spawn_from(&root);
        let missing = Symbol::from("nowhere");
        assert_eq!(child.fetch(&missing), Err(UnknownSymbol(missing.clone())));
        assert_eq!(
            UnknownSymbol(missing).to_string(),
            "'nowhere' not found"
        );
    }

    #[test]
    fn repl_env_has_the_builtins() {
        let env = repl_env();
        assert!(env.is_root());
        for name in &["+", "-", "*", "/", "=", "<", "<=", ">", ">="] {
            assert!(env.get(name).is_some(), "missing builtin {}", name);
        }
    }
}
