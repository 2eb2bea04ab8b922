use crate::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

#[derive(Debug, Default)]
pub struct EnvironmentCore {
    store: HashMap<Rc<str>, Rc<Object>>,
    outer: Option<Environment>,
}

/// Every scope created under one top-level environment.
#[derive(Debug, Default)]
struct Scopes {
    scopes: RefCell<Vec<Weak<RefCell<EnvironmentCore>>>>,
}

impl Scopes {
    fn register(&self, scope: &Rc<RefCell<EnvironmentCore>>) {
        let mut scopes = self.scopes.borrow_mut();
        if scopes.len() == scopes.capacity() {
            scopes.retain(|scope| scope.strong_count() > 0);
        }
        scopes.push(Rc::downgrade(scope));
    }

    /// Empties every live scope. A function stored in the scope it captured
    /// keeps that scope alive through an `Rc` cycle; emptying the stores
    /// breaks every such cycle.
    fn clear(&self) {
        let live = self
            .scopes
            .borrow_mut()
            .drain(..)
            .filter_map(|scope| scope.upgrade())
            .collect::<Vec<_>>();
        for scope in live {
            let store = std::mem::take(&mut scope.borrow_mut().store);
            drop(store);
        }
    }
}

/// Shared handle to one scope. Cloning the handle shares the scope; children
/// keep their parent alive through `outer`.
#[derive(Debug, Clone)]
pub struct Environment {
    environment: Rc<RefCell<EnvironmentCore>>,
    scopes: Rc<Scopes>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        let environment = Rc::new(RefCell::new(EnvironmentCore::default()));
        let scopes = Rc::new(Scopes::default());
        scopes.register(&environment);
        Environment {
            environment,
            scopes,
        }
    }

    pub fn new_enclosed(outer: &Environment) -> Environment {
        let environment = Rc::new(RefCell::new(EnvironmentCore {
            store: HashMap::new(),
            outer: Some(outer.clone()),
        }));
        outer.scopes.register(&environment);
        Environment {
            environment,
            scopes: Rc::clone(&outer.scopes),
        }
    }

    /// Looks `key` up in this scope, then in each enclosing one.
    pub fn get(&self, key: &str) -> Option<Rc<Object>> {
        let env = self.environment.borrow();
        env.store
            .get(key)
            .cloned()
            .or_else(|| env.outer.as_ref().and_then(|outer| outer.get(key)))
    }

    /// Binds in this scope only, shadowing any outer binding.
    pub fn set(&self, key: Rc<str>, value: Rc<Object>) {
        self.environment.borrow_mut().store.insert(key, value);
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.environment, &other.environment)
    }

    pub fn depth(&self) -> usize {
        match &self.environment.borrow().outer {
            Some(outer) => 1 + outer.depth(),
            None => 1,
        }
    }
}

/// Owner of a top-level environment for one program run or REPL session.
/// Dropping it empties every scope created under it, so recursive closures
/// are freed along with the session.
#[derive(Debug, Default)]
pub struct Session {
    environment: Environment,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.environment.scopes.clear();
    }
}
