//! Transition actions.

use std::fmt;
use std::sync::Arc;

type ActionFn<S, I, O> = dyn Fn(&O, &I) -> S + Send + Sync;

/// Computes the next state from the owner and the input that triggered it.
///
/// An action is a shared closure. Cloning an `Action` does not copy the
/// closure, so every clone is the *same* action: equality compares the
/// shared allocation, not what the closure does. Two actions built from
/// identical closures are still distinct.
///
/// # Example
///
/// ```rust
/// use statewise::table::Action;
///
/// let advance: Action<u32, char, ()> = Action::named("advance", |_owner, _input| 1);
/// let alias = advance.clone();
///
/// assert_eq!(advance, alias);
/// assert_eq!(advance.call(&(), &'x'), 1);
/// assert_ne!(advance, Action::new(|_, _| 1));
/// ```
pub struct Action<S, I, O: ?Sized> {
    name: Option<Arc<str>>,
    func: Arc<ActionFn<S, I, O>>,
}

impl<S, I, O: ?Sized> Action<S, I, O> {
    /// Wrap a closure as an anonymous action.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&O, &I) -> S + Send + Sync + 'static,
    {
        Self {
            name: None,
            func: Arc::new(func),
        }
    }

    /// Wrap a closure under a diagnostic name.
    ///
    /// The name only shows up in `Debug` output and table snapshots; it has
    /// no bearing on identity.
    pub fn named<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&O, &I) -> S + Send + Sync + 'static,
    {
        Self {
            name: Some(name.into()),
            func: Arc::new(func),
        }
    }

    /// Diagnostic name, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name for display, falling back to the closure address.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.to_string(),
            None => format!("action@{:#x}", self.address()),
        }
    }

    /// Invoke the action.
    pub fn call(&self, owner: &O, input: &I) -> S {
        (self.func)(owner, input)
    }

    fn address(&self) -> usize {
        Arc::as_ptr(&self.func).cast::<()>() as usize
    }
}

impl<S, I, O: ?Sized> Clone for Action<S, I, O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            func: Arc::clone(&self.func),
        }
    }
}

impl<S, I, O: ?Sized> PartialEq for Action<S, I, O> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.func), Arc::as_ptr(&other.func))
    }
}

impl<S, I, O: ?Sized> Eq for Action<S, I, O> {}

impl<S, I, O: ?Sized> fmt::Debug for Action<S, I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Action").field(&self.label()).finish()
    }
}
