use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::runtime::RuntimeHandle;

struct StateCell<T> {
    value: RefCell<T>,
    runtime: RuntimeHandle,
}

/// Observable value. Every write asks the runtime for a recomposition.
pub struct MutableState<T> {
    inner: Rc<StateCell<T>>,
}

/// Read-only view of a [`MutableState`].
pub struct State<T> {
    inner: Rc<StateCell<T>>,
}

/// Non-owning reference to a state cell.
pub struct WeakState<T> {
    inner: Weak<StateCell<T>>,
}

impl<T> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Clone for WeakState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T> PartialEq for MutableState<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> PartialEq for State<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> MutableState<T> {
    pub fn with_runtime(value: T, runtime: RuntimeHandle) -> Self {
        Self {
            inner: Rc::new(StateCell {
                value: RefCell::new(value),
                runtime,
            }),
        }
    }

    pub fn as_state(&self) -> State<T> {
        State {
            inner: Rc::clone(&self.inner),
        }
    }

    pub fn downgrade(&self) -> WeakState<T> {
        WeakState {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.inner.value.borrow_mut());
        self.inner.runtime.request_recompose();
        result
    }

    pub fn replace(&self, value: T) -> T {
        let old = self.inner.value.replace(value);
        self.inner.runtime.request_recompose();
        old
    }

    pub fn set(&self, value: T) {
        self.replace(value);
    }

    pub fn set_value(&self, value: T) {
        self.replace(value);
    }
}

impl<T: Clone> MutableState<T> {
    pub fn value(&self) -> T {
        self.with(Clone::clone)
    }

    pub fn get(&self) -> T {
        self.value()
    }
}

impl<T: PartialEq> MutableState<T> {
    /// Writes only when the value differs, so no recomposition is requested
    /// for a no-op write.
    pub fn set_if_changed(&self, value: T) -> bool {
        if self.with(|current| *current == value) {
            return false;
        }
        self.set(value);
        true
    }
}

impl<T> State<T> {
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }
}

impl<T: Clone> State<T> {
    pub fn value(&self) -> T {
        self.with(Clone::clone)
    }
}

impl<T> WeakState<T> {
    pub fn upgrade(&self) -> Option<MutableState<T>> {
        self.inner.upgrade().map(|inner| MutableState { inner })
    }
}

impl<T: fmt::Debug> fmt::Debug for MutableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|value| f.debug_tuple("MutableState").field(value).finish())
    }
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|value| f.debug_tuple("State").field(value).finish())
    }
}
