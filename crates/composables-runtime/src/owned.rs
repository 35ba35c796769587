use std::cell::RefCell;
use std::rc::Rc;

/// Handle to a value remembered in the slot table.
///
/// Clones share the same cell; the value is dropped when the slot is
/// disposed and the last handle goes away.
pub struct Owned<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Clone for Owned<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Owned<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let borrow = self.inner.borrow();
        f(&borrow)
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut borrow = self.inner.borrow_mut();
        f(&mut borrow)
    }

    pub fn replace(&self, new_value: T) -> T {
        self.inner.replace(new_value)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone> Owned<T> {
    pub fn get(&self) -> T {
        self.inner.borrow().clone()
    }
}
