use crate::lab_error::LabReport;
use crate::lab_error::LabResult;
use tracing::debug;

/// A named slot holding at most one graphics object.
///
/// Dropping the value releases the underlying object, so emptying the slot
/// is the release. Releasing an empty slot does nothing.
pub struct Owned<T> {
    name: &'static str,
    inner: Option<T>,
}

impl<T> Owned<T> {
    pub fn new(name: &'static str, value: T) -> Self {
        debug!("Acquired {name}");
        Self {
            name,
            inner: Some(value),
        }
    }

    pub fn empty(name: &'static str) -> Self {
        Self { name, inner: None }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_live(&self) -> bool {
        self.inner.is_some()
    }

    pub fn get(&self) -> Option<&T> {
        self.inner.as_ref()
    }

    /// Borrows the object, or fails if it has already been released.
    pub fn live(&self) -> LabResult<&T> {
        self.inner
            .as_ref()
            .ok_or_else(|| LabReport::msg(format!("{} has been released", self.name)))
    }

    /// Puts a new object in the slot, releasing the previous one first.
    pub fn replace(&mut self, value: T) {
        self.release();
        debug!("Acquired {}", self.name);
        self.inner = Some(value);
    }

    /// Returns whether an object was actually released.
    pub fn release(&mut self) -> bool {
        match self.inner.take() {
            Some(value) => {
                drop(value);
                debug!("Released {}", self.name);
                true
            }
            None => false,
        }
    }
}

impl<T> Drop for Owned<T> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T> std::fmt::Debug for Owned<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Owned")
            .field("name", &self.name)
            .field("live", &self.is_live())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Handle {
        id: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Drop for Handle {
        fn drop(&mut self) {
            self.log.borrow_mut().push(self.id);
        }
    }

    fn handle(id: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Handle {
        Handle {
            id,
            log: log.clone(),
        }
    }

    #[test]
    fn release_twice_drops_once() {
        let log = Rc::default();
        let mut slot = Owned::new("vertex buffer", handle("vb", &log));

        assert!(slot.release());
        assert!(!slot.release());
        drop(slot);

        assert_eq!(*log.borrow(), ["vb"]);
    }

    #[test]
    fn drop_releases_live_slot() {
        let log = Rc::default();
        {
            let _slot = Owned::new("swap chain", handle("swap", &log));
        }
        assert_eq!(*log.borrow(), ["swap"]);
    }

    #[test]
    fn live_fails_after_release() {
        let log = Rc::default();
        let mut slot = Owned::new("render target view", handle("rtv", &log));
        assert!(slot.live().is_ok());
        slot.release();
        let error = slot.live().err().map(|e| e.to_string());
        assert_eq!(error.as_deref(), Some("render target view has been released"));
        assert!(Owned::<Handle>::empty("device").get().is_none());
    }

    #[test]
    fn replace_releases_previous_object_first() {
        let log = Rc::default();
        let mut slot = Owned::new("render target view", handle("old", &log));
        slot.replace(handle("new", &log));
        assert_eq!(*log.borrow(), ["old"]);
        assert_eq!(slot.get().map(|h| h.id), Some("new"));
    }

    #[test]
    fn slots_released_in_reverse_acquisition_order() {
        let log = Rc::default();
        let mut device = Owned::new("device", handle("device", &log));
        let mut context = Owned::new("context", handle("context", &log));
        let mut swap_chain = Owned::new("swap chain", handle("swap chain", &log));

        for slot in [&mut swap_chain, &mut context, &mut device] {
            slot.release();
        }
        // Second pass, as when Drop runs after an explicit release.
        for slot in [&mut swap_chain, &mut context, &mut device] {
            assert!(!slot.release());
        }

        assert_eq!(*log.borrow(), ["swap chain", "context", "device"]);
    }
}
