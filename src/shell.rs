use std::cell::RefCell;

/// A non-owning handle to a toplevel window.
pub trait WindowHandle: Clone {
    /// False once the window behind the handle has been destroyed
    fn is_alive(&self) -> bool;
    fn present(&self);
}

/// Tracks the one main window the application treats as active.
pub struct WindowTracker<W> {
    active: RefCell<Option<W>>,
}

impl<W> Default for WindowTracker<W> {
    fn default() -> Self {
        Self {
            active: RefCell::new(None),
        }
    }
}

impl<W: WindowHandle> WindowTracker<W> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tracked window, if it is still alive
    pub fn active(&self) -> Option<W> {
        self.active.borrow().as_ref().filter(|w| w.is_alive()).cloned()
    }

    /// Present the active window, creating it with `create` first if there
    /// is none. `create` runs at most once per call and never while a live
    /// window is tracked.
    pub fn activate(&self, create: impl FnOnce() -> W) -> W {
        let window = match self.active() {
            Some(window) => window,
            None => {
                log::debug!("creating main window");
                let window = create();
                *self.active.borrow_mut() = Some(window.clone());
                window
            }
        };
        window.present();
        window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct FakeWindow {
        id: usize,
        alive: Rc<Cell<bool>>,
        presented: Rc<Cell<usize>>,
    }

    impl WindowHandle for FakeWindow {
        fn is_alive(&self) -> bool {
            self.alive.get()
        }

        fn present(&self) {
            self.presented.set(self.presented.get() + 1);
        }
    }

    struct Factory {
        created: Cell<usize>,
    }

    impl Factory {
        fn build(&self) -> FakeWindow {
            let id = self.created.get();
            self.created.set(id + 1);
            FakeWindow {
                id,
                alive: Rc::new(Cell::new(true)),
                presented: Rc::new(Cell::new(0)),
            }
        }
    }

    #[test]
    fn test_repeated_activation_creates_one_window() {
        let tracker = WindowTracker::new();
        let factory = Factory { created: Cell::new(0) };

        let first = tracker.activate(|| factory.build());
        for _ in 0..5 {
            let again = tracker.activate(|| factory.build());
            assert_eq!(again.id, first.id);
        }

        assert_eq!(factory.created.get(), 1);
        assert_eq!(first.presented.get(), 6);
    }

    #[test]
    fn test_no_window_before_activation() {
        let tracker: WindowTracker<FakeWindow> = WindowTracker::new();
        assert!(tracker.active().is_none());
    }

    #[test]
    fn test_destroyed_window_is_replaced() {
        let tracker = WindowTracker::new();
        let factory = Factory { created: Cell::new(0) };

        let first = tracker.activate(|| factory.build());
        first.alive.set(false);
        assert!(tracker.active().is_none());

        let second = tracker.activate(|| factory.build());
        assert_ne!(second.id, first.id);
        assert_eq!(factory.created.get(), 2);
        assert_eq!(tracker.active().map(|w| w.id), Some(second.id));
    }
}
