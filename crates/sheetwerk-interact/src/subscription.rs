// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global pointer listeners, held for exactly as long as a drag lives.

use tracing::debug;

/// Handle returned by [`PointerEventHub::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Whatever delivers pointer move/up/cancel events while a corner is held:
/// a window event loop, a touch bridge, a test double.
///
/// Methods take `&self`; hubs are expected to use interior mutability.
pub trait PointerEventHub {
    fn subscribe(&self) -> ListenerId;
    fn unsubscribe(&self, id: ListenerId);
}

/// Hub for headless use where events are fed in directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedHub;

impl PointerEventHub for DetachedHub {
    fn subscribe(&self) -> ListenerId {
        ListenerId(0)
    }

    fn unsubscribe(&self, _id: ListenerId) {}
}

/// Unsubscribes from its hub when dropped, on every exit path including unwinding.
#[derive(Debug)]
pub struct PointerSubscription<'h, H: PointerEventHub + ?Sized> {
    hub: &'h H,
    id: ListenerId,
}

impl<'h, H: PointerEventHub + ?Sized> PointerSubscription<'h, H> {
    pub fn acquire(hub: &'h H) -> Self {
        let id = hub.subscribe();
        debug!(listener = id.0, "Pointer listeners attached");
        Self { hub, id }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl<H: PointerEventHub + ?Sized> Drop for PointerSubscription<'_, H> {
    fn drop(&mut self) {
        self.hub.unsubscribe(self.id);
        debug!(listener = self.id.0, "Pointer listeners detached");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct LogHub {
        events: RefCell<Vec<String>>,
    }

    impl PointerEventHub for LogHub {
        fn subscribe(&self) -> ListenerId {
            self.events.borrow_mut().push("sub".into());
            ListenerId(7)
        }

        fn unsubscribe(&self, id: ListenerId) {
            self.events.borrow_mut().push(format!("unsub {}", id.0));
        }
    }

    #[test]
    fn drop_unsubscribes_the_same_listener() {
        let hub = LogHub::default();
        {
            let sub = PointerSubscription::acquire(&hub);
            assert_eq!(sub.id(), ListenerId(7));
        }
        assert_eq!(*hub.events.borrow(), vec!["sub".to_string(), "unsub 7".to_string()]);
    }
}
