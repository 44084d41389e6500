// Pre-finalize hook: one-shot callbacks applied once per primary frame

use super::frame::{SimulationFrame, Stream};
use std::cell::RefCell;
use std::rc::Rc;

/// A deferred callback. Identity is the `Rc` allocation, so cloning the
/// same `Rc` and subscribing twice yields one invocation.
pub type DeferredCallback<F> = Rc<dyn Fn(&mut F)>;

/// When a subscription should fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheduling {
    /// At the next primary pre-finalize point
    ThisFrame,
    /// At the primary pre-finalize point after the next one
    NextFrame,
}

/// Observable state of the hook between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookState {
    Idle,
    Pending,
}

struct Subscriptions<F> {
    this_frame: Vec<DeferredCallback<F>>,
    next_frame: Vec<DeferredCallback<F>>,
}

fn same_callback<F>(a: &DeferredCallback<F>, b: &DeferredCallback<F>) -> bool {
    Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
}

impl<F> Subscriptions<F> {
    /// Remove-then-add, so a resubscribed callback keeps one slot at the back
    fn insert(&mut self, callback: DeferredCallback<F>) {
        self.this_frame.retain(|existing| !same_callback(existing, &callback));
        self.this_frame.push(callback);
    }
}

/// Runs subscribed callbacks once, immediately before a primary frame is
/// finalized, then forgets them.
///
/// Speculative iterations reach the hook too but are filtered out: the
/// pending batch survives them untouched. Share the hook through an `Rc`
/// so callbacks can subscribe again while the batch is firing; such
/// subscriptions wait for the next primary frame.
pub struct PreFinalizeHook<F> {
    subscriptions: RefCell<Subscriptions<F>>,
}

impl<F: SimulationFrame> PreFinalizeHook<F> {
    pub fn new() -> Self {
        Self {
            subscriptions: RefCell::new(Subscriptions {
                this_frame: Vec::new(),
                next_frame: Vec::new(),
            }),
        }
    }

    /// Run `callback` at the next primary pre-finalize point
    pub fn subscribe(&self, callback: DeferredCallback<F>) {
        self.subscriptions.borrow_mut().insert(callback);
    }

    /// Run `callback` one primary frame after the next one
    pub fn subscribe_next_frame(&self, callback: DeferredCallback<F>) {
        self.subscriptions.borrow_mut().next_frame.push(callback);
    }

    pub fn schedule(&self, callback: DeferredCallback<F>, scheduling: Scheduling) {
        match scheduling {
            Scheduling::ThisFrame => self.subscribe(callback),
            Scheduling::NextFrame => self.subscribe_next_frame(callback),
        }
    }

    /// Drop a callback from the pending batch and the next-frame buffer
    pub fn unsubscribe(&self, callback: &DeferredCallback<F>) {
        let mut subs = self.subscriptions.borrow_mut();
        subs.this_frame.retain(|existing| !same_callback(existing, callback));
        subs.next_frame.retain(|existing| !same_callback(existing, callback));
    }

    pub fn state(&self) -> HookState {
        if self.subscriptions.borrow().this_frame.is_empty() {
            HookState::Idle
        } else {
            HookState::Pending
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state() == HookState::Idle
    }

    /// Callbacks that will fire at the next primary frame
    pub fn pending_len(&self) -> usize {
        self.subscriptions.borrow().this_frame.len()
    }

    /// Callbacks waiting in the next-frame buffer
    pub fn deferred_len(&self) -> usize {
        self.subscriptions.borrow().next_frame.len()
    }

    /// Host entry point, called once per iteration right before it is finalized
    pub fn pre_finalize(&self, frame: &mut F) {
        if frame.stream() != Stream::Primary {
            return;
        }

        // Fire a snapshot so callbacks may subscribe while we iterate
        let batch = std::mem::take(&mut self.subscriptions.borrow_mut().this_frame);
        if !batch.is_empty() {
            log::trace!(
                "Firing {} pre-finalize callback(s) on frame {}",
                batch.len(),
                frame.frame()
            );
        }
        for callback in &batch {
            callback(&mut *frame);
        }

        let mut subs = self.subscriptions.borrow_mut();
        let promoted = std::mem::take(&mut subs.next_frame);
        for callback in promoted {
            subs.insert(callback);
        }
    }
}

impl<F: SimulationFrame> Default for PreFinalizeHook<F> {
    fn default() -> Self {
        Self::new()
    }
}
