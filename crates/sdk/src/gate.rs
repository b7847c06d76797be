use crate::SdkError;
use futures::{channel::oneshot, FutureExt};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

/// Where the SDK is in its one-time initialization
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InitState {
    /// Nobody has asked for the SDK yet
    Uninitialized,
    /// Loading has started (or failed, see [InitGate::fail])
    Requested,
    /// Loaded, every waiter has been released
    Initialized,
}

/// A single-flight gate around SDK initialization. The first subscriber is
/// told to start loading; everyone who subscribes before the load finishes
/// gets queued, and is released all at once by [InitGate::open]. Anyone who
/// subscribes after that is released immediately.
#[derive(Debug)]
pub struct InitGate {
    state: InitState,
    waiters: Vec<oneshot::Sender<()>>,
}

/// The result of [InitGate::subscribe]
#[derive(Debug)]
pub struct Subscription {
    pub waiter: InitWaiter,
    /// If true, the subscriber was the first and has to start loading
    pub start_load: bool,
}

impl InitGate {
    pub fn new() -> Self {
        Self {
            state: InitState::Uninitialized,
            waiters: Vec::new(),
        }
    }

    pub fn state(&self) -> InitState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == InitState::Initialized
    }

    /// Number of waiters that are still queued
    pub fn pending(&self) -> usize {
        self.waiters.len()
    }

    /// Get a future that resolves once the gate opens
    pub fn subscribe(&mut self) -> Subscription {
        match self.state {
            InitState::Initialized => Subscription {
                waiter: InitWaiter::ready(),
                start_load: false,
            },
            InitState::Uninitialized | InitState::Requested => {
                let (sender, receiver) = oneshot::channel();
                self.waiters.push(sender);
                let start_load = self.state == InitState::Uninitialized;
                self.state = InitState::Requested;
                Subscription {
                    waiter: InitWaiter {
                        receiver: Some(receiver),
                    },
                    start_load,
                }
            }
        }
    }

    /// Mark initialization as done and release every queued waiter. Returns
    /// the number of waiters that were released.
    pub fn open(&mut self) -> usize {
        self.state = InitState::Initialized;
        let waiters = std::mem::take(&mut self.waiters);
        let count = waiters.len();
        for waiter in waiters {
            // The receiving end may have been dropped, that's fine
            let _ = waiter.send(());
        }
        count
    }

    /// Record a failed load. The gate stays in [InitState::Requested], so
    /// queued waiters are **not** released and later subscribers queue up
    /// behind them. Nothing triggers another load attempt.
    pub fn fail(&mut self) {
        self.state = InitState::Requested;
    }
}

impl Default for InitGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves once the [InitGate] it came from opens. If the gate is dropped
/// before that, resolves to [SdkError::NotInitialized].
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct InitWaiter {
    /// `None` means the gate was already open
    receiver: Option<oneshot::Receiver<()>>,
}

impl InitWaiter {
    fn ready() -> Self {
        Self { receiver: None }
    }
}

impl Future for InitWaiter {
    type Output = Result<(), SdkError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.get_mut().receiver.as_mut() {
            None => Poll::Ready(Ok(())),
            Some(receiver) => receiver
                .poll_unpin(cx)
                .map(|result| result.map_err(|_| SdkError::NotInitialized)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_flight() {
        let mut gate = InitGate::new();
        assert_eq!(gate.state(), InitState::Uninitialized);

        let first = gate.subscribe();
        let second = gate.subscribe();
        assert!(first.start_load);
        assert!(!second.start_load);
        assert_eq!(gate.state(), InitState::Requested);
        assert_eq!(gate.pending(), 2);

        let mut first = first.waiter;
        let second = second.waiter;
        assert!((&mut first).now_or_never().is_none());

        assert_eq!(gate.open(), 2);
        assert!(gate.is_open());
        assert!(matches!(first.now_or_never(), Some(Ok(()))));
        assert!(matches!(second.now_or_never(), Some(Ok(()))));
    }

    #[test]
    fn test_subscribe_after_open() {
        let mut gate = InitGate::new();
        gate.open();
        let subscription = gate.subscribe();
        assert!(!subscription.start_load);
        assert_eq!(gate.pending(), 0);
        assert!(matches!(subscription.waiter.now_or_never(), Some(Ok(()))));
    }

    #[test]
    fn test_fail_keeps_waiters() {
        let mut gate = InitGate::new();
        let mut waiter = gate.subscribe().waiter;
        gate.fail();

        assert_eq!(gate.state(), InitState::Requested);
        assert_eq!(gate.pending(), 1);
        assert!((&mut waiter).now_or_never().is_none());

        // A retry would need a new load, but nobody gets told to start one
        assert!(!gate.subscribe().start_load);
    }

    #[test]
    fn test_gate_dropped() {
        let mut gate = InitGate::new();
        let waiter = gate.subscribe().waiter;
        drop(gate);
        assert!(matches!(
            waiter.now_or_never(),
            Some(Err(SdkError::NotInitialized))
        ));
    }

    #[test]
    fn test_dropped_waiter() {
        let mut gate = InitGate::new();
        drop(gate.subscribe());
        // Releasing a waiter nobody listens to anymore is harmless
        assert_eq!(gate.open(), 1);
    }
}
