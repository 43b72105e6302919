//! Background Requests
//!
//! Network calls run on a spawned thread and report back through a channel
//! the UI polls once per frame. A [`RequestSlot`] holds at most one such
//! channel: starting a new request drops the receiver of the previous one, so
//! whatever the superseded thread eventually sends goes nowhere.
//!
//! Independent requests that must all report back go in a [`RequestPool`]
//! instead.

use std::sync::mpsc::{channel, Receiver, TryRecvError};

/// "Latest request wins" holder for one kind of background request
pub struct RequestSlot<T> {
    label: &'static str,
    generation: u64,
    inflight: Option<Receiver<T>>,
}

impl<T: Send + 'static> RequestSlot<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            generation: 0,
            inflight: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.inflight.is_some()
    }

    /// Number of requests started so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Run `job` on a worker thread, superseding any pending request
    pub fn start<F>(&mut self, job: F) -> u64
    where
        F: FnOnce() -> T + Send + 'static,
    {
        if self.inflight.is_some() {
            tracing::debug!(
                "[REQUEST] {} #{} superseded",
                self.label,
                self.generation
            );
        }
        self.generation += 1;
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let _ = tx.send(job());
        });
        self.inflight = Some(rx);
        self.generation
    }

    /// Take the result of the latest request, if it has arrived
    pub fn poll(&mut self) -> Option<T> {
        let rx = self.inflight.as_ref()?;
        match rx.try_recv() {
            Ok(result) => {
                self.inflight = None;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                tracing::error!(
                    "[REQUEST] {} #{} worker exited without a result",
                    self.label,
                    self.generation
                );
                self.inflight = None;
                None
            }
        }
    }

    /// Forget the pending request; its result will be dropped
    pub fn abandon(&mut self) {
        self.inflight = None;
    }
}

/// Holder for independent background requests. Every result is delivered.
pub struct RequestPool<T> {
    label: &'static str,
    started: u64,
    inflight: Vec<Receiver<T>>,
}

impl<T: Send + 'static> RequestPool<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            started: 0,
            inflight: Vec::new(),
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.inflight.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.inflight.len()
    }

    /// Run `job` on a worker thread alongside the ones already running
    pub fn start<F>(&mut self, job: F) -> u64
    where
        F: FnOnce() -> T + Send + 'static,
    {
        self.started += 1;
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let _ = tx.send(job());
        });
        self.inflight.push(rx);
        self.started
    }

    /// Take every result that has arrived, in start order
    pub fn poll(&mut self) -> Vec<T> {
        let label = self.label;
        let mut ready = Vec::new();
        self.inflight.retain(|rx| match rx.try_recv() {
            Ok(result) => {
                ready.push(result);
                false
            }
            Err(TryRecvError::Empty) => true,
            Err(TryRecvError::Disconnected) => {
                tracing::error!("[REQUEST] {} worker exited without a result", label);
                false
            }
        });
        ready
    }
}
