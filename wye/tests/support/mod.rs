//! Shared driver test doubles: a `Source` over a fixed `Vec`, with optional
//! jitter and a `QueuedStrategy` that exercises `DriverConfig::with_strategy`
//! through a real blocking queue instead of a thread-per-call.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_queue::ArrayQueue;
use wye::cause::Cause;
use wye::driver::{CancelHandle, Respond, Source, SourceOutcome, Strategy};
use wye::sync::Mutex;

/// Hands out `batch_size` items per request, optionally sleeping a random
/// `0..=max` duration first to force real interleaving with the other side.
pub struct VecSource<T> {
  items: Mutex<VecDeque<T>>,
  batch_size: usize,
  jitter: Option<Duration>,
}

impl<T: Send + 'static> VecSource<T> {
  pub fn new(items: Vec<T>, batch_size: usize) -> Self {
    Self { items: Mutex::new(items.into()), batch_size, jitter: None }
  }

  pub fn with_jitter(mut self, max: Duration) -> Self {
    self.jitter = Some(max);
    self
  }
}

impl<T, E> Source<T, E> for VecSource<T>
where
  T: Send + 'static,
  E: Send + 'static,
{
  fn request(self: Box<Self>, respond: Respond<T, E>) -> CancelHandle<E> {
    if let Some(max) = self.jitter {
      thread::sleep(Duration::from_nanos(fastrand::u64(0..=max.as_nanos() as u64)));
    }
    let batch: Vec<T> = {
      let mut items = self.items.lock();
      (0..self.batch_size).filter_map(|_| items.pop_front()).collect()
    };
    if batch.is_empty() {
      respond(SourceOutcome::Done(Cause::End));
    } else {
      respond(SourceOutcome::Ready(batch, self));
    }
    CancelHandle::noop()
  }
}

/// A [`Strategy`] backed by a fixed pool of worker threads pulling thunks
/// off a bounded `ArrayQueue`, coordinated with `BlockingCoordinator` rather
/// than spawning a thread per call — the shape a production deployment
/// would actually pick over the default `ThreadStrategy`.
pub struct QueuedStrategy {
  queue: Arc<ArrayQueue<Box<dyn FnOnce() + Send>>>,
  coordinator: Arc<wye::blocking_queue::BlockingCoordinator>,
}

impl QueuedStrategy {
  pub fn new(workers: usize, capacity: usize) -> Self {
    let queue = Arc::new(ArrayQueue::new(capacity));
    let coordinator = Arc::new(wye::blocking_queue::BlockingCoordinator::new());
    for _ in 0..workers {
      let queue = Arc::clone(&queue);
      let coordinator = Arc::clone(&coordinator);
      thread::spawn(move || {
        loop {
          let thunk = coordinator.blocking_pop(|| queue.pop());
          thunk();
        }
      });
    }
    Self { queue, coordinator }
  }
}

impl Strategy for QueuedStrategy {
  fn execute(&self, thunk: Box<dyn FnOnce() + Send>) {
    let mut thunk = thunk;
    while let Err(rejected) = self.queue.push(thunk) {
      thunk = rejected;
      thread::yield_now();
    }
    self.coordinator.notify_one();
  }
}
