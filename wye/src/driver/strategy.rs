//! Executors for source reads and cancellation thunks.

use std::thread;

/// Runs a thunk produced by the driver: a source's `request`, or the
/// clean-shutdown path invoked by `terminate_l`/`terminate_r`.
///
/// Implementations must be stack-safe — the actor loop itself never
/// recurses, so this only bounds how deeply a *source* is allowed to
/// re-enter, not the actor.
pub trait Strategy: Send + Sync {
  fn execute(&self, thunk: Box<dyn FnOnce() + Send>);
}

/// Runs every thunk on a freshly spawned, detached OS thread. The default —
/// simple, and sufficient for sources whose `request` call blocks.
pub struct ThreadStrategy;

impl Strategy for ThreadStrategy {
  fn execute(&self, thunk: Box<dyn FnOnce() + Send>) {
    thread::Builder::new()
      .name("wye-source".into())
      .spawn(thunk)
      .expect("failed to spawn wye source thread");
  }
}
