//! The blocking consumer side of a running driver.

use std::collections::VecDeque;
use std::sync::Arc;

use crossbeam_channel::Sender;

use crate::cause::Cause;
use crate::error::WyeError;
use crate::sync::Mutex;

use super::actor::Msg;

/// A blocking output stream bound to a running wye driver.
///
/// Iterating repeatedly requests the next batch and yields its elements one
/// at a time; once the merge terminates, [`WyeStream::final_cause`] reports
/// why. Dropping the stream before it terminates sends a `Terminate`,
/// cancelling both sources.
pub struct WyeStream<L, R, O, E> {
  sender: Sender<Msg<L, R, O, E>>,
  pending: VecDeque<O>,
  done: bool,
  cause: Option<Cause<E>>,
  panic_slot: Arc<Mutex<Option<WyeError>>>,
}

impl<L, R, O, E> WyeStream<L, R, O, E>
where
  L: Send + 'static,
  R: Send + 'static,
  O: Send + 'static,
  E: Send + 'static,
{
  pub(super) fn new(
    sender: Sender<Msg<L, R, O, E>>,
    panic_slot: Arc<Mutex<Option<WyeError>>>,
  ) -> Self {
    Self { sender, pending: VecDeque::new(), done: false, cause: None, panic_slot }
  }

  /// `Some(cause)` once the stream has terminated; `None` while still live.
  pub fn final_cause(&self) -> Option<&Cause<E>> {
    self.cause.as_ref()
  }

  /// Takes the first driver-lifecycle error observed so far — a panic in a
  /// receiver, combining function, cancellation callback, or source,
  /// caught at the actor boundary rather than propagated. `None` means no
  /// panic has been caught (the stream may still be live, or may have
  /// ended normally).
  pub fn take_driver_error(&self) -> Option<WyeError> {
    self.panic_slot.lock().take()
  }

  fn request_batch(&mut self) {
    let (tx, rx) = crossbeam_channel::bounded(1);
    let sent = self.sender.send(Msg::Get(Box::new(move |res| {
      let _ = tx.send(res);
    })));
    if sent.is_err() {
      self.done = true;
      return;
    }
    match rx.recv() {
      Ok(Ok(batch)) => self.pending.extend(batch),
      Ok(Err(cause)) => {
        self.done = true;
        self.cause = Some(cause);
      }
      Err(_) => self.done = true,
    }
  }
}

impl<L, R, O, E> Iterator for WyeStream<L, R, O, E>
where
  L: Send + 'static,
  R: Send + 'static,
  O: Send + 'static,
  E: Send + 'static,
{
  type Item = O;

  fn next(&mut self) -> Option<O> {
    loop {
      if let Some(v) = self.pending.pop_front() {
        return Some(v);
      }
      if self.done {
        return None;
      }
      self.request_batch();
    }
  }
}

impl<L, R, O, E> Drop for WyeStream<L, R, O, E> {
  fn drop(&mut self) {
    if self.done {
      return;
    }
    let (tx, rx) = crossbeam_channel::bounded(1);
    let sent = self.sender.send(Msg::Terminate(Cause::End.kill(), Box::new(move || {
      let _ = tx.send(());
    })));
    if sent.is_ok() {
      let _ = rx.recv();
    }
  }
}
