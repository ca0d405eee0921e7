//! The effectful-producer contract the driver binds to each side of a wye.

use crate::cause::Cause;

/// A handle to an in-flight [`Source::request`] call, letting the driver
/// interrupt it. Dropping a `CancelHandle` without calling [`cancel`] is a
/// no-op — interruption is opt-in, matching sources whose in-flight read
/// can't actually be aborted early (it must still run to completion and
/// report a normal `Done`/`Ready`).
///
/// [`cancel`]: CancelHandle::cancel
pub struct CancelHandle<E> {
  interrupt: Box<dyn FnOnce(Cause<E>) + Send>,
}

impl<E> CancelHandle<E> {
  /// Wraps an interruption callback.
  pub fn new(interrupt: impl FnOnce(Cause<E>) + Send + 'static) -> Self {
    Self { interrupt: Box::new(interrupt) }
  }

  /// A handle whose in-flight read cannot be interrupted early.
  pub fn noop() -> Self {
    Self::new(|_| {})
  }

  /// Requests interruption with `cause`.
  pub fn cancel(self, cause: Cause<E>) {
    (self.interrupt)(cause);
  }
}

/// What a [`Source::request`] call eventually reports, via `respond`.
pub enum SourceOutcome<T, E> {
  /// A non-empty batch, plus the source to use for the next request.
  Ready(Vec<T>, Box<dyn Source<T, E>>),
  /// The source is exhausted or failed.
  Done(Cause<E>),
}

/// The callback a [`Source`] reports its outcome through. Called exactly
/// once, synchronously or from another thread.
pub type Respond<T, E> = Box<dyn FnOnce(SourceOutcome<T, E>) + Send>;

/// One effectful producer feeding one side of a wye.
///
/// `request` consumes `self` and hands back a [`CancelHandle`] immediately;
/// the actual batch (or terminal cause) is reported later through `respond`,
/// which must be invoked exactly once.
pub trait Source<T, E>: Send {
  fn request(self: Box<Self>, respond: Respond<T, E>) -> CancelHandle<E>;
}
