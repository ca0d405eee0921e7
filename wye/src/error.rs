//! Driver construction and lifecycle errors.
//!
//! In-band merge failures always flow through [`crate::cause::Cause::Error`];
//! `WyeError` is only for misuse of the driver itself, or a panic escaping
//! user-supplied code that the actor was running on its behalf.

use std::fmt;

/// An error raised by the driver's own lifecycle, as opposed to a failure
/// flowing through the merge itself.
#[derive(Debug)]
pub enum WyeError {
  /// The output stream was polled again after it had already reported a
  /// terminal `Cause`.
  AlreadyTerminated,
  /// A receiver, combining function, cancellation callback, or
  /// [`crate::driver::Source::request`] panicked instead of returning.
  /// Caught at the actor boundary and reported through
  /// [`crate::driver::WyeStream::take_driver_error`] rather than killing
  /// the actor thread outright; the affected side is given a best-effort
  /// `Cause::End` so the merge can still reach a normal `Done`. `which` is
  /// `"left"`/`"right"` for a source's `request` thunk, `"both"` for a
  /// combining function invoked while stepping an `AwaitBoth`, or
  /// `"cancel"` for a cancellation callback.
  StrategyPanicked { which: &'static str },
}

impl fmt::Display for WyeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::AlreadyTerminated => f.write_str("wye output stream already terminated"),
      Self::StrategyPanicked { which } => {
        write!(f, "a panic escaped user code on the {which} side")
      }
    }
  }
}

impl std::error::Error for WyeError {}
