//! The pure wye state-machine algebra.
//!
//! A [`Wye`] is an immutable tree describing a suspended two-input merge:
//! at any point it either wants to [`Wye::Emit`] a batch of output values,
//! [`Wye::AwaitL`]/[`Wye::AwaitR`]/[`Wye::AwaitBoth`] more input, or it has
//! reached [`Wye::Done`]. Nothing in this module knows about threads,
//! effects, or time — see [`crate::driver`] for the part that actually runs
//! one against real sources.

mod attach;
mod feed;
mod flip;
mod kill;

pub use attach::{Process1, attach_l, attach_r, identity};
pub use feed::{feed1_l, feed1_r, feed_l, feed_r};
pub use flip::flip;
pub use kill::{kill_by, kill_l, kill_r};

use crate::cause::Cause;

/// Which side (or both) a wye, or a dynamic request, is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
  L,
  R,
  Both,
}

/// The tagged union delivered to an [`Wye::AwaitBoth`] receiver.
pub enum ReceiveY<L, R, E> {
  ReceiveL(L),
  ReceiveR(R),
  HaltL(Cause<E>),
  HaltR(Cause<E>),
  HaltOne(Cause<E>),
}

type AwaitLRecv<L, R, O, E> =
  Box<dyn FnOnce(Result<L, Cause<E>>) -> Wye<L, R, O, E> + Send>;
type AwaitRRecv<L, R, O, E> =
  Box<dyn FnOnce(Result<R, Cause<E>>) -> Wye<L, R, O, E> + Send>;
type AwaitBothRecv<L, R, O, E> =
  Box<dyn FnOnce(ReceiveY<L, R, E>) -> Wye<L, R, O, E> + Send>;
type HaltHandler<L, R, O, E> = Box<dyn FnOnce(Cause<E>) -> Wye<L, R, O, E> + Send>;

/// A suspended two-input merge computation.
///
/// `L`/`R` are the two input element types, `O` the output element type, and
/// `E` the error payload carried by [`Cause::Error`]. Every continuation is a
/// boxed `FnOnce`, so a `Wye` value is consumed exactly once as it steps —
/// stepping always produces a *fresh* successor (see the module docs).
pub enum Wye<L, R, O, E> {
  /// A finite batch of output values, followed by the wye to run next.
  Emit(Vec<O>, Box<Wye<L, R, O, E>>),
  /// Waiting for a value (or failure) from the left side only.
  AwaitL(AwaitLRecv<L, R, O, E>, HaltHandler<L, R, O, E>),
  /// Waiting for a value (or failure) from the right side only.
  AwaitR(AwaitRRecv<L, R, O, E>, HaltHandler<L, R, O, E>),
  /// Waiting for whichever side produces a value (or fails) first.
  AwaitBoth(AwaitBothRecv<L, R, O, E>, HaltHandler<L, R, O, E>),
  /// Terminated; will never transition again.
  Done(Cause<E>),
}

impl<L, R, O, E> Wye<L, R, O, E> {
  /// `true` once the wye has reached [`Wye::Done`].
  pub fn is_done(&self) -> bool {
    matches!(self, Wye::Done(_))
  }
}

/// A wye that immediately emits `values` then continues as `next`.
pub fn emit<L, R, O, E>(values: Vec<O>, next: Wye<L, R, O, E>) -> Wye<L, R, O, E> {
  Wye::Emit(values, Box::new(next))
}

/// A wye that has already terminated with `cause`.
pub fn halt<L, R, O, E>(cause: Cause<E>) -> Wye<L, R, O, E> {
  Wye::Done(cause)
}

/// Awaits the left side; falls back to halting with the failure cause.
pub fn await_l<L, R, O, E>(
  recv: impl FnOnce(Result<L, Cause<E>>) -> Wye<L, R, O, E> + Send + 'static,
) -> Wye<L, R, O, E>
where
  L: 'static,
  R: 'static,
  O: 'static,
  E: 'static,
{
  await_l_or(recv, Wye::Done)
}

/// Awaits the left side with an explicit fallback continuation, invoked if
/// the wye is forced to halt from outside (see [`kill_l`]).
pub fn await_l_or<L, R, O, E>(
  recv: impl FnOnce(Result<L, Cause<E>>) -> Wye<L, R, O, E> + Send + 'static,
  on_halt: impl FnOnce(Cause<E>) -> Wye<L, R, O, E> + Send + 'static,
) -> Wye<L, R, O, E> {
  Wye::AwaitL(Box::new(recv), Box::new(on_halt))
}

/// Awaits the right side; falls back to halting with the failure cause.
pub fn await_r<L, R, O, E>(
  recv: impl FnOnce(Result<R, Cause<E>>) -> Wye<L, R, O, E> + Send + 'static,
) -> Wye<L, R, O, E>
where
  L: 'static,
  R: 'static,
  O: 'static,
  E: 'static,
{
  await_r_or(recv, Wye::Done)
}

/// Awaits the right side with an explicit fallback continuation.
pub fn await_r_or<L, R, O, E>(
  recv: impl FnOnce(Result<R, Cause<E>>) -> Wye<L, R, O, E> + Send + 'static,
  on_halt: impl FnOnce(Cause<E>) -> Wye<L, R, O, E> + Send + 'static,
) -> Wye<L, R, O, E> {
  Wye::AwaitR(Box::new(recv), Box::new(on_halt))
}

/// Awaits whichever side produces a value (or fails) first; falls back to
/// halting with the failure cause.
pub fn await_both<L, R, O, E>(
  recv: impl FnOnce(ReceiveY<L, R, E>) -> Wye<L, R, O, E> + Send + 'static,
) -> Wye<L, R, O, E>
where
  L: 'static,
  R: 'static,
  O: 'static,
  E: 'static,
{
  await_both_or(recv, Wye::Done)
}

/// Awaits both sides with an explicit fallback continuation.
pub fn await_both_or<L, R, O, E>(
  recv: impl FnOnce(ReceiveY<L, R, E>) -> Wye<L, R, O, E> + Send + 'static,
  on_halt: impl FnOnce(Cause<E>) -> Wye<L, R, O, E> + Send + 'static,
) -> Wye<L, R, O, E> {
  Wye::AwaitBoth(Box::new(recv), Box::new(on_halt))
}
