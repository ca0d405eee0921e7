//! Delivering input batches into a wye.

use super::{ReceiveY, Wye, emit};

/// Delivers `values` into `w`, stepping it until either the sequence is
/// exhausted, `w` halts, or `w` is found awaiting only the opposite side — in
/// which case the remaining input is dropped (it was never requested).
///
/// Any output emitted along the way is accumulated and prepended to the
/// returned wye, so the caller can consume it immediately without stepping
/// again. `feed_l(vec![], w)` is exactly `w` (law 2 in `spec.md` §8).
pub fn feed_l<L, R, O, E>(values: Vec<L>, w: Wye<L, R, O, E>) -> Wye<L, R, O, E> {
  let mut input = values.into_iter();
  let mut current = w;
  let mut emitted: Vec<O> = Vec::new();

  let tail = loop {
    current = match current {
      Wye::Emit(batch, next) => {
        emitted.extend(batch);
        *next
      }
      Wye::AwaitL(recv, on_halt) => match input.next() {
        Some(v) => recv(Ok(v)),
        None => break Wye::AwaitL(recv, on_halt),
      },
      Wye::AwaitBoth(recv, on_halt) => match input.next() {
        Some(v) => recv(ReceiveY::ReceiveL(v)),
        None => break Wye::AwaitBoth(recv, on_halt),
      },
      // Awaits only the opposite side, or has already halted: nothing more
      // to deliver, the rest of `values` was never requested.
      other @ (Wye::AwaitR(..) | Wye::Done(_)) => break other,
    };
  };

  if emitted.is_empty() { tail } else { emit(emitted, tail) }
}

/// Symmetric to [`feed_l`], delivering `values` to the right side.
pub fn feed_r<L, R, O, E>(values: Vec<R>, w: Wye<L, R, O, E>) -> Wye<L, R, O, E> {
  let mut input = values.into_iter();
  let mut current = w;
  let mut emitted: Vec<O> = Vec::new();

  let tail = loop {
    current = match current {
      Wye::Emit(batch, next) => {
        emitted.extend(batch);
        *next
      }
      Wye::AwaitR(recv, on_halt) => match input.next() {
        Some(v) => recv(Ok(v)),
        None => break Wye::AwaitR(recv, on_halt),
      },
      Wye::AwaitBoth(recv, on_halt) => match input.next() {
        Some(v) => recv(ReceiveY::ReceiveR(v)),
        None => break Wye::AwaitBoth(recv, on_halt),
      },
      other @ (Wye::AwaitL(..) | Wye::Done(_)) => break other,
    };
  };

  if emitted.is_empty() { tail } else { emit(emitted, tail) }
}

/// Delivers a single left value — the shape `attach_l` needs when forwarding
/// one element at a time from its pre-processor.
pub fn feed1_l<L, R, O, E>(value: L, w: Wye<L, R, O, E>) -> Wye<L, R, O, E> {
  feed_l(vec![value], w)
}

/// Delivers a single right value, symmetric to [`feed1_l`].
pub fn feed1_r<L, R, O, E>(value: R, w: Wye<L, R, O, E>) -> Wye<L, R, O, E> {
  feed_r(vec![value], w)
}
