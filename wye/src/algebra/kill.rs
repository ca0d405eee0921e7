//! Forcing a wye, or one side of it, to stop.

use super::{ReceiveY, Wye, emit};
use crate::cause::Cause;

/// Forces `w` to stop as if the left side had just halted with `cause`.
///
/// If `w` is currently an `AwaitL`, its `on_halt` fallback runs directly. If
/// it's an `AwaitBoth`, the receiver is given `ReceiveY::HaltL(cause)` so it
/// can still decide to keep running off the right side alone. If `w` is
/// sitting on a pending `Emit`, the output is preserved in order and the
/// kill is carried through to the underlying Await. Anything else (`AwaitR`,
/// already `Done`) is unaffected — the kill only ever reaches in through the
/// side it targets (invariant 4 in `spec.md` §3).
///
/// `cause` is normalized through [`Cause::kill`] first, so repeated kills
/// never nest (law 4).
pub fn kill_l<L, R, O, E>(w: Wye<L, R, O, E>, cause: Cause<E>) -> Wye<L, R, O, E> {
  let cause = cause.kill();
  match w {
    Wye::Emit(batch, next) => emit(batch, kill_l(*next, cause)),
    Wye::AwaitL(_, on_halt) => on_halt(cause),
    Wye::AwaitBoth(recv, _) => recv(ReceiveY::HaltL(cause)),
    other => other,
  }
}

/// Symmetric to [`kill_l`], targeting the right side.
pub fn kill_r<L, R, O, E>(w: Wye<L, R, O, E>, cause: Cause<E>) -> Wye<L, R, O, E> {
  let cause = cause.kill();
  match w {
    Wye::Emit(batch, next) => emit(batch, kill_r(*next, cause)),
    Wye::AwaitR(_, on_halt) => on_halt(cause),
    Wye::AwaitBoth(recv, _) => recv(ReceiveY::HaltR(cause)),
    other => other,
  }
}

/// Forces `w` to stop regardless of which side it's awaiting: an `AwaitL` or
/// `AwaitR` runs its own `on_halt`, an `AwaitBoth` is given
/// `ReceiveY::HaltOne(cause)` (neither side in particular, per
/// `spec.md` §3's `kill_by` entry), a pending `Emit` is carried through the
/// same way as in [`kill_l`]/[`kill_r`], and a `Done` wye is left untouched.
pub fn kill_by<L, R, O, E>(w: Wye<L, R, O, E>, cause: Cause<E>) -> Wye<L, R, O, E> {
  let cause = cause.kill();
  match w {
    Wye::Emit(batch, next) => emit(batch, kill_by(*next, cause)),
    Wye::AwaitL(_, on_halt) | Wye::AwaitR(_, on_halt) => on_halt(cause),
    Wye::AwaitBoth(recv, _) => recv(ReceiveY::HaltOne(cause)),
    other => other,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::algebra::{await_both, await_l_or, await_r, halt};

  #[test]
  fn kill_l_invokes_on_halt_fallback() {
    let w: Wye<i32, i32, i32, &str> =
      await_l_or(|_| halt(Cause::End), |c| halt(c));
    let killed = kill_l(w, Cause::End);
    match killed {
      Wye::Done(Cause::Kill(inner)) => assert!(matches!(*inner, Cause::End)),
      _ => panic!("expected Done(Kill(End))"),
    }
  }

  #[test]
  fn kill_l_leaves_await_r_untouched() {
    let w: Wye<i32, i32, i32, &str> = await_r(|_| halt(Cause::End));
    let killed = kill_l(w, Cause::End);
    assert!(matches!(killed, Wye::AwaitR(..)));
  }

  #[test]
  fn kill_l_delivers_halt_l_to_await_both() {
    let w: Wye<i32, i32, i32, &str> = await_both(|y| match y {
      ReceiveY::HaltL(c) => halt(c),
      _ => halt(Cause::End),
    });
    let killed = kill_l(w, Cause::End);
    assert!(matches!(killed, Wye::Done(Cause::Kill(_))));
  }

  #[test]
  fn kill_l_carries_through_a_pending_emit() {
    use crate::algebra::emit;

    let w: Wye<i32, i32, i32, &str> = emit(
      vec![1, 2],
      await_both(|y| match y {
        ReceiveY::HaltL(c) => halt(c),
        _ => halt(Cause::End),
      }),
    );
    let killed = kill_l(w, Cause::End);
    match killed {
      Wye::Emit(batch, next) => {
        assert_eq!(batch, vec![1, 2]);
        assert!(matches!(*next, Wye::Done(Cause::Kill(_))));
      }
      _ => panic!("expected the emitted batch to survive the kill"),
    }
  }

  #[test]
  fn kill_normalizes_repeated_kills() {
    let w: Wye<i32, i32, i32, &str> = await_l_or(|_| halt(Cause::End), |c| halt(c));
    let once = kill_l(w, Cause::End);
    let again = match once {
      Wye::Done(c) => kill_by(halt(c), Cause::End),
      other => other,
    };
    match again {
      Wye::Done(Cause::Kill(inner)) => assert!(matches!(*inner, Cause::End)),
      _ => panic!("expected single Kill layer"),
    }
  }
}
