//! Swapping the two sides of a wye.

use super::{ReceiveY, Wye};

/// Swaps the left and right sides of `w`: every `AwaitL` becomes an `AwaitR`
/// and vice versa, and values seen on `AwaitBoth` are relabeled accordingly.
///
/// `flip` is an involution — `flip(flip(w))` behaves identically to `w`
/// (law 1 in `spec.md` §8) — because it only ever swaps a fresh pair of
/// continuations, each of which is itself wrapped in `flip` before being
/// handed back out.
pub fn flip<L, R, O, E>(w: Wye<L, R, O, E>) -> Wye<R, L, O, E>
where
  L: Send + 'static,
  R: Send + 'static,
  O: Send + 'static,
  E: Send + 'static,
{
  match w {
    Wye::Emit(values, next) => Wye::Emit(values, Box::new(flip(*next))),
    Wye::AwaitL(recv, on_halt) => {
      Wye::AwaitR(Box::new(move |r| flip(recv(r))), Box::new(move |c| flip(on_halt(c))))
    }
    Wye::AwaitR(recv, on_halt) => {
      Wye::AwaitL(Box::new(move |r| flip(recv(r))), Box::new(move |c| flip(on_halt(c))))
    }
    Wye::AwaitBoth(recv, on_halt) => Wye::AwaitBoth(
      Box::new(move |y| {
        let swapped = match y {
          ReceiveY::ReceiveL(l) => ReceiveY::ReceiveR(l),
          ReceiveY::ReceiveR(r) => ReceiveY::ReceiveL(r),
          ReceiveY::HaltL(c) => ReceiveY::HaltR(c),
          ReceiveY::HaltR(c) => ReceiveY::HaltL(c),
          ReceiveY::HaltOne(c) => ReceiveY::HaltOne(c),
        };
        flip(recv(swapped))
      }),
      Box::new(move |c| flip(on_halt(c))),
    ),
    Wye::Done(cause) => Wye::Done(cause),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::algebra::{await_l, await_r, emit, halt};
  use crate::cause::Cause;

  #[test]
  fn flip_swaps_await_sides() {
    let w: Wye<i32, &str, i32, &str> = await_l(|r| emit(vec![r.unwrap()], halt(Cause::End)));
    let flipped = flip(w);
    assert!(matches!(flipped, Wye::AwaitR(..)));
  }

  #[test]
  fn flip_is_involutive_on_done() {
    let w: Wye<i32, &str, i32, &str> = halt(Cause::End);
    let flipped = flip(flip(w));
    assert!(flipped.is_done());
  }

  #[test]
  fn flip_round_trip_delivers_expected_output() {
    let w: Wye<i32, &str, i32, &str> = await_l(|r| emit(vec![r.unwrap()], halt(Cause::End)));
    let round_tripped = flip(flip(w));
    match round_tripped {
      Wye::AwaitL(recv, _) => {
        let out = recv(Ok(7));
        match out {
          Wye::Emit(batch, tail) => {
            assert_eq!(batch, vec![7]);
            assert!(tail.is_done());
          }
          _ => panic!("expected emit"),
        }
      }
      _ => panic!("expected AwaitL after round trip"),
    }
  }

  #[test]
  fn flip_swaps_await_both_values() {
    let w: Wye<i32, &str, i32, &str> = super::super::await_both(|y| match y {
      ReceiveY::ReceiveL(v) => emit(vec![v], halt(Cause::End)),
      ReceiveY::ReceiveR(_) => emit(vec![-1], halt(Cause::End)),
      ReceiveY::HaltL(c) | ReceiveY::HaltR(c) | ReceiveY::HaltOne(c) => halt(c),
    });
    let flipped = flip(w);
    match flipped {
      Wye::AwaitBoth(recv, _) => match recv(ReceiveY::ReceiveR(9)) {
        Wye::Emit(batch, _) => assert_eq!(batch, vec![9]),
        _ => panic!("expected emit"),
      },
      _ => panic!("expected AwaitBoth"),
    }
  }
}
