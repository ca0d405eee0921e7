//! Property checks for the pure algebra's stated laws.

use proptest::prelude::*;

use wye::algebra::{
  Process1, ReceiveY, Wye, attach_l, await_both, emit, feed_l, feed_r, flip, halt, identity, kill_l,
};
use wye::cause::Cause;
use wye::combinators::{Either, either, merge, merge_halt_both, yip, yip_l};

fn collect<L, R, O, E>(mut w: Wye<L, R, O, E>) -> (Vec<O>, Wye<L, R, O, E>) {
  let mut out = Vec::new();
  loop {
    match w {
      Wye::Emit(batch, next) => {
        out.extend(batch);
        w = *next;
      }
      other => return (out, other),
    }
  }
}

/// flip is an involution on a terminated wye: flipping twice is a no-op.
#[test]
fn flip_is_involutive() {
  let w: Wye<i32, i32, i32, &str> = halt(Cause::Error("boom"));
  let once = flip(w);
  let twice = flip(once);
  assert!(matches!(twice, Wye::Done(Cause::Error("boom"))));
}

proptest! {
  /// Feeding an empty batch never changes what a wye is waiting for.
  #[test]
  fn feed_empty_is_identity(vals in proptest::collection::vec(any::<i32>(), 0..5)) {
    let w: Wye<i32, i32, (i32, i32), &str> = yip();
    let w = feed_l(vals, w);
    let fed_again = feed_l(Vec::new(), w);
    prop_assert!(!fed_again.is_done());
  }

  /// Once kill_l has driven a wye to Done, killing it again is a no-op: the
  /// first cause wins and a second kill never reaches the terminal value.
  #[test]
  fn kill_l_on_done_is_a_no_op(_n in any::<i32>()) {
    let w: Wye<i32, i32, i32, &str> = merge_halt_both();
    let once = kill_l(w, Cause::End);
    prop_assert!(matches!(once, Wye::Done(Cause::Kill(_))));
    let twice = kill_l(once, Cause::Error("ignored"));
    prop_assert!(matches!(twice, Wye::Done(Cause::Kill(inner)) if matches!(*inner, Cause::End)));
  }

  /// merge() emits exactly the union of both inputs' values, modulo order.
  #[test]
  fn merge_output_is_multiset_union(
    ls in proptest::collection::vec(any::<i32>(), 0..8),
    rs in proptest::collection::vec(any::<i32>(), 0..8),
  ) {
    let w: Wye<i32, i32, i32, &str> = merge();
    let w = feed_l(ls.clone(), w);
    let (mut out, w) = collect(w);
    let w = feed_r(rs.clone(), w);
    let (more, w) = collect(w);
    out.extend(more);
    prop_assert!(!w.is_done());

    let mut expected: Vec<i32> = ls.into_iter().chain(rs).collect();
    let mut got = out;
    expected.sort_unstable();
    got.sort_unstable();
    prop_assert_eq!(expected, got);
  }

  /// either() never loses a value and tags it with the correct side.
  #[test]
  fn either_is_lossless_and_tagged(
    ls in proptest::collection::vec(any::<i32>(), 0..6),
    rs in proptest::collection::vec(any::<bool>(), 0..6),
  ) {
    let w: Wye<i32, bool, Either<i32, bool>, &str> = either();
    let w = feed_l(ls.clone(), w);
    let (mut out, w) = collect(w);
    let w = feed_r(rs.clone(), w);
    let (more, _) = collect(w);
    out.extend(more);

    let left_seen: Vec<i32> =
      out.iter().filter_map(|e| if let Either::Left(v) = e { Some(*v) } else { None }).collect();
    let right_seen: Vec<bool> =
      out.iter().filter_map(|e| if let Either::Right(v) = e { Some(*v) } else { None }).collect();
    prop_assert_eq!(left_seen, ls);
    prop_assert_eq!(right_seen, rs);
  }

  /// yip_l(n) never lets more than n left values sit unpaired.
  #[test]
  fn yip_l_respects_buffer_bound(n in 1usize..5, ls in proptest::collection::vec(any::<i32>(), 0..10)) {
    let w: Wye<i32, (), (i32, ()), &str> = yip_l(n);
    let w = feed_l(ls, w);
    // Whatever state it lands in, it must still either be awaiting (having
    // buffered at most n) or have emitted — never panicked draining past n.
    prop_assert!(!matches!(w, Wye::Emit(ref batch, _) if batch.len() > n));
  }
}

/// attach_l(identity, w) behaves exactly like w (category-theoretic identity law).
#[test]
fn attach_l_identity_is_transparent() {
  let w: Wye<i32, i32, i32, &str> = merge();
  let attached: Wye<i32, i32, i32, &str> = attach_l(identity(), w);
  let w2: Wye<i32, i32, i32, &str> = merge();

  let attached = feed_l(vec![1, 2], attached);
  let w2 = feed_l(vec![1, 2], w2);
  let (out_a, _) = collect(attached);
  let (out_b, _) = collect(w2);
  assert_eq!(out_a, out_b);
}

fn doubler() -> Process1<i32, i32, &'static str> {
  Process1::Await(
    Box::new(|r| match r {
      Ok(v) => Process1::Emit(vec![v * 2], Box::new(doubler())),
      Err(c) => Process1::Done(c),
    }),
    Box::new(Process1::Done),
  )
}

/// A Process1 that doubles every value transforms left input, fed through
/// merge(), before it's ever visible as output.
#[test]
fn attach_l_transforms_values_reaching_merge() {
  let w: Wye<i32, i32, i32, &str> = merge();
  let attached: Wye<i32, i32, i32, &str> = attach_l(doubler(), w);
  let attached = feed_l(vec![1, 2, 3], attached);
  let (out, _) = collect(attached);
  assert_eq!(out, vec![2, 4, 6]);
}

/// await_both's ReceiveY tagging round-trips through flip.
#[test]
fn flip_swaps_await_sides_observably() {
  let w: Wye<i32, &str, i32, &str> = await_both(|y| match y {
    ReceiveY::ReceiveL(v) => emit(vec![v], halt(Cause::End)),
    ReceiveY::ReceiveR(_) => emit(vec![-1], halt(Cause::End)),
    ReceiveY::HaltL(c) | ReceiveY::HaltR(c) | ReceiveY::HaltOne(c) => halt(c),
  });
  let flipped = flip(w);
  let flipped = feed_l(vec!["hi"], flipped);
  let (out, _) = collect(flipped);
  assert_eq!(out, vec![-1]);
}
