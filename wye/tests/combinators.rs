//! Black-box checks of the constructor menu (component C), driven by
//! stepping the algebra directly rather than through the concurrent driver.

use std::time::Duration;

use wye::algebra::{Wye, feed1_l, feed_l, feed_r, kill_r};
use wye::cause::Cause;
use wye::combinators::{
  drain_l, drain_r, merge_halt_both, merge_halt_r, timed_queue, yip_l,
};

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

#[test]
fn merge_halt_both_stops_as_soon_as_either_side_ends() {
  let w: Wye<i32, i32, i32, &str> = merge_halt_both();
  let w = feed_l(vec![1, 2], w);
  let (out, w) = collect(w);
  assert_eq!(out, vec![1, 2]);

  let w = feed_r(Vec::new(), w);
  let w = kill_r(w, Cause::End);
  let (_, w) = collect(w);
  assert!(w.is_done());
}

#[test]
fn merge_halt_r_is_merge_halt_l_flipped() {
  let w: Wye<i32, i32, i32, &str> = merge_halt_r();
  let w = kill_r(w, Cause::End);
  let (_, w) = collect(w);
  assert!(w.is_done());
}

#[test]
fn yip_l_buffers_left_up_to_n_then_throttles() {
  let w: Wye<i32, &str, (i32, &str), &str> = yip_l(2);
  // Two left values fit in the buffer without emitting anything yet.
  let w = feed_l(vec![1, 2], w);
  let (out, w) = collect(w);
  assert!(out.is_empty());
  // A third left value is dropped by feed_l, since the wye is now awaiting
  // only the right side (buffer full).
  let w = feed_l(vec![3], w);
  assert!(matches!(w, Wye::AwaitR(..)));

  let w = feed_r(vec!["a", "b"], w);
  let (out, _) = collect(w);
  assert_eq!(out, vec![(1, "a"), (2, "b")]);
}

#[test]
fn drain_r_and_drain_l_are_mirror_images() {
  let forward: Wye<char, (), char, &str> = drain_r(1);
  let forward = feed_l(vec!['a'], forward);
  let forward = feed_r(vec![()], forward);
  let (out_forward, _) = collect(forward);

  let mirrored: Wye<(), char, char, &str> = drain_l(1);
  let mirrored = feed_r(vec!['a'], mirrored);
  let mirrored = feed_l(vec![()], mirrored);
  let (out_mirrored, _) = collect(mirrored);

  assert_eq!(out_forward, out_mirrored);
}

#[test]
fn timed_queue_throttles_right_once_backlog_is_full() {
  let w: Wye<Duration, i32, i32, &str> = timed_queue(Duration::from_secs(60), 2);
  // Two fresh age tokens fill the backlog (both well under max_age).
  let w = feed_l(vec![Duration::from_secs(1), Duration::from_secs(2)], w);
  // With the backlog full, the wye only awaits an ack on the left — any
  // right value offered now is dropped, never requested.
  assert!(matches!(w, Wye::AwaitL(..)));
  let w = feed_r(vec![99], w);
  assert!(matches!(w, Wye::AwaitL(..)));

  // Feeding an ack pops the oldest backlog entry and reopens both sides.
  let w = feed1_l(Duration::from_secs(3), w);
  assert!(!w.is_done());
}
