//! The constructor menu built on top of the pure algebra (component C).
//!
//! Every constructor here is a plain reduction to `await_l`/`await_r`/
//! `await_both`/`emit`/`halt` — nothing in this module reaches into the
//! driver or touches effects.

use std::collections::VecDeque;
use std::time::Duration;

use crate::algebra::{ReceiveY, Request, Wye, await_both, await_l, await_r, emit, halt};
use crate::cause::Cause;

/// The output of [`either`]: a value tagged with the side it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Either<A, B> {
  Left(A),
  Right(B),
}

/// Emits any value from either side; halts once *both* sides have halted.
pub fn merge<T, E>() -> Wye<T, T, T, E>
where
  T: Send + 'static,
  E: Send + 'static,
{
  await_both(|y| match y {
    ReceiveY::ReceiveL(v) => emit(vec![v], merge()),
    ReceiveY::ReceiveR(v) => emit(vec![v], merge()),
    ReceiveY::HaltL(_) => drain_right_only(),
    ReceiveY::HaltR(_) => drain_left_only(),
    ReceiveY::HaltOne(c) => halt(c),
  })
}

fn drain_left_only<T, E>() -> Wye<T, T, T, E>
where
  T: Send + 'static,
  E: Send + 'static,
{
  await_l(|r| match r {
    Ok(v) => emit(vec![v], drain_left_only()),
    Err(c) => halt(c),
  })
}

fn drain_right_only<T, E>() -> Wye<T, T, T, E>
where
  T: Send + 'static,
  E: Send + 'static,
{
  await_r(|r| match r {
    Ok(v) => emit(vec![v], drain_right_only()),
    Err(c) => halt(c),
  })
}

/// As [`merge`], but halts as soon as *either* side halts.
pub fn merge_halt_both<T, E>() -> Wye<T, T, T, E>
where
  T: Send + 'static,
  E: Send + 'static,
{
  await_both(|y| match y {
    ReceiveY::ReceiveL(v) => emit(vec![v], merge_halt_both()),
    ReceiveY::ReceiveR(v) => emit(vec![v], merge_halt_both()),
    ReceiveY::HaltL(c) | ReceiveY::HaltR(c) | ReceiveY::HaltOne(c) => halt(c),
  })
}

/// Halts the instant the left side halts; keeps draining the right side
/// alone if it halts first.
pub fn merge_halt_l<T, E>() -> Wye<T, T, T, E>
where
  T: Send + 'static,
  E: Send + 'static,
{
  await_both(|y| match y {
    ReceiveY::ReceiveL(v) => emit(vec![v], merge_halt_l()),
    ReceiveY::ReceiveR(v) => emit(vec![v], merge_halt_l()),
    ReceiveY::HaltL(c) => halt(c),
    ReceiveY::HaltR(_) => drain_left_only(),
    ReceiveY::HaltOne(c) => halt(c),
  })
}

/// Halts the instant the right side halts; symmetric to [`merge_halt_l`].
pub fn merge_halt_r<T, E>() -> Wye<T, T, T, E>
where
  T: Send + 'static,
  E: Send + 'static,
{
  crate::algebra::flip(merge_halt_l())
}

/// Tags every value with the side it arrived from; halts when both halt.
pub fn either<A, B, E>() -> Wye<A, B, Either<A, B>, E>
where
  A: Send + 'static,
  B: Send + 'static,
  E: Send + 'static,
{
  await_both(|y| match y {
    ReceiveY::ReceiveL(v) => emit(vec![Either::Left(v)], either()),
    ReceiveY::ReceiveR(v) => emit(vec![Either::Right(v)], either()),
    ReceiveY::HaltL(_) => either_drain_right(),
    ReceiveY::HaltR(_) => either_drain_left(),
    ReceiveY::HaltOne(c) => halt(c),
  })
}

fn either_drain_left<A, B, E>() -> Wye<A, B, Either<A, B>, E>
where
  A: Send + 'static,
  B: Send + 'static,
  E: Send + 'static,
{
  await_l(|r| match r {
    Ok(v) => emit(vec![Either::Left(v)], either_drain_left()),
    Err(c) => halt(c),
  })
}

fn either_drain_right<A, B, E>() -> Wye<A, B, Either<A, B>, E>
where
  A: Send + 'static,
  B: Send + 'static,
  E: Send + 'static,
{
  await_r(|r| match r {
    Ok(v) => emit(vec![Either::Right(v)], either_drain_right()),
    Err(c) => halt(c),
  })
}

/// Pairwise zip with a combining function; halts the moment either side
/// halts, producing exactly `min(|L|, |R|)` outputs.
pub fn yip_with<A, B, O, E, F>(f: F) -> Wye<A, B, O, E>
where
  F: Fn(A, B) -> O + Send + 'static,
  A: Send + 'static,
  B: Send + 'static,
  O: Send + 'static,
  E: Send + 'static,
{
  await_both(move |y| match y {
    ReceiveY::ReceiveL(a) => await_r(move |r| match r {
      Ok(b) => emit(vec![f(a, b)], yip_with(f)),
      Err(c) => halt(c),
    }),
    ReceiveY::ReceiveR(b) => await_l(move |r| match r {
      Ok(a) => emit(vec![f(a, b)], yip_with(f)),
      Err(c) => halt(c),
    }),
    ReceiveY::HaltL(c) | ReceiveY::HaltR(c) | ReceiveY::HaltOne(c) => halt(c),
  })
}

/// `yip_with` specialized to plain pairing.
pub fn yip<A, B, E>() -> Wye<A, B, (A, B), E>
where
  A: Send + 'static,
  B: Send + 'static,
  E: Send + 'static,
{
  yip_with(|a, b| (a, b))
}

/// Left-biased buffered zip: left may run up to `n` values ahead of right
/// before being throttled. Empty buffer reads left only; a full buffer (`n`
/// items) reads right only; otherwise both sides are read in parallel.
pub fn yip_with_l<A, B, O, E, F>(n: usize, f: F) -> Wye<A, B, O, E>
where
  F: Fn(A, B) -> O + Send + 'static,
  A: Send + 'static,
  B: Send + 'static,
  O: Send + 'static,
  E: Send + 'static,
{
  yip_with_l_step(n, f, VecDeque::new())
}

fn yip_with_l_step<A, B, O, E, F>(n: usize, f: F, mut buffer: VecDeque<A>) -> Wye<A, B, O, E>
where
  F: Fn(A, B) -> O + Send + 'static,
  A: Send + 'static,
  B: Send + 'static,
  O: Send + 'static,
  E: Send + 'static,
{
  if buffer.is_empty() {
    await_l(move |r| match r {
      Ok(a) => {
        buffer.push_back(a);
        yip_with_l_step(n, f, buffer)
      }
      Err(c) => halt(c),
    })
  } else if buffer.len() >= n {
    await_r(move |r| match r {
      Ok(b) => {
        let a = buffer.pop_front().expect("buffer non-empty");
        emit(vec![f(a, b)], yip_with_l_step(n, f, buffer))
      }
      Err(c) => halt(c),
    })
  } else {
    await_both(move |y| match y {
      ReceiveY::ReceiveL(a) => {
        buffer.push_back(a);
        yip_with_l_step(n, f, buffer)
      }
      ReceiveY::ReceiveR(b) => {
        let a = buffer.pop_front().expect("buffer non-empty");
        emit(vec![f(a, b)], yip_with_l_step(n, f, buffer))
      }
      ReceiveY::HaltL(c) | ReceiveY::HaltR(c) | ReceiveY::HaltOne(c) => halt(c),
    })
  }
}

/// `yip_with_l` specialized to plain pairing.
pub fn yip_l<A, B, E>(n: usize) -> Wye<A, B, (A, B), E>
where
  A: Send + 'static,
  B: Send + 'static,
  E: Send + 'static,
{
  yip_with_l(n, |a, b| (a, b))
}

/// Passes right through, treating left as `n` unacknowledged-item tokens:
/// right is throttled once `n` items are outstanding.
pub fn bounded_queue<Ack, I, E>(n: usize) -> Wye<Ack, I, I, E>
where
  Ack: Send + 'static,
  I: Send + 'static,
  E: Send + 'static,
{
  yip_with_l(n, |_ack: Ack, i: I| i)
}

/// Emits everything from the right side, treating the left side as a pure
/// kill-switch: the instant it produces *any* value, the whole combinator
/// halts immediately, even though that value is otherwise discarded.
pub fn unbounded_queue<Ack, I, E>() -> Wye<Ack, I, I, E>
where
  Ack: Send + 'static,
  I: Send + 'static,
  E: Send + 'static,
{
  await_both(|y| match y {
    ReceiveY::ReceiveL(_) => halt(Cause::End),
    ReceiveY::ReceiveR(v) => emit(vec![v], unbounded_queue()),
    ReceiveY::HaltL(c) | ReceiveY::HaltR(c) | ReceiveY::HaltOne(c) => halt(c),
  })
}

/// Echoes left through as output, using right as `n` unacknowledged-item
/// backpressure tokens.
pub fn drain_r<Ack, I, E>(n: usize) -> Wye<I, Ack, I, E>
where
  Ack: Send + 'static,
  I: Send + 'static,
  E: Send + 'static,
{
  yip_with_l(n, |i: I, _ack: Ack| i)
}

/// `flip(drain_r(n))`.
pub fn drain_l<Ack, I, E>(n: usize) -> Wye<Ack, I, I, E>
where
  Ack: Send + 'static,
  I: Send + 'static,
  E: Send + 'static,
{
  crate::algebra::flip(drain_r(n))
}

/// The first left value seeds the echo; every subsequent right arrival
/// re-emits the most recently seen left value. Halts when either side
/// halts.
pub fn echo_left<A, Any, E>() -> Wye<A, Any, A, E>
where
  A: Clone + Send + 'static,
  Any: Send + 'static,
  E: Send + 'static,
{
  await_l(|r| match r {
    Ok(a0) => echo_left_loop(a0),
    Err(c) => halt(c),
  })
}

fn echo_left_loop<A, Any, E>(last: A) -> Wye<A, Any, A, E>
where
  A: Clone + Send + 'static,
  Any: Send + 'static,
  E: Send + 'static,
{
  await_both(move |y| match y {
    ReceiveY::ReceiveL(a) => echo_left_loop(a),
    ReceiveY::ReceiveR(_) => emit(vec![last.clone()], echo_left_loop(last)),
    ReceiveY::HaltL(c) | ReceiveY::HaltR(c) | ReceiveY::HaltOne(c) => halt(c),
  })
}

/// Passes the right side through unchanged; halts as soon as the left side
/// emits `true`.
pub fn interrupt<I, E>() -> Wye<bool, I, I, E>
where
  I: Send + 'static,
  E: Send + 'static,
{
  await_both(|y| match y {
    ReceiveY::ReceiveL(true) => halt(Cause::End),
    ReceiveY::ReceiveL(false) => interrupt(),
    ReceiveY::ReceiveR(v) => emit(vec![v], interrupt()),
    ReceiveY::HaltL(c) | ReceiveY::HaltR(c) | ReceiveY::HaltOne(c) => halt(c),
  })
}

/// Left supplies the age of the oldest outstanding right item, as a
/// `Duration`; right is only throttled once `max_size` items are
/// outstanding *and* the oldest one hasn't yet aged past `max_age` (an aged
/// entry is dropped from the backlog the moment it's next observed,
/// immediately freeing a slot).
pub fn timed_queue<I, E>(max_age: Duration, max_size: usize) -> Wye<Duration, I, I, E>
where
  I: Send + 'static,
  E: Send + 'static,
{
  timed_queue_step(max_age, max_size, VecDeque::new())
}

fn timed_queue_step<I, E>(
  max_age: Duration,
  max_size: usize,
  mut pending: VecDeque<Duration>,
) -> Wye<Duration, I, I, E>
where
  I: Send + 'static,
  E: Send + 'static,
{
  while pending.front().is_some_and(|age| *age >= max_age) {
    pending.pop_front();
  }
  if pending.len() >= max_size {
    await_l(move |r| match r {
      Ok(_expired_ack) => {
        pending.pop_front();
        timed_queue_step(max_age, max_size, pending)
      }
      Err(c) => halt(c),
    })
  } else {
    await_both(move |y| match y {
      ReceiveY::ReceiveL(age) => {
        pending.push_back(age);
        timed_queue_step(max_age, max_size, pending)
      }
      ReceiveY::ReceiveR(v) => emit(vec![v], timed_queue_step(max_age, max_size, pending)),
      ReceiveY::HaltL(c) | ReceiveY::HaltR(c) | ReceiveY::HaltOne(c) => halt(c),
    })
  }
}

/// Begins by reading left; after each value, consults `f` (for a left
/// value) or `g` (for a right value) to decide which side to query next.
pub fn dynamic<I, J, E, F, G>(f: F, g: G) -> Wye<I, J, ReceiveY<I, J, E>, E>
where
  F: Fn(&I) -> Request + Send + 'static,
  G: Fn(&J) -> Request + Send + 'static,
  I: Send + 'static,
  J: Send + 'static,
  E: Send + 'static,
{
  dynamic_step(Request::L, f, g)
}

fn dynamic_step<I, J, E, F, G>(current: Request, f: F, g: G) -> Wye<I, J, ReceiveY<I, J, E>, E>
where
  F: Fn(&I) -> Request + Send + 'static,
  G: Fn(&J) -> Request + Send + 'static,
  I: Send + 'static,
  J: Send + 'static,
  E: Send + 'static,
{
  match current {
    Request::L => await_l(move |r| match r {
      Ok(v) => {
        let next = f(&v);
        emit(vec![ReceiveY::ReceiveL(v)], dynamic_step(next, f, g))
      }
      Err(c) => halt(c),
    }),
    Request::R => await_r(move |r| match r {
      Ok(v) => {
        let next = g(&v);
        emit(vec![ReceiveY::ReceiveR(v)], dynamic_step(next, f, g))
      }
      Err(c) => halt(c),
    }),
    Request::Both => await_both(move |y| match y {
      ReceiveY::ReceiveL(v) => {
        let next = f(&v);
        emit(vec![ReceiveY::ReceiveL(v)], dynamic_step(next, f, g))
      }
      ReceiveY::ReceiveR(v) => {
        let next = g(&v);
        emit(vec![ReceiveY::ReceiveR(v)], dynamic_step(next, f, g))
      }
      ReceiveY::HaltL(c) | ReceiveY::HaltR(c) | ReceiveY::HaltOne(c) => halt(c),
    }),
  }
}

/// `dynamic` specialized to both sides carrying the same type: `f` decides
/// the next side regardless of which one just produced, and the `ReceiveY`
/// wrapper is unwrapped back to a plain `I`.
pub fn dynamic1<I, E, F>(f: F) -> Wye<I, I, I, E>
where
  F: Fn(&I) -> Request + Send + 'static,
  I: Send + 'static,
  E: Send + 'static,
{
  dynamic1_step(Request::L, f)
}

fn dynamic1_step<I, E, F>(current: Request, f: F) -> Wye<I, I, I, E>
where
  F: Fn(&I) -> Request + Send + 'static,
  I: Send + 'static,
  E: Send + 'static,
{
  match current {
    Request::L => await_l(move |r| match r {
      Ok(v) => {
        let next = f(&v);
        emit(vec![v], dynamic1_step(next, f))
      }
      Err(c) => halt(c),
    }),
    Request::R => await_r(move |r| match r {
      Ok(v) => {
        let next = f(&v);
        emit(vec![v], dynamic1_step(next, f))
      }
      Err(c) => halt(c),
    }),
    Request::Both => await_both(move |y| match y {
      ReceiveY::ReceiveL(v) | ReceiveY::ReceiveR(v) => {
        let next = f(&v);
        emit(vec![v], dynamic1_step(next, f))
      }
      ReceiveY::HaltL(c) | ReceiveY::HaltR(c) | ReceiveY::HaltOne(c) => halt(c),
    }),
  }
}
