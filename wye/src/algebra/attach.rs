//! Pre-composing a single-input transducer onto one side of a wye.

use super::feed::feed_l;
use super::kill::{kill_by, kill_l, kill_r};
use super::{ReceiveY, Wye, await_both_or, await_l_or, emit};
use crate::cause::Cause;

type Process1Recv<I0, I, E> = Box<dyn FnOnce(Result<I0, Cause<E>>) -> Process1<I0, I, E> + Send>;
type Process1Halt<I0, I, E> = Box<dyn FnOnce(Cause<E>) -> Process1<I0, I, E> + Send>;

/// A suspended single-input transducer: the `attach_l`/`attach_r` half of
/// the algebra, turning an `I0`-stream into an `I`-stream before it ever
/// reaches a [`Wye`]. Shaped exactly like [`Wye`] minus the second input.
pub enum Process1<I0, I, E> {
  Emit(Vec<I>, Box<Process1<I0, I, E>>),
  Await(Process1Recv<I0, I, E>, Process1Halt<I0, I, E>),
  Done(Cause<E>),
}

/// The transducer that forwards every input unchanged.
pub fn identity<I, E>() -> Process1<I, I, E>
where
  I: Send + 'static,
  E: Send + 'static,
{
  Process1::Await(
    Box::new(|r| match r {
      Ok(v) => Process1::Emit(vec![v], Box::new(identity())),
      Err(cause) => Process1::Done(cause),
    }),
    Box::new(Process1::Done),
  )
}

/// Pre-composes `p` onto the left input of `w`: every `L0` value pulled in
/// from outside is first run through `p`, and whatever `p` emits is fed to
/// `w` as a batch via [`feed_l`] — so a single upstream value can make `w`
/// consume several, or none, of `p`'s output (the resolved bulk-delivery
/// semantics for this combinator).
///
/// Forcing the result to stop (killing its `L0` side from outside) halts it
/// directly rather than running `p`'s own finalizer — `p` is discarded along
/// with whatever it was about to produce.
pub fn attach_l<L0, L, R, O, E>(p: Process1<L0, L, E>, w: Wye<L, R, O, E>) -> Wye<L0, R, O, E>
where
  L0: Send + 'static,
  L: Send + 'static,
  R: Send + 'static,
  O: Send + 'static,
  E: Send + 'static,
{
  match p {
    Process1::Emit(batch, next) => attach_l(*next, feed_l(batch, w)),
    Process1::Done(cause) => kill_l(w, cause),
    Process1::Await(p_recv, p_on_halt) => match w {
      Wye::Done(c) => Wye::Done(c),

      // w has output ready regardless of what p is waiting for: pass it
      // through untouched and keep driving the same pending Await against
      // whatever w wants to do next.
      Wye::Emit(batch, next) => {
        emit(batch, attach_l(Process1::Await(p_recv, p_on_halt), *next))
      }

      Wye::AwaitR(w_recv, w_on_halt) => Wye::AwaitR(
        Box::new(move |r| attach_l(Process1::Await(p_recv, p_on_halt), w_recv(r))),
        w_on_halt,
      ),

      Wye::AwaitL(w_recv, w_on_halt) => await_l_or(
        move |r0| match r0 {
          Ok(v0) => match p_recv(Ok(v0)) {
            Process1::Emit(batch, next) => {
              attach_l(*next, feed_l(batch, Wye::AwaitL(w_recv, w_on_halt)))
            }
            Process1::Done(cause) => kill_l(Wye::AwaitL(w_recv, w_on_halt), cause),
            other @ Process1::Await(..) => attach_l(other, Wye::AwaitL(w_recv, w_on_halt)),
          },
          Err(cause) => {
            drop(p_on_halt);
            kill_l(Wye::AwaitL(w_recv, w_on_halt), cause)
          }
        },
        move |cause| Wye::Done(cause),
      ),

      Wye::AwaitBoth(w_recv, w_on_halt) => await_both_or(
        move |y| match y {
          ReceiveY::ReceiveL(v0) => match p_recv(Ok(v0)) {
            Process1::Emit(batch, next) => {
              attach_l(*next, feed_l(batch, Wye::AwaitBoth(w_recv, w_on_halt)))
            }
            Process1::Done(cause) => kill_l(Wye::AwaitBoth(w_recv, w_on_halt), cause),
            other @ Process1::Await(..) => attach_l(other, Wye::AwaitBoth(w_recv, w_on_halt)),
          },
          ReceiveY::ReceiveR(r) => {
            attach_l(Process1::Await(p_recv, p_on_halt), w_recv(ReceiveY::ReceiveR(r)))
          }
          ReceiveY::HaltL(cause) => attach_l(
            Process1::Await(p_recv, p_on_halt),
            kill_l(Wye::AwaitBoth(w_recv, w_on_halt), cause),
          ),
          ReceiveY::HaltR(cause) => attach_l(
            Process1::Await(p_recv, p_on_halt),
            kill_r(Wye::AwaitBoth(w_recv, w_on_halt), cause),
          ),
          ReceiveY::HaltOne(cause) => attach_l(
            Process1::Await(p_recv, p_on_halt),
            kill_by(Wye::AwaitBoth(w_recv, w_on_halt), cause),
          ),
        },
        move |cause| Wye::Done(cause),
      ),
    },
  }
}

/// Pre-composes `p` onto the right input of `w`, symmetric to [`attach_l`].
/// Implemented by flipping, attaching on the left, and flipping back.
pub fn attach_r<L, R0, R, O, E>(p: Process1<R0, R, E>, w: Wye<L, R, O, E>) -> Wye<L, R0, O, E>
where
  L: Send + 'static,
  R0: Send + 'static,
  R: Send + 'static,
  O: Send + 'static,
  E: Send + 'static,
{
  super::flip::flip(attach_l(p, super::flip::flip(w)))
}
