//! The single actor that owns a wye's mutable state and drives its sources.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};

use crate::algebra::{Wye, feed_l, feed_r, kill_by, kill_l, kill_r};
use crate::cause::Cause;
use crate::error::WyeError;
use crate::sync::Mutex;

use super::source::{CancelHandle, Respond, Source, SourceOutcome};
use super::strategy::Strategy;

/// Where the first driver panic observed for this run is recorded, shared
/// between the actor and its [`super::WyeStream`].
pub(super) type PanicSlot = Arc<Mutex<Option<WyeError>>>;

#[cfg(feature = "tracing")]
macro_rules! trace_actor {
  ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}
#[cfg(not(feature = "tracing"))]
macro_rules! trace_actor {
  ($($arg:tt)*) => {};
}

/// What a pending `Get` eventually resolves to: a non-empty output batch, or
/// the terminal cause once the merge is fully done.
pub type GetResult<O, E> = Result<Vec<O>, Cause<E>>;

enum SideState<T, E> {
  Ready(Box<dyn Source<T, E>>),
  Running(CancelHandle<E>),
  Done(Cause<E>),
}

/// Messages the actor's mailbox carries. Every field is owned so messages
/// cross the `crossbeam_channel` without borrowing back into the actor.
pub enum Msg<L, R, O, E> {
  ReadyL(Vec<L>, Box<dyn Source<L, E>>),
  ReadyR(Vec<R>, Box<dyn Source<R, E>>),
  DoneL(Cause<E>),
  DoneR(Cause<E>),
  Get(Box<dyn FnOnce(GetResult<O, E>) + Send>),
  Terminate(Cause<E>, Box<dyn FnOnce() + Send>),
}

fn record_panic(slot: &PanicSlot, which: &'static str) {
  let mut slot = slot.lock();
  if slot.is_none() {
    *slot = Some(WyeError::StrategyPanicked { which });
  }
}

/// Runs `source.request(respond)` on whatever thread `strategy` picks. If
/// the call panics, `respond` is lost along with it — there is no way to
/// call a closure that was moved into a panicking call — so the panic is
/// recorded into `panic_slot` and `on_panic` runs instead, to let the actor
/// give up on this side rather than wait forever for a message that can
/// now never arrive.
fn launch<T, E>(
  strategy: &Arc<dyn Strategy>,
  source: Box<dyn Source<T, E>>,
  respond: Respond<T, E>,
  panic_slot: PanicSlot,
  which: &'static str,
  on_panic: impl FnOnce() + Send + 'static,
) -> CancelHandle<E>
where
  T: Send + 'static,
  E: Send + 'static,
{
  let (handle_tx, handle_rx) = crossbeam_channel::bounded(1);
  strategy.execute(Box::new(move || {
    match panic::catch_unwind(AssertUnwindSafe(|| source.request(respond))) {
      Ok(handle) => {
        let _ = handle_tx.send(handle);
      }
      Err(_) => {
        record_panic(&panic_slot, which);
        let _ = handle_tx.send(CancelHandle::noop());
        on_panic();
      }
    }
  }));
  handle_rx.recv().expect("source dropped its respond callback without returning a handle")
}

pub(super) struct Actor<L, R, O, E> {
  yy: Wye<L, R, O, E>,
  out: Option<Box<dyn FnOnce(GetResult<O, E>) + Send>>,
  left: SideState<L, E>,
  right: SideState<R, E>,
  left_bias: bool,
  strategy: Arc<dyn Strategy>,
  sender: Sender<Msg<L, R, O, E>>,
  terminating: Option<Box<dyn FnOnce() + Send>>,
  halted: bool,
  panic_slot: PanicSlot,
}

impl<L, R, O, E> Actor<L, R, O, E>
where
  L: Send + 'static,
  R: Send + 'static,
  O: Send + 'static,
  E: Clone + Send + 'static,
{
  pub(super) fn run(
    yy: Wye<L, R, O, E>,
    left: Box<dyn Source<L, E>>,
    right: Box<dyn Source<R, E>>,
    strategy: Arc<dyn Strategy>,
    sender: Sender<Msg<L, R, O, E>>,
    receiver: Receiver<Msg<L, R, O, E>>,
    panic_slot: PanicSlot,
  ) {
    let mut actor = Actor {
      yy,
      out: None,
      left: SideState::Ready(left),
      right: SideState::Ready(right),
      left_bias: true,
      strategy,
      sender,
      terminating: None,
      halted: false,
      panic_slot,
    };
    actor.try_complete();
    while let Ok(msg) = receiver.recv() {
      actor.handle(msg);
      if actor.halted {
        break;
      }
    }
  }

  fn handle(&mut self, msg: Msg<L, R, O, E>) {
    match msg {
      Msg::ReadyL(batch, next) => {
        trace_actor!(count = batch.len(), "wye actor: ReadyL");
        self.left = SideState::Ready(next);
        self.left_bias = false;
        let yy = std::mem::replace(&mut self.yy, Wye::Done(Cause::End));
        self.yy = self.guarded("left", move || feed_l(batch, yy));
        self.try_complete();
      }
      Msg::ReadyR(batch, next) => {
        trace_actor!(count = batch.len(), "wye actor: ReadyR");
        self.right = SideState::Ready(next);
        self.left_bias = true;
        let yy = std::mem::replace(&mut self.yy, Wye::Done(Cause::End));
        self.yy = self.guarded("right", move || feed_r(batch, yy));
        self.try_complete();
      }
      Msg::DoneL(cause) => {
        trace_actor!("wye actor: DoneL");
        self.left_bias = false;
        self.left = SideState::Done(cause.clone());
        let yy = std::mem::replace(&mut self.yy, Wye::Done(Cause::End));
        self.yy = self.guarded("left", move || kill_l(yy, cause));
        self.try_complete();
      }
      Msg::DoneR(cause) => {
        trace_actor!("wye actor: DoneR");
        self.left_bias = true;
        self.right = SideState::Done(cause.clone());
        let yy = std::mem::replace(&mut self.yy, Wye::Done(Cause::End));
        self.yy = self.guarded("right", move || kill_r(yy, cause));
        self.try_complete();
      }
      Msg::Get(cb) => {
        self.out = Some(cb);
        self.try_complete();
      }
      Msg::Terminate(cause, cb) => {
        trace_actor!("wye actor: Terminate");
        self.terminating = Some(cb);
        let yy = std::mem::replace(&mut self.yy, Wye::Done(Cause::End));
        self.yy = self.guarded("both", move || kill_by(yy, cause));
        self.try_complete();
      }
    }
  }

  /// Records any caught panic from `f` into the shared panic slot, and
  /// falls back to a bare `Done(Cause::End)` so the actor can still reach a
  /// terminal state. `which` is the tag `WyeStream::take_driver_error`'s
  /// caller sees: the side whose receiver or combining function panicked,
  /// or `"both"` for a panic while stepping an `AwaitBoth`.
  fn guarded(&self, which: &'static str, f: impl FnOnce() -> Wye<L, R, O, E>) -> Wye<L, R, O, E> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
      Ok(yy) => yy,
      Err(_) => {
        record_panic(&self.panic_slot, which);
        Wye::Done(Cause::End)
      }
    }
  }

  /// Steps `self.yy` as far as it can go without more external input,
  /// delivering emits to `self.out` and launching `Ready` sides as the wye
  /// demands them.
  fn try_complete(&mut self) {
    loop {
      let yy = std::mem::replace(&mut self.yy, Wye::Done(Cause::End));
      match yy {
        Wye::Emit(batch, next) if batch.is_empty() => {
          self.yy = *next;
        }
        Wye::Emit(batch, next) => match self.out.take() {
          Some(cb) => {
            cb(Ok(batch));
            self.yy = *next;
          }
          None => {
            self.yy = Wye::Emit(batch, next);
            break;
          }
        },
        Wye::AwaitL(recv, on_halt) => {
          self.yy = Wye::AwaitL(recv, on_halt);
          self.try_run_l();
          break;
        }
        Wye::AwaitR(recv, on_halt) => {
          self.yy = Wye::AwaitR(recv, on_halt);
          self.try_run_r();
          break;
        }
        Wye::AwaitBoth(recv, on_halt) => {
          if let (SideState::Done(lc), SideState::Done(_)) = (&self.left, &self.right) {
            let cause = lc.clone();
            self.yy = self.guarded("both", move || kill_by(Wye::AwaitBoth(recv, on_halt), cause));
            continue;
          }
          self.yy = Wye::AwaitBoth(recv, on_halt);
          if self.left_bias {
            self.try_run_l();
            self.try_run_r();
          } else {
            self.try_run_r();
            self.try_run_l();
          }
          break;
        }
        Wye::Done(cause) => {
          self.yy = Wye::Done(cause.clone());
          self.terminate_l(cause.clone());
          self.terminate_r(cause.clone());
          let both_done =
            matches!(self.left, SideState::Done(_)) && matches!(self.right, SideState::Done(_));
          if both_done {
            if let Some(cb) = self.out.take() {
              cb(Err(cause));
            }
            self.halted = true;
            if let Some(cb) = self.terminating.take() {
              cb();
            }
          }
          break;
        }
      }
    }
  }

  fn try_run_l(&mut self) {
    let side = std::mem::replace(&mut self.left, SideState::Running(CancelHandle::noop()));
    self.left = match side {
      SideState::Ready(source) => {
        let sender = self.sender.clone();
        let respond: Respond<L, E> = Box::new(move |outcome| {
          let msg = match outcome {
            SourceOutcome::Ready(batch, next) => Msg::ReadyL(batch, next),
            SourceOutcome::Done(cause) => Msg::DoneL(cause),
          };
          let _ = sender.send(msg);
        });
        let on_panic_sender = self.sender.clone();
        let handle = launch(
          &self.strategy,
          source,
          respond,
          Arc::clone(&self.panic_slot),
          "left",
          move || {
            let _ = on_panic_sender.send(Msg::DoneL(Cause::End));
          },
        );
        SideState::Running(handle)
      }
      other => other,
    };
  }

  fn try_run_r(&mut self) {
    let side = std::mem::replace(&mut self.right, SideState::Running(CancelHandle::noop()));
    self.right = match side {
      SideState::Ready(source) => {
        let sender = self.sender.clone();
        let respond: Respond<R, E> = Box::new(move |outcome| {
          let msg = match outcome {
            SourceOutcome::Ready(batch, next) => Msg::ReadyR(batch, next),
            SourceOutcome::Done(cause) => Msg::DoneR(cause),
          };
          let _ = sender.send(msg);
        });
        let on_panic_sender = self.sender.clone();
        let handle = launch(
          &self.strategy,
          source,
          respond,
          Arc::clone(&self.panic_slot),
          "right",
          move || {
            let _ = on_panic_sender.send(Msg::DoneR(Cause::End));
          },
        );
        SideState::Running(handle)
      }
      other => other,
    };
  }

  /// `Ready` sides that were never asked to produce anything finalize
  /// immediately — `request` was never called, so there is no in-flight
  /// call to run a kill-path against; dropping the boxed `Source` here is
  /// its shutdown hook. `Running` sides are asked to interrupt and stay
  /// `Running` until they post their own `DoneL`/`DoneR`.
  fn terminate_l(&mut self, cause: Cause<E>) {
    let side = std::mem::replace(&mut self.left, SideState::Done(Cause::End));
    self.left = match side {
      SideState::Ready(_) => SideState::Done(cause),
      SideState::Running(handle) => {
        if panic::catch_unwind(AssertUnwindSafe(|| handle.cancel(cause))).is_err() {
          record_panic(&self.panic_slot, "cancel");
        }
        SideState::Running(CancelHandle::noop())
      }
      SideState::Done(c) => SideState::Done(c),
    };
  }

  fn terminate_r(&mut self, cause: Cause<E>) {
    let side = std::mem::replace(&mut self.right, SideState::Done(Cause::End));
    self.right = match side {
      SideState::Ready(_) => SideState::Done(cause),
      SideState::Running(handle) => {
        if panic::catch_unwind(AssertUnwindSafe(|| handle.cancel(cause))).is_err() {
          record_panic(&self.panic_slot, "cancel");
        }
        SideState::Running(CancelHandle::noop())
      }
      SideState::Done(c) => SideState::Done(c),
    };
  }
}
