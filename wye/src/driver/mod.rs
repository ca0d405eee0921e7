//! The concurrent engine that binds two effectful sources to a [`Wye`] and
//! produces a blocking output stream.
//!
//! Single-actor design: one dedicated thread owns the wye value and both
//! sides' state, processing a strictly serialized mailbox of
//! [`actor::Msg`]. Source completions and downstream requests only ever post
//! messages into that mailbox — they never touch the wye directly (§5 of
//! the crate's design notes).

mod actor;
mod config;
mod source;
mod strategy;
mod stream;

pub use config::DriverConfig;
pub use source::{CancelHandle, Respond, Source, SourceOutcome};
pub use strategy::{Strategy, ThreadStrategy};
pub use stream::WyeStream;

use std::sync::Arc;
use std::thread;

use crate::algebra::Wye;

/// Binds `left` and `right` to `yy` and starts the actor on its own thread,
/// returning a blocking stream of the merge's output.
pub fn run<L, R, O, E>(
  yy: Wye<L, R, O, E>,
  left: Box<dyn Source<L, E>>,
  right: Box<dyn Source<R, E>>,
  config: DriverConfig,
) -> WyeStream<L, R, O, E>
where
  L: Send + 'static,
  R: Send + 'static,
  O: Send + 'static,
  E: Clone + Send + 'static,
{
  let (sender, receiver) = match config.mailbox_capacity {
    Some(capacity) => crossbeam_channel::bounded(capacity),
    None => crossbeam_channel::unbounded(),
  };
  let strategy = config.strategy;
  let actor_sender = sender.clone();
  let panic_slot = Arc::new(crate::sync::Mutex::new(None));
  let actor_panic_slot = Arc::clone(&panic_slot);
  thread::Builder::new()
    .name("wye-actor".into())
    .spawn(move || {
      actor::Actor::run(yy, left, right, strategy, actor_sender, receiver, actor_panic_slot)
    })
    .expect("failed to spawn wye actor thread");
  WyeStream::new(sender, panic_slot)
}
