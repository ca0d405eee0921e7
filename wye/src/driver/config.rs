//! Driver tuning knobs.

use std::sync::Arc;

use super::strategy::{Strategy, ThreadStrategy};

/// Knobs the algebra and `spec.md`'s driver section leave implicit.
///
/// The default mailbox is unbounded — the actor's mailbox is the single
/// point every source completion and downstream `Get`/`Terminate` passes
/// through, and `spec.md` §4.2 never describes backpressure on it, so an
/// explicit bound is opt-in rather than assumed.
pub struct DriverConfig {
  /// `Some(n)` bounds the actor mailbox to `n` in-flight messages via
  /// `crossbeam_channel::bounded`; `None` uses an unbounded channel.
  pub mailbox_capacity: Option<usize>,
  /// Executes source reads and cancellation thunks. Must be stack-safe: the
  /// actor loop itself never recurses, but a `Strategy` that ran thunks
  /// synchronously on the actor thread would let a misbehaving source body
  /// call back into the actor re-entrantly.
  pub strategy: Arc<dyn Strategy>,
}

impl Default for DriverConfig {
  fn default() -> Self {
    Self { mailbox_capacity: None, strategy: Arc::new(ThreadStrategy) }
  }
}

impl DriverConfig {
  /// Starts from the default config with an explicit mailbox bound.
  pub fn with_mailbox_capacity(capacity: usize) -> Self {
    Self { mailbox_capacity: Some(capacity), ..Self::default() }
  }

  /// Starts from the default config with a custom [`Strategy`].
  pub fn with_strategy(strategy: impl Strategy + 'static) -> Self {
    Self { mailbox_capacity: None, strategy: Arc::new(strategy) }
  }
}
