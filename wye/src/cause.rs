//! The reason a side, or a whole wye, stopped running.

use std::fmt;

/// Why a side or a wye terminated.
///
/// `Kill` is idempotent: wrapping `Kill` around `Kill` stays `Kill` — use
/// [`Cause::kill`] rather than constructing `Cause::Kill` directly so this
/// invariant can't be broken by accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cause<E> {
  /// Graceful, expected completion.
  End,
  /// Externally requested termination, wrapping the cause that triggered it.
  Kill(Box<Cause<E>>),
  /// An unexpected failure, from a receiver, a combining function, or a source.
  Error(E),
}

impl<E> Cause<E> {
  /// Wraps `self` in `Kill`, normalizing away any existing `Kill` layer so
  /// that `Kill(Kill(c))` is never observable — first kill wins.
  #[must_use]
  pub fn kill(self) -> Self {
    match self {
      Cause::Kill(_) => self,
      other => Cause::Kill(Box::new(other)),
    }
  }

  /// `true` for [`Cause::End`].
  pub fn is_end(&self) -> bool {
    matches!(self, Cause::End)
  }

  /// `true` for [`Cause::Kill`].
  pub fn is_kill(&self) -> bool {
    matches!(self, Cause::Kill(_))
  }

  /// `true` for [`Cause::Error`].
  pub fn is_error(&self) -> bool {
    matches!(self, Cause::Error(_))
  }

  /// Maps the error payload, leaving `End`/`Kill` structure intact.
  pub fn map_err<E2>(self, f: impl FnOnce(E) -> E2) -> Cause<E2> {
    match self {
      Cause::End => Cause::End,
      Cause::Kill(inner) => Cause::Kill(Box::new(inner.map_err(f))),
      Cause::Error(e) => Cause::Error(f(e)),
    }
  }
}

impl<E: fmt::Display> fmt::Display for Cause<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Cause::End => f.write_str("end"),
      Cause::Kill(inner) => write!(f, "kill ({inner})"),
      Cause::Error(e) => write!(f, "error: {e}"),
    }
  }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for Cause<E> {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kill_normalizes_nested_kill() {
    let c: Cause<&str> = Cause::End.kill();
    let c2 = c.clone().kill();
    assert_eq!(c, c2);
    assert!(matches!(c2, Cause::Kill(inner) if *inner == Cause::End));
  }

  #[test]
  fn kill_wraps_non_kill_once() {
    let c: Cause<&str> = Cause::Error("boom").kill();
    match c {
      Cause::Kill(inner) => assert_eq!(*inner, Cause::Error("boom")),
      _ => panic!("expected Kill"),
    }
  }
}
