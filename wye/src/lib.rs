#![allow(private_bounds)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # wye — nondeterministic two-input stream merging
//!
//! A wye is a suspended computation that reads from two input streams —
//! left and right — and decides, value by value, what to read next and
//! what to emit. Racing reads off the two sides, tagging, zipping,
//! throttling one side by the other, and interrupting a stream from a
//! side-channel are all just different [`Wye`] values.
//!
//! The crate is split into three layers:
//!
//! - [`algebra`]: the pure `Wye<L, R, O, E>` state machine. Stepping,
//!   feeding values in, killing a side, flipping left/right, and
//!   pre-composing a [`algebra::Process1`] in front of one side. Nothing
//!   here touches threads or effects — a `Wye` value is just data.
//! - [`driver`]: the concurrent engine. Binds two effectful
//!   [`driver::Source`]s to a wye and runs it on a single dedicated
//!   thread, exposing the result as a blocking [`driver::WyeStream`].
//! - [`combinators`]: the constructor menu built entirely on top of the
//!   algebra — [`combinators::merge`], [`combinators::yip_with`],
//!   [`combinators::bounded_queue`], and friends.
//!
//! ## Getting started
//!
//! Build a wye, then bind it to two sources and pull from the stream:
//!
//! ```
//! use wye::combinators::yip;
//! use wye::driver::{self, DriverConfig};
//!
//! # use wye::cause::Cause;
//! # use wye::driver::{CancelHandle, Respond, Source, SourceOutcome};
//! # struct VecSource<T>(std::vec::IntoIter<T>);
//! # impl<T: Send + 'static> Source<T, String> for VecSource<T> {
//! #   fn request(mut self: Box<Self>, respond: Respond<T, String>) -> CancelHandle<String> {
//! #     match self.0.next() {
//! #       Some(v) => respond(SourceOutcome::Ready(vec![v], self)),
//! #       None => respond(SourceOutcome::Done(Cause::End)),
//! #     }
//! #     CancelHandle::noop()
//! #   }
//! # }
//! let left = Box::new(VecSource(vec![1, 2, 3].into_iter()));
//! let right = Box::new(VecSource(vec!["a", "b", "c"].into_iter()));
//! let stream = driver::run(yip(), left, right, DriverConfig::default());
//! let pairs: Vec<_> = stream.collect();
//! assert_eq!(pairs, vec![(1, "a"), (2, "b"), (3, "c")]);
//! ```

pub mod algebra;
pub mod blocking_queue;
pub mod cause;
pub mod combinators;
pub mod driver;
pub mod error;
pub mod sync;

pub use algebra::Wye;
pub use cause::Cause;
pub use error::WyeError;
