use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// Provides blocking operations on top of an ArrayQueue without wrapping it.
///
/// This struct only manages the blocking coordination (Condvar + Mutex).
/// The actual queue is owned and managed externally.
///
/// # Design
///
/// - Does NOT own the queue - only coordinates blocking
/// - Mutex holds no data - just used for Condvar coordination
/// - All actual queue operations happen externally
pub struct BlockingCoordinator {
  condvar: Condvar,
  wait_lock: Mutex<()>,
}

impl BlockingCoordinator {
  /// Creates a new blocking coordinator.
  pub fn new() -> Self {
    Self { condvar: Condvar::new(), wait_lock: Mutex::new(()) }
  }

  /// Notifies one waiting thread that an item may be available.
  ///
  /// CRITICAL: This acquires the wait_lock before notifying to prevent lost wakeups.
  /// The lock ensures that if a waiter is between checking the queue and calling
  /// condvar.wait(), the notification won't be lost.
  ///
  /// Call this after pushing to the queue.
  #[inline]
  pub fn notify_one(&self) {
    // Acquire lock before notifying to prevent lost wakeup race.
    // If we notify without the lock, a waiter might check the queue (empty),
    // then we push + notify, then the waiter calls wait() - missing our notification.
    let _guard = self.wait_lock.lock().unwrap();
    self.condvar.notify_one();
    // Lock released here, allowing waiting thread to proceed
  }

  /// Blocks until `try_pop` succeeds in getting a value from the queue.
  ///
  /// # Arguments
  ///
  /// * `try_pop` - Closure that attempts to pop from the queue. Should return Some(T) on success.
  ///
  /// # Example
  ///
  /// ```ignore
  /// let coordinator = BlockingCoordinator::new();
  /// let queue = ArrayQueue::new(10);
  ///
  /// let value = coordinator.blocking_pop(|| queue.pop());
  /// ```
  pub fn blocking_pop<T, F>(&self, try_pop: F) -> T
  where
    F: Fn() -> Option<T>,
  {
    // Fast path: try without locking
    if let Some(value) = try_pop() {
      return value;
    }

    // Slow path: wait for notification
    let mut guard = self.wait_lock.lock().unwrap();

    loop {
      // Check again after acquiring lock to avoid race
      if let Some(value) = try_pop() {
        return value;
      }

      // Wait for notification
      guard = self.condvar.wait(guard).unwrap();
      // Loop handles spurious wakeups
    }
  }

  /// Blocks until `try_pop` succeeds or timeout expires.
  ///
  /// Returns None if timeout expires before getting a value.
  ///
  /// # Arguments
  ///
  /// * `try_pop` - Closure that attempts to pop from the queue
  /// * `timeout` - Maximum time to wait
  pub fn blocking_pop_timeout<T, F>(
    &self,
    try_pop: F,
    timeout: Duration,
  ) -> Option<T>
  where
    F: Fn() -> Option<T>,
  {
    // Fast path: try without locking
    if let Some(value) = try_pop() {
      return Some(value);
    }

    // Slow path: wait with timeout
    let mut guard = self.wait_lock.lock().unwrap();
    let start = std::time::Instant::now();

    loop {
      // Check again after acquiring lock
      if let Some(value) = try_pop() {
        return Some(value);
      }

      // Calculate remaining time
      let elapsed = start.elapsed();
      if elapsed >= timeout {
        // Final check before giving up
        return try_pop();
      }

      let remaining = timeout - elapsed;

      // Wait with remaining timeout
      let (new_guard, wait_result) =
        self.condvar.wait_timeout(guard, remaining).unwrap();

      guard = new_guard;

      // If timed out, do final check and return
      if wait_result.timed_out() {
        return try_pop();
      }
      // Otherwise loop to handle spurious wakeups
    }
  }
}

// SAFETY: BlockingCoordinator can be sent across threads
unsafe impl Send for BlockingCoordinator {}

// SAFETY: BlockingCoordinator can be shared across threads
unsafe impl Sync for BlockingCoordinator {}
