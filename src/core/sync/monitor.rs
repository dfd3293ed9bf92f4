/*!
 * Monitor: Mutex-Guarded State with Condvar Wakeups
 *
 * Pairs a `parking_lot::Mutex<T>` with a `parking_lot::Condvar` so waiters
 * block on a predicate over the guarded state instead of on a bare signal.
 *
 * # Wakeup Discipline
 *
 * - The predicate is checked before waiting and after every wakeup, so
 *   spurious wakeups and notifications meant for another waiter are absorbed
 * - Every state change that may satisfy a blocked predicate must be followed
 *   by `notify_one` (single counterpart) or `notify_all` (many waiters with
 *   distinct predicates)
 */

use parking_lot::{Condvar, Mutex, MutexGuard};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Guarded state plus the condvar used to wait on it
pub struct Monitor<T> {
    state: Mutex<T>,
    condvar: Condvar,
    /// Threads currently parked in `wait_until` (diagnostics only)
    waiters: AtomicUsize,
}

impl<T> Monitor<T> {
    pub fn new(state: T) -> Self {
        Self {
            state: Mutex::new(state),
            condvar: Condvar::new(),
            waiters: AtomicUsize::new(0),
        }
    }

    /// Lock the state without waiting on any condition
    #[inline]
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.state.lock()
    }

    /// Block until `ready` holds for the guarded state, returning the guard
    ///
    /// The lock is held when `ready` runs and when this returns, so the
    /// caller's critical section starts with the predicate still true.
    pub fn wait_until<F>(&self, mut ready: F) -> MutexGuard<'_, T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut guard = self.state.lock();
        while !ready(&*guard) {
            self.waiters.fetch_add(1, Ordering::Relaxed);
            self.condvar.wait(&mut guard);
            self.waiters.fetch_sub(1, Ordering::Relaxed);
        }
        guard
    }

    /// Wake one parked waiter; false when nobody was parked
    #[inline]
    pub fn notify_one(&self) -> bool {
        self.condvar.notify_one()
    }

    /// Wake every parked waiter, returning how many were woken
    ///
    /// Each woken thread re-checks its own predicate.
    #[inline]
    pub fn notify_all(&self) -> usize {
        self.condvar.notify_all()
    }

    /// Approximate number of threads parked in `wait_until`
    pub fn waiter_count(&self) -> usize {
        self.waiters.load(Ordering::Relaxed)
    }

    pub fn get_mut(&mut self) -> &mut T {
        self.state.get_mut()
    }

    pub fn into_inner(self) -> T {
        self.state.into_inner()
    }
}

impl<T: Default> Default for Monitor<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Monitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("state", &*self.state.lock())
            .field("waiters", &self.waiter_count())
            .finish()
    }
}
