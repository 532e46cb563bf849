//! Bounded polling of the status register.
//!
//! A transfer waits for a ready bit by re-reading STA until it is set or
//! the [`PollPolicy`] gives up. The policy decides what "too long" means:
//! an iteration count ([`SpinLimit`]), a tick deadline ([`Deadline`]), or
//! nothing at all ([`Immediate`]).

use core::hint;

use crate::config::DEFAULT_POLL_LIMIT;
use crate::regs::{Status, UartPort};

/// Decides when a poll has waited long enough.
pub trait PollPolicy {
    /// Called once at the start of every wait.
    fn start(&mut self);

    /// Called after each poll that did not see the ready bit. Returning
    /// `true` ends the wait with a timeout.
    fn expired(&mut self) -> bool;
}

/// Gives up after `limit` failed polls have been exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinLimit {
    limit: u32,
    count: u32,
}

impl SpinLimit {
    pub const fn new(limit: u32) -> Self {
        Self { limit, count: 0 }
    }

    pub const fn limit(&self) -> u32 {
        self.limit
    }
}

impl Default for SpinLimit {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_LIMIT)
    }
}

impl PollPolicy for SpinLimit {
    fn start(&mut self) {
        self.count = 0;
    }

    fn expired(&mut self) -> bool {
        if self.count >= self.limit {
            return true;
        }
        self.count += 1;
        false
    }
}

/// Gives up on the first poll that does not see the ready bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Immediate;

impl PollPolicy for Immediate {
    fn start(&mut self) {}

    fn expired(&mut self) -> bool {
        true
    }
}

/// A free-running tick counter, such as a system timer.
pub trait Clock {
    fn now(&self) -> u64;
}

/// Gives up once `ticks` have elapsed on `clock` since the wait started.
#[derive(Debug, Clone)]
pub struct Deadline<C> {
    clock: C,
    ticks: u64,
    started: u64,
}

impl<C: Clock> Deadline<C> {
    pub fn new(clock: C, ticks: u64) -> Self {
        let started = clock.now();
        Self {
            clock,
            ticks,
            started,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: Clock> PollPolicy for Deadline<C> {
    fn start(&mut self) {
        self.started = self.clock.now();
    }

    fn expired(&mut self) -> bool {
        self.clock.now().wrapping_sub(self.started) >= self.ticks
    }
}

/// Poll STA until `flag` is set.
///
/// Every iteration is a fresh volatile read. Returns `false` if `policy`
/// expired first.
pub(crate) fn wait_for<T, P>(port: &mut T, policy: &mut P, flag: Status) -> bool
where
    T: UartPort,
    P: PollPolicy,
{
    policy.start();
    loop {
        if Status::from_bits_retain(port.read_sta()).contains(flag) {
            return true;
        }
        if policy.expired() {
            return false;
        }
        hint::spin_loop();
    }
}
