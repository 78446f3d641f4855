//! Frame and timer waits behind a pluggable seam, plus the bounded retry
//! state machine used by every polling loop in the crate.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};
use serde::{Deserialize, Serialize};

/// Source of suspension points: frame boundaries and timers.
pub trait FrameScheduler {
    /// Resolves at the next rendering frame.
    fn next_frame(&self) -> LocalBoxFuture<'static, ()>;

    /// Resolves after `duration`.
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// One wait requested from a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledWait {
    Frame,
    Sleep(Duration),
}

/// Scheduler backed by tokio timers; a frame is approximated by `frame_interval`.
#[derive(Debug, Clone, Copy)]
pub struct TokioScheduler {
    frame_interval: Duration,
}

impl TokioScheduler {
    /// 60Hz frame interval.
    pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

    #[must_use]
    pub fn new(frame_interval: Duration) -> Self {
        Self { frame_interval }
    }
}

impl Default for TokioScheduler {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FRAME_INTERVAL)
    }
}

impl FrameScheduler for TokioScheduler {
    fn next_frame(&self) -> LocalBoxFuture<'static, ()> {
        tokio::time::sleep(self.frame_interval).boxed_local()
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        tokio::time::sleep(duration).boxed_local()
    }
}

/// Scheduler whose waits complete immediately and are recorded in order.
///
/// Makes retry loops deterministic in tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct ImmediateScheduler {
    waits: Rc<RefCell<Vec<ScheduledWait>>>,
}

impl ImmediateScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn waits(&self) -> Vec<ScheduledWait> {
        self.waits.borrow().clone()
    }

    /// Sum of all recorded sleeps.
    #[must_use]
    pub fn slept(&self) -> Duration {
        self.waits
            .borrow()
            .iter()
            .filter_map(|wait| match wait {
                ScheduledWait::Sleep(duration) => Some(*duration),
                ScheduledWait::Frame => None,
            })
            .sum()
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.waits
            .borrow()
            .iter()
            .filter(|wait| matches!(wait, ScheduledWait::Frame))
            .count()
    }
}

impl FrameScheduler for ImmediateScheduler {
    fn next_frame(&self) -> LocalBoxFuture<'static, ()> {
        self.waits.borrow_mut().push(ScheduledWait::Frame);
        future::ready(()).boxed_local()
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        self.waits.borrow_mut().push(ScheduledWait::Sleep(duration));
        future::ready(()).boxed_local()
    }
}

/// Waits for the next frame, then for `delay`.
pub async fn frame_then_sleep(scheduler: &dyn FrameScheduler, delay: Duration) {
    scheduler.next_frame().await;
    if !delay.is_zero() {
        scheduler.sleep(delay).await;
    }
}

/// Bounded retry budget: one initial attempt plus `max_retries` retries,
/// each preceded by a frame wait and `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay_ms: u64,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_retries: u32, delay_ms: u64) -> Self {
        Self {
            max_retries,
            delay_ms,
        }
    }

    #[must_use]
    pub fn delay(self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    #[must_use]
    pub fn start(self) -> RetryState {
        RetryState {
            policy: self,
            attempt: 0,
        }
    }
}

/// Outcome of consuming one attempt from a `RetryState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStep {
    /// Run attempt number `attempt` (0-based).
    Attempt { attempt: u32 },
    Exhausted { attempts: u32 },
}

/// Attempt counter of one polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    policy: RetryPolicy,
    attempt: u32,
}

impl RetryState {
    /// Consumes the next attempt, or reports exhaustion.
    pub fn next_step(&mut self) -> RetryStep {
        if self.attempt >= self.budget() {
            return RetryStep::Exhausted {
                attempts: self.attempt,
            };
        }
        let attempt = self.attempt;
        self.attempt += 1;
        RetryStep::Attempt { attempt }
    }

    /// Attempts consumed so far.
    #[must_use]
    pub fn attempts(self) -> u32 {
        self.attempt
    }

    /// Marks the budget as spent without running the remaining attempts.
    pub fn deplete(&mut self) {
        self.attempt = self.attempt.max(self.budget());
    }

    /// Total attempts allowed, saturating at `u32::MAX`.
    fn budget(self) -> u32 {
        self.policy.max_retries.saturating_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_budget_is_initial_attempt_plus_retries() {
        let mut state = RetryPolicy::new(2, 50).start();
        assert_eq!(state.next_step(), RetryStep::Attempt { attempt: 0 });
        assert_eq!(state.next_step(), RetryStep::Attempt { attempt: 1 });
        assert_eq!(state.next_step(), RetryStep::Attempt { attempt: 2 });
        assert_eq!(state.next_step(), RetryStep::Exhausted { attempts: 3 });
        assert_eq!(state.next_step(), RetryStep::Exhausted { attempts: 3 });
    }

    #[test]
    fn depleting_skips_remaining_attempts() {
        let mut state = RetryPolicy::new(10, 50).start();
        let _ = state.next_step();
        state.deplete();
        assert_eq!(state.next_step(), RetryStep::Exhausted { attempts: 11 });
    }

    #[test]
    fn unbounded_policy_depletes_without_overflow() {
        let mut state = RetryPolicy::new(u32::MAX, 50).start();
        assert_eq!(state.next_step(), RetryStep::Attempt { attempt: 0 });
        state.deplete();
        assert_eq!(
            state.next_step(),
            RetryStep::Exhausted { attempts: u32::MAX }
        );
    }

    #[test]
    fn immediate_scheduler_records_waits_in_order() {
        let scheduler = ImmediateScheduler::new();
        futures::executor::block_on(frame_then_sleep(&scheduler, Duration::from_millis(50)));
        futures::executor::block_on(frame_then_sleep(&scheduler, Duration::ZERO));
        assert_eq!(
            scheduler.waits(),
            vec![
                ScheduledWait::Frame,
                ScheduledWait::Sleep(Duration::from_millis(50)),
                ScheduledWait::Frame,
            ]
        );
        assert_eq!(scheduler.slept(), Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_waits_one_frame_interval_then_the_delay() {
        let scheduler = TokioScheduler::default();
        let start = tokio::time::Instant::now();
        frame_then_sleep(&scheduler, Duration::from_millis(50)).await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(66));
        assert!(elapsed < Duration::from_millis(70));
    }
}
