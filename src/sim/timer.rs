//! Session-owned timers
//!
//! Timers never fire on their own: the frame loop polls them with the current
//! wall-clock time. Cancelling a handle removes the entry synchronously, so a
//! cancelled timer can never fire afterwards.

use serde::Serialize;

/// Opaque handle returned by the schedule calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimerHandle(u32);

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimerKind {
    /// Re-emit the target announcement
    AnnounceRepeat,
    /// Restart the session after the paddle broke
    AutoRestart,
}

#[derive(Debug, Clone)]
struct Timer {
    handle: TimerHandle,
    kind: TimerKind,
    due_ms: f64,
    period_ms: Option<f64>,
}

/// Pending timers, in scheduling order
#[derive(Debug, Clone, Default)]
pub struct Timers {
    timers: Vec<Timer>,
    next_handle: u32,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: TimerKind, due_ms: f64, period_ms: Option<f64>) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.timers.push(Timer {
            handle,
            kind,
            due_ms,
            period_ms,
        });
        handle
    }

    /// Fire once, `delay_ms` after `now_ms`
    pub fn schedule_once(&mut self, kind: TimerKind, now_ms: f64, delay_ms: f64) -> TimerHandle {
        self.push(kind, now_ms + delay_ms, None)
    }

    /// Fire every `period_ms`, first at `now_ms + period_ms`
    pub fn schedule_repeating(
        &mut self,
        kind: TimerKind,
        now_ms: f64,
        period_ms: f64,
    ) -> TimerHandle {
        self.push(kind, now_ms + period_ms, Some(period_ms))
    }

    /// Cancel a timer. Returns false if it already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    /// Number of timers still scheduled
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Collect every timer due at `now_ms`.
    ///
    /// One-shot timers are removed; repeating timers are rescheduled one period
    /// later (a late poll fires once, not once per missed period).
    pub fn poll(&mut self, now_ms: f64) -> Vec<(TimerHandle, TimerKind)> {
        let mut fired = Vec::new();
        self.timers.retain_mut(|timer| {
            if timer.due_ms > now_ms {
                return true;
            }
            fired.push((timer.handle, timer.kind));
            match timer.period_ms {
                Some(period) => {
                    timer.due_ms += period;
                    if timer.due_ms <= now_ms {
                        timer.due_ms = now_ms + period;
                    }
                    true
                }
                None => false,
            }
        });
        fired
    }
}
