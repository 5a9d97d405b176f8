use std::collections::HashMap;

/// Handle to a scheduled callback. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

#[derive(Debug, Clone, Copy)]
struct Timer {
    due: f64,
    period: Option<f64>,
}

/// Shortest repeating period, seconds.
const MIN_PERIOD: f64 = 1e-3;

/// Scheduled callbacks driven by the frame clock.
///
/// Firing only reports ids; the owner reacts inside its own frame update,
/// so nothing outside the frame pass touches scene state.
#[derive(Debug, Default)]
pub struct TimerQueue {
    timers: HashMap<TimerId, Timer>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, timer: Timer) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.insert(id, timer);
        id
    }

    /// Fire once, `delay` seconds after `now`.
    pub fn arm_once(&mut self, now: f64, delay: f32) -> TimerId {
        self.insert(Timer {
            due: now + f64::from(delay.max(0.0)),
            period: None,
        })
    }

    /// Fire every `period` seconds, first at `now + period`.
    pub fn arm_repeating(&mut self, now: f64, period: f32) -> TimerId {
        let period = f64::from(period).max(MIN_PERIOD);
        self.insert(Timer {
            due: now + period,
            period: Some(period),
        })
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Number of armed timers.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Collect every timer due at or before `now`, ordered by due time.
    /// One-shot timers are dropped; repeating timers skip ahead past `now`,
    /// so missed periods coalesce into one firing.
    pub fn advance(&mut self, now: f64) -> Vec<TimerId> {
        let mut fired: Vec<(f64, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= now)
            .map(|(id, t)| (t.due, *id))
            .collect();
        fired.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        for (_, id) in &fired {
            let Some(timer) = self.timers.get_mut(id) else {
                continue;
            };
            match timer.period {
                Some(period) => {
                    let skipped = ((now - timer.due) / period).floor() + 1.0;
                    timer.due += period * skipped;
                    // rounding can land exactly on `now`
                    if timer.due <= now {
                        timer.due += period;
                    }
                }
                None => {
                    self.timers.remove(id);
                }
            }
        }

        fired.into_iter().map(|(_, id)| id).collect()
    }
}
