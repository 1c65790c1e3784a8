// Daily refresh schedule: a fixed wall-clock instant in a named timezone,
// plus a cancellable tick thread that drives countdown display and reloads.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration as StdDuration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSchedule {
    pub timezone: Tz,
    pub hour: u32,
    pub minute: u32,
}

impl RefreshSchedule {
    pub fn new(timezone: Tz, hour: u32, minute: u32) -> Self {
        Self {
            timezone,
            hour: hour.min(23),
            minute: minute.min(59),
        }
    }

    /// The next scheduled instant strictly after `now`: today's wall-clock
    /// instant in the configured zone if still ahead, otherwise tomorrow's.
    pub fn next_refresh(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let local_date = now.with_timezone(&self.timezone).date_naive();
        let today = self.instant_on(local_date);
        if today > now {
            today
        } else {
            self.instant_on(local_date + Duration::days(1))
        }
    }

    pub fn until_refresh(&self, now: DateTime<Utc>) -> Duration {
        self.next_refresh(now) - now
    }

    /// Resolve the wall-clock instant on a given local date. A DST gap takes
    /// the earliest valid instant an hour later; a fold takes the earlier of
    /// the two. Never panics; a pathological zone falls back to reading the
    /// naive time as UTC.
    fn instant_on(&self, date: NaiveDate) -> DateTime<Utc> {
        let time = NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN);
        let naive = date.and_time(time);
        self.timezone
            .from_local_datetime(&naive)
            .earliest()
            .or_else(|| {
                self.timezone
                    .from_local_datetime(&(naive + Duration::hours(1)))
                    .earliest()
            })
            .map(|instant| instant.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
    }
}

/// Countdown string in the shape shown next to the diagram: "3h 12m 40s".
/// Negative remainders (clock skew around the instant) clamp to zero.
pub fn format_countdown(remaining: Duration) -> String {
    let total = remaining.num_seconds().max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours}h {minutes}m {seconds}s")
}

/// What a running timer reports on each 1-second tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Time remaining until the next scheduled refresh.
    Countdown(Duration),
    /// The scheduled instant was crossed; reload now. Fires at most once per
    /// scheduled instant.
    Refresh,
}

/// Handle to a running refresh timer. The tick thread stops when `cancel`
/// is called or the handle is dropped.
pub struct RefreshTimer {
    stop: mpsc::Sender<()>,
    worker: Option<JoinHandle<()>>,
}

impl RefreshTimer {
    pub fn start<F>(schedule: RefreshSchedule, mut on_tick: F) -> Self
    where
        F: FnMut(Tick) + Send + 'static,
    {
        let (stop, stopped) = mpsc::channel();
        let worker = std::thread::spawn(move || {
            let mut next = schedule.next_refresh(Utc::now());
            loop {
                match stopped.recv_timeout(StdDuration::from_secs(1)) {
                    Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                    Err(mpsc::RecvTimeoutError::Timeout) => {}
                }
                let now = Utc::now();
                if now >= next {
                    on_tick(Tick::Refresh);
                    next = schedule.next_refresh(now);
                } else {
                    on_tick(Tick::Countdown(next - now));
                }
            }
        });
        Self {
            stop,
            worker: Some(worker),
        }
    }

    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let _ = self.stop.send(());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
