//! # Alarm Scanner
//!
//! Periodic sweep over the reminder store that rings a one-time alarm for
//! every reminder whose due time has just elapsed. A reminder qualifies
//! while `due_at <= now` and `due_at > now - window`; the 60-second
//! trailing window combined with the 5-second scan period means each
//! qualifying reminder is evaluated at least a dozen times, while items
//! overdue by more than the window never ring retroactively. If no scan
//! runs while a reminder is inside its window, the notification is
//! permanently skipped: this is a best-effort reminder, not a
//! guaranteed-delivery alert.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::features::reminders::model::CategoryFilter;
use crate::features::reminders::store::ReminderStore;
use crate::features::sounds::{Sound, SoundPlayer};

/// Default period between sweeps.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(5);

/// Default trailing window after a due time during which an alarm may
/// still fire.
pub const DEFAULT_TRAILING_WINDOW_SECS: i64 = 60;

/// Sweeps the store and remembers which reminders have already rung.
///
/// The notified set is owned exclusively by the scanner and lives for the
/// process lifetime: entries are added once per reminder and never
/// removed, so completing or re-evaluating a reminder cannot make it ring
/// twice.
pub struct AlarmScanner {
    store: Arc<ReminderStore>,
    sounds: SoundPlayer,
    notified: HashSet<Uuid>,
    window: ChronoDuration,
}

impl AlarmScanner {
    pub fn new(store: Arc<ReminderStore>, sounds: SoundPlayer) -> Self {
        AlarmScanner {
            store,
            sounds,
            notified: HashSet::new(),
            window: ChronoDuration::seconds(DEFAULT_TRAILING_WINDOW_SECS),
        }
    }

    /// Override the trailing window (tests compress time with this).
    pub fn with_window(mut self, window: ChronoDuration) -> Self {
        self.window = window;
        self
    }

    /// Run one sweep at `now`. Returns how many reminders newly rang.
    pub async fn scan_at(&mut self, now: DateTime<Utc>) -> usize {
        let snapshot = self.store.list(CategoryFilter::All).await;
        let floor = now - self.window;
        let mut fired = 0;

        for reminder in &snapshot {
            if reminder.completed {
                continue;
            }
            if reminder.due_at > now || reminder.due_at <= floor {
                continue;
            }
            if !self.notified.insert(reminder.id) {
                continue;
            }

            info!(
                "Reminder \"{}\" is due ({}), ringing alarm",
                reminder.title, reminder.due_at
            );
            self.sounds.play(Sound::Alarm);
            fired += 1;
        }

        if fired > 0 {
            debug!("Scan notified {fired} reminder(s) of {}", snapshot.len());
        }
        fired
    }

    /// Whether a reminder has already rung in this process.
    pub fn is_notified(&self, id: Uuid) -> bool {
        self.notified.contains(&id)
    }

    /// Spawn the recurring sweep as a cancellable background task.
    pub fn spawn(self, interval: Duration) -> ScannerHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(interval, shutdown_rx));
        ScannerHandle {
            shutdown: shutdown_tx,
            task,
        }
    }

    async fn run(mut self, period: Duration, mut shutdown: watch::Receiver<bool>) -> AlarmScanner {
        let mut ticker = tokio::time::interval(period);
        info!("Alarm scanner started (period {period:?}, window {})", self.window);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.scan_at(Utc::now()).await;
                }
                changed = shutdown.changed() => {
                    // Either an explicit stop or the handle was dropped.
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        info!("Alarm scanner stopped");
        self
    }
}

/// Owns the running scanner task. Dropping the handle also shuts the loop
/// down, since the watch sender side closes.
pub struct ScannerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<AlarmScanner>,
}

impl ScannerHandle {
    /// Stop the sweep and hand back the scanner (with its notified set).
    pub async fn stop(self) -> Option<AlarmScanner> {
        if self.shutdown.send(true).is_err() {
            warn!("Alarm scanner already gone at stop");
        }
        match self.task.await {
            Ok(scanner) => Some(scanner),
            Err(e) => {
                warn!("Alarm scanner task failed to join: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reminders::model::ReminderInput;
    use crate::features::sounds::test_support::RecordingPlayback;

    async fn store_with_due(offset_secs: i64) -> (Arc<ReminderStore>, Uuid) {
        let store = Arc::new(ReminderStore::new());
        let reminder = store
            .create(ReminderInput {
                title: "due soon".to_string(),
                due_at: Some(Utc::now() + ChronoDuration::seconds(offset_secs)),
                ..Default::default()
            })
            .await
            .unwrap();
        (store, reminder.id)
    }

    #[tokio::test]
    async fn test_reminder_inside_window_rings_exactly_once() {
        let (store, id) = store_with_due(-30).await;
        let (playback, mut rx) = RecordingPlayback::channel();
        let mut scanner = AlarmScanner::new(store, SoundPlayer::new(playback));

        let now = Utc::now();
        assert_eq!(scanner.scan_at(now).await, 1);
        assert!(scanner.is_notified(id));

        // Repeated sweeps while still inside the window stay silent.
        for i in 1..=5 {
            let later = now + ChronoDuration::seconds(i);
            assert_eq!(scanner.scan_at(later).await, 0);
        }

        assert_eq!(rx.recv().await, Some(Sound::Alarm));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_reminder_past_window_never_rings() {
        let (store, id) = store_with_due(-90).await;
        let (playback, mut rx) = RecordingPlayback::channel();
        let mut scanner = AlarmScanner::new(store, SoundPlayer::new(playback));

        assert_eq!(scanner.scan_at(Utc::now()).await, 0);
        assert!(!scanner.is_notified(id));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_narrow_window_excludes_older_reminders() {
        let (store, id) = store_with_due(-30).await;
        let (playback, _rx) = RecordingPlayback::channel();
        let mut scanner = AlarmScanner::new(store, SoundPlayer::new(playback))
            .with_window(ChronoDuration::seconds(5));

        assert_eq!(scanner.scan_at(Utc::now()).await, 0);
        assert!(!scanner.is_notified(id));
    }

    #[tokio::test]
    async fn test_future_reminder_does_not_ring_yet() {
        let (store, id) = store_with_due(120).await;
        let (playback, _rx) = RecordingPlayback::channel();
        let mut scanner = AlarmScanner::new(store, SoundPlayer::new(playback));

        assert_eq!(scanner.scan_at(Utc::now()).await, 0);
        assert!(!scanner.is_notified(id));
    }

    #[tokio::test]
    async fn test_completed_reminder_never_rings() {
        let (store, id) = store_with_due(-10).await;
        store.toggle_complete(id).await;

        let (playback, mut rx) = RecordingPlayback::channel();
        let mut scanner = AlarmScanner::new(store, SoundPlayer::new(playback));

        assert_eq!(scanner.scan_at(Utc::now()).await, 0);
        assert!(!scanner.is_notified(id));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_completion_after_ring_does_not_rearm() {
        let (store, id) = store_with_due(-5).await;
        let (playback, mut rx) = RecordingPlayback::channel();
        let mut scanner = AlarmScanner::new(store.clone(), SoundPlayer::new(playback));

        let now = Utc::now();
        assert_eq!(scanner.scan_at(now).await, 1);

        // Completing and un-completing the reminder leaves the notified
        // set untouched, so no second ring.
        store.toggle_complete(id).await;
        store.toggle_complete(id).await;
        assert_eq!(scanner.scan_at(now + ChronoDuration::seconds(2)).await, 0);
        assert!(scanner.is_notified(id));

        assert_eq!(rx.recv().await, Some(Sound::Alarm));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_spawned_scanner_rings_within_one_cycle_and_stops() {
        let store = Arc::new(ReminderStore::new());
        let (playback, mut rx) = RecordingPlayback::channel();
        let scanner = AlarmScanner::new(store.clone(), SoundPlayer::new(playback));
        let handle = scanner.spawn(Duration::from_millis(20));

        let reminder = store
            .create(ReminderInput {
                title: "due right now".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        // One cycle is enough to pick it up.
        let rang = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("scanner did not ring within a cycle");
        assert_eq!(rang, Some(Sound::Alarm));

        // Give the loop a few more ticks; the alarm must not repeat.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_err());

        let scanner = handle.stop().await.expect("scanner should join");
        assert!(scanner.is_notified(reminder.id));
    }
}
