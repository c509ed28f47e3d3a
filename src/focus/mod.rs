//! Focus mode: a Pomodoro-style countdown
//!
//! The timer is a plain state machine advanced one second per [`FocusTimer::tick`].
//! [`run_focus`] drives it from a Tokio interval. There is no drift correction; a
//! late tick just makes the session run slightly long.

use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Which phase the timer is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMode {
    Focus,
    Break,
}

impl fmt::Display for FocusMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocusMode::Focus => f.write_str("Focus"),
            FocusMode::Break => f.write_str("Break"),
        }
    }
}

/// Something that happened on a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// One second elapsed
    Tick { remaining: u32 },
    /// A focus session finished; the timer switched to a break
    FocusComplete { sessions: u32 },
    /// A break finished; the timer switched back to focus
    BreakComplete,
}

/// Countdown state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTimer {
    focus_seconds: u32,
    break_seconds: u32,
    mode: FocusMode,
    remaining: u32,
    running: bool,
    sessions: u32,
}

impl FocusTimer {
    /// A stopped timer at the start of a focus session
    pub fn new(focus_seconds: u32, break_seconds: u32) -> Self {
        Self {
            focus_seconds,
            break_seconds,
            mode: FocusMode::Focus,
            remaining: focus_seconds,
            running: false,
            sessions: 0,
        }
    }

    pub fn mode(&self) -> FocusMode {
        self.mode
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Completed focus sessions
    pub fn sessions(&self) -> u32 {
        self.sessions
    }

    /// Remaining time as "MM:SS"
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }

    /// Fraction of the current phase elapsed, 0.0 to 1.0
    pub fn elapsed_ratio(&self) -> f64 {
        let total = self.phase_seconds();
        if total == 0 { 1.0 } else { 1.0 - self.remaining as f64 / total as f64 }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Stop and reload the current phase's full duration
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = self.phase_seconds();
    }

    /// Advance one second. Returns `None` while paused.
    ///
    /// Reaching zero stops the timer and switches phase.
    pub fn tick(&mut self) -> Option<TickEvent> {
        if !self.running {
            return None;
        }

        if self.remaining > 1 {
            self.remaining -= 1;
            return Some(TickEvent::Tick { remaining: self.remaining });
        }

        self.running = false;
        match self.mode {
            FocusMode::Focus => {
                self.sessions += 1;
                self.mode = FocusMode::Break;
                self.remaining = self.break_seconds;
                Some(TickEvent::FocusComplete { sessions: self.sessions })
            }
            FocusMode::Break => {
                self.mode = FocusMode::Focus;
                self.remaining = self.focus_seconds;
                Some(TickEvent::BreakComplete)
            }
        }
    }

    fn phase_seconds(&self) -> u32 {
        match self.mode {
            FocusMode::Focus => self.focus_seconds,
            FocusMode::Break => self.break_seconds,
        }
    }
}

/// Run one phase of `timer` in real time, forwarding every event.
///
/// Returns when the phase completes or `cancel` fires, handing the timer back.
pub async fn run_focus(
    mut timer: FocusTimer,
    events: mpsc::UnboundedSender<TickEvent>,
    cancel: CancellationToken,
) -> FocusTimer {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // The first tick completes immediately
    interval.tick().await;
    timer.start();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                timer.pause();
                tracing::debug!(remaining = timer.remaining(), "focus timer cancelled");
                break;
            }
            _ = interval.tick() => {
                let Some(event) = timer.tick() else { break };
                let done = !matches!(event, TickEvent::Tick { .. });
                if events.send(event).is_err() || done {
                    break;
                }
            }
        }
    }

    timer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_timer_is_stopped_at_focus() {
        let timer = FocusTimer::new(1500, 300);
        assert_eq!(timer.mode(), FocusMode::Focus);
        assert_eq!(timer.display(), "25:00");
        assert!(!timer.is_running());
    }

    #[test]
    fn paused_timer_does_not_move() {
        let mut timer = FocusTimer::new(3, 2);
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.remaining(), 3);
    }

    #[test]
    fn focus_rolls_into_break() {
        let mut timer = FocusTimer::new(3, 2);
        timer.start();
        assert_eq!(timer.tick(), Some(TickEvent::Tick { remaining: 2 }));
        assert_eq!(timer.tick(), Some(TickEvent::Tick { remaining: 1 }));
        assert_eq!(timer.tick(), Some(TickEvent::FocusComplete { sessions: 1 }));

        assert_eq!(timer.mode(), FocusMode::Break);
        assert_eq!(timer.remaining(), 2);
        assert!(!timer.is_running());
    }

    #[test]
    fn break_rolls_back_into_focus() {
        let mut timer = FocusTimer::new(1, 1);
        timer.start();
        timer.tick();
        timer.start();
        assert_eq!(timer.tick(), Some(TickEvent::BreakComplete));
        assert_eq!(timer.mode(), FocusMode::Focus);
        assert_eq!(timer.sessions(), 1);
    }

    #[test]
    fn reset_reloads_current_phase() {
        let mut timer = FocusTimer::new(10, 5);
        timer.start();
        timer.tick();
        timer.tick();
        timer.reset();
        assert_eq!(timer.remaining(), 10);
        assert!(!timer.is_running());
    }

    #[test]
    fn pause_and_resume() {
        let mut timer = FocusTimer::new(10, 5);
        timer.start();
        timer.pause();
        assert_eq!(timer.tick(), None);
        timer.resume();
        assert_eq!(timer.tick(), Some(TickEvent::Tick { remaining: 9 }));
    }

    #[test]
    fn elapsed_ratio_tracks_progress() {
        let mut timer = FocusTimer::new(4, 2);
        assert_eq!(timer.elapsed_ratio(), 0.0);
        timer.start();
        timer.tick();
        timer.tick();
        assert_eq!(timer.elapsed_ratio(), 0.5);
    }

    #[tokio::test(start_paused = true)]
    async fn run_completes_phase() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = run_focus(FocusTimer::new(3, 1), tx, CancellationToken::new()).await;

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert_eq!(
            events,
            vec![
                TickEvent::Tick { remaining: 2 },
                TickEvent::Tick { remaining: 1 },
                TickEvent::FocusComplete { sessions: 1 },
            ]
        );
        assert_eq!(timer.mode(), FocusMode::Break);
    }

    #[tokio::test(start_paused = true)]
    async fn run_stops_on_cancel() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let timer = run_focus(FocusTimer::new(60, 5), tx, cancel).await;
        assert!(!timer.is_running());
        assert_eq!(timer.mode(), FocusMode::Focus);
        assert_eq!(timer.remaining(), 60);
    }
}
