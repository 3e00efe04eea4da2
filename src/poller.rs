use std::time::Duration;

use tracing::{debug, error, info};

use crate::api::ReviewApi;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::notifier::Notifier;
use crate::response::{check_response, has_no_updates, response_cursor};
use crate::status::parse_status;

/// Loop settings derived once from `Config`.
#[derive(Debug, Clone, PartialEq)]
pub struct PollerSettings {
    pub poll_interval: Duration,
    pub from_date: i64,
    pub advance_cursor: bool,
}

impl From<&Config> for PollerSettings {
    fn from(config: &Config) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            from_date: config.from_date,
            advance_cursor: config.advance_cursor,
        }
    }
}

/// The only state that changes between cycles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollState {
    pub cursor: i64,
    pub last_message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status message was delivered.
    Notified,
    /// Same message as last time; nothing sent.
    Unchanged,
    /// The cycle failed and the failure was reported to the chat.
    Reported,
    /// The cycle failed and reporting the failure also failed.
    ReportFailed,
    /// Delivering the status message failed; logged only.
    NotifyFailed,
}

pub struct Poller<A, N> {
    api: A,
    notifier: N,
    settings: PollerSettings,
    state: PollState,
}

impl<A: ReviewApi, N: Notifier> Poller<A, N> {
    pub fn new(api: A, notifier: N, settings: PollerSettings) -> Self {
        let state = PollState {
            cursor: settings.from_date,
            last_message: None,
        };
        Self {
            api,
            notifier,
            settings,
            state,
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Poll forever, or until `max_cycles` cycles have run. Sleeps the poll
    /// interval after every cycle, whatever its outcome.
    pub fn run(&mut self, max_cycles: Option<u32>) {
        let mut cycles = 0u32;
        loop {
            let outcome = self.run_cycle();
            cycles += 1;
            debug!(?outcome, cycles, "poll cycle finished");

            if let Some(max) = max_cycles
                && cycles >= max
            {
                info!(max, "reached max cycles, exiting");
                return;
            }

            debug!(
                poll_seconds = self.settings.poll_interval.as_secs(),
                "sleeping until next poll"
            );
            std::thread::sleep(self.settings.poll_interval);
        }
    }

    /// One fetch → validate → format → notify pass. Never fails: every error
    /// is logged and, unless the chat itself is broken, reported.
    pub fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll() {
            Ok(outcome) => outcome,
            Err(e @ Error::RemoteApi(_)) => {
                error!(error = %e, "review API failure");
                self.report(&e)
            }
            Err(e @ Error::Notify(_)) => {
                error!(error = %e, "failed to deliver status message");
                CycleOutcome::NotifyFailed
            }
            Err(e) => {
                error!(error = %e, "poll cycle failed");
                self.report(&e)
            }
        }
    }

    fn poll(&mut self) -> Result<CycleOutcome> {
        let body = self.api.homework_statuses(self.state.cursor)?;

        // Past the first poll an advancing cursor legitimately yields nothing.
        if self.settings.advance_cursor && has_no_updates(&body) {
            debug!(cursor = self.state.cursor, "no submissions updated since cursor");
            self.advance_cursor(&body);
            return Ok(CycleOutcome::Unchanged);
        }

        let homework = check_response(&body)?;
        let message = parse_status(&homework)?;

        if self.state.last_message.as_deref() == Some(message.as_str()) {
            debug!("status unchanged");
            self.advance_cursor(&body);
            return Ok(CycleOutcome::Unchanged);
        }

        self.notifier.send(&message)?;
        info!(text = %message, "status change reported");
        self.state.last_message = Some(message);
        self.advance_cursor(&body);
        Ok(CycleOutcome::Notified)
    }

    fn advance_cursor(&mut self, body: &serde_json::Value) {
        if self.settings.advance_cursor
            && let Some(cursor) = response_cursor(body)
        {
            debug!(cursor, "advancing poll cursor");
            self.state.cursor = cursor;
        }
    }

    fn report(&self, err: &Error) -> CycleOutcome {
        let message = failure_message(err);
        match self.notifier.send(&message) {
            Ok(()) => CycleOutcome::Reported,
            Err(send_err) => {
                error!(error = %send_err, "failed to report failure to chat");
                CycleOutcome::ReportFailed
            }
        }
    }
}

pub fn failure_message(err: &Error) -> String {
    format!("Bot failure: {err}")
}
