use chrono::{NaiveTime, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::content::SessionPhase;

/// Half-open `[start, end)` window in minutes of the US Eastern trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionWindow {
    start: u16,
    end: u16,
}

impl SessionWindow {
    pub const fn new(start_hour: u16, start_minute: u16, end_hour: u16, end_minute: u16) -> Self {
        Self {
            start: start_hour * 60 + start_minute,
            end: end_hour * 60 + end_minute,
        }
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        let minute = (time.hour() * 60 + time.minute()) as u16;
        (self.start..self.end).contains(&minute)
    }
}

impl fmt::Display for SessionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02} – {:02}:{:02} ET",
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60
        )
    }
}

impl Serialize for SessionWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub fn phase_at(phases: &[SessionPhase], time: NaiveTime) -> Option<&SessionPhase> {
    phases.iter().find(|p| p.window.contains(time))
}
