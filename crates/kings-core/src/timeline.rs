//! Millisecond timeline of a game: when each card was drawn and, for aces,
//! when the chug began and ended. All values are offsets from game start.

use crate::model::card::Card;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

/// Fixed reaction delay the old recorder assumed between drawing an ace and
/// starting to drink. Only used when upgrading timestamp-based records.
pub const LEGACY_CHUG_LATENCY_MS: i64 = 2137;

/// Seconds to whole milliseconds, rounding half away from zero.
pub fn seconds_to_ms(seconds: f64) -> i64 {
    (seconds * 1000.0).round() as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChugInterval {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl ChugInterval {
    /// Interval beginning `before_begin_ms` after the draw and lasting
    /// `duration_ms`. A non-positive duration means nobody chugged.
    pub fn after_draw(start_delta_ms: i64, before_begin_ms: i64, duration_ms: i64) -> Option<Self> {
        if duration_ms <= 0 {
            return None;
        }
        let start_ms = start_delta_ms.saturating_add(before_begin_ms.max(0));
        Some(Self {
            start_ms,
            end_ms: start_ms.saturating_add(duration_ms),
        })
    }

    /// Interval for an upgraded timestamp record, which only stored the
    /// chug duration. Only aces chug.
    pub fn legacy(card: Card, start_delta_ms: i64, duration_ms: Option<i64>) -> Option<Self> {
        if !card.is_ace() {
            return None;
        }
        Self::after_draw(start_delta_ms, LEGACY_CHUG_LATENCY_MS, duration_ms.unwrap_or(0))
    }
}

/// A drawn card placed on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayEvent {
    pub card: Card,
    pub start_delta_ms: i64,
    pub chug: Option<ChugInterval>,
}

/// What the recorder captured for one draw, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawTiming {
    /// Time since the previous card was drawn, or since the previous chug
    /// ended if that card was an ace.
    pub interval_s: f64,
    #[serde(default)]
    pub before_begin_s: Option<f64>,
    #[serde(default)]
    pub chug_s: Option<f64>,
}

impl RawTiming {
    pub fn interval(interval_s: f64) -> Self {
        Self {
            interval_s,
            ..Self::default()
        }
    }

    pub fn with_chug(mut self, before_begin_s: f64, chug_s: f64) -> Self {
        self.before_begin_s = Some(before_begin_s);
        self.chug_s = Some(chug_s);
        self
    }
}

/// Accumulates play events while keeping start deltas non-decreasing.
#[derive(Debug, Clone, Default)]
pub struct TimelineBuilder {
    cursor_ms: i64,
    events: Vec<PlayEvent>,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue a game whose last recorded draw happened at `cursor_ms`.
    pub fn resume_from(cursor_ms: i64) -> Self {
        Self {
            cursor_ms,
            events: Vec::new(),
        }
    }

    /// Base for the next draw: the previous start delta, or the end of the
    /// previous chug.
    pub fn cursor_ms(&self) -> i64 {
        self.cursor_ms
    }

    pub fn push(&mut self, card: Card, timing: RawTiming) -> PlayEvent {
        let mut interval_ms = seconds_to_ms(timing.interval_s);
        if interval_ms < 0 {
            event!(
                target: "kings_core::timeline",
                Level::WARN,
                card = %card,
                interval_ms,
                "negative interval clamped to zero"
            );
            interval_ms = 0;
        }
        let start_delta_ms = self.cursor_ms.saturating_add(interval_ms);

        let chug = if card.is_ace() {
            let before_begin_ms = timing.before_begin_s.map(seconds_to_ms).unwrap_or(0);
            let duration_ms = timing.chug_s.map(seconds_to_ms).unwrap_or(0);
            ChugInterval::after_draw(start_delta_ms, before_begin_ms, duration_ms)
        } else {
            if timing.chug_s.is_some() {
                event!(
                    target: "kings_core::timeline",
                    Level::DEBUG,
                    card = %card,
                    "ignoring chug timing on a non-ace"
                );
            }
            None
        };

        self.cursor_ms = chug.map_or(start_delta_ms, |c| c.end_ms);
        let play = PlayEvent {
            card,
            start_delta_ms,
            chug,
        };
        self.events.push(play);
        play
    }

    pub fn events(&self) -> &[PlayEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<PlayEvent> {
        self.events
    }
}

/// Place a whole sequence of draws on a timeline starting at zero.
pub fn build_timeline<I>(draws: I) -> Vec<PlayEvent>
where
    I: IntoIterator<Item = (Card, RawTiming)>,
{
    let mut builder = TimelineBuilder::new();
    for (card, timing) in draws {
        builder.push(card, timing);
    }
    builder.into_events()
}
