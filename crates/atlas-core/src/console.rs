//! The simulated console: a bounded log of interaction traces.
//!
//! Three message kinds share one FIFO buffer: `system` boot/status lines,
//! `interaction` traces fed by the describer, and `personal` fragments a
//! background ticker injects now and then. The buffer is capped at 50 —
//! the console is ambience, not telemetry.

use crate::describe::InteractionDetails;
use rand::Rng;
use std::collections::{HashMap, VecDeque};

/// FIFO capacity; the oldest entries are evicted first.
pub const MAX_MESSAGES: usize = 50;

/// Minimum spacing between two personal fragments.
pub const FRAGMENT_COOLDOWN_MS: u64 = 60_000;

/// Canned decorative lines the ticker draws from.
const PERSONAL_FRAGMENTS: [&str; 9] = [
    "Poisoning this log with a few personal fragments to test the console functionality.",
    "Poisining this log with boring personal fragments",
    "Poisoning this log with contextual fragments to enhance user experience.",
    "Poisoning this log with data to test performance",
    "Poisoning this log with everything I can think of",
    "Poisoning this log with boring messages is a crime against humanity.",
    "Poisoning this log with xssential messages",
    "Poisoning this log with garbage data is a crime against humanity.",
    "Poisoning this log with overly personal fragments is not a good idea.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    System,
    Personal,
    Interaction,
}

/// One log line. Append-only; never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: MessageId,
    pub content: String,
    pub kind: MessageKind,
    pub timestamp_ms: u64,
    pub details: Option<InteractionDetails>,
}

/// The console state: message buffer plus its two UI flags.
#[derive(Debug)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    expanded: bool,
    visible: bool,
    last_fragment_ms: Option<u64>,
    /// Open named timers (start times) for the perf trace lines.
    timers: HashMap<String, u64>,
    next_id: u64,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MAX_MESSAGES),
            expanded: false,
            visible: true,
            last_fragment_ms: None,
            timers: HashMap::new(),
            next_id: 0,
        }
    }

    /// Append an entry; assigns id and timestamp, evicts past the cap.
    pub fn push(
        &mut self,
        content: impl Into<String>,
        kind: MessageKind,
        details: Option<InteractionDetails>,
        now_ms: u64,
    ) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.entries.push_back(LogEntry {
            id,
            content: content.into(),
            kind,
            timestamp_ms: now_ms,
            details,
        });
        while self.entries.len() > MAX_MESSAGES {
            self.entries.pop_front();
        }
        id
    }

    /// Append a random personal fragment, unless one landed within the
    /// cooldown window. Returns the id when a fragment was added.
    pub fn push_personal_fragment<R: Rng>(&mut self, now_ms: u64, rng: &mut R) -> Option<MessageId> {
        if let Some(last) = self.last_fragment_ms
            && now_ms.saturating_sub(last) <= FRAGMENT_COOLDOWN_MS
        {
            return None;
        }
        let fragment = PERSONAL_FRAGMENTS[rng.random_range(0..PERSONAL_FRAGMENTS.len())];
        self.last_fragment_ms = Some(now_ms);
        Some(self.push(fragment, MessageKind::Personal, None, now_ms))
    }

    /// Open a named timer and trace it as a `[PERF]` system line.
    /// Restarting an open timer resets its start time.
    pub fn start_timer(&mut self, name: &str, now_ms: u64) -> MessageId {
        self.timers.insert(name.to_string(), now_ms);
        self.push(
            format!("[PERF] timer:start {name}"),
            MessageKind::System,
            None,
            now_ms,
        )
    }

    /// Close a named timer, trace its duration, and return it.
    /// Ending a timer that was never started is a no-op.
    pub fn end_timer(&mut self, name: &str, now_ms: u64) -> Option<u64> {
        let start = self.timers.remove(name)?;
        let duration = now_ms.saturating_sub(start);
        self.push(
            format!("[PERF] timer:end {name} {duration}ms"),
            MessageKind::System,
            None,
            now_ms,
        );
        Some(duration)
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Read-only snapshot for the display layer, oldest first.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// The background task injecting personal fragments: every 45 s, a 30 %
/// draw, further throttled by the log's own cooldown. Clock and rng are
/// injected so tests can fast-forward and force outcomes.
#[derive(Debug)]
pub struct FragmentTicker {
    interval_ms: u64,
    chance: f64,
    last_tick_ms: u64,
}

impl FragmentTicker {
    pub const DEFAULT_INTERVAL_MS: u64 = 45_000;
    pub const DEFAULT_CHANCE: f64 = 0.3;

    pub fn new(start_ms: u64) -> Self {
        Self {
            interval_ms: Self::DEFAULT_INTERVAL_MS,
            chance: Self::DEFAULT_CHANCE,
            last_tick_ms: start_ms,
        }
    }

    pub fn with_interval(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Fire if due; a probabilistic draw decides whether to inject.
    pub fn tick<R: Rng>(&mut self, log: &mut EventLog, now_ms: u64, rng: &mut R) -> Option<MessageId> {
        if now_ms.saturating_sub(self.last_tick_ms) < self.interval_ms {
            return None;
        }
        self.last_tick_ms = now_ms;
        if rng.random::<f64>() < self.chance {
            log.push_personal_fragment(now_ms, rng)
        } else {
            None
        }
    }
}
