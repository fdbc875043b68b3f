//! Action logging with pattern-based filtering and in-memory history
//!
//! Applied actions are logged through `tracing` and, optionally, kept in a
//! ring buffer so a caller can print the recent history. Entries are recorded
//! once the reducer has run, so a debounced action shows up once, when its
//! final value is applied, rather than once per keystroke.
//!
//! # Example
//!
//! ```ignore
//! use form_dispatch::logger::{ActionLogConfig, ActionLoggerConfig, ActionLoggerMiddleware};
//!
//! // Everything except the section toggles, with history
//! let filter = ActionLoggerConfig::new(None, Some("SHOW_*"));
//! let middleware = ActionLoggerMiddleware::with_log(ActionLogConfig::new(50, filter));
//!
//! if let Some(log) = middleware.log() {
//!     for entry in log.recent(10) {
//!         println!("#{} {}", entry.sequence, entry.summary);
//!     }
//! }
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::action::{ActionSummary, DebounceKey};
use crate::store::Middleware;

/// Include / exclude filter over action names, using glob patterns.
///
/// Patterns support:
/// - `*` matches any sequence of characters
/// - `?` matches any single character
/// - Literal text matches exactly
///
/// # Examples
///
/// - `UPDATE_*` matches UPDATE_WEIGHT, UPDATE_PUBLISHER, etc.
/// - `SHOW_*` matches SHOW_PHYSICAL and SHOW_EDITION_GROUP
/// - `*_DATE` matches UPDATE_RELEASE_DATE
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionLoggerConfig {
    /// If non-empty, only log actions matching these patterns
    pub include_patterns: Vec<String>,
    /// Exclude actions matching these patterns (applied after include)
    pub exclude_patterns: Vec<String>,
}

impl ActionLoggerConfig {
    /// Create a new config from comma-separated pattern strings
    ///
    /// # Example
    /// ```
    /// use form_dispatch_core::logger::ActionLoggerConfig;
    ///
    /// let config = ActionLoggerConfig::new(Some("UPDATE_*"), Some("UPDATE_LANGUAGES"));
    /// assert!(config.should_log("UPDATE_WEIGHT"));
    /// assert!(!config.should_log("UPDATE_LANGUAGES"));
    /// assert!(!config.should_log("SHOW_PHYSICAL"));
    /// ```
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Self {
        Self {
            include_patterns: include.map(split_patterns).unwrap_or_default(),
            exclude_patterns: exclude.map(split_patterns).unwrap_or_default(),
        }
    }

    /// Create a config with specific pattern vectors
    pub fn with_patterns(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self {
            include_patterns: include,
            exclude_patterns: exclude,
        }
    }

    /// Check if an action name should be logged based on include/exclude patterns
    pub fn should_log(&self, action_name: &str) -> bool {
        if !self.include_patterns.is_empty()
            && !self
                .include_patterns
                .iter()
                .any(|p| glob_match(p, action_name))
        {
            return false;
        }

        !self
            .exclude_patterns
            .iter()
            .any(|p| glob_match(p, action_name))
    }
}

fn split_patterns(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

/// An entry in the action log
#[derive(Debug, Clone)]
pub struct ActionLogEntry {
    /// Action name (from Action::name())
    pub name: &'static str,
    /// Summary representation (from ActionSummary::summary())
    pub summary: String,
    /// Debounce key the action was tagged with, if any
    pub debounce: Option<DebounceKey>,
    /// Sequence number for ordering
    pub sequence: u64,
    /// Whether applying the action changed the state
    pub state_changed: bool,
    /// When the action was applied
    pub timestamp: Instant,
}

impl ActionLogEntry {
    /// Time since this action was applied
    pub fn elapsed(&self) -> Duration {
        self.timestamp.elapsed()
    }
}

/// Configuration for the action log ring buffer
#[derive(Debug, Clone)]
pub struct ActionLogConfig {
    /// Maximum number of entries to keep
    pub capacity: usize,
    pub filter: ActionLoggerConfig,
}

impl Default for ActionLogConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            filter: ActionLoggerConfig::default(),
        }
    }
}

impl ActionLogConfig {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    pub fn new(capacity: usize, filter: ActionLoggerConfig) -> Self {
        Self { capacity, filter }
    }
}

/// In-memory ring buffer of recently applied actions
///
/// Older entries are discarded once capacity is reached.
#[derive(Debug, Clone)]
pub struct ActionLog {
    entries: VecDeque<ActionLogEntry>,
    config: ActionLogConfig,
    next_sequence: u64,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new(ActionLogConfig::default())
    }
}

impl ActionLog {
    pub fn new(config: ActionLogConfig) -> Self {
        Self {
            entries: VecDeque::with_capacity(config.capacity),
            config,
            next_sequence: 0,
        }
    }

    /// Record an applied action (if it passes the filter)
    ///
    /// Returns the entry if it was recorded, None if filtered out.
    pub fn record<A: ActionSummary>(
        &mut self,
        action: &A,
        state_changed: bool,
    ) -> Option<&ActionLogEntry> {
        let name = action.name();
        if self.config.capacity == 0 || !self.config.filter.should_log(name) {
            return None;
        }

        let entry = ActionLogEntry {
            name,
            summary: action.summary(),
            debounce: action.meta().map(|m| m.debounce),
            sequence: self.next_sequence,
            state_changed,
            timestamp: Instant::now(),
        };
        self.next_sequence += 1;

        if self.entries.len() >= self.config.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
        self.entries.back()
    }

    /// Get all entries (oldest first)
    pub fn entries(&self) -> impl Iterator<Item = &ActionLogEntry> {
        self.entries.iter()
    }

    /// Get the most recent N entries (newest first)
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &ActionLogEntry> {
        self.entries.iter().rev().take(count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn config(&self) -> &ActionLogConfig {
        &self.config
    }
}

/// Middleware that logs applied actions with configurable pattern filtering.
///
/// Supports two modes:
/// - **Tracing only**: logs via `tracing::debug!()`
/// - **With history**: also keeps an [`ActionLog`] ring buffer
///
/// Never holds actions back.
#[derive(Debug, Clone)]
pub struct ActionLoggerMiddleware {
    config: ActionLoggerConfig,
    log: Option<ActionLog>,
    active: bool,
}

impl ActionLoggerMiddleware {
    /// Tracing only, no in-memory history
    pub fn new(config: ActionLoggerConfig) -> Self {
        Self {
            config,
            log: None,
            active: true,
        }
    }

    /// Tracing plus in-memory history
    pub fn with_log(config: ActionLogConfig) -> Self {
        Self {
            config: config.filter.clone(),
            log: Some(ActionLog::new(config)),
            active: true,
        }
    }

    /// No filtering, tracing only
    pub fn log_all() -> Self {
        Self::new(ActionLoggerConfig::default())
    }

    /// Set whether the middleware is active.
    ///
    /// When inactive, actions are neither traced nor recorded.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Get the action log (if history is enabled)
    pub fn log(&self) -> Option<&ActionLog> {
        self.log.as_ref()
    }

    pub fn log_mut(&mut self) -> Option<&mut ActionLog> {
        self.log.as_mut()
    }

    pub fn config(&self) -> &ActionLoggerConfig {
        &self.config
    }
}

impl<A: ActionSummary> Middleware<A> for ActionLoggerMiddleware {
    fn before(&mut self, _action: &A) -> bool {
        true
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if !self.active {
            return;
        }

        let name = action.name();
        if self.config.should_log(name) {
            let debounce = action.meta().map(|m| m.debounce);
            tracing::debug!(action = %name, ?debounce, state_changed, "action");
        }

        if let Some(ref mut log) = self.log {
            log.record(action, state_changed);
        }
    }
}

/// Simple glob pattern matching supporting `*` and `?`.
///
/// - `*` matches zero or more characters
/// - `?` matches exactly one character
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut pi, mut ti) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while ti < text.len() {
        match pattern.get(pi) {
            Some('*') => {
                backtrack = Some((pi, ti));
                pi += 1;
            }
            Some(&c) if c == '?' || c == text[ti] => {
                pi += 1;
                ti += 1;
            }
            _ => match backtrack {
                // Let the last star swallow one more character
                Some((star_pi, star_ti)) => {
                    backtrack = Some((star_pi, star_ti + 1));
                    pi = star_pi + 1;
                    ti = star_ti + 1;
                }
                None => return false,
            },
        }
    }

    pattern[pi..].iter().all(|&c| c == '*')
}
