//! View state machine: coarse sections, error toast and detail view

use std::fmt;
use std::time::{Duration as StdDuration, Instant};

use thiserror::Error;

use crate::domain::analysis::{AnalysisOutcome, ProvidedModalities, RecommendedItem};

/// How long an error toast stays visible without explicit dismissal
pub const TOAST_TIMEOUT: StdDuration = StdDuration::from_secs(5);

/// Coarse view sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewSection {
    #[default]
    Idle,
    Loading,
    Results,
}

impl ViewSection {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Results => "results",
        }
    }
}

impl fmt::Display for ViewSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("Invalid state transition: cannot {action} while in {current} state")]
    InvalidTransition {
        current: ViewSection,
        action: &'static str,
    },

    #[error("No recommendation #{number} (showing {available})")]
    NoSuchCard { number: usize, available: usize },
}

/// Transient error notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorToast {
    pub message: String,
    pub shown_at: Instant,
}

impl ErrorToast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= TOAST_TIMEOUT
    }
}

/// What the results section currently displays
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub outcome: AnalysisOutcome,
    pub provided: ProvidedModalities,
}

/// View state.
///
/// State machine:
///   IDLE -> LOADING (begin_loading)
///   RESULTS -> LOADING (begin_loading, re-submission)
///   LOADING -> RESULTS (show_results)
///   any -> IDLE (hide_all)
///
/// The toast is orthogonal and may be visible in any section.
#[derive(Debug, Default)]
pub struct ViewState {
    section: ViewSection,
    toast: Option<ErrorToast>,
    results: Option<ResultsView>,
    detail: Option<usize>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self) -> ViewSection {
        self.section
    }

    pub fn is_loading(&self) -> bool {
        self.section == ViewSection::Loading
    }

    /// Enter LOADING. Rejected while a submission is already in flight.
    pub fn begin_loading(&mut self) -> Result<(), ViewError> {
        if self.section == ViewSection::Loading {
            return Err(ViewError::InvalidTransition {
                current: self.section,
                action: "start an analysis",
            });
        }
        self.section = ViewSection::Loading;
        self.results = None;
        self.detail = None;
        Ok(())
    }

    /// Leave LOADING with a settled outcome
    pub fn show_results(
        &mut self,
        outcome: AnalysisOutcome,
        provided: ProvidedModalities,
    ) -> Result<(), ViewError> {
        if self.section != ViewSection::Loading {
            return Err(ViewError::InvalidTransition {
                current: self.section,
                action: "show results",
            });
        }
        self.section = ViewSection::Results;
        self.results = Some(ResultsView { outcome, provided });
        Ok(())
    }

    /// Hide every section and return to IDLE
    pub fn hide_all(&mut self) {
        self.section = ViewSection::Idle;
        self.results = None;
        self.detail = None;
    }

    pub fn results(&self) -> Option<&ResultsView> {
        self.results.as_ref()
    }

    pub fn show_toast(&mut self, message: impl Into<String>, now: Instant) {
        self.toast = Some(ErrorToast {
            message: message.into(),
            shown_at: now,
        });
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    /// The toast, if one is showing and has not timed out
    pub fn visible_toast(&mut self, now: Instant) -> Option<&ErrorToast> {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
        self.toast.as_ref()
    }

    /// Open the detail view of card `number` (1-based)
    pub fn open_detail(&mut self, number: usize) -> Result<&RecommendedItem, ViewError> {
        let Some(results) = self.results.as_ref() else {
            return Err(ViewError::InvalidTransition {
                current: self.section,
                action: "open a recommendation",
            });
        };

        let available = results.outcome.recommendations.len();
        if number == 0 || number > available {
            return Err(ViewError::NoSuchCard { number, available });
        }

        self.detail = Some(number - 1);
        Ok(&results.outcome.recommendations[number - 1])
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn detail(&self) -> Option<&RecommendedItem> {
        let index = self.detail?;
        self.results
            .as_ref()
            .and_then(|r| r.outcome.recommendations.get(index))
    }
}
