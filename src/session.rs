//! Client-local view state: `loading → ready | error`.
//!
//! The session owns the single "current ledger" slot. Each successful fetch
//! replaces it wholesale; failures after a good load are recorded but the
//! last good ledger keeps rendering.
//!
//! Outcomes are applied in the order they arrive. A slow request that
//! resolves after a newer one overwrites the newer ledger; there is no
//! sequencing guard.

use std::time::Instant;

use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::model::LedgerData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Nba,
    Lottery,
    Audit,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Nba, Tab::Lottery, Tab::Audit];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Nba => "NBA Bets",
            Tab::Lottery => "Lotteries",
            Tab::Audit => "Audit",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Nba => 0,
            Tab::Lottery => 1,
            Tab::Audit => 2,
        }
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// What the screen should show right now.
#[derive(Debug, PartialEq)]
pub enum View<'a> {
    Loading,
    Error(String),
    Ready(&'a LedgerData),
}

#[derive(Debug)]
pub struct Session {
    loading: bool,
    data: Option<LedgerData>,
    error: Option<String>,
    tab: Tab,
    last_success: Option<Instant>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            loading: true,
            data: None,
            error: None,
            tab: Tab::default(),
            last_success: None,
        }
    }

    /// Fold one fetch outcome into the session.
    pub fn apply(&mut self, outcome: Result<LedgerData>) {
        match outcome {
            Ok(ledger) => {
                info!(
                    bankroll = ledger.nba.current_bankroll,
                    bets = ledger.nba.bets.len(),
                    predictions = ledger.lottery.predictions.len(),
                    "ledger refreshed"
                );
                self.data = Some(ledger);
                self.error = None;
                self.last_success = Some(Instant::now());
            }
            Err(e) => {
                warn!(stale_data_kept = self.data.is_some(), "ledger fetch failed: {e}");
                self.error = Some(e.to_string());
            }
        }
        self.loading = false;
    }

    /// Throw everything away and start over, as a page reload would.
    pub fn reload(&mut self) {
        info!("session reloaded");
        *self = Session::new();
    }

    pub fn view(&self) -> View<'_> {
        if self.loading {
            return View::Loading;
        }
        match (&self.data, &self.error) {
            (Some(ledger), _) => View::Ready(ledger),
            (None, Some(message)) => View::Error(message.clone()),
            (None, None) => View::Error(AppError::MissingData.to_string()),
        }
    }

    pub fn data(&self) -> Option<&LedgerData> {
        self.data.as_ref()
    }

    /// Most recent failure, even when stale data is still on screen.
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_success(&self) -> Option<Instant> {
        self.last_success
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
