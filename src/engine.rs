//! Reward points engine.
//!
//! Loads a JSON array of purchase transactions once, then answers any number
//! of date-window queries against it. Every query recomputes its views from
//! scratch; the engine keeps nothing but the loaded transactions.

use crate::aggregate::RewardsSummary;
use crate::error::Result;
use crate::filter::DateWindow;
use crate::report;
use crate::transaction::Transaction;
use log::{info, warn};
use std::io::{Read, Write};

/// Holds loaded transactions and derives reward views from them.
#[derive(Debug, Default)]
pub struct RewardsEngine {
    transactions: Vec<Transaction>,
}

impl RewardsEngine {
    /// Creates a new empty engine.
    pub fn new() -> Self {
        RewardsEngine {
            transactions: Vec::new(),
        }
    }

    /// Creates an engine over already materialized transactions.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        RewardsEngine { transactions }
    }

    /// Reads a JSON array of transactions and appends them.
    ///
    /// The input must be an array; elements that are not transaction objects
    /// are logged at warn level and skipped.
    pub fn load_json<R: Read>(&mut self, reader: R) -> Result<()> {
        let values: Vec<serde_json::Value> = serde_json::from_reader(reader)?;
        let total = values.len();

        for (idx, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<Transaction>(value) {
                Ok(tx) => self.transactions.push(tx),
                Err(e) => warn!("Record {}: skipping invalid transaction: {}", idx, e),
            }
        }

        info!(
            "Loaded {} of {} transaction records",
            self.transactions.len(),
            total
        );
        Ok(())
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions purchased inside the window, in input order.
    pub fn filter(&self, window: &DateWindow) -> Vec<&Transaction> {
        window.apply(&self.transactions)
    }

    /// Computes the three reward views for the window.
    pub fn summarize(&self, window: &DateWindow) -> RewardsSummary {
        let filtered = self.filter(window);
        if filtered.is_empty() {
            warn!(
                "No transactions between {} and {}",
                window.from, window.to
            );
        }
        RewardsSummary::compute(&filtered)
    }

    /// Writes the reward report for the window as CSV sections.
    pub fn write_report<W: Write>(&self, window: &DateWindow, writer: W) -> Result<()> {
        let summary = self.summarize(window);
        report::write_report(&summary, writer)
    }
}
