//! # Reward Points
//!
//! Computes loyalty reward points for purchase transactions and summarizes
//! them per transaction, per customer, and per customer per month.
//!
//! ## Design Principles
//!
//! - **Tiered pricing rule**: 1 point per unit over 50, 2 per unit over 100
//! - **Silent degradation**: Bad prices earn 0, bad dates drop out of the filter
//! - **Derived views**: Recomputed from scratch for every date window
//! - **Stable display order**: Views keep first-seen order; [`TableView`] sorts
//!
//! ## Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use reward_points::{DateWindow, RewardsEngine};
//! use std::io::Cursor;
//!
//! let json = r#"[{"transactionId":"T1","customerId":"C1","customerName":"Alice",
//!                 "purchaseDate":"2025-01-15","product":"Lamp","price":120}]"#;
//! let mut engine = RewardsEngine::new();
//! engine.load_json(Cursor::new(json)).unwrap();
//!
//! let today = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
//! let window = DateWindow::last_three_months(today);
//! engine.write_report(&window, std::io::stdout()).unwrap();
//! ```

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod filter;
pub mod report;
pub mod reward;
pub mod table;
pub mod transaction;

pub use aggregate::{
    rewards_by_customer, rewards_by_customer_month, rewards_by_transaction, CustomerRewards,
    MonthlyRewards, RewardsSummary, TransactionRewards,
};
pub use engine::RewardsEngine;
pub use error::{Result, RewardsError};
pub use filter::{filter_by_purchase_date, parse_date_argument, parse_purchase_date, DateWindow};
pub use reward::calculate_rewards;
pub use table::{CellDisplay, CellValue, Column, ColumnKind, SortDirection, TableRow, TableView};
pub use transaction::{Identifier, Price, Transaction};
