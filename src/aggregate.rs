//! Reward aggregation views.
//!
//! Each view is a single fold over the (already date-filtered) transactions.
//! Groups appear in the order their first transaction was seen; display order
//! is left to [`TableView`](crate::table::TableView).

use crate::reward::calculate_rewards;
use crate::table::{CellValue, TableRow};
use crate::transaction::{Identifier, Price, Transaction};
use chrono::Datelike;
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Display pattern for purchase dates in the transaction view.
pub const DISPLAY_DATE: &str = "%d/%m/%Y";

/// Display pattern for the month column of the monthly view.
pub const MONTH_YEAR: &str = "%b %Y";

/// One transaction with the points it earned.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRewards {
    pub transaction_id: Identifier,
    pub customer_name: String,

    /// `dd/mm/yyyy`, or the raw input when it is not a valid date
    pub purchase_date: String,

    pub product: String,
    pub price: Price,
    pub reward_points: u64,
}

/// Total points earned by one customer name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRewards {
    pub customer_name: String,
    pub rewards: u64,
}

/// Points earned by one customer within one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyRewards {
    pub customer_id: Identifier,
    pub customer_name: String,

    /// Abbreviated month and year, e.g. `Jan 2025`
    pub month_year: String,

    pub rewards: u64,
}

/// Projects each transaction to a row carrying its reward points.
pub fn rewards_by_transaction<'a, I>(transactions: I) -> Vec<TransactionRewards>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .map(|tx| {
            let purchase_date = match tx.purchased_on() {
                Some(date) => date.format(DISPLAY_DATE).to_string(),
                None => tx.purchase_date.clone().unwrap_or_default(),
            };

            TransactionRewards {
                transaction_id: tx.transaction_id.clone(),
                customer_name: tx.customer_name.clone(),
                purchase_date,
                product: tx.product.clone(),
                price: tx.price.clone(),
                reward_points: calculate_rewards(&tx.price),
            }
        })
        .collect()
}

/// Sums reward points per customer name.
pub fn rewards_by_customer<'a, I>(transactions: I) -> Vec<CustomerRewards>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<CustomerRewards> = Vec::new();

    for tx in transactions {
        let points = calculate_rewards(&tx.price);
        let slot = *index.entry(tx.customer_name.as_str()).or_insert_with(|| {
            rows.push(CustomerRewards {
                customer_name: tx.customer_name.clone(),
                rewards: 0,
            });
            rows.len() - 1
        });
        rows[slot].rewards = rows[slot].rewards.saturating_add(points);
    }

    rows
}

/// Sums reward points per customer ID and calendar month.
///
/// Transactions without a valid purchase date cannot be placed in a month
/// and are skipped here, although the other views still count them.
pub fn rewards_by_customer_month<'a, I>(transactions: I) -> Vec<MonthlyRewards>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut index: HashMap<(String, i32, u32), usize> = HashMap::new();
    let mut rows: Vec<MonthlyRewards> = Vec::new();

    for tx in transactions {
        let date = match tx.purchased_on() {
            Some(date) => date,
            None => {
                debug!(
                    "Transaction {}: no valid purchase date, skipped for monthly rewards",
                    tx.transaction_id
                );
                continue;
            }
        };

        let points = calculate_rewards(&tx.price);
        let key = (tx.customer_id.to_string(), date.year(), date.month());
        let slot = *index.entry(key).or_insert_with(|| {
            rows.push(MonthlyRewards {
                customer_id: tx.customer_id.clone(),
                customer_name: tx.customer_name.clone(),
                month_year: date.format(MONTH_YEAR).to_string(),
                rewards: 0,
            });
            rows.len() - 1
        });
        rows[slot].rewards = rows[slot].rewards.saturating_add(points);
    }

    rows
}

/// The three reward views computed over the same transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewardsSummary {
    pub transactions: Vec<TransactionRewards>,
    pub monthly: Vec<MonthlyRewards>,
    pub customers: Vec<CustomerRewards>,
}

impl RewardsSummary {
    /// Computes every view from scratch.
    pub fn compute(transactions: &[&Transaction]) -> Self {
        RewardsSummary {
            transactions: rewards_by_transaction(transactions.iter().copied()),
            monthly: rewards_by_customer_month(transactions.iter().copied()),
            customers: rewards_by_customer(transactions.iter().copied()),
        }
    }

    /// Returns `true` if there were no transactions to summarize.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Total points across all transactions, saturating at `u64::MAX`.
    pub fn total_points(&self) -> u64 {
        self.transactions
            .iter()
            .map(|row| row.reward_points)
            .fold(0, u64::saturating_add)
    }
}

fn identifier_cell(id: &Identifier) -> CellValue {
    match id {
        Identifier::Number(number) => CellValue::Number(*number),
        Identifier::Text(text) => CellValue::text(text),
    }
}

impl TableRow for TransactionRewards {
    fn cell(&self, column: &str) -> CellValue {
        match column {
            "transactionId" => identifier_cell(&self.transaction_id),
            "customerName" => CellValue::text(&self.customer_name),
            "purchaseDate" => CellValue::text(&self.purchase_date),
            "product" => CellValue::text(&self.product),
            "price" => match &self.price {
                Price::Missing => CellValue::Empty,
                Price::Amount(amount) => CellValue::Number(*amount),
                Price::Text(text) => CellValue::text(text),
            },
            "rewardPoints" => CellValue::Number(Decimal::from(self.reward_points)),
            _ => CellValue::Empty,
        }
    }
}

impl TableRow for CustomerRewards {
    fn cell(&self, column: &str) -> CellValue {
        match column {
            "customerName" => CellValue::text(&self.customer_name),
            "rewards" => CellValue::Number(Decimal::from(self.rewards)),
            _ => CellValue::Empty,
        }
    }
}

impl TableRow for MonthlyRewards {
    fn cell(&self, column: &str) -> CellValue {
        match column {
            "customerId" => identifier_cell(&self.customer_id),
            "customerName" => CellValue::text(&self.customer_name),
            "monthYear" => CellValue::text(&self.month_year),
            "rewards" => CellValue::Number(Decimal::from(self.rewards)),
            _ => CellValue::Empty,
        }
    }
}
