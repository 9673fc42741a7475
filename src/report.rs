//! Column registries for the three reward views and their CSV rendering.

use crate::aggregate::{RewardsSummary, DISPLAY_DATE, MONTH_YEAR};
use crate::error::Result;
use crate::table::{format_cell, Column, TableRow, TableView};
use std::io::Write;

/// Printed instead of the tables when no transaction falls in the window.
pub const NO_DATA_MESSAGE: &str = "No customer data is found";

pub const TRANSACTIONS_TITLE: &str = "Transactions";
pub const MONTHLY_TITLE: &str = "User Monthly Rewards";
pub const CUSTOMERS_TITLE: &str = "Total Rewards";

/// Columns of the per-transaction view.
pub fn transaction_columns() -> Vec<Column> {
    vec![
        Column::plain("transactionId", "Transaction Id"),
        Column::plain("customerName", "Customer Name"),
        Column::date("purchaseDate", "Purchase Date", DISPLAY_DATE),
        Column::plain("product", "Product"),
        Column::numeric("price", "Price").currency(),
        Column::numeric("rewardPoints", "Reward Points"),
    ]
}

/// Columns of the per-customer-per-month view.
pub fn monthly_columns() -> Vec<Column> {
    vec![
        Column::plain("customerId", "Customer ID"),
        Column::plain("customerName", "Customer Name"),
        Column::date("monthYear", "Month", MONTH_YEAR),
        Column::numeric("rewards", "Rewards"),
    ]
}

/// Columns of the per-customer view.
pub fn customer_columns() -> Vec<Column> {
    vec![
        Column::plain("customerName", "Customer Name"),
        Column::numeric("rewards", "Rewards"),
    ]
}

/// Writes one titled table: a title line, a header of column labels, then
/// every row in the view's sort order.
pub fn write_table<W, R>(writer: &mut W, title: &str, view: &TableView, rows: &[R]) -> Result<()>
where
    W: Write,
    R: TableRow,
{
    writeln!(writer, "{}", title)?;

    let mut csv_writer = csv::Writer::from_writer(&mut *writer);
    csv_writer.write_record(view.columns().iter().map(|c| c.label))?;

    for row in view.sorted(rows) {
        csv_writer.write_record(
            view.columns()
                .iter()
                .map(|column| format_cell(column, &row.cell(column.id))),
        )?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes the three views, separated by blank lines, each sorted by its
/// first column ascending.
pub fn write_report<W: Write>(summary: &RewardsSummary, mut writer: W) -> Result<()> {
    if summary.is_empty() {
        writeln!(writer, "{}", NO_DATA_MESSAGE)?;
        return Ok(());
    }

    write_table(
        &mut writer,
        TRANSACTIONS_TITLE,
        &TableView::new(transaction_columns()),
        &summary.transactions,
    )?;
    writeln!(writer)?;
    write_table(
        &mut writer,
        MONTHLY_TITLE,
        &TableView::new(monthly_columns()),
        &summary.monthly,
    )?;
    writeln!(writer)?;
    write_table(
        &mut writer,
        CUSTOMERS_TITLE,
        &TableView::new(customer_columns()),
        &summary.customers,
    )?;

    writer.flush()?;
    Ok(())
}
