//! Comparison tables
//!
//! Terminal rendering of a [`Comparison`]. Amounts are rounded to minor units
//! here and nowhere else.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows, Segment},
        style::BorderColor,
    },
};
use thiserror::Error;

use crate::{comparison::Comparison, optimizer::StoreCostSummary};

/// Errors that can occur while writing a comparison.
#[derive(Debug, Error)]
pub enum ReportError {
    /// An amount could not be represented in minor units.
    #[error("amount {0} cannot be displayed")]
    Amount(Decimal),

    /// The requested store is not part of the comparison.
    #[error("store {0} is not in the comparison")]
    UnknownStore(String),

    /// Writing to the output failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Comparison {
    /// Write the ranking table and a savings summary.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] if an amount can't be formatted or the output
    /// can't be written to.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        if self.is_empty() {
            writeln!(out, "\n Cart is empty, nothing to compare.\n")?;
            return Ok(());
        }

        let mut builder = Builder::default();

        builder.push_record(["", "Store", "Estimated", "Confirmed", "In Catalogue", ""]);

        for (rank, summary) in self.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", rank + 1),
                summary.store_name.clone(),
                format_money(summary.total_estimated_cost, self.currency())?,
                format_money(summary.confirmed_cost, self.currency())?,
                confirmation_label(summary),
                if rank == 0 {
                    "cheapest".to_string()
                } else {
                    String::new()
                },
            ]);
        }

        let mut table = builder.build();

        table.with(theme());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..4), Alignment::right());

        // header is row 0
        table.modify((1, 2), Color::FG_GREEN);
        table.modify((1, 5), Color::FG_GREEN);

        table.modify(Segment::all(), BorderColor::filled(color_dark_grey()));

        writeln!(out, "\n{table}")?;

        self.write_summary(&mut out)
    }

    /// Write the catalogue-confirmed lines for one store.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::UnknownStore`] if the store wasn't compared, or
    /// another [`ReportError`] if the output can't be written.
    pub fn write_store_detail(
        &self,
        mut out: impl io::Write,
        store_id: &str,
    ) -> Result<(), ReportError> {
        let summary = self
            .summary_for(store_id)
            .ok_or_else(|| ReportError::UnknownStore(store_id.to_string()))?;

        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit Price", "Line Total"]);

        for line in summary.confirmed_lines() {
            let line_total = line
                .line_total()
                .map_err(|_overflow| ReportError::Amount(line.resolved_unit_price))?;

            builder.push_record([
                line.product_name.clone(),
                line.quantity.to_string(),
                format_money(line.resolved_unit_price, self.currency())?,
                format_money(line_total, self.currency())?,
            ]);
        }

        let mut table = builder.build();

        table.with(theme());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..4), Alignment::right());
        table.modify(Segment::all(), BorderColor::filled(color_dark_grey()));

        writeln!(
            out,
            "\n \x1b[1m{}\x1b[0m: {}",
            summary.store_name,
            confirmation_label(summary)
        )?;
        writeln!(out, "{table}\n")?;

        Ok(())
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReportError> {
        let Some(cheapest) = self.cheapest() else {
            return Ok(());
        };

        let savings = format_money(self.savings(), self.currency())?;
        let savings_points = percent_points(self.savings_percent());

        writeln!(out, " \x1b[1mCheapest:\x1b[0m {}", cheapest.store_name)?;
        writeln!(out, " Savings:  ({savings_points:.2}%) {savings}")?;

        if !cheapest.is_fully_confirmed() {
            writeln!(
                out,
                " \x1b[90m{} of {} lines estimated from other stores' prices\x1b[0m",
                cheapest.unconfirmed_line_count,
                cheapest.line_count()
            )?;
        }

        writeln!(out)?;

        Ok(())
    }
}

/// "N/M" count of catalogue-backed lines.
fn confirmation_label(summary: &StoreCostSummary) -> String {
    format!(
        "{}/{} confirmed",
        summary.confirmed_line_count(),
        summary.line_count()
    )
}

/// Round an amount half away from zero to minor units and format it.
fn format_money(amount: Decimal, currency: &'static Currency) -> Result<String, ReportError> {
    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .map(|value| value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|value| value.to_i64())
        .ok_or(ReportError::Amount(amount))?;

    Ok(format!("{}", Money::from_minor(minor_units, currency)))
}

/// Converts a fractional percentage to percent points for display.
fn percent_points(percentage: Percentage) -> Decimal {
    ((percentage * Decimal::ONE) * Decimal::new(100, 0)).round_dp(2)
}

fn theme() -> Theme {
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    theme
}

/// Dim grey for table borders.
fn color_dark_grey() -> Color {
    Color::new("\x1b[90m", "\x1b[0m")
}
