use colored::*;
use lending_common::config::LendingConfig;
use lending_core::FeeCalculator;
use rust_decimal::Decimal;

use crate::terminal::{colors, print};

pub fn quote(rate: Decimal, days: i64, late: Option<i64>, cfg: &LendingConfig) -> anyhow::Result<()> {
    let fees = FeeCalculator::from_config(cfg);
    let total = fees.compute_total_fee(rate, days)?;

    print::header("rental quote", cfg.quiet);
    print::aligned_line("Daily rate", rate.to_string());
    print::aligned_line("Days", days.to_string());
    print::aligned_line("Total fee", total.to_string().color(colors::MONEY).bold());

    if let Some(days_late) = late {
        let late_fee = fees.compute_late_fee(rate, days_late)?;
        print::aligned_line("Late rate", format!("{} / day", fees.late_fee_rate()));
        print::aligned_line("Days late", days_late.to_string());
        print::aligned_line("Late fee", late_fee.to_string().color(colors::MONEY).bold());
    }
    Ok(())
}
