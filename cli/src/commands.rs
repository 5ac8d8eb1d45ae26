pub mod quote;
pub mod simulate;

use clap::{Args, Parser, Subcommand};
use lending_common::config::{DEFAULT_LATE_FEE_RATE, DEFAULT_MAX_RENTAL_DAYS, LendingConfig};
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(name = "lending")]
#[command(about = "Book reservations with limited stock, rental and late fees.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Fraction of the daily rate charged per day a book is late
    #[arg(long, global = true, default_value_t = DEFAULT_LATE_FEE_RATE)]
    pub late_fee_rate: Decimal,

    /// Longest rental accepted, in days
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_RENTAL_DAYS)]
    pub max_rental_days: i64,

    /// Print less. Repeat for even less
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Price a rental without reserving anything
    #[command(alias = "q")]
    Quote {
        /// Daily rate of the book
        #[arg(long)]
        rate: Decimal,
        /// Rental duration in days
        #[arg(long)]
        days: i64,
        /// Also price a return this many days late
        #[arg(long)]
        late: Option<i64>,
    },
    /// Race borrowers for a book's copies, then return every loan
    #[command(alias = "s")]
    Simulate(SimulateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Copies of the book on the shelf
    #[arg(long, default_value_t = 1)]
    pub copies: u32,
    /// Borrowers trying to check it out at the same time
    #[arg(long, default_value_t = 8)]
    pub borrowers: u64,
    /// Rental duration requested by each borrower
    #[arg(long, default_value_t = 7)]
    pub days: i64,
    /// Daily rate of the book
    #[arg(long, default_value = "15.99")]
    pub price: Decimal,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> LendingConfig {
        LendingConfig {
            late_fee_rate: self.late_fee_rate,
            max_rental_days: self.max_rental_days,
            quiet: self.quiet,
        }
    }
}
