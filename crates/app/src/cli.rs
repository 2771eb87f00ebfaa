use clap::{Args, Parser, Subcommand, ValueEnum};
use engine::{Anchor, CivilDate, Currency, Money};

use crate::settings::Overrides;

#[derive(Parser, Debug)]
#[command(name = "hasiba")]
#[command(about = "Everyday calculators: age, tenure, discount, loan, currency and a keypad")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    /// Override the exchange-rate provider URL.
    #[arg(long, global = true)]
    pub rates_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            config: self.config.clone(),
            log_level: self.log_level.clone(),
            rates_url: self.rates_url.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Age in years, months and days.
    Age(AgeArgs),
    /// Length of service between two dates.
    Tenure(TenureArgs),
    /// Solve original price, discounted price or discount percent.
    Discount(DiscountArgs),
    /// Monthly payment and totals of a fixed-rate loan.
    Loan(LoanArgs),
    /// Convert an amount between currencies using live rates.
    Convert(ConvertArgs),
    /// Keypad calculator; interactive unless `--keys` is given.
    Calc(CalcArgs),
    /// List supported currencies.
    Currencies,
}

#[derive(Args, Debug)]
pub struct AgeArgs {
    /// Birth date (YYYY-MM-DD).
    #[arg(long)]
    pub birth: CivilDate,
    /// Reference date, defaults to today.
    #[arg(long)]
    pub today: Option<CivilDate>,
}

#[derive(Args, Debug)]
pub struct TenureArgs {
    /// First day of service (YYYY-MM-DD).
    #[arg(long)]
    pub start: CivilDate,
    /// Last day of service, defaults to today.
    #[arg(long)]
    pub end: Option<CivilDate>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AnchorArg {
    Original,
    Discounted,
}

impl From<AnchorArg> for Anchor {
    fn from(value: AnchorArg) -> Self {
        match value {
            AnchorArg::Original => Anchor::Original,
            AnchorArg::Discounted => Anchor::Discounted,
        }
    }
}

#[derive(Args, Debug)]
pub struct DiscountArgs {
    /// Price before the discount.
    #[arg(long)]
    pub original: Option<Money>,
    /// Price after the discount.
    #[arg(long)]
    pub discounted: Option<Money>,
    /// Discount percentage in [0, 100).
    #[arg(long)]
    pub percent: Option<f64>,
    /// Price edited last; the other price is derived from it.
    #[arg(long, value_enum)]
    pub anchor: Option<AnchorArg>,
}

#[derive(Args, Debug)]
pub struct LoanArgs {
    /// Amount borrowed.
    #[arg(long)]
    pub principal: Money,
    /// Yearly interest rate in percent (e.g. 5.05).
    #[arg(long)]
    pub rate: f64,
    /// Term in months.
    #[arg(long, conflicts_with = "years", required_unless_present = "years")]
    pub months: Option<u32>,
    /// Term in years (must be a whole number of months).
    #[arg(long)]
    pub years: Option<f64>,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[arg(long, default_value = "1")]
    pub amount: Money,
    /// Source currency, defaults to the configured one.
    #[arg(long)]
    pub from: Option<Currency>,
    /// Target currency, defaults to the configured one.
    #[arg(long)]
    pub to: Option<Currency>,
    /// Swap source and target.
    #[arg(long)]
    pub swap: bool,
}

#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Replay key presses instead of reading the keyboard, e.g. "12+3×4=".
    /// `c` clears, `d` deletes the last character.
    #[arg(long)]
    pub keys: Option<String>,
}
