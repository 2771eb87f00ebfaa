use std::time::Duration;

use chrono::Local;
use engine::{
    Anchor, Calculator, CivilDate, Currency, Key, LoanResult, LoanTerms, PercentRelation,
    PercentSolution, calendar, currency, expression::format_number,
};
use rates::{HttpRateSource, RateBook};

use crate::{
    cli::{AgeArgs, CalcArgs, Command, ConvertArgs, DiscountArgs, LoanArgs, TenureArgs},
    error::{AppError, Result},
    keypad,
    settings::Settings,
};

pub async fn run(command: Command, settings: &Settings) -> Result<()> {
    let output = match command {
        Command::Age(args) => age(&args)?,
        Command::Tenure(args) => tenure(&args)?,
        Command::Discount(args) => discount(&args)?,
        Command::Loan(args) => loan(&args)?,
        Command::Convert(args) => convert(&args, settings).await?,
        Command::Calc(CalcArgs { keys: Some(keys) }) => replay(&keys)?,
        Command::Calc(CalcArgs { keys: None }) => return keypad::run(),
        Command::Currencies => currencies(),
    };
    println!("{output}");
    Ok(())
}

fn age(args: &AgeArgs) -> Result<String> {
    let today = args.today.unwrap_or_else(CivilDate::today);
    let interval = calendar::age(args.birth, today)?;
    tracing::debug!(birth = %args.birth, %today, ?interval, "age computed");
    Ok(interval.to_string())
}

fn tenure(args: &TenureArgs) -> Result<String> {
    let interval = calendar::tenure(args.start, args.end)?;
    tracing::debug!(start = %args.start, end = ?args.end, ?interval, "tenure computed");
    Ok(interval.to_string())
}

fn discount(args: &DiscountArgs) -> Result<String> {
    let relation = PercentRelation::anchored(
        args.anchor.map_or(Anchor::Original, Anchor::from),
        args.original,
        args.discounted,
        args.percent,
    );
    let solution = engine::percent::solve(&relation)?;
    Ok(discount_lines(&solution))
}

fn discount_lines(solution: &PercentSolution) -> String {
    format!(
        "Original:   {}\nDiscounted: {}\nPercent:    {:.2}%\nSaved:      {}",
        solution.original,
        solution.discounted,
        solution.percent,
        solution.saved
    )
}

fn loan(args: &LoanArgs) -> Result<String> {
    let terms = match (args.months, args.years) {
        (Some(months), _) => LoanTerms {
            principal: args.principal,
            annual_rate_percent: args.rate,
            term_months: months,
        },
        (None, Some(years)) => LoanTerms::from_years(args.principal, args.rate, years)?,
        (None, None) => {
            return Err(AppError::Input("either --months or --years is required".to_string()));
        }
    };
    let result = engine::loan::amortize(&terms)?;
    Ok(loan_lines(&terms, &result))
}

fn loan_lines(terms: &LoanTerms, result: &LoanResult) -> String {
    format!(
        "Term:            {} months ({} years)\nMonthly payment: {}\nTotal payment:   {}\nTotal interest:  {}",
        terms.term_months,
        format_number(terms.term_years()),
        result.monthly_payment,
        result.total_payment,
        result.total_interest
    )
}

async fn convert(args: &ConvertArgs, settings: &Settings) -> Result<String> {
    let (from, to) = resolve_pair(args, settings);
    if from == to {
        let converted = currency::convert(args.amount, 1.0)?;
        return Ok(format!("{} {from} = {converted} {to}", args.amount));
    }

    let source = HttpRateSource::new(
        &settings.rates_url,
        Duration::from_secs(settings.rates_timeout_secs),
    )?;
    let mut book = RateBook::new(source);
    let fetched_at = book.refresh(from).await?.fetched_at();
    let converted = book.convert(args.amount, from, to)?;

    Ok(format!(
        "{} {from} = {converted} {to}\nRates updated at {}",
        args.amount,
        fetched_at.with_timezone(&Local).format("%H:%M")
    ))
}

fn resolve_pair(args: &ConvertArgs, settings: &Settings) -> (Currency, Currency) {
    let from = args.from.unwrap_or(settings.from_currency);
    let to = args.to.unwrap_or(settings.to_currency);
    if args.swap { (to, from) } else { (from, to) }
}

fn replay(keys: &str) -> Result<String> {
    let mut calc = Calculator::new();
    for c in keys.chars().filter(|c| !c.is_whitespace()) {
        let key = Key::from_char(c)
            .ok_or_else(|| AppError::Input(format!("unknown calculator key: {c:?}")))?;
        calc.press(key);
    }
    Ok(keypad::render(&calc))
}

fn currencies() -> String {
    Currency::ALL
        .iter()
        .map(|currency| format!("{}  {}", currency.code(), currency.name()))
        .collect::<Vec<_>>()
        .join("\n")
}
