use std::net::{IpAddr, SocketAddr};

use clap::{Parser, Subcommand};

use crate::codec::parse_currency;
use crate::core::{CompoundInput, InvestmentInput, LoanInput, TradingInput};

#[derive(Parser, Debug)]
#[command(
    name = "fincalc",
    about = "Compound interest, savings plan, two-rate loan and account-multiplication calculators"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the calculator page and JSON API
    Serve(ServeArgs),
    /// Lump sum growing at a compound rate
    Compound(CompoundArgs),
    /// Lump sum plus a fixed monthly contribution
    Investment(InvestmentArgs),
    /// Amortization schedule with a rate change after an initial period
    Loan(LoanArgs),
    /// Daily profit reinvested into new trading accounts
    Trading(TradingArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
}

impl ServeArgs {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Amounts may be typed with separators or a currency symbol, e.g. `100,000,000`.
fn parse_amount(raw: &str) -> Result<f64, String> {
    if let Ok(v) = raw.trim().parse::<f64>() {
        return Ok(v);
    }
    if !raw.chars().any(|c| c.is_ascii_digit()) {
        return Err(format!("`{raw}` contains no digits"));
    }
    Ok(parse_currency(raw) as f64)
}

#[derive(Parser, Debug, Clone)]
pub struct CompoundArgs {
    #[arg(long, default_value = "100000000", value_parser = parse_amount)]
    pub principal: f64,
    #[arg(long, default_value_t = 6.0, help = "Annual interest rate in percent")]
    pub rate: f64,
    #[arg(long, default_value_t = 5.0)]
    pub years: f64,
    #[arg(
        long,
        default_value_t = 12,
        help = "Compounding periods per year: 1 yearly, 4 quarterly, 12 monthly"
    )]
    pub frequency: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct InvestmentArgs {
    #[arg(long, default_value = "50000000", value_parser = parse_amount)]
    pub principal: f64,
    #[arg(
        long,
        default_value = "5000000",
        value_parser = parse_amount,
        help = "Amount added at the end of every month"
    )]
    pub contribution: f64,
    #[arg(long, default_value_t = 8.0, help = "Annual interest rate in percent")]
    pub rate: f64,
    #[arg(long, default_value_t = 10.0)]
    pub years: f64,
}

#[derive(Parser, Debug, Clone)]
pub struct LoanArgs {
    #[arg(long, default_value = "1000000000", value_parser = parse_amount)]
    pub principal: f64,
    #[arg(long, default_value_t = 20.0)]
    pub years: f64,
    #[arg(long, default_value_t = 8.0, help = "Annual rate in percent for the first period")]
    pub rate1: f64,
    #[arg(long, default_value_t = 24, help = "Length of the first period in months")]
    pub period1: u32,
    #[arg(long, default_value_t = 10.0, help = "Annual rate in percent after the first period")]
    pub rate2: f64,
}

#[derive(Parser, Debug, Clone)]
pub struct TradingArgs {
    #[arg(long, default_value_t = 1)]
    pub accounts: u32,
    #[arg(long, default_value = "10000000", value_parser = parse_amount)]
    pub capital: f64,
    #[arg(long, default_value_t = 1.0, help = "Daily profit in percent of capital")]
    pub rate: f64,
    #[arg(long, default_value_t = 22, help = "Trading days per month")]
    pub days: u32,
    #[arg(long, default_value_t = 12)]
    pub months: u32,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Share of each day's profit withdrawn instead of reinvested, in percent"
    )]
    pub withdraw_rate: f64,
}

impl Default for CompoundArgs {
    fn default() -> Self {
        Self::parse_from(["compound"])
    }
}

impl Default for InvestmentArgs {
    fn default() -> Self {
        Self::parse_from(["investment"])
    }
}

impl Default for LoanArgs {
    fn default() -> Self {
        Self::parse_from(["loan"])
    }
}

impl Default for TradingArgs {
    fn default() -> Self {
        Self::parse_from(["trading"])
    }
}

impl From<&CompoundArgs> for CompoundInput {
    fn from(args: &CompoundArgs) -> Self {
        CompoundInput {
            principal: args.principal,
            annual_rate: args.rate / 100.0,
            years: args.years,
            periods_per_year: args.frequency,
        }
    }
}

impl From<&InvestmentArgs> for InvestmentInput {
    fn from(args: &InvestmentArgs) -> Self {
        InvestmentInput {
            principal: args.principal,
            monthly_contribution: args.contribution,
            annual_rate: args.rate / 100.0,
            years: args.years,
        }
    }
}

impl From<&LoanArgs> for LoanInput {
    fn from(args: &LoanArgs) -> Self {
        LoanInput {
            principal: args.principal,
            years: args.years,
            initial_annual_rate: args.rate1 / 100.0,
            initial_period_months: args.period1,
            later_annual_rate: args.rate2 / 100.0,
        }
    }
}

impl From<&TradingArgs> for TradingInput {
    fn from(args: &TradingArgs) -> Self {
        TradingInput {
            starting_accounts: args.accounts,
            capital_per_account: args.capital,
            daily_rate: args.rate / 100.0,
            trading_days_per_month: args.days,
            months: args.months,
            withdraw_rate: args.withdraw_rate / 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn defaults_match_flag_defaults() {
        let loan = LoanArgs::default();
        assert_approx(loan.principal, 1_000_000_000.0);
        assert_eq!(loan.period1, 24);
        assert_approx(loan.rate2, 10.0);

        let trading = TradingArgs::default();
        assert_eq!(trading.accounts, 1);
        assert_eq!(trading.days, 22);
        assert_approx(trading.withdraw_rate, 0.0);
    }

    #[test]
    fn amount_flags_accept_grouped_digits() {
        let cli = Cli::parse_from(["fincalc", "compound", "--principal", "250,000,000"]);
        let Command::Compound(args) = cli.command else {
            panic!("expected compound subcommand");
        };
        assert_approx(args.principal, 250_000_000.0);
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn percent_flags_become_fractions() {
        let cli = Cli::parse_from([
            "fincalc",
            "trading",
            "--rate",
            "1.5",
            "--withdraw-rate",
            "40",
        ]);
        let Command::Trading(args) = cli.command else {
            panic!("expected trading subcommand");
        };
        let input = TradingInput::from(&args);
        assert_approx(input.daily_rate, 0.015);
        assert_approx(input.withdraw_rate, 0.4);
    }

    #[test]
    fn serve_defaults_to_all_interfaces_on_8080() {
        let cli = Cli::parse_from(["fincalc", "serve"]);
        let Command::Serve(args) = cli.command else {
            panic!("expected serve subcommand");
        };
        assert_eq!(args.addr().to_string(), "0.0.0.0:8080");
    }
}
