use serde::Serialize;
use thiserror::Error;

/// Why a projector declined to run. The caller keeps whatever it displayed
/// before; nothing is recomputed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} must be a finite number > 0, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be a finite number >= 0, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be between 0 and 1, got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },
    #[error("{field} must be at least {min}, got {value}")]
    TooSmall {
        field: &'static str,
        value: u32,
        min: u32,
    },
    #[error("years must cover at least one month, got {years}")]
    TermTooShort { years: f64 },
    #[error("{field} must be at most {max}, got {value}")]
    TooLarge {
        field: &'static str,
        value: f64,
        max: f64,
    },
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("account count no longer fits on day {day}; lower the daily rate or the horizon")]
    AccountOverflow { day: u32 },
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(InputError::NotPositive { field, value })
    }
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InputError::Negative { field, value })
    }
}

pub(crate) fn require_at_most(field: &'static str, value: f64, max: f64) -> Result<(), InputError> {
    if value <= max {
        Ok(())
    } else {
        Err(InputError::TooLarge { field, value, max })
    }
}

pub(crate) fn require_at_least(field: &'static str, value: u32, min: u32) -> Result<(), InputError> {
    if value >= min {
        Ok(())
    } else {
        Err(InputError::TooSmall { field, value, min })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundInput {
    pub principal: f64,
    pub annual_rate: f64,
    pub years: f64,
    pub periods_per_year: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvestmentInput {
    pub principal: f64,
    pub monthly_contribution: f64,
    pub annual_rate: f64,
    pub years: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanInput {
    pub principal: f64,
    pub years: f64,
    pub initial_annual_rate: f64,
    pub initial_period_months: u32,
    pub later_annual_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradingInput {
    pub starting_accounts: u32,
    pub capital_per_account: f64,
    pub daily_rate: f64,
    pub trading_days_per_month: u32,
    pub months: u32,
    pub withdraw_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearPoint {
    pub year: u32,
    pub principal: f64,
    pub interest: f64,
}

impl YearPoint {
    pub fn total(&self) -> f64 {
        self.principal + self.interest
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPoint {
    pub day: u32,
    pub accounts: u64,
    pub cash_pool: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundResult {
    pub principal: f64,
    pub total_interest: f64,
    pub final_balance: f64,
    pub series: Vec<YearPoint>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentResult {
    pub total_contributed: f64,
    pub total_interest: f64,
    pub final_balance: f64,
    pub series: Vec<YearPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub month: u32,
    pub opening_balance: f64,
    pub principal_payment: f64,
    pub interest_payment: f64,
    pub installment: f64,
}

impl ScheduleRow {
    pub fn closing_balance(&self) -> f64 {
        self.opening_balance - self.principal_payment
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResult {
    pub total_months: u32,
    pub initial_installment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    pub rows: Vec<ScheduleRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TradingEvent {
    #[serde(rename_all = "camelCase")]
    AccountsOpened { opened: u64, total: u64 },
    #[serde(rename_all = "camelCase")]
    MonthlyWithdrawal { month: u32, amount: f64 },
    #[serde(rename_all = "camelCase")]
    Breakeven { total_withdrawn: f64 },
    #[serde(rename_all = "camelCase")]
    CapitalDoubled { total_value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LogEntry {
    pub day: u32,
    pub event: TradingEvent,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingResult {
    pub initial_capital: f64,
    pub total_days: u32,
    pub total_accounts: u64,
    pub cash_pool: f64,
    pub net_worth: f64,
    pub total_withdrawn: f64,
    pub breakeven_day: Option<u32>,
    pub double_day: Option<u32>,
    pub series: Vec<AccountPoint>,
    pub log: Vec<LogEntry>,
}
