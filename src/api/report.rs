use serde::Serialize;
use tracing::debug;

use crate::cli::{CompoundArgs, InvestmentArgs, LoanArgs, TradingArgs};
use crate::codec::{format_currency, format_day_span};
use crate::core::{
    CompoundInput, InputError, InvestmentInput, LoanInput, LogEntry, ScheduleRow, TradingEvent,
    TradingInput, TradingResult, YearPoint, project_compound, project_investment, schedule_loan,
    simulate_trading,
};

const NOT_REACHED: &str = "Chưa đạt";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Formula {
    pub formula: String,
    pub substitution: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackPoint {
    pub label: String,
    pub principal: f64,
    pub interest: f64,
}

impl From<&YearPoint> for StackPoint {
    fn from(point: &YearPoint) -> Self {
        StackPoint {
            label: format!("Năm {}", point.year),
            principal: point.principal,
            interest: point.interest,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthSummary {
    pub total_principal: String,
    pub total_interest: String,
    pub final_balance: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthReport {
    pub total_principal: f64,
    pub total_interest: f64,
    pub final_balance: f64,
    pub summary: GrowthSummary,
    pub series: Vec<StackPoint>,
    pub formula: Formula,
}

impl GrowthReport {
    fn new(
        total_principal: f64,
        total_interest: f64,
        final_balance: f64,
        series: &[YearPoint],
        formula: Formula,
    ) -> Self {
        GrowthReport {
            total_principal,
            total_interest,
            final_balance,
            summary: GrowthSummary {
                total_principal: format_currency(total_principal),
                total_interest: format_currency(total_interest),
                final_balance: format_currency(final_balance),
            },
            series: series.iter().map(StackPoint::from).collect(),
            formula,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowText {
    pub opening_balance: String,
    pub principal_payment: String,
    pub interest_payment: String,
    pub installment: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRowView {
    #[serde(flatten)]
    pub row: ScheduleRow,
    pub text: RowText,
}

impl From<&ScheduleRow> for LoanRowView {
    fn from(row: &ScheduleRow) -> Self {
        LoanRowView {
            row: *row,
            text: RowText {
                opening_balance: format_currency(row.opening_balance),
                principal_payment: format_currency(row.principal_payment),
                interest_payment: format_currency(row.interest_payment),
                installment: format_currency(row.installment),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    pub total_paid: String,
    pub total_interest: String,
    pub initial_installment: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanReport {
    pub total_months: u32,
    pub initial_installment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    pub summary: LoanSummary,
    pub rows: Vec<LoanRowView>,
    pub formula: Formula,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountsPoint {
    pub label: String,
    pub accounts: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogLine {
    #[serde(flatten)]
    pub entry: LogEntry,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingSummary {
    pub total_accounts: String,
    pub net_worth: String,
    pub total_withdrawn: String,
    pub breakeven_time: String,
    pub double_time: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingReport {
    pub total_days: u32,
    pub total_accounts: u64,
    pub net_worth: f64,
    pub cash_pool: f64,
    pub total_withdrawn: f64,
    pub breakeven_day: Option<u32>,
    pub double_day: Option<u32>,
    pub summary: TradingSummary,
    pub series: Vec<AccountsPoint>,
    pub log: Vec<LogLine>,
}

pub fn compound_report(args: &CompoundArgs) -> Result<GrowthReport, InputError> {
    let input = CompoundInput::from(args);
    let result = project_compound(&input)?;
    debug!(
        final_balance = result.final_balance,
        total_interest = result.total_interest,
        "compound projection"
    );

    let n = args.frequency;
    let formula = Formula {
        formula: "A = P * (1 + r/n)^(n*t)".to_string(),
        substitution: format!(
            "{} * (1 + {}%/{n})^({n}*{}) = {}",
            format_currency(args.principal),
            args.rate,
            args.years,
            format_currency(result.final_balance),
        ),
    };

    Ok(GrowthReport::new(
        result.principal,
        result.total_interest,
        result.final_balance,
        &result.series,
        formula,
    ))
}

pub fn investment_report(args: &InvestmentArgs) -> Result<GrowthReport, InputError> {
    let input = InvestmentInput::from(args);
    let result = project_investment(&input)?;
    debug!(
        final_balance = result.final_balance,
        total_contributed = result.total_contributed,
        "investment projection"
    );

    let (rate, years) = (args.rate, args.years);
    let formula = Formula {
        formula: "FV = P*(1 + r/n)^(nt) + PMT * [(1 + r/n)^(nt) - 1] / (r/n)".to_string(),
        substitution: format!(
            "Principal: {} * (1 + {rate}%/12)^(12*{years})\n\
             + Series: {} * [(1 + {rate}%/12)^(12*{years}) - 1] / ({rate}%/12)",
            format_currency(args.principal),
            format_currency(args.contribution),
        ),
    };

    Ok(GrowthReport::new(
        result.total_contributed,
        result.total_interest,
        result.final_balance,
        &result.series,
        formula,
    ))
}

pub fn loan_report(args: &LoanArgs) -> Result<LoanReport, InputError> {
    let input = LoanInput::from(args);
    let result = schedule_loan(&input)?;
    debug!(
        months = result.total_months,
        total_paid = result.total_paid,
        "loan schedule"
    );

    let monthly_pct = args.rate1 / 12.0;
    let formula = Formula {
        formula: "EMI = P * r * (1+r)^n / ((1+r)^n - 1)".to_string(),
        substitution: format!(
            "EMI (kỳ đầu) = {} * {monthly_pct:.2}% * (1 + {monthly_pct:.2}%)^{months} \
             / ((1 + {monthly_pct:.2}%)^{months} - 1)\n= {} / tháng",
            format_currency(args.principal),
            format_currency(result.initial_installment),
            months = result.total_months,
        ),
    };

    Ok(LoanReport {
        total_months: result.total_months,
        initial_installment: result.initial_installment,
        total_paid: result.total_paid,
        total_interest: result.total_interest,
        summary: LoanSummary {
            total_paid: format_currency(result.total_paid),
            total_interest: format_currency(result.total_interest),
            initial_installment: format_currency(result.initial_installment),
        },
        rows: result.rows.iter().map(LoanRowView::from).collect(),
        formula,
    })
}

pub fn log_message(entry: &LogEntry) -> String {
    let day = entry.day;
    match entry.event {
        TradingEvent::Breakeven { total_withdrawn } => format!(
            "Day {day}: Hoàn vốn đầu tư! (Tổng rút: {})",
            format_currency(total_withdrawn)
        ),
        TradingEvent::CapitalDoubled { total_value } => format!(
            "Day {day}: Đạt X2 Vốn! (Tổng giá trị: {})",
            format_currency(total_value)
        ),
        TradingEvent::AccountsOpened { opened, total } => {
            format!("Day {day}: Mở thêm {opened} account. Tổng: {total}.")
        }
        TradingEvent::MonthlyWithdrawal { month, amount } => {
            format!("End Month {month}: Rút lãi {}", format_currency(amount))
        }
    }
}

fn trading_summary(result: &TradingResult, days_per_month: u32) -> TradingSummary {
    TradingSummary {
        total_accounts: result.total_accounts.to_string(),
        net_worth: format_currency(result.net_worth),
        total_withdrawn: format_currency(result.total_withdrawn),
        breakeven_time: result
            .breakeven_day
            .map(|day| format_day_span(day, days_per_month))
            .unwrap_or_else(|| NOT_REACHED.to_string()),
        double_time: result
            .double_day
            .map(|day| format!("{day} ngày"))
            .unwrap_or_else(|| NOT_REACHED.to_string()),
    }
}

pub fn trading_report(args: &TradingArgs) -> Result<TradingReport, InputError> {
    let input = TradingInput::from(args);
    let result = simulate_trading(&input)?;
    debug!(
        days = result.total_days,
        accounts = result.total_accounts,
        breakeven_day = ?result.breakeven_day,
        double_day = ?result.double_day,
        "trading simulation"
    );

    Ok(TradingReport {
        total_days: result.total_days,
        total_accounts: result.total_accounts,
        net_worth: result.net_worth,
        cash_pool: result.cash_pool,
        total_withdrawn: result.total_withdrawn,
        breakeven_day: result.breakeven_day,
        double_day: result.double_day,
        summary: trading_summary(&result, input.trading_days_per_month),
        series: result
            .series
            .iter()
            .map(|p| AccountsPoint {
                label: format!("Day {}", p.day),
                accounts: p.accounts,
            })
            .collect(),
        log: result
            .log
            .iter()
            .map(|entry| LogLine {
                entry: *entry,
                message: log_message(entry),
            })
            .collect(),
    })
}
