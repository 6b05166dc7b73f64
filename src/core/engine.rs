use super::types::{
    CompoundInput, CompoundResult, InputError, InvestmentInput, InvestmentResult, LoanInput,
    LoanResult, ScheduleRow, YearPoint, require_at_least, require_at_most, require_non_negative,
    require_positive,
};

const MONTHS_PER_YEAR: u32 = 12;
const ZERO_RATE_EPS: f64 = 1e-12;

/// Longest horizon any projection accepts. Series and schedules are sized
/// from it, so it also bounds their allocation.
pub const MAX_YEARS: f64 = 100.0;

impl CompoundInput {
    pub fn validate(&self) -> Result<(), InputError> {
        require_positive("principal", self.principal)?;
        require_positive("annual_rate", self.annual_rate)?;
        require_positive("years", self.years)?;
        require_at_most("years", self.years, MAX_YEARS)?;
        require_at_least("periods_per_year", self.periods_per_year, 1)
    }
}

impl InvestmentInput {
    pub fn validate(&self) -> Result<(), InputError> {
        require_non_negative("principal", self.principal)?;
        require_non_negative("monthly_contribution", self.monthly_contribution)?;
        require_non_negative("annual_rate", self.annual_rate)?;
        require_positive("years", self.years)?;
        require_at_most("years", self.years, MAX_YEARS)
    }
}

impl LoanInput {
    pub fn validate(&self) -> Result<(), InputError> {
        require_positive("principal", self.principal)?;
        require_positive("years", self.years)?;
        require_at_most("years", self.years, MAX_YEARS)?;
        require_non_negative("initial_annual_rate", self.initial_annual_rate)?;
        require_non_negative("later_annual_rate", self.later_annual_rate)?;
        if loan_term_months(self.years) == 0 {
            return Err(InputError::TermTooShort { years: self.years });
        }
        Ok(())
    }

    pub fn total_months(&self) -> u32 {
        loan_term_months(self.years)
    }
}

fn loan_term_months(years: f64) -> u32 {
    (years * MONTHS_PER_YEAR as f64).round() as u32
}

fn whole_years(years: f64) -> u32 {
    years.floor() as u32
}

/// Growth factor of one unit after `periods` compounding periods.
fn growth_factor(periodic_rate: f64, periods: f64) -> f64 {
    (1.0 + periodic_rate).powf(periods)
}

/// Future value of a level contribution paid at the end of each period.
fn annuity_future_value(contribution: f64, periodic_rate: f64, periods: f64) -> f64 {
    if periods <= 0.0 {
        return 0.0;
    }
    if periodic_rate.abs() < ZERO_RATE_EPS {
        return contribution * periods;
    }
    contribution * (growth_factor(periodic_rate, periods) - 1.0) / periodic_rate
}

/// Level payment that amortizes `balance` over `months` at `monthly_rate`.
/// Falls back to straight-line repayment when the rate is zero.
pub fn annuity_installment(balance: f64, monthly_rate: f64, months: u32) -> f64 {
    let months = months.max(1);
    if monthly_rate.abs() < ZERO_RATE_EPS {
        return balance / months as f64;
    }
    let growth = growth_factor(monthly_rate, months as f64);
    balance * monthly_rate * growth / (growth - 1.0)
}

pub fn project_compound(input: &CompoundInput) -> Result<CompoundResult, InputError> {
    input.validate()?;

    let n = input.periods_per_year as f64;
    let periodic_rate = input.annual_rate / n;
    let final_balance = input.principal * growth_factor(periodic_rate, n * input.years);
    let total_interest = final_balance - input.principal;

    let series = (0..=whole_years(input.years))
        .map(|year| YearPoint {
            year,
            principal: input.principal,
            interest: input.principal * growth_factor(periodic_rate, n * year as f64)
                - input.principal,
        })
        .collect();

    Ok(CompoundResult {
        principal: input.principal,
        total_interest,
        final_balance,
        series,
    })
}

pub fn project_investment(input: &InvestmentInput) -> Result<InvestmentResult, InputError> {
    input.validate()?;

    let n = MONTHS_PER_YEAR as f64;
    let periodic_rate = input.annual_rate / n;
    let value_after = |periods: f64| {
        input.principal * growth_factor(periodic_rate, periods)
            + annuity_future_value(input.monthly_contribution, periodic_rate, periods)
    };

    let total_periods = n * input.years;
    let final_balance = value_after(total_periods);
    let total_contributed = input.principal + input.monthly_contribution * total_periods;

    let series = (0..=whole_years(input.years))
        .map(|year| {
            let periods = n * year as f64;
            let contributed = input.principal + input.monthly_contribution * periods;
            YearPoint {
                year,
                principal: contributed,
                interest: value_after(periods) - contributed,
            }
        })
        .collect();

    Ok(InvestmentResult {
        total_contributed,
        total_interest: final_balance - total_contributed,
        final_balance,
        series,
    })
}

pub fn schedule_loan(input: &LoanInput) -> Result<LoanResult, InputError> {
    input.validate()?;

    let total_months = input.total_months();
    let initial_rate = input.initial_annual_rate / MONTHS_PER_YEAR as f64;
    let later_rate = input.later_annual_rate / MONTHS_PER_YEAR as f64;
    let switch_month = input.initial_period_months;

    let initial_installment = annuity_installment(input.principal, initial_rate, total_months);
    let mut installment = initial_installment;
    let mut balance = input.principal;
    let mut total_interest = 0.0;
    let mut rows = Vec::with_capacity(total_months as usize);

    for month in 1..=total_months {
        let rate = if month <= switch_month {
            initial_rate
        } else {
            later_rate
        };

        if month - 1 == switch_month {
            let remaining_months = total_months - (month - 1);
            installment = annuity_installment(balance, later_rate, remaining_months);
        }

        let interest_payment = balance * rate;
        let mut principal_payment = installment - interest_payment;
        let mut row_installment = installment;

        if month == total_months || principal_payment > balance {
            principal_payment = balance;
            row_installment = principal_payment + interest_payment;
        }

        rows.push(ScheduleRow {
            month,
            opening_balance: balance,
            principal_payment,
            interest_payment,
            installment: row_installment,
        });

        balance = (balance - principal_payment).max(0.0);
        total_interest += interest_payment;
    }

    Ok(LoanResult {
        total_months,
        initial_installment,
        total_paid: input.principal + total_interest,
        total_interest,
        rows,
    })
}
