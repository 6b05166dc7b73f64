use super::types::{
    AccountPoint, InputError, LogEntry, TradingEvent, TradingInput, TradingResult,
    require_at_least, require_at_most, require_positive,
};

/// Every fifth day is sampled regardless of activity.
const SAMPLE_EVERY_DAYS: u32 = 5;

/// Longest simulation accepted, in trading days.
pub const MAX_TRADING_DAYS: u32 = 36_500;

impl TradingInput {
    pub fn validate(&self) -> Result<(), InputError> {
        require_at_least("starting_accounts", self.starting_accounts, 1)?;
        require_positive("capital_per_account", self.capital_per_account)?;
        require_positive("daily_rate", self.daily_rate)?;
        require_at_least("trading_days_per_month", self.trading_days_per_month, 1)?;
        require_at_least("months", self.months, 1)?;
        require_at_most(
            "total_days",
            self.total_days() as f64,
            MAX_TRADING_DAYS as f64,
        )?;
        if !(0.0..=1.0).contains(&self.withdraw_rate) {
            return Err(InputError::OutOfUnitRange {
                field: "withdraw_rate",
                value: self.withdraw_rate,
            });
        }
        Ok(())
    }

    pub fn total_days(&self) -> u32 {
        self.months.saturating_mul(self.trading_days_per_month)
    }

    pub fn initial_capital(&self) -> f64 {
        self.starting_accounts as f64 * self.capital_per_account
    }
}

#[derive(Debug)]
struct Book {
    accounts: u64,
    cash_pool: f64,
    total_withdrawn: f64,
    month_withdrawn: f64,
}

impl Book {
    fn equity(&self, capital_per_account: f64) -> f64 {
        self.accounts as f64 * capital_per_account + self.cash_pool
    }

    /// Books one day of profit and returns how many accounts it funded, or
    /// `None` once the account count no longer fits in a u64.
    fn trade_day(&mut self, input: &TradingInput) -> Option<u64> {
        let capital = input.capital_per_account;
        let gross = self.accounts as f64 * capital * input.daily_rate;
        let withdrawn = gross * input.withdraw_rate;
        let reinvested = gross - withdrawn;

        self.cash_pool += reinvested;
        self.month_withdrawn += withdrawn;
        self.total_withdrawn += withdrawn;

        // Only whole accounts are opened; the remainder stays in the pool.
        let leftover = self.cash_pool % capital;
        let fundable = ((self.cash_pool - leftover) / capital).round();
        if !fundable.is_finite() || fundable >= u64::MAX as f64 {
            return None;
        }
        let opened = fundable as u64;
        self.accounts = self.accounts.checked_add(opened)?;
        self.cash_pool = leftover;
        Some(opened)
    }
}

pub fn simulate_trading(input: &TradingInput) -> Result<TradingResult, InputError> {
    input.validate()?;

    let total_days = input.total_days();
    let initial_capital = input.initial_capital();
    let mut book = Book {
        accounts: input.starting_accounts as u64,
        cash_pool: 0.0,
        total_withdrawn: 0.0,
        month_withdrawn: 0.0,
    };

    let mut series = Vec::new();
    let mut log = Vec::new();
    let mut breakeven_day = None;
    let mut double_day = None;

    for day in 1..=total_days {
        let Some(opened) = book.trade_day(input) else {
            return Err(InputError::AccountOverflow { day });
        };

        if breakeven_day.is_none() && book.total_withdrawn >= initial_capital {
            breakeven_day = Some(day);
            log.push(LogEntry {
                day,
                event: TradingEvent::Breakeven {
                    total_withdrawn: book.total_withdrawn,
                },
            });
        }

        let month_end = day % input.trading_days_per_month == 0;
        let sampled =
            day % SAMPLE_EVERY_DAYS == 0 || opened > 0 || month_end || day == total_days;
        if !sampled {
            continue;
        }

        series.push(AccountPoint {
            day,
            accounts: book.accounts,
            cash_pool: book.cash_pool,
        });

        // Doubling is only looked at on sampled days.
        let total_value = book.equity(input.capital_per_account) + book.total_withdrawn;
        if double_day.is_none() && total_value >= 2.0 * initial_capital {
            double_day = Some(day);
            log.push(LogEntry {
                day,
                event: TradingEvent::CapitalDoubled { total_value },
            });
        }

        if opened > 0 {
            log.push(LogEntry {
                day,
                event: TradingEvent::AccountsOpened {
                    opened,
                    total: book.accounts,
                },
            });
        }

        if month_end && book.month_withdrawn > 0.0 {
            log.push(LogEntry {
                day,
                event: TradingEvent::MonthlyWithdrawal {
                    month: day / input.trading_days_per_month,
                    amount: book.month_withdrawn,
                },
            });
            book.month_withdrawn = 0.0;
        }
    }

    Ok(TradingResult {
        initial_capital,
        total_days,
        total_accounts: book.accounts,
        cash_pool: book.cash_pool,
        net_worth: book.equity(input.capital_per_account),
        total_withdrawn: book.total_withdrawn,
        breakeven_day,
        double_day,
        series,
        log,
    })
}
