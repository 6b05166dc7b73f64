mod engine;
mod trading;
mod types;

pub use engine::{
    MAX_YEARS, annuity_installment, project_compound, project_investment, schedule_loan,
};
pub use trading::{MAX_TRADING_DAYS, simulate_trading};
pub use types::{
    AccountPoint, CompoundInput, CompoundResult, InputError, InvestmentInput, InvestmentResult,
    LoanInput, LoanResult, LogEntry, ScheduleRow, TradingEvent, TradingInput, TradingResult,
    YearPoint,
};
