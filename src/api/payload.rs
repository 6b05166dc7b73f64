use serde::Deserialize;

use crate::cli::{CompoundArgs, InvestmentArgs, LoanArgs, TradingArgs};
use crate::codec::deserialize_amount;
use crate::core::InputError;

/// Query/JSON body for `/api/compound`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompoundPayload {
    #[serde(deserialize_with = "deserialize_amount")]
    principal: Option<f64>,
    rate: Option<f64>,
    years: Option<f64>,
    frequency: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvestmentPayload {
    #[serde(deserialize_with = "deserialize_amount")]
    principal: Option<f64>,
    #[serde(deserialize_with = "deserialize_amount")]
    contribution: Option<f64>,
    rate: Option<f64>,
    years: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoanPayload {
    #[serde(deserialize_with = "deserialize_amount")]
    principal: Option<f64>,
    years: Option<f64>,
    rate1: Option<f64>,
    period1: Option<u32>,
    rate2: Option<f64>,
}

/// `withdrawRate` is the one optional input across the payloads; it reads as zero.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TradingPayload {
    accounts: Option<u32>,
    #[serde(deserialize_with = "deserialize_amount")]
    capital: Option<f64>,
    rate: Option<f64>,
    days: Option<u32>,
    months: Option<u32>,
    withdraw_rate: Option<f64>,
}

/// A field the page must send. Absent or null means the box was left empty,
/// which declines the projection instead of reusing a default.
fn required<T>(field: &'static str, value: Option<T>) -> Result<T, InputError> {
    value.ok_or(InputError::Missing { field })
}

impl TryFrom<CompoundPayload> for CompoundArgs {
    type Error = InputError;

    fn try_from(payload: CompoundPayload) -> Result<Self, Self::Error> {
        Ok(CompoundArgs {
            principal: required("principal", payload.principal)?,
            rate: required("rate", payload.rate)?,
            years: required("years", payload.years)?,
            frequency: required("frequency", payload.frequency)?,
        })
    }
}

impl TryFrom<InvestmentPayload> for InvestmentArgs {
    type Error = InputError;

    fn try_from(payload: InvestmentPayload) -> Result<Self, Self::Error> {
        Ok(InvestmentArgs {
            principal: required("principal", payload.principal)?,
            contribution: required("contribution", payload.contribution)?,
            rate: required("rate", payload.rate)?,
            years: required("years", payload.years)?,
        })
    }
}

impl TryFrom<LoanPayload> for LoanArgs {
    type Error = InputError;

    fn try_from(payload: LoanPayload) -> Result<Self, Self::Error> {
        Ok(LoanArgs {
            principal: required("principal", payload.principal)?,
            years: required("years", payload.years)?,
            rate1: required("rate1", payload.rate1)?,
            period1: required("period1", payload.period1)?,
            rate2: required("rate2", payload.rate2)?,
        })
    }
}

impl TryFrom<TradingPayload> for TradingArgs {
    type Error = InputError;

    fn try_from(payload: TradingPayload) -> Result<Self, Self::Error> {
        let mut args = TradingArgs {
            accounts: required("accounts", payload.accounts)?,
            capital: required("capital", payload.capital)?,
            rate: required("rate", payload.rate)?,
            days: required("days", payload.days)?,
            months: required("months", payload.months)?,
            ..TradingArgs::default()
        };
        if let Some(v) = payload.withdraw_rate {
            args.withdraw_rate = v;
        }
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LoanInput, TradingInput};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn loan_payload_parses_page_keys() {
        let json = r#"{
          "principal": "2,000,000,000",
          "years": 25,
          "rate1": 7.5,
          "period1": 36,
          "rate2": 11
        }"#;
        let payload: LoanPayload = serde_json::from_str(json).expect("json should parse");
        let args = LoanArgs::try_from(payload).expect("all fields present");
        let input = LoanInput::from(&args);

        assert_approx(input.principal, 2_000_000_000.0);
        assert_approx(input.years, 25.0);
        assert_approx(input.initial_annual_rate, 0.075);
        assert_eq!(input.initial_period_months, 36);
        assert_approx(input.later_annual_rate, 0.11);
    }

    #[test]
    fn trading_payload_defaults_withdraw_rate_to_zero() {
        let json = r#"{ "accounts": 3, "capital": 5000000, "rate": 2, "days": 20, "months": 6 }"#;
        let payload: TradingPayload = serde_json::from_str(json).expect("json should parse");
        let args = TradingArgs::try_from(payload).expect("withdrawRate is optional");
        let input = TradingInput::from(&args);

        assert_eq!(input.starting_accounts, 3);
        assert_approx(input.capital_per_account, 5_000_000.0);
        assert_approx(input.daily_rate, 0.02);
        assert_approx(input.withdraw_rate, 0.0);
        assert_eq!(input.trading_days_per_month, 20);
        assert_eq!(input.months, 6);
    }

    #[test]
    fn trading_payload_reads_camel_case_withdraw_rate() {
        let json = r#"{
          "accounts": 1, "capital": 1000, "rate": 1, "days": 22, "months": 1,
          "withdrawRate": 25
        }"#;
        let payload: TradingPayload = serde_json::from_str(json).expect("json should parse");
        let args = TradingArgs::try_from(payload).expect("all fields present");
        assert_approx(args.withdraw_rate, 25.0);
    }

    #[test]
    fn body_without_principal_is_declined() {
        let payload: CompoundPayload =
            serde_json::from_str(r#"{ "rate": 6, "years": 5, "frequency": 12 }"#)
                .expect("json should parse");
        assert_eq!(
            CompoundArgs::try_from(payload).expect_err("principal is required"),
            InputError::Missing { field: "principal" }
        );
    }

    #[test]
    fn null_field_is_declined_not_defaulted() {
        let json = r#"{
          "principal": 1000000000, "years": 20, "rate1": 8, "period1": null, "rate2": 10
        }"#;
        let payload: LoanPayload = serde_json::from_str(json).expect("json should parse");
        assert_eq!(
            LoanArgs::try_from(payload).expect_err("period1 is required"),
            InputError::Missing { field: "period1" }
        );
    }

    #[test]
    fn empty_currency_box_reaches_the_engine_as_zero() {
        let payload: InvestmentPayload = serde_json::from_str(
            r#"{ "principal": 0, "contribution": "", "rate": 0, "years": 10 }"#,
        )
        .expect("json should parse");
        let args = InvestmentArgs::try_from(payload).expect("zero amounts are present");
        assert_approx(args.principal, 0.0);
        assert_approx(args.contribution, 0.0);
        assert_approx(args.rate, 0.0);
    }
}
