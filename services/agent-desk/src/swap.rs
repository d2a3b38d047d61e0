//! Constant-product (x·y=k) swap simulator
//!
//! Pure math, independent of any market data. Everything is computed in
//! `Decimal`; overflow is reported as bad input.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AgentError;

fn bps_denominator() -> Decimal {
    Decimal::from(10_000)
}

/// Simulator request; missing or null fields take the defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub reserve_x: Option<Decimal>,
    pub reserve_y: Option<Decimal>,
    pub amount_in: Option<Decimal>,
    pub fee_bps: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapInput {
    #[serde(with = "rust_decimal::serde::float")]
    pub reserve_x: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub reserve_y: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_in: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub fee_bps: Decimal,
}

impl Default for SwapInput {
    fn default() -> Self {
        Self {
            reserve_x: Decimal::from(1000),
            reserve_y: Decimal::from(1000),
            amount_in: Decimal::from(10),
            fee_bps: Decimal::from(30),
        }
    }
}

impl From<SwapRequest> for SwapInput {
    fn from(req: SwapRequest) -> Self {
        let defaults = SwapInput::default();
        Self {
            reserve_x: req.reserve_x.unwrap_or(defaults.reserve_x),
            reserve_y: req.reserve_y.unwrap_or(defaults.reserve_y),
            amount_in: req.amount_in.unwrap_or(defaults.amount_in),
            fee_bps: req.fee_bps.unwrap_or(defaults.fee_bps),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapOutcome {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_out: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub new_reserve_x: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub new_reserve_y: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_impact_pct: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct SwapQuote {
    pub input: SwapInput,
    pub result: SwapOutcome,
}

/// Swap `amount_in` of X into a pool holding `reserve_x`/`reserve_y`
pub fn simulate(input: SwapInput) -> Result<SwapQuote, AgentError> {
    if input.reserve_x <= Decimal::ZERO
        || input.reserve_y <= Decimal::ZERO
        || input.amount_in <= Decimal::ZERO
    {
        return Err(AgentError::InvalidInput("Values must be > 0".to_string()));
    }
    if input.fee_bps < Decimal::ZERO || input.fee_bps >= bps_denominator() {
        return Err(AgentError::InvalidInput(
            "feeBps must be between 0 and 9999".to_string(),
        ));
    }

    let result = constant_product(&input)
        .ok_or_else(|| AgentError::InvalidInput("Bad input".to_string()))?;

    Ok(SwapQuote { input, result })
}

fn constant_product(input: &SwapInput) -> Option<SwapOutcome> {
    let fee = input.fee_bps.checked_div(bps_denominator())?;
    let amount_after_fee = input.amount_in.checked_mul(Decimal::ONE - fee)?;

    let k = input.reserve_x.checked_mul(input.reserve_y)?;
    let new_reserve_x = input.reserve_x.checked_add(amount_after_fee)?;
    let new_reserve_y = k.checked_div(new_reserve_x)?;
    let amount_out = input.reserve_y.checked_sub(new_reserve_y)?;

    let price_impact_pct = amount_out
        .checked_div(input.reserve_y)?
        .checked_mul(Decimal::ONE_HUNDRED)?;

    Some(SwapOutcome {
        amount_out,
        new_reserve_x,
        new_reserve_y,
        price_impact_pct,
    })
}
