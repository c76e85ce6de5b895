//! Constant-product pricing for the value/credit pair.
//! Integer only; every rounding step favours the pool.

use crate::errors::LgtError;

/// Fee-adjusted input multiplier (0.5% fee).
pub const FEE_NUMERATOR: i128 = 995;
pub const FEE_DENOMINATOR: i128 = 1_000;

/// Computes `a * b / denominator`, rounding down.
// TODO: widen to soroban U256 once share balances outgrow ~1e19 units each.
pub fn mul_div(a: i128, b: i128, denominator: i128) -> Result<i128, LgtError> {
    if denominator == 0 {
        return Err(LgtError::ArithmeticOverflow);
    }
    a.checked_mul(b)
        .map(|product| product / denominator)
        .ok_or(LgtError::ArithmeticOverflow)
}

/// Output received for selling exactly `input_amount` into the pool.
///
/// `output = input * 995 * output_reserve / (input_reserve * 1000 + input * 995)`
pub fn get_input_price(
    input_amount: i128,
    input_reserve: i128,
    output_reserve: i128,
) -> Result<i128, LgtError> {
    if input_amount < 0 {
        return Err(LgtError::NegativeAmount);
    }
    if input_reserve <= 0 || output_reserve <= 0 {
        return Err(LgtError::InsufficientLiquidity);
    }

    let input_with_fee = input_amount
        .checked_mul(FEE_NUMERATOR)
        .ok_or(LgtError::ArithmeticOverflow)?;
    let numerator = input_with_fee
        .checked_mul(output_reserve)
        .ok_or(LgtError::ArithmeticOverflow)?;
    let denominator = input_reserve
        .checked_mul(FEE_DENOMINATOR)
        .and_then(|scaled| scaled.checked_add(input_with_fee))
        .ok_or(LgtError::ArithmeticOverflow)?;

    Ok(numerator / denominator)
}

/// Input required to take exactly `output_amount` out of the pool.
///
/// `input = input_reserve * output * 1000 / ((output_reserve - output) * 995) + 1`
///
/// The trailing `+ 1` means even a zero-sized purchase costs one unit.
pub fn get_output_price(
    output_amount: i128,
    input_reserve: i128,
    output_reserve: i128,
) -> Result<i128, LgtError> {
    if output_amount < 0 {
        return Err(LgtError::NegativeAmount);
    }
    if input_reserve <= 0 || output_amount >= output_reserve {
        return Err(LgtError::InsufficientLiquidity);
    }

    let numerator = input_reserve
        .checked_mul(output_amount)
        .and_then(|v| v.checked_mul(FEE_DENOMINATOR))
        .ok_or(LgtError::ArithmeticOverflow)?;
    let denominator = (output_reserve - output_amount)
        .checked_mul(FEE_NUMERATOR)
        .ok_or(LgtError::ArithmeticOverflow)?;

    (numerator / denominator)
        .checked_add(1)
        .ok_or(LgtError::ArithmeticOverflow)
}

/// Constant-product invariant `k = eth_reserve * token_reserve`.
pub fn product(eth_reserve: i128, token_reserve: i128) -> Result<i128, LgtError> {
    eth_reserve
        .checked_mul(token_reserve)
        .ok_or(LgtError::ArithmeticOverflow)
}
