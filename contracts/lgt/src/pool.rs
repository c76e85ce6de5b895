//! Liquidity provision, liquidity-share ledger and price queries.

use soroban_sdk::{Address, Env};

use crate::{
    bridge,
    errors::LgtError,
    events::LgtEvents,
    guards,
    math::{get_input_price, get_output_price, mul_div},
    storage::{self, LgtState},
    value,
};

/// Smallest value the first provider may deposit.
pub const MIN_INITIAL_VALUE: i128 = 1_000_000_000;

/// Current `(eth_reserve, token_reserve)` before any value attached to the
/// in-flight call is collected.
pub fn reserves(env: &Env, state: &LgtState) -> (i128, i128) {
    (value::held(env, state), state.token_reserve)
}

// === Price queries ===

pub fn eth_to_token_input_price(env: &Env, eth_sold: i128) -> Result<i128, LgtError> {
    guards::check_non_negative(eth_sold)?;
    if eth_sold == 0 {
        return Err(LgtError::NoValue);
    }
    let state = storage::load_state(env)?;
    let (eth_reserve, token_reserve) = reserves(env, &state);
    get_input_price(eth_sold, eth_reserve, token_reserve)
}

pub fn eth_to_token_output_price(env: &Env, tokens_bought: i128) -> Result<i128, LgtError> {
    let state = storage::load_state(env)?;
    let (eth_reserve, token_reserve) = reserves(env, &state);
    get_output_price(tokens_bought, eth_reserve, token_reserve)
}

pub fn token_to_eth_input_price(env: &Env, tokens_sold: i128) -> Result<i128, LgtError> {
    guards::check_positive(tokens_sold)?;
    let state = storage::load_state(env)?;
    let (eth_reserve, token_reserve) = reserves(env, &state);
    get_input_price(tokens_sold, token_reserve, eth_reserve)
}

pub fn token_to_eth_output_price(env: &Env, eth_bought: i128) -> Result<i128, LgtError> {
    let state = storage::load_state(env)?;
    let (eth_reserve, token_reserve) = reserves(env, &state);
    get_output_price(eth_bought, token_reserve, eth_reserve)
}

// === Liquidity ===

/// Deposits `value` and matching credits from `provider`'s balance.
///
/// The first deposit sets the exchange rate: the whole `value` and
/// `max_tokens` credits become the reserves and the provider receives
/// `value` shares. Later deposits must follow the current ratio, rounding
/// the required credits up.
///
/// # Errors
/// | Error                   | Condition                                        |
/// |-------------------------|--------------------------------------------------|
/// | `DeadlinePassed`        | ledger timestamp is past `deadline`              |
/// | `NoValue`               | `value == 0`                                     |
/// | `ZeroAmount`            | `max_tokens == 0`                                |
/// | `DustValue`             | first deposit below `MIN_INITIAL_VALUE`          |
/// | `SlippageExceeded`      | needs more than `max_tokens`, or creates fewer than `min_liquidity` shares |
/// | `InsufficientLiquidity` | deposit too small to mint a single share         |
/// | `InsufficientBalance`   | provider holds fewer credits than required       |
pub fn add_liquidity(
    env: &Env,
    provider: &Address,
    min_liquidity: i128,
    max_tokens: i128,
    deadline: u64,
    value: i128,
) -> Result<i128, LgtError> {
    guards::check_deadline(env, deadline)?;
    guards::check_non_negative(min_liquidity)?;
    guards::check_non_negative(value)?;
    if value == 0 {
        return Err(LgtError::NoValue);
    }
    guards::check_positive(max_tokens)?;

    let mut state = storage::load_state(env)?;
    let (eth_reserve, token_reserve) = reserves(env, &state);

    let (token_amount, liquidity) = if state.pool_total_shares > 0 {
        let token_amount = mul_div(value, token_reserve, eth_reserve)?
            .checked_add(1)
            .ok_or(LgtError::ArithmeticOverflow)?;
        let liquidity = mul_div(value, state.pool_total_shares, eth_reserve)?;
        if token_amount > max_tokens {
            return Err(LgtError::SlippageExceeded);
        }
        if liquidity < min_liquidity {
            return Err(LgtError::SlippageExceeded);
        }
        (token_amount, liquidity)
    } else {
        if value < MIN_INITIAL_VALUE {
            return Err(LgtError::DustValue);
        }
        (max_tokens, value)
    };
    if liquidity == 0 {
        return Err(LgtError::InsufficientLiquidity);
    }

    value::collect(env, &state, provider, value);
    bridge::absorb_from(env, &mut state, provider, token_amount)?;
    credit_shares(env, &mut state, provider, liquidity)?;
    storage::set_state(env, &state);

    LgtEvents::add_liquidity(env, provider, value, token_amount);
    Ok(liquidity)
}

/// Burns `amount` of `provider`'s shares for a proportional slice of both
/// reserves. Credits return to the provider's balance, value is paid out last.
pub fn remove_liquidity(
    env: &Env,
    provider: &Address,
    amount: i128,
    min_eth: i128,
    min_tokens: i128,
    deadline: u64,
) -> Result<(i128, i128), LgtError> {
    guards::check_deadline(env, deadline)?;
    guards::check_positive(amount)?;
    guards::check_positive(min_eth)?;
    guards::check_positive(min_tokens)?;

    let mut state = storage::load_state(env)?;
    let total_shares = state.pool_total_shares;
    if total_shares == 0 {
        return Err(LgtError::InsufficientLiquidity);
    }
    let (eth_reserve, token_reserve) = reserves(env, &state);

    let eth_amount = mul_div(amount, eth_reserve, total_shares)?;
    let token_amount = mul_div(amount, token_reserve, total_shares)?;
    if eth_amount < min_eth || token_amount < min_tokens {
        return Err(LgtError::SlippageExceeded);
    }

    debit_shares(env, &mut state, provider, amount)?;
    bridge::release_to(env, &mut state, provider, token_amount)?;
    storage::set_state(env, &state);

    LgtEvents::remove_liquidity(env, provider, eth_amount, token_amount);
    value::pay(env, &state, provider, eth_amount);
    Ok((eth_amount, token_amount))
}

/// Moves liquidity shares between accounts.
pub fn transfer_shares(
    env: &Env,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<bool, LgtError> {
    guards::check_recipient(env, to)?;
    guards::check_non_negative(amount)?;

    let from_shares = storage::get_pool_balance(env, from);
    if from_shares < amount {
        return Err(LgtError::InsufficientBalance);
    }
    if from != to {
        let to_shares = storage::get_pool_balance(env, to)
            .checked_add(amount)
            .ok_or(LgtError::ArithmeticOverflow)?;
        storage::set_pool_balance(env, from, from_shares - amount);
        storage::set_pool_balance(env, to, to_shares);
    }

    LgtEvents::transfer_liquidity(env, from, to, amount);
    Ok(true)
}

pub fn credit_shares(
    env: &Env,
    state: &mut LgtState,
    to: &Address,
    amount: i128,
) -> Result<(), LgtError> {
    let shares = storage::get_pool_balance(env, to)
        .checked_add(amount)
        .ok_or(LgtError::ArithmeticOverflow)?;
    state.pool_total_shares = state
        .pool_total_shares
        .checked_add(amount)
        .ok_or(LgtError::ArithmeticOverflow)?;
    storage::set_pool_balance(env, to, shares);
    Ok(())
}

fn debit_shares(
    env: &Env,
    state: &mut LgtState,
    from: &Address,
    amount: i128,
) -> Result<(), LgtError> {
    let shares = storage::get_pool_balance(env, from);
    if shares < amount {
        return Err(LgtError::InsufficientBalance);
    }
    state.pool_total_shares -= amount;
    storage::set_pool_balance(env, from, shares - amount);
    Ok(())
}
