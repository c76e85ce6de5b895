//! Atomic wrappers chaining a pool trade with a credit mint or free.
//!
//! Two failure policies live here. The buy-then-free family is best-effort:
//! it returns `0` and leaves value with its sender whenever it cannot
//! complete, so it can ride along in unrelated transactions. The
//! mint-then-sell and mint-then-provide family never touches caller-owned
//! credits and keeps strict `Result` semantics.

use soroban_sdk::{log, Address, Env};

use crate::{
    bridge,
    errors::LgtError,
    events::LgtEvents,
    guards,
    math::{get_input_price, get_output_price, mul_div, product},
    pool::{self, MIN_INITIAL_VALUE},
    storage,
    value,
};

/// Buys exactly `amount` credits with `value` and frees them on behalf of
/// `recipient`, who also receives the unspent value.
///
/// Returns the value spent, or `0` without any state change when the
/// deadline has passed, the pool cannot supply `amount`, `value` does not
/// cover the price, or `buyer` does not hold `value`. Buying zero credits costs the one-unit minimum.
pub fn buy_and_free(
    env: &Env,
    buyer: &Address,
    amount: i128,
    deadline: u64,
    recipient: &Address,
    value: i128,
) -> i128 {
    if guards::deadline_passed(env, deadline) {
        log!(env, "buy_and_free: deadline passed", deadline);
        return 0;
    }
    if value <= 0 || amount < 0 || guards::check_recipient(env, recipient).is_err() {
        return 0;
    }
    let Some(mut state) = storage::get_state(env) else {
        return 0;
    };
    if !value::can_cover(env, &state, buyer, value) {
        log!(env, "buy_and_free: buyer holds less than value", value);
        return 0;
    }

    let (eth_reserve, token_reserve) = pool::reserves(env, &state);
    let eth_sold = match get_output_price(amount, eth_reserve, token_reserve) {
        Ok(price) => price,
        Err(_) => {
            log!(env, "buy_and_free: reserve cannot supply", amount, token_reserve);
            return 0;
        }
    };
    if eth_sold > value {
        log!(env, "buy_and_free: value below price", value, eth_sold);
        return 0;
    }
    if bridge::redeem_from_reserve(env, &mut state, recipient, amount).is_err() {
        return 0;
    }

    value::collect(env, &state, buyer, value);
    storage::set_state(env, &state);
    value::pay(env, &state, recipient, value - eth_sold);
    eth_sold
}

/// Spends `value` on as many credits as it affords, capped at
/// `max_amount`, and frees them. The unspent value goes back to `buyer`.
///
/// Returns the number of credits freed; `0` means nothing happened.
pub fn buy_up_to_and_free(
    env: &Env,
    buyer: &Address,
    max_amount: i128,
    deadline: u64,
    value: i128,
) -> i128 {
    if guards::deadline_passed(env, deadline) {
        log!(env, "buy_up_to_and_free: deadline passed", deadline);
        return 0;
    }
    if value <= 0 || max_amount <= 0 {
        return 0;
    }
    let Some(mut state) = storage::get_state(env) else {
        return 0;
    };
    if !value::can_cover(env, &state, buyer, value) {
        log!(env, "buy_up_to_and_free: buyer holds less than value", value);
        return 0;
    }

    let (eth_reserve, token_reserve) = pool::reserves(env, &state);
    let Ok(affordable) = get_input_price(value, eth_reserve, token_reserve) else {
        return 0;
    };
    let (tokens, eth_sold) = if affordable > max_amount {
        match get_output_price(max_amount, eth_reserve, token_reserve) {
            Ok(price) => (max_amount, price),
            Err(_) => return 0,
        }
    } else {
        (affordable, value)
    };
    if tokens == 0 {
        log!(env, "buy_up_to_and_free: value buys no credits", value);
        return 0;
    }
    if bridge::redeem_from_reserve(env, &mut state, buyer, tokens).is_err() {
        return 0;
    }

    value::collect(env, &state, buyer, value);
    storage::set_state(env, &state);
    value::pay(env, &state, buyer, value - eth_sold);
    tokens
}

/// Mints `amount` credits straight into the reserve and pays the proceeds
/// of selling them to `recipient`.
///
/// # Errors
/// `DeadlinePassed`, `ZeroAmount` for `amount == 0`, `SlippageExceeded` when
/// the proceeds fall below `min_eth`, and the recipient guards.
pub fn mint_to_sell(
    env: &Env,
    amount: i128,
    min_eth: i128,
    deadline: u64,
    recipient: &Address,
) -> Result<i128, LgtError> {
    guards::check_deadline(env, deadline)?;
    guards::check_positive(amount)?;
    guards::check_non_negative(min_eth)?;
    guards::check_recipient(env, recipient)?;

    let mut state = storage::load_state(env)?;
    let (eth_reserve, token_reserve) = pool::reserves(env, &state);
    let pre_k = product(eth_reserve, token_reserve)?;

    let eth_bought = get_input_price(amount, token_reserve, eth_reserve)?;
    if eth_bought < min_eth {
        return Err(LgtError::SlippageExceeded);
    }

    bridge::mint_into_reserve(&mut state, amount)?;
    if product(eth_reserve - eth_bought, state.token_reserve)? < pre_k {
        return Err(LgtError::InvalidK);
    }
    storage::set_state(env, &state);

    value::pay(env, &state, recipient, eth_bought);
    Ok(eth_bought)
}

/// Mints up to `max_tokens` credits and deposits them with `value` as new
/// liquidity owned by `recipient`. Whichever side binds first decides the
/// deposit; unused value is refunded to `provider`.
///
/// Returns `(tokens_added, eth_added, shares_added)`.
pub fn mint_to_liquidity(
    env: &Env,
    provider: &Address,
    max_tokens: i128,
    min_liquidity: i128,
    deadline: u64,
    recipient: &Address,
    value: i128,
) -> Result<(i128, i128, i128), LgtError> {
    guards::check_deadline(env, deadline)?;
    guards::check_positive(max_tokens)?;
    guards::check_non_negative(min_liquidity)?;
    guards::check_non_negative(value)?;
    if value == 0 {
        return Err(LgtError::NoValue);
    }
    guards::check_recipient(env, recipient)?;

    let mut state = storage::load_state(env)?;
    let (eth_reserve, token_reserve) = pool::reserves(env, &state);
    let total_shares = state.pool_total_shares;

    let (token_amount, eth_amount, liquidity) = if total_shares == 0 {
        if value < MIN_INITIAL_VALUE {
            return Err(LgtError::DustValue);
        }
        (max_tokens, value, value)
    } else {
        if eth_reserve == 0 || token_reserve == 0 {
            return Err(LgtError::InsufficientLiquidity);
        }
        let mut eth_amount = mul_div(max_tokens, eth_reserve, token_reserve)? - 1;
        let token_amount = if eth_amount > value {
            let affordable = value.checked_add(1).ok_or(LgtError::ArithmeticOverflow)?;
            let token_amount = mul_div(affordable, token_reserve, eth_reserve)?;
            eth_amount = mul_div(token_amount, eth_reserve, token_reserve)? - 1;
            token_amount
        } else {
            max_tokens
        };
        if token_amount <= 0 || eth_amount <= 0 {
            return Err(LgtError::InsufficientLiquidity);
        }
        let liquidity = mul_div(eth_amount, total_shares, eth_reserve)?;
        if liquidity < min_liquidity {
            return Err(LgtError::SlippageExceeded);
        }
        (token_amount, eth_amount, liquidity)
    };
    if liquidity == 0 {
        return Err(LgtError::InsufficientLiquidity);
    }

    value::collect(env, &state, provider, value);
    bridge::mint_into_reserve(&mut state, token_amount)?;
    pool::credit_shares(env, &mut state, recipient, liquidity)?;
    storage::set_state(env, &state);

    LgtEvents::add_liquidity(env, recipient, eth_amount, token_amount);
    value::pay(env, &state, provider, value - eth_amount);
    Ok((token_amount, eth_amount, liquidity))
}
