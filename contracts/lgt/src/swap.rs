//! Value <-> credit swaps against the constant-product pool.
//!
//! Every swap follows the same order: guards, price, collect attached
//! value, reserve/ledger update, k check, persist, payout.

use soroban_sdk::{Address, Env};

use crate::{
    bridge,
    errors::LgtError,
    guards,
    math::{get_input_price, get_output_price, product},
    pool,
    storage::{self, LgtState},
    value,
};

/// Rejects a trade that shrank `k = eth_reserve * token_reserve`.
fn check_k(pre_k: i128, eth_reserve: i128, state: &LgtState) -> Result<(), LgtError> {
    let post_k = product(eth_reserve, state.token_reserve)?;
    if post_k < pre_k {
        return Err(LgtError::InvalidK);
    }
    Ok(())
}

/// Sells exactly `value` for at least `min_tokens` credits, minted to
/// `recipient`. Returns the credits bought.
pub fn eth_to_token_input(
    env: &Env,
    buyer: &Address,
    value: i128,
    min_tokens: i128,
    deadline: u64,
    recipient: &Address,
) -> Result<i128, LgtError> {
    guards::check_deadline(env, deadline)?;
    guards::check_non_negative(value)?;
    if value == 0 {
        return Err(LgtError::NoValue);
    }
    guards::check_positive(min_tokens)?;
    guards::check_recipient(env, recipient)?;

    let mut state = storage::load_state(env)?;
    let (eth_reserve, token_reserve) = pool::reserves(env, &state);
    let pre_k = product(eth_reserve, token_reserve)?;

    let tokens_bought = get_input_price(value, eth_reserve, token_reserve)?;
    if tokens_bought < min_tokens {
        return Err(LgtError::SlippageExceeded);
    }

    value::collect(env, &state, buyer, value);
    bridge::release_to(env, &mut state, recipient, tokens_bought)?;
    let eth_after = eth_reserve.checked_add(value).ok_or(LgtError::ArithmeticOverflow)?;
    check_k(pre_k, eth_after, &state)?;
    storage::set_state(env, &state);

    Ok(tokens_bought)
}

/// Buys exactly `tokens_bought` credits for `recipient`, spending at most
/// `max_eth`. The unspent part of `max_eth` goes back to `buyer`. Returns
/// the value spent.
pub fn eth_to_token_output(
    env: &Env,
    buyer: &Address,
    tokens_bought: i128,
    deadline: u64,
    recipient: &Address,
    max_eth: i128,
) -> Result<i128, LgtError> {
    guards::check_deadline(env, deadline)?;
    guards::check_non_negative(max_eth)?;
    if max_eth == 0 {
        return Err(LgtError::NoValue);
    }
    guards::check_positive(tokens_bought)?;
    guards::check_recipient(env, recipient)?;

    let mut state = storage::load_state(env)?;
    let (eth_reserve, token_reserve) = pool::reserves(env, &state);
    let pre_k = product(eth_reserve, token_reserve)?;

    let eth_sold = get_output_price(tokens_bought, eth_reserve, token_reserve)?;
    if eth_sold > max_eth {
        return Err(LgtError::SlippageExceeded);
    }

    value::collect(env, &state, buyer, max_eth);
    bridge::release_to(env, &mut state, recipient, tokens_bought)?;
    let eth_after = eth_reserve.checked_add(eth_sold).ok_or(LgtError::ArithmeticOverflow)?;
    check_k(pre_k, eth_after, &state)?;
    storage::set_state(env, &state);

    value::pay(env, &state, buyer, max_eth - eth_sold);
    Ok(eth_sold)
}

/// Sells exactly `tokens_sold` of `seller`'s credits for at least `min_eth`,
/// paid to `recipient`. Returns the value bought.
pub fn token_to_eth_input(
    env: &Env,
    seller: &Address,
    tokens_sold: i128,
    min_eth: i128,
    deadline: u64,
    recipient: &Address,
) -> Result<i128, LgtError> {
    guards::check_deadline(env, deadline)?;
    guards::check_positive(tokens_sold)?;
    guards::check_positive(min_eth)?;
    guards::check_recipient(env, recipient)?;

    let mut state = storage::load_state(env)?;
    let (eth_reserve, token_reserve) = pool::reserves(env, &state);
    let pre_k = product(eth_reserve, token_reserve)?;

    let eth_bought = get_input_price(tokens_sold, token_reserve, eth_reserve)?;
    if eth_bought < min_eth {
        return Err(LgtError::SlippageExceeded);
    }

    bridge::absorb_from(env, &mut state, seller, tokens_sold)?;
    check_k(pre_k, eth_reserve - eth_bought, &state)?;
    storage::set_state(env, &state);

    value::pay(env, &state, recipient, eth_bought);
    Ok(eth_bought)
}

/// Buys exactly `eth_bought` for `recipient` with at most `max_tokens` of
/// `seller`'s credits. Returns the credits sold.
pub fn token_to_eth_output(
    env: &Env,
    seller: &Address,
    eth_bought: i128,
    max_tokens: i128,
    deadline: u64,
    recipient: &Address,
) -> Result<i128, LgtError> {
    guards::check_deadline(env, deadline)?;
    guards::check_positive(eth_bought)?;
    guards::check_non_negative(max_tokens)?;
    guards::check_recipient(env, recipient)?;

    let mut state = storage::load_state(env)?;
    let (eth_reserve, token_reserve) = pool::reserves(env, &state);
    let pre_k = product(eth_reserve, token_reserve)?;

    let tokens_sold = get_output_price(eth_bought, token_reserve, eth_reserve)?;
    if tokens_sold > max_tokens {
        return Err(LgtError::SlippageExceeded);
    }

    bridge::absorb_from(env, &mut state, seller, tokens_sold)?;
    check_k(pre_k, eth_reserve - eth_bought, &state)?;
    storage::set_state(env, &state);

    value::pay(env, &state, recipient, eth_bought);
    Ok(tokens_sold)
}
