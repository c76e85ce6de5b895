//! Credit balances, allowances and the mint/free primitives.

use soroban_sdk::{log, Address, Env};

use crate::{
    errors::LgtError,
    events::LgtEvents,
    guards,
    storage::{self, LgtState},
};

/// Nominal resource budget released per freed credit, reported in `free`
/// events. Hosts do not refund it.
pub const RECLAIMED_UNITS_PER_CREDIT: i128 = 24_000;

/// Credits `amount` to `to` and grows the owned supply.
pub fn assign(env: &Env, state: &mut LgtState, to: &Address, amount: i128) -> Result<(), LgtError> {
    let balance = storage::get_balance(env, to)
        .checked_add(amount)
        .ok_or(LgtError::ArithmeticOverflow)?;
    state.owned_supply = state
        .owned_supply
        .checked_add(amount)
        .ok_or(LgtError::ArithmeticOverflow)?;
    storage::set_balance(env, to, balance);
    Ok(())
}

/// Debits `amount` from `from` and shrinks the owned supply.
pub fn unassign(
    env: &Env,
    state: &mut LgtState,
    from: &Address,
    amount: i128,
) -> Result<(), LgtError> {
    let balance = storage::get_balance(env, from);
    if balance < amount {
        return Err(LgtError::InsufficientBalance);
    }
    state.owned_supply = state
        .owned_supply
        .checked_sub(amount)
        .ok_or(LgtError::ArithmeticOverflow)?;
    storage::set_balance(env, from, balance - amount);
    Ok(())
}

pub fn mint(env: &Env, state: &mut LgtState, to: &Address, amount: i128) -> Result<(), LgtError> {
    guards::check_non_negative(amount)?;
    assign(env, state, to, amount)?;
    LgtEvents::mint(env, to, amount);
    Ok(())
}

/// Redeems `amount` of `owner`'s credits.
///
/// Never fails: an insufficient balance (or a negative amount) returns
/// `false` and leaves every balance untouched, so a `free` can be appended
/// to any transaction without risking it.
pub fn free(env: &Env, state: &mut LgtState, owner: &Address, amount: i128) -> bool {
    if amount < 0 || storage::get_balance(env, owner) < amount {
        log!(env, "free: balance below requested amount", owner, amount);
        return false;
    }
    if amount == 0 {
        return true;
    }
    if unassign(env, state, owner, amount).is_err() {
        return false;
    }
    LgtEvents::burn(env, owner, amount);
    LgtEvents::free(env, owner, amount, reclaimed_units(amount));
    true
}

/// Same as [`free`] but spends `spender`'s allowance over `owner`'s credits.
pub fn free_from(
    env: &Env,
    state: &mut LgtState,
    spender: &Address,
    owner: &Address,
    amount: i128,
) -> bool {
    let allowance = storage::get_allowance(env, owner, spender);
    if amount < 0 || allowance < amount {
        log!(env, "free_from: allowance below requested amount", spender, amount);
        return false;
    }
    if !free(env, state, owner, amount) {
        return false;
    }
    if amount > 0 {
        storage::set_allowance(env, owner, spender, allowance - amount);
    }
    true
}

pub fn reclaimed_units(amount: i128) -> i128 {
    amount.saturating_mul(RECLAIMED_UNITS_PER_CREDIT)
}

pub fn transfer(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), LgtError> {
    guards::check_non_negative(amount)?;
    if guards::is_zero_address(env, to) {
        return Err(LgtError::ZeroAddress);
    }

    let from_balance = storage::get_balance(env, from);
    if from_balance < amount {
        return Err(LgtError::InsufficientBalance);
    }
    if from != to {
        let to_balance = storage::get_balance(env, to)
            .checked_add(amount)
            .ok_or(LgtError::ArithmeticOverflow)?;
        storage::set_balance(env, from, from_balance - amount);
        storage::set_balance(env, to, to_balance);
    }

    LgtEvents::transfer(env, from, to, amount);
    Ok(())
}

pub fn transfer_from(
    env: &Env,
    spender: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), LgtError> {
    guards::check_non_negative(amount)?;
    spend_allowance(env, from, spender, amount)?;
    transfer(env, from, to, amount)
}

pub fn spend_allowance(
    env: &Env,
    owner: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), LgtError> {
    let allowance = storage::get_allowance(env, owner, spender);
    if allowance < amount {
        return Err(LgtError::InsufficientAllowance);
    }
    if amount > 0 {
        storage::set_allowance(env, owner, spender, allowance - amount);
    }
    Ok(())
}

pub fn approve(
    env: &Env,
    owner: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), LgtError> {
    guards::check_non_negative(amount)?;
    if guards::is_zero_address(env, spender) {
        return Err(LgtError::ZeroAddress);
    }
    storage::set_allowance(env, owner, spender, amount);
    LgtEvents::approve(env, owner, spender, amount);
    Ok(())
}

pub fn increase_allowance(
    env: &Env,
    owner: &Address,
    spender: &Address,
    added: i128,
) -> Result<(), LgtError> {
    guards::check_non_negative(added)?;
    let allowance = storage::get_allowance(env, owner, spender)
        .checked_add(added)
        .ok_or(LgtError::ArithmeticOverflow)?;
    approve(env, owner, spender, allowance)
}

pub fn decrease_allowance(
    env: &Env,
    owner: &Address,
    spender: &Address,
    subtracted: i128,
) -> Result<(), LgtError> {
    guards::check_non_negative(subtracted)?;
    let allowance = storage::get_allowance(env, owner, spender);
    if allowance < subtracted {
        return Err(LgtError::InsufficientAllowance);
    }
    approve(env, owner, spender, allowance - subtracted)
}
