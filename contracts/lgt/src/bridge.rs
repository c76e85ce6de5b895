//! Reconciles owned supply with the pool's virtual token reserve.
//!
//! The reserve is bookkeeping capacity, not a balance. Credits leaving the
//! pool are minted to the buyer and credits entering it are freed from the
//! seller, so a trade only shifts supply between "owned" and "reserved".

use soroban_sdk::{Address, Env};

use crate::{
    errors::LgtError,
    events::LgtEvents,
    ledger,
    storage::LgtState,
};

fn shrink_reserve(state: &mut LgtState, amount: i128) -> Result<(), LgtError> {
    if amount > state.token_reserve {
        return Err(LgtError::InsufficientLiquidity);
    }
    state.token_reserve -= amount;
    Ok(())
}

fn grow_reserve(state: &mut LgtState, amount: i128) -> Result<(), LgtError> {
    state.token_reserve = state
        .token_reserve
        .checked_add(amount)
        .ok_or(LgtError::ArithmeticOverflow)?;
    Ok(())
}

/// Pool sells `amount` credits to `buyer`. Total supply is unchanged.
pub fn release_to(
    env: &Env,
    state: &mut LgtState,
    buyer: &Address,
    amount: i128,
) -> Result<(), LgtError> {
    shrink_reserve(state, amount)?;
    ledger::assign(env, state, buyer, amount)?;
    LgtEvents::mint(env, buyer, amount);
    Ok(())
}

/// Pool takes `amount` credits from `seller`. Total supply is unchanged.
pub fn absorb_from(
    env: &Env,
    state: &mut LgtState,
    seller: &Address,
    amount: i128,
) -> Result<(), LgtError> {
    ledger::unassign(env, state, seller, amount)?;
    grow_reserve(state, amount)?;
    LgtEvents::burn(env, seller, amount);
    Ok(())
}

/// Credits bought out of the pool and freed in the same step on behalf of
/// `owner`. Total supply shrinks by `amount`.
pub fn redeem_from_reserve(
    env: &Env,
    state: &mut LgtState,
    owner: &Address,
    amount: i128,
) -> Result<(), LgtError> {
    shrink_reserve(state, amount)?;
    if amount > 0 {
        LgtEvents::free(env, owner, amount, ledger::reclaimed_units(amount));
    }
    Ok(())
}

/// Freshly minted credits placed straight into the reserve. Total supply
/// grows by `amount`, owned supply is unchanged.
pub fn mint_into_reserve(state: &mut LgtState, amount: i128) -> Result<(), LgtError> {
    grow_reserve(state, amount)
}
