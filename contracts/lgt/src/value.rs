//! Movement of the value currency the pool trades credits against.
//!
//! Soroban has no implicit call value, so "attached value" is an explicit
//! amount pulled from the caller with a token transfer. Payouts go through
//! [`pay`] and must be the last thing an entry point does.

use soroban_sdk::{token::TokenClient, Address, Env};

use crate::storage::LgtState;

/// Value held by the contract. Read it before [`collect`] to get the
/// reserve as it stood before the in-flight call.
pub fn held(env: &Env, state: &LgtState) -> i128 {
    TokenClient::new(env, &state.value_token).balance(&env.current_contract_address())
}

/// Whether `from` holds at least `amount`, so that [`collect`] cannot trap.
pub fn can_cover(env: &Env, state: &LgtState, from: &Address, amount: i128) -> bool {
    TokenClient::new(env, &state.value_token).balance(from) >= amount
}

/// Pulls `amount` from `from` into the contract.
pub fn collect(env: &Env, state: &LgtState, from: &Address, amount: i128) {
    if amount > 0 {
        TokenClient::new(env, &state.value_token).transfer(
            from,
            &env.current_contract_address(),
            &amount,
        );
    }
}

/// Sends `amount` from the contract to `to`.
pub fn pay(env: &Env, state: &LgtState, to: &Address, amount: i128) {
    if amount > 0 {
        TokenClient::new(env, &state.value_token).transfer(
            &env.current_contract_address(),
            to,
            &amount,
        );
    }
}
