//! Contract creation funded by credits bought from the pool.
//!
//! The credits are freed as part of the purchase; the resource budget they
//! stand for is host specific and only reported through the `free` event.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::{
    bridge,
    errors::LgtError,
    guards,
    math::get_output_price,
    pool,
    storage::{self, LgtState},
    value,
};

/// Deploys `wasm_hash` at an address derived from this contract and its
/// deploy nonce.
pub fn deploy(
    env: &Env,
    from: &Address,
    credit_cost: i128,
    deadline: u64,
    wasm_hash: BytesN<32>,
    value: i128,
) -> Result<Address, LgtError> {
    guards::check_deadline(env, deadline)?;
    let mut state = storage::load_state(env)?;
    let salt = next_salt(env, &mut state);
    deploy_with_credit(env, state, from, credit_cost, salt, wasm_hash, value)
}

/// Deploys `wasm_hash` at the address [`create2_address`] reports for `salt`.
pub fn create2(
    env: &Env,
    from: &Address,
    credit_cost: i128,
    deadline: u64,
    salt: BytesN<32>,
    wasm_hash: BytesN<32>,
    value: i128,
) -> Result<Address, LgtError> {
    guards::check_deadline(env, deadline)?;
    let state = storage::load_state(env)?;
    deploy_with_credit(env, state, from, credit_cost, salt, wasm_hash, value)
}

pub fn create2_address(env: &Env, salt: BytesN<32>) -> Address {
    env.deployer().with_current_contract(salt).deployed_address()
}

fn next_salt(env: &Env, state: &mut LgtState) -> BytesN<32> {
    let mut salt_data = Bytes::new(env);
    salt_data.append(&env.current_contract_address().to_xdr(env));
    salt_data.append(&state.deploy_nonce.to_xdr(env));
    state.deploy_nonce += 1;
    env.crypto().sha256(&salt_data).into()
}

fn deploy_with_credit(
    env: &Env,
    mut state: LgtState,
    from: &Address,
    credit_cost: i128,
    salt: BytesN<32>,
    wasm_hash: BytesN<32>,
    value: i128,
) -> Result<Address, LgtError> {
    guards::check_non_negative(credit_cost)?;
    guards::check_non_negative(value)?;

    let mut refund = 0;
    if credit_cost > 0 {
        let (eth_reserve, token_reserve) = pool::reserves(env, &state);
        let eth_sold = get_output_price(credit_cost, eth_reserve, token_reserve)?;
        if eth_sold > value {
            return Err(LgtError::InsufficientValue);
        }
        value::collect(env, &state, from, value);
        bridge::redeem_from_reserve(env, &mut state, from, credit_cost)?;
        refund = value - eth_sold;
    }
    storage::set_state(env, &state);

    let deployed = env.deployer().with_current_contract(salt).deploy(wasm_hash);

    value::pay(env, &state, from, refund);
    Ok(deployed)
}
