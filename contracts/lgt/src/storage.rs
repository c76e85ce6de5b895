use soroban_sdk::{contracttype, Address, Env};

use crate::errors::LgtError;

const INSTANCE_LIFETIME_THRESHOLD: u32 = 17280; // ~1 day in 5s ledgers
const INSTANCE_BUMP_AMOUNT: u32 = 518400; // ~30 days in 5s ledgers
const BALANCE_LIFETIME_THRESHOLD: u32 = 17280;
const BALANCE_BUMP_AMOUNT: u32 = 518400;

/// Ledger and pool bookkeeping shared by every entry point.
///
/// `token_reserve` is the pool's virtual sell-side inventory. It is never an
/// account balance, so `total_supply` is derived rather than stored and the
/// split between owned and pool-reserved credits cannot drift.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LgtState {
    pub value_token: Address,
    pub owned_supply: i128,
    pub token_reserve: i128,
    pub pool_total_shares: i128,
    pub deploy_nonce: u64,
}

impl LgtState {
    pub fn new(value_token: Address) -> Self {
        Self {
            value_token,
            owned_supply: 0,
            token_reserve: 0,
            pool_total_shares: 0,
            deploy_nonce: 0,
        }
    }

    pub fn total_supply(&self) -> Result<i128, LgtError> {
        self.owned_supply
            .checked_add(self.token_reserve)
            .ok_or(LgtError::ArithmeticOverflow)
    }
}

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    State,
    Balance(Address),
    Allowance(Address, Address),
    PoolBalance(Address),
}

pub fn has_state(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::State)
}

pub fn get_state(env: &Env) -> Option<LgtState> {
    env.storage().instance().get(&DataKey::State)
}

pub fn load_state(env: &Env) -> Result<LgtState, LgtError> {
    get_state(env).ok_or(LgtError::NotInitialized)
}

pub fn set_state(env: &Env, state: &LgtState) {
    env.storage().instance().set(&DataKey::State, state);
    extend_instance_ttl(env);
}

/// Extend instance storage TTL to keep contract alive.
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn read_amount(env: &Env, key: &DataKey) -> i128 {
    env.storage().persistent().get(key).unwrap_or(0)
}

fn write_amount(env: &Env, key: &DataKey, amount: i128) {
    if amount == 0 {
        env.storage().persistent().remove(key);
    } else {
        env.storage().persistent().set(key, &amount);
        env.storage()
            .persistent()
            .extend_ttl(key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
    }
}

// === Credit balances ===

pub fn get_balance(env: &Env, id: &Address) -> i128 {
    read_amount(env, &DataKey::Balance(id.clone()))
}

pub fn set_balance(env: &Env, id: &Address, amount: i128) {
    write_amount(env, &DataKey::Balance(id.clone()), amount);
}

// === Allowances ===

pub fn get_allowance(env: &Env, owner: &Address, spender: &Address) -> i128 {
    read_amount(env, &DataKey::Allowance(owner.clone(), spender.clone()))
}

pub fn set_allowance(env: &Env, owner: &Address, spender: &Address, amount: i128) {
    write_amount(env, &DataKey::Allowance(owner.clone(), spender.clone()), amount);
}

// === Liquidity shares ===

pub fn get_pool_balance(env: &Env, id: &Address) -> i128 {
    read_amount(env, &DataKey::PoolBalance(id.clone()))
}

pub fn set_pool_balance(env: &Env, id: &Address, amount: i128) {
    write_amount(env, &DataKey::PoolBalance(id.clone()), amount);
}
