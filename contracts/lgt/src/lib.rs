#![no_std]

mod bridge;
mod composite;
mod deploy;
mod errors;
mod events;
mod guards;
mod ledger;
mod math;
mod pool;
mod storage;
mod swap;
mod value;

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod test;

use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String};
use soroban_token_sdk::{metadata::TokenMetadata, TokenUtils};

pub use errors::LgtError;
use storage::LgtState;

pub const NAME: &str = "Liquid Gas Token";
pub const SYMBOL: &str = "LGT";
pub const DECIMALS: u32 = 0;

#[contract]
pub struct LiquidGasToken;

#[contractimpl]
impl LiquidGasToken {
    /// Binds the pool to the token used as its value currency.
    pub fn initialize(env: Env, value_token: Address) -> Result<(), LgtError> {
        if storage::has_state(&env) {
            return Err(LgtError::AlreadyInitialized);
        }
        TokenUtils::new(&env).metadata().set_metadata(&TokenMetadata {
            decimal: DECIMALS,
            name: String::from_str(&env, NAME),
            symbol: String::from_str(&env, SYMBOL),
        });
        storage::set_state(&env, &LgtState::new(value_token));
        Ok(())
    }

    // === Token metadata and supply ===

    pub fn name(env: Env) -> String {
        TokenUtils::new(&env).metadata().get_metadata().name
    }

    pub fn symbol(env: Env) -> String {
        TokenUtils::new(&env).metadata().get_metadata().symbol
    }

    pub fn decimals(_env: Env) -> u32 {
        DECIMALS
    }

    /// Owned credits plus the pool's virtual reserve.
    pub fn total_supply(env: Env) -> Result<i128, LgtError> {
        storage::load_state(&env)?.total_supply()
    }

    /// Credits held by accounts.
    pub fn owned_supply(env: Env) -> Result<i128, LgtError> {
        Ok(storage::load_state(&env)?.owned_supply)
    }

    /// Token contract the pool trades credits against.
    pub fn value_token(env: Env) -> Result<Address, LgtError> {
        Ok(storage::load_state(&env)?.value_token)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        storage::get_balance(&env, &id)
    }

    pub fn allowance(env: Env, owner: Address, spender: Address) -> i128 {
        storage::get_allowance(&env, &owner, &spender)
    }

    // === Ledger ===

    pub fn mint(env: Env, from: Address, amount: i128) -> Result<(), LgtError> {
        from.require_auth();
        Self::mint_credits(&env, &from, amount)
    }

    pub fn mint_for(env: Env, from: Address, amount: i128, recipient: Address) -> Result<(), LgtError> {
        from.require_auth();
        if guards::is_zero_address(&env, &recipient) {
            return Err(LgtError::ZeroAddress);
        }
        Self::mint_credits(&env, &recipient, amount)
    }

    /// Redeems `amount` of the caller's credits. Returns `false` instead of
    /// failing when the balance is too low.
    pub fn free(env: Env, from: Address, amount: i128) -> bool {
        from.require_auth();
        let Some(mut state) = storage::get_state(&env) else {
            return false;
        };
        let freed = ledger::free(&env, &mut state, &from, amount);
        if freed {
            storage::set_state(&env, &state);
        }
        freed
    }

    /// Redeems `amount` of `owner`'s credits against `spender`'s allowance.
    /// Returns `false` when either the allowance or the balance is too low.
    pub fn free_from(env: Env, spender: Address, amount: i128, owner: Address) -> bool {
        spender.require_auth();
        let Some(mut state) = storage::get_state(&env) else {
            return false;
        };
        let freed = ledger::free_from(&env, &mut state, &spender, &owner, amount);
        if freed {
            storage::set_state(&env, &state);
        }
        freed
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), LgtError> {
        from.require_auth();
        ledger::transfer(&env, &from, &to, amount)
    }

    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), LgtError> {
        spender.require_auth();
        ledger::transfer_from(&env, &spender, &from, &to, amount)
    }

    pub fn approve(env: Env, from: Address, spender: Address, amount: i128) -> Result<(), LgtError> {
        from.require_auth();
        ledger::approve(&env, &from, &spender, amount)
    }

    pub fn increase_allowance(
        env: Env,
        from: Address,
        spender: Address,
        added: i128,
    ) -> Result<(), LgtError> {
        from.require_auth();
        ledger::increase_allowance(&env, &from, &spender, added)
    }

    pub fn decrease_allowance(
        env: Env,
        from: Address,
        spender: Address,
        subtracted: i128,
    ) -> Result<(), LgtError> {
        from.require_auth();
        ledger::decrease_allowance(&env, &from, &spender, subtracted)
    }

    // === Pool views ===

    pub fn pool_balance_of(env: Env, owner: Address) -> i128 {
        storage::get_pool_balance(&env, &owner)
    }

    pub fn pool_total_supply(env: Env) -> Result<i128, LgtError> {
        Ok(storage::load_state(&env)?.pool_total_shares)
    }

    pub fn pool_token_reserves(env: Env) -> Result<i128, LgtError> {
        Ok(storage::load_state(&env)?.token_reserve)
    }

    pub fn pool_eth_reserves(env: Env) -> Result<i128, LgtError> {
        let state = storage::load_state(&env)?;
        Ok(value::held(&env, &state))
    }

    pub fn get_eth_to_token_input_price(env: Env, eth_sold: i128) -> Result<i128, LgtError> {
        pool::eth_to_token_input_price(&env, eth_sold)
    }

    pub fn get_eth_to_token_output_price(env: Env, tokens_bought: i128) -> Result<i128, LgtError> {
        pool::eth_to_token_output_price(&env, tokens_bought)
    }

    pub fn get_token_to_eth_input_price(env: Env, tokens_sold: i128) -> Result<i128, LgtError> {
        pool::token_to_eth_input_price(&env, tokens_sold)
    }

    pub fn get_token_to_eth_output_price(env: Env, eth_bought: i128) -> Result<i128, LgtError> {
        pool::token_to_eth_output_price(&env, eth_bought)
    }

    // === Liquidity ===

    pub fn add_liquidity(
        env: Env,
        from: Address,
        min_liquidity: i128,
        max_tokens: i128,
        deadline: u64,
        value: i128,
    ) -> Result<i128, LgtError> {
        from.require_auth();
        pool::add_liquidity(&env, &from, min_liquidity, max_tokens, deadline, value)
    }

    pub fn remove_liquidity(
        env: Env,
        from: Address,
        amount: i128,
        min_eth: i128,
        min_tokens: i128,
        deadline: u64,
    ) -> Result<(i128, i128), LgtError> {
        from.require_auth();
        pool::remove_liquidity(&env, &from, amount, min_eth, min_tokens, deadline)
    }

    pub fn pool_transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<bool, LgtError> {
        from.require_auth();
        pool::transfer_shares(&env, &from, &to, amount)
    }

    // === Swaps ===

    pub fn eth_to_token_swap_input(
        env: Env,
        from: Address,
        min_tokens: i128,
        deadline: u64,
        value: i128,
    ) -> Result<i128, LgtError> {
        from.require_auth();
        swap::eth_to_token_input(&env, &from, value, min_tokens, deadline, &from)
    }

    pub fn eth_to_token_transfer_input(
        env: Env,
        from: Address,
        min_tokens: i128,
        deadline: u64,
        recipient: Address,
        value: i128,
    ) -> Result<i128, LgtError> {
        from.require_auth();
        swap::eth_to_token_input(&env, &from, value, min_tokens, deadline, &recipient)
    }

    pub fn eth_to_token_swap_output(
        env: Env,
        from: Address,
        tokens_bought: i128,
        deadline: u64,
        max_eth: i128,
    ) -> Result<i128, LgtError> {
        from.require_auth();
        swap::eth_to_token_output(&env, &from, tokens_bought, deadline, &from, max_eth)
    }

    pub fn eth_to_token_transfer_output(
        env: Env,
        from: Address,
        tokens_bought: i128,
        deadline: u64,
        recipient: Address,
        max_eth: i128,
    ) -> Result<i128, LgtError> {
        from.require_auth();
        swap::eth_to_token_output(&env, &from, tokens_bought, deadline, &recipient, max_eth)
    }

    pub fn token_to_eth_swap_input(
        env: Env,
        from: Address,
        tokens_sold: i128,
        min_eth: i128,
        deadline: u64,
    ) -> Result<i128, LgtError> {
        from.require_auth();
        swap::token_to_eth_input(&env, &from, tokens_sold, min_eth, deadline, &from)
    }

    pub fn token_to_eth_transfer_input(
        env: Env,
        from: Address,
        tokens_sold: i128,
        min_eth: i128,
        deadline: u64,
        recipient: Address,
    ) -> Result<i128, LgtError> {
        from.require_auth();
        swap::token_to_eth_input(&env, &from, tokens_sold, min_eth, deadline, &recipient)
    }

    pub fn token_to_eth_swap_output(
        env: Env,
        from: Address,
        eth_bought: i128,
        max_tokens: i128,
        deadline: u64,
    ) -> Result<i128, LgtError> {
        from.require_auth();
        swap::token_to_eth_output(&env, &from, eth_bought, max_tokens, deadline, &from)
    }

    pub fn token_to_eth_transfer_output(
        env: Env,
        from: Address,
        eth_bought: i128,
        max_tokens: i128,
        deadline: u64,
        recipient: Address,
    ) -> Result<i128, LgtError> {
        from.require_auth();
        swap::token_to_eth_output(&env, &from, eth_bought, max_tokens, deadline, &recipient)
    }

    /// Plain value deposit: swaps all of `value` for credits at the current
    /// price, expiring with the current ledger.
    pub fn receive(env: Env, from: Address, value: i128) -> Result<i128, LgtError> {
        from.require_auth();
        let now = env.ledger().timestamp();
        swap::eth_to_token_input(&env, &from, value, 1, now, &from)
    }

    // === Composite operations ===

    pub fn buy_and_free(
        env: Env,
        from: Address,
        amount: i128,
        deadline: u64,
        recipient: Address,
        value: i128,
    ) -> i128 {
        from.require_auth();
        composite::buy_and_free(&env, &from, amount, deadline, &recipient, value)
    }

    pub fn buy_up_to_and_free(
        env: Env,
        from: Address,
        max_amount: i128,
        deadline: u64,
        value: i128,
    ) -> i128 {
        from.require_auth();
        composite::buy_up_to_and_free(&env, &from, max_amount, deadline, value)
    }

    pub fn mint_to_sell(
        env: Env,
        from: Address,
        amount: i128,
        min_eth: i128,
        deadline: u64,
    ) -> Result<i128, LgtError> {
        from.require_auth();
        composite::mint_to_sell(&env, amount, min_eth, deadline, &from)
    }

    pub fn mint_to_sell_to(
        env: Env,
        from: Address,
        amount: i128,
        min_eth: i128,
        deadline: u64,
        recipient: Address,
    ) -> Result<i128, LgtError> {
        from.require_auth();
        composite::mint_to_sell(&env, amount, min_eth, deadline, &recipient)
    }

    pub fn mint_to_liquidity(
        env: Env,
        from: Address,
        max_tokens: i128,
        min_liquidity: i128,
        deadline: u64,
        recipient: Address,
        value: i128,
    ) -> Result<(i128, i128, i128), LgtError> {
        from.require_auth();
        composite::mint_to_liquidity(&env, &from, max_tokens, min_liquidity, deadline, &recipient, value)
    }

    // === Deployment ===

    pub fn deploy(
        env: Env,
        from: Address,
        credit_cost: i128,
        deadline: u64,
        wasm_hash: BytesN<32>,
        value: i128,
    ) -> Result<Address, LgtError> {
        from.require_auth();
        deploy::deploy(&env, &from, credit_cost, deadline, wasm_hash, value)
    }

    pub fn create2(
        env: Env,
        from: Address,
        credit_cost: i128,
        deadline: u64,
        salt: BytesN<32>,
        wasm_hash: BytesN<32>,
        value: i128,
    ) -> Result<Address, LgtError> {
        from.require_auth();
        deploy::create2(&env, &from, credit_cost, deadline, salt, wasm_hash, value)
    }

    pub fn get_create2_address(env: Env, salt: BytesN<32>) -> Address {
        deploy::create2_address(&env, salt)
    }
}

impl LiquidGasToken {
    fn mint_credits(env: &Env, to: &Address, amount: i128) -> Result<(), LgtError> {
        let mut state = storage::load_state(env)?;
        ledger::mint(env, &mut state, to, amount)?;
        storage::set_state(env, &state);
        Ok(())
    }
}
