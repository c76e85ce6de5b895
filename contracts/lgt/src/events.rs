use soroban_sdk::{symbol_short, Address, Env};
use soroban_token_sdk::TokenUtils;

pub struct LgtEvents;

impl LgtEvents {
    /// Emits an `add_liq` event after liquidity is deposited.
    ///
    /// Topics: `("add_liq", provider)`
    /// Data:   `(eth_amount, token_amount)`
    pub fn add_liquidity(env: &Env, provider: &Address, eth_amount: i128, token_amount: i128) {
        env.events()
            .publish((symbol_short!("add_liq"), provider), (eth_amount, token_amount));
    }

    /// Topics: `("rm_liq", provider)`
    /// Data:   `(eth_amount, token_amount)`
    pub fn remove_liquidity(env: &Env, provider: &Address, eth_amount: i128, token_amount: i128) {
        env.events()
            .publish((symbol_short!("rm_liq"), provider), (eth_amount, token_amount));
    }

    pub fn transfer_liquidity(env: &Env, from: &Address, to: &Address, value: i128) {
        env.events()
            .publish((symbol_short!("xfer_liq"), from, to), value);
    }

    /// Emits a `free` event when credits are redeemed.
    ///
    /// Topics: `("free", owner)`
    /// Data:   `(amount, reclaimed_units)`
    ///
    /// `reclaimed_units` is the nominal resource budget released by the
    /// redemption; hosts do not refund it, so it is informational only.
    pub fn free(env: &Env, owner: &Address, amount: i128, reclaimed_units: i128) {
        env.events()
            .publish((symbol_short!("free"), owner), (amount, reclaimed_units));
    }

    // SEP-41 shaped token events.

    pub fn transfer(env: &Env, from: &Address, to: &Address, amount: i128) {
        TokenUtils::new(env)
            .events()
            .transfer(from.clone(), to.clone(), amount);
    }

    /// Allowances never expire, so the event carries `u32::MAX`.
    pub fn approve(env: &Env, owner: &Address, spender: &Address, amount: i128) {
        TokenUtils::new(env)
            .events()
            .approve(owner.clone(), spender.clone(), amount, u32::MAX);
    }

    pub fn mint(env: &Env, to: &Address, amount: i128) {
        TokenUtils::new(env)
            .events()
            .mint(env.current_contract_address(), to.clone(), amount);
    }

    pub fn burn(env: &Env, from: &Address, amount: i128) {
        TokenUtils::new(env).events().burn(from.clone(), amount);
    }
}
