#![cfg(test)]

// ---------------------------------------------------------------------------
// Liquid Gas Token test suite
//
// Structure
// ─────────
// math        — pure pricing arithmetic (no Env needed)
// events      — LgtEvents helpers in isolation
// ledger      — balances, allowances, mint and free
// liquidity   — add/remove liquidity and the share ledger
// swap        — the eight swap entry points and `receive`
// composite   — buy-and-free, mint-to-sell, mint-to-liquidity
// deploy      — credit-funded contract creation
// invariants  — supply and constant-product properties over mixed sequences
// ---------------------------------------------------------------------------


use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{StellarAssetClient, TokenClient},
    Address, Env, String,
};

use crate::{guards::ZERO_ADDRESS, LiquidGasToken, LiquidGasTokenClient};

/// 1 ether worth of value-token base units.
pub const ETHER: i128 = 1_000_000_000_000_000_000;

/// Value minted to every test account.
pub const FUNDING: i128 = 5 * ETHER;

/// Credits the first test account mints during setup.
pub const INITIAL_CREDITS: i128 = 30;

pub struct Setup<'a> {
    pub env: Env,
    pub lgt: LiquidGasTokenClient<'a>,
    pub value: TokenClient<'a>,
    pub alice: Address,
    pub bob: Address,
    pub carol: Address,
}

impl<'a> Setup<'a> {
    /// Registers the value token and the LGT contract, funds three accounts
    /// and mints `INITIAL_CREDITS` to alice.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(1_000);

        let admin = Address::generate(&env);
        let value_id = env.register_stellar_asset_contract_v2(admin).address();
        let value_admin = StellarAssetClient::new(&env, &value_id);

        let lgt_id = env.register_contract(None, LiquidGasToken);
        let lgt = LiquidGasTokenClient::new(&env, &lgt_id);
        lgt.initialize(&value_id);

        let alice = Address::generate(&env);
        let bob = Address::generate(&env);
        let carol = Address::generate(&env);
        for account in [&alice, &bob, &carol] {
            value_admin.mint(account, &FUNDING);
        }
        lgt.mint(&alice, &INITIAL_CREDITS);

        let value = TokenClient::new(&env, &value_id);
        Setup {
            env,
            lgt,
            value,
            alice,
            bob,
            carol,
        }
    }

    /// A deadline comfortably in the future.
    pub fn deadline(&self) -> u64 {
        self.env.ledger().timestamp() + 100
    }

    /// Moves the ledger clock past `deadline`.
    pub fn expire(&self, deadline: u64) {
        self.env.ledger().set_timestamp(deadline + 1);
    }

    pub fn zero_address(&self) -> Address {
        Address::from_string(&String::from_str(&self.env, ZERO_ADDRESS))
    }

    /// Alice seeds the pool with `tokens` credits and `eth` value.
    pub fn seed_pool(&self, tokens: i128, eth: i128) -> i128 {
        self.lgt
            .add_liquidity(&self.alice, &0, &tokens, &self.deadline(), &eth)
    }

    /// `(eth_reserve, token_reserve)` as the contract sees them.
    pub fn reserves(&self) -> (i128, i128) {
        (self.lgt.pool_eth_reserves(), self.lgt.pool_token_reserves())
    }

    pub fn assert_supply(&self, owned: i128, total: i128) {
        assert_eq!(self.lgt.owned_supply(), owned, "owned supply");
        assert_eq!(self.lgt.total_supply(), total, "total supply");
    }
}
