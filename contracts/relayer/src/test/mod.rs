#![cfg(test)]

use liquid_gas_token::{LiquidGasToken, LiquidGasTokenClient};
use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Ledger as _},
    token::{StellarAssetClient, TokenClient},
    vec, Address, Env, IntoVal, Val, Vec,
};

use crate::{LgtRelayer, LgtRelayerClient, RelayerError};

const ETHER: i128 = 1_000_000_000_000_000_000;
const FUNDING: i128 = 5 * ETHER;

// ---------------------------------------------------------------------------
// Forwarding target that counts how often, and by how much, it was bumped.
// ---------------------------------------------------------------------------
mod counter_mod {
    use soroban_sdk::{contract, contractimpl, symbol_short, Env};

    #[contract]
    pub struct Counter;

    #[contractimpl]
    impl Counter {
        pub fn bump(env: Env, by: u32) -> u32 {
            let count: u32 = env
                .storage()
                .instance()
                .get(&symbol_short!("count"))
                .unwrap_or(0)
                + by;
            env.storage().instance().set(&symbol_short!("count"), &count);
            count
        }

        pub fn count(env: Env) -> u32 {
            env.storage()
                .instance()
                .get(&symbol_short!("count"))
                .unwrap_or(0)
        }
    }
}
use counter_mod::{Counter, CounterClient};

struct Setup<'a> {
    env: Env,
    lgt: LiquidGasTokenClient<'a>,
    value: TokenClient<'a>,
    relayer: LgtRelayerClient<'a>,
    counter: CounterClient<'a>,
    user: Address,
}

/// LGT pool of 0.019 ether against 20 credits, relayer wired to it.
fn setup<'a>() -> Setup<'a> {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);

    let admin = Address::generate(&env);
    let value_id = env.register_stellar_asset_contract_v2(admin).address();
    let value_admin = StellarAssetClient::new(&env, &value_id);

    let lgt = LiquidGasTokenClient::new(&env, &env.register_contract(None, LiquidGasToken));
    lgt.initialize(&value_id);

    let provider = Address::generate(&env);
    let user = Address::generate(&env);
    value_admin.mint(&provider, &FUNDING);
    value_admin.mint(&user, &FUNDING);
    lgt.mint(&provider, &30);
    lgt.add_liquidity(&provider, &1, &20, &2_000, &(19 * ETHER / 1_000));

    let relayer = LgtRelayerClient::new(&env, &env.register_contract(None, LgtRelayer));
    relayer.initialize(&lgt.address);
    let counter = CounterClient::new(&env, &env.register_contract(None, Counter));

    let value = TokenClient::new(&env, &value_id);
    Setup {
        env,
        lgt,
        value,
        relayer,
        counter,
        user,
    }
}

#[test]
fn initialize_twice_fails() {
    let s = setup();
    assert_eq!(
        s.relayer.try_initialize(&s.lgt.address),
        Err(Ok(RelayerError::AlreadyInitialized))
    );
    assert_eq!(s.relayer.lgt(), s.lgt.address);
}

#[test]
fn forward_buys_credits_then_calls_target() {
    let s = setup();
    let price = s.lgt.get_eth_to_token_output_price(&5);
    let args: Vec<Val> = vec![&s.env, 3_u32.into_val(&s.env)];

    let spent = s.relayer.forward(
        &s.user,
        &5,
        &2_000,
        &s.counter.address,
        &symbol_short!("bump"),
        &args,
        &(ETHER / 100),
        &0,
    );

    assert_eq!(spent, price);
    assert_eq!(s.counter.count(), 3);
    assert_eq!(s.value.balance(&s.user), FUNDING - price);
    assert_eq!(s.lgt.total_supply(), 25);
}

#[test]
fn forward_without_credits_only_calls_target() {
    let s = setup();
    let args: Vec<Val> = vec![&s.env, 1_u32.into_val(&s.env)];

    let spent = s.relayer.forward(
        &s.user,
        &0,
        &2_000,
        &s.counter.address,
        &symbol_short!("bump"),
        &args,
        &0,
        &0,
    );

    assert_eq!(spent, 0);
    assert_eq!(s.counter.count(), 1);
    assert_eq!(s.value.balance(&s.user), FUNDING);
    assert_eq!(s.lgt.total_supply(), 30);
}

#[test]
fn failed_purchase_reverts_the_forward() {
    let s = setup();
    let args: Vec<Val> = vec![&s.env, 1_u32.into_val(&s.env)];

    // the reserve only holds 20 credits
    assert_eq!(
        s.relayer.try_forward(
            &s.user,
            &20,
            &2_000,
            &s.counter.address,
            &symbol_short!("bump"),
            &args,
            &ETHER,
            &0,
        ),
        Err(Ok(RelayerError::CreditPurchaseFailed))
    );
    assert_eq!(s.counter.count(), 0);
    assert_eq!(s.value.balance(&s.user), FUNDING);
}

#[test]
fn forward_after_deadline_fails() {
    let s = setup();
    s.env.ledger().set_timestamp(2_001);
    let args: Vec<Val> = vec![&s.env, 1_u32.into_val(&s.env)];

    assert_eq!(
        s.relayer.try_forward(
            &s.user,
            &5,
            &2_000,
            &s.counter.address,
            &symbol_short!("bump"),
            &args,
            &ETHER,
            &0,
        ),
        Err(Ok(RelayerError::Expired))
    );
    assert_eq!(
        s.relayer.try_forward_max(
            &s.user,
            &2_000,
            &s.counter.address,
            &symbol_short!("bump"),
            &args,
            &ETHER,
            &0,
        ),
        Err(Ok(RelayerError::Expired))
    );
}

#[test]
fn forward_rejects_negative_amounts() {
    let s = setup();
    let args: Vec<Val> = vec![&s.env, 1_u32.into_val(&s.env)];

    assert_eq!(
        s.relayer.try_forward(
            &s.user,
            &-1,
            &2_000,
            &s.counter.address,
            &symbol_short!("bump"),
            &args,
            &ETHER,
            &0,
        ),
        Err(Ok(RelayerError::NegativeAmount))
    );
}

#[test]
fn forward_max_spends_all_value() {
    let s = setup();
    let affordable = s.lgt.get_eth_to_token_input_price(&(ETHER / 100));
    let args: Vec<Val> = vec![&s.env, 2_u32.into_val(&s.env)];

    let freed = s.relayer.forward_max(
        &s.user,
        &2_000,
        &s.counter.address,
        &symbol_short!("bump"),
        &args,
        &(ETHER / 100),
        &0,
    );

    assert_eq!(freed, affordable);
    assert_eq!(freed, 6);
    assert_eq!(s.counter.count(), 2);
    assert_eq!(s.value.balance(&s.user), FUNDING - ETHER / 100);
    assert_eq!(s.lgt.total_supply(), 24);
}

#[test]
fn forward_sends_call_value_and_keeps_the_rest() {
    let s = setup();
    let price = s.lgt.get_eth_to_token_output_price(&5);
    let call_value = ETHER / 10;
    let args: Vec<Val> = vec![&s.env, 3_u32.into_val(&s.env)];

    let spent = s.relayer.forward(
        &s.user,
        &5,
        &2_000,
        &s.counter.address,
        &symbol_short!("bump"),
        &args,
        &(price * 2 + call_value),
        &call_value,
    );

    assert_eq!(spent, price);
    assert_eq!(s.counter.count(), 3);
    assert_eq!(s.value.balance(&s.counter.address), call_value);
    assert_eq!(s.value.balance(&s.user), FUNDING - price - call_value);
    assert_eq!(s.lgt.total_supply(), 25);
}

#[test]
fn forward_with_exact_value_spends_everything() {
    let s = setup();
    let price = s.lgt.get_eth_to_token_output_price(&5);
    let call_value = ETHER / 10;
    let args: Vec<Val> = vec![&s.env, 1_u32.into_val(&s.env)];

    s.relayer.forward(
        &s.user,
        &5,
        &2_000,
        &s.counter.address,
        &symbol_short!("bump"),
        &args,
        &(price + call_value),
        &call_value,
    );

    assert_eq!(s.value.balance(&s.counter.address), call_value);
    assert_eq!(s.value.balance(&s.user), FUNDING - price - call_value);
    assert_eq!(s.lgt.total_supply(), 25);
}

#[test]
fn forward_max_spends_value_left_after_call_value() {
    let s = setup();
    let call_value = ETHER / 10;
    let affordable = s.lgt.get_eth_to_token_input_price(&(ETHER / 100));
    let args: Vec<Val> = vec![&s.env, 2_u32.into_val(&s.env)];

    let freed = s.relayer.forward_max(
        &s.user,
        &2_000,
        &s.counter.address,
        &symbol_short!("bump"),
        &args,
        &(ETHER / 100 + call_value),
        &call_value,
    );

    assert_eq!(freed, affordable);
    assert_eq!(freed, 6);
    assert_eq!(s.counter.count(), 2);
    assert_eq!(s.value.balance(&s.counter.address), call_value);
    assert_eq!(s.value.balance(&s.user), FUNDING - ETHER / 100 - call_value);
    assert_eq!(s.lgt.total_supply(), 24);
}

#[test]
fn call_value_above_value_fails() {
    let s = setup();
    let args: Vec<Val> = vec![&s.env, 1_u32.into_val(&s.env)];

    assert_eq!(
        s.relayer.try_forward(
            &s.user,
            &0,
            &2_000,
            &s.counter.address,
            &symbol_short!("bump"),
            &args,
            &ETHER,
            &(ETHER + 1),
        ),
        Err(Ok(RelayerError::InsufficientValue))
    );
    assert_eq!(
        s.relayer.try_forward_max(
            &s.user,
            &2_000,
            &s.counter.address,
            &symbol_short!("bump"),
            &args,
            &0,
            &1,
        ),
        Err(Ok(RelayerError::InsufficientValue))
    );
    assert_eq!(
        s.relayer.try_forward(
            &s.user,
            &0,
            &2_000,
            &s.counter.address,
            &symbol_short!("bump"),
            &args,
            &ETHER,
            &-1,
        ),
        Err(Ok(RelayerError::NegativeAmount))
    );
    assert_eq!(s.counter.count(), 0);
    assert_eq!(s.value.balance(&s.user), FUNDING);
}

#[test]
fn uninitialized_relayer_fails() {
    let env = Env::default();
    env.mock_all_auths();
    let relayer = LgtRelayerClient::new(&env, &env.register_contract(None, LgtRelayer));
    let user = Address::generate(&env);
    let target = Address::generate(&env);

    assert_eq!(
        relayer.try_forward_max(
            &user,
            &u64::MAX,
            &target,
            &symbol_short!("bump"),
            &vec![&env],
            &0,
            &0,
        ),
        Err(Ok(RelayerError::NotInitialized))
    );
}
