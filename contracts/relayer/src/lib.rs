#![no_std]

//! Call forwarder that pays for the forwarded call with Liquid Gas Token
//! credits bought and freed in the same transaction.

mod errors;
mod helpers;
mod storage;

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod test;

pub use errors::RelayerError;
use helpers::LgtClient;
use soroban_sdk::{
    contract, contractimpl, symbol_short, token::TokenClient, Address, Env, Symbol, Val, Vec,
};
use storage::{extend_instance_ttl, get_lgt, has_lgt, set_lgt};

#[contract]
pub struct LgtRelayer;

#[contractimpl]
impl LgtRelayer {
    pub fn initialize(env: Env, lgt: Address) -> Result<(), RelayerError> {
        if has_lgt(&env) {
            return Err(RelayerError::AlreadyInitialized);
        }
        set_lgt(&env, &lgt);
        Ok(())
    }

    /// Buys and frees exactly `credits`, sends `call_value` to `target`, then
    /// invokes `target.func(args)`.
    ///
    /// `value` is the caller's whole budget: `call_value` goes to the target
    /// and the rest pays for credits. Unspent value stays with `caller`.
    /// Returns the value spent on credits.
    ///
    /// # Errors
    /// | Error                  | Condition                                      |
    /// |------------------------|------------------------------------------------|
    /// | `NegativeAmount`       | `credits`, `value` or `call_value` is negative |
    /// | `InsufficientValue`    | `call_value` exceeds `value`                   |
    /// | `Expired`              | ledger timestamp is past `deadline`            |
    /// | `NotInitialized`       | no token contract configured                   |
    /// | `CreditPurchaseFailed` | the pool could not sell `credits` for the rest |
    pub fn forward(
        env: Env,
        caller: Address,
        credits: i128,
        deadline: u64,
        target: Address,
        func: Symbol,
        args: Vec<Val>,
        value: i128,
        call_value: i128,
    ) -> Result<i128, RelayerError> {
        caller.require_auth();
        if credits < 0 {
            return Err(RelayerError::NegativeAmount);
        }
        let budget = Self::credit_budget(&env, value, call_value, deadline)?;
        let lgt = LgtClient::new(&env, &get_lgt(&env).ok_or(RelayerError::NotInitialized)?);

        let spent = if credits > 0 {
            let spent = lgt.buy_and_free(&caller, &credits, &deadline, &caller, &budget);
            if spent == 0 {
                return Err(RelayerError::CreditPurchaseFailed);
            }
            spent
        } else {
            0
        };

        Self::relay(&env, &lgt, &caller, &target, func, args, call_value, credits);
        Ok(spent)
    }

    /// Spends all of `value` except `call_value` on credits, frees them,
    /// sends `call_value` to `target`, then invokes `target.func(args)`. A
    /// purchase that buys nothing still forwards.
    ///
    /// Returns the number of credits freed.
    pub fn forward_max(
        env: Env,
        caller: Address,
        deadline: u64,
        target: Address,
        func: Symbol,
        args: Vec<Val>,
        value: i128,
        call_value: i128,
    ) -> Result<i128, RelayerError> {
        caller.require_auth();
        let budget = Self::credit_budget(&env, value, call_value, deadline)?;
        let lgt = LgtClient::new(&env, &get_lgt(&env).ok_or(RelayerError::NotInitialized)?);

        let freed = lgt.buy_up_to_and_free(&caller, &i128::MAX, &deadline, &budget);

        Self::relay(&env, &lgt, &caller, &target, func, args, call_value, freed);
        Ok(freed)
    }

    pub fn lgt(env: Env) -> Result<Address, RelayerError> {
        get_lgt(&env).ok_or(RelayerError::NotInitialized)
    }
}

impl LgtRelayer {
    /// Part of `value` left for credits once `call_value` is set aside.
    fn credit_budget(
        env: &Env,
        value: i128,
        call_value: i128,
        deadline: u64,
    ) -> Result<i128, RelayerError> {
        if value < 0 || call_value < 0 {
            return Err(RelayerError::NegativeAmount);
        }
        if call_value > value {
            return Err(RelayerError::InsufficientValue);
        }
        if env.ledger().timestamp() > deadline {
            return Err(RelayerError::Expired);
        }
        Ok(value - call_value)
    }

    #[allow(clippy::too_many_arguments)]
    fn relay(
        env: &Env,
        lgt: &LgtClient,
        caller: &Address,
        target: &Address,
        func: Symbol,
        args: Vec<Val>,
        call_value: i128,
        freed: i128,
    ) {
        extend_instance_ttl(env);
        if call_value > 0 {
            TokenClient::new(env, &lgt.value_token()).transfer(caller, target, &call_value);
        }
        env.invoke_contract::<Val>(target, &func, args);
        env.events()
            .publish((symbol_short!("forward"), caller, target), (func, freed));
    }
}
