use soroban_sdk::{Address, Env, String};

use crate::errors::LgtError;

/// Strkey of the all-zero contract id, the burn address of this ledger.
pub const ZERO_ADDRESS: &str = "CAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABSC4";

pub fn zero_address(env: &Env) -> Address {
    Address::from_string(&String::from_str(env, ZERO_ADDRESS))
}

pub fn is_zero_address(env: &Env, address: &Address) -> bool {
    *address == zero_address(env)
}

pub fn deadline_passed(env: &Env, deadline: u64) -> bool {
    env.ledger().timestamp() > deadline
}

pub fn check_deadline(env: &Env, deadline: u64) -> Result<(), LgtError> {
    if deadline_passed(env, deadline) {
        return Err(LgtError::DeadlinePassed);
    }
    Ok(())
}

/// Rejects the zero address and the contract itself as a destination.
pub fn check_recipient(env: &Env, to: &Address) -> Result<(), LgtError> {
    if is_zero_address(env, to) {
        return Err(LgtError::ZeroAddress);
    }
    if *to == env.current_contract_address() {
        return Err(LgtError::SelfTransfer);
    }
    Ok(())
}

pub fn check_non_negative(amount: i128) -> Result<(), LgtError> {
    if amount < 0 {
        return Err(LgtError::NegativeAmount);
    }
    Ok(())
}

pub fn check_positive(amount: i128) -> Result<(), LgtError> {
    check_non_negative(amount)?;
    if amount == 0 {
        return Err(LgtError::ZeroAmount);
    }
    Ok(())
}
