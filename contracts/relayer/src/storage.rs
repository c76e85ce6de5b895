use soroban_sdk::{contracttype, Address, Env};

const INSTANCE_LIFETIME_THRESHOLD: u32 = 17280;
const INSTANCE_BUMP_AMOUNT: u32 = 518400;

#[contracttype]
pub enum DataKey {
    Lgt,
}

pub fn has_lgt(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Lgt)
}

pub fn set_lgt(env: &Env, lgt: &Address) {
    env.storage().instance().set(&DataKey::Lgt, lgt);
    extend_instance_ttl(env);
}

pub fn get_lgt(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Lgt)
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
