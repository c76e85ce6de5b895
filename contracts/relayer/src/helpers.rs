use soroban_sdk::{contractclient, Address, Env};

/// The slice of the Liquid Gas Token interface the relayer pays through.
#[contractclient(name = "LgtClient")]
pub trait LgtInterface {
    fn buy_and_free(
        env: Env,
        from: Address,
        amount: i128,
        deadline: u64,
        recipient: Address,
        value: i128,
    ) -> i128;

    fn buy_up_to_and_free(
        env: Env,
        from: Address,
        max_amount: i128,
        deadline: u64,
        value: i128,
    ) -> i128;

    fn value_token(env: Env) -> Address;
}
