use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RelayerError {
    AlreadyInitialized = 300,
    NotInitialized = 301,
    Expired = 302,
    NegativeAmount = 303,
    CreditPurchaseFailed = 304,
    InsufficientValue = 305,
}
