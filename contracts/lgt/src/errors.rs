use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LgtError {
    AlreadyInitialized = 100,
    NotInitialized = 101,
    InsufficientBalance = 102,
    InsufficientAllowance = 103,
    DeadlinePassed = 104,
    ZeroAddress = 105,
    SelfTransfer = 106,
    SlippageExceeded = 107,
    ArithmeticOverflow = 108,
    ZeroAmount = 109,
    NoValue = 110,
    InsufficientValue = 111,
    InsufficientLiquidity = 112,
    DustValue = 113,
    NegativeAmount = 114,
    InvalidK = 115,
}
