pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:6789";

pub const DEFAULT_DATA_DIR: &str = "data";

pub const DEFAULT_ARTIFACTS_DIR: &str = "contracts/build";

/// Gas limit and price used by the platform's generated contract wrappers.
pub const DEFAULT_GAS_LIMIT: u64 = 4_712_388;
pub const DEFAULT_GAS_PRICE: u64 = 1_000_000_000;
