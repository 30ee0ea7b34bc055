//! Protocol constants

/// Decimals used by both pool tokens and the share ledger
pub const TOKEN_DECIMALS: u32 = 18;

/// Scale between human units and integer base units (10^18)
pub const BASE_UNIT_SCALE: u128 = 1_000_000_000_000_000_000;

// Function selectors (first 4 bytes of the keccak-256 signature hash)
/// `getReserves()`
pub const GET_RESERVES_SELECTOR: [u8; 4] = [0x09, 0x02, 0xf1, 0xac];
/// `totalShares()`
pub const TOTAL_SHARES_SELECTOR: [u8; 4] = [0x3a, 0x98, 0xef, 0x39];
/// `shares(address)`
pub const SHARES_SELECTOR: [u8; 4] = [0xce, 0x7c, 0x2a, 0xc2];
/// `swap(uint256,bool)`
pub const SWAP_SELECTOR: [u8; 4] = [0x2a, 0xea, 0x66, 0x05];
/// `addLiquidity(uint256,uint256)`
pub const ADD_LIQUIDITY_SELECTOR: [u8; 4] = [0x9c, 0xd4, 0x41, 0xda];
/// `removeLiquidity(uint256)`
pub const REMOVE_LIQUIDITY_SELECTOR: [u8; 4] = [0x9c, 0x8f, 0x9f, 0x23];
/// `approve(address,uint256)`
pub const APPROVE_SELECTOR: [u8; 4] = [0x09, 0x5e, 0xa7, 0xb3];

/// Outer bound on a settlement wait before the action is reported failed
pub const DEFAULT_SETTLE_TIMEOUT_SECS: u64 = 60;

/// Receipt polling interval while waiting for settlement
pub const DEFAULT_RECEIPT_POLL_MS: u64 = 500;
