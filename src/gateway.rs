//! Typed gateway over the pool and token contracts

use async_trait::async_trait;

use crate::core::error::{ClientError, ClientResult};
use crate::core::types::{Address, TxHandle};

/// Typed proxy over the pool contract and its two ERC20-style tokens
///
/// Mutating calls return a handle that the caller must drive to settlement
/// with [`PoolGateway::wait_for_settlement`] before treating the operation
/// as complete; the gateway never fires and forgets and never retries on
/// its own. Reverts, provider failures, and user-rejected signatures all
/// surface as errors; the core does not distinguish them.
///
/// Mutating calls take the acting account explicitly, the way a service
/// takes its signer.
#[async_trait]
pub trait PoolGateway: Send + Sync {
    /// Current reserves of token A and token B, in base units
    async fn get_reserves(&self) -> ClientResult<(u128, u128)>;

    /// Total shares issued by the pool
    async fn total_shares(&self) -> ClientResult<u128>;

    /// Shares held by one account
    async fn shares_of(&self, account: &Address) -> ClientResult<u128>;

    /// Authorize `spender` to move `amount` of `token` on behalf of `from`
    async fn approve(
        &self,
        from: &Address,
        token: &Address,
        spender: &Address,
        amount: u128,
    ) -> ClientResult<TxHandle>;

    /// Swap `amount` of the source token implied by `a_to_b`
    async fn swap(&self, from: &Address, amount: u128, a_to_b: bool) -> ClientResult<TxHandle>;

    /// Deposit both tokens and mint shares
    async fn add_liquidity(
        &self,
        from: &Address,
        amount_a: u128,
        amount_b: u128,
    ) -> ClientResult<TxHandle>;

    /// Burn `amount` shares and withdraw both tokens
    async fn remove_liquidity(&self, from: &Address, amount: u128) -> ClientResult<TxHandle>;

    /// Block until the handle reaches a terminal outcome
    async fn wait_for_settlement(&self, tx: &TxHandle) -> ClientResult<()>;
}

/// A single 32-byte ABI argument word
#[derive(Clone, Copy, Debug)]
pub enum AbiWord {
    Uint(u128),
    Addr(Address),
    Bool(bool),
}

impl AbiWord {
    fn write(&self, out: &mut Vec<u8>) {
        let mut word = [0u8; 32];
        match self {
            AbiWord::Uint(value) => word[16..].copy_from_slice(&value.to_be_bytes()),
            AbiWord::Addr(address) => word[12..].copy_from_slice(address.as_bytes()),
            AbiWord::Bool(flag) => word[31] = *flag as u8,
        }
        out.extend_from_slice(&word);
    }
}

/// Build calldata: 4-byte selector plus fixed-width argument words
pub fn encode_call(selector: [u8; 4], args: &[AbiWord]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + args.len() * 32);
    data.extend_from_slice(&selector);
    for arg in args {
        arg.write(&mut data);
    }
    data
}

/// Split a return payload into 32-byte words, as unsigned values
///
/// Values above the u128 range are rejected rather than truncated.
pub fn decode_words(data: &[u8]) -> ClientResult<Vec<u128>> {
    if data.len() % 32 != 0 {
        return Err(ClientError::Rpc(format!(
            "return data not word aligned: {} bytes",
            data.len()
        )));
    }
    data.chunks_exact(32)
        .map(|word| {
            if word[..16].iter().any(|b| *b != 0) {
                return Err(ClientError::Rpc(
                    "return value exceeds supported range".to_string(),
                ));
            }
            let mut low = [0u8; 16];
            low.copy_from_slice(&word[16..]);
            Ok(u128::from_be_bytes(low))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::APPROVE_SELECTOR;

    #[test]
    fn encodes_selector_and_argument_words() {
        let spender = Address([0xAB; 20]);
        let data = encode_call(APPROVE_SELECTOR, &[AbiWord::Addr(spender), AbiWord::Uint(5)]);

        assert_eq!(data.len(), 4 + 2 * 32);
        assert_eq!(&data[..4], &APPROVE_SELECTOR);
        // address is right-aligned in its word
        assert!(data[4..16].iter().all(|b| *b == 0));
        assert_eq!(&data[16..36], spender.as_bytes());
        // uint is big-endian in the low bytes
        assert_eq!(data[4 + 32 + 31], 5);
        assert!(data[4 + 32..4 + 32 + 31].iter().all(|b| *b == 0));
    }

    #[test]
    fn encodes_bool_as_final_byte() {
        let data = encode_call([0; 4], &[AbiWord::Bool(true), AbiWord::Bool(false)]);
        assert_eq!(data[4 + 31], 1);
        assert_eq!(data[4 + 63], 0);
    }

    #[test]
    fn decodes_return_words() {
        let mut payload = vec![0u8; 64];
        payload[31] = 100;
        payload[63] = 200;
        assert_eq!(decode_words(&payload).unwrap(), vec![100, 200]);
    }

    #[test]
    fn decode_rejects_misaligned_and_oversized_payloads() {
        assert!(decode_words(&[0u8; 31]).is_err());

        let mut payload = vec![0u8; 32];
        payload[0] = 1; // exceeds u128
        assert!(decode_words(&payload).is_err());
    }
}
