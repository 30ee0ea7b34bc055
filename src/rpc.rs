//! JSON-RPC backed wallet provider and pool gateway
//!
//! A minimal JSON-RPC client that implements only the methods the pool
//! client actually needs, avoiding the dependency chain of a full provider
//! stack.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use tokio::time::{sleep, timeout};
use tracing::debug;

use async_trait::async_trait;

use crate::config::PoolConfig;
use crate::core::constants::{
    ADD_LIQUIDITY_SELECTOR, APPROVE_SELECTOR, GET_RESERVES_SELECTOR, REMOVE_LIQUIDITY_SELECTOR,
    SHARES_SELECTOR, SWAP_SELECTOR, TOTAL_SHARES_SELECTOR,
};
use crate::core::error::{ClientError, ClientResult};
use crate::core::types::{Address, TxHandle, TxHash};
use crate::gateway::{decode_words, encode_call, AbiWord, PoolGateway};
use crate::wallet::WalletProvider;

/// Minimal JSON-RPC client for an Ethereum-style node
pub struct EthRpcClient {
    url: String,
    agent: ureq::Agent,
}

/// RPC response wrapper
#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorBody>,
}

/// RPC error structure
#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Receipt fields the client cares about
#[derive(Debug, Deserialize)]
struct Receipt {
    status: String,
}

impl EthRpcClient {
    pub fn new(url: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .timeout_read(Duration::from_secs(30))
            .build();

        Self { url, agent }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Make a JSON-RPC call, returning the raw result value
    async fn call_raw(&self, method: &str, params: Value) -> ClientResult<Value> {
        let request_body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params
        });

        debug!("RPC call: {method}");

        // ureq is sync; run the request on the blocking pool
        let response_body = tokio::task::spawn_blocking({
            let agent = self.agent.clone();
            let url = self.url.clone();
            let body = request_body.to_string();

            move || -> Result<String, String> {
                let response = agent
                    .post(&url)
                    .set("Content-Type", "application/json")
                    .send_string(&body)
                    .map_err(|e| e.to_string())?;
                response.into_string().map_err(|e| e.to_string())
            }
        })
        .await
        .map_err(|e| ClientError::Rpc(format!("request task failed: {e}")))?
        .map_err(ClientError::Rpc)?;

        let response: RpcResponse = serde_json::from_str(&response_body)
            .map_err(|e| ClientError::Rpc(format!("malformed response: {e}")))?;

        if let Some(error) = response.error {
            return Err(ClientError::Rpc(format!(
                "{} (code {})",
                error.message, error.code
            )));
        }

        Ok(response.result.unwrap_or(Value::Null))
    }

    /// Make a JSON-RPC call and deserialize a non-null result
    async fn call<T>(&self, method: &str, params: Value) -> ClientResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let result = self.call_raw(method, params).await?;
        if result.is_null() {
            return Err(ClientError::Rpc(format!("no result for {method}")));
        }
        serde_json::from_value(result)
            .map_err(|e| ClientError::Rpc(format!("malformed {method} result: {e}")))
    }

    /// Accounts the node exposes for signing
    pub async fn accounts(&self) -> ClientResult<Vec<Address>> {
        let accounts: Vec<String> = self.call("eth_accounts", json!([])).await?;
        accounts
            .iter()
            .map(|account| {
                account
                    .parse::<Address>()
                    .map_err(|e| ClientError::Rpc(e.to_string()))
            })
            .collect()
    }

    /// Read-only contract call
    pub async fn call_contract(&self, to: &Address, data: &[u8]) -> ClientResult<Vec<u8>> {
        let params = json!([
            {
                "to": to.to_string(),
                "data": format!("0x{}", hex::encode(data)),
            },
            "latest"
        ]);

        let result: String = self.call("eth_call", params).await?;
        let raw = result.strip_prefix("0x").unwrap_or(&result);
        hex::decode(raw).map_err(|e| ClientError::Rpc(format!("invalid call result: {e}")))
    }

    /// Submit a state-mutating contract call, signed by the provider
    pub async fn send_transaction(
        &self,
        from: &Address,
        to: &Address,
        data: &[u8],
    ) -> ClientResult<TxHash> {
        let params = json!([{
            "from": from.to_string(),
            "to": to.to_string(),
            "data": format!("0x{}", hex::encode(data)),
        }]);

        let hash: String = self.call("eth_sendTransaction", params).await?;
        Ok(TxHash(hash))
    }

    /// Receipt status for a submitted transaction, once mined
    pub async fn transaction_receipt(&self, hash: &TxHash) -> ClientResult<Option<bool>> {
        let result = self
            .call_raw("eth_getTransactionReceipt", json!([hash.0]))
            .await?;
        if result.is_null() {
            return Ok(None);
        }
        let receipt: Receipt = serde_json::from_value(result)
            .map_err(|e| ClientError::Rpc(format!("malformed receipt: {e}")))?;
        Ok(Some(receipt.status == "0x1"))
    }
}

/// Wallet provider backed by the node's unlocked accounts
pub struct RpcWallet {
    rpc: Arc<EthRpcClient>,
}

impl RpcWallet {
    pub fn new(rpc: Arc<EthRpcClient>) -> Self {
        Self { rpc }
    }
}

#[async_trait]
impl WalletProvider for RpcWallet {
    async fn request_accounts(&self) -> ClientResult<Vec<Address>> {
        self.rpc
            .accounts()
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))
    }
}

/// Pool gateway backed by the JSON-RPC client
pub struct RpcGateway {
    rpc: Arc<EthRpcClient>,
    pool: Address,
    settle_timeout: Duration,
    poll_interval: Duration,
}

impl RpcGateway {
    pub fn new(rpc: Arc<EthRpcClient>, config: &PoolConfig) -> ClientResult<Self> {
        Ok(Self {
            rpc,
            pool: config.pool()?,
            settle_timeout: Duration::from_secs(config.settle_timeout_secs),
            poll_interval: Duration::from_millis(config.receipt_poll_ms),
        })
    }

    async fn read_words(&self, data: Vec<u8>, expected: usize) -> ClientResult<Vec<u128>> {
        let raw = self.rpc.call_contract(&self.pool, &data).await?;
        let words = decode_words(&raw)?;
        if words.len() < expected {
            return Err(ClientError::Rpc(format!(
                "expected {expected} return words, got {}",
                words.len()
            )));
        }
        Ok(words)
    }
}

#[async_trait]
impl PoolGateway for RpcGateway {
    async fn get_reserves(&self) -> ClientResult<(u128, u128)> {
        let words = self
            .read_words(encode_call(GET_RESERVES_SELECTOR, &[]), 2)
            .await?;
        Ok((words[0], words[1]))
    }

    async fn total_shares(&self) -> ClientResult<u128> {
        let words = self
            .read_words(encode_call(TOTAL_SHARES_SELECTOR, &[]), 1)
            .await?;
        Ok(words[0])
    }

    async fn shares_of(&self, account: &Address) -> ClientResult<u128> {
        let data = encode_call(SHARES_SELECTOR, &[AbiWord::Addr(*account)]);
        let words = self.read_words(data, 1).await?;
        Ok(words[0])
    }

    async fn approve(
        &self,
        from: &Address,
        token: &Address,
        spender: &Address,
        amount: u128,
    ) -> ClientResult<TxHandle> {
        let data = encode_call(
            APPROVE_SELECTOR,
            &[AbiWord::Addr(*spender), AbiWord::Uint(amount)],
        );
        let hash = self.rpc.send_transaction(from, token, &data).await?;
        Ok(TxHandle { hash })
    }

    async fn swap(&self, from: &Address, amount: u128, a_to_b: bool) -> ClientResult<TxHandle> {
        let data = encode_call(SWAP_SELECTOR, &[AbiWord::Uint(amount), AbiWord::Bool(a_to_b)]);
        let hash = self.rpc.send_transaction(from, &self.pool, &data).await?;
        Ok(TxHandle { hash })
    }

    async fn add_liquidity(
        &self,
        from: &Address,
        amount_a: u128,
        amount_b: u128,
    ) -> ClientResult<TxHandle> {
        let data = encode_call(
            ADD_LIQUIDITY_SELECTOR,
            &[AbiWord::Uint(amount_a), AbiWord::Uint(amount_b)],
        );
        let hash = self.rpc.send_transaction(from, &self.pool, &data).await?;
        Ok(TxHandle { hash })
    }

    async fn remove_liquidity(&self, from: &Address, amount: u128) -> ClientResult<TxHandle> {
        let data = encode_call(REMOVE_LIQUIDITY_SELECTOR, &[AbiWord::Uint(amount)]);
        let hash = self.rpc.send_transaction(from, &self.pool, &data).await?;
        Ok(TxHandle { hash })
    }

    /// Poll the receipt until the transaction settles or the outer timeout
    /// elapses; a reverted receipt and a timeout both fail the wait
    async fn wait_for_settlement(&self, tx: &TxHandle) -> ClientResult<()> {
        let wait = async {
            loop {
                match self.rpc.transaction_receipt(&tx.hash).await? {
                    Some(true) => return Ok(()),
                    Some(false) => {
                        return Err(ClientError::Rpc(format!("transaction {} reverted", tx.hash)))
                    }
                    None => sleep(self.poll_interval).await,
                }
            }
        };

        match timeout(self.settle_timeout, wait).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout(self.settle_timeout.as_secs())),
        }
    }
}
