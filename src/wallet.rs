//! Wallet session management

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::core::error::{ClientError, ClientResult};
use crate::core::types::{Address, Session};

/// Capability interface over an injected wallet provider
///
/// The core only ever asks the provider for account access; key management
/// and the signing surface stay on the provider side.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Request account access, returning the provider's accounts in order
    async fn request_accounts(&self) -> ClientResult<Vec<Address>>;
}

/// Obtains and holds the signing identity for the session
pub struct SessionManager<P: WalletProvider> {
    provider: P,
    account: Option<Address>,
}

impl<P: WalletProvider> SessionManager<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            account: None,
        }
    }

    /// Request account access and produce the resulting session
    ///
    /// Success yields a Connected session bound to the first returned
    /// account. Rejection, an absent provider, or an empty account list
    /// yields a Disconnected session carrying the error; nothing is retried
    /// automatically, re-connection is the only recovery path.
    pub async fn connect(&mut self) -> Session {
        match self.provider.request_accounts().await {
            Ok(accounts) => match accounts.first() {
                Some(account) => {
                    debug!(account = %account, "wallet connected");
                    self.account = Some(*account);
                    Session::connected(*account)
                }
                None => {
                    warn!("wallet provider returned no accounts");
                    Session::failed("wallet provider returned no accounts")
                }
            },
            Err(e) => {
                warn!("wallet connection failed: {e}");
                let message = match e {
                    ClientError::Connection(message) => message,
                    other => other.to_string(),
                };
                Session::failed(message)
            }
        }
    }

    /// Account the session is signing with, if any
    pub fn current_account(&self) -> Option<Address> {
        self.account
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{test_address, MockWallet};

    #[tokio::test]
    async fn connect_binds_the_first_account() {
        let account = test_address(0x42);
        let mut manager = SessionManager::new(MockWallet::with_account(account));

        let session = manager.connect().await;
        assert!(session.is_connected());
        assert_eq!(session.account, Some(account));
        assert_eq!(manager.current_account(), Some(account));
    }

    #[tokio::test]
    async fn rejection_leaves_no_account() {
        let mut manager = SessionManager::new(MockWallet::rejecting("user rejected the request"));

        let session = manager.connect().await;
        assert!(!session.is_connected());
        assert_eq!(session.error.as_deref(), Some("user rejected the request"));
        assert_eq!(manager.current_account(), None);
    }

    #[tokio::test]
    async fn empty_account_list_fails_the_attempt() {
        let mut manager = SessionManager::new(MockWallet::empty());

        let session = manager.connect().await;
        assert!(!session.is_connected());
        assert!(session.error.is_some());
    }
}
