//! Transaction and payment-method hooks.

#[cfg(test)]
#[path = "transactions_test.rs"]
mod transactions_test;

use models::requests::{CreateTransactionRequest, ProofPaymentRequest, UpdateTransactionStatusRequest};
use models::resources::{PaymentMethod, Transaction, TransactionStatus};
use reqwest::Method;
use serde_json::Value;

use super::resource::{ResourceHook, ResourceState, body_of};
use crate::error::ClientError;
use crate::net::client::ApiClient;

pub const MY_TRANSACTIONS_PATH: &str = "/api/transactions";
pub const ALL_TRANSACTIONS_PATH: &str = "/api/all-transactions";
pub const PAYMENT_METHODS_PATH: &str = "/api/payment-methods";

pub struct TransactionsHook {
    inner: ResourceHook<Vec<Transaction>>,
}

impl TransactionsHook {
    /// The signed-in buyer's own transactions.
    #[must_use]
    pub fn mine(client: ApiClient) -> Self {
        Self { inner: ResourceHook::new(client, MY_TRANSACTIONS_PATH) }
    }

    /// Every transaction, for the back office.
    #[must_use]
    pub fn all(client: ApiClient) -> Self {
        Self { inner: ResourceHook::new(client, ALL_TRANSACTIONS_PATH) }
    }

    #[must_use]
    pub fn state(&self) -> ResourceState<Vec<Transaction>> {
        self.inner.state()
    }

    /// # Errors
    ///
    /// The fetch error, also kept in the state.
    pub async fn refetch(&self) -> Result<(), ClientError> {
        self.inner.refetch().await
    }

    /// Check out the given cart lines.
    ///
    /// # Errors
    ///
    /// `Validation` for an empty cart selection, else the gateway's error.
    pub async fn create(&self, cart_ids: Vec<String>, payment_method_id: &str) -> Result<Value, ClientError> {
        if cart_ids.is_empty() {
            return Err(ClientError::Validation("Select at least one cart item".into()));
        }
        let body = body_of(&CreateTransactionRequest { cart_ids, payment_method_id: payment_method_id.to_owned() })?;
        self.inner.mutate(Method::POST, "/api/create-transaction", Some(body)).await
    }

    /// # Errors
    ///
    /// The gateway's error.
    pub async fn cancel(&self, id: &str) -> Result<Value, ClientError> {
        self.inner.mutate(Method::POST, &format!("/api/cancel-transaction/{id}"), None).await
    }

    /// Attach an uploaded proof-of-payment image.
    ///
    /// # Errors
    ///
    /// The gateway's error.
    pub async fn submit_proof(&self, id: &str, proof_payment_url: &str) -> Result<Value, ClientError> {
        let body = body_of(&ProofPaymentRequest { proof_payment_url: proof_payment_url.to_owned() })?;
        self.inner
            .mutate(Method::POST, &format!("/api/update-transaction-proof-payment/{id}"), Some(body))
            .await
    }

    /// Admin decision on a pending transaction.
    ///
    /// # Errors
    ///
    /// The gateway's error.
    pub async fn update_status(&self, id: &str, status: TransactionStatus) -> Result<Value, ClientError> {
        let body = body_of(&UpdateTransactionStatusRequest { status })?;
        self.inner.mutate(Method::POST, &format!("/api/update-transaction-status/{id}"), Some(body)).await
    }
}

/// Single transaction by id.
#[must_use]
pub fn transaction_detail(client: ApiClient, id: &str) -> ResourceHook<Transaction> {
    ResourceHook::new(client, format!("{MY_TRANSACTIONS_PATH}/{id}"))
}

pub struct PaymentMethodsHook {
    inner: ResourceHook<Vec<PaymentMethod>>,
}

impl PaymentMethodsHook {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { inner: ResourceHook::new(client, PAYMENT_METHODS_PATH) }
    }

    #[must_use]
    pub fn state(&self) -> ResourceState<Vec<PaymentMethod>> {
        self.inner.state()
    }

    /// # Errors
    ///
    /// The fetch error, also kept in the state.
    pub async fn refetch(&self) -> Result<(), ClientError> {
        self.inner.refetch().await
    }

    /// Ask the upstream to seed its default payment methods.
    ///
    /// # Errors
    ///
    /// The gateway's error.
    pub async fn generate(&self) -> Result<Value, ClientError> {
        self.inner.mutate(Method::POST, "/api/generate-payment-methods", None).await
    }
}
