//! Code-lifecycle and entitlement engine: activation codes, group bindings,
//! bounded renewals and payment-driven extensions. All state lives in the
//! store; every mutation goes through [`Engine`].
use std::sync::Arc;

use tokio::sync::Mutex;

use db::DB;

mod auth;
mod binding;
mod issuer;
mod payment;
mod policy;
mod renewal;


pub use auth::AuthPolicy;
pub use binding::BindOutcome;
pub use issuer::IssueOutcome;
pub use payment::{CheckOutcome, DepositAddress, IndexerError, PaymentIndexer};
pub use policy::Policy;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("store error: {0}")]
    Db(#[from] db::Error),
    #[error(transparent)]
    Indexer(#[from] IndexerError),
}

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone)]
pub struct Engine {
    db: DB,
    policy: Policy,
    // serializes read-modify-write sequences: teloxide dispatches updates
    // concurrently, and the quota and extension-count checks span several
    // statements
    lock: Arc<Mutex<()>>,
}

impl Engine {
    pub fn new(db: DB, policy: Policy) -> Self {
        Self {
            db,
            policy,
            lock: Arc::new(Mutex::new(())),
        }
    }
    pub fn policy(&self) -> &Policy {
        &self.policy
    }
    pub async fn stats(&self) -> Result<db::models::Stats> {
        Ok(self.db.load_stats().await?)
    }
}
