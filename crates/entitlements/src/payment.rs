use async_trait::async_trait;

use common::{
    types::{format_usdt, ChatId, Id, MicroUsdt},
    DateTime,
};

use crate::{Engine, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositAddress {
    pub address: String,
    pub order_ref: String,
}

#[derive(Debug, thiserror::Error)]
#[error("payment indexer: {0}")]
pub struct IndexerError(String);

impl IndexerError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// External blockchain-indexing collaborator. `confirmed_amount` is the
/// cumulative confirmed inbound value for a one-time order reference, so
/// repeated queries never double-count individual transfers.
#[async_trait]
pub trait PaymentIndexer: Send + Sync {
    async fn create_deposit_address(&self, chat_id: Id) -> std::result::Result<DepositAddress, IndexerError>;
    async fn confirmed_amount(&self, order_ref: &str) -> std::result::Result<MicroUsdt, IndexerError>;
}

#[derive(Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No binding for this chat at all
    NotRegistered,
    /// Funds not (yet) confirmed; the pending deposit address to show
    Unpaid { address: String },
    /// Payment confirmed and the extension applied
    Paid { amount: MicroUsdt, remaining_seconds: i64 },
    /// Payment confirmed but the extension limit is exhausted; reported,
    /// never re-applied, never silently dropped
    PaidNoCapacity { amount: MicroUsdt },
}

impl Engine {
    /// Reconcile the chat's pending deposit order with the indexer and
    /// extend the binding when the required amount has arrived.
    ///
    /// Indexer failures propagate as errors before any state is touched,
    /// so an ambiguous confirmation never leaves a partial extension. The
    /// operation is made for polling: while unpaid it keeps answering with
    /// the same pending address, and a confirmed payment advances state
    /// exactly once because the invoice is consumed with it.
    pub async fn check_and_extend(&self, chat: ChatId, indexer: &dyn PaymentIndexer) -> Result<CheckOutcome> {
        let _guard = self.lock.lock().await;
        let chat_id: Id = chat.into();

        if self.db.select_binding(chat_id).await?.is_none() {
            return Ok(CheckOutcome::NotRegistered);
        }

        let Some(invoice) = self.db.select_invoice(chat_id).await? else {
            return self.open_invoice(chat_id, indexer).await;
        };

        if invoice.settled() {
            // already confirmed earlier with no renewal capacity left;
            // keep reporting without touching the indexer
            return Ok(CheckOutcome::PaidNoCapacity {
                amount: invoice.confirmed_amount().unwrap_or(self.policy.required_payment),
            });
        }

        let amount = indexer.confirmed_amount(invoice.order_ref()).await?;
        self.db.save_binding_payment_check(chat_id, DateTime::now()).await?;

        if amount < self.policy.required_payment {
            return Ok(CheckOutcome::Unpaid {
                address: invoice.address().to_string(),
            });
        }

        if self.extend_binding_locked(chat).await? {
            self.db.delete_invoice(chat_id).await?;
            log::info!("payment of {} USDT confirmed for chat {chat_id}", format_usdt(amount));
            Ok(CheckOutcome::Paid {
                amount,
                remaining_seconds: self.remaining_locked(chat_id).await?,
            })
        } else {
            self.db.save_invoice_settled(chat_id, amount).await?;
            log::warn!(
                "payment of {} USDT confirmed for chat {chat_id} but extension limit is exhausted",
                format_usdt(amount)
            );
            Ok(CheckOutcome::PaidNoCapacity { amount })
        }
    }
    async fn open_invoice(&self, chat_id: Id, indexer: &dyn PaymentIndexer) -> Result<CheckOutcome> {
        let deposit = indexer.create_deposit_address(chat_id).await?;
        let now = DateTime::now();
        self.db
            .replace_invoice(chat_id, &deposit.order_ref, &deposit.address, now)
            .await?;
        self.db.save_binding_payment_check(chat_id, now).await?;
        log::debug!("opened deposit order {} for chat {chat_id}", deposit.order_ref);
        Ok(CheckOutcome::Unpaid {
            address: deposit.address,
        })
    }
    async fn remaining_locked(&self, chat_id: Id) -> Result<i64> {
        let now = DateTime::now();
        Ok(self
            .db
            .select_binding(chat_id)
            .await?
            .map(|b| b.remaining_seconds(now))
            .unwrap_or(0))
    }
}
