use common::{
    types::{ChatId, UserId},
    DateTime,
};
use db::models::Binding;

use crate::{Engine, Result};

/// Result of a bind attempt. These are expected policy outcomes, every one
/// maps to its own user-facing message.
#[derive(Debug, PartialEq, Eq)]
pub enum BindOutcome {
    Bound,
    /// Previously disconnected chat reconnected with the same code
    Rebound,
    InvalidOrExpiredCode,
    /// A chat stays with its first code until an administrative purge
    AlreadyBoundToDifferentCode,
    AlreadyConnected,
    /// The code already reached its maximum number of bound chats
    GroupQuotaExceeded,
}

impl Engine {
    pub async fn bind(&self, code: &str, chat: ChatId) -> Result<BindOutcome> {
        let _guard = self.lock.lock().await;
        let now = DateTime::now();

        let Some(record) = self.db.select_code(code).await? else {
            return Ok(BindOutcome::InvalidOrExpiredCode);
        };
        if !record.is_valid(now) {
            return Ok(BindOutcome::InvalidOrExpiredCode);
        }

        if let Some(binding) = self.db.select_binding(chat.into()).await? {
            if binding.code() != code {
                return Ok(BindOutcome::AlreadyBoundToDifferentCode);
            }
            if binding.connected() {
                return Ok(BindOutcome::AlreadyConnected);
            }
            // reconnect keeps extension_count, so disconnect cycles cannot
            // reset the renewal allowance
            self.db.reconnect_binding(chat.into(), record.expires_at()).await?;
            return Ok(BindOutcome::Rebound);
        }

        if self.db.count_bindings(code).await? >= self.policy.max_groups_per_code {
            return Ok(BindOutcome::GroupQuotaExceeded);
        }

        self.db
            .add_binding(
                Binding::builder()
                    .chat_id(chat.into())
                    .code(code.to_string())
                    .expires_at(record.expires_at())
                    .build(),
            )
            .await?;

        Ok(BindOutcome::Bound)
    }
    /// The single gate the translation path queries. Expiry is lazy: no
    /// sweeps, just this comparison.
    pub async fn is_active(&self, chat: ChatId) -> Result<bool> {
        let now = DateTime::now();
        Ok(self
            .db
            .select_binding(chat.into())
            .await?
            .is_some_and(|b| b.is_active(now)))
    }
    pub async fn remaining_seconds(&self, chat: ChatId) -> Result<i64> {
        let now = DateTime::now();
        Ok(self
            .db
            .select_binding(chat.into())
            .await?
            .map(|b| b.remaining_seconds(now))
            .unwrap_or(0))
    }
    /// Soft unbind. Idempotent: a missing or already disconnected binding
    /// is not an error.
    pub async fn disconnect(&self, chat: ChatId) -> Result<()> {
        let _guard = self.lock.lock().await;
        if self.db.select_binding(chat.into()).await?.is_some() {
            self.db.save_binding_connected(chat.into(), false).await?;
        }
        Ok(())
    }
    /// Same effect as [`Engine::disconnect`], invoked by the owner for any
    /// chat
    pub async fn force_disconnect(&self, chat: ChatId) -> Result<()> {
        log::info!("force disconnect of chat {chat}");
        self.disconnect(chat).await
    }
    pub async fn list_bindings(&self) -> Result<Vec<Binding>> {
        Ok(self.db.select_all_bindings().await?)
    }
    /// Administrative purge: unlike disconnect this removes the binding
    /// (and any pending invoice), so the chat may later bind a different
    /// code with a fresh extension allowance. Returns false if there was
    /// nothing to purge.
    pub async fn purge_binding(&self, chat: ChatId) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let removed = self.db.remove_binding(chat.into()).await?;
        if removed {
            self.db.delete_invoice(chat.into()).await?;
            log::info!("binding for chat {chat} purged");
        }
        Ok(removed)
    }
    /// Active entitlement for private-chat translation
    pub async fn solo_active(&self, user: UserId) -> Result<bool> {
        let now = DateTime::now();
        Ok(self
            .db
            .select_solo(user.into())
            .await?
            .is_some_and(|s| s.is_active(now)))
    }
    pub async fn solo_remaining_seconds(&self, user: UserId) -> Result<i64> {
        let now = DateTime::now();
        Ok(self
            .db
            .select_solo(user.into())
            .await?
            .map(|s| s.remaining_seconds(now))
            .unwrap_or(0))
    }
}
