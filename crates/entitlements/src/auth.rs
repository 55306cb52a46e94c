use common::types::{ChatId, Id, UserId};
use db::DB;

use crate::Result;

/// Owner identity and control chat. The secret comes from the environment;
/// whoever presents it becomes the owner.
#[derive(Debug, Clone)]
pub struct AuthPolicy {
    db: DB,
    secret: String,
}

impl AuthPolicy {
    pub fn new(db: DB, secret: impl Into<String>) -> Self {
        Self {
            db,
            secret: secret.into(),
        }
    }
    /// Records the caller as owner on a matching secret. An empty secret
    /// disables owner authentication entirely.
    pub async fn authenticate(&self, secret: &str, user: UserId) -> Result<bool> {
        if self.secret.is_empty() || secret != self.secret {
            log::warn!("failed owner authentication attempt by user {user}");
            return Ok(false);
        }
        self.db.save_owner(user.into()).await?;
        log::info!("user {user} authenticated as owner");
        Ok(true)
    }
    pub async fn is_owner(&self, user: UserId) -> Result<bool> {
        let cfg = self.db.admin_config().await?;
        let user_id: Id = user.into();
        Ok(cfg.owner_id() == Some(user_id))
    }
    /// Owner commands are accepted from the owner in their private chat, or
    /// in the designated control chat. Before a control chat is set, any
    /// chat works for the owner.
    pub async fn authorize(&self, user: UserId, chat: ChatId) -> Result<bool> {
        let cfg = self.db.admin_config().await?;
        let user_id: Id = user.into();
        if cfg.owner_id() != Some(user_id) {
            return Ok(false);
        }
        Ok(match cfg.control_chat_id() {
            Some(control) => chat.0 == control || chat.0 == user_id,
            None => true,
        })
    }
    /// Owner-only; marks the current chat as the control chat
    pub async fn set_control_chat(&self, user: UserId, chat: ChatId) -> Result<bool> {
        if !self.is_owner(user).await? {
            return Ok(false);
        }
        self.db.save_control_chat(chat.into()).await?;
        Ok(true)
    }
}
