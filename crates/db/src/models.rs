use common::{
    types::{Id, MicroUsdt},
    DateTime, UnixDateTime,
};

/// Activation code, minted by a user (quota-checked) or by the owner
/// (quota-exempt). A revoked code is never valid, whatever its expiry.
#[derive(Debug, sqlx::FromRow, bon::Builder)]
pub struct Code {
    code: String,
    issuer_id: Id,
    #[builder(default = DateTime::now())]
    created_at: UnixDateTime,
    expires_at: UnixDateTime,
    #[builder(default)]
    privileged: bool,
    #[builder(default)]
    revoked: bool,
}

impl Code {
    pub fn code(&self) -> &str {
        &self.code
    }
    pub fn issuer_id(&self) -> Id {
        self.issuer_id
    }
    pub fn created_at(&self) -> UnixDateTime {
        self.created_at
    }
    pub fn expires_at(&self) -> UnixDateTime {
        self.expires_at
    }
    pub fn privileged(&self) -> bool {
        self.privileged
    }
    pub fn revoked(&self) -> bool {
        self.revoked
    }
    pub fn is_valid(&self, now: UnixDateTime) -> bool {
        !self.revoked && self.expires_at >= now
    }
}

/// A chat bound to an activation code. Expiry is copied from the code at
/// bind time and evolves independently, except that an administrative code
/// extension re-synchronizes connected bindings.
#[derive(Debug, sqlx::FromRow, bon::Builder)]
pub struct Binding {
    chat_id: Id,
    code: String,
    expires_at: UnixDateTime,
    #[builder(default)]
    extension_count: u32,
    #[builder(default = true)]
    connected: bool,
    last_payment_check: Option<UnixDateTime>,
}

impl Binding {
    pub fn chat_id(&self) -> Id {
        self.chat_id
    }
    pub fn code(&self) -> &str {
        &self.code
    }
    pub fn expires_at(&self) -> UnixDateTime {
        self.expires_at
    }
    pub fn extension_count(&self) -> u32 {
        self.extension_count
    }
    pub fn connected(&self) -> bool {
        self.connected
    }
    pub fn last_payment_check(&self) -> Option<UnixDateTime> {
        self.last_payment_check
    }
    pub fn is_active(&self, now: UnixDateTime) -> bool {
        self.connected && self.expires_at >= now
    }
    pub fn remaining_seconds(&self, now: UnixDateTime) -> i64 {
        (self.expires_at - now).max(0)
    }
}

/// Per-user entitlement for translation in private chats
#[derive(Debug, sqlx::FromRow)]
pub struct Solo {
    user_id: Id,
    expires_at: UnixDateTime,
    extension_count: u32,
}

impl Solo {
    pub fn user_id(&self) -> Id {
        self.user_id
    }
    pub fn expires_at(&self) -> UnixDateTime {
        self.expires_at
    }
    pub fn extension_count(&self) -> u32 {
        self.extension_count
    }
    pub fn is_active(&self, now: UnixDateTime) -> bool {
        self.expires_at >= now
    }
    pub fn remaining_seconds(&self, now: UnixDateTime) -> i64 {
        (self.expires_at - now).max(0)
    }
}

/// Pending deposit order for a chat, at most one live per chat. `settled`
/// marks a confirmed payment that could not be applied because the
/// extension limit was already reached.
#[derive(Debug, sqlx::FromRow)]
pub struct Invoice {
    chat_id: Id,
    order_ref: String,
    address: String,
    created_at: UnixDateTime,
    settled: bool,
    confirmed_amount: Option<MicroUsdt>,
}

impl Invoice {
    pub fn chat_id(&self) -> Id {
        self.chat_id
    }
    pub fn order_ref(&self) -> &str {
        &self.order_ref
    }
    pub fn address(&self) -> &str {
        &self.address
    }
    pub fn created_at(&self) -> UnixDateTime {
        self.created_at
    }
    pub fn settled(&self) -> bool {
        self.settled
    }
    pub fn confirmed_amount(&self) -> Option<MicroUsdt> {
        self.confirmed_amount
    }
}

/// Owner identity and control chat, a single row
#[derive(Debug, Default, sqlx::FromRow)]
pub struct AdminConfig {
    owner_id: Option<Id>,
    control_chat_id: Option<Id>,
}

impl AdminConfig {
    pub fn owner_id(&self) -> Option<Id> {
        self.owner_id
    }
    pub fn control_chat_id(&self) -> Option<Id> {
        self.control_chat_id
    }
}

#[derive(Debug)]
pub struct Stats {
    pub codes: u32,
    pub bindings: u32,
    pub connected_bindings: u32,
    pub solo_users: u32,
}

/// Struct helpers for extracting partial structs
pub mod fetch {
    #[derive(sqlx::FromRow)]
    pub(crate) struct Count {
        pub count: u32,
    }
}
