use common::types::MicroUsdt;

/// Entitlement tunables. Defaults follow the deployed bot: one free code
/// per user, 3-day codes, 30-day extensions, at most two per binding and
/// one for solo mode, 30 USDT per paid extension.
#[derive(Debug, Clone, bon::Builder)]
pub struct Policy {
    #[builder(default = 1)]
    pub free_quota: u32,
    #[builder(default = 3)]
    pub free_code_days: u32,
    #[builder(default = 2)]
    pub max_groups_per_code: u32,
    #[builder(default = 2)]
    pub max_extensions: u32,
    #[builder(default = 1)]
    pub max_solo_extensions: u32,
    #[builder(default = 3)]
    pub solo_days: u32,
    #[builder(default = 30)]
    pub extend_days: u32,
    #[builder(default = 30_000_000)]
    pub required_payment: MicroUsdt,
}

impl Default for Policy {
    fn default() -> Self {
        Self::builder().build()
    }
}
