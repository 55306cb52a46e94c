use teloxide::macros::BotCommands as DeriveBotCommands;

#[derive(DeriveBotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(hide)]
    Start,
    #[command(description = "Help")]
    Help,
    #[command(description = "Generate a free activation code")]
    CreateCode,
    #[command(description = "Bind this chat to a code")]
    RegisterCode(String),
    #[command(description = "Disconnect this chat")]
    Disconnect,
    #[command(description = "Personal translation in private chat")]
    SoloMode,
    #[command(description = "Extend the current period")]
    ExtendCode,
    #[command(description = "Show remaining time")]
    Remaining,
    #[command(description = "Check for a USDT payment")]
    PaymentCheck,
}

/// Owner-only commands, gated by [`entitlements::AuthPolicy`] in the
/// handler. Not advertised via set_my_commands.
#[derive(DeriveBotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum OwnerCommand {
    #[command(hide)]
    Auth(String),
    #[command(description = "Use this chat for owner commands")]
    SetControlGroup,
    #[command(description = "Issue a code with chosen value and duration", parse_with = "split")]
    GenCode(String, u32),
    #[command(description = "Revoke a code")]
    DelCode(String),
    #[command(description = "Extend an issued code", parse_with = "split")]
    ExtendIssued(String, u32),
    #[command(description = "Disconnect any chat")]
    ForceDisconnect(i64),
    #[command(description = "Remove a chat's binding entirely")]
    PurgeBinding(i64),
    #[command(description = "List all bindings")]
    ListBindings,
    #[command(description = "Usage stats")]
    Stats,
}
