use std::sync::Arc;

use entitlements::PaymentIndexer;
use translate::Translator;

mod bot_messages;
mod bot_owner_messages;
mod commands;

pub use bot_messages::{command_handler, message_handler};
pub use bot_owner_messages::owner_command_handler;
pub use commands::{Command, OwnerCommand};

pub type DynIndexer = Arc<dyn PaymentIndexer>;
pub type DynTranslator = Arc<dyn Translator>;
