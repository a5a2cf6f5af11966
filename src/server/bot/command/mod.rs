//! Slash commands offered by the bot.

use serenity::all::CreateCommand;

pub mod mycalendar;

/// Every command to register on ready.
pub fn commands() -> Vec<CreateCommand> {
    vec![mycalendar::register()]
}
