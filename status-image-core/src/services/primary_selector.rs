// File: src/services/primary_selector.rs

use status_image_common::models::bot::{BotIdentity, BotInfo};
use crate::Error;

/// Which bot leads the card, and the display order of all bots.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimarySelection<'a> {
    pub primary: &'a BotInfo,
    /// `primary` first, then the remaining bots in their original order.
    pub ordered: Vec<&'a BotInfo>,
}

/// Picks the bot the request is "about": the requesting session's own bot,
/// else the first bot on the requesting platform, else the first bot.
/// Derived per request; the requesting identity differs between calls.
pub fn select_primary<'a>(
    bots: &'a [BotInfo],
    requesting_sid: Option<&BotIdentity>,
    requesting_platform: Option<&str>,
) -> Result<PrimarySelection<'a>, Error> {
    let primary = requesting_sid
        .and_then(|sid| bots.iter().find(|b| &b.sid == sid))
        .or_else(|| requesting_platform.and_then(|p| bots.iter().find(|b| b.platform == p)))
        .or_else(|| bots.first())
        .ok_or(Error::NoBotAvailable)?;

    let ordered = std::iter::once(primary)
        .chain(bots.iter().filter(|b| b.sid != primary.sid))
        .collect();

    Ok(PrimarySelection { primary, ordered })
}
