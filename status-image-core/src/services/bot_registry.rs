// File: src/services/bot_registry.rs

use std::sync::Arc;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use status_image_common::models::bot::{BotIdentity, BotInfo, HostBot, MessageStats};
use status_image_common::traits::host_traits::BotRegistry;

use crate::config::DisplayNameOverride;

/// Login start time per bot, overwritten on every reconnect.
#[derive(Debug, Default)]
pub struct LoginTracker {
    starts: DashMap<BotIdentity, DateTime<Utc>>,
}

impl LoginTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, sid: BotIdentity, timestamp: DateTime<Utc>) {
        self.starts.insert(sid, timestamp);
    }

    pub fn started_at(&self, sid: &BotIdentity) -> Option<DateTime<Utc>> {
        self.starts.get(sid).map(|entry| *entry.value())
    }
}

/// Turns the host's live connections into display-ready [`BotInfo`]s.
pub struct BotRegistryAdapter {
    registry: Arc<dyn BotRegistry>,
    logins: Arc<LoginTracker>,
    display_names: Vec<DisplayNameOverride>,
    process_started: DateTime<Utc>,
}

impl BotRegistryAdapter {
    pub fn new(
        registry: Arc<dyn BotRegistry>,
        logins: Arc<LoginTracker>,
        display_names: Vec<DisplayNameOverride>,
        process_started: DateTime<Utc>,
    ) -> Self {
        Self {
            registry,
            logins,
            display_names,
            process_started,
        }
    }

    pub fn host_version(&self) -> String {
        self.registry.host_version()
    }

    pub fn process_started(&self) -> DateTime<Utc> {
        self.process_started
    }

    /// Visible bots in host order, with zeroed message stats.
    pub fn list_bots(&self, requesting_platform: Option<&str>, now: DateTime<Utc>) -> Vec<BotInfo> {
        self.registry
            .bots()
            .into_iter()
            .filter(|bot| {
                let visible = is_visible(bot, requesting_platform);
                if !visible {
                    debug!("Skipping bot {} (hidden={}, platform={})", bot.sid(), bot.hidden, bot.platform);
                }
                visible
            })
            .map(|bot| {
                let sid = bot.sid();
                let override_name = self
                    .display_names
                    .iter()
                    .find(|o| o.sid == sid)
                    .map(|o| o.name.as_str());
                let running_time = resolve_running_time(
                    self.logins.started_at(&sid),
                    self.process_started,
                    now,
                );
                BotInfo {
                    name: resolve_display_name(override_name, bot.nick.as_deref(), bot.name.as_deref()),
                    sid,
                    platform: bot.platform,
                    status: bot.status,
                    avatar: bot.avatar,
                    running_time,
                    messages: MessageStats::zero(),
                }
            })
            .collect()
    }
}

/// Hidden bots never show. Sandbox bots only show when the request itself
/// comes from a sandbox, or when there is no requesting platform at all.
pub fn is_visible(bot: &HostBot, requesting_platform: Option<&str>) -> bool {
    if bot.hidden {
        return false;
    }
    if bot.is_sandbox() {
        return requesting_platform.is_none_or(|p| p.starts_with("sandbox:"));
    }
    true
}

/// First candidate wins: configured override, nickname, account name, "".
/// Empty nickname and account name are skipped; an override is taken as is.
pub fn resolve_display_name(
    override_name: Option<&str>,
    nick: Option<&str>,
    name: Option<&str>,
) -> String {
    [
        override_name,
        nick.filter(|n| !n.is_empty()),
        name.filter(|n| !n.is_empty()),
    ]
    .into_iter()
    .flatten()
    .next()
    .unwrap_or_default()
    .to_string()
}

/// Milliseconds since the recorded login. Without one, the process uptime
/// stands in, which overstates bots that connected after startup.
pub fn resolve_running_time(
    login_started: Option<DateTime<Utc>>,
    process_started: DateTime<Utc>,
    now: DateTime<Utc>,
) -> u64 {
    let since = login_started.unwrap_or(process_started);
    (now - since).num_milliseconds().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use mockall::mock;
    use status_image_common::models::bot::BotStatus;

    mock! {
        pub Registry {}
        impl BotRegistry for Registry {
            fn bots(&self) -> Vec<HostBot>;
            fn host_version(&self) -> String;
        }
    }

    fn bot(platform: &str, self_id: &str) -> HostBot {
        HostBot {
            platform: platform.into(),
            self_id: self_id.into(),
            status: BotStatus::Online,
            nick: None,
            name: Some(format!("bot-{}", self_id)),
            avatar: None,
            hidden: false,
        }
    }

    #[test]
    fn test_name_resolution_precedence() {
        assert_eq!(resolve_display_name(Some("Robert"), Some(""), Some("Bob")), "Robert");
        assert_eq!(resolve_display_name(None, Some(""), Some("Bob")), "Bob");
        assert_eq!(resolve_display_name(None, Some("Bobby"), Some("Bob")), "Bobby");
        assert_eq!(resolve_display_name(None, Some(""), Some("")), "");
        assert_eq!(resolve_display_name(None, None, None), "");
    }

    #[test]
    fn test_sandbox_visibility() {
        let sandbox = bot("sandbox:x", "1");
        assert!(!is_visible(&sandbox, Some("discord")));
        assert!(is_visible(&sandbox, Some("sandbox:x")));
        assert!(is_visible(&sandbox, Some("sandbox:other")));
        assert!(is_visible(&sandbox, None));
        assert!(is_visible(&bot("discord", "1"), Some("sandbox:x")));
    }

    #[test]
    fn test_hidden_bot_never_visible() {
        let mut hidden = bot("discord", "1");
        hidden.hidden = true;
        assert!(!is_visible(&hidden, Some("discord")));
        assert!(!is_visible(&hidden, None));
    }

    #[test]
    fn test_running_time_prefers_login() {
        let now = Utc::now();
        let process = now - Duration::hours(10);
        let login = now - Duration::minutes(5);
        assert_eq!(resolve_running_time(Some(login), process, now), 5 * 60 * 1000);
        assert_eq!(resolve_running_time(None, process, now), 10 * 3600 * 1000);
        assert_eq!(resolve_running_time(Some(now + Duration::seconds(1)), process, now), 0);
    }

    #[test]
    fn test_list_bots_filters_and_decorates() {
        let mut hidden = bot("discord", "9");
        hidden.hidden = true;
        let mut registry = MockRegistry::new();
        registry
            .expect_bots()
            .times(1)
            .returning(move || vec![bot("discord", "1"), bot("sandbox:x", "2"), hidden.clone(), bot("qq", "3")]);

        let now = Utc::now();
        let logins = Arc::new(LoginTracker::new());
        logins.record(BotIdentity::from("qq:3"), now - Duration::seconds(30));
        let adapter = BotRegistryAdapter::new(
            Arc::new(registry),
            logins,
            vec![DisplayNameOverride { sid: BotIdentity::from("discord:1"), name: "Robert".into() }],
            now - Duration::hours(1),
        );

        let bots = adapter.list_bots(Some("discord"), now);
        let sids: Vec<&str> = bots.iter().map(|b| b.sid.as_str()).collect();
        assert_eq!(sids, vec!["discord:1", "qq:3"]);
        assert_eq!(bots[0].name, "Robert");
        assert_eq!(bots[0].running_time, 3600 * 1000);
        assert_eq!(bots[1].name, "bot-3");
        assert_eq!(bots[1].running_time, 30 * 1000);
        assert_eq!(bots[1].messages, MessageStats::zero());
    }

    #[test]
    fn test_login_tracker_overwrites_on_reconnect() {
        let tracker = LoginTracker::new();
        let sid = BotIdentity::from("discord:1");
        let first = Utc::now() - Duration::hours(2);
        let second = Utc::now();
        tracker.record(sid.clone(), first);
        tracker.record(sid.clone(), second);
        assert_eq!(tracker.started_at(&sid), Some(second));
        assert_eq!(tracker.started_at(&BotIdentity::from("discord:2")), None);
    }
}
