use status_image_common::models::bot::BotStatus;

/// Label and indicator colour for a connection status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDescriptor {
    pub label: &'static str,
    pub color: &'static str,
}

pub fn status_descriptor(status: BotStatus) -> StatusDescriptor {
    let (label, color) = match status {
        BotStatus::Offline => ("离线", "#8c8fa1"),
        BotStatus::Online => ("运行中", "#40a02b"),
        BotStatus::Connect => ("连接中", "#df8e1d"),
        BotStatus::Disconnect => ("断开", "#d20f39"),
        BotStatus::Reconnect => ("重连中", "#1e66f5"),
        BotStatus::Unknown(_) => ("未知", "#6b7280"),
    };
    StatusDescriptor { label, color }
}

/// Display name of a platform tag. A `sandbox:` prefix is ignored and
/// unrecognised tags are shown as they are.
pub fn platform_label(platform: &str) -> String {
    let plain = platform.strip_prefix("sandbox:").unwrap_or(platform);
    let label = match plain {
        "onebot" => "Onebot",
        "qq" => "QQ",
        "discord" => "Discord",
        "telegram" => "Telegram",
        "kook" => "KOOK",
        "wechat-official" => "微信公众号",
        "lark" => "飞书",
        "dingtalk" => "钉钉",
        "line" => "LINE",
        "slack" => "Slack",
        "whatsapp" => "WhatsAPP",
        "milky" => "Milky",
        other => other,
    };
    label.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses() {
        assert_eq!(status_descriptor(BotStatus::Online).label, "运行中");
        assert_eq!(status_descriptor(BotStatus::Disconnect).color, "#d20f39");
    }

    #[test]
    fn test_unknown_status_degrades() {
        let d = status_descriptor(BotStatus::from_code(42));
        assert_eq!(d.label, "未知");
    }

    #[test]
    fn test_platform_labels() {
        assert_eq!(platform_label("qq"), "QQ");
        assert_eq!(platform_label("sandbox:discord"), "Discord");
        assert_eq!(platform_label("sandbox:abc"), "abc");
        assert_eq!(platform_label("matrix"), "matrix");
    }
}
