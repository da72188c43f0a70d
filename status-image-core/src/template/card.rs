// File: src/template/card.rs

use std::fmt::Write;

use status_image_common::models::bot::{BotIdentity, BotInfo};
use status_image_common::models::system::{MemoryUsage, SystemInfo};

use crate::services::primary_selector::select_primary;
use crate::template::descriptors::{platform_label, status_descriptor};
use crate::template::format::{escape_html, format_bytes, format_duration, percent};
use crate::Error;

pub struct TemplateOptions<'a> {
    /// Base URL of bundled fonts and icons.
    pub resource_path: &'a str,
    pub background: &'a str,
    pub system_info: &'a SystemInfo,
    pub active_sid: Option<&'a BotIdentity>,
    pub active_platform: Option<&'a str>,
}

/// Builds the card document. Fails with `NoBotAvailable` when the snapshot
/// has no bots.
pub fn generate(options: &TemplateOptions<'_>) -> Result<String, Error> {
    let info = options.system_info;
    let selection = select_primary(&info.bots, options.active_sid, options.active_platform)?;
    let primary = selection.primary;
    let system = &info.system;
    let res = escape_html(options.resource_path);

    let mut tabs = String::new();
    for bot in &selection.ordered {
        tabs.push_str(&bot_tab(bot, bot.sid == primary.sid));
    }

    let status = status_descriptor(primary.status);
    let mut html = String::with_capacity(4096);
    // Writing into a String cannot fail.
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="UTF-8">
<title>Status Card</title>
<style>
@font-face {{ font-family: 'NotoSansSC'; src: url('{res}/fonts/NotoSansSC-Regular.ttf') format('truetype'); }}
body {{ font-family: 'NotoSansSC', sans-serif; margin: 0; width: 560px; min-height: 780px; color: #f2f3f8; }}
.bg {{ background: url('{background}') top center / cover no-repeat; min-height: 780px; padding: 32px 24px; box-sizing: border-box; }}
.panel {{ background: rgba(81, 80, 80, 0.4); border-radius: 16px; padding: 20px; margin-bottom: 20px; }}
.tabs {{ display: flex; gap: 16px; }}
.avatar {{ border-radius: 50%; object-fit: cover; border: 3px solid rgba(255, 255, 255, 0.5); }}
.dot {{ display: inline-block; width: 14px; height: 14px; border-radius: 50%; border: 2px solid #fff; }}
.gauges {{ display: flex; justify-content: center; gap: 40px; text-align: center; }}
.footer {{ text-align: center; font-size: 14px; }}
</style>
</head>
<body>
<div class="bg">
<div class="panel tabs">{tabs}</div>
<div class="panel">
  <img class="avatar" width="80" height="80" src="{avatar}" alt="Avatar">
  <span class="dot" style="background: {status_color}" title="{status_label}"></span>
  <h2>{name} <small>{platform}</small></h2>
  <div>Running on {os}</div>
  <div>{running}</div>
  <div>
    <img src="{res}/icon/sent.png" width="20" height="20" alt="Sent"> 昨日发送 <b>{sent}</b>
    <img src="{res}/icon/recv.png" width="20" height="20" alt="Received"> 昨日接收 <b>{received}</b>
  </div>
</div>
<div class="panel gauges">{cpu}{ram}{swap}</div>
<div class="footer">{host_version} &amp; status-image v{plugin_version}</div>
</div>
</body>
</html>
"#,
        res = res,
        background = escape_html(options.background),
        tabs = tabs,
        avatar = escape_html(primary.avatar.as_deref().unwrap_or("")),
        status_color = status.color,
        status_label = status.label,
        name = escape_html(&primary.name),
        platform = escape_html(&platform_label(&primary.platform)),
        os = escape_html(&system.os),
        running = format_duration(primary.running_time),
        sent = primary.messages.send_count(),
        received = primary.messages.receive_count(),
        cpu = gauge("CPU", percent(system.cpu.usage), None),
        ram = gauge("RAM", percent(Some(system.memory.percentage)), Some(&system.memory)),
        swap = gauge("SWAP", percent(Some(system.swap.percentage)), Some(&system.swap)),
        host_version = escape_html(&system.host_version),
        plugin_version = escape_html(&system.plugin_version),
    );
    Ok(html)
}

fn bot_tab(bot: &BotInfo, active: bool) -> String {
    let status = status_descriptor(bot.status);
    let ring = if active { "outline: 2px solid #1e66f5;" } else { "" };
    format!(
        r#"<div title="{name} ({platform})"><img class="avatar" width="48" height="48" style="{ring}" src="{avatar}" alt="{alt}"><span class="dot" style="background: {color}"></span></div>"#,
        name = escape_html(&bot.name),
        platform = escape_html(&platform_label(&bot.platform)),
        ring = ring,
        avatar = escape_html(bot.avatar.as_deref().unwrap_or("")),
        alt = if bot.name.is_empty() { "Bot".to_string() } else { escape_html(&bot.name) },
        color = status.color,
    )
}

fn gauge(label: &str, pct: u32, usage: Option<&MemoryUsage>) -> String {
    let detail = usage
        .map(|u| format!("<div>{} / {}</div>", format_bytes(u.used), format_bytes(u.total)))
        .unwrap_or_default();
    format!(
        r#"<div><progress max="100" value="{pct}"></progress><div>{pct}%</div><div>{label}</div>{detail}</div>"#,
        pct = pct,
        label = label,
        detail = detail,
    )
}
