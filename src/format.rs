use std::fmt;
use std::time::SystemTime;

use chrono::{DateTime, Local, TimeZone, Utc};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    const GB: u64 = 1024 * 1024 * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Host uptime, e.g. `3 days, 04 hrs, 05 mins`.
pub fn format_uptime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let days = hours / 24;
    let hours = hours % 24;

    if days > 0 {
        format!("{days} days, {hours:02} hrs, {minutes:02} mins")
    } else {
        format!("{hours:02} hrs, {minutes:02} mins")
    }
}

/// Process age, e.g. `1h2m5s`, `4m0s`, `12s`.
pub fn format_elapsed(seconds: u64) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    if h > 0 {
        format!("{h}h{m}m{s}s")
    } else if m > 0 {
        format!("{m}m{s}s")
    } else {
        format!("{s}s")
    }
}

/// Wall-clock time of day in the operator's local time zone, e.g. `14:03:27`.
pub fn format_clock(at: SystemTime) -> String {
    format_clock_in(at, &Local)
}

pub fn format_clock_in<Tz: TimeZone>(at: SystemTime, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    DateTime::<Utc>::from(at)
        .with_timezone(tz)
        .format("%H:%M:%S")
        .to_string()
}
