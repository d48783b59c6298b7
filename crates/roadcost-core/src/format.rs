//! Display formatting for amounts, counts and timestamps (en-IN conventions).

use chrono::{FixedOffset, Offset, Utc};

use crate::timestamp::ServiceTime;

pub const RUPEE_SIGN: char = '₹';

/// Offset used when none is configured: Indian Standard Time.
pub const IST_OFFSET_MINUTES: i32 = 5 * 60 + 30;

/// Formats an amount as Indian Rupees with no decimals and Indian digit
/// grouping: the last three digits, then groups of two (`₹12,34,567`).
///
/// Halves round away from zero.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{RUPEE_SIGN}{}", group_indian(&digits))
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

pub fn format_intervention_count(count: u64) -> String {
    format!("{count} intervention(s) processed")
}

/// Builds the display offset, falling back to IST for out-of-range values.
pub fn display_offset(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes.saturating_mul(60))
        .or_else(|| FixedOffset::east_opt(IST_OFFSET_MINUTES * 60))
        .unwrap_or(Utc.fix())
}

/// Formats a timestamp the way en-IN locale strings read: `1/1/2024, 3:30:00 pm`.
///
/// A naive timestamp is already wall-clock time and is shown as-is.
pub fn format_local_timestamp(timestamp: impl Into<ServiceTime>, offset: FixedOffset) -> String {
    timestamp
        .into()
        .resolve(offset)
        .with_timezone(&offset)
        .format("%-d/%-m/%Y, %-I:%M:%S %P")
        .to_string()
}
