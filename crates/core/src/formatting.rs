use crate::schedule::split_clock;

/// Converts a 24-hour `HH:MM` string to `H:MM AM/PM`.
///
/// Strings that already carry an AM/PM marker are returned as-is, so applying
/// this twice gives the same result as applying it once. Anything that is not
/// a valid 24-hour time is also returned unchanged.
pub fn format_time_12h(time: &str) -> String {
    let upper = time.to_ascii_uppercase();
    if upper.contains("AM") || upper.contains("PM") {
        return time.to_string();
    }

    match split_clock(time.trim()) {
        Some((hour, minute)) if hour < 24 => {
            let meridiem = if hour < 12 { "AM" } else { "PM" };
            let display_hour = match hour % 12 {
                0 => 12,
                h => h,
            };
            format!("{}:{:02} {}", display_hour, minute, meridiem)
        }
        _ => time.to_string(),
    }
}
