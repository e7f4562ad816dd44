use std::time::Duration;
use unicode_segmentation::UnicodeSegmentation;

/// Truncates a given string to a specified maximum width, appending an ellipsis (`…`)
/// if the string exceeds the specified width. Handles Unicode grapheme clusters properly.
///
/// # Parameters
/// - `message`: The input string to be truncated.
/// - `max_width`: The maximum allowed display width of the string, including the space for the ellipsis.
///   Must be at least 2 to accommodate the ellipsis.
///
/// # Panics
/// Panics if `max_width` is less than 2.
///
/// # Examples
/// ```rust
/// use websentry::utils::truncate_message;
///
/// assert_eq!(truncate_message("https://example.com/a/long/path", 12), "https://exa…");
/// assert_eq!(truncate_message("short", 12), "short");
/// ```
pub fn truncate_message(message: &str, max_width: usize) -> String {
    assert!(
        max_width >= 2,
        "max_width must be at least 2 to accommodate the ellipsis"
    );

    let graphemes: Vec<&str> = message.graphemes(true).collect();

    if graphemes.len() > max_width {
        let truncated: String = graphemes[..max_width - 1].concat();
        format!("{}…", truncated)
    } else {
        message.to_string()
    }
}

/// Formats a duration the way it is written on the command line, e.g. `5s`,
/// `1m30s` or `250ms`.
///
/// ```rust
/// use std::time::Duration;
/// use websentry::utils::human_duration;
///
/// assert_eq!(human_duration(Duration::from_secs(90)), "1m30s");
/// assert_eq!(human_duration(Duration::from_millis(250)), "250ms");
/// ```
pub fn human_duration(duration: Duration) -> String {
    if duration.is_zero() {
        return "0s".to_string();
    }
    if duration < Duration::from_micros(1) {
        return format!("{}ns", duration.as_nanos());
    }
    if duration < Duration::from_millis(1) {
        let nanos = duration.as_nanos();
        return if nanos % 1000 == 0 {
            format!("{}µs", nanos / 1000)
        } else {
            format!("{:.3}µs", nanos as f64 / 1000.0)
        };
    }
    if duration < Duration::from_secs(1) {
        let micros = duration.as_micros();
        return if micros % 1000 == 0 {
            format!("{}ms", micros / 1000)
        } else {
            format!("{:.3}ms", duration.as_secs_f64() * 1000.0)
        };
    }

    let total = duration.as_secs();
    let (hours, minutes, seconds) = (total / 3600, total / 60 % 60, total % 60);
    let millis = duration.subsec_millis();

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    if seconds > 0 || millis > 0 {
        if millis > 0 {
            let fraction = format!("{:03}", millis);
            out.push_str(&format!("{seconds}.{}s", fraction.trim_end_matches('0')));
        } else {
            out.push_str(&format!("{seconds}s"));
        }
    }
    out
}

pub fn ms(duration: Duration) -> String {
    let milliseconds = duration.as_secs_f64() * 1000.0;
    format!("{milliseconds:.2}ms")
}

/// Content length as shown in reports; `-1` means the server did not send one.
pub fn bytes(content_length: i64) -> String {
    if content_length < 0 {
        "unknown".to_string()
    } else {
        format!("{content_length} bytes")
    }
}
