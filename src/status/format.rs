//! Formatting of artifact size descriptions.
//!
//! The description string is the only state this tool persists, and GitHub
//! stores it opaquely. Three shapes exist:
//!
//! - `"1,234 bytes"` when no baseline is known
//! - `"No change (1,234 bytes)"` when the baseline equals the current size
//! - `"+56 bytes (+4.54%) → 1,290 bytes"` when the sizes differ
//!
//! The percentage divides the delta by the *current* size, not the previous
//! one; changing that would desynchronize new statuses from descriptions
//! already stored on GitHub.

/// Formats a size description for the given current size and optional baseline.
///
/// A `previous` of `Some(0)` is a real baseline (a file that used to be empty)
/// and goes through the delta path; only `None` means "no baseline known".
///
/// # Examples
///
/// ```
/// use weigh_in::status::format_description;
///
/// assert_eq!(format_description(100, None), "100 bytes");
/// assert_eq!(format_description(100, Some(100)), "No change (100 bytes)");
/// assert_eq!(format_description(150, Some(100)), "+50 bytes (+33.33%) → 150 bytes");
/// ```
pub fn format_description(current: u64, previous: Option<u64>) -> String {
    let Some(previous) = previous else {
        return format!("{} bytes", group_digits(current));
    };

    let delta = current as i128 - previous as i128;
    if delta == 0 {
        return format!("No change ({} bytes)", group_digits(current));
    }

    // The percentage is informational only; the parse side reconstructs the
    // baseline from the exact delta substring.
    let pct = 100.0 * delta as f64 / current as f64;
    format!(
        "{} bytes ({:+.2}%) → {} bytes",
        group_signed(delta),
        pct,
        group_digits(current)
    )
}

/// Renders a non-negative integer with comma thousands separators.
fn group_digits(n: u64) -> String {
    insert_separators(&n.to_string())
}

/// Renders a signed delta with an explicit sign and comma separators.
fn group_signed(delta: i128) -> String {
    let sign = if delta < 0 { '-' } else { '+' };
    format!("{}{}", sign, insert_separators(&delta.unsigned_abs().to_string()))
}

fn insert_separators(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
