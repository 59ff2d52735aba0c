use chrono::NaiveTime;

const ACCEPTED_FORMATS: [&str; 4] = ["%I:%M %p", "%I:%M%p", "%H:%M", "%H:%M:%S"];

/// Normalize `h:mm AM/PM` or `HH:mm` input to `HH:mm`.
///
/// Input that matches none of the accepted forms is returned unchanged; the
/// server rejects it on submission.
pub fn to_24_hour(input: &str) -> String {
    let trimmed = input.trim();

    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .map(|time| time.format("%H:%M").to_string())
        .unwrap_or_else(|| input.to_string())
}
