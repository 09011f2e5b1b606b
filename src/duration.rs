use chrono::Duration;

/// Parses a grace period like `90s`, `30m`, `12h` or `7d`. A bare `0` is
/// accepted as the zero duration.
pub fn parse(input: &str) -> Result<Duration, String> {
    let trimmed = input.trim();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, unit) = trimmed.split_at(digits_end);

    let value: i64 = digits
        .parse()
        .map_err(|_| format!("invalid duration {input:?}: expected <number><unit>"))?;

    let duration = match unit {
        "" if value == 0 => Some(Duration::zero()),
        "" => return Err(format!("duration {input:?} is missing a unit (s, m, h or d)")),
        "s" => Duration::try_seconds(value),
        "m" => Duration::try_minutes(value),
        "h" => Duration::try_hours(value),
        "d" => Duration::try_days(value),
        _ => return Err(format!("unknown duration unit {unit:?} in {input:?}")),
    };

    duration.ok_or_else(|| format!("duration {input:?} is out of range"))
}
