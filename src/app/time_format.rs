use chrono::{DateTime, TimeZone};

/// `02h05m` style countdown. Negative values mean the entry is active right now.
pub fn format_countdown(seconds: i64) -> String {
    if seconds < 0 {
        return "active".to_string();
    }

    format!("{:02}h{:02}m", seconds / 3600, (seconds % 3600) / 60)
}

pub fn format_remaining(seconds: i64) -> String {
    let abs_secs = seconds.unsigned_abs();
    let sign = if seconds < 0 { "-" } else { "" };
    format!(
        "{}{:02}:{:02}:{:02}",
        sign,
        abs_secs / 3600,
        (abs_secs % 3600) / 60,
        abs_secs % 60
    )
}

pub fn format_occurrence<Tz: TimeZone>(instant: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if instant.date_naive() == now.date_naive() {
        format!("today {}", instant.format("%H:%M"))
    } else {
        format!("{} {}", instant.format("%a"), instant.format("%H:%M"))
    }
}

pub fn truncate_label(value: &str, max_chars: usize) -> String {
    let count = value.chars().count();
    if count <= max_chars {
        return value.to_string();
    }

    if max_chars <= 3 {
        return value.chars().take(max_chars).collect();
    }

    let prefix: String = value.chars().take(max_chars - 3).collect();
    format!("{}...", prefix)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_format_countdown_floors_minutes() {
        assert_eq!(format_countdown(0), "00h00m");
        assert_eq!(format_countdown(59), "00h00m");
        assert_eq!(format_countdown(899), "00h14m");
        assert_eq!(format_countdown(4319), "01h11m");
        assert_eq!(format_countdown(86_399), "23h59m");
    }

    #[test]
    fn test_format_countdown_negative_is_active() {
        assert_eq!(format_countdown(-1), "active");
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(1259), "00:20:59");
        assert_eq!(format_remaining(-61), "-00:01:01");
    }

    #[test]
    fn test_format_occurrence_names_day() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 3, 14, 23, 11, 59).unwrap();
        let tomorrow = Utc.with_ymd_and_hms(2026, 3, 15, 11, 11, 59).unwrap();

        assert_eq!(format_occurrence(&later, &now), "today 23:11");
        assert_eq!(format_occurrence(&tomorrow, &now), "Sun 11:11");
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("make a fish", 20), "make a fish");
        assert_eq!(truncate_label("X11:11 make a fish", 10), "X11:11 ...");
        assert_eq!(truncate_label("fish", 2), "fi");
    }
}
