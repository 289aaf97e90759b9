use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EndTime {
    pub end: NaiveTime,
    /// True when the session runs past midnight.
    pub rollover: bool,
}

/// Shifts `start` by whole hours, wrapping at midnight. Minutes and seconds
/// carry through unchanged.
pub fn compute_end_time(start: NaiveTime, duration_hours: u32) -> EndTime {
    let unwrapped = u64::from(start.hour()) + u64::from(duration_hours);
    let hour = (unwrapped % 24) as u32;
    EndTime {
        end: start.with_hour(hour).unwrap_or(start),
        rollover: unwrapped >= 24,
    }
}

pub fn compute_cost(hourly_rate: u32, duration_hours: u32) -> u64 {
    u64::from(hourly_rate) * u64::from(duration_hours)
}

/// "10:00 AM"
pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// "1 June 2025"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// "10:00 PM - 2:00 AM (+1 day)"
pub fn format_time_range(start: NaiveTime, duration_hours: u32) -> String {
    let end = compute_end_time(start, duration_hours);
    let suffix = if end.rollover { " (+1 day)" } else { "" };
    format!(
        "{} - {}{suffix}",
        format_time_of_day(start),
        format_time_of_day(end.end)
    )
}

/// Rupee amount with Indian digit grouping: "₹1,50,000".
pub fn format_rupees(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{digits}");
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();

    format!("₹{},{tail}", groups.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M:%S").unwrap()
    }

    #[test]
    fn test_end_time_same_day() {
        let end = compute_end_time(t("10:00:00"), 2);
        assert_eq!(end.end, t("12:00:00"));
        assert!(!end.rollover);
    }

    #[test]
    fn test_end_time_wraps_past_midnight() {
        let end = compute_end_time(t("22:00:00"), 4);
        assert_eq!(end.end, t("02:00:00"));
        assert!(end.rollover);
    }

    #[test]
    fn test_end_time_exactly_midnight_is_rollover() {
        let end = compute_end_time(t("20:00:00"), 4);
        assert_eq!(end.end, t("00:00:00"));
        assert!(end.rollover);
    }

    #[test]
    fn test_end_time_keeps_minutes_and_seconds() {
        let end = compute_end_time(t("09:45:30"), 3);
        assert_eq!(end.end, t("12:45:30"));
    }

    #[test]
    fn test_end_time_for_every_start_hour() {
        for hour in 0..24u32 {
            for duration in 1..=24u32 {
                let start = NaiveTime::from_hms_opt(hour, 0, 0).unwrap();
                let end = compute_end_time(start, duration);
                assert_eq!(end.end.hour(), (hour + duration) % 24);
                assert_eq!(end.rollover, hour + duration >= 24);
            }
        }
    }

    #[test]
    fn test_compute_cost() {
        assert_eq!(compute_cost(800, 3), 2400);
        assert_eq!(compute_cost(1500, 2), 3000);
        assert_eq!(compute_cost(0, 5), 0);
        assert_eq!(compute_cost(u32::MAX, 2), u64::from(u32::MAX) * 2);
    }

    #[test]
    fn test_format_time_of_day() {
        assert_eq!(format_time_of_day(t("10:00:00")), "10:00 AM");
        assert_eq!(format_time_of_day(t("00:30:00")), "12:30 AM");
        assert_eq!(format_time_of_day(t("12:00:00")), "12:00 PM");
        assert_eq!(format_time_of_day(t("22:15:00")), "10:15 PM");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(format_date(date), "1 June 2025");
    }

    #[test]
    fn test_format_time_range() {
        assert_eq!(format_time_range(t("10:00:00"), 2), "10:00 AM - 12:00 PM");
        assert_eq!(
            format_time_range(t("22:00:00"), 4),
            "10:00 PM - 2:00 AM (+1 day)"
        );
    }

    #[test]
    fn test_format_rupees() {
        assert_eq!(format_rupees(0), "₹0");
        assert_eq!(format_rupees(500), "₹500");
        assert_eq!(format_rupees(3000), "₹3,000");
        assert_eq!(format_rupees(150000), "₹1,50,000");
        assert_eq!(format_rupees(12345678), "₹1,23,45,678");
    }
}
