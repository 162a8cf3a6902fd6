use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contact details attached to a business. The backend stores either a
/// JSON object or a bare phone string in the same column.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactInfo {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Social links attached to a business.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Socials {
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl Socials {
    pub fn is_empty(&self) -> bool {
        self.instagram.is_none()
            && self.facebook.is_none()
            && self.twitter.is_none()
            && self.website.is_none()
    }
}

/// Parse the contact-info column: JSON object, or a bare phone number.
pub fn parse_contact_info(raw: Option<&str>) -> ContactInfo {
    let Some(raw) = raw else {
        return ContactInfo::default();
    };
    match serde_json::from_str::<ContactInfo>(raw) {
        Ok(info) => info,
        Err(_) => ContactInfo {
            phone: Some(raw.to_string()),
            email: None,
        },
    }
}

/// Parse the socials column; malformed payloads yield empty links.
pub fn parse_socials(raw: Option<&serde_json::Value>) -> Socials {
    let Some(raw) = raw else {
        return Socials::default();
    };
    match raw {
        serde_json::Value::String(s) => serde_json::from_str(s).unwrap_or_default(),
        other => serde_json::from_value(other.clone()).unwrap_or_default(),
    }
}

/// Relative timestamp as shown next to discussions ("5 minutes ago").
pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{} minute{} ago", minutes, plural(minutes));
    }
    if hours < 24 {
        return format!("{} hour{} ago", hours, plural(hours));
    }
    if days < 7 {
        return format!("{} day{} ago", days, plural(days));
    }
    timestamp.format("%b %-d, %Y").to_string()
}

fn plural(n: i64) -> &'static str {
    if n > 1 {
        "s"
    } else {
        ""
    }
}

/// Format open/close times as a 12-hour range. Accepts "09:00" or "0900";
/// anything unparseable falls back to the raw pair.
pub fn format_store_hours(open: Option<&str>, close: Option<&str>) -> String {
    let (Some(open), Some(close)) = (open, close) else {
        return "Hours not specified".to_string();
    };
    match (to_12_hour(open), to_12_hour(close)) {
        (Some(o), Some(c)) => format!("{} - {}", o, c),
        _ => format!("{} - {}", open, close),
    }
}

fn to_12_hour(raw: &str) -> Option<String> {
    let normalized = if raw.contains(':') {
        raw.to_string()
    } else if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}:{}", &raw[..2], &raw[2..])
    } else {
        return None;
    };
    let (hour, minute) = normalized.split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let hour12 = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    Some(format!("{}:{:02} {}", hour12, minute, meridiem))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_contact_info_json_and_bare_phone() {
        let json = parse_contact_info(Some(r#"{"phone":"0917","email":"a@b.ph"}"#));
        assert_eq!(json.phone.as_deref(), Some("0917"));
        assert_eq!(json.email.as_deref(), Some("a@b.ph"));

        let bare = parse_contact_info(Some("0917 123 4567"));
        assert_eq!(bare.phone.as_deref(), Some("0917 123 4567"));
        assert!(bare.email.is_none());

        assert_eq!(parse_contact_info(None), ContactInfo::default());
    }

    #[test]
    fn test_socials_object_string_and_garbage() {
        let object = serde_json::json!({"facebook": "fb.com/x"});
        assert_eq!(
            parse_socials(Some(&object)).facebook.as_deref(),
            Some("fb.com/x")
        );

        let as_string = serde_json::Value::String(r#"{"website":"x.ph"}"#.into());
        assert_eq!(
            parse_socials(Some(&as_string)).website.as_deref(),
            Some("x.ph")
        );

        let garbage = serde_json::Value::String("not json".into());
        assert!(parse_socials(Some(&garbage)).is_empty());
    }

    #[test]
    fn test_relative_time_buckets() {
        let now = Utc::now();
        assert_eq!(relative_time(now, now), "Just now");
        assert_eq!(relative_time(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(relative_time(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(relative_time(now - Duration::hours(3), now), "3 hours ago");
        assert_eq!(relative_time(now - Duration::days(2), now), "2 days ago");
        // A week or older falls back to a date
        let old = relative_time(now - Duration::days(30), now);
        assert!(old.contains(','), "expected a date, got {old}");
    }

    #[test]
    fn test_store_hours() {
        assert_eq!(
            format_store_hours(Some("09:00"), Some("17:30")),
            "9:00 AM - 5:30 PM"
        );
        assert_eq!(
            format_store_hours(Some("0900"), Some("2100")),
            "9:00 AM - 9:00 PM"
        );
        assert_eq!(
            format_store_hours(Some("00:15"), Some("12:00")),
            "12:15 AM - 12:00 PM"
        );
        assert_eq!(format_store_hours(None, Some("17:00")), "Hours not specified");
        assert_eq!(
            format_store_hours(Some("whenever"), Some("late")),
            "whenever - late"
        );
        // Four bytes but not four ASCII digits must fall back, not slice
        assert_eq!(
            format_store_hours(Some("€1"), Some("17:00")),
            "€1 - 17:00"
        );
    }
}
