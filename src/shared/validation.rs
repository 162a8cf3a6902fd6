use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for store-hours fields (24-hour "HH:MM")
    /// - Valid: "09:00", "21:30", "00:00"
    /// - Invalid: "9:00", "24:00", "09:60", "09.00"
    pub static ref TIME_REGEX: Regex = Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_regex_valid() {
        assert!(TIME_REGEX.is_match("09:00"));
        assert!(TIME_REGEX.is_match("21:30"));
        assert!(TIME_REGEX.is_match("00:00"));
        assert!(TIME_REGEX.is_match("23:59"));
    }

    #[test]
    fn test_time_regex_invalid() {
        assert!(!TIME_REGEX.is_match("9:00")); // missing leading zero
        assert!(!TIME_REGEX.is_match("24:00")); // hour out of range
        assert!(!TIME_REGEX.is_match("09:60")); // minute out of range
        assert!(!TIME_REGEX.is_match("09.00")); // wrong separator
        assert!(!TIME_REGEX.is_match(""));
    }
}
