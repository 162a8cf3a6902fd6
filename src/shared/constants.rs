/// Businesses fetched per listing request; filtering, sorting and
/// pagination all run locally over this window.
pub const LISTING_FETCH_WINDOW: u32 = 100;

/// Businesses shown per listing page (3x2 grid).
pub const LISTING_PAGE_SIZE: usize = 6;

/// Maximum length of a top-level discussion post.
pub const MAX_DISCUSSION_LEN: usize = 1000;

/// Maximum length of a reply.
pub const MAX_REPLY_LEN: usize = 500;

/// Reply affordances and children are suppressed at this nesting depth.
pub const MAX_NESTING_DEPTH: usize = 5;

/// Minimum accepted password length on the register form.
pub const MIN_PASSWORD_LEN: u64 = 8;

/// Seconds the post-login success page is shown before redirecting.
pub const LOGIN_REDIRECT_DELAY_SECS: u32 = 2;

/// Category slugs accepted by the backend, with their display labels.
pub const CATEGORIES: &[(&str, &str)] = &[
    ("food-dining", "Food & Dining"),
    ("transportation", "Transportation"),
    ("accommodation", "Accommodation"),
    ("retail-shops", "Retail Shops"),
    ("services", "Services"),
    ("entertainment", "Entertainment"),
];

/// Barangays of Cordova, Cebu, used as the location filter facet.
pub const BARANGAYS: &[&str] = &[
    "Alegria",
    "Bangbang",
    "Buagsong",
    "Catarman",
    "Cogon",
    "Dapitan",
    "Day-as",
    "Gabi",
    "Gilutongan",
    "Ibabao",
    "Pilipog",
    "Poblacion",
    "San Miguel",
];

pub fn is_valid_category(slug: &str) -> bool {
    CATEGORIES.iter().any(|(value, _)| *value == slug)
}

pub fn category_label(slug: &str) -> &str {
    CATEGORIES
        .iter()
        .find(|(value, _)| *value == slug)
        .map(|(_, label)| *label)
        .unwrap_or(slug)
}

pub fn is_valid_barangay(name: &str) -> bool {
    BARANGAYS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_lookup() {
        assert!(is_valid_category("food-dining"));
        assert!(!is_valid_category("food_dining"));
        assert_eq!(category_label("retail-shops"), "Retail Shops");
        // Unknown slugs fall back to the raw value
        assert_eq!(category_label("mystery"), "mystery");
    }

    #[test]
    fn test_barangay_lookup() {
        assert!(is_valid_barangay("Poblacion"));
        assert!(!is_valid_barangay("poblacion"));
    }
}
