//! Client-side filtering, sorting and pagination over a fetched
//! window of businesses. The backend is only asked for the window;
//! everything after that is pure array work, so the visible set is a
//! deterministic function of its inputs.

use std::collections::HashMap;

use serde::Deserialize;

use crate::shared::constants::LISTING_PAGE_SIZE;
use crate::shared::types::Business;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    Alphabetical,
    Reverse,
    #[default]
    Newest,
    Oldest,
    HighestFavorites,
    LowestFavorites,
}

impl SortOption {
    pub fn needs_favorite_counts(self) -> bool {
        matches!(self, SortOption::HighestFavorites | SortOption::LowestFavorites)
    }
}

/// Filter and order the fetched window. Search is a case-insensitive
/// substring match over name, description, category, location and
/// barangay; category and barangay are exact matches. All sorts are
/// stable, so equal keys keep their fetched order.
pub fn apply_filters_and_sort(
    businesses: &[Business],
    search: &str,
    category: Option<&str>,
    barangay: Option<&str>,
    sort: SortOption,
    favorite_counts: &HashMap<i64, u64>,
) -> Vec<Business> {
    let query = search.trim().to_lowercase();
    let mut filtered: Vec<Business> = businesses
        .iter()
        .filter(|b| query.is_empty() || matches_query(b, &query))
        .filter(|b| category.is_none_or(|c| b.category == c))
        .filter(|b| barangay.is_none_or(|br| b.barangay == br))
        .cloned()
        .collect();

    match sort {
        SortOption::Alphabetical => {
            filtered.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
        SortOption::Reverse => {
            filtered.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase()))
        }
        SortOption::Newest => filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOption::Oldest => filtered.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOption::HighestFavorites => filtered.sort_by(|a, b| {
            let count_a = favorite_counts.get(&a.id).copied().unwrap_or(0);
            let count_b = favorite_counts.get(&b.id).copied().unwrap_or(0);
            count_b.cmp(&count_a)
        }),
        SortOption::LowestFavorites => filtered.sort_by(|a, b| {
            let count_a = favorite_counts.get(&a.id).copied().unwrap_or(0);
            let count_b = favorite_counts.get(&b.id).copied().unwrap_or(0);
            count_a.cmp(&count_b)
        }),
    }

    filtered
}

fn matches_query(business: &Business, query: &str) -> bool {
    business.name.to_lowercase().contains(query)
        || business.description.to_lowercase().contains(query)
        || business.category.to_lowercase().contains(query)
        || business.location.to_lowercase().contains(query)
        || business.barangay.to_lowercase().contains(query)
}

/// One page of the filtered result, 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current: u32,
    pub total_pages: u32,
    pub total_items: usize,
}

/// Slice out one grid page. An out-of-range page clamps to the last
/// page so stale pagination links never render an empty grid.
pub fn paginate<T: Clone>(items: &[T], page: u32) -> Page<T> {
    let per_page = LISTING_PAGE_SIZE;
    let total_items = items.len();
    let total_pages = (total_items.div_ceil(per_page)).max(1) as u32;
    let current = page.clamp(1, total_pages);

    let start = (current as usize - 1) * per_page;
    let end = (start + per_page).min(total_items);
    let items = if start < total_items {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };

    Page {
        items,
        current,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn business(id: i64, name: &str, category: &str, barangay: &str, day: u32) -> Business {
        Business {
            id,
            name: name.to_string(),
            description: format!("{name} description"),
            category: category.to_string(),
            barangay: barangay.to_string(),
            location: format!("{name} St."),
            lat: None,
            lng: None,
            contact_info: None,
            socials: None,
            cover_photo: None,
            gallery: Vec::new(),
            is_verified: true,
            open_time: None,
            close_time: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap(),
            updated_at: None,
            owner_id: "owner".to_string(),
            owner: None,
        }
    }

    fn sample() -> Vec<Business> {
        vec![
            business(1, "Kape Coffee House", "food-dining", "Poblacion", 3),
            business(2, "Metro Hardware", "retail-shops", "San Miguel", 1),
            business(3, "Coffee Corner", "food-dining", "San Miguel", 5),
            business(4, "Lechon Haus", "food-dining", "Poblacion", 2),
        ]
    }

    #[test]
    fn test_search_with_category_filter() {
        let all = sample();
        let result = apply_filters_and_sort(
            &all,
            "coffee",
            Some("food-dining"),
            None,
            SortOption::Newest,
            &HashMap::new(),
        );
        let names: Vec<&str> = result.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Coffee Corner", "Kape Coffee House"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let all = sample();
        let result =
            apply_filters_and_sort(&all, "LECHON", None, None, SortOption::Newest, &HashMap::new());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 4);
    }

    #[test]
    fn test_barangay_filter_is_exact() {
        let all = sample();
        let result = apply_filters_and_sort(
            &all,
            "",
            None,
            Some("San Miguel"),
            SortOption::Alphabetical,
            &HashMap::new(),
        );
        let names: Vec<&str> = result.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Coffee Corner", "Metro Hardware"]);
    }

    #[test]
    fn test_alphabetical_sort_ignores_case() {
        let all = vec![
            business(1, "Banana Stand", "food-dining", "Poblacion", 1),
            business(2, "apple shop", "retail-shops", "Poblacion", 2),
        ];
        let asc =
            apply_filters_and_sort(&all, "", None, None, SortOption::Alphabetical, &HashMap::new());
        let names: Vec<&str> = asc.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["apple shop", "Banana Stand"]);

        let desc =
            apply_filters_and_sort(&all, "", None, None, SortOption::Reverse, &HashMap::new());
        let names: Vec<&str> = desc.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Banana Stand", "apple shop"]);
    }

    #[test]
    fn test_favorite_count_sorts() {
        let all = sample();
        let counts = HashMap::from([(1, 10), (2, 3), (3, 7)]);
        let highest = apply_filters_and_sort(
            &all,
            "",
            None,
            None,
            SortOption::HighestFavorites,
            &counts,
        );
        let ids: Vec<i64> = highest.iter().map(|b| b.id).collect();
        // Business 4 has no count and sorts as zero.
        assert_eq!(ids, vec![1, 3, 2, 4]);

        let lowest =
            apply_filters_and_sort(&all, "", None, None, SortOption::LowestFavorites, &counts);
        let ids: Vec<i64> = lowest.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_output_is_deterministic() {
        let all = sample();
        let first =
            apply_filters_and_sort(&all, "", None, None, SortOption::Oldest, &HashMap::new());
        let second =
            apply_filters_and_sort(&all, "", None, None, SortOption::Oldest, &HashMap::new());
        assert_eq!(
            first.iter().map(|b| b.id).collect::<Vec<_>>(),
            second.iter().map(|b| b.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_pagination_page_counts() {
        let items: Vec<i32> = (0..13).collect();
        let page = paginate(&items, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 6);

        let last = paginate(&items, 3);
        assert_eq!(last.items.len(), 1);

        let exact: Vec<i32> = (0..12).collect();
        let last_full = paginate(&exact, 2);
        assert_eq!(last_full.total_pages, 2);
        assert_eq!(last_full.items.len(), 6);
    }

    #[test]
    fn test_pagination_clamps_out_of_range() {
        let items: Vec<i32> = (0..7).collect();
        let page = paginate(&items, 99);
        assert_eq!(page.current, 2);
        assert_eq!(page.items, vec![6]);

        let empty: Vec<i32> = Vec::new();
        let page = paginate(&empty, 4);
        assert_eq!(page.current, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }
}
