use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::Html,
};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::state::AppState;
use crate::features::listing::filter::{apply_filters_and_sort, paginate, SortOption};
use crate::features::navigation::menu_for;
use crate::features::session::{CurrentUser, SessionId};
use crate::gateway::ApiClient;
use crate::shared::constants::{
    is_valid_barangay, is_valid_category, BARANGAYS, CATEGORIES, LISTING_FETCH_WINDOW,
};
use crate::shared::templates::render_page;
use crate::shared::types::Business;

/// Query params for the directory grid.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub q: String,
    pub category: Option<String>,
    pub barangay: Option<String>,
    #[serde(default)]
    pub sort: SortOption,
    pub page: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BusinessCard {
    #[serde(flatten)]
    business: Business,
    favorite_count: Option<u64>,
}

/// Directory page. The backend is asked for one bounded window;
/// search, filters, sorting and pagination all run here over that
/// window.
pub async fn listing_page(
    State(state): State<AppState>,
    SessionId(sid): SessionId,
    CurrentUser(user): CurrentUser,
    Query(query): Query<ListingQuery>,
) -> Result<Html<String>> {
    // Unknown facet values come from stale links; drop them rather
    // than forwarding garbage to the backend.
    let category = query.category.as_deref().filter(|c| is_valid_category(c));
    let barangay = query.barangay.as_deref().filter(|b| is_valid_barangay(b));

    let window = state
        .api
        .list_businesses(sid, 1, LISTING_FETCH_WINDOW, category, barangay)
        .await?;

    let favorite_counts = if query.sort.needs_favorite_counts() {
        fetch_favorite_counts(&state.api, sid, &window.businesses).await
    } else {
        HashMap::new()
    };

    let filtered = apply_filters_and_sort(
        &window.businesses,
        &query.q,
        category,
        barangay,
        query.sort,
        &favorite_counts,
    );
    let page = paginate(&filtered, query.page.unwrap_or(1));

    let cards: Vec<BusinessCard> = page
        .items
        .iter()
        .map(|b| BusinessCard {
            business: b.clone(),
            favorite_count: favorite_counts.get(&b.id).copied(),
        })
        .collect();

    let categories: Vec<_> = CATEGORIES
        .iter()
        .map(|(slug, label)| json!({"slug": slug, "label": label}))
        .collect();

    let html = render_page(
        "businesses",
        json!({
            "user": user,
            "menu": menu_for(user.as_ref()),
            "businesses": cards,
            "categories": categories,
            "barangays": BARANGAYS,
            "search": query.q,
            "selectedCategory": category,
            "selectedBarangay": barangay,
            "sort": sort_key(query.sort),
            "currentPage": page.current,
            "totalPages": page.total_pages,
            "totalItems": page.total_items,
        }),
    )?;
    Ok(Html(html))
}

/// One count request per business in the window, issued in parallel.
/// A failed count renders as zero rather than failing the page.
async fn fetch_favorite_counts(
    api: &ApiClient,
    sid: Uuid,
    businesses: &[Business],
) -> HashMap<i64, u64> {
    let lookups = businesses.iter().map(|b| {
        let id = b.id;
        async move { (id, api.favorite_count(sid, id).await.unwrap_or(0)) }
    });
    join_all(lookups).await.into_iter().collect()
}

fn sort_key(sort: SortOption) -> &'static str {
    match sort {
        SortOption::Alphabetical => "alphabetical",
        SortOption::Reverse => "reverse",
        SortOption::Newest => "newest",
        SortOption::Oldest => "oldest",
        SortOption::HighestFavorites => "highest-favorites",
        SortOption::LowestFavorites => "lowest-favorites",
    }
}
