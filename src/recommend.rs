use crate::models::{
    CatalogItem, MediaType, RecommendationOutcome, RecommendationResult, SearchQuery,
};
use crate::tmdb::TmdbApi;
use anyhow::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// Resolves the query to its first search hit and appends that hit's
/// recommendations. Both failure kinds are kept apart here; see
/// [`fetch_recommendations`] for the collapsed form.
pub async fn fetch_outcome(api: &dyn TmdbApi, query: &SearchQuery) -> RecommendationOutcome {
    match lookup(api, query).await {
        Ok(Some(items)) => RecommendationOutcome::Found(items),
        Ok(None) => {
            info!("{} not found", query.media_type.not_found_label());
            RecommendationOutcome::NotFound
        }
        Err(e) => {
            error!("Error fetching data: {:#}", e);
            RecommendationOutcome::TransportError(format!("{:#}", e))
        }
    }
}

/// Same flow as [`fetch_outcome`], but a missing match and a failed call both
/// come back as an empty list.
pub async fn fetch_recommendations(
    api: &dyn TmdbApi,
    query: &SearchQuery,
) -> RecommendationResult {
    fetch_outcome(api, query).await.into_items()
}

async fn lookup(api: &dyn TmdbApi, query: &SearchQuery) -> Result<Option<Vec<CatalogItem>>> {
    let mut hits = api.search(query.media_type, &query.title).await?;
    if hits.is_empty() {
        return Ok(None);
    }
    let matched = hits.swap_remove(0);
    let id = matched.id_string();
    debug!(
        tmdb_id = %id,
        title = %matched.display_title(),
        "Matched '{}'",
        query.title
    );
    let recommended = api.recommendations(query.media_type, &id).await?;

    let mut items = Vec::with_capacity(recommended.len() + 1);
    items.push(matched);
    items.extend(recommended);
    Ok(Some(items))
}

/// What the page currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchView {
    pub media_type: MediaType,
    pub title: String,
    pub items: RecommendationResult,
}

/// Owner of the visible search state. Every submit takes a fresh token and
/// only the newest token may write its result, so a slow early request cannot
/// clobber a later one.
#[derive(Debug, Default)]
pub struct SearchController {
    issued: AtomicU64,
    view: Mutex<SearchView>,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> SearchView {
        self.view.lock().await.clone()
    }

    /// Runs the fetch for `query` and reports whether its result made it onto
    /// the page.
    pub async fn submit(&self, api: &dyn TmdbApi, query: SearchQuery) -> bool {
        // Tokens are taken under the view lock so the form fields are always
        // written in token order.
        let token = {
            let mut view = self.view.lock().await;
            let token = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            view.media_type = query.media_type;
            view.title = query.title.clone();
            token
        };

        let outcome = fetch_outcome(api, &query).await;

        let mut view = self.view.lock().await;
        if token != self.issued.load(Ordering::SeqCst) {
            debug!(token, "Discarding stale result for '{}'", query.title);
            return false;
        }
        view.items = outcome.into_items();
        true
    }
}
