use crate::error::ApiError;
use crate::media::{ContentSummary, MediaType, ResultEnvelope};
use crate::query::{Category, FilterSelection, ListSource, SortKey, TvStatus};

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error(String),
}

/// A list fetch the UI layer should run, then hand back to
/// [`PageController::resolve`] with the same `seq`.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub seq: u64,
    pub source: ListSource,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageStats {
    pub total_results: u32,
    pub average_rating: Option<f32>,
    pub most_recent_year: Option<i32>,
    pub top_rated_title: Option<String>,
}

impl PageStats {
    fn from_envelope(envelope: &ResultEnvelope) -> Self {
        let items = &envelope.items;
        let average_rating = if items.is_empty() {
            None
        } else {
            Some(items.iter().map(|i| i.rating).sum::<f32>() / items.len() as f32)
        };
        let top_rated_title = items
            .iter()
            .max_by(|a, b| a.rating.total_cmp(&b.rating))
            .map(|i| i.title.clone());
        Self {
            total_results: envelope.total_results,
            average_rating,
            most_recent_year: items.iter().filter_map(ContentSummary::year).max(),
            top_rated_title,
        }
    }
}

#[derive(Debug, Clone)]
struct SearchOverlay {
    query: String,
    page: u32,
    phase: Phase,
    envelope: ResultEnvelope,
    pending: Option<u64>,
}

/// Browse state for one list page: the category or discover listing, the
/// active filters and an optional search overlay on top.
#[derive(Debug, Clone)]
pub struct PageController {
    media: MediaType,
    category: Category,
    base_filters: FilterSelection,
    filters: FilterSelection,
    phase: Phase,
    envelope: ResultEnvelope,
    pending: Option<u64>,
    search: Option<SearchOverlay>,
    last_seq: u64,
    scroll_to_top: bool,
}

impl PageController {
    pub fn new(media: MediaType, category: Category) -> Self {
        let category = if Category::for_media(media).contains(&category) {
            category
        } else {
            Category::Trending
        };
        Self::with_base(media, category, FilterSelection::default())
    }

    /// Discover listing pinned to one genre. Clearing filters keeps the pin.
    pub fn for_genre(media: MediaType, genre_id: u64) -> Self {
        Self::with_base(media, Category::Trending, FilterSelection::with_genre(genre_id))
    }

    fn with_base(media: MediaType, category: Category, base_filters: FilterSelection) -> Self {
        Self {
            media,
            category,
            filters: base_filters.clone(),
            base_filters,
            phase: Phase::Idle,
            envelope: ResultEnvelope::empty(),
            pending: None,
            search: None,
            last_seq: 0,
            scroll_to_top: false,
        }
    }

    /// Starts numbering requests after `seq`, so responses addressed to a
    /// controller this one replaced can never match.
    pub fn continuing_from(mut self, seq: u64) -> Self {
        self.last_seq = self.last_seq.max(seq);
        self
    }

    pub fn last_seq(&self) -> u64 {
        self.last_seq
    }

    pub fn media(&self) -> MediaType {
        self.media
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    /// `true` while the listing is driven by discover rather than a category.
    pub fn is_discover(&self) -> bool {
        self.filters.has_active_filters()
    }

    /// Whether the user changed any filter from the page's starting point.
    pub fn has_user_filters(&self) -> bool {
        let mut filters = self.filters.clone();
        filters.page = self.base_filters.page;
        filters != self.base_filters
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_some()
    }

    pub fn search_query(&self) -> Option<&str> {
        self.search.as_ref().map(|s| s.query.as_str())
    }

    /// Phase of whatever is on screen: the search overlay if one is active.
    pub fn phase(&self) -> &Phase {
        match &self.search {
            Some(search) => &search.phase,
            None => &self.phase,
        }
    }

    pub fn envelope(&self) -> &ResultEnvelope {
        match &self.search {
            Some(search) => &search.envelope,
            None => &self.envelope,
        }
    }

    pub fn current_page(&self) -> u32 {
        match &self.search {
            Some(search) => search.page,
            None => self.filters.page,
        }
    }

    pub fn total_pages(&self) -> u32 {
        self.envelope().total_pages
    }

    pub fn stats(&self) -> PageStats {
        PageStats::from_envelope(self.envelope())
    }

    /// Returns the pending scroll-to-top effect and clears it.
    pub fn take_scroll_to_top(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_top)
    }

    fn next_seq(&mut self) -> u64 {
        self.last_seq += 1;
        self.last_seq
    }

    fn listing_source(&self) -> ListSource {
        if self.filters.has_active_filters() {
            ListSource::Discover {
                media: self.media,
                filters: self.filters.clone(),
            }
        } else {
            ListSource::Category {
                media: self.media,
                category: self.category,
                page: self.filters.page,
            }
        }
    }

    /// Enters `Loading` for the listing and returns its request.
    pub fn load(&mut self) -> FetchRequest {
        let seq = self.next_seq();
        self.pending = Some(seq);
        self.phase = Phase::Loading;
        FetchRequest {
            seq,
            source: self.listing_source(),
        }
    }

    fn load_search(&mut self) -> Option<FetchRequest> {
        if self.search.is_none() {
            return None;
        }
        let seq = self.next_seq();
        let media = self.media;
        let search = self.search.as_mut()?;
        search.pending = Some(seq);
        search.phase = Phase::Loading;
        Some(FetchRequest {
            seq,
            source: ListSource::Search {
                media,
                query: search.query.clone(),
                page: search.page,
            },
        })
    }

    /// Re-issues the request behind the current view.
    pub fn retry(&mut self) -> FetchRequest {
        match self.load_search() {
            Some(request) => request,
            None => self.load(),
        }
    }

    /// Moves to `page` if it lies within `[1, total_pages]`. Out of range
    /// pages leave the state untouched and produce no request.
    pub fn change_page(&mut self, page: u32) -> Option<FetchRequest> {
        if page < 1 || page > self.total_pages() {
            tracing::debug!(page, total = self.total_pages(), "page out of range");
            return None;
        }

        let request = match self.search.as_mut() {
            Some(search) => {
                search.page = page;
                self.load_search()
            }
            None => {
                self.filters.page = page;
                Some(self.load())
            }
        };
        self.scroll_to_top = request.is_some();
        request
    }

    /// Listing changes made while a search is showing end the search, so
    /// the listing they load is the one on screen.
    fn dismiss_search(&mut self) {
        if let Some(search) = self.search.take() {
            tracing::debug!(query = %search.query, "search dismissed by listing change");
        }
    }

    pub fn toggle_genre(&mut self, genre_id: u64) -> FetchRequest {
        self.dismiss_search();
        self.filters.toggle_genre(genre_id);
        self.filters.page = 1;
        self.load()
    }

    fn apply_filter(&mut self, change: impl FnOnce(&mut FilterSelection)) -> Option<FetchRequest> {
        let before = self.filters.clone();
        change(&mut self.filters);
        if self.filters == before {
            return None;
        }
        self.dismiss_search();
        self.filters.page = 1;
        Some(self.load())
    }

    pub fn set_year(&mut self, year: Option<i32>) -> Option<FetchRequest> {
        self.apply_filter(|f| f.year = year)
    }

    /// Ratings are clamped to `[0, 10]`.
    pub fn set_min_rating(&mut self, rating: Option<f32>) -> Option<FetchRequest> {
        let rating = rating.map(|r| r.clamp(0.0, 10.0));
        self.apply_filter(|f| f.min_rating = rating)
    }

    pub fn set_sort(&mut self, sort_key: SortKey) -> Option<FetchRequest> {
        self.apply_filter(|f| f.sort_key = sort_key)
    }

    pub fn set_status(&mut self, status: Option<TvStatus>) -> Option<FetchRequest> {
        self.apply_filter(|f| f.status = status)
    }

    pub fn set_network(&mut self, network: Option<u32>) -> Option<FetchRequest> {
        self.apply_filter(|f| f.network = network)
    }

    /// Resets every filter and the page in a single transition.
    pub fn clear_filters(&mut self) -> FetchRequest {
        self.dismiss_search();
        self.filters = self.base_filters.clone();
        self.load()
    }

    /// Makes `category` the driver of the listing, dropping any filters.
    pub fn switch_category(&mut self, category: Category) -> FetchRequest {
        self.dismiss_search();
        self.category = category;
        self.filters = self.base_filters.clone();
        self.load()
    }

    /// A non-empty query shows search results on top of the listing. An
    /// empty one removes the overlay and shows the listing as it was, or
    /// loads it if it was never fetched.
    pub fn set_search_query(&mut self, query: &str) -> Option<FetchRequest> {
        let query = query.trim();
        if query.is_empty() {
            self.search = None;
            if self.phase == Phase::Idle {
                return Some(self.load());
            }
            return None;
        }
        if self.search_query() == Some(query) {
            return None;
        }
        self.search = Some(SearchOverlay {
            query: query.to_string(),
            page: 1,
            phase: Phase::Idle,
            envelope: ResultEnvelope::empty(),
            pending: None,
        });
        self.load_search()
    }

    /// Stores the outcome of a request. Responses to superseded requests are
    /// dropped; returns whether the result was applied.
    pub fn resolve(&mut self, seq: u64, result: Result<ResultEnvelope, ApiError>) -> bool {
        if self.pending == Some(seq) {
            self.pending = None;
            apply_result(&mut self.phase, &mut self.envelope, result);
            return true;
        }
        if let Some(search) = self.search.as_mut() {
            if search.pending == Some(seq) {
                search.pending = None;
                apply_result(&mut search.phase, &mut search.envelope, result);
                return true;
            }
        }
        tracing::debug!(seq, "discarding stale list response");
        false
    }
}

fn apply_result(
    phase: &mut Phase,
    envelope: &mut ResultEnvelope,
    result: Result<ResultEnvelope, ApiError>,
) {
    match result {
        Ok(loaded) => {
            *envelope = loaded;
            *phase = Phase::Success;
        }
        Err(error) => {
            tracing::warn!(%error, "list request failed");
            envelope.items.clear();
            *phase = Phase::Error(error.user_message());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item(id: u64, title: &str, rating: f32, year: i32) -> ContentSummary {
        ContentSummary {
            id,
            media_type: MediaType::Movie,
            title: title.to_string(),
            poster_path: None,
            backdrop_path: None,
            rating,
            release_date: NaiveDate::from_ymd_opt(year, 1, 1),
            overview: String::new(),
            genre_ids: Vec::new(),
        }
    }

    fn envelope(page: u32, total_pages: u32) -> ResultEnvelope {
        ResultEnvelope {
            items: vec![item(page as u64, "Item", 7.0, 2020)],
            total_pages,
            total_results: total_pages * 20,
            current_page: page,
        }
    }

    fn loaded(total_pages: u32) -> PageController {
        let mut controller = PageController::new(MediaType::Movie, Category::Trending);
        let request = controller.load();
        assert!(controller.resolve(request.seq, Ok(envelope(1, total_pages))));
        controller
    }

    #[test]
    fn test_load_enters_loading_then_success() {
        let mut controller = PageController::new(MediaType::Movie, Category::Popular);
        assert_eq!(controller.phase(), &Phase::Idle);

        let request = controller.load();
        assert_eq!(controller.phase(), &Phase::Loading);
        assert_eq!(
            request.source,
            ListSource::Category {
                media: MediaType::Movie,
                category: Category::Popular,
                page: 1,
            }
        );

        controller.resolve(request.seq, Ok(envelope(1, 3)));
        assert_eq!(controller.phase(), &Phase::Success);
        assert_eq!(controller.total_pages(), 3);
    }

    #[test]
    fn test_error_clears_items_and_stores_message() {
        let mut controller = loaded(5);

        let request = controller.change_page(2).unwrap();
        controller.resolve(request.seq, Err(ApiError::Network(String::from("down"))));

        assert_eq!(
            controller.phase(),
            &Phase::Error(ApiError::Network(String::new()).user_message())
        );
        assert!(controller.envelope().items.is_empty());
    }

    #[test]
    fn test_change_page_within_range_yields_one_request() {
        for page in 1..=5 {
            let mut controller = loaded(5);

            let request = controller.change_page(page);

            assert_eq!(request.map(|r| r.source.page()), Some(page));
            assert_eq!(controller.current_page(), page);
            assert!(controller.take_scroll_to_top());
            assert!(!controller.take_scroll_to_top());
        }
    }

    #[test]
    fn test_change_page_past_last_page_is_ignored() {
        let mut controller = loaded(5);
        let last = controller.change_page(5).unwrap();
        controller.resolve(last.seq, Ok(envelope(5, 5)));
        controller.take_scroll_to_top();
        let before_filters = controller.filters().clone();
        let before_phase = controller.phase().clone();

        let request = controller.change_page(6);

        assert!(request.is_none());
        assert_eq!(controller.filters(), &before_filters);
        assert_eq!(controller.phase(), &before_phase);
        assert_eq!(controller.current_page(), 5);
        assert!(!controller.take_scroll_to_top());
    }

    #[test]
    fn test_change_page_zero_is_ignored() {
        let mut controller = loaded(5);

        assert!(controller.change_page(0).is_none());
        assert_eq!(controller.current_page(), 1);
    }

    #[test]
    fn test_toggle_genre_round_trip_resets_page() {
        let mut controller = loaded(10);
        controller.change_page(4);
        let before = controller.filters().genre_ids.clone();

        let on = controller.toggle_genre(28);
        assert_eq!(controller.filters().page, 1);
        assert!(matches!(on.source, ListSource::Discover { .. }));

        controller.change_page(3);
        let off = controller.toggle_genre(28);

        assert_eq!(controller.filters().genre_ids, before);
        assert_eq!(controller.filters().page, 1);
        assert!(matches!(off.source, ListSource::Category { .. }));
    }

    #[test]
    fn test_filter_setters_reset_page() {
        let mut controller = loaded(10);
        controller.change_page(7);

        let request = controller.set_year(Some(2019)).unwrap();

        assert_eq!(controller.filters().page, 1);
        assert_eq!(request.source.page(), 1);
        assert!(controller.set_year(Some(2019)).is_none());
    }

    #[test]
    fn test_min_rating_is_clamped() {
        let mut controller = loaded(1);

        controller.set_min_rating(Some(12.5));
        assert_eq!(controller.filters().min_rating, Some(10.0));

        controller.set_min_rating(Some(-1.0));
        assert_eq!(controller.filters().min_rating, Some(0.0));
    }

    #[test]
    fn test_sort_alone_forces_discover() {
        let mut controller = loaded(1);

        let request = controller.set_sort(SortKey::Rating).unwrap();

        assert_eq!(request.source.path(), "discover/movie");
        assert!(controller.is_discover());
    }

    #[test]
    fn test_clear_filters_is_single_transition() {
        let mut controller = PageController::new(MediaType::Tv, Category::Popular);
        controller.toggle_genre(18);
        controller.set_status(Some(TvStatus::Ended));
        controller.set_network(Some(213));
        let last = controller.set_min_rating(Some(8.0)).unwrap();

        let cleared = controller.clear_filters();

        assert_eq!(cleared.seq, last.seq + 1);
        assert_eq!(controller.filters(), &FilterSelection::default());
        assert_eq!(
            cleared.source,
            ListSource::Category {
                media: MediaType::Tv,
                category: Category::Popular,
                page: 1,
            }
        );
    }

    #[test]
    fn test_switch_category_clears_filters() {
        let mut controller = loaded(10);
        controller.toggle_genre(28);
        controller.change_page(1);

        let request = controller.switch_category(Category::TopRated);

        assert_eq!(controller.category(), Category::TopRated);
        assert!(controller.filters().genre_ids.is_empty());
        assert_eq!(controller.filters().page, 1);
        assert_eq!(request.source.path(), "movie/top_rated");
        assert_eq!(request.source.page(), 1);
    }

    #[test]
    fn test_unknown_category_falls_back_to_trending() {
        let controller = PageController::new(MediaType::Tv, Category::Upcoming);

        assert_eq!(controller.category(), Category::Trending);
    }

    #[test]
    fn test_genre_pin_survives_clear() {
        let mut controller = PageController::for_genre(MediaType::Movie, 35);
        controller.toggle_genre(18);
        controller.set_year(Some(2001));

        let request = controller.clear_filters();

        assert_eq!(controller.filters(), &FilterSelection::with_genre(35));
        assert_eq!(request.source.path(), "discover/movie");
    }

    #[test]
    fn test_search_overlay_and_clear_restores_listing() {
        let mut controller = loaded(5);
        let listing = controller.envelope().clone();

        let request = controller.set_search_query("  matrix ").unwrap();
        assert_eq!(
            request.source,
            ListSource::Search {
                media: MediaType::Movie,
                query: String::from("matrix"),
                page: 1,
            }
        );
        controller.resolve(request.seq, Ok(envelope(1, 2)));
        assert!(controller.is_searching());
        assert_eq!(controller.total_pages(), 2);

        let cleared = controller.set_search_query("");

        assert!(cleared.is_none());
        assert!(!controller.is_searching());
        assert_eq!(controller.envelope(), &listing);
        assert_eq!(controller.phase(), &Phase::Success);
    }

    #[test]
    fn test_listing_changes_end_the_search() {
        let mut controller = loaded(5);
        let search = controller.set_search_query("dune").unwrap();

        let request = controller.switch_category(Category::TopRated);

        assert!(!controller.is_searching());
        assert_eq!(controller.phase(), &Phase::Loading);
        assert!(!controller.resolve(search.seq, Ok(envelope(1, 2))));
        assert!(controller.resolve(request.seq, Ok(envelope(1, 9))));
        assert_eq!(controller.total_pages(), 9);
    }

    #[test]
    fn test_filter_setters_end_the_search() {
        let mut controller = loaded(5);
        controller.set_search_query("dune").unwrap();
        assert!(controller.set_year(Some(2021)).is_some());
        assert!(!controller.is_searching());

        controller.set_search_query("alien").unwrap();
        controller.toggle_genre(28);
        assert!(!controller.is_searching());

        controller.set_search_query("heat").unwrap();
        controller.clear_filters();
        assert!(!controller.is_searching());
        assert_eq!(controller.filters(), &FilterSelection::default());
    }

    #[test]
    fn test_unchanged_filter_keeps_the_search() {
        let mut controller = loaded(5);
        controller.set_search_query("dune").unwrap();

        let current = controller.filters().sort_key;
        let request = controller.set_sort(current);

        assert!(request.is_none());
        assert_eq!(controller.search_query(), Some("dune"));
    }

    #[test]
    fn test_clearing_search_loads_a_listing_never_fetched() {
        let mut controller = PageController::new(MediaType::Movie, Category::Trending);
        let search = controller.set_search_query("dune").unwrap();
        controller.resolve(search.seq, Ok(envelope(1, 2)));

        let request = controller.set_search_query("");

        assert!(matches!(
            request,
            Some(FetchRequest {
                source: ListSource::Category {
                    category: Category::Trending,
                    ..
                },
                ..
            })
        ));
        assert_eq!(controller.phase(), &Phase::Loading);
    }

    #[test]
    fn test_search_pagination_uses_search_bounds() {
        let mut controller = loaded(50);
        let request = controller.set_search_query("dune").unwrap();
        controller.resolve(request.seq, Ok(envelope(1, 2)));

        assert!(controller.change_page(3).is_none());
        let next = controller.change_page(2).unwrap();

        assert_eq!(next.source.page(), 2);
        assert_eq!(controller.filters().page, 1);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut controller = loaded(10);
        let first = controller.change_page(2).unwrap();
        let second = controller.change_page(3).unwrap();

        assert!(controller.resolve(second.seq, Ok(envelope(3, 10))));
        assert!(!controller.resolve(first.seq, Ok(envelope(2, 10))));

        assert_eq!(controller.envelope().current_page, 3);
    }

    #[test]
    fn test_retry_reissues_current_view() {
        let mut controller = loaded(4);
        let failed = controller.change_page(3).unwrap();
        controller.resolve(failed.seq, Err(ApiError::RateLimited));

        let retried = controller.retry();

        assert_eq!(retried.source, failed.source);
        assert!(retried.seq > failed.seq);
        assert_eq!(controller.phase(), &Phase::Loading);
    }

    #[test]
    fn test_stats_over_current_page() {
        let mut controller = PageController::new(MediaType::Movie, Category::Popular);
        let request = controller.load();
        controller.resolve(
            request.seq,
            Ok(ResultEnvelope {
                items: vec![
                    item(1, "Old", 6.0, 1990),
                    item(2, "Best", 9.0, 2005),
                    item(3, "New", 7.5, 2024),
                ],
                total_pages: 1,
                total_results: 3,
                current_page: 1,
            }),
        );

        let stats = controller.stats();

        assert_eq!(stats.total_results, 3);
        assert_eq!(stats.average_rating, Some(7.5));
        assert_eq!(stats.most_recent_year, Some(2024));
        assert_eq!(stats.top_rated_title.as_deref(), Some("Best"));
    }

    #[test]
    fn test_replacement_controller_ignores_old_sequence_numbers() {
        let mut old = PageController::new(MediaType::Movie, Category::Popular);
        let old_request = old.load();
        let mut replacement =
            PageController::new(MediaType::Tv, Category::Popular).continuing_from(old.last_seq());

        let request = replacement.load();

        assert!(request.seq > old_request.seq);
        assert!(!replacement.resolve(old_request.seq, Ok(envelope(1, 1))));
        assert_eq!(replacement.phase(), &Phase::Loading);
    }

    #[test]
    fn test_user_filters_ignore_pinned_genre_and_page() {
        let mut controller = PageController::for_genre(MediaType::Movie, 28);
        let request = controller.load();
        controller.resolve(request.seq, Ok(envelope(1, 3)));
        controller.change_page(2);

        assert!(!controller.has_user_filters());

        controller.set_year(Some(2001));

        assert!(controller.has_user_filters());
    }
}
