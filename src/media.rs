use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use iced::widget::image::Handle;
use iced::Color;
use serde::Deserialize;

use crate::error::ApiError;
use crate::query::{Category, SortKey};
use crate::settings::SetupMessage;
use crate::trailer::TrailerMessage;

pub const BACKGROUND_BLACK: Color = Color::from_rgb(0.0, 0.0, 0.0);
pub const SURFACE_DARK_GRAY: Color = Color::from_rgb(0.078, 0.078, 0.078);
pub const ACCENT_RED: Color = Color::from_rgb(0.898, 0.035, 0.078);
pub const ACCENT_GOLD: Color = Color::from_rgb(0.961, 0.773, 0.094);
pub const TEXT_WHITE: Color = Color::from_rgb(1.0, 1.0, 1.0);
pub const TEXT_GRAY: Color = Color::from_rgb(0.702, 0.702, 0.702);

/// TMDB refuses any `page` above this value on list endpoints.
pub const MAX_PAGES: u32 = 500;

pub type MediaId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    pub const ALL: [MediaType; 2] = [MediaType::Movie, MediaType::Tv];

    /// Path segment used by TMDB (`movie/...`, `tv/...`).
    pub fn path(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    fn from_api(value: Option<&str>) -> Option<Self> {
        match value {
            Some("movie") => Some(MediaType::Movie),
            Some("tv") => Some(MediaType::Tv),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Movie => write!(f, "Movies"),
            MediaType::Tv => write!(f, "TV Shows"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    Movies(Category),
    MovieDetail(MediaId),
    Tv(Category),
    TvDetail(MediaId),
    Genres,
    GenreDetail(Genre),
    Search,
}

impl Route {
    pub fn browse(media: MediaType, category: Category) -> Self {
        match media {
            MediaType::Movie => Route::Movies(category),
            MediaType::Tv => Route::Tv(category),
        }
    }

    pub fn detail(media: MediaType, id: MediaId) -> Self {
        match media {
            MediaType::Movie => Route::MovieDetail(id),
            MediaType::Tv => Route::TvDetail(id),
        }
    }

    pub fn detail_target(&self) -> Option<(MediaType, MediaId)> {
        match self {
            Route::MovieDetail(id) => Some((MediaType::Movie, *id)),
            Route::TvDetail(id) => Some((MediaType::Tv, *id)),
            _ => None,
        }
    }

    pub fn nav_item(&self) -> NavItem {
        match self {
            Route::Home => NavItem::Home,
            Route::Movies(_) | Route::MovieDetail(_) => NavItem::Movies,
            Route::Tv(_) | Route::TvDetail(_) => NavItem::Tv,
            Route::Genres | Route::GenreDetail(_) => NavItem::Genres,
            Route::Search => NavItem::Search,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Home,
    Movies,
    Tv,
    Genres,
    Search,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadingState {
    Idle,
    Loading,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenreList {
    pub genres: Vec<Genre>,
}

/// Minimal movie/TV record used by lists, grids and cards.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSummary {
    pub id: MediaId,
    pub media_type: MediaType,
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub rating: f32,
    pub release_date: Option<NaiveDate>,
    pub overview: String,
    pub genre_ids: Vec<u64>,
}

impl ContentSummary {
    /// Builds a summary from a raw list entry. `trending` entries carry their
    /// own `media_type`, the rest inherit `fallback`.
    pub fn from_result(result: TmdbMediaResult, fallback: MediaType) -> Self {
        let media_type = MediaType::from_api(result.media_type.as_deref()).unwrap_or(fallback);
        let release_date = result
            .release_date
            .or(result.first_air_date)
            .as_deref()
            .and_then(parse_date);
        Self {
            id: result.id,
            media_type,
            title: result.title.or(result.name).unwrap_or_default(),
            poster_path: result.poster_path,
            backdrop_path: result.backdrop_path,
            rating: result.vote_average.clamp(0.0, 10.0),
            release_date,
            overview: result.overview,
            genre_ids: result.genre_ids,
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.release_date.map(|d| d.year())
    }
}

/// TMDB sends `""` instead of `null` for unknown dates.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMediaResult {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub media_type: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
}

/// Raw paginated response body. `results` is required so a body without it
/// fails to decode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbPage<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

/// One page of list results.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultEnvelope {
    pub items: Vec<ContentSummary>,
    pub total_pages: u32,
    pub total_results: u32,
    pub current_page: u32,
}

impl Default for ResultEnvelope {
    fn default() -> Self {
        Self::empty()
    }
}

impl ResultEnvelope {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_pages: 1,
            total_results: 0,
            current_page: 1,
        }
    }

    pub fn from_page(page: TmdbPage<TmdbMediaResult>, fallback: MediaType) -> Self {
        Self {
            items: page
                .results
                .into_iter()
                .map(|r| ContentSummary::from_result(r, fallback))
                .collect(),
            total_pages: page.total_pages.clamp(1, MAX_PAGES),
            total_results: page.total_results,
            current_page: page.page.max(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Season {
    pub id: u64,
    pub season_number: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub episode_count: u32,
    pub air_date: Option<String>,
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Episode {
    pub id: u64,
    pub episode_number: u32,
    pub season_number: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub overview: String,
    pub air_date: Option<String>,
    pub still_path: Option<String>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeasonDetails {
    #[serde(default)]
    pub name: String,
    pub season_number: u32,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MediaDetails {
    pub id: MediaId,
    pub title: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub overview: String,
    pub tagline: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u32,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub budget: Option<u64>,
    pub revenue: Option<u64>,
    pub status: Option<String>,
    pub original_language: Option<String>,
    pub number_of_seasons: Option<u32>,
    pub number_of_episodes: Option<u32>,
    #[serde(default)]
    pub seasons: Vec<Season>,
    pub homepage: Option<String>,
}

impl MediaDetails {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    pub fn release_date(&self) -> Option<NaiveDate> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
            .and_then(parse_date)
    }

    /// Movie runtime, or the first listed episode runtime for TV.
    pub fn runtime_minutes(&self) -> Option<u32> {
        self.runtime
            .filter(|r| *r > 0)
            .or_else(|| self.episode_run_time.first().copied())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: String,
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub department: String,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

impl Credits {
    /// Directors for movies; TV credits rarely list one, so fall back to
    /// the executive producers.
    pub fn key_crew(&self) -> Vec<&CrewMember> {
        let directors: Vec<&CrewMember> =
            self.crew.iter().filter(|c| c.job == "Director").collect();
        if !directors.is_empty() {
            return directors;
        }
        self.crew
            .iter()
            .filter(|c| c.job == "Executive Producer")
            .take(3)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AuthorDetails {
    pub rating: Option<f32>,
    pub avatar_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Review {
    pub id: String,
    pub author: String,
    #[serde(default)]
    pub content: String,
    pub created_at: Option<String>,
    #[serde(default)]
    pub author_details: AuthorDetails,
    pub url: Option<String>,
}

pub type ReviewPage = TmdbPage<Review>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
    #[serde(default)]
    pub official: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoList {
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageInfo {
    pub file_path: String,
    #[serde(default)]
    pub aspect_ratio: f32,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    pub iso_639_1: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ImageSet {
    #[serde(default)]
    pub backdrops: Vec<ImageInfo>,
    #[serde(default)]
    pub posters: Vec<ImageInfo>,
    #[serde(default)]
    pub logos: Vec<ImageInfo>,
}

/// Everything the detail page needs, fetched as one joined set.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailBundle {
    pub media_type: MediaType,
    pub details: MediaDetails,
    pub videos: Vec<Video>,
    pub credits: Credits,
    pub reviews: ReviewPage,
    pub similar: ResultEnvelope,
    pub recommendations: ResultEnvelope,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeContent {
    pub trending_movies: ResultEnvelope,
    pub trending_tv: ResultEnvelope,
    pub top_rated_movies: ResultEnvelope,
}

impl HomeContent {
    /// First trending movie that has a backdrop to show.
    pub fn hero(&self) -> Option<&ContentSummary> {
        self.trending_movies
            .items
            .iter()
            .find(|item| item.backdrop_path.is_some())
    }
}

/// Decoded poster/backdrop handles keyed by URL, held for the lifetime of
/// the window.
#[derive(Debug, Clone, Default)]
pub struct ImageStore {
    handles: HashMap<String, Handle>,
    pending: HashSet<String>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<&Handle> {
        self.handles.get(url)
    }

    pub fn insert(&mut self, url: String, handle: Handle) {
        self.pending.remove(&url);
        self.handles.insert(url, handle);
    }

    pub fn fail(&mut self, url: &str) {
        self.pending.remove(url);
    }

    /// Returns `true` when the URL still needs a fetch, and marks it pending.
    pub fn claim(&mut self, url: &str) -> bool {
        if self.handles.contains_key(url) || self.pending.contains(url) {
            return false;
        }
        self.pending.insert(url.to_string());
        true
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Setup(SetupMessage),
    NavigateTo(Route),
    SearchQueryChanged(String),
    SearchSubmit,
    SearchDebounceTick,
    ClearSearch,
    HomeLoaded(Result<HomeContent, ApiError>),
    ListLoaded(u64, Result<ResultEnvelope, ApiError>),
    GenresLoaded(MediaType, Result<Vec<Genre>, ApiError>),
    DetailLoaded(MediaType, MediaId, Result<Box<DetailBundle>, ApiError>),
    ImagesLoaded(MediaType, MediaId, Result<ImageSet, ApiError>),
    SelectSeason(u32),
    SeasonLoaded(MediaId, u32, Result<SeasonDetails, ApiError>),
    ChangePage(u32),
    SwitchCategory(Category),
    ToggleGenre(u64),
    SetYear(Option<i32>),
    SetMinRating(Option<f32>),
    SetSort(SortKey),
    SetStatus(Option<crate::query::TvStatus>),
    SetNetwork(Option<u32>),
    ClearFilters,
    ToggleFilterPanel,
    Retry,
    HoverCard(Option<MediaId>),
    LoadImage(String),
    ImageLoaded(String, Result<Handle, String>),
    Trailer(TrailerMessage),
}

/// Cuts `description` to at most `max_length` characters on a word boundary.
pub fn truncate_description(description: &str, max_length: usize) -> String {
    if description.chars().count() <= max_length {
        return description.to_string();
    }
    let end = description
        .char_indices()
        .nth(max_length)
        .map_or(description.len(), |(i, _)| i);
    let truncated = &description[..end];
    format!(
        "{}...",
        truncated.rfind(' ').map_or(truncated, |i| &truncated[..i])
    )
}

/// `1_234_567` -> `$1,234,567`.
pub fn format_money(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${}", grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> TmdbMediaResult {
        serde_json::from_str(json).expect("valid media result")
    }

    #[test]
    fn test_summary_prefers_title_and_parses_date() {
        let result = raw(
            r#"{"id":603,"title":"The Matrix","overview":"Neo","vote_average":8.2,"release_date":"1999-03-30","genre_ids":[28,878]}"#,
        );

        let summary = ContentSummary::from_result(result, MediaType::Movie);

        assert_eq!(summary.title, "The Matrix");
        assert_eq!(summary.media_type, MediaType::Movie);
        assert_eq!(summary.year(), Some(1999));
        assert_eq!(summary.genre_ids, vec![28, 878]);
    }

    #[test]
    fn test_summary_uses_tv_name_and_tolerates_empty_date() {
        let result = raw(r#"{"id":1399,"name":"Game of Thrones","first_air_date":""}"#);

        let summary = ContentSummary::from_result(result, MediaType::Tv);

        assert_eq!(summary.title, "Game of Thrones");
        assert_eq!(summary.release_date, None);
        assert_eq!(summary.rating, 0.0);
    }

    #[test]
    fn test_summary_keeps_media_type_from_payload() {
        let result = raw(r#"{"id":1,"name":"Show","media_type":"tv"}"#);

        let summary = ContentSummary::from_result(result, MediaType::Movie);

        assert_eq!(summary.media_type, MediaType::Tv);
    }

    #[test]
    fn test_envelope_caps_total_pages() {
        let page: TmdbPage<TmdbMediaResult> = serde_json::from_str(
            r#"{"page":3,"results":[],"total_pages":44321,"total_results":886420}"#,
        )
        .expect("valid page");

        let envelope = ResultEnvelope::from_page(page, MediaType::Movie);

        assert_eq!(envelope.total_pages, MAX_PAGES);
        assert_eq!(envelope.current_page, 3);
        assert_eq!(envelope.total_results, 886420);
    }

    #[test]
    fn test_envelope_never_reports_zero_pages() {
        let page: TmdbPage<TmdbMediaResult> =
            serde_json::from_str(r#"{"page":1,"results":[],"total_pages":0,"total_results":0}"#)
                .expect("valid page");

        let envelope = ResultEnvelope::from_page(page, MediaType::Tv);

        assert_eq!(envelope.total_pages, 1);
        assert!(envelope.is_empty());
    }

    #[test]
    fn test_page_without_results_is_rejected() {
        let parsed = serde_json::from_str::<TmdbPage<TmdbMediaResult>>(r#"{"page":1}"#);

        assert!(parsed.is_err());
    }

    #[test]
    fn test_runtime_falls_back_to_episode_runtime() {
        let details: MediaDetails = serde_json::from_str(
            r#"{"id":1,"name":"Show","episode_run_time":[42,45],"first_air_date":"2011-04-17"}"#,
        )
        .expect("valid details");

        assert_eq!(details.runtime_minutes(), Some(42));
        assert_eq!(details.display_title(), "Show");
        assert_eq!(details.release_date().map(|d| d.year()), Some(2011));
    }

    #[test]
    fn test_key_crew_falls_back_to_producers() {
        let credits: Credits = serde_json::from_str(
            r#"{"cast":[],"crew":[{"id":1,"name":"A","job":"Writer"},{"id":2,"name":"B","job":"Executive Producer"}]}"#,
        )
        .expect("valid credits");

        let names: Vec<&str> = credits.key_crew().iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, vec!["B"]);
    }

    #[test]
    fn test_truncate_description_respects_char_boundaries() {
        let text = "Phim hành động đầy kịch tính và hấp dẫn";

        let truncated = truncate_description(text, 12);

        assert_eq!(truncated, "Phim hành...");
        assert_eq!(truncate_description("short", 12), "short");
    }

    #[test]
    fn test_format_money_groups_thousands() {
        assert_eq!(format_money(0), "$0");
        assert_eq!(format_money(999), "$999");
        assert_eq!(format_money(63_000_000), "$63,000,000");
    }

    #[test]
    fn test_image_store_claims_once() {
        let mut store = ImageStore::new();

        assert!(store.claim("https://img/a.jpg"));
        assert!(!store.claim("https://img/a.jpg"));
        store.fail("https://img/a.jpg");
        assert!(store.claim("https://img/a.jpg"));
    }
}
