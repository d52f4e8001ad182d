use std::collections::BTreeSet;

use crate::media::MediaType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    Popularity,
    Rating,
    Newest,
    VoteCount,
    Title,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Popularity,
        SortKey::Rating,
        SortKey::Newest,
        SortKey::VoteCount,
        SortKey::Title,
    ];

    /// Value of the `sort_by` parameter. Date and title fields are named
    /// differently for TV.
    pub fn api_value(self, media: MediaType) -> &'static str {
        match (self, media) {
            (SortKey::Popularity, _) => "popularity.desc",
            (SortKey::Rating, _) => "vote_average.desc",
            (SortKey::Newest, MediaType::Movie) => "release_date.desc",
            (SortKey::Newest, MediaType::Tv) => "first_air_date.desc",
            (SortKey::VoteCount, _) => "vote_count.desc",
            (SortKey::Title, MediaType::Movie) => "title.asc",
            (SortKey::Title, MediaType::Tv) => "name.asc",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Popularity => write!(f, "Most popular"),
            SortKey::Rating => write!(f, "Highest rated"),
            SortKey::Newest => write!(f, "Newest"),
            SortKey::VoteCount => write!(f, "Most votes"),
            SortKey::Title => write!(f, "Title A-Z"),
        }
    }
}

/// TMDB `with_status` codes for TV shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TvStatus {
    ReturningSeries,
    Planned,
    InProduction,
    Ended,
    Canceled,
    Pilot,
}

impl TvStatus {
    pub const ALL: [TvStatus; 6] = [
        TvStatus::ReturningSeries,
        TvStatus::Planned,
        TvStatus::InProduction,
        TvStatus::Ended,
        TvStatus::Canceled,
        TvStatus::Pilot,
    ];

    pub fn code(self) -> u8 {
        match self {
            TvStatus::ReturningSeries => 0,
            TvStatus::Planned => 1,
            TvStatus::InProduction => 2,
            TvStatus::Ended => 3,
            TvStatus::Canceled => 4,
            TvStatus::Pilot => 5,
        }
    }
}

impl std::fmt::Display for TvStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TvStatus::ReturningSeries => write!(f, "Returning Series"),
            TvStatus::Planned => write!(f, "Planned"),
            TvStatus::InProduction => write!(f, "In Production"),
            TvStatus::Ended => write!(f, "Ended"),
            TvStatus::Canceled => write!(f, "Canceled"),
            TvStatus::Pilot => write!(f, "Pilot"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Network {
    pub id: u32,
    pub name: &'static str,
}

pub const NETWORKS: [Network; 8] = [
    Network { id: 213, name: "Netflix" },
    Network { id: 1024, name: "Amazon" },
    Network { id: 2739, name: "Disney+" },
    Network { id: 453, name: "Hulu" },
    Network { id: 49, name: "HBO" },
    Network { id: 174, name: "AMC" },
    Network { id: 67, name: "Showtime" },
    Network { id: 4, name: "BBC One" },
];

pub fn network_name(id: u32) -> Option<&'static str> {
    NETWORKS.iter().find(|n| n.id == id).map(|n| n.name)
}

/// Fixed list endpoints a browse page can be driven by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Trending,
    Popular,
    TopRated,
    Upcoming,
    NowPlaying,
    AiringToday,
    OnTheAir,
}

impl Category {
    const MOVIE: [Category; 5] = [
        Category::Trending,
        Category::Popular,
        Category::TopRated,
        Category::Upcoming,
        Category::NowPlaying,
    ];

    const TV: [Category; 5] = [
        Category::Trending,
        Category::Popular,
        Category::TopRated,
        Category::AiringToday,
        Category::OnTheAir,
    ];

    /// Tabs shown on the browse page for `media`, in display order.
    pub fn for_media(media: MediaType) -> &'static [Category] {
        match media {
            MediaType::Movie => &Self::MOVIE,
            MediaType::Tv => &Self::TV,
        }
    }

    /// Resource path relative to the API base. Movie-only and TV-only
    /// categories map to their closest counterpart for the other media type.
    pub fn endpoint(self, media: MediaType) -> String {
        let media_path = media.path();
        match (self, media) {
            (Category::Trending, _) => format!("trending/{}/day", media_path),
            (Category::Popular, _) => format!("{}/popular", media_path),
            (Category::TopRated, _) => format!("{}/top_rated", media_path),
            (Category::Upcoming, MediaType::Movie) | (Category::OnTheAir, MediaType::Movie) => {
                String::from("movie/upcoming")
            }
            (Category::NowPlaying, MediaType::Movie)
            | (Category::AiringToday, MediaType::Movie) => String::from("movie/now_playing"),
            (Category::AiringToday, MediaType::Tv) | (Category::NowPlaying, MediaType::Tv) => {
                String::from("tv/airing_today")
            }
            (Category::OnTheAir, MediaType::Tv) | (Category::Upcoming, MediaType::Tv) => {
                String::from("tv/on_the_air")
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Trending => "Trending",
            Category::Popular => "Popular",
            Category::TopRated => "Top Rated",
            Category::Upcoming => "Upcoming",
            Category::NowPlaying => "Now Playing",
            Category::AiringToday => "Airing Today",
            Category::OnTheAir => "On The Air",
        }
    }

    pub fn description(self, media: MediaType) -> &'static str {
        match (self, media) {
            (Category::Trending, MediaType::Movie) => "The movies everyone is watching today",
            (Category::Trending, MediaType::Tv) => "The shows everyone is watching today",
            (Category::Popular, MediaType::Movie) => "Most popular movies right now",
            (Category::Popular, MediaType::Tv) => "Most popular TV shows right now",
            (Category::TopRated, MediaType::Movie) => "The highest rated movies of all time",
            (Category::TopRated, MediaType::Tv) => "The highest rated TV shows of all time",
            (Category::Upcoming, _) => "Movies coming soon to theaters",
            (Category::NowPlaying, _) => "Movies currently in theaters",
            (Category::AiringToday, _) => "Episodes airing today",
            (Category::OnTheAir, _) => "Shows with an episode in the next seven days",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered list of query parameters. `language` is added by the fetch layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl ToString) {
        self.0.push((key, value.to_string()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[cfg(test)]
    pub fn keys(&self) -> Vec<&'static str> {
        self.0.iter().map(|(k, _)| *k).collect()
    }

    pub fn as_slice(&self) -> &[(&'static str, String)] {
        &self.0
    }
}

/// User-selected discover filters plus the page being viewed.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    pub genre_ids: BTreeSet<u64>,
    pub year: Option<i32>,
    pub min_rating: Option<f32>,
    pub sort_key: SortKey,
    pub page: u32,
    pub status: Option<TvStatus>,
    pub network: Option<u32>,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            genre_ids: BTreeSet::new(),
            year: None,
            min_rating: None,
            sort_key: SortKey::default(),
            page: 1,
            status: None,
            network: None,
        }
    }
}

impl FilterSelection {
    pub fn with_genre(genre_id: u64) -> Self {
        Self {
            genre_ids: BTreeSet::from([genre_id]),
            ..Self::default()
        }
    }

    /// `true` when any filter differs from its default. `page` is not a filter.
    pub fn has_active_filters(&self) -> bool {
        !self.genre_ids.is_empty()
            || self.year.is_some()
            || self.min_rating.is_some()
            || self.sort_key != SortKey::default()
            || self.status.is_some()
            || self.network.is_some()
    }

    /// Adds the genre if absent, removes it otherwise. Returns whether it is
    /// now selected.
    pub fn toggle_genre(&mut self, genre_id: u64) -> bool {
        if self.genre_ids.remove(&genre_id) {
            false
        } else {
            self.genre_ids.insert(genre_id);
            true
        }
    }

    /// Discover parameters for `media`. Unset filters emit no key; values are
    /// passed through unvalidated.
    pub fn to_params(&self, media: MediaType) -> QueryParams {
        let mut params = QueryParams::new();
        params.push("page", self.page);
        params.push("sort_by", self.sort_key.api_value(media));

        if !self.genre_ids.is_empty() {
            let joined = self
                .genre_ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            params.push("with_genres", joined);
        }

        if let Some(year) = self.year {
            let key = match media {
                MediaType::Movie => "year",
                MediaType::Tv => "first_air_date_year",
            };
            params.push(key, year);
        }

        if let Some(rating) = self.min_rating {
            params.push("vote_average.gte", rating);
        }

        if media == MediaType::Tv {
            if let Some(status) = self.status {
                params.push("with_status", status.code());
            }
            if let Some(network) = self.network {
                params.push("with_networks", network);
            }
        }

        params
    }
}

/// Where a page of list results comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ListSource {
    Category {
        media: MediaType,
        category: Category,
        page: u32,
    },
    Discover {
        media: MediaType,
        filters: FilterSelection,
    },
    Search {
        media: MediaType,
        query: String,
        page: u32,
    },
}

impl ListSource {
    pub fn media(&self) -> MediaType {
        match self {
            ListSource::Category { media, .. }
            | ListSource::Discover { media, .. }
            | ListSource::Search { media, .. } => *media,
        }
    }

    pub fn page(&self) -> u32 {
        match self {
            ListSource::Category { page, .. } | ListSource::Search { page, .. } => *page,
            ListSource::Discover { filters, .. } => filters.page,
        }
    }

    pub fn path(&self) -> String {
        match self {
            ListSource::Category {
                media, category, ..
            } => category.endpoint(*media),
            ListSource::Discover { media, .. } => format!("discover/{}", media.path()),
            ListSource::Search { media, .. } => format!("search/{}", media.path()),
        }
    }

    pub fn params(&self) -> QueryParams {
        match self {
            ListSource::Category { page, .. } => {
                let mut params = QueryParams::new();
                params.push("page", page);
                params
            }
            ListSource::Discover { media, filters } => filters.to_params(*media),
            ListSource::Search { query, page, .. } => {
                let mut params = QueryParams::new();
                params.push("query", query);
                params.push("page", page);
                params.push("include_adult", false);
                params
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection_emits_only_page_and_sort() {
        let params = FilterSelection::default().to_params(MediaType::Movie);

        assert_eq!(params.keys(), vec!["page", "sort_by"]);
        assert_eq!(params.get("page"), Some("1"));
        assert_eq!(params.get("sort_by"), Some("popularity.desc"));
    }

    #[test]
    fn test_single_genre_discover_movie() {
        let filters = FilterSelection::with_genre(28);

        let params = filters.to_params(MediaType::Movie);

        assert_eq!(params.get("with_genres"), Some("28"));
        assert_eq!(params.get("page"), Some("1"));
        assert_eq!(params.get("sort_by"), Some("popularity.desc"));
        assert_eq!(params.keys().len(), 3);
    }

    #[test]
    fn test_genres_are_comma_joined() {
        let mut filters = FilterSelection::default();
        filters.toggle_genre(28);
        filters.toggle_genre(12);

        let params = filters.to_params(MediaType::Movie);

        assert_eq!(params.get("with_genres"), Some("12,28"));
    }

    #[test]
    fn test_year_key_depends_on_media() {
        let filters = FilterSelection {
            year: Some(2020),
            ..FilterSelection::default()
        };

        let movie = filters.to_params(MediaType::Movie);
        let tv = filters.to_params(MediaType::Tv);

        assert_eq!(movie.get("year"), Some("2020"));
        assert_eq!(movie.get("first_air_date_year"), None);
        assert_eq!(tv.get("first_air_date_year"), Some("2020"));
        assert_eq!(tv.get("year"), None);
    }

    #[test]
    fn test_tv_only_filters() {
        let filters = FilterSelection {
            min_rating: Some(7.5),
            status: Some(TvStatus::Ended),
            network: Some(213),
            sort_key: SortKey::Newest,
            ..FilterSelection::default()
        };

        let tv = filters.to_params(MediaType::Tv);
        let movie = filters.to_params(MediaType::Movie);

        assert_eq!(tv.get("vote_average.gte"), Some("7.5"));
        assert_eq!(tv.get("with_status"), Some("3"));
        assert_eq!(tv.get("with_networks"), Some("213"));
        assert_eq!(tv.get("sort_by"), Some("first_air_date.desc"));
        assert_eq!(movie.get("with_status"), None);
        assert_eq!(movie.get("with_networks"), None);
        assert_eq!(movie.get("sort_by"), Some("release_date.desc"));
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let filters = FilterSelection {
            page: 900,
            min_rating: Some(11.0),
            ..FilterSelection::default()
        };

        let params = filters.to_params(MediaType::Movie);

        assert_eq!(params.get("page"), Some("900"));
        assert_eq!(params.get("vote_average.gte"), Some("11"));
    }

    #[test]
    fn test_toggle_genre_round_trip() {
        let mut filters = FilterSelection::with_genre(18);
        let before = filters.genre_ids.clone();

        assert!(filters.toggle_genre(28));
        assert!(!filters.toggle_genre(28));

        assert_eq!(filters.genre_ids, before);
    }

    #[test]
    fn test_sort_counts_as_active_filter() {
        let filters = FilterSelection {
            sort_key: SortKey::Rating,
            ..FilterSelection::default()
        };

        assert!(filters.has_active_filters());
        assert!(!FilterSelection::default().has_active_filters());
    }

    #[test]
    fn test_category_endpoints() {
        assert_eq!(
            Category::Trending.endpoint(MediaType::Tv),
            "trending/tv/day"
        );
        assert_eq!(
            Category::TopRated.endpoint(MediaType::Movie),
            "movie/top_rated"
        );
        assert_eq!(
            Category::AiringToday.endpoint(MediaType::Tv),
            "tv/airing_today"
        );
        assert_eq!(
            Category::Upcoming.endpoint(MediaType::Movie),
            "movie/upcoming"
        );
        assert!(Category::for_media(MediaType::Tv).contains(&Category::OnTheAir));
        assert!(!Category::for_media(MediaType::Movie).contains(&Category::OnTheAir));
    }

    #[test]
    fn test_search_source_params() {
        let source = ListSource::Search {
            media: MediaType::Tv,
            query: String::from("dark"),
            page: 2,
        };

        let params = source.params();

        assert_eq!(source.path(), "search/tv");
        assert_eq!(params.get("query"), Some("dark"));
        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.get("include_adult"), Some("false"));
    }
}
