use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::error::ApiError;
use crate::media::{
    Credits, DetailBundle, Genre, GenreList, HomeContent, ImageSet, MediaId, MediaDetails,
    MediaType, ResultEnvelope, ReviewPage, SeasonDetails, TmdbMediaResult, TmdbPage, Video,
    VideoList,
};
use crate::query::{Category, FilterSelection, ListSource, QueryParams};
use crate::settings::AppSettings;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_LANGUAGE: &str = "vi";

/// Trailers are almost only catalogued in English.
const VIDEO_LANGUAGE: &str = "en-US";

pub async fn fetch_image_bytes(url: String) -> Result<Vec<u8>, String> {
    reqwest::get(&url)
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| e.to_string())
}

#[derive(Debug, Clone, Copy)]
pub enum ImageSize {
    Poster,
    Backdrop,
    Profile,
    Still,
}

impl ImageSize {
    fn path(self) -> &'static str {
        match self {
            ImageSize::Poster => "w342",
            ImageSize::Backdrop => "w1280",
            ImageSize::Profile => "w185",
            ImageSize::Still => "w300",
        }
    }
}

#[derive(Clone)]
pub struct TmdbClient {
    api_token: String,
    base_url: String,
    image_base_url: String,
    language: String,
    http_client: Arc<reqwest::Client>,
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url)
            .field("image_base_url", &self.image_base_url)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl TmdbClient {
    pub fn new(api_token: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: String::from(DEFAULT_BASE_URL),
            image_base_url: String::from(DEFAULT_IMAGE_BASE_URL),
            language: language.into(),
            http_client: Arc::new(reqwest::Client::new()),
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        let language = if settings.language.trim().is_empty() {
            DEFAULT_LANGUAGE
        } else {
            settings.language.trim()
        };
        Self::new(settings.api_token.clone(), language)
            .with_base_url(&settings.base_url)
            .with_image_base_url(&settings.image_base_url)
    }

    /// Overrides the API root. Empty values keep the current one.
    #[must_use]
    pub fn with_base_url(mut self, url: &str) -> Self {
        let url = url.trim().trim_end_matches('/');
        if !url.is_empty() {
            self.base_url = url.to_string();
        }
        self
    }

    #[must_use]
    pub fn with_image_base_url(mut self, url: &str) -> Self {
        let url = url.trim().trim_end_matches('/');
        if !url.is_empty() {
            self.image_base_url = url.to_string();
        }
        self
    }

    pub fn image_url(&self, path: &str, size: ImageSize) -> String {
        format!("{}/{}{}", self.image_base_url, size.path(), path)
    }

    /// Issues one GET under the API root and decodes the body.
    ///
    /// `language` is always sent; `None` uses the configured language.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
        language: Option<&str>,
    ) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base_url, path);
        let language = language.unwrap_or(self.language.as_str());

        let request = self
            .http_client
            .get(&url)
            .bearer_auth(&self.api_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("language", language)])
            .query(params.as_slice())
            .build()?;

        tracing::debug!(url = %request.url(), "TMDB API request");

        let response = self.http_client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Malformed(format!("{path}: {e}")))
    }

    async fn fetch_envelope(
        &self,
        path: &str,
        params: &QueryParams,
        media: MediaType,
    ) -> Result<ResultEnvelope, ApiError> {
        let page: TmdbPage<TmdbMediaResult> = self.get_json(path, params, None).await?;
        Ok(ResultEnvelope::from_page(page, media))
    }

    /// Fetches whatever list a browse page is currently driven by.
    #[instrument(skip_all, fields(path = %source.path(), page = source.page()))]
    pub async fn fetch_list(&self, source: &ListSource) -> Result<ResultEnvelope, ApiError> {
        self.fetch_envelope(&source.path(), &source.params(), source.media())
            .await
    }

    pub async fn fetch_trending(
        &self,
        media: MediaType,
        page: u32,
    ) -> Result<ResultEnvelope, ApiError> {
        let path = format!("trending/{}/day", media.path());
        self.fetch_envelope(&path, &page_params(page), media).await
    }

    /// `popular`, `top_rated`, `upcoming`, `now_playing`, `airing_today`,
    /// `on_the_air` and day trending.
    pub async fn fetch_category(
        &self,
        media: MediaType,
        category: Category,
        page: u32,
    ) -> Result<ResultEnvelope, ApiError> {
        self.fetch_list(&ListSource::Category {
            media,
            category,
            page,
        })
        .await
    }

    pub async fn discover(
        &self,
        media: MediaType,
        filters: &FilterSelection,
    ) -> Result<ResultEnvelope, ApiError> {
        self.fetch_list(&ListSource::Discover {
            media,
            filters: filters.clone(),
        })
        .await
    }

    pub async fn search(
        &self,
        media: MediaType,
        query: &str,
        page: u32,
    ) -> Result<ResultEnvelope, ApiError> {
        self.fetch_list(&ListSource::Search {
            media,
            query: query.to_string(),
            page,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn fetch_details(
        &self,
        media: MediaType,
        id: MediaId,
    ) -> Result<MediaDetails, ApiError> {
        let path = format!("{}/{}", media.path(), id);
        self.get_json(&path, &QueryParams::new(), None).await
    }

    pub async fn fetch_videos(&self, media: MediaType, id: MediaId) -> Result<Vec<Video>, ApiError> {
        let path = format!("{}/{}/videos", media.path(), id);
        let list: VideoList = self
            .get_json(&path, &QueryParams::new(), Some(VIDEO_LANGUAGE))
            .await?;
        Ok(list.results)
    }

    pub async fn fetch_credits(&self, media: MediaType, id: MediaId) -> Result<Credits, ApiError> {
        let path = format!("{}/{}/credits", media.path(), id);
        self.get_json(&path, &QueryParams::new(), None).await
    }

    pub async fn fetch_reviews(
        &self,
        media: MediaType,
        id: MediaId,
        page: u32,
    ) -> Result<ReviewPage, ApiError> {
        let path = format!("{}/{}/reviews", media.path(), id);
        self.get_json(&path, &page_params(page), None).await
    }

    pub async fn fetch_similar(
        &self,
        media: MediaType,
        id: MediaId,
        page: u32,
    ) -> Result<ResultEnvelope, ApiError> {
        let path = format!("{}/{}/similar", media.path(), id);
        self.fetch_envelope(&path, &page_params(page), media).await
    }

    pub async fn fetch_recommendations(
        &self,
        media: MediaType,
        id: MediaId,
        page: u32,
    ) -> Result<ResultEnvelope, ApiError> {
        let path = format!("{}/{}/recommendations", media.path(), id);
        self.fetch_envelope(&path, &page_params(page), media).await
    }

    /// Images are requested for the configured language plus untagged ones,
    /// otherwise most backdrops are filtered out.
    pub async fn fetch_images(&self, media: MediaType, id: MediaId) -> Result<ImageSet, ApiError> {
        let path = format!("{}/{}/images", media.path(), id);
        let mut params = QueryParams::new();
        let primary = self.language.split('-').next().unwrap_or_default();
        params.push("include_image_language", format!("{primary},en,null"));
        self.get_json(&path, &params, None).await
    }

    pub async fn fetch_genres(&self, media: MediaType) -> Result<Vec<Genre>, ApiError> {
        let path = format!("genre/{}/list", media.path());
        let list: GenreList = self.get_json(&path, &QueryParams::new(), None).await?;
        Ok(list.genres)
    }

    pub async fn fetch_season(
        &self,
        tv_id: MediaId,
        season_number: u32,
    ) -> Result<SeasonDetails, ApiError> {
        let path = format!("tv/{}/season/{}", tv_id, season_number);
        self.get_json(&path, &QueryParams::new(), None).await
    }
}

fn page_params(page: u32) -> QueryParams {
    let mut params = QueryParams::new();
    params.push("page", page);
    params
}

fn log_failure<T>(what: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Err(ref e) = result {
        tracing::warn!(error = %e, "failed to load {what}");
    }
    result
}

/// Home rows, joined: any failing row fails the page.
pub async fn load_home(client: TmdbClient) -> Result<HomeContent, ApiError> {
    let joined = tokio::try_join!(
        client.fetch_trending(MediaType::Movie, 1),
        client.fetch_trending(MediaType::Tv, 1),
        client.fetch_category(MediaType::Movie, Category::TopRated, 1),
    );
    let (trending_movies, trending_tv, top_rated_movies) = log_failure("home content", joined)?;
    Ok(HomeContent {
        trending_movies,
        trending_tv,
        top_rated_movies,
    })
}

/// The six calls behind a detail page, issued concurrently and all required.
pub async fn load_detail(
    client: TmdbClient,
    media: MediaType,
    id: MediaId,
) -> Result<Box<DetailBundle>, ApiError> {
    let joined = tokio::try_join!(
        client.fetch_details(media, id),
        client.fetch_videos(media, id),
        client.fetch_credits(media, id),
        client.fetch_reviews(media, id, 1),
        client.fetch_similar(media, id, 1),
        client.fetch_recommendations(media, id, 1),
    );
    let (details, videos, credits, reviews, similar, recommendations) =
        log_failure("detail page", joined)?;
    Ok(Box::new(DetailBundle {
        media_type: media,
        details,
        videos,
        credits,
        reviews,
        similar,
        recommendations,
    }))
}

pub async fn load_list(client: TmdbClient, source: ListSource) -> Result<ResultEnvelope, ApiError> {
    log_failure("list", client.fetch_list(&source).await)
}

pub async fn load_genres(client: TmdbClient, media: MediaType) -> Result<Vec<Genre>, ApiError> {
    log_failure("genres", client.fetch_genres(media).await)
}

pub async fn load_images(
    client: TmdbClient,
    media: MediaType,
    id: MediaId,
) -> Result<ImageSet, ApiError> {
    log_failure("images", client.fetch_images(media, id).await)
}

pub async fn load_season(
    client: TmdbClient,
    tv_id: MediaId,
    season_number: u32,
) -> Result<SeasonDetails, ApiError> {
    log_failure("season", client.fetch_season(tv_id, season_number).await)
}

pub async fn load_videos(
    client: TmdbClient,
    media: MediaType,
    id: MediaId,
) -> Result<Vec<Video>, ApiError> {
    log_failure("videos", client.fetch_videos(media, id).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE_BODY: &str = r#"{
        "page": 1,
        "results": [
            {"id": 550, "title": "Fight Club", "poster_path": "/fc.jpg", "vote_average": 8.4, "release_date": "1999-10-15", "genre_ids": [18]},
            {"id": 680, "title": "Pulp Fiction", "backdrop_path": "/pf.jpg", "vote_average": 8.5, "release_date": "1994-09-10", "genre_ids": [53, 80]}
        ],
        "total_pages": 3,
        "total_results": 42
    }"#;

    fn client_for(server: &MockServer) -> TmdbClient {
        TmdbClient::new("test-token", "vi").with_base_url(&format!("{}/3", server.uri()))
    }

    async fn mount_json(server: &MockServer, route: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_discover_sends_filter_params_and_bearer_token() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/discover/movie"))
            .and(header("Authorization", "Bearer test-token"))
            .and(query_param("with_genres", "28"))
            .and(query_param("page", "1"))
            .and(query_param("sort_by", "popularity.desc"))
            .and(query_param("language", "vi"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE_BODY))
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server);

        // Act
        let envelope = client
            .discover(MediaType::Movie, &FilterSelection::with_genre(28))
            .await
            .unwrap();

        // Assert
        assert_eq!(envelope.items.len(), 2);
        assert_eq!(envelope.items[0].title, "Fight Club");
        assert_eq!(envelope.total_pages, 3);
        assert_eq!(envelope.total_results, 42);
        assert_eq!(envelope.current_page, 1);
    }

    #[tokio::test]
    async fn test_category_fetch_hits_category_endpoint() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/tv/airing_today"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE_BODY))
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server);

        // Act
        let envelope = client
            .fetch_category(MediaType::Tv, Category::AiringToday, 2)
            .await
            .unwrap();

        // Assert
        assert!(envelope.items.iter().all(|i| i.media_type == MediaType::Tv));
    }

    #[tokio::test]
    async fn test_search_excludes_adult_results() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/search/movie"))
            .and(query_param("query", "fight club"))
            .and(query_param("include_adult", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE_BODY))
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server);

        // Act
        let envelope = client.search(MediaType::Movie, "fight club", 1).await.unwrap();

        // Assert
        assert_eq!(envelope.items[1].id, 680);
    }

    #[tokio::test]
    async fn test_videos_are_requested_in_english() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/movie/550/videos"))
            .and(query_param("language", "en-US"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"id":550,"results":[{"key":"qtRKdVHc-cE","name":"Trailer","site":"YouTube","type":"Trailer","official":true}]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server);

        // Act
        let videos = client.fetch_videos(MediaType::Movie, 550).await.unwrap();

        // Assert
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].key, "qtRKdVHc-cE");
        assert!(videos[0].official);
    }

    #[tokio::test]
    async fn test_same_list_twice_is_identical() {
        // Arrange
        let server = MockServer::start().await;
        mount_json(&server, "/3/movie/popular", PAGE_BODY).await;
        let client = client_for(&server);

        // Act
        let first = client
            .fetch_category(MediaType::Movie, Category::Popular, 1)
            .await
            .unwrap();
        let second = client
            .fetch_category(MediaType::Movie, Category::Popular, 1)
            .await
            .unwrap();

        // Assert
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_unauthorized_and_rate_limited_are_distinguished() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/movie/popular"))
            .respond_with(ResponseTemplate::new(401).set_body_string(
                r#"{"status_code":7,"status_message":"Invalid API key","success":false}"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/3/movie/top_rated"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;
        let client = client_for(&server);

        // Act
        let unauthorized = client
            .fetch_category(MediaType::Movie, Category::Popular, 1)
            .await;
        let limited = client
            .fetch_category(MediaType::Movie, Category::TopRated, 1)
            .await;

        // Assert
        assert_eq!(unauthorized, Err(ApiError::Unauthorized));
        assert_eq!(limited, Err(ApiError::RateLimited));
    }

    #[tokio::test]
    async fn test_upstream_error_carries_status_message() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/discover/movie"))
            .respond_with(ResponseTemplate::new(422).set_body_string(
                r#"{"status_code":22,"status_message":"Invalid page.","success":false}"#,
            ))
            .mount(&server)
            .await;
        let client = client_for(&server);
        let filters = FilterSelection {
            page: 501,
            ..FilterSelection::default()
        };

        // Act
        let result = client.discover(MediaType::Movie, &filters).await;

        // Assert
        assert_eq!(
            result,
            Err(ApiError::Upstream {
                status: 422,
                message: String::from("Invalid page."),
            })
        );
    }

    #[tokio::test]
    async fn test_missing_results_is_malformed() {
        // Arrange
        let server = MockServer::start().await;
        mount_json(&server, "/3/trending/movie/day", r#"{"page":1}"#).await;
        let client = client_for(&server);

        // Act
        let result = client.fetch_trending(MediaType::Movie, 1).await;

        // Assert
        assert!(matches!(result, Err(ApiError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Arrange
        let client = TmdbClient::new("test-token", "vi").with_base_url("http://127.0.0.1:1/3");

        // Act
        let result = client.fetch_genres(MediaType::Movie).await;

        // Assert
        assert!(matches!(result, Err(ApiError::Network(_))));
    }

    #[tokio::test]
    async fn test_load_detail_joins_all_sections() {
        // Arrange
        let server = MockServer::start().await;
        mount_json(
            &server,
            "/3/tv/1399",
            r#"{"id":1399,"name":"Game of Thrones","number_of_seasons":8,"seasons":[{"id":3627,"season_number":1,"name":"Season 1","episode_count":10}]}"#,
        )
        .await;
        mount_json(&server, "/3/tv/1399/videos", r#"{"results":[]}"#).await;
        mount_json(
            &server,
            "/3/tv/1399/credits",
            r#"{"cast":[{"id":22970,"name":"Peter Dinklage","character":"Tyrion Lannister","order":0}],"crew":[]}"#,
        )
        .await;
        mount_json(
            &server,
            "/3/tv/1399/reviews",
            r#"{"page":1,"results":[{"id":"abc","author":"critic","content":"Great"}],"total_pages":1,"total_results":1}"#,
        )
        .await;
        mount_json(&server, "/3/tv/1399/similar", PAGE_BODY).await;
        mount_json(&server, "/3/tv/1399/recommendations", PAGE_BODY).await;
        let client = client_for(&server);

        // Act
        let bundle = load_detail(client, MediaType::Tv, 1399).await.unwrap();

        // Assert
        assert_eq!(bundle.details.display_title(), "Game of Thrones");
        assert_eq!(bundle.details.seasons.len(), 1);
        assert_eq!(bundle.credits.cast[0].character, "Tyrion Lannister");
        assert_eq!(bundle.reviews.results[0].author, "critic");
        assert_eq!(bundle.similar.items.len(), 2);
        assert_eq!(bundle.recommendations.items[0].media_type, MediaType::Tv);
    }

    #[tokio::test]
    async fn test_load_detail_fails_when_one_section_fails() {
        // Arrange
        let server = MockServer::start().await;
        mount_json(&server, "/3/movie/550", r#"{"id":550,"title":"Fight Club"}"#).await;
        mount_json(&server, "/3/movie/550/videos", r#"{"results":[]}"#).await;
        mount_json(&server, "/3/movie/550/credits", r#"{"cast":[],"crew":[]}"#).await;
        Mock::given(method("GET"))
            .and(path("/3/movie/550/reviews"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        mount_json(&server, "/3/movie/550/similar", PAGE_BODY).await;
        mount_json(&server, "/3/movie/550/recommendations", PAGE_BODY).await;
        let client = client_for(&server);

        // Act
        let result = load_detail(client, MediaType::Movie, 550).await;

        // Assert
        assert_eq!(
            result.unwrap_err(),
            ApiError::Upstream {
                status: 500,
                message: String::from("boom"),
            }
        );
    }

    #[tokio::test]
    async fn test_load_home_joins_three_rows() {
        // Arrange
        let server = MockServer::start().await;
        mount_json(&server, "/3/trending/movie/day", PAGE_BODY).await;
        mount_json(&server, "/3/trending/tv/day", PAGE_BODY).await;
        mount_json(&server, "/3/movie/top_rated", PAGE_BODY).await;
        let client = client_for(&server);

        // Act
        let home = load_home(client).await.unwrap();

        // Assert
        assert_eq!(home.trending_tv.items[0].media_type, MediaType::Tv);
        assert_eq!(home.hero().map(|h| h.id), Some(680));
    }

    #[tokio::test]
    async fn test_load_home_fails_when_one_row_fails() {
        // Arrange
        let server = MockServer::start().await;
        mount_json(&server, "/3/trending/movie/day", PAGE_BODY).await;
        Mock::given(method("GET"))
            .and(path("/3/trending/tv/day"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        mount_json(&server, "/3/movie/top_rated", PAGE_BODY).await;
        let client = client_for(&server);

        // Act
        let result = load_home(client).await;

        // Assert
        assert_eq!(
            result.unwrap_err(),
            ApiError::Upstream {
                status: 500,
                message: String::from("boom"),
            }
        );
    }

    #[tokio::test]
    async fn test_genres_and_season() {
        // Arrange
        let server = MockServer::start().await;
        mount_json(
            &server,
            "/3/genre/movie/list",
            r#"{"genres":[{"id":28,"name":"Hành động"},{"id":35,"name":"Hài"}]}"#,
        )
        .await;
        mount_json(
            &server,
            "/3/tv/1399/season/1",
            r#"{"name":"Season 1","season_number":1,"episodes":[{"id":63056,"episode_number":1,"season_number":1,"name":"Winter Is Coming","runtime":62}]}"#,
        )
        .await;
        let client = client_for(&server);

        // Act
        let genres = client.fetch_genres(MediaType::Movie).await.unwrap();
        let season = client.fetch_season(1399, 1).await.unwrap();

        // Assert
        assert_eq!(genres.len(), 2);
        assert_eq!(genres[0].name, "Hành động");
        assert_eq!(season.episodes[0].name, "Winter Is Coming");
    }

    #[tokio::test]
    async fn test_images_include_untagged() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/movie/550/images"))
            .and(query_param("include_image_language", "vi,en,null"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"backdrops":[{"file_path":"/b1.jpg","aspect_ratio":1.778,"width":1920,"height":1080,"iso_639_1":null}],"posters":[],"logos":[]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server);

        // Act
        let images = client.fetch_images(MediaType::Movie, 550).await.unwrap();

        // Assert
        assert_eq!(images.backdrops[0].file_path, "/b1.jpg");
    }

    #[test]
    fn test_image_url_uses_size_segment() {
        let client = TmdbClient::new("t", "vi").with_image_base_url("https://cdn.example/t/p/");

        assert_eq!(
            client.image_url("/abc.jpg", ImageSize::Poster),
            "https://cdn.example/t/p/w342/abc.jpg"
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let client = TmdbClient::new("secret-token", "vi");

        assert!(!format!("{client:?}").contains("secret-token"));
    }
}
