use iced::widget::image::Handle;
use iced::Task;

use crate::controller::{FetchRequest, PageController};
use crate::error::ApiError;
use crate::media::{
    DetailBundle, Genre, HomeContent, ImageSet, LoadingState, MediaId, MediaType, Message,
    ResultEnvelope, Route, SeasonDetails,
};
use crate::query::Category;
use crate::tmdb::{
    fetch_image_bytes, load_detail, load_genres, load_home, load_images, load_list, load_season,
    ImageSize,
};
use crate::{Reelix, SEARCH_DEBOUNCE};

pub const MAIN_SCROLL_ID: &str = "main-scroll";

const CAST_IMAGE_LIMIT: usize = 12;
const GALLERY_IMAGE_LIMIT: usize = 8;

pub fn handle_message(app: &mut Reelix, message: Message) -> Task<Message> {
    match message {
        Message::Setup(_) => Task::none(),
        Message::NavigateTo(route) => navigate(app, route),
        Message::SearchQueryChanged(query) => handle_search_query_changed(app, query),
        Message::SearchSubmit => {
            app.search_debounce_timer = None;
            apply_search(app)
        }
        Message::SearchDebounceTick => handle_search_debounce_tick(app),
        Message::ClearSearch => handle_clear_search(app),
        Message::HomeLoaded(result) => handle_home_loaded(app, result),
        Message::ListLoaded(seq, result) => handle_list_loaded(app, seq, result),
        Message::GenresLoaded(media, result) => handle_genres_loaded(app, media, result),
        Message::DetailLoaded(media, id, result) => handle_detail_loaded(app, media, id, result),
        Message::ImagesLoaded(media, id, result) => handle_images_loaded(app, media, id, result),
        Message::SelectSeason(season) => handle_select_season(app, season),
        Message::SeasonLoaded(id, season, result) => {
            handle_season_loaded(app, id, season, result)
        }
        Message::ChangePage(page) => update_browse(app, |c| c.change_page(page)),
        Message::SwitchCategory(category) => handle_switch_category(app, category),
        Message::ToggleGenre(genre_id) => update_listing(app, |c| Some(c.toggle_genre(genre_id))),
        Message::SetYear(year) => update_listing(app, |c| c.set_year(year)),
        Message::SetMinRating(rating) => update_listing(app, |c| c.set_min_rating(rating)),
        Message::SetSort(sort_key) => update_listing(app, |c| c.set_sort(sort_key)),
        Message::SetStatus(status) => update_listing(app, |c| c.set_status(status)),
        Message::SetNetwork(network) => update_listing(app, |c| c.set_network(network)),
        Message::ClearFilters => update_listing(app, |c| Some(c.clear_filters())),
        Message::ToggleFilterPanel => {
            app.filters_open = !app.filters_open;
            Task::none()
        }
        Message::Retry => handle_retry(app),
        Message::HoverCard(id) => {
            app.hovered_card = id;
            Task::none()
        }
        Message::LoadImage(url) => handle_load_image(app, url),
        Message::ImageLoaded(url, result) => handle_image_loaded(app, url, result),
        Message::Trailer(trailer_msg) => {
            let task = app
                .trailer
                .update(trailer_msg, app.tmdb_client.as_ref())
                .map(Message::Trailer);
            let thumbnail = app
                .trailer
                .thumbnail_url()
                .filter(|url| app.image_store.get(url).is_none())
                .map_or_else(Task::none, |url| Task::done(Message::LoadImage(url)));
            Task::batch([task, thumbnail])
        }
    }
}

/// Switches to `route` and starts whatever loads it needs. Every list route
/// gets a fresh controller.
pub fn navigate(app: &mut Reelix, route: Route) -> Task<Message> {
    tracing::debug!(?route, "navigate");
    app.route = route.clone();
    app.hovered_card = None;
    app.filters_open = false;
    if let Some(previous) = app.browse.take() {
        app.list_seq_floor = previous.last_seq();
    }
    if route != Route::Search {
        app.search_query.clear();
        app.search_debounce_timer = None;
    }

    let mut tasks = vec![scroll_to_top(), ensure_genres(app)];

    match route {
        Route::Home => {
            if app.home_content.is_none() {
                tasks.push(start_home_load(app));
            }
        }
        Route::Movies(category) => {
            tasks.push(install_controller(app, PageController::new(MediaType::Movie, category)));
        }
        Route::Tv(category) => {
            tasks.push(install_controller(app, PageController::new(MediaType::Tv, category)));
        }
        Route::MovieDetail(id) => tasks.push(start_detail_load(app, MediaType::Movie, id)),
        Route::TvDetail(id) => tasks.push(start_detail_load(app, MediaType::Tv, id)),
        Route::Genres => {}
        Route::GenreDetail(genre) => {
            tasks.push(install_controller(
                app,
                PageController::for_genre(MediaType::Movie, genre.id),
            ));
        }
        Route::Search => {
            // The trending listing is only fetched once there is no query.
            let controller = PageController::new(MediaType::Movie, Category::Trending)
                .continuing_from(app.list_seq_floor);
            app.browse = Some(controller);
            let query = app.search_query.clone();
            tasks.push(update_browse(app, |c| c.set_search_query(&query)));
        }
    }

    Task::batch(tasks)
}

fn install_controller(app: &mut Reelix, controller: PageController) -> Task<Message> {
    let mut controller = controller.continuing_from(app.list_seq_floor);
    let request = controller.load();
    app.browse = Some(controller);
    run_request(app, request)
}

fn run_request(app: &Reelix, request: FetchRequest) -> Task<Message> {
    let Some(client) = app.tmdb_client.clone() else {
        return Task::none();
    };
    let FetchRequest { seq, source } = request;
    Task::perform(load_list(client, source), move |result| {
        Message::ListLoaded(seq, result)
    })
}

/// Applies a controller transition and runs the request it produced, if any.
fn update_browse(
    app: &mut Reelix,
    transition: impl FnOnce(&mut PageController) -> Option<FetchRequest>,
) -> Task<Message> {
    let Some(controller) = app.browse.as_mut() else {
        return Task::none();
    };
    let request = transition(controller);
    let scroll = controller.take_scroll_to_top();

    let mut tasks = Vec::new();
    if let Some(request) = request {
        tasks.push(run_request(app, request));
    }
    if scroll {
        tasks.push(scroll_to_top());
    }
    Task::batch(tasks)
}

/// Like [`update_browse`] for listing controls. A control that ended a search
/// also empties the search bar.
fn update_listing(
    app: &mut Reelix,
    transition: impl FnOnce(&mut PageController) -> Option<FetchRequest>,
) -> Task<Message> {
    let was_searching = app.browse.as_ref().is_some_and(PageController::is_searching);
    let task = update_browse(app, transition);
    let still_searching = app.browse.as_ref().is_some_and(PageController::is_searching);
    if was_searching && !still_searching {
        app.search_query.clear();
        app.search_debounce_timer = None;
    }
    task
}

fn scroll_to_top() -> Task<Message> {
    let id = iced::widget::Id::new(MAIN_SCROLL_ID);
    let offset = iced::widget::scrollable::AbsoluteOffset { x: 0.0, y: 0.0 };
    iced::widget::operation::scroll_to(id, offset)
}

fn handle_switch_category(app: &mut Reelix, category: Category) -> Task<Message> {
    let Some(media) = app.browse.as_ref().map(PageController::media) else {
        return Task::none();
    };
    if matches!(app.route, Route::Movies(_) | Route::Tv(_)) {
        app.route = Route::browse(media, category);
    }
    update_listing(app, |c| Some(c.switch_category(category)))
}

fn handle_list_loaded(
    app: &mut Reelix,
    seq: u64,
    result: Result<ResultEnvelope, ApiError>,
) -> Task<Message> {
    let Some(controller) = app.browse.as_mut() else {
        tracing::debug!(seq, "list response with no active page");
        return Task::none();
    };
    if !controller.resolve(seq, result) {
        return Task::none();
    }

    let Some(controller) = app.browse.as_ref() else {
        return Task::none();
    };
    request_images(
        app,
        controller
            .envelope()
            .items
            .iter()
            .filter_map(|item| item.poster_path.as_deref()),
        ImageSize::Poster,
    )
}

fn handle_search_query_changed(app: &mut Reelix, query: String) -> Task<Message> {
    app.search_query = query;

    if app.search_query.trim().is_empty() {
        return Task::done(Message::ClearSearch);
    }

    app.search_debounce_timer = Some(std::time::Instant::now());
    Task::none()
}

fn handle_search_debounce_tick(app: &mut Reelix) -> Task<Message> {
    let Some(timer) = app.search_debounce_timer else {
        return Task::none();
    };

    if timer.elapsed() < SEARCH_DEBOUNCE {
        return Task::none();
    }

    app.search_debounce_timer = None;
    apply_search(app)
}

/// List pages search inside their own media type; everywhere else the query
/// opens the search page.
fn apply_search(app: &mut Reelix) -> Task<Message> {
    let query = app.search_query.trim().to_string();
    if query.is_empty() {
        return handle_clear_search(app);
    }

    let on_list_page = matches!(
        app.route,
        Route::Movies(_) | Route::Tv(_) | Route::GenreDetail(_) | Route::Search
    );
    if on_list_page && app.browse.is_some() {
        tracing::debug!(%query, "searching");
        update_browse(app, |c| c.set_search_query(&query))
    } else {
        navigate(app, Route::Search)
    }
}

fn handle_clear_search(app: &mut Reelix) -> Task<Message> {
    app.search_query.clear();
    app.search_debounce_timer = None;
    update_browse(app, |c| c.set_search_query(""))
}

fn start_home_load(app: &mut Reelix) -> Task<Message> {
    let Some(client) = app.tmdb_client.clone() else {
        return Task::none();
    };
    app.home_state = LoadingState::Loading;
    Task::perform(load_home(client), Message::HomeLoaded)
}

fn handle_home_loaded(app: &mut Reelix, result: Result<HomeContent, ApiError>) -> Task<Message> {
    match result {
        Ok(content) => {
            app.home_state = LoadingState::Idle;
            let backdrop = content
                .hero()
                .and_then(|hero| hero.backdrop_path.as_deref())
                .map_or_else(Task::none, |path| {
                    request_images(app, [path], ImageSize::Backdrop)
                });
            let posters = request_images(
                app,
                [
                    &content.trending_movies,
                    &content.trending_tv,
                    &content.top_rated_movies,
                ]
                .into_iter()
                .flat_map(|row| row.items.iter())
                .filter_map(|item| item.poster_path.as_deref()),
                ImageSize::Poster,
            );
            app.home_content = Some(content);
            Task::batch([backdrop, posters])
        }
        Err(e) => {
            app.home_state = LoadingState::Error(e.user_message());
            Task::none()
        }
    }
}

/// Both genre lists are needed by the filter panel and the genres page;
/// fetched once per session.
fn ensure_genres(app: &mut Reelix) -> Task<Message> {
    if app.genres_state == LoadingState::Loading
        || (!app.movie_genres.is_empty() && !app.tv_genres.is_empty())
    {
        return Task::none();
    }
    let Some(client) = app.tmdb_client.clone() else {
        return Task::none();
    };
    app.genres_state = LoadingState::Loading;

    let missing: Vec<MediaType> = MediaType::ALL
        .into_iter()
        .filter(|media| app.genres_for(*media).is_empty())
        .collect();
    Task::batch(missing.into_iter().map(|media| {
        Task::perform(load_genres(client.clone(), media), move |result| {
            Message::GenresLoaded(media, result)
        })
    }))
}

fn handle_genres_loaded(
    app: &mut Reelix,
    media: MediaType,
    result: Result<Vec<Genre>, ApiError>,
) -> Task<Message> {
    match result {
        Ok(genres) => {
            match media {
                MediaType::Movie => app.movie_genres = genres,
                MediaType::Tv => app.tv_genres = genres,
            }
            if !app.movie_genres.is_empty() && !app.tv_genres.is_empty() {
                app.genres_state = LoadingState::Idle;
            }
        }
        Err(e) => app.genres_state = LoadingState::Error(e.user_message()),
    }
    Task::none()
}

fn start_detail_load(app: &mut Reelix, media: MediaType, id: MediaId) -> Task<Message> {
    app.detail_target = Some((media, id));
    app.detail_state = LoadingState::Loading;
    app.detail_bundle = None;
    app.detail_images = None;
    app.detail_selected_season = None;
    app.detail_season = None;
    app.detail_season_state = LoadingState::Idle;

    let Some(client) = app.tmdb_client.clone() else {
        return Task::none();
    };
    Task::perform(load_detail(client, media, id), move |result| {
        Message::DetailLoaded(media, id, result)
    })
}

fn handle_detail_loaded(
    app: &mut Reelix,
    media: MediaType,
    id: MediaId,
    result: Result<Box<DetailBundle>, ApiError>,
) -> Task<Message> {
    if app.detail_target != Some((media, id)) {
        tracing::debug!(id, "discarding stale detail response");
        return Task::none();
    }

    let bundle = match result {
        Ok(bundle) => bundle,
        Err(e) => {
            app.detail_state = LoadingState::Error(e.user_message());
            return Task::none();
        }
    };
    app.detail_state = LoadingState::Idle;

    let details = &bundle.details;
    let mut tasks = vec![
        request_images(app, details.backdrop_path.as_deref(), ImageSize::Backdrop),
        request_images(app, details.poster_path.as_deref(), ImageSize::Poster),
        request_images(
            app,
            bundle
                .credits
                .cast
                .iter()
                .take(CAST_IMAGE_LIMIT)
                .filter_map(|member| member.profile_path.as_deref()),
            ImageSize::Profile,
        ),
        request_images(
            app,
            bundle
                .similar
                .items
                .iter()
                .chain(bundle.recommendations.items.iter())
                .filter_map(|item| item.poster_path.as_deref()),
            ImageSize::Poster,
        ),
    ];

    if let Some(client) = app.tmdb_client.clone() {
        tasks.push(Task::perform(load_images(client, media, id), move |result| {
            Message::ImagesLoaded(media, id, result)
        }));
    }

    if media == MediaType::Tv {
        let first_season = details
            .seasons
            .iter()
            .find(|season| season.season_number >= 1)
            .or(details.seasons.first())
            .map(|season| season.season_number);
        if let Some(season) = first_season {
            tasks.push(Task::done(Message::SelectSeason(season)));
        }
    }

    app.detail_bundle = Some(bundle);
    Task::batch(tasks)
}

fn handle_images_loaded(
    app: &mut Reelix,
    media: MediaType,
    id: MediaId,
    result: Result<ImageSet, ApiError>,
) -> Task<Message> {
    if app.detail_target != Some((media, id)) {
        return Task::none();
    }
    match result {
        Ok(images) => {
            let task = request_images(
                app,
                images
                    .backdrops
                    .iter()
                    .take(GALLERY_IMAGE_LIMIT)
                    .map(|image| image.file_path.as_str()),
                ImageSize::Still,
            );
            app.detail_images = Some(images);
            task
        }
        Err(e) => {
            tracing::debug!(error = %e, id, "omitting image gallery");
            Task::none()
        }
    }
}

fn handle_select_season(app: &mut Reelix, season: u32) -> Task<Message> {
    let Some((MediaType::Tv, tv_id)) = app.detail_target else {
        return Task::none();
    };
    let Some(client) = app.tmdb_client.clone() else {
        return Task::none();
    };
    app.detail_selected_season = Some(season);
    app.detail_season = None;
    app.detail_season_state = LoadingState::Loading;
    Task::perform(load_season(client, tv_id, season), move |result| {
        Message::SeasonLoaded(tv_id, season, result)
    })
}

fn handle_season_loaded(
    app: &mut Reelix,
    tv_id: MediaId,
    season: u32,
    result: Result<SeasonDetails, ApiError>,
) -> Task<Message> {
    if app.detail_target != Some((MediaType::Tv, tv_id))
        || app.detail_selected_season != Some(season)
    {
        return Task::none();
    }
    match result {
        Ok(details) => {
            app.detail_season_state = LoadingState::Idle;
            let stills = request_images(
                app,
                details
                    .episodes
                    .iter()
                    .filter_map(|episode| episode.still_path.as_deref()),
                ImageSize::Still,
            );
            app.detail_season = Some(details);
            stills
        }
        Err(e) => {
            app.detail_season_state = LoadingState::Error(e.user_message());
            Task::none()
        }
    }
}

fn handle_retry(app: &mut Reelix) -> Task<Message> {
    tracing::info!(route = ?app.route, "retrying");
    match app.route.clone() {
        Route::Home => start_home_load(app),
        Route::MovieDetail(id) => start_detail_load(app, MediaType::Movie, id),
        Route::TvDetail(id) => start_detail_load(app, MediaType::Tv, id),
        Route::Genres => {
            app.genres_state = LoadingState::Idle;
            ensure_genres(app)
        }
        Route::Movies(_) | Route::Tv(_) | Route::GenreDetail(_) | Route::Search => {
            update_browse(app, |c| Some(c.retry()))
        }
    }
}

/// Queues a fetch for every image path not already decoded.
fn request_images<'a>(
    app: &Reelix,
    paths: impl IntoIterator<Item = &'a str>,
    size: ImageSize,
) -> Task<Message> {
    let Some(client) = &app.tmdb_client else {
        return Task::none();
    };
    Task::batch(
        paths
            .into_iter()
            .map(|path| client.image_url(path, size))
            .filter(|url| app.image_store.get(url).is_none())
            .map(|url| Task::done(Message::LoadImage(url))),
    )
}

fn handle_load_image(app: &mut Reelix, url: String) -> Task<Message> {
    if !app.image_store.claim(&url) {
        return Task::none();
    }
    Task::perform(
        async move {
            let bytes = fetch_image_bytes(url.clone()).await;
            (url, bytes)
        },
        |(url, result)| Message::ImageLoaded(url, result.map(Handle::from_bytes)),
    )
}

fn handle_image_loaded(
    app: &mut Reelix,
    url: String,
    result: Result<Handle, String>,
) -> Task<Message> {
    match result {
        Ok(handle) => app.image_store.insert(url, handle),
        Err(error) => {
            tracing::debug!(%url, %error, "image fetch failed");
            app.image_store.fail(&url);
        }
    }
    Task::none()
}
