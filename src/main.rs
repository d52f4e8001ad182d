mod browse;
mod cards;
mod components;
mod controller;
mod detail;
mod error;
mod handlers;
mod hero;
mod media;
mod query;
mod settings;
mod tmdb;
mod trailer;

use std::time::{Duration, Instant};

use iced::widget::container;
use iced::widget::image::Handle;
use iced::{Element, Font, Length, Size, Subscription, Task, Theme};
use tracing_subscriber::filter::EnvFilter;

use controller::PageController;
use media::{
    DetailBundle, Genre, HomeContent, ImageSet, ImageStore, LoadingState, MediaId, MediaType,
    Message, Route, SeasonDetails, BACKGROUND_BLACK,
};
use settings::{AppSettings, SetupPage};
use tmdb::{ImageSize, TmdbClient};
use trailer::TrailerModal;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

pub struct Reelix {
    pub setup_page: Option<SetupPage>,
    pub tmdb_client: Option<TmdbClient>,
    pub route: Route,
    pub search_query: String,
    pub search_debounce_timer: Option<Instant>,
    pub home_state: LoadingState,
    pub home_content: Option<HomeContent>,
    pub browse: Option<PageController>,
    pub list_seq_floor: u64,
    pub filters_open: bool,
    pub movie_genres: Vec<Genre>,
    pub tv_genres: Vec<Genre>,
    pub genres_state: LoadingState,
    pub detail_target: Option<(MediaType, MediaId)>,
    pub detail_state: LoadingState,
    pub detail_bundle: Option<Box<DetailBundle>>,
    pub detail_images: Option<ImageSet>,
    pub detail_selected_season: Option<u32>,
    pub detail_season: Option<SeasonDetails>,
    pub detail_season_state: LoadingState,
    pub trailer: TrailerModal,
    pub image_store: ImageStore,
    pub hovered_card: Option<MediaId>,
}

impl Default for Reelix {
    fn default() -> Self {
        Self {
            setup_page: None,
            tmdb_client: None,
            route: Route::Home,
            search_query: String::new(),
            search_debounce_timer: None,
            home_state: LoadingState::Loading,
            home_content: None,
            browse: None,
            list_seq_floor: 0,
            filters_open: false,
            movie_genres: Vec::new(),
            tv_genres: Vec::new(),
            genres_state: LoadingState::Idle,
            detail_target: None,
            detail_state: LoadingState::Idle,
            detail_bundle: None,
            detail_images: None,
            detail_selected_season: None,
            detail_season: None,
            detail_season_state: LoadingState::Idle,
            trailer: TrailerModal::new(),
            image_store: ImageStore::new(),
            hovered_card: None,
        }
    }
}

impl Reelix {
    fn new() -> (Self, Task<Message>) {
        let settings = AppSettings::load();
        if !settings.is_valid() {
            tracing::info!("no TMDB token configured, showing setup");
            return (
                Self {
                    setup_page: Some(SetupPage::new(settings)),
                    ..Default::default()
                },
                Task::none(),
            );
        }

        let mut app = Self::default();
        let task = app.initialize_with_settings(settings);
        (app, task)
    }

    fn initialize_with_settings(&mut self, settings: AppSettings) -> Task<Message> {
        tracing::info!(
            language = %settings.language,
            base_url = %settings.base_url,
            "connecting to TMDB"
        );
        self.tmdb_client = Some(TmdbClient::from_settings(&settings));
        self.setup_page = None;
        handlers::navigate(self, Route::Home)
    }

    pub fn genres_for(&self, media: MediaType) -> &[Genre] {
        match media {
            MediaType::Movie => &self.movie_genres,
            MediaType::Tv => &self.tv_genres,
        }
    }

    /// Decoded image for a TMDB path, if it has finished loading.
    pub fn image(&self, path: Option<&str>, size: ImageSize) -> Option<&Handle> {
        let client = self.tmdb_client.as_ref()?;
        self.image_store.get(&client.image_url(path?, size))
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        if let Message::Setup(setup_msg) = message {
            if let Some(ref mut setup) = self.setup_page {
                if let Some(settings) = setup.update(setup_msg) {
                    return self.initialize_with_settings(settings);
                }
            }
            return Task::none();
        }
        handlers::handle_message(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        if let Some(ref setup) = self.setup_page {
            return setup.view().map(Message::Setup);
        }

        let main_content = container(self.view_main_content())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(BACKGROUND_BLACK)),
                ..Default::default()
            });

        if self.trailer.is_open() {
            let thumbnail = self
                .trailer
                .thumbnail_url()
                .and_then(|url| self.image_store.get(&url));
            let modal = self.trailer.view(thumbnail).map(Message::Trailer);
            return iced::widget::stack![main_content, modal]
                .width(Length::Fill)
                .height(Length::Fill)
                .into();
        }

        main_content.into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.search_debounce_timer.is_some() {
            iced::time::every(Duration::from_millis(50)).map(|_| Message::SearchDebounceTick)
        } else {
            Subscription::none()
        }
    }
}

fn main() -> iced::Result {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reelix=info")),
        )
        .init();

    iced::application(Reelix::new, Reelix::update, Reelix::view)
        .title("Reelix")
        .theme(Reelix::theme)
        .window_size(Size::new(1280.0, 800.0))
        .font(iced_fonts::BOOTSTRAP_FONT_BYTES)
        .default_font(Font::DEFAULT)
        .subscription(Reelix::subscription)
        .run()
}
