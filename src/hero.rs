use iced::widget::{button, column, container, row, text, Column, Space};
use iced::{Color, Element, Length, Padding};

use crate::cards::rating_badge;
use crate::components::{
    bold, icon, outline_button_style, primary_button_style, ICON_INFO_CIRCLE, ICON_PLAY_FILL,
};
use crate::media::{
    truncate_description, ContentSummary, LoadingState, Message, Route, SURFACE_DARK_GRAY,
    TEXT_GRAY, TEXT_WHITE,
};
use crate::tmdb::ImageSize;
use crate::trailer::TrailerMessage;
use crate::Reelix;

const HERO_HEIGHT: f32 = 560.0;

impl Reelix {
    pub fn view_home_page(&self) -> Element<'_, Message> {
        match &self.home_state {
            LoadingState::Loading => column![self.view_skeleton_hero(), self.view_skeleton_rows(3)]
                .width(Length::Fill)
                .into(),
            LoadingState::Error(message) => self.view_error_state(message),
            LoadingState::Idle => match &self.home_content {
                Some(content) => {
                    let hero: Element<Message> = match content.hero() {
                        Some(item) => self.view_hero(item),
                        None => self.view_hero_placeholder(),
                    };
                    let rows = column![
                        self.view_media_row("Trending Movies", &content.trending_movies.items),
                        self.view_media_row("Trending TV Shows", &content.trending_tv.items),
                        self.view_media_row("Top Rated Movies", &content.top_rated_movies.items),
                    ]
                    .spacing(40)
                    .padding(Padding::new(32.0).left(48.0).right(48.0).bottom(48.0));

                    column![hero, rows].width(Length::Fill).into()
                }
                None => self.view_hero_placeholder(),
            },
        }
    }

    pub fn view_hero_placeholder(&self) -> Element<'_, Message> {
        container(
            text("No featured content available")
                .size(24)
                .color(TEXT_GRAY),
        )
        .width(Length::Fill)
        .height(Length::Fixed(HERO_HEIGHT))
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
            ..Default::default()
        })
        .into()
    }

    pub fn view_hero<'a>(&'a self, item: &'a ContentSummary) -> Element<'a, Message> {
        let title = text(item.title.as_str())
            .size(48)
            .color(TEXT_WHITE)
            .font(bold())
            .wrapping(text::Wrapping::Word);

        let mut metadata = row![].spacing(12).align_y(iced::Alignment::Center);
        if let Some(year) = item.year() {
            metadata = metadata.push(text(year.to_string()).size(14).color(TEXT_GRAY));
        }
        metadata = metadata.push(rating_badge(item.rating));

        let description =
            container(text(truncate_description(&item.overview, 200)).size(16).color(TEXT_GRAY))
                .max_width(520.0);

        let trailer_button = button(
            row![
                icon(ICON_PLAY_FILL).size(16).color(TEXT_WHITE),
                text("Play Trailer").size(15).color(TEXT_WHITE)
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center),
        )
        .padding(Padding::new(12.0).left(24.0).right(28.0))
        .style(primary_button_style)
        .on_press(Message::Trailer(TrailerMessage::Open {
            media: item.media_type,
            id: item.id,
            title: item.title.clone(),
        }));

        let info_button = button(
            row![
                icon(ICON_INFO_CIRCLE).size(16).color(TEXT_WHITE),
                text("More Info").size(15).color(TEXT_WHITE)
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center),
        )
        .padding(Padding::new(12.0).left(24.0).right(28.0))
        .style(outline_button_style)
        .on_press(Message::NavigateTo(Route::detail(item.media_type, item.id)));

        let text_content = column![
            title,
            metadata,
            description,
            row![trailer_button, info_button].spacing(12)
        ]
        .spacing(20)
        .max_width(640.0)
        .padding(Padding::new(64.0).left(64.0).right(64.0));

        self.view_backdrop_stack(item.backdrop_path.as_deref(), HERO_HEIGHT, text_content.into())
    }

    /// Backdrop image with the left and bottom fades used by every banner.
    pub fn view_backdrop_stack<'a>(
        &'a self,
        backdrop_path: Option<&str>,
        height: f32,
        content: Element<'a, Message>,
    ) -> Element<'a, Message> {
        let backdrop: Element<Message> =
            match self.image(backdrop_path, ImageSize::Backdrop) {
                Some(handle) => iced::widget::image(handle.clone())
                    .width(Length::Fill)
                    .height(Length::Fixed(height))
                    .content_fit(iced::ContentFit::Cover)
                    .into(),
                None => container(Space::new().width(Length::Fill).height(Length::Fill))
                    .width(Length::Fill)
                    .height(Length::Fixed(height))
                    .style(|_theme| container::Style {
                        background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                        ..Default::default()
                    })
                    .into(),
            };

        let left_gradient = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_y(iced::alignment::Vertical::Center)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                    iced::gradient::Linear::new(std::f32::consts::FRAC_PI_2)
                        .add_stop(0.0, Color::from_rgba(0.0, 0.0, 0.0, 0.95))
                        .add_stop(0.35, Color::from_rgba(0.0, 0.0, 0.0, 0.8))
                        .add_stop(0.6, Color::from_rgba(0.0, 0.0, 0.0, 0.3))
                        .add_stop(0.85, Color::TRANSPARENT),
                ))),
                ..Default::default()
            });

        let bottom_gradient = container(Space::new().width(Length::Fill).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                    iced::gradient::Linear::new(std::f32::consts::PI)
                        .add_stop(0.0, Color::BLACK)
                        .add_stop(0.15, Color::from_rgba(0.0, 0.0, 0.0, 0.4))
                        .add_stop(0.3, Color::TRANSPARENT),
                ))),
                ..Default::default()
            });

        iced::widget::stack![backdrop, bottom_gradient, left_gradient]
            .width(Length::Fill)
            .height(Length::Fixed(height))
            .into()
    }

    /// Title strip at the top of list pages.
    pub fn view_page_banner<'a>(&'a self, title: String, subtitle: String) -> Element<'a, Message> {
        let content: Column<Message> = column![
            text(title).size(36).color(TEXT_WHITE).font(bold()),
            text(subtitle).size(15).color(TEXT_GRAY)
        ]
        .spacing(8);

        container(content)
            .width(Length::Fill)
            .padding(Padding::new(24.0).left(48.0).right(48.0).top(32.0))
            .into()
    }
}
