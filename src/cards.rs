use iced::widget::{column, container, row, scrollable, text, Column, Row, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::components::{
    bold, hidden_scrollbar_style, icon, section_title, ICON_FILM, ICON_PERSON_FILL, ICON_STAR_FILL,
};
use crate::media::{
    CastMember, ContentSummary, Message, Route, ACCENT_GOLD, SURFACE_DARK_GRAY, TEXT_GRAY,
    TEXT_WHITE,
};
use crate::tmdb::ImageSize;
use crate::Reelix;

pub const CARD_WIDTH: f32 = 150.0;
pub const CARD_HEIGHT: f32 = 225.0;
const CARD_SPACING: f32 = 16.0;
const GRID_COLUMNS: usize = 6;
const ROW_LIMIT: usize = 20;
const PROFILE_WIDTH: f32 = 120.0;
const PROFILE_HEIGHT: f32 = 180.0;

pub fn rating_badge<'a>(rating: f32) -> Element<'a, Message> {
    let content = row![
        icon(ICON_STAR_FILL).size(11).color(ACCENT_GOLD),
        text(format!("{:.1}", rating)).size(12).color(TEXT_WHITE)
    ]
    .spacing(4)
    .align_y(iced::Alignment::Center);

    container(content)
        .padding(Padding::new(3.0).left(8.0).right(8.0))
        .style(|_theme| container::Style {
            background: Some(iced::Background::Color(Color::from_rgba(
                0.0, 0.0, 0.0, 0.75,
            ))),
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 10.0.into(),
            },
            ..Default::default()
        })
        .into()
}

fn card_frame_style(hovered: bool) -> impl Fn(&iced::Theme) -> container::Style {
    move |_theme| container::Style {
        background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
        border: Border {
            color: if hovered { TEXT_WHITE } else { Color::TRANSPARENT },
            width: if hovered { 2.0 } else { 0.0 },
            radius: 8.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, if hovered { 0.5 } else { 0.3 }),
            offset: iced::Vector::new(0.0, if hovered { 6.0 } else { 4.0 }),
            blur_radius: if hovered { 12.0 } else { 8.0 },
        },
        ..Default::default()
    }
}

impl Reelix {
    /// Titled, horizontally scrolling row of poster cards.
    pub fn view_media_row<'a>(
        &'a self,
        title: &'a str,
        items: &'a [ContentSummary],
    ) -> Element<'a, Message> {
        if items.is_empty() {
            return Space::new().width(0).height(0).into();
        }

        let cards: Vec<Element<Message>> = items
            .iter()
            .take(ROW_LIMIT)
            .map(|item| self.view_media_card(item))
            .collect();

        let cards_row = Row::with_children(cards)
            .spacing(CARD_SPACING)
            .align_y(iced::Alignment::Start);

        let scrollable_cards = scrollable(cards_row)
            .direction(scrollable::Direction::Horizontal(
                scrollable::Scrollbar::new().width(0).scroller_width(0),
            ))
            .width(Length::Fill)
            .style(hidden_scrollbar_style);

        column![section_title(title), scrollable_cards]
            .spacing(16)
            .width(Length::Fill)
            .into()
    }

    /// Fixed-width grid used by list pages.
    pub fn view_media_grid<'a>(&'a self, items: &'a [ContentSummary]) -> Element<'a, Message> {
        let rows: Vec<Element<Message>> = items
            .chunks(GRID_COLUMNS)
            .map(|chunk| {
                let cards: Vec<Element<Message>> =
                    chunk.iter().map(|item| self.view_media_card(item)).collect();
                Row::with_children(cards)
                    .spacing(CARD_SPACING)
                    .align_y(iced::Alignment::Start)
                    .into()
            })
            .collect();

        Column::with_children(rows)
            .spacing(28)
            .width(Length::Fill)
            .into()
    }

    pub fn view_media_card<'a>(&'a self, item: &'a ContentSummary) -> Element<'a, Message> {
        let is_hovered = self.hovered_card == Some(item.id);
        let poster = self.view_card_poster(item);

        let mut layers = iced::widget::stack![poster];
        if item.rating > 0.0 {
            layers = layers.push(
                container(rating_badge(item.rating))
                    .width(Length::Fill)
                    .align_x(iced::alignment::Horizontal::Right)
                    .padding(8),
            );
        }
        if is_hovered {
            layers = layers.push(self.view_card_hover_overlay(item));
        }

        let framed = container(layers)
            .width(Length::Fixed(CARD_WIDTH))
            .height(Length::Fixed(CARD_HEIGHT))
            .style(card_frame_style(is_hovered));

        let caption = column![
            text(item.title.as_str())
                .size(13)
                .color(TEXT_WHITE)
                .wrapping(text::Wrapping::Word),
            text(item.year().map(|y| y.to_string()).unwrap_or_default())
                .size(12)
                .color(TEXT_GRAY)
        ]
        .spacing(2)
        .width(Length::Fixed(CARD_WIDTH));

        iced::widget::mouse_area(column![framed, caption].spacing(8))
            .on_enter(Message::HoverCard(Some(item.id)))
            .on_exit(Message::HoverCard(None))
            .on_press(Message::NavigateTo(Route::detail(item.media_type, item.id)))
            .interaction(iced::mouse::Interaction::Pointer)
            .into()
    }

    fn view_card_hover_overlay<'a>(&'a self, item: &'a ContentSummary) -> Element<'a, Message> {
        let overview = crate::media::truncate_description(&item.overview, 90);
        let content = column![
            text(item.title.as_str())
                .size(13)
                .color(TEXT_WHITE)
                .font(bold())
                .wrapping(text::Wrapping::Word),
            text(overview).size(11).color(TEXT_GRAY)
        ]
        .spacing(6)
        .padding(10);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_y(iced::alignment::Vertical::Bottom)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                    iced::gradient::Linear::new(std::f32::consts::PI)
                        .add_stop(0.0, Color::from_rgba(0.0, 0.0, 0.0, 0.95))
                        .add_stop(0.5, Color::from_rgba(0.0, 0.0, 0.0, 0.6))
                        .add_stop(1.0, Color::TRANSPARENT),
                ))),
                border: Border {
                    radius: 8.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            })
            .into()
    }

    pub fn view_card_poster(&self, item: &ContentSummary) -> Element<'_, Message> {
        match self.image(item.poster_path.as_deref(), ImageSize::Poster) {
            Some(handle) => iced::widget::image(handle.clone())
                .width(Length::Fixed(CARD_WIDTH))
                .height(Length::Fixed(CARD_HEIGHT))
                .content_fit(iced::ContentFit::Cover)
                .into(),
            None => view_placeholder(ICON_FILM, CARD_WIDTH, CARD_HEIGHT),
        }
    }

    pub fn view_cast_card<'a>(&'a self, member: &'a CastMember) -> Element<'a, Message> {
        let photo: Element<Message> =
            match self.image(member.profile_path.as_deref(), ImageSize::Profile) {
                Some(handle) => iced::widget::image(handle.clone())
                    .width(Length::Fixed(PROFILE_WIDTH))
                    .height(Length::Fixed(PROFILE_HEIGHT))
                    .content_fit(iced::ContentFit::Cover)
                    .into(),
                None => view_placeholder(ICON_PERSON_FILL, PROFILE_WIDTH, PROFILE_HEIGHT),
            };

        let framed = container(photo)
            .width(Length::Fixed(PROFILE_WIDTH))
            .height(Length::Fixed(PROFILE_HEIGHT))
            .style(card_frame_style(false));

        column![
            framed,
            text(member.name.as_str())
                .size(13)
                .color(TEXT_WHITE)
                .font(bold())
                .wrapping(text::Wrapping::Word),
            text(member.character.as_str())
                .size(12)
                .color(TEXT_GRAY)
                .wrapping(text::Wrapping::Word)
        ]
        .spacing(4)
        .width(Length::Fixed(PROFILE_WIDTH))
        .into()
    }
}

pub fn view_placeholder<'a>(icon_char: char, width: f32, height: f32) -> Element<'a, Message> {
    container(icon(icon_char).size(40).color(TEXT_GRAY))
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .center_x(Length::Fixed(width))
        .center_y(Length::Fixed(height))
        .style(|_theme| container::Style {
            background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
            border: Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}
