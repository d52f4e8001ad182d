use iced::widget::{
    button, column, container, pick_list, row, scrollable, text, text_input, Column, Row, Space,
};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::handlers::MAIN_SCROLL_ID;
use crate::media::{
    Message, NavItem, Route, ACCENT_RED, SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE,
};
use crate::query::Category;
use crate::Reelix;

pub const ICON_PLAY_FILL: char = '\u{F4F4}';
pub const ICON_INFO_CIRCLE: char = '\u{F431}';
pub const ICON_SEARCH: char = '\u{F52A}';
pub const ICON_FILM: char = '\u{F3A9}';
pub const ICON_CHEVRON_LEFT: char = '\u{F284}';
pub const ICON_CHEVRON_RIGHT: char = '\u{F285}';
pub const ICON_STAR_FILL: char = '\u{F586}';
pub const ICON_X_LG: char = '\u{F659}';
pub const ICON_PERSON_FILL: char = '\u{F4DA}';

const HEADER_HEIGHT: f32 = 72.0;

pub fn icon(icon_char: char) -> iced::widget::Text<'static> {
    text(icon_char.to_string()).font(iced::Font {
        family: iced::font::Family::Name("bootstrap-icons"),
        ..Default::default()
    })
}

pub fn bold() -> iced::Font {
    iced::Font {
        weight: iced::font::Weight::Bold,
        ..Default::default()
    }
}

pub fn format_runtime(minutes: u32) -> String {
    let (h, m) = (minutes / 60, minutes % 60);
    match (h, m) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

pub fn section_title(title: &str) -> iced::widget::Text<'_> {
    text(title).size(22).color(TEXT_WHITE).font(bold())
}

pub fn hidden_scrollbar_style(_theme: &iced::Theme, _status: scrollable::Status) -> scrollable::Style {
    let hidden_rail = scrollable::Rail {
        background: None,
        border: Border::default(),
        scroller: scrollable::Scroller {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
        },
    };
    scrollable::Style {
        container: container::Style::default(),
        vertical_rail: hidden_rail,
        horizontal_rail: hidden_rail,
        gap: None,
        auto_scroll: scrollable::AutoScroll {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
            shadow: Shadow::default(),
            icon: Color::TRANSPARENT,
        },
    }
}

pub fn primary_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => Color::from_rgb(0.698, 0.027, 0.063),
        button::Status::Disabled => Color::from_rgba(0.898, 0.035, 0.078, 0.4),
        _ => ACCENT_RED,
    };
    button::Style {
        background: Some(iced::Background::Color(background)),
        text_color: TEXT_WHITE,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 4.0.into(),
        },
        shadow: Shadow::default(),
        snap: false,
    }
}

pub fn outline_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let bg_alpha = match status {
        button::Status::Hovered => 0.25,
        _ => 0.1,
    };
    button::Style {
        background: Some(iced::Background::Color(Color::from_rgba(
            1.0, 1.0, 1.0, bg_alpha,
        ))),
        text_color: TEXT_WHITE,
        border: Border {
            color: Color::from_rgba(1.0, 1.0, 1.0, 0.3),
            width: 1.0,
            radius: 4.0.into(),
        },
        shadow: Shadow::default(),
        snap: false,
    }
}

/// Pill used for category tabs, genre toggles and page numbers.
pub fn chip_style(active: bool) -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let background = match (active, status) {
            (true, _) => ACCENT_RED,
            (false, button::Status::Hovered) => Color::from_rgba(1.0, 1.0, 1.0, 0.2),
            (false, button::Status::Disabled) => Color::TRANSPARENT,
            (false, _) => Color::from_rgba(1.0, 1.0, 1.0, 0.08),
        };
        let text_color = match status {
            button::Status::Disabled if !active => Color::from_rgba(1.0, 1.0, 1.0, 0.3),
            _ => TEXT_WHITE,
        };
        button::Style {
            background: Some(iced::Background::Color(background)),
            text_color,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 16.0.into(),
            },
            shadow: Shadow::default(),
            snap: false,
        }
    }
}

pub fn pick_list_style(_theme: &iced::Theme, _status: pick_list::Status) -> pick_list::Style {
    pick_list::Style {
        text_color: TEXT_WHITE,
        placeholder_color: TEXT_GRAY,
        handle_color: TEXT_WHITE,
        background: iced::Background::Color(Color::from_rgba(1.0, 1.0, 1.0, 0.1)),
        border: Border {
            color: Color::from_rgba(1.0, 1.0, 1.0, 0.2),
            width: 1.0,
            radius: 4.0.into(),
        },
    }
}

pub fn skeleton_style(radius: f32) -> impl Fn(&iced::Theme) -> container::Style {
    skeleton_style_alpha(radius, 0.5)
}

pub fn skeleton_style_alpha(radius: f32, alpha: f32) -> impl Fn(&iced::Theme) -> container::Style {
    move |_theme| container::Style {
        background: Some(iced::Background::Color(Color::from_rgba(
            0.2, 0.2, 0.2, alpha,
        ))),
        border: Border {
            radius: radius.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

impl Reelix {
    pub fn view_header(&self) -> Element<'_, Message> {
        let left_section = row![self.view_logo(), self.view_navigation()]
            .spacing(32)
            .align_y(iced::Alignment::Center);

        let header_content = row![
            left_section,
            Space::new().width(Length::Fill),
            self.view_search_bar()
        ]
        .padding(Padding::new(16.0).left(48.0).right(48.0))
        .align_y(iced::Alignment::Center);

        container(header_content)
            .width(Length::Fill)
            .height(Length::Fixed(HEADER_HEIGHT))
            .style(|_theme| container::Style {
                background: Some(iced::Background::Gradient(iced::Gradient::Linear(
                    iced::gradient::Linear::new(std::f32::consts::PI)
                        .add_stop(0.0, Color::from_rgba(0.0, 0.0, 0.0, 0.95))
                        .add_stop(0.6, Color::from_rgba(0.0, 0.0, 0.0, 0.8))
                        .add_stop(1.0, Color::from_rgba(0.0, 0.0, 0.0, 0.4)),
                ))),
                ..Default::default()
            })
            .into()
    }

    pub fn view_logo(&self) -> Element<'_, Message> {
        let logo = text("REELIX").size(28).color(ACCENT_RED).font(bold());

        button(logo)
            .padding(0)
            .style(|_theme, _status| button::Style {
                background: None,
                text_color: ACCENT_RED,
                border: Border::default(),
                shadow: Shadow::default(),
                snap: false,
            })
            .on_press(Message::NavigateTo(Route::Home))
            .into()
    }

    pub fn view_navigation(&self) -> Element<'_, Message> {
        let nav_items = [
            (NavItem::Home, "Home", Route::Home),
            (NavItem::Movies, "Movies", Route::Movies(Category::Trending)),
            (NavItem::Tv, "TV Shows", Route::Tv(Category::Trending)),
            (NavItem::Genres, "Genres", Route::Genres),
        ];

        let nav_buttons: Vec<Element<Message>> = nav_items
            .into_iter()
            .map(|(nav_item, label, route)| self.view_nav_button(nav_item, label, route))
            .collect();

        Row::with_children(nav_buttons)
            .spacing(16)
            .align_y(iced::Alignment::Center)
            .into()
    }

    pub fn view_nav_button(
        &self,
        nav_item: NavItem,
        label: &'static str,
        route: Route,
    ) -> Element<'_, Message> {
        let is_active = self.route.nav_item() == nav_item;
        let label_text = text(label)
            .size(14)
            .color(if is_active { TEXT_WHITE } else { TEXT_GRAY })
            .shaping(text::Shaping::Advanced);

        let button_content: Element<Message> = if is_active {
            let underline = container(Space::new().width(Length::Fill).height(2)).style(|_theme| {
                container::Style {
                    background: Some(iced::Background::Color(ACCENT_RED)),
                    ..Default::default()
                }
            });
            column![label_text, underline]
                .spacing(4)
                .align_x(iced::Alignment::Center)
                .into()
        } else {
            label_text.into()
        };

        button(button_content)
            .padding(Padding::new(8.0).left(12.0).right(12.0))
            .style(move |_theme, status| {
                let text_color = match status {
                    button::Status::Hovered => TEXT_WHITE,
                    _ if is_active => TEXT_WHITE,
                    _ => TEXT_GRAY,
                };
                button::Style {
                    background: Some(iced::Background::Color(Color::TRANSPARENT)),
                    text_color,
                    border: Border::default(),
                    shadow: Shadow::default(),
                    snap: false,
                }
            })
            .on_press(Message::NavigateTo(route))
            .into()
    }

    pub fn view_search_bar(&self) -> Element<'_, Message> {
        let placeholder = match self.browse.as_ref().map(|c| c.media()) {
            Some(media) if self.route != Route::Search => format!("Search {}...", media),
            _ => String::from("Search movies..."),
        };

        let search_input = text_input(&placeholder, &self.search_query)
            .on_input(Message::SearchQueryChanged)
            .on_submit(Message::SearchSubmit)
            .padding(8)
            .width(Length::Fixed(200.0))
            .style(|_theme, _status| text_input::Style {
                background: iced::Background::Color(Color::TRANSPARENT),
                border: Border::default(),
                icon: TEXT_GRAY,
                placeholder: TEXT_GRAY,
                value: TEXT_WHITE,
                selection: ACCENT_RED,
            });

        let mut search_content = row![icon(ICON_SEARCH).size(14).color(TEXT_GRAY), search_input]
            .spacing(8)
            .align_y(iced::Alignment::Center);

        if !self.search_query.is_empty() {
            search_content = search_content.push(
                button(icon(ICON_X_LG).size(12).color(TEXT_GRAY))
                    .padding(4)
                    .style(|_theme, _status| button::Style {
                        background: None,
                        text_color: TEXT_GRAY,
                        border: Border::default(),
                        shadow: Shadow::default(),
                        snap: false,
                    })
                    .on_press(Message::ClearSearch),
            );
        }

        container(search_content)
            .padding(Padding::new(4.0).left(12.0).right(8.0))
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(Color::from_rgba(
                    0.0, 0.0, 0.0, 0.7,
                ))),
                border: Border {
                    color: TEXT_GRAY,
                    width: 1.0,
                    radius: 24.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    /// The routed page inside the shared scroll area, with the header on top.
    pub fn view_main_content(&self) -> Element<'_, Message> {
        let page = match &self.route {
            Route::Home => self.view_home_page(),
            Route::Movies(_) | Route::Tv(_) | Route::GenreDetail(_) | Route::Search => {
                self.view_browse_page()
            }
            Route::MovieDetail(_) | Route::TvDetail(_) => self.view_detail_page(),
            Route::Genres => self.view_genres_page(),
        };

        let scroll_area = scrollable(
            column![Space::new().height(HEADER_HEIGHT), page].width(Length::Fill),
        )
        .id(iced::widget::Id::new(MAIN_SCROLL_ID))
        .direction(scrollable::Direction::Vertical(
            scrollable::Scrollbar::new().width(0).scroller_width(0),
        ))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(hidden_scrollbar_style);

        iced::widget::stack![scroll_area, self.view_header()]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    pub fn view_error_state<'a>(&'a self, error_message: &'a str) -> Element<'a, Message> {
        let error_text = text(error_message).size(18).color(ACCENT_RED);
        let retry_button = button(text("Retry").size(16).color(TEXT_WHITE))
            .padding(Padding::new(12.0).left(24.0).right(24.0))
            .style(primary_button_style)
            .on_press(Message::Retry);

        container(
            column![error_text, retry_button]
                .spacing(16)
                .align_x(iced::Alignment::Center),
        )
        .width(Length::Fill)
        .height(Length::Fixed(360.0))
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
    }

    pub fn view_empty_state<'a>(&'a self, headline: &'a str, hint: &'a str) -> Element<'a, Message> {
        container(
            column![
                icon(ICON_FILM).size(48).color(TEXT_GRAY),
                text(headline).size(20).color(TEXT_WHITE),
                text(hint).size(14).color(TEXT_GRAY)
            ]
            .spacing(12)
            .align_x(iced::Alignment::Center),
        )
        .width(Length::Fill)
        .height(Length::Fixed(360.0))
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
    }

    pub fn view_skeleton_hero(&self) -> Element<'_, Message> {
        let title_skeleton =
            container(Space::new().width(300.0).height(48.0)).style(skeleton_style_alpha(4.0, 0.6));
        let desc_line_one =
            container(Space::new().width(400.0).height(16.0)).style(skeleton_style_alpha(4.0, 0.4));
        let desc_line_two =
            container(Space::new().width(350.0).height(16.0)).style(skeleton_style_alpha(4.0, 0.4));
        let button_row = row![
            container(Space::new().width(140.0).height(44.0)).style(skeleton_style(4.0)),
            container(Space::new().width(120.0).height(44.0)).style(skeleton_style(4.0))
        ]
        .spacing(12);

        let hero_text = column![title_skeleton, desc_line_one, desc_line_two, button_row]
            .spacing(16)
            .padding(Padding::new(48.0).left(64.0));

        container(hero_text)
            .width(Length::Fill)
            .height(Length::Fixed(520.0))
            .align_y(iced::alignment::Vertical::Center)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                ..Default::default()
            })
            .into()
    }

    pub fn view_skeleton_rows(&self, rows: usize) -> Element<'_, Message> {
        let sections: Vec<Element<Message>> = (0..rows)
            .map(|_| {
                let title = container(Space::new().width(150.0).height(24.0))
                    .style(skeleton_style_alpha(4.0, 0.6));
                column![title, self.view_skeleton_card_row(6)]
                    .spacing(16)
                    .into()
            })
            .collect();

        Column::with_children(sections)
            .spacing(32)
            .padding(Padding::new(32.0).left(48.0).right(48.0))
            .width(Length::Fill)
            .into()
    }

    pub fn view_skeleton_grid(&self) -> Element<'_, Message> {
        let rows: Vec<Element<Message>> = (0..3).map(|_| self.view_skeleton_card_row(6)).collect();

        Column::with_children(rows)
            .spacing(24)
            .width(Length::Fill)
            .into()
    }

    fn view_skeleton_card_row(&self, cards: usize) -> Element<'_, Message> {
        let card_skeletons: Vec<Element<Message>> = (0..cards)
            .map(|_| {
                container(Space::new().width(150.0).height(225.0))
                    .style(skeleton_style(8.0))
                    .into()
            })
            .collect();

        Row::with_children(card_skeletons).spacing(16).into()
    }
}
