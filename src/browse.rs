use chrono::Datelike;
use iced::widget::{button, column, container, pick_list, row, text, Column, Row, Space};
use iced::{Border, Color, Element, Length, Padding};

use crate::components::{
    bold, chip_style, icon, outline_button_style, pick_list_style, ICON_CHEVRON_LEFT,
    ICON_CHEVRON_RIGHT, ICON_STAR_FILL, ICON_X_LG,
};
use crate::controller::{PageController, Phase};
use crate::media::{
    LoadingState, MediaType, Message, Route, ACCENT_GOLD, SURFACE_DARK_GRAY, TEXT_GRAY,
    TEXT_WHITE,
};
use crate::query::{network_name, Category, SortKey, TvStatus, NETWORKS};
use crate::Reelix;

const OLDEST_YEAR: i32 = 1950;
const RATING_STEPS: [f32; 5] = [5.0, 6.0, 7.0, 8.0, 9.0];
const ANY_YEAR: &str = "Any year";
const ANY_RATING: &str = "Any rating";
const ANY_STATUS: &str = "Any status";
const ANY_NETWORK: &str = "Any network";

/// Page buttons to show around `current`: the first and last page, two
/// neighbours either side, and `None` where a gap is collapsed.
pub fn page_window(current: u32, total: u32) -> Vec<Option<u32>> {
    let total = total.max(1);
    let current = current.clamp(1, total);
    let low = current.saturating_sub(2).max(1);
    let high = (current + 2).min(total);

    let mut pages = Vec::new();
    if low > 1 {
        pages.push(Some(1));
        if low > 2 {
            pages.push(None);
        }
    }
    pages.extend((low..=high).map(Some));
    if high < total {
        if high < total - 1 {
            pages.push(None);
        }
        pages.push(Some(total));
    }
    pages
}

fn rating_label(rating: f32) -> String {
    format!("{}+ stars", rating)
}

fn panel_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
        border: Border {
            color: Color::from_rgba(1.0, 1.0, 1.0, 0.08),
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

impl Reelix {
    pub fn view_browse_page(&self) -> Element<'_, Message> {
        let Some(controller) = &self.browse else {
            return self.view_empty_state("Nothing to show", "Pick a page from the menu");
        };

        let mut content = Column::new().spacing(24).width(Length::Fill);

        if matches!(self.route, Route::Movies(_) | Route::Tv(_)) {
            content = content.push(self.view_category_tabs(controller));
        }
        if self.route != Route::Search {
            content = content.push(self.view_filter_toolbar(controller));
            if self.filters_open {
                content = content.push(self.view_filter_panel(controller));
            }
        }
        if let Some(query) = controller.search_query() {
            content = content.push(self.view_search_header(query, controller));
        }

        content = content.push(self.view_listing(controller));

        let body =
            container(content).padding(Padding::new(0.0).left(48.0).right(48.0).bottom(48.0));

        column![self.view_browse_banner(controller), body]
            .width(Length::Fill)
            .into()
    }

    fn view_browse_banner(&self, controller: &PageController) -> Element<'_, Message> {
        let media = controller.media();
        let (title, subtitle) = match &self.route {
            Route::GenreDetail(genre) => (
                genre.name.clone(),
                format!("{} in the {} genre", media, genre.name),
            ),
            Route::Search => (
                String::from("Search"),
                String::from("Trending movies, or type in the search bar to find a title"),
            ),
            _ if controller.is_discover() => (
                media.to_string(),
                String::from("Filtered with discover"),
            ),
            _ => (
                format!("{} {}", controller.category().label(), media),
                controller.category().description(media).to_string(),
            ),
        };
        self.view_page_banner(title, subtitle)
    }

    fn view_category_tabs(&self, controller: &PageController) -> Element<'_, Message> {
        let media = controller.media();
        let mut tabs: Vec<Element<Message>> = MediaType::ALL
            .into_iter()
            .map(|tab_media| {
                let active = tab_media == media;
                button(text(tab_media.to_string()).size(14))
                    .padding(Padding::new(8.0).left(16.0).right(16.0))
                    .style(chip_style(active))
                    .on_press(Message::NavigateTo(Route::browse(tab_media, Category::Trending)))
                    .into()
            })
            .collect();
        tabs.push(Space::new().width(24).into());

        let show_active = !controller.is_discover() && !controller.is_searching();
        tabs.extend(Category::for_media(media).iter().map(|category| {
            let active = show_active && *category == controller.category();
            button(text(category.label()).size(14))
                .padding(Padding::new(8.0).left(16.0).right(16.0))
                .style(chip_style(active))
                .on_press(Message::SwitchCategory(*category))
                .into()
        }));

        Row::with_children(tabs)
            .spacing(8)
            .align_y(iced::Alignment::Center)
            .wrap()
            .into()
    }

    fn view_filter_toolbar(&self, controller: &PageController) -> Element<'_, Message> {
        let toggle_label = if self.filters_open {
            "Hide filters"
        } else {
            "Filters"
        };
        let mut toolbar = row![button(text(toggle_label).size(13).color(TEXT_WHITE))
            .padding(Padding::new(8.0).left(16.0).right(16.0))
            .style(outline_button_style)
            .on_press(Message::ToggleFilterPanel)]
        .spacing(12)
        .align_y(iced::Alignment::Center);

        let sort = pick_list(
            SortKey::ALL,
            Some(controller.filters().sort_key),
            Message::SetSort,
        )
        .text_size(13)
        .padding(Padding::new(8.0).left(12.0).right(12.0))
        .style(pick_list_style);
        toolbar = toolbar.push(text("Sort by").size(13).color(TEXT_GRAY));
        toolbar = toolbar.push(sort);

        if controller.has_user_filters() {
            toolbar = toolbar.push(
                button(
                    row![
                        icon(ICON_X_LG).size(11).color(TEXT_WHITE),
                        text("Clear all").size(13).color(TEXT_WHITE)
                    ]
                    .spacing(6)
                    .align_y(iced::Alignment::Center),
                )
                .padding(Padding::new(8.0).left(14.0).right(14.0))
                .style(outline_button_style)
                .on_press(Message::ClearFilters),
            );
        }

        toolbar
            .push(Space::new().width(Length::Fill))
            .push(self.view_stats_bar(controller))
            .into()
    }

    fn view_filter_panel(&self, controller: &PageController) -> Element<'_, Message> {
        let media = controller.media();
        let filters = controller.filters();

        let genres: Element<Message> = match (&self.genres_state, self.genres_for(media)) {
            (LoadingState::Error(message), []) => {
                text(message.as_str()).size(13).color(TEXT_GRAY).into()
            }
            (_, []) => text("Loading genres...").size(13).color(TEXT_GRAY).into(),
            (_, genres) => Row::with_children(
                genres
                    .iter()
                    .map(|genre| {
                        let active = filters.genre_ids.contains(&genre.id);
                        button(text(genre.name.as_str()).size(13))
                            .padding(Padding::new(6.0).left(14.0).right(14.0))
                            .style(chip_style(active))
                            .on_press(Message::ToggleGenre(genre.id))
                            .into()
                    })
                    .collect::<Vec<Element<Message>>>(),
            )
            .spacing(8)
            .wrap()
            .into(),
        };

        let current_year = chrono::Local::now().year();
        let mut years = vec![String::from(ANY_YEAR)];
        years.extend((OLDEST_YEAR..=current_year).rev().map(|y| y.to_string()));
        let selected_year = filters
            .year
            .map_or_else(|| String::from(ANY_YEAR), |y| y.to_string());
        let year_picker = pick_list(years, Some(selected_year), |choice: String| {
            Message::SetYear(choice.parse().ok())
        })
        .text_size(13)
        .padding(Padding::new(8.0).left(12.0).right(12.0))
        .style(pick_list_style);

        let mut ratings = vec![String::from(ANY_RATING)];
        ratings.extend(RATING_STEPS.iter().map(|r| rating_label(*r)));
        let selected_rating = filters
            .min_rating
            .map_or_else(|| String::from(ANY_RATING), rating_label);
        let rating_picker = pick_list(ratings, Some(selected_rating), |choice: String| {
            let rating = RATING_STEPS
                .iter()
                .copied()
                .find(|r| rating_label(*r) == choice);
            Message::SetMinRating(rating)
        })
        .text_size(13)
        .padding(Padding::new(8.0).left(12.0).right(12.0))
        .style(pick_list_style);

        let mut selects = row![
            labelled("Year", year_picker.into()),
            labelled("Minimum rating", rating_picker.into()),
        ]
        .spacing(24);

        if media == MediaType::Tv {
            let mut statuses = vec![String::from(ANY_STATUS)];
            statuses.extend(TvStatus::ALL.iter().map(|s| s.to_string()));
            let selected_status = filters
                .status
                .map_or_else(|| String::from(ANY_STATUS), |s| s.to_string());
            let status_picker = pick_list(statuses, Some(selected_status), |choice: String| {
                let status = TvStatus::ALL.into_iter().find(|s| s.to_string() == choice);
                Message::SetStatus(status)
            })
            .text_size(13)
            .padding(Padding::new(8.0).left(12.0).right(12.0))
            .style(pick_list_style);

            let mut networks = vec![String::from(ANY_NETWORK)];
            networks.extend(NETWORKS.iter().map(|n| n.name.to_string()));
            let selected_network = filters
                .network
                .and_then(network_name)
                .unwrap_or(ANY_NETWORK)
                .to_string();
            let network_picker = pick_list(networks, Some(selected_network), |choice: String| {
                let network = NETWORKS.iter().find(|n| n.name == choice).map(|n| n.id);
                Message::SetNetwork(network)
            })
            .text_size(13)
            .padding(Padding::new(8.0).left(12.0).right(12.0))
            .style(pick_list_style);

            selects = selects
                .push(labelled("Status", status_picker.into()))
                .push(labelled("Network", network_picker.into()));
        }

        container(
            column![labelled("Genres", genres), selects]
                .spacing(20)
                .width(Length::Fill),
        )
        .padding(20)
        .width(Length::Fill)
        .style(panel_style)
        .into()
    }

    fn view_search_header<'a>(
        &'a self,
        query: &'a str,
        controller: &PageController,
    ) -> Element<'a, Message> {
        let count = match controller.phase() {
            Phase::Success => format!("{} results", controller.envelope().total_results),
            _ => String::new(),
        };

        row![
            text(format!("Results for \"{}\"", query))
                .size(22)
                .color(TEXT_WHITE)
                .font(bold()),
            text(count).size(14).color(TEXT_GRAY),
            Space::new().width(Length::Fill),
            button(text("Clear search").size(13).color(TEXT_WHITE))
                .padding(Padding::new(8.0).left(14.0).right(14.0))
                .style(outline_button_style)
                .on_press(Message::ClearSearch)
        ]
        .spacing(16)
        .align_y(iced::Alignment::Center)
        .into()
    }

    fn view_stats_bar(&self, controller: &PageController) -> Element<'_, Message> {
        if controller.phase() != &Phase::Success || controller.envelope().is_empty() {
            return Space::new().width(0).height(0).into();
        }
        let stats = controller.stats();

        let mut bar = row![text(format!("{} titles", stats.total_results))
            .size(13)
            .color(TEXT_GRAY)]
        .spacing(16)
        .align_y(iced::Alignment::Center);

        if let Some(average) = stats.average_rating {
            bar = bar.push(
                row![
                    icon(ICON_STAR_FILL).size(11).color(ACCENT_GOLD),
                    text(format!("{:.1} avg", average)).size(13).color(TEXT_GRAY)
                ]
                .spacing(4)
                .align_y(iced::Alignment::Center),
            );
        }
        if let Some(year) = stats.most_recent_year {
            bar = bar.push(text(format!("Newest {}", year)).size(13).color(TEXT_GRAY));
        }
        if let Some(title) = stats.top_rated_title {
            bar = bar.push(text(format!("Top: {}", title)).size(13).color(TEXT_GRAY));
        }
        bar.into()
    }

    fn view_listing<'a>(&'a self, controller: &'a PageController) -> Element<'a, Message> {
        match controller.phase() {
            Phase::Idle | Phase::Loading => self.view_skeleton_grid(),
            Phase::Error(message) => self.view_error_state(message),
            Phase::Success if controller.envelope().is_empty() => {
                let hint = if controller.is_searching() {
                    "Try a different title or spelling"
                } else {
                    "Try removing some filters"
                };
                self.view_empty_state("No results found", hint)
            }
            Phase::Success => column![
                self.view_media_grid(&controller.envelope().items),
                self.view_pagination(controller)
            ]
            .spacing(32)
            .width(Length::Fill)
            .into(),
        }
    }

    fn view_pagination(&self, controller: &PageController) -> Element<'_, Message> {
        let current = controller.current_page();
        let total = controller.total_pages();
        if total <= 1 {
            return Space::new().width(0).height(0).into();
        }

        let mut buttons = vec![page_arrow(
            ICON_CHEVRON_LEFT,
            current.saturating_sub(1),
            current > 1,
        )];
        buttons.extend(page_window(current, total).into_iter().map(|slot| match slot {
            Some(page) => button(text(page.to_string()).size(13))
                .padding(Padding::new(8.0).left(14.0).right(14.0))
                .style(chip_style(page == current))
                .on_press(Message::ChangePage(page))
                .into(),
            None => text("...").size(13).color(TEXT_GRAY).into(),
        }));
        buttons.push(page_arrow(ICON_CHEVRON_RIGHT, current + 1, current < total));

        container(
            Row::with_children(buttons)
                .spacing(8)
                .align_y(iced::Alignment::Center),
        )
        .width(Length::Fill)
        .center_x(Length::Fill)
        .into()
    }

    pub fn view_genres_page(&self) -> Element<'_, Message> {
        let banner = self.view_page_banner(
            String::from("Genres"),
            String::from("Browse movies by genre"),
        );

        let body: Element<Message> = match (&self.genres_state, self.movie_genres.is_empty()) {
            (LoadingState::Error(message), true) => self.view_error_state(message),
            (_, true) => self.view_skeleton_grid(),
            (_, false) => Row::with_children(
                self.movie_genres
                    .iter()
                    .map(|genre| {
                        button(
                            container(text(genre.name.as_str()).size(16).font(bold()))
                                .width(Length::Fill)
                                .height(Length::Fill)
                                .center_x(Length::Fill)
                                .center_y(Length::Fill),
                        )
                        .width(Length::Fixed(200.0))
                        .height(Length::Fixed(96.0))
                        .padding(0)
                        .style(|_theme, status| {
                            let background = match status {
                                button::Status::Hovered => Color::from_rgba(1.0, 1.0, 1.0, 0.15),
                                _ => SURFACE_DARK_GRAY,
                            };
                            button::Style {
                                background: Some(iced::Background::Color(background)),
                                text_color: TEXT_WHITE,
                                border: Border {
                                    color: Color::from_rgba(1.0, 1.0, 1.0, 0.1),
                                    width: 1.0,
                                    radius: 8.0.into(),
                                },
                                shadow: iced::Shadow::default(),
                                snap: false,
                            }
                        })
                        .on_press(Message::NavigateTo(Route::GenreDetail(genre.clone())))
                        .into()
                    })
                    .collect::<Vec<Element<Message>>>(),
            )
            .spacing(16)
            .wrap()
            .into(),
        };

        column![
            banner,
            container(body).padding(Padding::new(0.0).left(48.0).right(48.0).bottom(48.0))
        ]
        .spacing(16)
        .width(Length::Fill)
        .into()
    }
}

fn page_arrow<'a>(icon_char: char, target: u32, enabled: bool) -> Element<'a, Message> {
    let arrow_button = button(icon(icon_char).size(14))
        .padding(Padding::new(8.0).left(12.0).right(12.0))
        .style(chip_style(false));
    if enabled {
        arrow_button.on_press(Message::ChangePage(target)).into()
    } else {
        arrow_button.into()
    }
}

fn labelled<'a>(label: &'a str, control: Element<'a, Message>) -> Element<'a, Message> {
    column![text(label).size(12).color(TEXT_GRAY), control]
        .spacing(8)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window_short_range_has_no_gaps() {
        let window = page_window(2, 4);

        assert_eq!(window, vec![Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn test_page_window_collapses_both_sides() {
        let window = page_window(50, 500);

        assert_eq!(
            window,
            vec![
                Some(1),
                None,
                Some(48),
                Some(49),
                Some(50),
                Some(51),
                Some(52),
                None,
                Some(500)
            ]
        );
    }

    #[test]
    fn test_page_window_adjacent_to_edges() {
        assert_eq!(
            page_window(4, 10),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5), Some(6), None, Some(10)]
        );
        assert_eq!(
            page_window(10, 10),
            vec![Some(1), None, Some(8), Some(9), Some(10)]
        );
    }

    #[test]
    fn test_rating_label_round_trips_through_steps() {
        let label = rating_label(7.0);

        assert_eq!(label, "7+ stars");
        assert_eq!(
            RATING_STEPS.iter().copied().find(|r| rating_label(*r) == label),
            Some(7.0)
        );
    }
}
