use iced::widget::{
    button, column, container, pick_list, row, scrollable, text, Column, Row, Space,
};
use iced::{Border, Color, Element, Length, Padding};

use crate::cards::{rating_badge, view_placeholder, CARD_HEIGHT, CARD_WIDTH};
use crate::components::{
    bold, format_runtime, hidden_scrollbar_style, icon, pick_list_style, primary_button_style,
    section_title, ICON_FILM, ICON_PLAY_FILL,
};
use crate::media::{
    format_money, truncate_description, DetailBundle, Episode, LoadingState, MediaDetails,
    MediaType, Message, Review, TEXT_GRAY, TEXT_WHITE,
};
use crate::tmdb::ImageSize;
use crate::trailer::TrailerMessage;
use crate::Reelix;

const DETAIL_HERO_HEIGHT: f32 = 600.0;
const CAST_LIMIT: usize = 12;
const REVIEW_LIMIT: usize = 3;
const GALLERY_LIMIT: usize = 8;
const STILL_WIDTH: f32 = 240.0;
const STILL_HEIGHT: f32 = 135.0;

fn horizontal_scroll(content: Row<'_, Message>) -> Element<'_, Message> {
    scrollable(content)
        .direction(scrollable::Direction::Horizontal(
            scrollable::Scrollbar::new().width(0).scroller_width(0),
        ))
        .width(Length::Fill)
        .style(hidden_scrollbar_style)
        .into()
}

fn format_episode_number(season: u32, episode: u32) -> String {
    format!("S{:02}E{:02}", season, episode)
}

fn surface_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(Color::from_rgba(1.0, 1.0, 1.0, 0.04))),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

/// Label/value pairs for the facts grid; zero budgets and missing fields are
/// left out.
fn detail_facts(details: &MediaDetails) -> Vec<(&'static str, String)> {
    let mut facts = Vec::new();
    if let Some(status) = &details.status {
        facts.push(("Status", status.clone()));
    }
    if let Some(language) = &details.original_language {
        facts.push(("Original Language", language.to_uppercase()));
    }
    if let Some(date) = details.release_date() {
        facts.push(("Released", date.format("%B %-d, %Y").to_string()));
    }
    if let Some(seasons) = details.number_of_seasons {
        facts.push(("Seasons", seasons.to_string()));
    }
    if let Some(episodes) = details.number_of_episodes {
        facts.push(("Episodes", episodes.to_string()));
    }
    if let Some(budget) = details.budget.filter(|b| *b > 0) {
        facts.push(("Budget", format_money(budget)));
    }
    if let Some(revenue) = details.revenue.filter(|r| *r > 0) {
        facts.push(("Revenue", format_money(revenue)));
    }
    facts
}

impl Reelix {
    pub fn view_detail_page(&self) -> Element<'_, Message> {
        match (&self.detail_state, &self.detail_bundle) {
            (LoadingState::Error(message), _) => self.view_error_state(message),
            (LoadingState::Idle, Some(bundle)) => self.view_detail_content(bundle),
            _ => column![self.view_skeleton_hero(), self.view_skeleton_rows(2)]
                .width(Length::Fill)
                .into(),
        }
    }

    fn view_detail_content<'a>(&'a self, bundle: &'a DetailBundle) -> Element<'a, Message> {
        let mut sections = Column::new()
            .spacing(40)
            .padding(Padding::new(32.0).left(48.0).right(48.0).bottom(48.0))
            .width(Length::Fill);

        sections = sections.push(self.view_detail_overview(&bundle.details));

        let key_crew = bundle.credits.key_crew();
        if !key_crew.is_empty() {
            let label = if key_crew.iter().any(|c| c.job == "Director") {
                "Directed by"
            } else {
                "Executive producers"
            };
            let names: Vec<&str> = key_crew.iter().map(|c| c.name.as_str()).collect();
            sections = sections.push(
                row![
                    text(label).size(14).color(TEXT_GRAY),
                    text(names.join(", ")).size(14).color(TEXT_WHITE).font(bold())
                ]
                .spacing(12),
            );
        }

        if !bundle.credits.cast.is_empty() {
            let cast: Vec<Element<Message>> = bundle
                .credits
                .cast
                .iter()
                .take(CAST_LIMIT)
                .map(|member| self.view_cast_card(member))
                .collect();
            sections = sections.push(
                column![
                    section_title("Top Cast"),
                    horizontal_scroll(Row::with_children(cast).spacing(16))
                ]
                .spacing(16),
            );
        }

        if bundle.media_type == MediaType::Tv && !bundle.details.seasons.is_empty() {
            sections = sections.push(self.view_seasons_section(&bundle.details));
        }

        if let Some(images) = &self.detail_images {
            let stills: Vec<Element<Message>> = images
                .backdrops
                .iter()
                .take(GALLERY_LIMIT)
                .filter_map(|image| self.image(Some(image.file_path.as_str()), ImageSize::Still))
                .map(|handle| {
                    iced::widget::image(handle.clone())
                        .width(Length::Fixed(STILL_WIDTH))
                        .height(Length::Fixed(STILL_HEIGHT))
                        .content_fit(iced::ContentFit::Cover)
                        .into()
                })
                .collect();
            if !stills.is_empty() {
                sections = sections.push(
                    column![
                        section_title("Images"),
                        horizontal_scroll(Row::with_children(stills).spacing(12))
                    ]
                    .spacing(16),
                );
            }
        }

        if !bundle.reviews.results.is_empty() {
            sections = sections.push(
                self.view_reviews(&bundle.reviews.results, bundle.reviews.total_results),
            );
        }

        sections = sections
            .push(self.view_media_row("More Like This", &bundle.similar.items))
            .push(self.view_media_row("Recommended", &bundle.recommendations.items));

        column![self.view_detail_hero(bundle), sections]
            .width(Length::Fill)
            .into()
    }

    fn view_detail_hero<'a>(&'a self, bundle: &'a DetailBundle) -> Element<'a, Message> {
        let details = &bundle.details;

        let poster: Element<Message> =
            match self.image(details.poster_path.as_deref(), ImageSize::Poster) {
                Some(handle) => iced::widget::image(handle.clone())
                    .width(Length::Fixed(CARD_WIDTH * 1.4))
                    .height(Length::Fixed(CARD_HEIGHT * 1.4))
                    .content_fit(iced::ContentFit::Cover)
                    .into(),
                None => view_placeholder(ICON_FILM, CARD_WIDTH * 1.4, CARD_HEIGHT * 1.4),
            };

        let title = text(details.display_title())
            .size(44)
            .color(TEXT_WHITE)
            .font(bold())
            .wrapping(text::Wrapping::Word);

        let mut metadata = row![].spacing(14).align_y(iced::Alignment::Center);
        if let Some(date) = details.release_date() {
            metadata = metadata.push(text(date.format("%Y").to_string()).size(15).color(TEXT_GRAY));
        }
        if let Some(minutes) = details.runtime_minutes() {
            metadata = metadata.push(text(format_runtime(minutes)).size(15).color(TEXT_GRAY));
        }
        if let Some(seasons) = details.number_of_seasons {
            let label = if seasons == 1 { "Season" } else { "Seasons" };
            metadata = metadata.push(
                text(format!("{} {}", seasons, label))
                    .size(15)
                    .color(TEXT_GRAY),
            );
        }
        metadata = metadata.push(rating_badge(details.vote_average));
        if details.vote_count > 0 {
            metadata = metadata.push(
                text(format!("{} votes", details.vote_count))
                    .size(13)
                    .color(TEXT_GRAY),
            );
        }

        let genres = Row::with_children(
            details
                .genres
                .iter()
                .map(|genre| {
                    container(text(genre.name.as_str()).size(12).color(TEXT_WHITE))
                        .padding(Padding::new(4.0).left(12.0).right(12.0))
                        .style(|_theme| container::Style {
                            border: Border {
                                color: Color::from_rgba(1.0, 1.0, 1.0, 0.4),
                                width: 1.0,
                                radius: 12.0.into(),
                            },
                            ..Default::default()
                        })
                        .into()
                })
                .collect::<Vec<Element<Message>>>(),
        )
        .spacing(8);

        let mut info = column![title].spacing(16).max_width(680.0);
        if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
            info = info.push(text(tagline).size(16).color(TEXT_GRAY));
        }
        info = info.push(metadata).push(genres);

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
        .on_press(Message::Trailer(TrailerMessage::Show {
            title: details.display_title().to_string(),
            videos: bundle.videos.clone(),
        }));
        info = info.push(trailer_button);

        let content = row![poster, info]
            .spacing(40)
            .align_y(iced::Alignment::Center)
            .padding(Padding::new(48.0).left(64.0).right(64.0));

        self.view_backdrop_stack(
            details.backdrop_path.as_deref(),
            DETAIL_HERO_HEIGHT,
            content.into(),
        )
    }

    fn view_detail_overview<'a>(&'a self, details: &'a MediaDetails) -> Element<'a, Message> {
        let overview = if details.overview.is_empty() {
            "No overview available."
        } else {
            details.overview.as_str()
        };

        let facts: Vec<Element<Message>> = detail_facts(details)
            .into_iter()
            .map(|(label, value)| {
                column![
                    text(label).size(12).color(TEXT_GRAY),
                    text(value).size(14).color(TEXT_WHITE)
                ]
                .spacing(4)
                .width(Length::Fixed(180.0))
                .into()
            })
            .collect();

        column![
            section_title("Overview"),
            container(text(overview).size(16).color(TEXT_WHITE)).max_width(900.0),
            Row::with_children(facts).spacing(24).wrap()
        ]
        .spacing(16)
        .into()
    }

    fn view_seasons_section<'a>(&'a self, details: &'a MediaDetails) -> Element<'a, Message> {
        let seasons: Vec<(String, u32)> = details
            .seasons
            .iter()
            .map(|s| (s.name.clone(), s.season_number))
            .collect();
        let options: Vec<String> = seasons.iter().map(|(name, _)| name.clone()).collect();
        let selected = self
            .detail_selected_season
            .and_then(|n| seasons.iter().find(|(_, number)| *number == n))
            .map(|(name, _)| name.clone());

        let picker = pick_list(options, selected, move |choice: String| {
            let number = seasons
                .iter()
                .find(|(name, _)| *name == choice)
                .map_or(0, |(_, number)| *number);
            Message::SelectSeason(number)
        })
        .placeholder("Select a season")
        .text_size(14)
        .padding(Padding::new(8.0).left(12.0).right(12.0))
        .style(pick_list_style);

        let header = row![
            section_title("Seasons"),
            Space::new().width(Length::Fill),
            picker
        ]
        .align_y(iced::Alignment::Center);

        let episodes: Element<Message> = match (&self.detail_season_state, &self.detail_season) {
            (LoadingState::Loading, _) => {
                text("Loading episodes...").size(14).color(TEXT_GRAY).into()
            }
            (LoadingState::Error(message), _) => {
                text(message.as_str()).size(14).color(TEXT_GRAY).into()
            }
            (_, Some(season)) if !season.episodes.is_empty() => {
                let cards: Vec<Element<Message>> = season
                    .episodes
                    .iter()
                    .map(|episode| self.view_episode_card(episode))
                    .collect();
                horizontal_scroll(
                    Row::with_children(cards)
                        .spacing(12)
                        .align_y(iced::Alignment::Start),
                )
            }
            _ => text("No episodes available").size(14).color(TEXT_GRAY).into(),
        };

        container(column![header, episodes].spacing(20).width(Length::Fill))
            .width(Length::Fill)
            .padding(24)
            .style(surface_style)
            .into()
    }

    fn view_episode_card<'a>(&'a self, episode: &'a Episode) -> Element<'a, Message> {
        let still: Element<Message> =
            match self.image(episode.still_path.as_deref(), ImageSize::Still) {
                Some(handle) => iced::widget::image(handle.clone())
                    .width(Length::Fixed(STILL_WIDTH))
                    .height(Length::Fixed(STILL_HEIGHT))
                    .content_fit(iced::ContentFit::Cover)
                    .into(),
                None => view_placeholder(ICON_FILM, STILL_WIDTH, STILL_HEIGHT),
            };

        let mut meta = row![text(format_episode_number(
            episode.season_number,
            episode.episode_number
        ))
        .size(13)
        .color(TEXT_WHITE)
        .font(bold())]
        .spacing(8)
        .align_y(iced::Alignment::Center);
        if let Some(minutes) = episode.runtime {
            meta = meta.push(text(format_runtime(minutes)).size(12).color(TEXT_GRAY));
        }

        column![
            still,
            meta,
            text(episode.name.as_str())
                .size(14)
                .color(TEXT_WHITE)
                .wrapping(text::Wrapping::Word),
            text(truncate_description(&episode.overview, 120))
                .size(12)
                .color(TEXT_GRAY)
        ]
        .spacing(6)
        .width(Length::Fixed(STILL_WIDTH))
        .into()
    }

    fn view_reviews<'a>(&'a self, reviews: &'a [Review], total: u32) -> Element<'a, Message> {
        let cards: Vec<Element<Message>> = reviews
            .iter()
            .take(REVIEW_LIMIT)
            .map(|review| {
                let mut heading = row![text(review.author.as_str())
                    .size(15)
                    .color(TEXT_WHITE)
                    .font(bold())]
                .spacing(12)
                .align_y(iced::Alignment::Center);
                if let Some(rating) = review.author_details.rating {
                    heading = heading.push(rating_badge(rating));
                }
                if let Some(date) = review
                    .created_at
                    .as_deref()
                    .and_then(|d| d.get(..10))
                {
                    heading = heading.push(text(date).size(12).color(TEXT_GRAY));
                }

                container(
                    column![
                        heading,
                        text(truncate_description(&review.content, 480))
                            .size(14)
                            .color(TEXT_GRAY)
                    ]
                    .spacing(10),
                )
                .padding(20)
                .width(Length::Fill)
                .style(surface_style)
                .into()
            })
            .collect();

        column![
            row![
                section_title("Reviews"),
                text(format!("({})", total)).size(14).color(TEXT_GRAY)
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center),
            Column::with_children(cards).spacing(12)
        ]
        .spacing(16)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(json: &str) -> MediaDetails {
        serde_json::from_str(json).expect("valid details")
    }

    #[test]
    fn test_facts_skip_zero_money_and_missing_fields() {
        let movie = details(
            r#"{"id":1,"title":"Heat","status":"Released","original_language":"en","release_date":"1995-12-15","budget":60000000,"revenue":0}"#,
        );

        let facts = detail_facts(&movie);

        assert_eq!(
            facts,
            vec![
                ("Status", String::from("Released")),
                ("Original Language", String::from("EN")),
                ("Released", String::from("December 15, 1995")),
                ("Budget", String::from("$60,000,000")),
            ]
        );
    }

    #[test]
    fn test_facts_for_tv_include_season_counts() {
        let show = details(
            r#"{"id":2,"name":"Dark","first_air_date":"","number_of_seasons":3,"number_of_episodes":26}"#,
        );

        let facts = detail_facts(&show);

        assert_eq!(
            facts,
            vec![
                ("Seasons", String::from("3")),
                ("Episodes", String::from("26")),
            ]
        );
    }

    #[test]
    fn test_episode_number_is_zero_padded() {
        assert_eq!(format_episode_number(1, 7), "S01E07");
        assert_eq!(format_episode_number(12, 103), "S12E103");
    }
}
