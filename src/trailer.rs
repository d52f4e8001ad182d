use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, text, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow, Task};

use crate::components::{icon, outline_button_style, primary_button_style, ICON_PLAY_FILL};
use crate::error::ApiError;
use crate::media::{MediaId, MediaType, Video, SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE};
use crate::tmdb::{load_videos, TmdbClient};

const MODAL_WIDTH: f32 = 720.0;
const THUMBNAIL_HEIGHT: f32 = 405.0;

/// Best playable trailer: official trailer, then any trailer, then a
/// teaser, then whatever YouTube video comes first.
pub fn select_best_trailer(videos: &[Video]) -> Option<&Video> {
    let youtube = || videos.iter().filter(|v| v.site == "YouTube");
    youtube()
        .find(|v| v.video_type == "Trailer" && v.official)
        .or_else(|| youtube().find(|v| v.video_type == "Trailer"))
        .or_else(|| youtube().find(|v| v.video_type == "Teaser"))
        .or_else(|| youtube().next())
}

pub fn youtube_url(key: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", key)
}

pub fn thumbnail_url(key: &str) -> String {
    format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", key)
}

#[derive(Debug, Clone)]
pub enum TrailerMessage {
    /// Look up videos for a title and show the best one.
    Open {
        media: MediaType,
        id: MediaId,
        title: String,
    },
    /// Show the best of videos the caller already has.
    Show { title: String, videos: Vec<Video> },
    Loaded(u64, Result<Vec<Video>, ApiError>),
    OpenExternal,
    Close,
}

#[derive(Debug, Clone, PartialEq)]
enum TrailerState {
    Closed,
    Loading,
    Ready(Video),
    Unavailable,
    Failed(String),
}

#[derive(Debug)]
pub struct TrailerModal {
    title: String,
    state: TrailerState,
    seq: u64,
}

impl Default for TrailerModal {
    fn default() -> Self {
        Self::new()
    }
}

impl TrailerModal {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            state: TrailerState::Closed,
            seq: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state != TrailerState::Closed
    }

    pub fn video(&self) -> Option<&Video> {
        match &self.state {
            TrailerState::Ready(video) => Some(video),
            _ => None,
        }
    }

    pub fn thumbnail_url(&self) -> Option<String> {
        self.video().map(|v| thumbnail_url(&v.key))
    }

    fn show_best(&mut self, videos: &[Video]) {
        self.state = match select_best_trailer(videos) {
            Some(video) => TrailerState::Ready(video.clone()),
            None => TrailerState::Unavailable,
        };
    }

    pub fn update(
        &mut self,
        message: TrailerMessage,
        client: Option<&TmdbClient>,
    ) -> Task<TrailerMessage> {
        match message {
            TrailerMessage::Open { media, id, title } => {
                self.seq += 1;
                self.title = title;
                let Some(client) = client else {
                    self.state = TrailerState::Unavailable;
                    return Task::none();
                };
                self.state = TrailerState::Loading;
                let seq = self.seq;
                Task::perform(load_videos(client.clone(), media, id), move |result| {
                    TrailerMessage::Loaded(seq, result)
                })
            }
            TrailerMessage::Show { title, videos } => {
                self.seq += 1;
                self.title = title;
                self.show_best(&videos);
                Task::none()
            }
            TrailerMessage::Loaded(seq, result) => {
                if seq != self.seq || self.state != TrailerState::Loading {
                    return Task::none();
                }
                match result {
                    Ok(videos) => self.show_best(&videos),
                    Err(e) => self.state = TrailerState::Failed(e.user_message()),
                }
                Task::none()
            }
            TrailerMessage::OpenExternal => {
                if let Some(video) = self.video() {
                    let url = youtube_url(&video.key);
                    tracing::info!(%url, "opening trailer");
                    if let Err(e) = open::that(&url) {
                        tracing::warn!(error = %e, %url, "failed to open browser");
                    }
                }
                Task::none()
            }
            TrailerMessage::Close => {
                self.seq += 1;
                self.state = TrailerState::Closed;
                Task::none()
            }
        }
    }

    pub fn view<'a>(&'a self, thumbnail: Option<&'a Handle>) -> Element<'a, TrailerMessage> {
        let heading = text(self.title.as_str())
            .size(24)
            .color(TEXT_WHITE)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });

        let body: Element<'a, TrailerMessage> = match &self.state {
            TrailerState::Ready(video) => self.view_ready(video, thumbnail),
            TrailerState::Loading => status_panel("Loading trailer..."),
            TrailerState::Unavailable => status_panel("No trailer available for this title."),
            TrailerState::Failed(message) => status_panel(message),
            TrailerState::Closed => Space::new().width(0).height(0).into(),
        };

        let close_button = button(text("Close").size(14).color(TEXT_WHITE))
            .padding(Padding::new(10.0).left(20.0).right(20.0))
            .style(outline_button_style)
            .on_press(TrailerMessage::Close);

        let mut actions = row![].spacing(12).align_y(iced::Alignment::Center);
        if self.video().is_some() {
            actions = actions.push(
                button(
                    row![
                        icon(ICON_PLAY_FILL).size(14).color(TEXT_WHITE),
                        text("Watch on YouTube").size(14).color(TEXT_WHITE)
                    ]
                    .spacing(8)
                    .align_y(iced::Alignment::Center),
                )
                .padding(Padding::new(10.0).left(20.0).right(20.0))
                .style(primary_button_style)
                .on_press(TrailerMessage::OpenExternal),
            );
        }
        actions = actions.push(close_button);

        let card = container(column![heading, body, actions].spacing(16))
            .width(Length::Fixed(MODAL_WIDTH))
            .padding(24)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 12.0.into(),
                },
                shadow: Shadow {
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
                    offset: iced::Vector::new(0.0, 20.0),
                    blur_radius: 40.0,
                },
                ..Default::default()
            });

        let backdrop = iced::widget::mouse_area(
            container(Space::new().width(Length::Fill).height(Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(Color::from_rgba(
                        0.0, 0.0, 0.0, 0.85,
                    ))),
                    ..Default::default()
                }),
        )
        .on_press(TrailerMessage::Close);

        let centered = container(iced::widget::mouse_area(card))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill);

        iced::widget::stack![backdrop, centered]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_ready<'a>(
        &'a self,
        video: &'a Video,
        thumbnail: Option<&'a Handle>,
    ) -> Element<'a, TrailerMessage> {
        let preview: Element<'a, TrailerMessage> = match thumbnail {
            Some(handle) => iced::widget::image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(THUMBNAIL_HEIGHT))
                .content_fit(iced::ContentFit::Cover)
                .into(),
            None => container(icon(ICON_PLAY_FILL).size(48).color(TEXT_GRAY))
                .width(Length::Fill)
                .height(Length::Fixed(THUMBNAIL_HEIGHT))
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(Color::from_rgb(0.12, 0.12, 0.12))),
                    ..Default::default()
                })
                .into(),
        };

        let clickable = iced::widget::mouse_area(preview)
            .on_press(TrailerMessage::OpenExternal)
            .interaction(iced::mouse::Interaction::Pointer);

        column![
            clickable,
            text(video.name.as_str()).size(14).color(TEXT_GRAY)
        ]
        .spacing(8)
        .into()
    }
}

fn status_panel(message: &str) -> Element<'_, TrailerMessage> {
    container(text(message).size(16).color(TEXT_GRAY))
        .width(Length::Fill)
        .height(Length::Fixed(160.0))
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(key: &str, site: &str, kind: &str, official: bool) -> Video {
        Video {
            key: key.to_string(),
            name: format!("{kind} {key}"),
            site: site.to_string(),
            video_type: kind.to_string(),
            official,
        }
    }

    #[test]
    fn test_prefers_official_trailer() {
        let videos = vec![
            video("teaser", "YouTube", "Teaser", true),
            video("fan", "YouTube", "Trailer", false),
            video("vimeo", "Vimeo", "Trailer", true),
            video("official", "YouTube", "Trailer", true),
        ];

        assert_eq!(select_best_trailer(&videos).map(|v| v.key.as_str()), Some("official"));
    }

    #[test]
    fn test_falls_back_to_teaser_then_any_youtube() {
        let teaser = vec![
            video("clip", "YouTube", "Clip", true),
            video("teaser", "YouTube", "Teaser", false),
        ];
        let clip_only = vec![
            video("vimeo", "Vimeo", "Trailer", true),
            video("clip", "YouTube", "Clip", true),
        ];

        assert_eq!(select_best_trailer(&teaser).map(|v| v.key.as_str()), Some("teaser"));
        assert_eq!(select_best_trailer(&clip_only).map(|v| v.key.as_str()), Some("clip"));
        assert!(select_best_trailer(&[video("v", "Vimeo", "Trailer", true)]).is_none());
    }

    #[test]
    fn test_show_without_videos_is_unavailable() {
        let mut modal = TrailerModal::new();

        let _ = modal.update(
            TrailerMessage::Show {
                title: String::from("Dune"),
                videos: Vec::new(),
            },
            None,
        );

        assert!(modal.is_open());
        assert!(modal.video().is_none());
        assert!(modal.thumbnail_url().is_none());
    }

    #[test]
    fn test_late_videos_after_close_are_ignored() {
        let mut modal = TrailerModal::new();
        let _ = modal.update(
            TrailerMessage::Show {
                title: String::from("Dune"),
                videos: vec![video("abc", "YouTube", "Trailer", true)],
            },
            None,
        );
        assert_eq!(
            modal.thumbnail_url().as_deref(),
            Some("https://i.ytimg.com/vi/abc/hqdefault.jpg")
        );
        let stale_seq = modal.seq;

        let _ = modal.update(TrailerMessage::Close, None);
        let _ = modal.update(
            TrailerMessage::Loaded(stale_seq, Ok(vec![video("x", "YouTube", "Trailer", true)])),
            None,
        );

        assert!(!modal.is_open());
    }

    #[test]
    fn test_youtube_url() {
        assert_eq!(youtube_url("qtRKdVHc-cE"), "https://www.youtube.com/watch?v=qtRKdVHc-cE");
    }
}
