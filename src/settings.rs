use std::path::{Path, PathBuf};

use iced::widget::{button, column, container, row, text, text_input, Space};
use iced::{Alignment, Element, Length};
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::media::{ACCENT_RED, BACKGROUND_BLACK, TEXT_GRAY, TEXT_WHITE};
use crate::tmdb::{DEFAULT_BASE_URL, DEFAULT_IMAGE_BASE_URL, DEFAULT_LANGUAGE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub api_token: String,
    pub language: String,
    pub base_url: String,
    pub image_base_url: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            language: String::from(DEFAULT_LANGUAGE),
            base_url: String::from(DEFAULT_BASE_URL),
            image_base_url: String::from(DEFAULT_IMAGE_BASE_URL),
        }
    }
}

impl AppSettings {
    pub fn config_path() -> Option<PathBuf> {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("reelix")
                .join("config.json")
        })
    }

    /// Reads the config file; a missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Option<Self>, SettingsError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Config file first, then `TMDB_*` environment variables on top.
    pub fn load() -> Self {
        let file = match Self::config_path() {
            Some(path) => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::warn!(error = %e, path = %path.display(), "ignoring unreadable config file");
                None
            }),
            None => None,
        };
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    pub fn resolve(file: Option<Self>, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = file.unwrap_or_default();
        let overrides: [(&str, &mut String); 4] = [
            ("TMDB_API_TOKEN", &mut settings.api_token),
            ("TMDB_LANGUAGE", &mut settings.language),
            ("TMDB_BASE_URL", &mut settings.base_url),
            ("TMDB_IMAGE_BASE_URL", &mut settings.image_base_url),
        ];
        for (key, field) in overrides {
            if let Some(value) = env(key).filter(|v| !v.trim().is_empty()) {
                *field = value.trim().to_string();
            }
        }
        settings
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::config_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        !self.api_token.trim().is_empty()
    }
}

#[derive(Debug, Clone)]
pub enum SetupMessage {
    ApiTokenChanged(String),
    LanguageChanged(String),
    Submit,
}

/// First-run form shown when no API token is configured.
pub struct SetupPage {
    pub api_token: String,
    pub language: String,
    pub error: Option<String>,
    base: AppSettings,
}

impl SetupPage {
    pub fn new(base: AppSettings) -> Self {
        Self {
            api_token: base.api_token.clone(),
            language: base.language.clone(),
            error: None,
            base,
        }
    }

    pub fn update(&mut self, message: SetupMessage) -> Option<AppSettings> {
        match message {
            SetupMessage::ApiTokenChanged(token) => {
                self.api_token = token;
                self.error = None;
                None
            }
            SetupMessage::LanguageChanged(lang) => {
                self.language = lang;
                None
            }
            SetupMessage::Submit => {
                if self.api_token.trim().is_empty() {
                    self.error = Some(String::from("API read access token is required"));
                    return None;
                }
                let settings = AppSettings {
                    api_token: self.api_token.trim().to_string(),
                    language: if self.language.trim().is_empty() {
                        String::from(DEFAULT_LANGUAGE)
                    } else {
                        self.language.trim().to_string()
                    },
                    ..self.base.clone()
                };
                if let Err(e) = settings.save() {
                    tracing::warn!(error = %e, "failed to save settings");
                    self.error = Some(format!("Failed to save: {}", e));
                    return None;
                }
                tracing::info!("settings saved");
                Some(settings)
            }
        }
    }

    pub fn view(&self) -> Element<'_, SetupMessage> {
        let logo = text("REELIX").size(48).color(ACCENT_RED);

        let title = text("Welcome to Reelix").size(28).color(TEXT_WHITE);
        let subtitle = text("Connect your TMDB account to start browsing")
            .size(14)
            .color(TEXT_GRAY);

        let token_label = text("TMDB API Read Access Token").size(14).color(TEXT_WHITE);
        let token_hint = text("Found at themoviedb.org/settings/api (the long v4 token)")
            .size(12)
            .color(TEXT_GRAY);
        let token_input = text_input("eyJhbGciOiJIUzI1NiJ9...", &self.api_token)
            .on_input(SetupMessage::ApiTokenChanged)
            .on_submit(SetupMessage::Submit)
            .secure(true)
            .padding(12)
            .size(14)
            .width(Length::Fill);

        let lang_label = text("Language").size(14).color(TEXT_WHITE);
        let lang_hint = text("Examples: vi, en-US, fr-FR").size(12).color(TEXT_GRAY);
        let lang_input = text_input(DEFAULT_LANGUAGE, &self.language)
            .on_input(SetupMessage::LanguageChanged)
            .on_submit(SetupMessage::Submit)
            .padding(12)
            .size(14)
            .width(Length::Fill);

        let submit_button = button(text("Get Started").size(16).color(TEXT_WHITE))
            .padding([12, 32])
            .style(|_theme, status| {
                let bg = match status {
                    button::Status::Hovered => iced::Color::from_rgb(0.7, 0.02, 0.06),
                    _ => ACCENT_RED,
                };
                button::Style {
                    background: Some(iced::Background::Color(bg)),
                    text_color: TEXT_WHITE,
                    border: iced::Border::default().rounded(4),
                    ..Default::default()
                }
            })
            .on_press(SetupMessage::Submit);

        let error_text = match &self.error {
            Some(err) => text(err.clone()).size(14).color(ACCENT_RED),
            None => text("").size(14),
        };

        let spacer = || Space::new().height(16);
        let small_spacer = || Space::new().height(4);

        let form = column![
            logo,
            spacer(),
            title,
            small_spacer(),
            subtitle,
            spacer(),
            token_label,
            small_spacer(),
            token_hint,
            small_spacer(),
            token_input,
            spacer(),
            lang_label,
            small_spacer(),
            lang_hint,
            small_spacer(),
            lang_input,
            spacer(),
            error_text,
            small_spacer(),
            row![submit_button].width(Length::Fill),
        ]
        .width(Length::Fixed(420.0))
        .align_x(Alignment::Start);

        container(form)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(BACKGROUND_BLACK)),
                ..Default::default()
            })
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let settings = AppSettings::resolve(None, env_of(&[]));

        assert_eq!(settings.language, "vi");
        assert_eq!(settings.base_url, "https://api.themoviedb.org/3");
        assert_eq!(settings.image_base_url, "https://image.tmdb.org/t/p");
        assert!(!settings.is_valid());
    }

    #[test]
    fn test_env_overrides_file() {
        let file = AppSettings {
            api_token: String::from("from-file"),
            language: String::from("en-US"),
            ..AppSettings::default()
        };

        let settings = AppSettings::resolve(
            Some(file),
            env_of(&[("TMDB_API_TOKEN", "from-env"), ("TMDB_LANGUAGE", "  ")]),
        );

        assert_eq!(settings.api_token, "from-env");
        assert_eq!(settings.language, "en-US");
        assert!(settings.is_valid());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: AppSettings =
            serde_json::from_str(r#"{"api_token":"abc"}"#).expect("valid settings");

        assert_eq!(settings.api_token, "abc");
        assert_eq!(settings.language, "vi");
        assert_eq!(settings.base_url, "https://api.themoviedb.org/3");
    }

    #[test]
    fn test_save_then_load_from_disk() {
        let dir = std::env::temp_dir().join(format!("reelix-settings-{}", std::process::id()));
        let path = dir.join("config.json");
        let settings = AppSettings {
            api_token: String::from("token"),
            ..AppSettings::default()
        };

        settings.save_to(&path).expect("save succeeds");
        let loaded = AppSettings::load_from(&path).expect("load succeeds");
        let _ = std::fs::remove_dir_all(&dir);

        assert_eq!(loaded, Some(settings));
    }

    #[test]
    fn test_missing_file_is_none() {
        let path = std::env::temp_dir().join("reelix-does-not-exist/config.json");

        assert!(matches!(AppSettings::load_from(&path), Ok(None)));
    }

    #[test]
    fn test_setup_requires_token() {
        let mut page = SetupPage::new(AppSettings::default());

        let result = page.update(SetupMessage::Submit);

        assert!(result.is_none());
        assert!(page.error.is_some());
    }
}
