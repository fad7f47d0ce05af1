use crate::constants::*;
use crate::error::ConfigError;
use crate::import::DateSystem;
use std::env;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    /// Overrides every view's own page size when set.
    pub page_size: Option<u32>,
    pub date_system: DateSystem,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            page_size: None,
            date_system: DateSystem::default(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        // load environment variables
        dotenv::dotenv().ok();

        let base_url = env::var("CHURCH_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(base_url));
        }

        let token = env::var("CHURCH_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let page_size = match env::var("LIST_PAGE_SIZE") {
            Ok(raw) => match raw.trim().parse::<u32>() {
                Ok(size) if (1..=MAX_PAGE_SIZE).contains(&size) => Some(size),
                _ => return Err(ConfigError::InvalidPageSize(raw)),
            },
            Err(_) => None,
        };

        let date_system = match env::var("SPREADSHEET_DATE_SYSTEM") {
            Ok(raw) => raw
                .parse::<DateSystem>()
                .map_err(|_| ConfigError::InvalidDateSystem(raw))?,
            Err(_) => DateSystem::default(),
        };

        Ok(ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            page_size,
            date_system,
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
