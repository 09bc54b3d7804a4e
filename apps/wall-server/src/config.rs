//! Application configuration loaded from environment variables.

use std::env;
#[cfg(feature = "rest")]
use std::time::Duration;

#[cfg(feature = "rest")]
use wall_infra::RestStoreConfig;

/// Default upload guardrail for images: 5 MiB.
const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "rest")]
    pub store: Option<RestStoreConfig>,
    pub max_image_bytes: usize,
    pub profile: Profile,
}

/// Static profile shown in the sidebar and on every post.
#[derive(Debug, Clone)]
pub struct Profile {
    pub name: String,
    pub tagline: String,
    pub network: String,
    pub city: String,
    pub about: String,
    pub avatar_url: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Wall Owner".to_string(),
            tagline: "wall".to_string(),
            network: "State University".to_string(),
            city: "Somewhere, Earth".to_string(),
            about: "Full stack developer who enjoys programming, UI/UX and building \
                    purposeful software. Always learning and sharing knowledge!"
                .to_string(),
            avatar_url: None,
        }
    }
}

impl Profile {
    /// Initial shown when no avatar image is configured.
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }

    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: env::var("PROFILE_NAME").unwrap_or(defaults.name),
            tagline: defaults.tagline,
            network: env::var("PROFILE_NETWORK").unwrap_or(defaults.network),
            city: env::var("PROFILE_CITY").unwrap_or(defaults.city),
            about: env::var("PROFILE_ABOUT").unwrap_or(defaults.about),
            avatar_url: env::var("PROFILE_AVATAR_URL").ok(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            #[cfg(feature = "rest")]
            store: Self::store_from_env(),
            max_image_bytes: env::var("MAX_IMAGE_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_IMAGE_BYTES),
            profile: Profile::from_env(),
        }
    }

    /// Hosted store settings; `None` when `STORE_URL` is unset.
    #[cfg(feature = "rest")]
    fn store_from_env() -> Option<RestStoreConfig> {
        env::var("STORE_URL").ok().map(|url| RestStoreConfig {
            url,
            api_key: env::var("STORE_API_KEY").unwrap_or_default(),
            table: env::var("STORE_TABLE").unwrap_or_else(|_| "posts".to_string()),
            timeout: Duration::from_secs(
                env::var("STORE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        })
    }
}
