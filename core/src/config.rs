use serde::{Deserialize, Serialize};

use crate::carousel::DEFAULT_COOLDOWN_MS;
use crate::input::SWIPE_THRESHOLD_PX;
use crate::reveal::RevealConfig;
use crate::rotation::DEFAULT_BACKGROUND_INTERVAL_MS;

pub const BUNDLED_PAGE_TOML: &str = include_str!("../../assets/page.toml");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("page config parse failed: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("page config has no photos")]
    EmptyPhotos,
    #[error("page config has no backgrounds")]
    EmptyBackgrounds,
    #[error("photo entry {0} is blank")]
    BlankPhoto(usize),
    #[error("background entry {0} is blank")]
    BlankBackground(usize),
    #[error("background interval must be positive")]
    ZeroInterval,
    #[error("swipe threshold must be a non-negative number, got {0}")]
    InvalidSwipeThreshold(f32),
    #[error("reveal threshold must be a number in [0, 1], got {0}")]
    InvalidRevealThreshold(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselSettings {
    pub cooldown_ms: u32,
    pub swipe_threshold_px: f32,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            swipe_threshold_px: SWIPE_THRESHOLD_PX,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub background_interval_ms: u32,
    pub backgrounds: Vec<String>,
    pub photos: Vec<String>,
    pub carousel: CarouselSettings,
    pub reveal: RevealConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            background_interval_ms: DEFAULT_BACKGROUND_INTERVAL_MS,
            backgrounds: [
                "/Pics/IMG-20250815-WA0003.jpg",
                "/Pics/IMG-20250815-WA0004.jpg",
                "/Pics/IMG-20250815-WA0005.jpg",
                "/Pics/IMG-20250815-WA0006.jpg",
            ]
            .iter()
            .map(|src| src.to_string())
            .collect(),
            photos: [
                "/Pics/IMG-20250815-WA0002.jpg",
                "/Pics/IMG-20250815-WA0003.jpg",
                "/Pics/IMG-20250815-WA0004.jpg",
                "/Pics/IMG-20250815-WA0005.jpg",
                "/Pics/IMG-20250815-WA0006.jpg",
                "/Pics/IMG-20250815-WA0007.jpg",
            ]
            .iter()
            .map(|src| src.to_string())
            .collect(),
            carousel: CarouselSettings::default(),
            reveal: RevealConfig::default(),
        }
    }
}

impl PageConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: PageConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUNDLED_PAGE_TOML)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.photos.is_empty() {
            return Err(ConfigError::EmptyPhotos);
        }
        if let Some(index) = first_blank(&self.photos) {
            return Err(ConfigError::BlankPhoto(index));
        }
        if self.backgrounds.is_empty() {
            return Err(ConfigError::EmptyBackgrounds);
        }
        if let Some(index) = first_blank(&self.backgrounds) {
            return Err(ConfigError::BlankBackground(index));
        }
        if self.background_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        let swipe = self.carousel.swipe_threshold_px;
        if !swipe.is_finite() || swipe < 0.0 {
            return Err(ConfigError::InvalidSwipeThreshold(swipe));
        }
        let threshold = self.reveal.threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidRevealThreshold(threshold));
        }
        Ok(())
    }
}

fn first_blank(sources: &[String]) -> Option<usize> {
    sources.iter().position(|src| src.trim().is_empty())
}
