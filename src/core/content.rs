use super::error::SiteResult;
use super::ingredients::Ingredient;
use super::soundscape::SoundscapeKind;
use super::theme::Theme;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SoundscapeInfo {
    pub key: SoundscapeKind,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct OpeningHours {
    pub day: String,
    pub time: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Social {
    pub name: String,
    pub url: String,
    pub icon: String,
}

/// Static records the motion layer displays but never modifies.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub ingredients: Vec<Ingredient>,
    pub themes: Vec<Theme>,
    pub soundscapes: Vec<SoundscapeInfo>,
    #[serde(default)]
    pub opening_hours: Vec<OpeningHours>,
    #[serde(default)]
    pub socials: Vec<Social>,
}

impl SiteContent {
    pub fn from_json(json: &str) -> SiteResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn soundscape(&self, kind: SoundscapeKind) -> Option<&SoundscapeInfo> {
        self.soundscapes.iter().find(|s| s.key == kind)
    }

    pub fn ingredient(&self, id: u32) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }
}
