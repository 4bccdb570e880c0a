use serde::{Deserialize, Serialize};

/// A playable podcast episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Episode {
    id: String,
    title: String,
    #[serde(default)]
    members: String,
    #[serde(default)]
    thumbnail: String,
    #[serde(default)]
    duration: u32,
    url: String,
    #[serde(default, alias = "publishedAt")]
    published_at: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl Episode {
    pub fn new(
        id: String,
        title: String,
        members: String,
        thumbnail: String,
        duration: u32,
        url: String,
    ) -> Self {
        Self {
            id,
            title,
            members,
            thumbnail,
            duration,
            url,
            published_at: None,
            description: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn members(&self) -> &str {
        &self.members
    }

    pub fn thumbnail(&self) -> &str {
        &self.thumbnail
    }

    /// Length in seconds.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn published_at(&self) -> Option<&str> {
        self.published_at.as_deref()
    }

    #[cfg(test)]
    pub fn with_published_at(mut self, published_at: String) -> Self {
        self.published_at = Some(published_at);
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[cfg(test)]
    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }
}

/// Format a length in seconds as `HH:MM:SS`.
pub fn format_duration(seconds: u32) -> String {
    let hours = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}
