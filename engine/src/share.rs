use color_eyre::Result;
use reqwest::Url;

use crate::poster::ArtStyle;

pub type ShareBox = Box<dyn ShareTarget + Send + Sync>;

/// A platform service that can pass a poster on to someone else.
pub trait ShareTarget {
    fn share(&self, payload: &SharePayload) -> Result<()>;
    fn clone(&self) -> ShareBox;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    pub fn for_poster(movie_title: &str, style: Option<ArtStyle>, url: &str) -> Self {
        let style = style.map(|s| s.value()).unwrap_or_default();
        Self {
            title: format!("AI Movie Poster: {movie_title}"),
            text: format!(
                r#"Check out this AI-generated movie poster for "{movie_title}" in {style} style!"#
            ),
            url: url.to_string(),
        }
    }

    /// `mailto:` link with the title as subject and text plus url as body.
    pub fn mailto_uri(&self) -> Result<String> {
        let mut uri = Url::parse("mailto:")?;
        uri.query_pairs_mut()
            .append_pair("subject", &self.title)
            .append_pair("body", &format!("{}\n{}", self.text, self.url));
        // form encoding turns spaces into '+', mail clients expect %20 (RFC 6068)
        Ok(uri.as_str().replace('+', "%20"))
    }
}
