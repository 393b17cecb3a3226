use std::time::Duration;
use thiserror::Error;

use crate::{ParseError, ParsedRecipe, parse_recipe_from_html};

const USER_AGENT: &str = "Mozilla/5.0 (compatible; MealMind/1.0; +https://mealmind.app)";
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("only http and https urls are supported")]
    UnsupportedScheme,

    #[error("failed to fetch recipe page: {0}")]
    Request(#[from] reqwest::Error),

    #[error("recipe page returned status {0}")]
    Status(reqwest::StatusCode),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Fetches a recipe page and hands it to the JSON-LD parser. The importer is
/// an edge collaborator: it produces a [`ParsedRecipe`] for the meal form and
/// never writes anything itself.
#[derive(Clone)]
pub struct RecipeImporter {
    client: reqwest::Client,
}

impl RecipeImporter {
    pub fn new() -> Result<Self, ImportError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()?;

        Ok(Self { client })
    }

    pub async fn import(&self, raw_url: &str) -> Result<ParsedRecipe, ImportError> {
        let url = url::Url::parse(raw_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ImportError::UnsupportedScheme);
        }

        let response = self.client.get(url.as_str()).send().await?;
        if !response.status().is_success() {
            return Err(ImportError::Status(response.status()));
        }

        let html = response.text().await?;

        Ok(parse_recipe_from_html(&html, url.as_str())?)
    }
}
