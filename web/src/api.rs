use cluegrid_core as game;
use gloo::net::http::Request;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

/// Upstream trivia service; overridable from the location hash.
pub(crate) const DEFAULT_API_BASE: &str = "https://jservice.io/api";

/// Size of the candidate pool requested before picking the six categories.
pub(crate) const CATEGORY_POOL_SIZE: usize = 100;

#[derive(Error, Debug)]
pub(crate) enum ApiError {
    #[error("request failed: {0}")]
    Network(#[from] gloo::net::Error),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Game(#[from] game::GameError),
}

/// One entry of the `/random/?count=N` pool; everything but the id is ignored.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub(crate) struct CategoryStub {
    pub category_id: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub(crate) struct RawClue {
    pub question: String,
    pub answer: String,
}

/// Payload of `/category?id=N`: the title plus the full raw clue list, from
/// which five clues are sampled.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub(crate) struct CategoryResponse {
    pub title: String,
    pub clues: Vec<RawClue>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ApiClient {
    base: String,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base, path);
        log::debug!("GET {}", url);

        let response = Request::get(&url).send().await?;
        if !response.ok() {
            return Err(ApiError::Status(response.status()));
        }

        // Decode from text so an unparseable body maps to Malformed instead
        // of being folded into the transport error.
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn fetch_category_pool(&self) -> Result<Vec<CategoryStub>, ApiError> {
        self.get_json(&format!("/random/?count={}", CATEGORY_POOL_SIZE))
            .await
    }

    pub async fn fetch_category(&self, id: u64) -> Result<CategoryResponse, ApiError> {
        self.get_json(&format!("/category?id={}", id)).await
    }
}

/// Picks [`game::CATEGORY_COUNT`] distinct ids out of the fetched pool,
/// keeping the order the draws were produced in; that order becomes the
/// board's display order.
pub(crate) fn pick_category_ids<R: Rng + ?Sized>(
    pool: &[CategoryStub],
    rng: &mut R,
) -> Result<Vec<u64>, ApiError> {
    let picks = game::draw_distinct(rng, pool.len(), game::CATEGORY_COUNT)?;
    Ok(picks.into_iter().map(|i| pool[i].category_id).collect())
}

/// Samples [`game::CLUES_PER_CATEGORY`] distinct clues out of a category
/// response and maps them into the domain model, every clue starting hidden.
pub(crate) fn category_from_response<R: Rng + ?Sized>(
    response: CategoryResponse,
    rng: &mut R,
) -> Result<game::Category, ApiError> {
    let picks = game::draw_distinct(rng, response.clues.len(), game::CLUES_PER_CATEGORY)?;
    let clues = picks
        .into_iter()
        .map(|i| {
            let raw = &response.clues[i];
            game::Clue::new(raw.question.clone(), raw.answer.clone())
        })
        .collect();
    Ok(game::Category::new(response.title, clues)?)
}

/// Fetches the pool, picks six categories and assembles the board.
///
/// Categories are fetched one at a time on purpose; total latency is bounded
/// by six round trips and there is nothing to coordinate. Any failure aborts
/// the whole build, no partial board is ever produced.
pub(crate) async fn build_board<R: Rng + ?Sized>(
    client: &ApiClient,
    rng: &mut R,
) -> Result<game::Board, ApiError> {
    let pool = client.fetch_category_pool().await?;
    log::debug!("category pool: {} entries", pool.len());

    let ids = pick_category_ids(&pool, rng)?;

    let mut categories = Vec::with_capacity(game::CATEGORY_COUNT);
    for id in ids {
        let response = client.fetch_category(id).await?;
        log::debug!(
            "category {}: \"{}\", {} raw clues",
            id,
            response.title,
            response.clues.len()
        );
        categories.push(category_from_response(response, rng)?);
    }

    Ok(game::Board::new(categories)?)
}
