//! Seed channel: reading and writing the seed in a location URL.

use std::fmt;

use chrono::Utc;
use url::Url;

/// Query parameter that carries the seed.
pub const SEED_PARAM: &str = "s";

/// Errors raised while parsing a location.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("invalid location URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Host location whose query string carries the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedLocation {
    url: Url,
}

impl SeedLocation {
    pub fn parse(input: &str) -> Result<Self, SeedError> {
        Ok(Self {
            url: Url::parse(input)?,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The decoded seed, if the location carries a non-empty one.
    pub fn seed(&self) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == SEED_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    }

    /// Store `seed` in the query string.
    ///
    /// The first existing seed parameter is replaced in place and any later
    /// duplicates are dropped; other parameters keep their order.
    pub fn set_seed(&mut self, seed: &str) {
        let mut pairs: Vec<(String, String)> = Vec::new();
        let mut replaced = false;
        for (key, value) in self.url.query_pairs() {
            if key == SEED_PARAM {
                if !replaced {
                    pairs.push((key.into_owned(), seed.to_string()));
                    replaced = true;
                }
            } else {
                pairs.push((key.into_owned(), value.into_owned()));
            }
        }
        if !replaced {
            pairs.push((SEED_PARAM.to_string(), seed.to_string()));
        }

        self.url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

impl fmt::Display for SeedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// A fresh seed from the wall clock, in milliseconds since the epoch.
pub fn timestamp_seed() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Pick the seed for a run and echo it back into the location.
///
/// The location's seed is kept unless it is missing or `force_new` is set,
/// in which case a timestamp seed replaces it.
pub fn get_and_save_seed(location: &mut SeedLocation, force_new: bool) -> String {
    let seed = match location.seed() {
        Some(seed) if !force_new => seed,
        _ => timestamp_seed(),
    };
    location.set_seed(&seed);
    seed
}
