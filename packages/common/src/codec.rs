//! Reversible obfuscation of score-sets.
//!
//! Score-set → compact JSON → base64 → XOR with a fixed key → base64.
//! This keeps literal scores out of diffable data files; it is not encryption,
//! the key ships with the program.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::model::ScoreSet;

const OBFUSCATION_KEY: &[u8] = b"rocscience-hackathon-2025";

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid score JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// XOR every byte with the repeating obfuscation key. Self-inverse.
pub fn xor_with_key(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .zip(OBFUSCATION_KEY.iter().cycle())
        .map(|(b, k)| b ^ k)
        .collect()
}

pub fn encode_scores(scores: &ScoreSet) -> String {
    let json = serde_json::to_string(scores).expect("score sets always serialize");
    let inner = STANDARD.encode(json);
    STANDARD.encode(xor_with_key(inner.as_bytes()))
}

/// Strict decode, reporting why the text is malformed.
pub fn try_decode_scores(text: &str) -> Result<ScoreSet, DecodeError> {
    let xored = STANDARD.decode(text.trim())?;
    let inner = xor_with_key(&xored);
    let json = STANDARD.decode(inner)?;
    Ok(serde_json::from_slice(&json)?)
}

/// Lenient decode: malformed text degrades to [`ScoreSet::fallback`].
pub fn decode_scores(text: &str) -> ScoreSet {
    match try_decode_scores(text) {
        Ok(scores) => scores,
        Err(e) => {
            warn!(error = %e, "Failed to decode scores, substituting unscored fallback");
            ScoreSet::fallback()
        }
    }
}

/// A persisted score field: either still encoded, or a live score-set
/// (legacy files and the remote store).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum StoredScores {
    Encoded(String),
    Live(ScoreSet),
}

impl StoredScores {
    pub fn encode(scores: &ScoreSet) -> Self {
        Self::Encoded(encode_scores(scores))
    }

    pub fn is_encoded(&self) -> bool {
        matches!(self, Self::Encoded(_))
    }

    pub fn into_live(self) -> ScoreSet {
        match self {
            Self::Encoded(text) => decode_scores(&text),
            Self::Live(scores) => scores,
        }
    }

    pub fn into_encoded(self) -> Self {
        match self {
            Self::Live(scores) => Self::encode(&scores),
            encoded => encoded,
        }
    }
}
