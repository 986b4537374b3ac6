use crate::common::{Source, is_valid_price};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Qualitative tag a source attaches to its price. Carried through untouched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// One price observation from one source for one token, in USD.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    pub source: Source,
    pub token: String,
    pub price: f64,
    pub observed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
}

impl Quote {
    pub fn new(source: Source, token: impl Into<String>, price: f64) -> Self {
        Self {
            source,
            token: token.into(),
            price,
            observed_at: Utc::now(),
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Same observation re-priced, used for pegged tokens
    pub fn with_price(&self, price: f64) -> Self {
        Self {
            price,
            ..self.clone()
        }
    }

    pub fn has_valid_price(&self) -> bool {
        is_valid_price(self.price)
    }
}
