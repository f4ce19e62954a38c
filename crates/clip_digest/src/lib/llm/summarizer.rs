use std::{fmt::Debug, future::Future};

use serde::{Deserialize, Serialize};

pub trait Summarizer {
    const SUMMARIZER_MODEL: &str;

    type Error: Debug;

    fn summarize(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<SummaryResponse, Self::Error>> + Send;
}

/// Success body returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}
