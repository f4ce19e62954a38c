use std::sync::{Arc, Mutex};

use clip_digest::{Summarizer, SummaryResponse};

#[derive(Clone)]
pub struct MockSummarizer {
    pub summary: Option<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockSummarizer {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: Some(summary.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    /// Returns the prompt it was handed as the summary.
    pub fn echoing() -> Self {
        Self {
            summary: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            summary: Some(String::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl Summarizer for MockSummarizer {
    const SUMMARIZER_MODEL: &'static str = "mock-gemini";
    type Error = anyhow::Error;

    async fn summarize(&self, prompt: &str) -> Result<SummaryResponse, Self::Error> {
        self.calls.lock().unwrap().push(prompt.to_string());

        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }

        let summary = match &self.summary {
            Some(summary) => summary.clone(),
            None => prompt.to_string(),
        };

        Ok(SummaryResponse { summary })
    }
}
