// Shared by multiple test binaries; none of them uses every helper.
#![allow(dead_code)]

pub mod extractor;
pub mod summarizer;
pub mod transcriber;
