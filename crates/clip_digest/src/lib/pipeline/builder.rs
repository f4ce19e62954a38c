use std::path::PathBuf;

use crate::{media::AudioExtractor, stt::Transcriber, Summarizer, SummaryPipeline};

pub struct SummaryPipelineBuilder<E = (), T = (), S = ()> {
    workdir: PathBuf,
    extractor: E,
    transcriber: T,
    summarizer: S,
}

impl SummaryPipelineBuilder {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            extractor: (),
            transcriber: (),
            summarizer: (),
        }
    }
}

impl<E, T, S> SummaryPipelineBuilder<E, T, S> {
    pub fn extractor<E2: AudioExtractor + Send + Sync + 'static>(
        self,
        extractor: E2,
    ) -> SummaryPipelineBuilder<E2, T, S> {
        SummaryPipelineBuilder {
            workdir: self.workdir,
            extractor,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
        }
    }

    pub fn transcriber<T2: Transcriber + Send + Sync + 'static>(
        self,
        transcriber: T2,
    ) -> SummaryPipelineBuilder<E, T2, S> {
        SummaryPipelineBuilder {
            workdir: self.workdir,
            extractor: self.extractor,
            transcriber,
            summarizer: self.summarizer,
        }
    }

    pub fn summarizer<S2: Summarizer + Send + Sync + 'static>(
        self,
        summarizer: S2,
    ) -> SummaryPipelineBuilder<E, T, S2> {
        SummaryPipelineBuilder {
            workdir: self.workdir,
            extractor: self.extractor,
            transcriber: self.transcriber,
            summarizer,
        }
    }
}

impl<E, T, S> SummaryPipelineBuilder<E, T, S>
where
    E: AudioExtractor + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    pub fn build(self) -> SummaryPipeline<E, T, S> {
        SummaryPipeline {
            workdir: self.workdir,
            extractor: self.extractor,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
        }
    }
}
