use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use clap::Parser;
use clip_digest::{
    gemini::GeminiClient,
    http::router,
    media::ffmpeg::FfmpegExtractor,
    stt::{
        model::{default_cache_dir, ensure_model, WhisperModel},
        whisper::WhisperTranscriber,
    },
    tracing::init_tracing_subscriber,
    SummaryPipelineBuilder,
};
use ffmpeg_bindings::Ffmpeg;

#[derive(Parser)]
#[command(name = "clip-digest", about = "Video upload summarization service")]
struct Cli {
    /// Gemini API key used for summarization
    #[arg(long, env = "GEMINI_API_KEY")]
    gemini_api_key: String,

    /// Whisper model name (e.g. "base") or path to a ggml file
    #[arg(long, env = "WHISPER_MODEL", default_value = "base")]
    whisper_model: String,

    /// Override the model cache directory
    #[arg(long, env = "WHISPER_CACHE_DIR")]
    whisper_cache_dir: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8000")]
    listen_addr: SocketAddr,

    /// Working directory for request workspaces
    #[arg(long, env = "WORKDIR", default_value = "/var/tmp/clip-digest")]
    workdir: PathBuf,

    /// Maximum accepted upload size in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value = "536870912")]
    max_upload_bytes: usize,

    /// Explicit ffmpeg binary to use instead of the one on PATH
    #[arg(long, env = "FFMPEG_BIN")]
    ffmpeg_bin: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some("production".into()),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let model = WhisperModel::from(cli.whisper_model.as_str());
    let cache_dir = cli.whisper_cache_dir.unwrap_or_else(default_cache_dir);
    let model_path = ensure_model(&model, &cache_dir).await?;
    let transcriber = WhisperTranscriber::new(&model_path, model.name())?;

    let ffmpeg = match &cli.ffmpeg_bin {
        Some(bin) => Ffmpeg::with_binary(bin),
        None => Ffmpeg::new(),
    }?;

    let pipeline = SummaryPipelineBuilder::new(&cli.workdir)
        .extractor(FfmpegExtractor(ffmpeg))
        .transcriber(transcriber)
        .summarizer(GeminiClient::new(&cli.gemini_api_key))
        .build();

    let app = router(Arc::new(pipeline), cli.max_upload_bytes);

    tracing::info!(addr = %cli.listen_addr, "Starting clip-digest server...");
    let listener = tokio::net::TcpListener::bind(cli.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
