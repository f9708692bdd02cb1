use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Routes `tracing` output to `path`. The terminal belongs to the renderer, so
/// without a path nothing is installed. Keep the guard alive until shutdown.
pub fn init(path: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let file_name = path
        .file_name()
        .context("--log-file must name a file")?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).context("creating log directory failed")?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        dir, file_name,
    ));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .context("installing log subscriber failed")?;
    Ok(Some(guard))
}
