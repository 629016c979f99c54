use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};
use crate::settings::{LogFormat, LogOutput, LogSettings, SettingsError};

/// 전역 tracing 구독자를 설치합니다.
///
/// 반환된 `WorkerGuard`가 drop되면 남은 로그를 비우므로 프로그램이 끝날 때까지 유지해야 합니다.
pub fn init_logging(settings: &LogSettings) -> Result<WorkerGuard, SettingsError> {
    let filter = EnvFilter::builder()
        .with_default_directive(settings.level.into())
        .from_env_lossy();

    let (writer, guard) = match &settings.output {
        LogOutput::Stdout => tracing_appender::non_blocking(std::io::stdout()),
        LogOutput::File(path) => {
            let path = Path::new(path);
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .ok_or_else(|| SettingsError::LoggingInit(format!("잘못된 로그 파일 경로: {}", path.display())))?;
            tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name))
        }
    };

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let result = match settings.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| SettingsError::LoggingInit(e.to_string()))?;

    Ok(guard)
}
