use crate::common::*;

use crate::env_configuration::env_config::*;

#[doc = "One log line: timestamp, level, module and message"]
fn log_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{}] [{}] [{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.module_path().unwrap_or("<unnamed>"),
        &record.args()
    )
}

#[doc = r#"
    Starts the global logger.

    Logs go to `LOG_DIRECTORY`, rotated daily and keeping the last 10 files,
    and are duplicated to stderr from `info` up. `RUST_LOG` overrides the level.
    The returned handle must be kept alive for the whole run.
"#]
pub fn set_global_logger() -> anyhow::Result<LoggerHandle> {
    let handle: LoggerHandle = Logger::try_with_env_or_str("info")?
        .log_to_file(
            FileSpec::default()
                .directory(LOG_DIRECTORY.as_str())
                .basename("fetch_graphs"),
        )
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(10),
        )
        .format_for_files(log_format)
        .duplicate_to_stderr(Duplicate::Info)
        .start()?;

    Ok(handle)
}
