mod config;
mod level_filter_trie;

pub use config::{Level, LogTargetConfig, LoggingConfig};

pub type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Installs the global subscriber. Thread names are printed since every
/// execution unit runs on a thread of its own.
pub fn init(config: &LoggingConfig) -> Result<(), AnyError> {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{Layer, filter};

    let trie = level_filter_trie::FilterTrie::from_statements(&config.log_target_filter);
    let min_level = config.min_log_level;

    let fmt = tracing_subscriber::fmt::layer()
        .pretty()
        .with_target(true)
        .with_thread_names(true)
        .with_file(true)
        .with_filter(filter::filter_fn(move |meta| {
            let allowed = trie
                .level_for_target(meta.target().split("::"))
                .unwrap_or(min_level);
            allowed >= *meta.level()
        }));

    tracing_subscriber::registry().with(fmt).try_init()?;
    Ok(())
}
