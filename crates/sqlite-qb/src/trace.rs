//! `tracing` events for built statements (feature `tracing`).
//!
//! Events go to target `sqlite_qb.sql`. Without the feature every function
//! here is a no-op.

use crate::config::BuildConfig;
use crate::error::QbError;
use crate::stmt::StatementKind;

/// Cut `sql` to at most `max_bytes` on a char boundary.
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
fn display_sql<'a>(config: &BuildConfig, sql: &'a str) -> std::borrow::Cow<'a, str> {
    match config.max_logged_sql_length {
        Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)).into(),
        _ => sql.into(),
    }
}

#[cfg(feature = "tracing")]
pub(crate) fn built(config: &BuildConfig, kind: StatementKind, sql: &str) {
    use tracing::Level;

    macro_rules! emit_at_level {
        ($level:expr, $($field:tt)*) => {
            match $level {
                Level::ERROR => tracing::error!($($field)*),
                Level::WARN  => tracing::warn!($($field)*),
                Level::INFO  => tracing::info!($($field)*),
                Level::DEBUG => tracing::debug!($($field)*),
                Level::TRACE => tracing::trace!($($field)*),
            }
        };
    }

    if !config.logging_enabled {
        return;
    }
    let shown = display_sql(config, sql);
    emit_at_level!(
        config.log_level,
        target: "sqlite_qb.sql",
        kind = kind.as_str(),
        len = sql.len(),
        sql = %shown,
    );
}

#[cfg(feature = "tracing")]
pub(crate) fn failed(config: &BuildConfig, kind: StatementKind, error: &QbError) {
    if config.logging_enabled {
        tracing::warn!(target: "sqlite_qb.sql", kind = kind.as_str(), %error, "statement build failed");
    }
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn built(_config: &BuildConfig, _kind: StatementKind, _sql: &str) {}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn failed(_config: &BuildConfig, _kind: StatementKind, _error: &QbError) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_sql_bytes("SELECT 1", 100), "SELECT 1");
        assert_eq!(truncate_sql_bytes("SELECT 1", 6), "SELECT");
        // 'é' is two bytes; cutting inside it backs off.
        assert_eq!(truncate_sql_bytes("'é'", 2), "'");
    }

    #[test]
    fn display_sql_appends_ellipsis() {
        let config = BuildConfig::new().with_max_logged_sql_length(6);
        assert_eq!(display_sql(&config, "SELECT 1"), "SELECT...");
        assert_eq!(display_sql(&config.no_truncate(), "SELECT 1"), "SELECT 1");
    }
}
