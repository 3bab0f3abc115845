use std::fmt;

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};
use tracing::Subscriber;
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

lazy_static::lazy_static! {
    // Replaces key material that shows up in log output with a nickname
    static ref GLOBAL_REWRITER: LogRewriter = LogRewriter::new();
}

/// The key from the reference vectors: `"hello world"`.
pub const HELLO_WORLD_KEY: &[u8] = b"hello world";

/// A fixed 32 byte key for tests that want a full-length key.
pub const FULL_LENGTH_KEY: [u8; 32] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
    0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d,
    0x1e, 0x1f,
];

/// Install the test subscriber once per process.
///
/// Rewrites registered with [`redact_key`] or [`add_rewrite`] are kept, so
/// tests running in parallel never drop each other's redactions.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .pretty()
        .map_event_format(|_f| &*GLOBAL_REWRITER)
        .try_init();
}

pub fn add_rewrite<S1: ToString, S2: AsRef<str>>(from: S1, to: S2) {
    GLOBAL_REWRITER.add_rewrite(from, to);
}

/// Replace `key` in log output, hex encoded or as text, by `<key:nickname>`.
///
/// Best-effort: only events formatted by the subscriber from [`init_logging`]
/// are rewritten, and rewrites are global to the test process.
pub fn redact_key<K: AsRef<[u8]>, S: AsRef<str>>(key: K, nickname: S) {
    let key = key.as_ref();
    let nickname = format!("<key:{}>", nickname.as_ref());
    GLOBAL_REWRITER.add_rewrite(hex::encode(key), &nickname);
    if let Ok(text) = std::str::from_utf8(key) {
        if !text.is_empty() {
            GLOBAL_REWRITER.add_rewrite(text, &nickname);
        }
    }
}

#[derive(Clone)]
pub struct LogRewriter {
    rewrites: Arc<RwLock<HashMap<String, String>>>,
}

impl LogRewriter {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            rewrites: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn rewrite(&self, value: &str) -> String {
        let mut rewritten = value.to_string();
        for (from, to) in self.rewrites.read().unwrap().iter() {
            rewritten = rewritten.replace(from, to);
        }
        rewritten
    }

    pub fn add_rewrite<S: ToString, To: AsRef<str>>(&self, from: S, to: To) {
        self.rewrites
            .write()
            .unwrap()
            .insert(from.to_string(), to.as_ref().to_string());
    }

    pub fn clear_rewrites(&self) {
        self.rewrites.write().unwrap().clear();
    }
}

impl<S, N> FormatEvent<S, N> for &LogRewriter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> fmt::Result {
        let mut inner_writer = String::new();
        tracing_subscriber::fmt::format()
            .pretty()
            .format_event(ctx, Writer::new(&mut inner_writer), event)?;
        writer.write_str(&self.rewrite(&inner_writer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrites_all_occurrences() {
        let rewriter = LogRewriter::new();
        rewriter.add_rewrite("abcd", "<key:a>");
        assert_eq!(rewriter.rewrite("x abcd y abcd"), "x <key:a> y <key:a>");
    }

    #[test]
    fn test_init_logging_keeps_redactions() {
        redact_key(b"\x01\x02\xfe", "kept");
        init_logging();
        init_logging();
        assert_eq!(GLOBAL_REWRITER.rewrite("key=0102fe"), "key=<key:kept>");
    }

    #[test]
    fn test_clear_rewrites() {
        let rewriter = LogRewriter::new();
        rewriter.add_rewrite("abcd", "<key:a>");
        rewriter.clear_rewrites();
        assert_eq!(rewriter.rewrite("abcd"), "abcd");
    }
}
