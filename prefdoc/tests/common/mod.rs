//! Shared helpers for `prefdoc` integration tests.

use camino::Utf8PathBuf;

/// Resolves the compiled `prefdoc` binary path, preferring the runtime
/// variables set by cargo and nextest over the compile-time fallback.
pub(crate) fn prefdoc_exe() -> Utf8PathBuf {
    std::env::var("NEXTEST_BIN_EXE_prefdoc")
        .or_else(|_| std::env::var("CARGO_BIN_EXE_prefdoc"))
        .map_or_else(
            |_| Utf8PathBuf::from(env!("CARGO_BIN_EXE_prefdoc")),
            Utf8PathBuf::from,
        )
}
