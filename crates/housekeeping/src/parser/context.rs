use std::sync::LazyLock;

use regex::Regex;

/// Ids that may appear inside a process/thread token: `T12` (thread),
/// `D3` (app domain), `P4412` (process) or the legacy `Thread 12`.
const THREAD_CONTEXT_PATTERN: &str =
    r"(?i)T(?P<THREAD>\d+)|D(?P<DOMAIN>\d+)|P(?P<PROCESS>\d+)|Thread (?P<THREADOLD>\d+)";

static THREAD_CONTEXT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(THREAD_CONTEXT_PATTERN).expect("Invalid thread context pattern")
});

/// Thread, process and domain ids of one entry. Any subset may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadContext {
    pub thread_id: Option<String>,
    pub process_id: Option<String>,
    pub domain_id: Option<String>,
}

/// Pulls ids out of the raw token captured by the line classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadContextExtractor;

impl ThreadContextExtractor {
    /// Scan every non-overlapping id occurrence, left to right.
    ///
    /// A later `T<n>`, `P<n>` or `D<n>` overwrites an earlier one of the
    /// same kind. `Thread <n>` only fills the thread id while it is unset.
    pub fn extract(&self, token: &str) -> ThreadContext {
        let mut ctx = ThreadContext::default();
        if token.is_empty() {
            return ctx;
        }

        for caps in THREAD_CONTEXT_REGEX.captures_iter(token) {
            if let Some(m) = caps.name("THREAD") {
                ctx.thread_id = Some(m.as_str().to_string());
            }
            if let Some(m) = caps.name("PROCESS") {
                ctx.process_id = Some(m.as_str().to_string());
            }
            if let Some(m) = caps.name("DOMAIN") {
                ctx.domain_id = Some(m.as_str().to_string());
            }
            if ctx.thread_id.is_none() {
                if let Some(m) = caps.name("THREADOLD") {
                    ctx.thread_id = Some(m.as_str().to_string());
                }
            }
        }

        ctx
    }
}
