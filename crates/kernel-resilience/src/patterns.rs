use once_cell::sync::Lazy;
use regex::RegexSet;

use kernel_types::ErrorType;

/// Priority order matters: first matching category wins (§4.3).
static AUTH_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)unauthorized",
        r"(?i)forbidden",
        r"401",
        r"403",
        r"(?i)api.?key",
        r"(?i)authentication",
        r"(?i)credentials",
        r"(?i)access.?denied",
        r"(?i)permission",
        r"(?i)token.?expired",
    ])
    .expect("static auth pattern set is valid")
});

static USER_ACTION_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)file.?not.?found",
        r"ENOENT",
        r"(?i)missing.?(data|file|input)",
        r"(?i)no.?data",
        r"(?i)not.?provided",
        r"(?i)upload",
        r"(?i)please.?provide",
    ])
    .expect("static user-action pattern set is valid")
});

static RETRYABLE_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)rate.?limit|429|too many requests",
        r"(?i)timeout|timed?\s*out|ETIMEDOUT",
        r"ECONNRESET|ECONNREFUSED|ECONNABORTED|ENOTFOUND|ENETUNREACH|socket hang up",
        r"(?i)network",
        r"(?i)temporarily unavailable|service unavailable|503|502|504",
        r"(?i)retry",
    ])
    .expect("static retryable pattern set is valid")
});

static PERMANENT_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)invalid|validation|schema|malformed|unsupported",
        r"(?i)not.?found|does.?not.?exist",
        r"(?i)unknown.?tool",
        r"400",
    ])
    .expect("static permanent pattern set is valid")
});

/// Classify a raw error message into a taxonomy bucket, first match wins
/// (§4.3). Defaults to `Retryable` — optimistic, since an unrecognized
/// failure is more often transient than a caller mistake.
pub fn classify_error(message: &str) -> ErrorType {
    if AUTH_PATTERNS.is_match(message) {
        ErrorType::AuthRequired
    } else if USER_ACTION_PATTERNS.is_match(message) {
        ErrorType::UserAction
    } else if RETRYABLE_PATTERNS.is_match(message) {
        ErrorType::Retryable
    } else if PERMANENT_PATTERNS.is_match(message) {
        ErrorType::Permanent
    } else {
        ErrorType::Retryable
    }
}

static RATE_LIMIT_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([r"(?i)rate.?limit|429|too many requests"]).expect("valid pattern")
});

static TIMEOUT_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([r"(?i)timeout|timed?\s*out|ETIMEDOUT"]).expect("valid pattern")
});

/// Suggested retry-after delay in milliseconds for a raw error message
/// (§4.3): rate-limit-shaped errors back off the longest, timeouts a
/// little, everything else the base 1s.
pub fn retry_delay_ms(message: &str) -> u64 {
    if RATE_LIMIT_PATTERNS.is_match(message) {
        5000
    } else if TIMEOUT_PATTERNS.is_match(message) {
        2000
    } else {
        1000
    }
}
