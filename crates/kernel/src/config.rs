use std::env;

use kernel_audit::AuditConfig;
use kernel_executor::ExecutorConfig;
use kernel_types::DetailLevel;

/// Execution-surface slice of `KernelConfig` (§6).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecutionConfig {
    pub default_detail_level: DetailLevel,
    pub max_parallel: usize,
    pub tool_timeout_ms: u64,
    pub idempotency_ttl_ms: u64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            default_detail_level: DetailLevel::Standard,
            max_parallel: 6,
            tool_timeout_ms: 30_000,
            idempotency_ttl_ms: 300_000,
        }
    }
}

/// Security-surface slice of `KernelConfig` (§6).
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityConfig {
    pub require_auth: bool,
    pub audit_enabled: bool,
    pub audit_path: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        let audit = AuditConfig::default();
        Self {
            require_auth: false,
            audit_enabled: audit.enabled,
            audit_path: audit.path.to_string_lossy().into_owned(),
        }
    }
}

/// Resilience-surface slice of `KernelConfig` (§6).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResilienceConfig {
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub graceful_degradation: bool,
    pub min_completeness: f64,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            retry_backoff_ms: 1000,
            graceful_degradation: true,
            min_completeness: 0.5,
        }
    }
}

/// The kernel's full config surface (§6), read once at facade construction
/// (Design Note, §9). `Default::default()` gives the documented defaults;
/// `KernelConfig::from_env` then layers `KERNEL_AUDIT_ENABLED` and
/// `KERNEL_AUDIT_PATH` on top, matching `kernel-audit`'s own env layering.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelConfig {
    pub execution: ExecutionConfig,
    pub security: SecurityConfig,
    pub resilience: ResilienceConfig,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            execution: ExecutionConfig::default(),
            security: SecurityConfig::default(),
            resilience: ResilienceConfig::default(),
        }
    }
}

impl KernelConfig {
    /// Apply `KERNEL_AUDIT_ENABLED`/`KERNEL_AUDIT_PATH` on top of `self`,
    /// leaving every other field untouched (§6). Per spec: `"false"`
    /// disables audit; any other value or unset leaves the config default
    /// in effect. Uses the same value matching as
    /// `kernel_audit::AuditConfig::from_env` so the two never disagree
    /// about what counts as "disabled".
    pub fn with_env_overrides(mut self) -> Self {
        if env::var("KERNEL_AUDIT_ENABLED").as_deref() == Ok("false") {
            self.security.audit_enabled = false;
        }
        if let Ok(path) = env::var("KERNEL_AUDIT_PATH") {
            self.security.audit_path = path;
        }
        self
    }

    pub(crate) fn executor_config(&self) -> ExecutorConfig {
        ExecutorConfig {
            tool_timeout_ms: self.execution.tool_timeout_ms,
            max_retries: self.resilience.max_retries,
            max_parallel: self.execution.max_parallel,
            retry_backoff_ms: self.resilience.retry_backoff_ms,
        }
    }

    pub(crate) fn audit_config(&self) -> AuditConfig {
        AuditConfig {
            enabled: self.security.audit_enabled,
            path: self.security.audit_path.clone().into(),
        }
    }
}
