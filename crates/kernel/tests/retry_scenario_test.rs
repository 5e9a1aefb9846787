//! End-to-end scenario 1 from spec §8: a worker fails twice with a
//! retryable error, then succeeds. With `maxRetries=2` and a 100ms base
//! backoff, the final envelope should succeed and carry retry metadata
//! reflecting both attempts.

use kernel::{Kernel, KernelConfig};
use kernel_testing::ScriptedTransport;
use kernel_types::ToolRequest;

#[tokio::test]
async fn retries_until_success_and_records_retry_metadata() {
    let mut config = KernelConfig::default();
    config.resilience.max_retries = 2;
    config.resilience.retry_backoff_ms = 100;

    let kernel = Kernel::new(config);
    kernel.initialize(&kernel_testing::server_configs());
    kernel.set_executor_fn(
        ScriptedTransport::builder()
            .retryable_then_success("geowiz")
            .build(),
    );

    let response = kernel.execute(&ToolRequest::new("geowiz.analyze")).await;

    assert!(response.success);
    assert_eq!(response.metadata.retry_attempts, Some(2));
    assert!(response.metadata.total_retry_delay_ms.unwrap_or(0) >= 300);
}
