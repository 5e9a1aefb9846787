use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber (`RUST_LOG`-filtered, human
/// readable) for a host process that wants the kernel's diagnostics on
/// stdout (§9 Design Note "Global/process state", §10.1). Optional and
/// opt-in: nothing in `kernel` or the crates below it calls this
/// implicitly. Call once, before `Kernel::new`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}
