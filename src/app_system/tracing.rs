use tracing_subscriber::EnvFilter;

/// Installs the global subscriber: compact lines with uptime timestamps.
///
/// `filter` (from `STOREFRONT_LOG`) wins over `RUST_LOG`; with neither set
/// the level is `info`.
///
/// ```bash
/// RUST_LOG=debug storefront
/// STOREFRONT_LOG=storefront::services=debug,info storefront
/// ```
pub fn setup_tracing(filter: Option<&str>) {
    let env_filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
