use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "doacore=debug,tower_http=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Initialize tracing. Production emits JSON lines, everything else a compact
/// console format. `RUST_LOG` overrides the default filter.
pub fn init_telemetry(json_output: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if json_output {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init()?;
    } else {
        // Console: compact format, no timestamps (the terminal or supervisor adds them)
        let console_fmt = tracing_subscriber::fmt::layer().event_format(
            Format::default()
                .compact()
                .with_target(false)
                .without_time(),
        );
        tracing_subscriber::registry()
            .with(env_filter())
            .with(console_fmt)
            .try_init()?;
    }

    tracing::info!(json_output, "Tracing initialized");
    Ok(())
}
