use std::net::SocketAddr;

use metrics_exporter_prometheus::BuildError;

use crate::instructions::Command;

// ── Engine metrics ──────────────────────────────────────────────

/// Counter: entry attempts that reached the lot search. Labels: category, outcome.
pub const ENTRIES_TOTAL: &str = "valet_entries_total";

/// Counter: successful exits. Labels: category.
pub const EXITS_TOTAL: &str = "valet_exits_total";

/// Counter: sum of fees charged. Labels: category.
pub const FEES_COLLECTED_TOTAL: &str = "valet_fees_collected_total";

/// Histogram: hours billed per exit. Labels: category.
pub const BILLED_HOURS: &str = "valet_billed_hours";

/// Gauge: occupied lots. Labels: category.
pub const LOTS_OCCUPIED: &str = "valet_lots_occupied";

// ── Runner metrics ──────────────────────────────────────────────

/// Counter: instructions that failed to parse or apply. Labels: command.
pub const INSTRUCTION_ERRORS_TOTAL: &str = "valet_instruction_errors_total";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) -> Result<(), BuildError> {
    let Some(port) = port else { return Ok(()) };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
    Ok(())
}

/// Map a Command variant to a short label for metrics.
pub fn command_label(cmd: Option<&Command>) -> &'static str {
    match cmd {
        Some(Command::Enter { .. }) => "enter",
        Some(Command::Exit { .. }) => "exit",
        None => "unparsed",
    }
}
