use crate::models::{ClusterDescription, ClusterStatus, ClusterSummary};

const UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Renders a byte count with binary units, e.g. `4.00 GiB`.
///
/// Plain bytes are printed without decimals (`0 B`, `512 B`).
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

/// Derives the listing row for a cluster.
///
/// Historical clusters carry no telemetry, so their resource fields are zero.
pub fn build_summary(cluster: &ClusterDescription) -> ClusterSummary {
    match cluster {
        ClusterDescription::Historical(report) => ClusterSummary {
            name: report.name.clone(),
            status: report.status,
            dashboard_link: report.dashboard_link.clone(),
            workers: 0,
            cores: 0,
            memory: format_bytes(0),
            started: report.start_time,
        },
        ClusterDescription::Live(live) => {
            let workers = &live.scheduler_info.workers;
            let cores = workers
                .values()
                .fold(0u64, |acc, w| acc.saturating_add(w.nthreads));
            let memory = workers
                .values()
                .fold(0u64, |acc, w| acc.saturating_add(w.memory_limit));
            ClusterSummary {
                name: live.name.clone(),
                status: ClusterStatus::Running,
                dashboard_link: live.dashboard_link.clone(),
                workers: workers.len(),
                cores,
                memory: format_bytes(memory),
                started: live.scheduler_info.started,
            }
        }
    }
}
