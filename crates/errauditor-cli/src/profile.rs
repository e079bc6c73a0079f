//! Optional flamegraph profiling of pipeline phases.

#[cfg(feature = "profile")]
use std::fs::File;

#[cfg(feature = "profile")]
use tracing::{info, warn};

/// Run `f` and write `<name>.svg` (with the `profile` feature).
#[cfg(feature = "profile")]
pub fn profile_phase<F, R>(name: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let guard = match pprof::ProfilerGuard::new(1000) {
        Ok(guard) => guard,
        Err(e) => {
            warn!(phase = name, error = %e, "profiler unavailable");
            return f();
        }
    };
    let result = f();

    if let Ok(report) = guard.report().build() {
        let filename = format!("{name}.svg");
        match File::create(&filename) {
            Ok(file) => match report.flamegraph(file) {
                Ok(()) => info!("Flamegraph saved to {}", filename),
                Err(e) => warn!(phase = name, error = %e, "failed to write flamegraph"),
            },
            Err(e) => warn!(phase = name, error = %e, "failed to create flamegraph file"),
        }
    }

    result
}

#[cfg(not(feature = "profile"))]
pub fn profile_phase<F, R>(_name: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    f()
}
