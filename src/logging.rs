use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. An explicit `level` applies to this crate only;
/// otherwise `RUST_LOG` directives are used as given, falling back to `info`.
pub fn init(level: Option<&str>) {
    let filter = match level {
        Some(level) => scoped_filter(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| scoped_filter("info")),
    };

    let initialized = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    if initialized.is_err() {
        tracing::debug!("Logging was already initialized");
    }
}

// Our own crate at `level`, everything else (winit, wgpu, egui) at warn.
fn scoped_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(format!("warn,{}={level}", env!("CARGO_CRATE_NAME")))
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{}=info", env!("CARGO_CRATE_NAME"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_filter_keeps_other_crates_at_warn() {
        let filter = scoped_filter("debug").to_string();
        assert!(filter.contains("warn"), "{filter}");
        assert!(filter.contains(&format!("{}=debug", env!("CARGO_CRATE_NAME"))), "{filter}");
    }

    #[test]
    fn bad_level_falls_back_to_scoped_info() {
        let filter = scoped_filter("fitnessTracker=debug").to_string();
        assert!(filter.contains(&format!("{}=info", env!("CARGO_CRATE_NAME"))), "{filter}");
        assert!(!filter.contains("fitnessTracker=fitnessTracker"), "{filter}");
    }
}
