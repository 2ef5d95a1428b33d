use mass_fsync::{experiment, limits, Strategy};

fn init() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
    // 5000 open files don't fit under the usual soft limit of 1024
    limits::raise_open_file_limit().unwrap();
}

#[test]
fn small_trial() {
    init();
    let report = experiment::run_trial(50, &Strategy::benchmark_set()).unwrap();
    assert_eq!(report.file_count, 50);
    assert_eq!(report.timings.len(), 6);
}

#[test]
fn timings_are_finite_at_scale() {
    init();
    for file_count in [500, 5000] {
        let report = experiment::run_trial(file_count, &Strategy::benchmark_set()).unwrap();
        assert_eq!(report.file_count, file_count);
        for timing in &report.timings {
            let secs = timing.elapsed.as_secs_f64();
            assert!(secs.is_finite() && secs >= 0.0, "{}: {secs}", timing.strategy);
        }
    }
}

#[test]
fn run_all_small_counts() {
    init();
    experiment::run_all(&[1, 10], &Strategy::benchmark_set()).unwrap();
}
