use proptest::test_runner::Config;

/// Shared proptest config. Case count still follows `PROPTEST_CASES`.
pub(crate) fn proptest_cfg() -> Config {
    Config {
        failure_persistence: None,
        ..Config::default()
    }
}
