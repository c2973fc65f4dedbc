//! Log output for unit tests.
//!
//! Messages go through `env_logger`, captured by the test harness unless
//! `--nocapture` is given.  Set `RUST_LOG` to see them.

pub fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}
