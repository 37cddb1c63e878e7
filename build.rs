fn main() {
    // Propagate the ESP-IDF sysenv to dependent crates.  Host-target test
    // builds run with --no-default-features and have no sysenv; embuild's
    // output is a no-op without one, but skip it entirely to keep the
    // host build log clean.
    if std::env::var("CARGO_FEATURE_ESPIDF").is_ok() {
        embuild::espidf::sysenv::output();
    }
}
