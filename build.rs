// RustFmBeacon - Build Script

fn main() {
    // ESP-IDF environment is only needed when building the firmware binary.
    // Host builds (cargo test) skip it entirely.
    if std::env::var_os("CARGO_FEATURE_ESP32").is_some() {
        embuild::espidf::sysenv::output();
    }
}
