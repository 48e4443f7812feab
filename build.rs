fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds (tests, fuzzing) carry no ESP-IDF toolchain; only the
    // firmware binary needs the sysenv propagated.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
