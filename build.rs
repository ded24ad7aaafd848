fn main() {
    println!("cargo:rerun-if-env-changed=HAZARD_WIFI_SSID");
    println!("cargo:rerun-if-env-changed=HAZARD_WIFI_PASS");
    println!("cargo:rerun-if-env-changed=HAZARD_DB_HOST");
    println!("cargo:rerun-if-env-changed=HAZARD_DB_AUTH");

    // ESP-IDF link arguments are only needed for the firmware image;
    // host test builds skip embuild entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
