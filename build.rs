fn main() {
    // ESP-IDF link arguments are only needed for the device build; host-side
    // test builds run without the `espidf` feature.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
