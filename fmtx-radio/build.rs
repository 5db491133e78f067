fn main() {
    // Ensure only one machine feature is enabled
    let linux = cfg!(feature = "machine-linux");
    let host = cfg!(feature = "machine-host");

    if linux && host {
        panic!("Cannot enable both 'machine-linux' and 'machine-host' features. Use --no-default-features --features machine-<type>");
    }

    if !linux && !host {
        panic!("Must enable either 'machine-linux' or 'machine-host' feature");
    }
}
