fn main() {
    let version = chrono::Utc::now().format("%Y.%m.%d-%H%M");
    println!("cargo:rustc-env=BUILD_VERSION={version}");
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}
