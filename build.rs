fn main() {
    // Stamp the bundle so the Home view can show when it was built.
    let built_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    println!("cargo:rustc-env=RAGASK_BUILD_TIME={built_at}");
    println!("cargo:rerun-if-changed=src");
}
