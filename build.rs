/// Expose the compilation target triple as an environment variable at build time.
///
/// `codewiki version` prints it alongside the crate version.
fn main() {
    println!(
        "cargo:rustc-env=TARGET={}",
        std::env::var("TARGET").unwrap()
    );
}
