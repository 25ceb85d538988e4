extern crate rustc_version;
use rustc_version::{version, Version};

// The MIC Engine and Format Bridge lean on non_exhaustive enums and the 2018 TryFrom/TryInto
// prelude items that the MSRV below guarantees; bail out early with a clear message rather than
// failing deep inside a dependency's macro expansion on an older toolchain.
const MIN_RUSTC: &str = "1.49.0";

fn main() {
    let version = version().expect("failed to query the rustc version in use for this build");
    if version < Version::parse(MIN_RUSTC).unwrap() {
        eprintln!(
            "\n\ndocsis-tlv requires at least Rust {}.\n\
             Version {} is being used for this build.\n\
             Build aborted.\n\n",
            MIN_RUSTC, version
        );
        panic!();
    }
}

