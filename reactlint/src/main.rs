//! Main binary entry point for the `reactlint` linter.
//!
//! This binary simply delegates to the shared `entry_point::run_with_args()` function
//! so the binary and the integration tests go through the same code path.

use anyhow::Result;

fn main() -> Result<()> {
    let code = reactlint::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
