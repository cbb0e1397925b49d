#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! `devmitra` binary entrypoint.

use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = devmitra_cli::run().await;
    if exit_code != 0 {
        process::exit(exit_code);
    }
}
