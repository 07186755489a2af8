//! Entry point for the `dispatch` binary.
#![forbid(unsafe_code)]

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr before exiting"
)]
fn main() {
    if let Err(err) = dispatch_cli::run() {
        eprintln!("dispatch: {err}");
        std::process::exit(1);
    }
}
