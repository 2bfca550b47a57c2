//! Entry point for the `realmctl` binary.

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let code = realmctl_cli::run().await;
    std::process::exit(code);
}
