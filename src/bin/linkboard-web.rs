//! linkboard-web: JSON API server for the linkboard screens.

#[tokio::main]
async fn main() {
    if let Err(error) = linkboard::web_client::run().await {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
