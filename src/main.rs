#[tokio::main]
async fn main() {
    if let Err(e) = parktrack_lib::run().await {
        eprintln!("parktrack: {e}");
        std::process::exit(1);
    }
}
