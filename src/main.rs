// modchat - talk to an llm with moderation on both ends

use modchat::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("error: {e:?}");
        std::process::exit(1);
    }
}
