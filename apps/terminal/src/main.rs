//! # Tally Terminal Entry Point
//!
//! ## Usage
//! ```bash
//! # Interactive
//! cargo run -p tally-terminal
//!
//! # Scripted, JSON responses
//! echo "0.1+0.2=" | TALLY_OUTPUT=json cargo run -p tally-terminal
//! ```

#[tokio::main]
async fn main() {
    // The actual setup is in lib.rs for better testability
    if let Err(err) = tally_terminal::run().await {
        eprintln!("tally: {}", err);
        std::process::exit(1);
    }
}
