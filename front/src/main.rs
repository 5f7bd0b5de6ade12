use clap::Parser;
use front::{api::Client, controller::Controller, ui};

#[derive(Parser)]
struct Args {
    /// Base URL of the server's v1 interface.
    #[arg(long, default_value = "http://localhost:7890/api/v1")]
    api_url: String,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Args::parse();

    let client = Client::new(args.api_url);
    let mut controller = Controller::new(client);

    ui::run(&mut controller).await
}
