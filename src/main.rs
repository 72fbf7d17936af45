use log::info;
use projectopia::{service, CreateOptions, Error};
use structopt::StructOpt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    let options = CreateOptions::from_args();

    // set up logging, allowing info level logging by default
    env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("create-repo starting");

    service::run(options).await
}
