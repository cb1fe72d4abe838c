use clubhouse::{configuration::Configuration, logger::init_logger};

#[tokio::main]
async fn main() {
    let config = Configuration::from_env();
    if let Err(e) = init_logger(&config) {
        eprintln!("could not start logging: {e}");
        std::process::exit(1);
    }

    if let Err(e) = clubhouse::run(config).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
