#[tokio::main]
async fn main() -> oax_concierge::error::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("oax_concierge=info,reqwest=warn"),
    )
    .init();
    log::info!("Starting oax-concierge");

    match oax_concierge::run().await {
        Ok(()) => {
            log::info!("Shell closed");
            Ok(())
        }
        Err(e) => {
            log::error!("Shell stopped with an error: {}", e);
            Err(e)
        }
    }
}
