pub mod careers;
pub mod config;
pub mod consult;
pub mod conversation;
pub mod error;
pub mod shell;
pub mod types;

#[cfg(test)]
mod test_support;

use log::info;
use tokio::io::{BufReader, stdin, stdout};

use config::Config;
use error::Result;
use shell::Shell;

/// Run the terminal front end on stdin/stdout.
pub async fn run() -> Result<()> {
    let config = Config::from_env()?;

    info!("Starting terminal shell");
    let mut shell = Shell::new(BufReader::new(stdin()), stdout(), config);
    shell.run().await?;

    Ok(())
}
