use clap::Args;

use crate::core::access::Navigator;
use crate::Result;

/// Clear the current session
#[derive(Args, Debug)]
pub struct LogoutCommand {}

impl LogoutCommand {
    pub async fn run(self, mut navigator: Navigator) -> Result<()> {
        navigator.logout().await?;
        println!("OK");
        Ok(())
    }
}
