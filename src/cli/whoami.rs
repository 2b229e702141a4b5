use clap::Args;

use crate::cli::print_identity;
use crate::core::access::Navigator;
use crate::Result;

/// Print the restored session
#[derive(Args, Debug)]
pub struct WhoamiCommand {
    /// Print the identity as json
    #[arg(long)]
    json: bool,
}

impl WhoamiCommand {
    pub async fn run(self, navigator: Navigator) -> Result<()> {
        let snapshot = navigator.session().ready().await?;

        match snapshot.identity() {
            Some(identity) if self.json => {
                let json = serde_json::to_string_pretty(identity)
                    .map_err(|err| crate::ScholarsError::Internal(err.to_string()))?;
                println!("{}", json);
            }
            Some(identity) => print_identity(identity),
            None => println!("anonymous"),
        }

        Ok(())
    }
}
