use clap::Args;

use crate::core::access::{Decision, Navigator};
use crate::Result;

/// Evaluate access to a path
#[derive(Args, Debug)]
pub struct NavigateCommand {
    /// Requested path (e.g. /student/dashboard)
    #[arg(value_name = "PATH")]
    path: String,
}

impl NavigateCommand {
    pub async fn run(self, mut navigator: Navigator) -> Result<()> {
        match navigator.navigate(&self.path).await? {
            Decision::Allow => println!("allow {}", self.path),
            Decision::Redirect(redirect) => match redirect.from {
                Some(from) => println!("redirect {} (from {})", redirect.to, from),
                None => println!("redirect {}", redirect.to),
            },
        }

        Ok(())
    }
}
