use clap::Args;

use crate::cli::print_identity;
use crate::core::access::Navigator;
use crate::Result;

/// Log in with email and password
#[derive(Args, Debug)]
pub struct LoginCommand {
    /// Account email, matched case-insensitively
    #[arg(long, env = "SCHOLARS_EMAIL")]
    email: String,
    /// Account password
    #[arg(long, env = "SCHOLARS_PASSWORD", hide_env_values = true)]
    password: String,
}

impl LoginCommand {
    pub async fn run(self, mut navigator: Navigator) -> Result<()> {
        let (identity, target) = navigator.login(self.email, self.password).await?;

        print_identity(&identity);
        println!("  next: {}", target);

        Ok(())
    }
}
