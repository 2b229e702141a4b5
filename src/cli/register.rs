use clap::Args;

use crate::cli::print_identity;
use crate::core::access::Navigator;
use crate::core::{Profile, Registration};
use crate::Result;

/// Create an account
///
/// The account lives in the in-memory directory of this process only, the
/// resulting session is persisted like any login.
#[derive(Args, Debug)]
pub struct RegisterCommand {
    /// Display name
    #[arg(long)]
    name: String,
    /// Account email
    #[arg(long)]
    email: String,
    /// Account password
    #[arg(long, env = "SCHOLARS_PASSWORD", hide_env_values = true)]
    password: String,
    /// Password confirmation
    #[arg(long)]
    confirm_password: Option<String>,
    /// One of student, organization, university
    #[arg(long, default_value = "student")]
    role: String,
    /// Skills, repeatable
    #[arg(long = "skill")]
    skills: Vec<String>,
}

impl RegisterCommand {
    pub async fn run(self, mut navigator: Navigator) -> Result<()> {
        let RegisterCommand {
            name,
            email,
            password,
            confirm_password,
            role,
            skills,
        } = self;

        let mut registration = Registration::new(name, email, password, role).with_profile(Profile {
            skills,
            ..Default::default()
        });
        if let Some(confirm) = confirm_password {
            registration = registration.with_confirmation(confirm);
        }

        let (identity, target) = navigator.register(registration).await?;

        print_identity(&identity);
        println!("  next: {}", target);

        Ok(())
    }
}
