mod root;
pub use root::{initialize, parse, Command, GlobalOptions, ScholarsCommand};

pub mod login;
pub mod logout;
pub mod navigate;
pub mod register;
pub mod whoami;

use crate::core::Identity;

fn print_identity(identity: &Identity) {
    println!("{} <{}>", identity.name, identity.email);
    println!("  id:   {}", identity.id);
    println!("  role: {}", identity.role);
}
