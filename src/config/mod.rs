mod initialize;
pub use initialize::Initializer;

mod config;
pub use config::Config;

pub mod env {
    pub const LOG_DIRECTIVE: &str = "SCHOLARS_LOG";
}
