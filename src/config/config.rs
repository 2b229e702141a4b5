use serde::Deserialize;

use crate::core;
use crate::core::access;

#[derive(Deserialize, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub session: core::Config,
    #[serde(default)]
    pub access: access::Config,
}
