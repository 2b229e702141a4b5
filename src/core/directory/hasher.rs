use std::fmt;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::Deserialize;

use crate::common::{Error, Result};

/// Argon2 cost parameters.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct HasherConfig {
    // Memory cost in KiB.
    memory_kib: Option<u32>,
    // Number of passes.
    iterations: Option<u32>,
    // Degree of parallelism.
    parallelism: Option<u32>,
}

impl HasherConfig {
    const DEFAULT_MEMORY_KIB: u32 = Params::DEFAULT_M_COST;
    const DEFAULT_ITERATIONS: u32 = Params::DEFAULT_T_COST;
    const DEFAULT_PARALLELISM: u32 = Params::DEFAULT_P_COST;

    pub fn set_memory_kib(&mut self, val: Option<u32>) {
        if let Some(val) = val {
            self.memory_kib = Some(val)
        }
    }
    pub fn set_iterations(&mut self, val: Option<u32>) {
        if let Some(val) = val {
            self.iterations = Some(std::cmp::max(val, 1))
        }
    }
    pub fn set_parallelism(&mut self, val: Option<u32>) {
        if let Some(val) = val {
            self.parallelism = Some(std::cmp::max(val, 1))
        }
    }

    fn params(&self) -> Result<Params> {
        let params = Params::new(
            self.memory_kib.unwrap_or(HasherConfig::DEFAULT_MEMORY_KIB),
            self.iterations.unwrap_or(HasherConfig::DEFAULT_ITERATIONS),
            self.parallelism.unwrap_or(HasherConfig::DEFAULT_PARALLELISM),
            None,
        )?;
        Ok(params)
    }
}

/// PHC formatted Argon2id hash of a secret.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretHash(String);

impl SecretHash {
    pub(crate) fn new_unchecked(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("SecretHash(***)")
    }
}

/// Hashes and verifies directory secrets.
pub struct SecretHasher {
    argon2: Argon2<'static>,
    // Same cost as real hashes, verified for emails with no record.
    decoy: SecretHash,
}

impl SecretHasher {
    pub fn new(config: &HasherConfig) -> crate::Result<Self> {
        let params = config.params()?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let decoy_secret =
            SaltString::encode_b64(&rand::random::<[u8; 16]>()).map_err(Error::from)?;
        let decoy = hash_with(&argon2, decoy_secret.as_str())?;

        Ok(Self { argon2, decoy })
    }

    pub fn hash(&self, secret: &str) -> crate::Result<SecretHash> {
        Ok(self.hash_inner(secret)?)
    }

    /// Constant time comparison of `secret` against `hash`.
    /// A hash that does not parse never verifies.
    pub fn verify(&self, secret: &str, hash: &SecretHash) -> bool {
        match PasswordHash::new(hash.as_str()) {
            Ok(parsed) => self
                .argon2
                .verify_password(secret.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Spend one verification on a hash nothing is expected to match.
    /// Keeps a lookup miss as slow as a wrong secret.
    pub fn verify_decoy(&self, secret: &str) {
        let _ = self.verify(secret, &self.decoy);
    }

    fn hash_inner(&self, secret: &str) -> Result<SecretHash> {
        hash_with(&self.argon2, secret)
    }
}

fn hash_with(argon2: &Argon2<'_>, secret: &str) -> Result<SecretHash> {
    let salt = SaltString::encode_b64(&rand::random::<[u8; 16]>())?;
    let phc = argon2.hash_password(secret.as_bytes(), &salt)?.to_string();
    Ok(SecretHash(phc))
}

impl fmt::Debug for SecretHasher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SecretHasher").finish_non_exhaustive()
    }
}
