//! Default admin credential synthesis for cluster creation.
//!
//! Create options must never reach a provider without admin credentials, so
//! when the caller supplies none a user name is taken from the policy and a
//! random password is generated.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Shortest password the generator will produce.
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Longest password the generator will produce.
pub const MAX_PASSWORD_LENGTH: usize = 64;

const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
const DIGITS: &[u8] = b"23456789";

/// Policy for synthesizing admin credentials that were not supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPolicy {
    /// User name assigned when none is given.
    #[serde(default = "default_admin_user_name")]
    pub admin_user_name: String,
    /// Length of generated passwords, clamped to the supported range.
    #[serde(default = "default_password_length")]
    pub password_length: usize,
}

fn default_admin_user_name() -> String {
    "dwadmin".to_string()
}

fn default_password_length() -> usize {
    20
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            admin_user_name: default_admin_user_name(),
            password_length: default_password_length(),
        }
    }
}

impl CredentialPolicy {
    /// Returns the configured user name, or the built-in one if it is blank.
    pub fn user_name(&self) -> String {
        let name = self.admin_user_name.trim();
        if name.is_empty() {
            default_admin_user_name()
        } else {
            name.to_string()
        }
    }

    /// Generates a fresh password under this policy.
    pub fn password(&self) -> String {
        generate_admin_password(self.password_length)
    }
}

/// Generates a random alphanumeric password.
///
/// The result contains at least one upper-case letter, one lower-case letter
/// and one digit. Visually ambiguous characters (`0`, `O`, `1`, `l`, `I`) are
/// never used. `length` is clamped to
/// [`MIN_PASSWORD_LENGTH`]..=[`MAX_PASSWORD_LENGTH`].
pub fn generate_admin_password(length: usize) -> String {
    let length = length.clamp(MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH);
    let mut rng = rand::thread_rng();

    let mut chars: Vec<u8> = vec![
        UPPER[rng.gen_range(0..UPPER.len())],
        LOWER[rng.gen_range(0..LOWER.len())],
        DIGITS[rng.gen_range(0..DIGITS.len())],
    ];

    let all: Vec<u8> = [UPPER, LOWER, DIGITS].concat();
    while chars.len() < length {
        chars.push(all[rng.gen_range(0..all.len())]);
    }
    chars.shuffle(&mut rng);

    debug!(length, "generated default admin password");
    chars.into_iter().map(char::from).collect()
}
