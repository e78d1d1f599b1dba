/**
 * Password Strength Policy and Hashing
 *
 * Registration runs every candidate password through a `PasswordPolicy`,
 * an ordered list of `PasswordValidator`s. All validators run; their
 * messages are reported together so the user can fix everything at once.
 *
 * The default policy rejects passwords that are:
 * - shorter than the configured minimum length
 * - entirely numeric
 * - on the built-in common-password list
 * - too similar to the user's email, username or name
 *
 * The policy also owns the bcrypt cost, so tests can hash cheaply.
 *
 * Logins for unknown emails still pay for one bcrypt verification
 * (`verify_absent`), so response time does not reveal which emails exist.
 */

use std::collections::HashSet;
use std::sync::OnceLock;

use crate::shared::SharedError;

/// Lowest bcrypt cost the hasher accepts
pub const MIN_HASH_COST: u32 = 4;
/// Highest bcrypt cost the hasher accepts
pub const MAX_HASH_COST: u32 = 31;

/// The profile fields a password is compared against
#[derive(Debug, Clone, Copy)]
pub struct UserAttributes<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

/// A single password rule
pub trait PasswordValidator: Send + Sync {
    /// Return `Err` with a user-facing message when `password` breaks the rule
    fn validate(&self, password: &str, user: &UserAttributes<'_>) -> Result<(), String>;
}

/// Rejects passwords shorter than `min_length` characters
#[derive(Debug, Clone)]
pub struct MinimumLength {
    pub min_length: usize,
}

impl PasswordValidator for MinimumLength {
    fn validate(&self, password: &str, _user: &UserAttributes<'_>) -> Result<(), String> {
        if password.chars().count() < self.min_length {
            return Err(format!(
                "This password is too short. It must contain at least {} characters.",
                self.min_length
            ));
        }
        Ok(())
    }
}

/// Rejects passwords made only of digits
#[derive(Debug, Clone, Default)]
pub struct NumericPassword;

impl PasswordValidator for NumericPassword {
    fn validate(&self, password: &str, _user: &UserAttributes<'_>) -> Result<(), String> {
        if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
            return Err("This password is entirely numeric.".to_string());
        }
        Ok(())
    }
}

const COMMON_PASSWORDS: &[&str] = &[
    "123456", "password", "12345678", "qwerty", "123456789", "12345", "1234", "111111",
    "1234567", "dragon", "123123", "baseball", "abc123", "football", "monkey", "letmein",
    "696969", "shadow", "master", "666666", "qwertyuiop", "123321", "mustang", "1234567890",
    "michael", "654321", "superman", "1qaz2wsx", "7777777", "121212", "000000", "qazwsx",
    "123qwe", "killer", "trustno1", "jordan", "jennifer", "zxcvbnm", "asdfgh", "hunter",
    "buster", "soccer", "harley", "batman", "andrew", "tigger", "sunshine", "iloveyou",
    "2000", "charlie", "robert", "thomas", "hockey", "ranger", "daniel", "starwars",
    "klaster", "112233", "george", "computer", "michelle", "jessica", "pepper", "1111",
    "zxcvbn", "555555", "11111111", "131313", "freedom", "777777", "pass", "maggie",
    "159753", "aaaaaa", "ginger", "princess", "joshua", "cheese", "amanda", "summer",
    "love", "ashley", "nicole", "chelsea", "biteme", "matthew", "access", "yankees",
    "987654321", "dallas", "austin", "thunder", "taylor", "matrix", "password1",
    "password123", "welcome", "welcome1", "admin", "admin123", "passw0rd", "p@ssw0rd",
    "qwerty123", "iloveyou1", "secret", "changeme", "letmein1", "trustno1!", "abcdef",
    "abcd1234", "1q2w3e4r", "1q2w3e4r5t", "q1w2e3r4", "zaq12wsx", "login", "starwars1",
];

/// Rejects passwords found on a list of commonly used passwords
///
/// Comparison is case-insensitive.
#[derive(Debug, Clone)]
pub struct CommonPassword {
    passwords: HashSet<String>,
}

impl CommonPassword {
    /// Use a custom password list
    pub fn with_list<I, S>(passwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            passwords: passwords
                .into_iter()
                .map(|p| p.as_ref().trim().to_lowercase())
                .collect(),
        }
    }
}

impl Default for CommonPassword {
    fn default() -> Self {
        Self::with_list(COMMON_PASSWORDS)
    }
}

impl PasswordValidator for CommonPassword {
    fn validate(&self, password: &str, _user: &UserAttributes<'_>) -> Result<(), String> {
        if self.passwords.contains(&password.trim().to_lowercase()) {
            return Err("This password is too common.".to_string());
        }
        Ok(())
    }
}

/// Rejects passwords too similar to a user attribute
///
/// Each attribute is compared whole and split on non-alphanumeric
/// characters, so `ada.lovelace@example.com` also checks `ada` and
/// `lovelace`.
#[derive(Debug, Clone)]
pub struct UserAttributeSimilarity {
    /// Normalized Levenshtein similarity at or above which a password fails
    pub max_similarity: f64,
}

impl Default for UserAttributeSimilarity {
    fn default() -> Self {
        Self { max_similarity: 0.7 }
    }
}

impl PasswordValidator for UserAttributeSimilarity {
    fn validate(&self, password: &str, user: &UserAttributes<'_>) -> Result<(), String> {
        let password = password.to_lowercase();
        let attributes = [
            ("email address", user.email),
            ("username", user.username),
            ("first name", user.first_name),
            ("last name", user.last_name),
        ];

        for (label, value) in attributes {
            let value = value.to_lowercase();
            if value.is_empty() {
                continue;
            }
            let parts = std::iter::once(value.as_str())
                .chain(value.split(|c: char| !c.is_alphanumeric()))
                .filter(|part| part.chars().count() >= 3);

            for part in parts {
                if strsim::normalized_levenshtein(&password, part) >= self.max_similarity {
                    return Err(format!("The password is too similar to the {}.", label));
                }
            }
        }
        Ok(())
    }
}

/// Ordered set of validators plus the hashing cost
pub struct PasswordPolicy {
    validators: Vec<Box<dyn PasswordValidator>>,
    hash_cost: u32,
    /// Hash at `hash_cost` checked against when no user matches a login
    dummy_hash: OnceLock<String>,
}

impl std::fmt::Debug for PasswordPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordPolicy")
            .field("validators", &self.validators.len())
            .field("hash_cost", &self.hash_cost)
            .finish()
    }
}

impl PasswordPolicy {
    /// A policy with no validators
    pub fn empty(hash_cost: u32) -> Self {
        Self {
            validators: Vec::new(),
            hash_cost,
            dummy_hash: OnceLock::new(),
        }
    }

    /// The four standard validators with the given minimum length
    pub fn standard(min_length: usize, hash_cost: u32) -> Self {
        Self::empty(hash_cost)
            .with_validator(UserAttributeSimilarity::default())
            .with_validator(MinimumLength { min_length })
            .with_validator(CommonPassword::default())
            .with_validator(NumericPassword)
    }

    /// Append a validator
    pub fn with_validator(mut self, validator: impl PasswordValidator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Run every validator and report all failures together
    pub fn validate(&self, password: &str, user: &UserAttributes<'_>) -> Result<(), SharedError> {
        let failures: Vec<String> = self
            .validators
            .iter()
            .filter_map(|validator| validator.validate(password, user).err())
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(SharedError::validation("password", failures.join(" ")))
        }
    }

    /// Hash a password with a fresh salt
    pub fn hash(&self, password: &str) -> Result<String, bcrypt::BcryptError> {
        bcrypt::hash(password, self.hash_cost)
    }

    /// Check a password against a stored hash
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
        bcrypt::verify(password, hash)
    }

    /// Do the work of `verify` for a login that matched no user
    ///
    /// The outcome is always a mismatch; only the elapsed time matters.
    pub fn verify_absent(&self, password: &str) -> Result<(), bcrypt::BcryptError> {
        let hash = match self.dummy_hash.get() {
            Some(hash) => hash,
            None => {
                let hash = self.hash("no user has this password")?;
                self.dummy_hash.get_or_init(|| hash)
            }
        };
        bcrypt::verify(password, hash)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn dummy_hash_cost(&self) -> Option<u32> {
        self.dummy_hash
            .get()
            .and_then(|hash| hash.get(4..6))
            .and_then(|cost| cost.parse().ok())
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::standard(8, bcrypt::DEFAULT_COST)
    }
}
