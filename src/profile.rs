use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

pub const MAX_BIO_CHARS: usize = 500;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub wallet_address: String,
}

/// Editable subset of a profile. The e-mail is the account key and is not editable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub organization: String,
    pub bio: String,
    pub wallet_address: String,
}

impl ProfileUpdate {
    pub fn from_profile(p: &Profile) -> Self {
        Self {
            name: p.name.clone(),
            organization: p.organization.clone(),
            bio: p.bio.clone(),
            wallet_address: p.wallet_address.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.name.trim().is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if self.bio.chars().count() > MAX_BIO_CHARS {
            return Err(ProfileError::BioTooLong { max: MAX_BIO_CHARS });
        }
        let wallet = self.wallet_address.trim();
        if !wallet.is_empty() && !is_wallet_address(wallet) {
            return Err(ProfileError::InvalidWallet);
        }
        Ok(())
    }

    /// Applies a validated update, trimming surrounding whitespace.
    pub fn apply(&self, profile: &mut Profile) -> Result<(), ProfileError> {
        self.validate()?;
        profile.name = self.name.trim().to_string();
        profile.organization = self.organization.trim().to_string();
        profile.bio = self.bio.trim().to_string();
        profile.wallet_address = self.wallet_address.trim().to_string();
        Ok(())
    }
}

fn is_wallet_address(s: &str) -> bool {
    match s.strip_prefix("0x") {
        Some(hex) => hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update() -> ProfileUpdate {
        ProfileUpdate {
            name: "Ada Lovelace".to_string(),
            organization: "Analytical Engines Ltd".to_string(),
            bio: "Inventor".to_string(),
            wallet_address: String::new(),
        }
    }

    #[test]
    fn accepts_empty_wallet_and_trims() {
        let mut p = Profile {
            name: "old".to_string(),
            email: "ada@example.com".to_string(),
            ..Profile::default()
        };
        let mut u = update();
        u.name = "  Ada  ".to_string();
        u.apply(&mut p).unwrap();
        assert_eq!(p.name, "Ada");
        assert_eq!(p.email, "ada@example.com");
    }

    #[test]
    fn rejects_blank_name() {
        let mut u = update();
        u.name = "   ".to_string();
        assert_eq!(u.validate(), Err(ProfileError::EmptyName));
    }

    #[test]
    fn rejects_long_bio() {
        let mut u = update();
        u.bio = "x".repeat(MAX_BIO_CHARS + 1);
        assert_eq!(
            u.validate(),
            Err(ProfileError::BioTooLong { max: MAX_BIO_CHARS })
        );
    }

    #[test]
    fn wallet_format() {
        let mut u = update();
        u.wallet_address = format!("0x{}", "aB3".repeat(13) + "f");
        assert_eq!(u.validate(), Ok(()));

        u.wallet_address = "0x1234".to_string();
        assert_eq!(u.validate(), Err(ProfileError::InvalidWallet));

        u.wallet_address = "z".repeat(42);
        assert_eq!(u.validate(), Err(ProfileError::InvalidWallet));
    }
}
