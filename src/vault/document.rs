//! The decrypted vault document: source -> account -> password.
//!
//! Serialized as a JSON object of objects.  `BTreeMap` keeps both levels
//! sorted by key, which is the order every listing is reported in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{Result, ShelterError};

/// account -> password.
pub type AccountMap = BTreeMap<String, String>;

/// The full source -> account -> password hierarchy.
///
/// A source is present only while it holds at least one account.
/// Password strings are wiped when the document is dropped.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VaultDocument {
    sources: BTreeMap<String, AccountMap>,
}

impl Drop for VaultDocument {
    fn drop(&mut self) {
        for accounts in self.sources.values_mut() {
            for password in accounts.values_mut() {
                password.zeroize();
            }
        }
    }
}

impl VaultDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse decrypted JSON.
    ///
    /// A source with no accounts is rejected as `Corrupt`, the same as a
    /// document of the wrong shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Self =
            serde_json::from_str(json).map_err(|e| ShelterError::Corrupt(e.to_string()))?;

        if let Some(source) = doc
            .sources
            .iter()
            .find_map(|(source, accounts)| accounts.is_empty().then_some(source))
        {
            return Err(ShelterError::Corrupt(format!(
                "source '{source}' has no accounts"
            )));
        }
        Ok(doc)
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<Zeroizing<String>> {
        serde_json::to_string(self)
            .map(Zeroizing::new)
            .map_err(|e| ShelterError::Corrupt(e.to_string()))
    }

    /// All sources, sorted.
    pub fn sources(&self) -> Vec<String> {
        self.sources.keys().cloned().collect()
    }

    /// Every source with its sorted account names.
    pub fn all_accounts(&self) -> BTreeMap<String, Vec<String>> {
        self.sources
            .iter()
            .map(|(source, accounts)| (source.clone(), accounts.keys().cloned().collect()))
            .collect()
    }

    /// Sorted account names under `source`.
    pub fn accounts(&self, source: &str) -> Result<Vec<String>> {
        Ok(self.account_map(source)?.keys().cloned().collect())
    }

    pub fn password(&self, source: &str, account: &str) -> Result<Zeroizing<String>> {
        self.account_map(source)?
            .get(account)
            .map(|password| Zeroizing::new(password.clone()))
            .ok_or_else(|| unknown_account(source, account))
    }

    /// Insert a new account, creating `source` if needed.
    pub fn add(&mut self, source: &str, account: &str, password: &str) -> Result<()> {
        validate_name("source", source)?;
        validate_name("account", account)?;

        let accounts = self.sources.entry(source.to_string()).or_default();
        if accounts.contains_key(account) {
            return Err(ShelterError::DuplicateAccount(
                source.to_string(),
                account.to_string(),
            ));
        }
        accounts.insert(account.to_string(), password.to_string());
        Ok(())
    }

    /// Replace the password of an existing account.
    pub fn change(&mut self, source: &str, account: &str, new_password: &str) -> Result<()> {
        let stored = self
            .sources
            .get_mut(source)
            .ok_or_else(|| ShelterError::UnknownSource(source.to_string()))?
            .get_mut(account)
            .ok_or_else(|| unknown_account(source, account))?;

        stored.zeroize();
        stored.push_str(new_password);
        Ok(())
    }

    /// Remove an account, and its source when it was the last one.
    pub fn remove(&mut self, source: &str, account: &str) -> Result<()> {
        let accounts = self
            .sources
            .get_mut(source)
            .ok_or_else(|| ShelterError::UnknownSource(source.to_string()))?;

        let mut removed = accounts
            .remove(account)
            .ok_or_else(|| unknown_account(source, account))?;
        removed.zeroize();

        if accounts.is_empty() {
            self.sources.remove(source);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    fn account_map(&self, source: &str) -> Result<&AccountMap> {
        self.sources
            .get(source)
            .ok_or_else(|| ShelterError::UnknownSource(source.to_string()))
    }
}

fn unknown_account(source: &str, account: &str) -> ShelterError {
    ShelterError::UnknownAccount(source.to_string(), account.to_string())
}

/// Maximum length of a source or account name in bytes.
const MAX_NAME_LEN: usize = 256;

/// Validate a source or account name.
///
/// Must be non-empty, at most 256 bytes, and free of whitespace.
pub fn validate_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ShelterError::InvalidName(format!("{kind} name cannot be empty")));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ShelterError::InvalidName(format!(
            "{kind} name cannot exceed {MAX_NAME_LEN} bytes"
        )));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(ShelterError::InvalidName(format!(
            "{kind} name '{name}' contains whitespace"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VaultDocument {
        let mut doc = VaultDocument::new();
        doc.add("gmail", "bob", "pw-bob").unwrap();
        doc.add("gmail", "alice", "pw-alice").unwrap();
        doc.add("bank", "me", "pw-me").unwrap();
        doc
    }

    #[test]
    fn empty_document_is_empty_object() {
        assert_eq!(VaultDocument::new().to_json().unwrap().as_str(), "{}");
    }

    #[test]
    fn json_shape_is_nested_objects() {
        let json = sample().to_json().unwrap();
        assert_eq!(
            json.as_str(),
            r#"{"bank":{"me":"pw-me"},"gmail":{"alice":"pw-alice","bob":"pw-bob"}}"#
        );
    }

    #[test]
    fn listings_are_sorted() {
        let doc = sample();
        assert_eq!(doc.sources(), vec!["bank", "gmail"]);
        assert_eq!(doc.accounts("gmail").unwrap(), vec!["alice", "bob"]);

        let all = doc.all_accounts();
        assert_eq!(all.keys().collect::<Vec<_>>(), vec!["bank", "gmail"]);
        assert_eq!(all["gmail"], vec!["alice", "bob"]);
    }

    #[test]
    fn parse_accepts_foreign_key_order() {
        let doc = VaultDocument::from_json(r#"{"z":{"b":"1","a":"2"},"a":{"x":"3"}}"#).unwrap();
        assert_eq!(doc.sources(), vec!["a", "z"]);
        assert_eq!(doc.accounts("z").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn parse_rejects_wrong_shape() {
        for bad in [
            "[]",
            r#"{"s":"flat"}"#,
            r#"{"s":{"a":1}}"#,
            r#"{"ghost":{}}"#,
            r#"{"s":{"a":"1"},"ghost":{}}"#,
            "not json",
        ] {
            assert!(
                matches!(VaultDocument::from_json(bad), Err(ShelterError::Corrupt(_))),
                "{bad} should be corrupt"
            );
        }
    }

    #[test]
    fn duplicate_account_is_rejected() {
        let mut doc = sample();
        assert!(matches!(
            doc.add("gmail", "alice", "other"),
            Err(ShelterError::DuplicateAccount(s, a)) if s == "gmail" && a == "alice"
        ));
        assert_eq!(doc.password("gmail", "alice").unwrap().as_str(), "pw-alice");
    }

    #[test]
    fn same_account_under_other_source_is_fine() {
        let mut doc = sample();
        doc.add("bank", "alice", "x").unwrap();
        assert_eq!(doc.accounts("bank").unwrap(), vec!["alice", "me"]);
    }

    #[test]
    fn change_requires_existing_entries() {
        let mut doc = sample();
        assert!(matches!(
            doc.change("nope", "alice", "x"),
            Err(ShelterError::UnknownSource(_))
        ));
        assert!(matches!(
            doc.change("gmail", "nope", "x"),
            Err(ShelterError::UnknownAccount(..))
        ));

        doc.change("gmail", "alice", "new").unwrap();
        assert_eq!(doc.password("gmail", "alice").unwrap().as_str(), "new");
    }

    #[test]
    fn removing_last_account_drops_source() {
        let mut doc = sample();
        doc.remove("bank", "me").unwrap();
        assert_eq!(doc.sources(), vec!["gmail"]);

        doc.remove("gmail", "alice").unwrap();
        assert_eq!(doc.sources(), vec!["gmail"]);
        doc.remove("gmail", "bob").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn remove_distinguishes_missing_source_and_account() {
        let mut doc = sample();
        assert!(matches!(
            doc.remove("nope", "alice"),
            Err(ShelterError::UnknownSource(_))
        ));
        assert!(matches!(
            doc.remove("gmail", "nope"),
            Err(ShelterError::UnknownAccount(..))
        ));
    }

    #[test]
    fn names_are_validated_on_add() {
        let mut doc = VaultDocument::new();
        assert!(doc.add("", "a", "p").is_err());
        assert!(doc.add("s", "", "p").is_err());
        assert!(doc.add("my bank", "a", "p").is_err());
        assert!(doc.add("s", "a\tb", "p").is_err());
        assert!(doc.add(&"x".repeat(257), "a", "p").is_err());
        assert!(doc.is_empty());
    }

    #[test]
    fn passwords_may_contain_anything() {
        let mut doc = VaultDocument::new();
        doc.add("s", "a", " spaced \"quoted\" ünïcode ").unwrap();
        let reparsed = VaultDocument::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(
            reparsed.password("s", "a").unwrap().as_str(),
            " spaced \"quoted\" ünïcode "
        );
    }
}
