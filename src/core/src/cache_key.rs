//! Step cache keys.
//!
//! Each step of a definition gets a content-addressed key chained from the
//! key of the step before it, so editing one command changes its key and the
//! key of every later step while earlier keys stay reusable.

use sha2::{Digest, Sha256};

use crate::command::Command;
use crate::definition::Definition;
use crate::enumeration::ClosedEnum;

/// Key of the state after applying `command` on top of `parent`.
pub fn step_key(parent: Option<&str>, command: &Command) -> String {
    let mut hasher = Sha256::new();
    if let Some(parent) = parent {
        hasher.update(parent.as_bytes());
    }
    hasher.update([0u8]);
    hasher.update(command.kind().name().as_bytes());
    hasher.update(command.fingerprint().to_be_bytes());
    hasher.update(command.value().as_bytes());
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

/// Filesystem-safe name for a cache key (`sha256:ab..` → `sha256_ab..`).
pub fn key_to_dirname(key: &str) -> String {
    key.replace(':', "_")
}

/// Keys for every step of the definition, in document order.
pub fn step_keys(definition: &Definition) -> Vec<String> {
    let mut keys: Vec<String> = Vec::with_capacity(definition.len());
    for command in definition {
        let key = step_key(keys.last().map(String::as_str), command);
        keys.push(key);
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_per_step() {
        let def = Definition::parse("FROM a\nRUN b\nRUN c\n").unwrap();
        let keys = step_keys(&def);
        assert_eq!(keys.len(), 3);
        for key in &keys {
            assert!(key.starts_with("sha256:"));
            assert_eq!(key.len(), "sha256:".len() + 64);
        }
    }

    #[test]
    fn test_keys_are_deterministic() {
        let a = Definition::parse("FROM a\nRUN b\n").unwrap();
        let b = Definition::parse("# same thing\nFROM   a\nRUN b   # trailing\n").unwrap();
        assert_eq!(step_keys(&a), step_keys(&b));
    }

    #[test]
    fn test_edit_invalidates_downstream_only() {
        let before = step_keys(&Definition::parse("FROM a\nRUN b\nRUN c\nRUN d\n").unwrap());
        let after = step_keys(&Definition::parse("FROM a\nRUN b\nRUN x\nRUN d\n").unwrap());
        assert_eq!(before[0], after[0]);
        assert_eq!(before[1], after[1]);
        assert_ne!(before[2], after[2]);
        assert_ne!(before[3], after[3]);
    }

    #[test]
    fn test_alias_does_not_change_key() {
        let run = step_keys(&Definition::parse("FROM a\nRUN b\n").unwrap());
        let exec = step_keys(&Definition::parse("FROM a\nEXEC b\n").unwrap());
        assert_eq!(run, exec);
    }

    #[test]
    fn test_key_to_dirname() {
        let def = Definition::parse("FROM a\n").unwrap();
        let key = step_keys(&def).remove(0);
        let dirname = key_to_dirname(&key);
        assert!(dirname.starts_with("sha256_"));
        assert!(!dirname.contains(':'));
    }

    #[test]
    fn test_empty_definition() {
        assert!(step_keys(&Definition::default()).is_empty());
    }
}
