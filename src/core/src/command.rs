//! A single resolved Forgefile instruction.

use serde::Serialize;

use crate::command_type::CommandType;
use crate::enumeration::ClosedEnum;

/// One instruction of a Forgefile: its kind, its trimmed argument and a
/// fingerprint derived from both.
///
/// Commands are only produced by [`Definition::parse`](crate::Definition::parse)
/// and never change after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    kind: CommandType,
    value: String,
    fingerprint: i32,
    line: usize,
}

impl Command {
    /// `value` must already be trimmed and non-empty.
    pub(crate) fn new(kind: CommandType, value: String, line: usize) -> Self {
        debug_assert!(!value.is_empty() && value.trim() == value);
        let fingerprint = fingerprint(kind, &value);
        Self {
            kind,
            value,
            fingerprint,
            line,
        }
    }

    /// Instruction kind.
    pub fn kind(&self) -> CommandType {
        self.kind
    }

    /// Trimmed argument text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Content fingerprint of `(kind, value)`.
    pub fn fingerprint(&self) -> i32 {
        self.fingerprint
    }

    /// 1-based line of the command token in the source document.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind.keyword(), self.value)
    }
}

/// Fingerprint of a `(kind, value)` pair.
///
/// Seeds with the kind's ordinal, then folds every UTF-16 code unit of
/// `value` into `h * 31 + unit`, written as `(h << 5) - h` with two's
/// complement wraparound at 32 bits. Not a cryptographic hash.
pub fn fingerprint(kind: CommandType, value: &str) -> i32 {
    let mut h = kind.ordinal() as i32;
    h = (h << 5).wrapping_sub(h);
    for unit in value.encode_utf16() {
        h = (h << 5).wrapping_sub(h).wrapping_add(i32::from(unit));
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_known_values() {
        assert_eq!(fingerprint(CommandType::Origin, "a"), 97);
        assert_eq!(fingerprint(CommandType::Run, "echo hi"), 569777117);
        assert_eq!(fingerprint(CommandType::Copy, "x y"), 1963475);
        assert_eq!(fingerprint(CommandType::Entrypoint, "/sbin/init"), -937526088);
    }

    #[test]
    fn test_fingerprint_wraps_around() {
        assert_eq!(
            fingerprint(CommandType::Origin, "ubuntu:20.04"),
            -2084109983
        );
        assert_eq!(
            fingerprint(
                CommandType::Run,
                "apt-get update && apt-get install -y curl"
            ),
            1739961103
        );
    }

    #[test]
    fn test_fingerprint_uses_utf16_code_units() {
        // U+00E9 is one unit, U+1F600 is a surrogate pair
        assert_eq!(fingerprint(CommandType::Workdir, "\u{e9}"), 3116);
        assert_eq!(fingerprint(CommandType::Workdir, "\u{1F600}"), 1862272);
    }

    #[test]
    fn test_fingerprint_depends_on_kind() {
        assert_ne!(
            fingerprint(CommandType::Run, "make"),
            fingerprint(CommandType::Entrypoint, "make")
        );
    }

    #[test]
    fn test_fingerprint_one_char_change() {
        assert_ne!(
            fingerprint(CommandType::Run, "echo hi"),
            fingerprint(CommandType::Run, "echo ho")
        );
    }

    #[test]
    fn test_command_accessors() {
        let cmd = Command::new(CommandType::Run, "echo hi".to_string(), 2);
        assert_eq!(cmd.kind(), CommandType::Run);
        assert_eq!(cmd.value(), "echo hi");
        assert_eq!(cmd.fingerprint(), 569777117);
        assert_eq!(cmd.line(), 2);
    }

    #[test]
    fn test_command_display() {
        let cmd = Command::new(CommandType::Entrypoint, "/sbin/init".to_string(), 9);
        assert_eq!(cmd.to_string(), "ENTRYPOINT /sbin/init");
    }

    #[test]
    fn test_command_serialize() {
        let cmd = Command::new(CommandType::Origin, "a".to_string(), 1);
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["kind"], "ORIGIN");
        assert_eq!(json["value"], "a");
        assert_eq!(json["fingerprint"], 97);
        assert_eq!(json["line"], 1);
    }
}
