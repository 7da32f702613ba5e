//! The five Forgefile instruction kinds and the tokens that select them.

use crate::enumeration::ClosedEnum;

crate::closed_enum! {
    /// Kind of a Forgefile instruction.
    pub enum CommandType {
        /// `FROM <image>`: base image the build starts from
        Origin => "ORIGIN",
        /// `RUN <command>` / `EXEC <command>`: run inside the guest
        Run => "RUN",
        /// `COPY <args>`: stage files into the guest
        Copy => "COPY",
        /// `WORKDIR <path>`: working directory of later steps and the image
        Workdir => "WORKDIR",
        /// `ENTRYPOINT <command>` / `CMD <command>`: boot command of the image
        Entrypoint => "ENTRYPOINT",
    }
}

impl CommandType {
    /// Tokens that select this kind. Matching is exact and case-sensitive.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            CommandType::Origin => &["FROM"],
            CommandType::Run => &["RUN", "EXEC"],
            CommandType::Copy => &["COPY"],
            CommandType::Workdir => &["WORKDIR"],
            CommandType::Entrypoint => &["ENTRYPOINT", "CMD"],
        }
    }

    /// Canonical token used when echoing a step back to the user.
    pub fn keyword(self) -> &'static str {
        self.aliases()[0]
    }

    /// Resolve a token to its command type.
    ///
    /// The first kind (in ordinal order) listing `token` among its aliases
    /// wins. No trimming or case folding is applied.
    pub fn resolve_token(token: &str) -> Option<CommandType> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.aliases().contains(&token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumeration::verify_table;

    #[test]
    fn test_table_is_consistent() {
        verify_table::<CommandType>().unwrap();
        assert_eq!(CommandType::all().len(), 5);
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(CommandType::Origin.ordinal(), 0);
        assert_eq!(CommandType::Run.ordinal(), 1);
        assert_eq!(CommandType::Copy.ordinal(), 2);
        assert_eq!(CommandType::Workdir.ordinal(), 3);
        assert_eq!(CommandType::Entrypoint.ordinal(), 4);
    }

    #[test]
    fn test_symbolic_names() {
        assert_eq!(CommandType::Origin.name(), "ORIGIN");
        assert_eq!(CommandType::from_name("ENTRYPOINT"), Some(CommandType::Entrypoint));
        // Names are not tokens
        assert_eq!(CommandType::from_name("FROM"), None);
    }

    #[test]
    fn test_resolve_primary_tokens() {
        assert_eq!(CommandType::resolve_token("FROM"), Some(CommandType::Origin));
        assert_eq!(CommandType::resolve_token("RUN"), Some(CommandType::Run));
        assert_eq!(CommandType::resolve_token("COPY"), Some(CommandType::Copy));
        assert_eq!(CommandType::resolve_token("WORKDIR"), Some(CommandType::Workdir));
        assert_eq!(
            CommandType::resolve_token("ENTRYPOINT"),
            Some(CommandType::Entrypoint)
        );
    }

    #[test]
    fn test_resolve_alias_tokens() {
        assert_eq!(CommandType::resolve_token("EXEC"), Some(CommandType::Run));
        assert_eq!(CommandType::resolve_token("CMD"), Some(CommandType::Entrypoint));
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        assert_eq!(CommandType::resolve_token("from"), None);
        assert_eq!(CommandType::resolve_token("Run"), None);
    }

    #[test]
    fn test_resolve_does_not_trim() {
        assert_eq!(CommandType::resolve_token(" FROM"), None);
        assert_eq!(CommandType::resolve_token("FROM "), None);
        assert_eq!(CommandType::resolve_token(""), None);
    }

    #[test]
    fn test_unsupported_dockerfile_instructions_do_not_resolve() {
        for token in ["ENV", "ADD", "ARG", "LABEL", "USER", "EXPOSE"] {
            assert_eq!(CommandType::resolve_token(token), None, "{token}");
        }
    }

    #[test]
    fn test_keyword() {
        assert_eq!(CommandType::Origin.keyword(), "FROM");
        assert_eq!(CommandType::Entrypoint.keyword(), "ENTRYPOINT");
    }

    #[test]
    fn test_every_kind_has_aliases() {
        for kind in CommandType::all() {
            assert!(!kind.aliases().is_empty(), "{kind}");
        }
    }
}
