//! Table formatting helpers for CLI output.

use comfy_table::{ContentArrangement, Table};

a3s_forge_core::closed_enum! {
    /// Output format for listing commands.
    pub enum OutputFormat {
        Table => "table",
        Json => "json",
    }
}

/// Create a styled table with the given headers.
pub fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.load_preset(comfy_table::presets::NOTHING);
    table.set_header(headers);
    table
}

/// Shorten `s` to at most `max` characters, marking the cut with `...`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Render a value on one line, showing an escaped carriage return as `\r`.
///
/// Values never contain a line feed.
pub fn single_line(s: &str) -> String {
    s.replace('\r', "\\r")
}

/// Format a digest for display: algorithm prefix plus the first 12 hex chars.
pub fn short_digest(digest: &str) -> String {
    match digest.split_once(':') {
        Some((algo, hex)) => format!("{}:{}", algo, hex.chars().take(12).collect::<String>()),
        None => digest.chars().take(12).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_truncate_short() {
        assert_eq!(truncate("echo hi", 20), "echo hi");
    }

    #[test]
    fn test_truncate_long() {
        assert_eq!(truncate("apt-get install -y curl", 10), "apt-get...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("ééééé", 4), "é...");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("echo hi"), "echo hi");
        assert_eq!(single_line("a\rb"), "a\\rb");
    }

    #[test]
    fn test_single_line_escaped_carriage_return() {
        let def = a3s_forge_core::Definition::parse("FROM a\nRUN printf x\\\ry\n").unwrap();
        assert_eq!(single_line(def.commands()[1].value()), "printf x\\ry");
    }

    #[test]
    fn test_short_digest() {
        assert_eq!(
            short_digest("sha256:0123456789abcdef0123"),
            "sha256:0123456789ab"
        );
        assert_eq!(short_digest("abc"), "abc");
    }

    #[test]
    fn test_short_digest_multibyte() {
        assert_eq!(short_digest("ééééééééééééé"), "éééééééééééé");
        assert_eq!(short_digest("k:ééééééééééééé"), "k:éééééééééééé");
    }

    #[test]
    fn test_new_table_renders_headers() {
        let table = new_table(&["STEP", "KIND"]);
        let rendered = table.to_string();
        assert!(rendered.contains("STEP"));
        assert!(rendered.contains("KIND"));
    }
}
