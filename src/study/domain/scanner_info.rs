/// Recorded when the version report carries no `Version:` label
pub const UNKNOWN_SCANNER_VERSION: &str = "unknown";

/// Scanner version and vulnerability database freshness at scan time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerInfo {
    version: String,
    db_updated_at: Option<String>,
}

impl ScannerInfo {
    pub fn new(version: String, db_updated_at: Option<String>) -> Self {
        Self {
            version,
            db_updated_at,
        }
    }

    /// Extracts labelled fields from the scanner's version report.
    ///
    /// Whitespace is collapsed first so the layout of the report does not
    /// matter; `Version:` takes the first occurrence (the scanner itself,
    /// not the database) and `UpdatedAt:` runs until the next label.
    pub fn parse(report: &str) -> Self {
        let tokens: Vec<&str> = report.split_whitespace().collect();

        let version = value_after(&tokens, "Version:")
            .and_then(|value| value.first().copied())
            .map(|value| value.trim_start_matches('v').to_string())
            .unwrap_or_else(|| UNKNOWN_SCANNER_VERSION.to_string());

        let db_updated_at = value_after(&tokens, "UpdatedAt:").map(|value| value.join(" "));

        Self {
            version,
            db_updated_at,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn db_updated_at(&self) -> Option<&str> {
        self.db_updated_at.as_deref()
    }
}

/// Tokens following the first `label` up to the next `Label:` token.
fn value_after<'a>(tokens: &[&'a str], label: &str) -> Option<Vec<&'a str>> {
    let start = tokens.iter().position(|token| *token == label)? + 1;
    let value: Vec<&str> = tokens[start..]
        .iter()
        .take_while(|token| !is_label(token))
        .copied()
        .collect();

    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn is_label(token: &str) -> bool {
    token.len() > 1
        && token.ends_with(':')
        && token
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERSION_REPORT: &str = "Version: 0.50.1
Vulnerability DB:
  Version: 2
  UpdatedAt: 2024-04-10 12:11:00.449071093 +0000 UTC
  NextUpdate: 2024-04-10 18:11:00.449070793 +0000 UTC
  DownloadedAt: 2024-04-10 13:02:50.112443 +0000 UTC
";

    #[test]
    fn test_parse_full_report() {
        let info = ScannerInfo::parse(VERSION_REPORT);
        assert_eq!(info.version(), "0.50.1");
        assert_eq!(
            info.db_updated_at(),
            Some("2024-04-10 12:11:00.449071093 +0000 UTC")
        );
    }

    #[test]
    fn test_parse_irregular_whitespace() {
        let info = ScannerInfo::parse("Version:\t0.49.0\r\n\n   Vulnerability   DB:  UpdatedAt:   2024-03-01   06:00:00 +0000 UTC");
        assert_eq!(info.version(), "0.49.0");
        assert_eq!(info.db_updated_at(), Some("2024-03-01 06:00:00 +0000 UTC"));
    }

    #[test]
    fn test_parse_without_database_section() {
        let info = ScannerInfo::parse("Version: 0.50.1\n");
        assert_eq!(info.version(), "0.50.1");
        assert_eq!(info.db_updated_at(), None);
    }

    #[test]
    fn test_parse_empty_report() {
        let info = ScannerInfo::parse("");
        assert_eq!(info.version(), UNKNOWN_SCANNER_VERSION);
        assert_eq!(info.db_updated_at(), None);
    }

    #[test]
    fn test_parse_strips_v_prefix() {
        let info = ScannerInfo::parse("Version: v0.51.0");
        assert_eq!(info.version(), "0.51.0");
    }
}
