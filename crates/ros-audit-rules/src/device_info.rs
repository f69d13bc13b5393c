//! Device metadata from the export's comment header.

use std::sync::LazyLock;

use regex::Regex;
use ros_audit_core::{find_text, ConfigDocument, Finding, FindingKind, Rule, RuleKind, Severity};

macro_rules! header_regex {
    ($name:ident, $pattern:expr) => {
        #[allow(clippy::expect_used)]
        static $name: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new($pattern).expect(concat!(stringify!($name), " must compile"))
        });
    };
}

header_regex!(VERSION, r"# .* by RouterOS ([\d.]+)");
header_regex!(SOFTWARE_ID, r"# software id = (\S+)");
header_regex!(MODEL, r"# model = (\S+)");
header_regex!(SERIAL_NUMBER, r"# serial number = (\S+)");

/// Surfaces RouterOS version, software id, model and serial number.
///
/// Each field is looked up on its own; a field missing from the header is
/// simply not reported.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeviceInfo;

impl DeviceInfo {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn fields() -> [(&'static str, &'static LazyLock<Regex>); 4] {
        [
            ("RouterOS Version", &VERSION),
            ("Software ID", &SOFTWARE_ID),
            ("Model", &MODEL),
            ("Serial Number", &SERIAL_NUMBER),
        ]
    }
}

impl Rule for DeviceInfo {
    fn id(&self) -> &'static str {
        "device-info"
    }

    fn code(&self) -> &'static str {
        "RA001"
    }

    fn section(&self) -> &'static str {
        "Device Information"
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Informational
    }

    fn description(&self) -> &'static str {
        "RouterOS version, software id, model and serial number"
    }

    fn evaluate(&self, doc: &ConfigDocument) -> Vec<Finding> {
        Self::fields()
            .into_iter()
            .filter_map(|(label, regex)| {
                let found = find_text(doc, regex)?;
                let value = found.group(1)?;
                Some(
                    Finding::new(
                        self.code(),
                        self.id(),
                        self.section(),
                        Severity::Info,
                        format!("{label}: {value}"),
                    )
                    .with_kind(FindingKind::Metadata)
                    .with_entity(value)
                    .at_line(found.line()),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_all_header_fields() {
        let doc = ConfigDocument::new(
            "# 2024-01-10 12:00:00 by RouterOS 7.13.2\n\
             # software id = ABCD-1234\n\
             #\n\
             # model = RB4011iGS+\n\
             # serial number = HD0123456\n\
             /system identity\nset name=r1\n",
        );
        let findings = DeviceInfo::new().evaluate(&doc);
        let messages: Vec<&str> = findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "RouterOS Version: 7.13.2",
                "Software ID: ABCD-1234",
                "Model: RB4011iGS+",
                "Serial Number: HD0123456",
            ]
        );
        assert!(findings
            .iter()
            .all(|f| f.severity == Severity::Info && f.kind == FindingKind::Metadata));
        assert_eq!(findings[2].entity.as_deref(), Some("RB4011iGS+"));
        assert_eq!(findings[3].line, Some(5));
    }

    #[test]
    fn missing_fields_are_skipped() {
        let doc = ConfigDocument::new("# model = CHR\n/ip dns\nset servers=1.1.1.1\n");
        let findings = DeviceInfo::new().evaluate(&doc);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "Model: CHR");
    }

    #[test]
    fn no_header_produces_nothing() {
        assert!(DeviceInfo::new().evaluate(&ConfigDocument::new("/ip dns\n")).is_empty());
    }
}
