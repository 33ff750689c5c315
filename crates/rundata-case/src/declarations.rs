//! Scanner for the generated declarations file.
//!
//! The file is Go source, but only one block matters:
//!
//! ```text
//! func init() {
//! 	rundata.TestPlanID = "XX-1.1"
//! 	rundata.TestDescription = "Foo Functional Test"
//! 	rundata.TestUUID = "123e4567-e89b-42d3-8456-426614174000"
//! }
//! ```
//!
//! Lines are scanned between the opening marker and the first closing brace
//! at column zero; nothing else in the file is interpreted.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, ParseSource, Result};
use crate::quote::unquote;
use crate::record::{is_acceptable_uuid, Record};

/// Line that opens the initialization block.
pub const BLOCK_START: &str = "func init() {";
/// Line that closes the initialization block.
pub const BLOCK_END: &str = "}";

/// Assignment key for the plan id.
pub const KEY_PLAN_ID: &str = "TestPlanID";
/// Assignment key for the description.
pub const KEY_DESCRIPTION: &str = "TestDescription";
/// Assignment key for the uuid.
pub const KEY_UUID: &str = "TestUUID";

// `	rundata.TestUUID = "..."`
fn assignment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"^\s*rundata\.(\w+)\s*=\s*(".*")\s*$"#).expect("assignment pattern is valid")
    })
}

/// Parse the declarations file text.
///
/// `None` means the file does not exist, which yields `Ok(None)`. Unknown keys
/// are skipped; missing known keys leave the field empty. A uuid that is set
/// but cannot be read as a uuid in any form is an error.
pub fn parse_declarations(text: Option<&str>) -> Result<Option<Record>> {
    let Some(text) = text else {
        return Ok(None);
    };

    let mut lines = text.lines();
    if !lines.by_ref().any(|line| line.trim_end() == BLOCK_START) {
        return Err(Error::parse(
            ParseSource::Rundata,
            format!("missing init block (`{BLOCK_START}`)"),
        ));
    }

    let mut record = Record::default();
    for line in lines {
        if line.trim_end() == BLOCK_END {
            if !is_acceptable_uuid(&record.uuid) {
                return Err(Error::parse(
                    ParseSource::Rundata,
                    format!("rundata.{KEY_UUID} is not a uuid: {:?}", record.uuid),
                ));
            }
            return Ok(Some(record));
        }

        let Some(caps) = assignment_pattern().captures(line) else {
            continue;
        };

        let field = match &caps[1] {
            KEY_PLAN_ID => &mut record.plan_id,
            KEY_DESCRIPTION => &mut record.description,
            KEY_UUID => &mut record.uuid,
            _ => continue,
        };

        *field = unquote(&caps[2]).map_err(|e| {
            Error::parse(
                ParseSource::Rundata,
                format!("cannot parse rundata line: {line}: {e}"),
            )
        })?;
    }

    Err(Error::parse(
        ParseSource::Rundata,
        format!("`{BLOCK_START}` was not terminated"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUNDATA: &str = "// Code generated by go run tools/addrundata; DO NOT EDIT.
package foo_functional_test

import \"github.com/openconfig/featureprofiles/internal/rundata\"

func init() {
	rundata.TestPlanID = \"YY-1.1\"
	rundata.TestDescription = \"Description from code\"
	rundata.TestUUID = \"123e4567-e89b-42d3-8456-426614174000\"
}
";

    #[test]
    fn test_missing_file_is_absent() {
        assert_eq!(parse_declarations(None).unwrap(), None);
    }

    #[test]
    fn test_parse_generated_file() {
        let record = parse_declarations(Some(RUNDATA)).unwrap().unwrap();
        assert_eq!(
            record,
            Record::new(
                "YY-1.1",
                "Description from code",
                "123e4567-e89b-42d3-8456-426614174000"
            )
        );
    }

    #[test]
    fn test_unknown_keys_and_noise_ignored() {
        let text = "package x\n\nfunc init() {\n\t// comment\n\trundata.TestPlanID = \"A-1\"\n\trundata.TestFutureKey = \"whatever\"\n\tfoo()\n}\n";
        let record = parse_declarations(Some(text)).unwrap().unwrap();
        assert_eq!(record, Record::new("A-1", "", ""));
    }

    #[test]
    fn test_empty_block_is_empty_record() {
        let record = parse_declarations(Some("func init() {\n}\n")).unwrap().unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = RUNDATA.replace('\n', "\r\n");
        let record = parse_declarations(Some(&text)).unwrap().unwrap();
        assert_eq!(record.plan_id, "YY-1.1");
    }

    #[test]
    fn test_missing_block() {
        let err = parse_declarations(Some("~!@#$%^&*()_+")).unwrap_err();
        assert_eq!(err.parse_source(), Some(ParseSource::Rundata));
        assert!(err.to_string().contains("missing init block"));
    }

    #[test]
    fn test_unterminated_block() {
        let text = "func init() {\n\trundata.TestPlanID = \"A-1\"\n";
        let err = parse_declarations(Some(text)).unwrap_err();
        assert_eq!(err.parse_source(), Some(ParseSource::Rundata));
        assert!(err.to_string().contains("was not terminated"));
    }

    #[test]
    fn test_bad_quoting_is_error() {
        let text = "func init() {\n\trundata.TestPlanID = \"bad\\q\"\n}\n";
        let err = parse_declarations(Some(text)).unwrap_err();
        assert_eq!(err.parse_source(), Some(ParseSource::Rundata));
        assert!(err.to_string().contains("rundata.TestPlanID"));
    }

    #[test]
    fn test_unparseable_uuid_is_error() {
        let text = "func init() {\n\trundata.TestUUID = \"not-a-uuid\"\n}\n";
        let err = parse_declarations(Some(text)).unwrap_err();
        assert_eq!(err.parse_source(), Some(ParseSource::Rundata));
        assert!(err.to_string().contains("rundata.TestUUID is not a uuid: \"not-a-uuid\""));
    }

    #[test]
    fn test_non_canonical_uuid_kept_verbatim() {
        let text = "func init() {\n\trundata.TestUUID = \"{123E4567-E89B-42D3-8456-426614174000}\"\n}\n";
        let record = parse_declarations(Some(text)).unwrap().unwrap();
        assert_eq!(record.uuid, "{123E4567-E89B-42D3-8456-426614174000}");
    }

    #[test]
    fn test_bad_quoting_on_unknown_key_ignored() {
        let text = "func init() {\n\trundata.Other = \"bad\\q\"\n}\n";
        assert!(parse_declarations(Some(text)).unwrap().unwrap().is_empty());
    }
}
