//! Column alias tables for the two input tables
//!
//! Each logical field lists the source headers it may arrive under, in
//! priority order. The first alias holding a present value wins.

use crate::error::NormalizationError;
use crate::input::table::{CellValue, RawRow};

#[derive(Debug, Clone, Copy)]
pub struct FieldAliases {
    pub field: &'static str,
    pub columns: &'static [&'static str],
}

pub mod requirement {
    use super::FieldAliases;

    pub const COMPANY_NAME: FieldAliases = FieldAliases {
        field: "company_name",
        columns: &["Company Name", "Name of the Company"],
    };

    pub const ROLE: FieldAliases = FieldAliases {
        field: "role",
        columns: &[
            "Role",
            "Job Roles (Junior Analyst, Software Engineering Trainee, Graduate Engineering Trainee etc.). Incase of multiple roles, please add it in the single line separated with comma.  ",
        ],
    };

    pub const REQUIRED_SKILLS: FieldAliases = FieldAliases {
        field: "required_skills",
        columns: &[
            "Required Skills",
            "Please mention if you are looking for any specific skill sets, please add it in the single line separated with comma.  ",
        ],
    };

    pub const ELIGIBLE_DEGREES: FieldAliases = FieldAliases {
        field: "eligible_degrees",
        columns: &[
            "Eligible Degrees",
            "Could you please mention the education qualification of candidates you are looking for",
        ],
    };

    pub const COUNTRY: FieldAliases = FieldAliases {
        field: "country",
        columns: &["Country", "Company/Organization country", " Country"],
    };

    pub const REQUIREMENT_COUNT: FieldAliases = FieldAliases {
        field: "requirement_count",
        columns: &["Requirement Count", "No of Total Openings"],
    };
}

pub mod candidate {
    use super::FieldAliases;

    pub const NAME: FieldAliases = FieldAliases {
        field: "name",
        columns: &["Name", "Full Name"],
    };

    pub const COUNTRY: FieldAliases = FieldAliases {
        field: "country",
        columns: &["Country", " Country"],
    };

    /// Already synthesized "<qualification> in <field>" text
    pub const DEGREE: FieldAliases = FieldAliases {
        field: "degree",
        columns: &["Degree"],
    };

    pub const QUALIFICATION: FieldAliases = FieldAliases {
        field: "qualification",
        columns: &["Highest academic qualification", "Qualification"],
    };

    pub const FIELD_OF_STUDY: FieldAliases = FieldAliases {
        field: "field_of_study",
        columns: &[
            "Field of Study (Specialization /Department)\nPlease mention your UG and PG study details",
            "Field of Study",
        ],
    };

    pub const SKILLS: FieldAliases = FieldAliases {
        field: "skills",
        columns: &["Skills", "Please mention your technical skills", "Technical Skills"],
    };

    pub const RESUME_REFERENCE: FieldAliases = FieldAliases {
        field: "resume_reference",
        columns: &["Resume Link", "Please upload your recent resume"],
    };
}

/// Resolve a field from a row: exact header matches first, then a loose pass
/// comparing trimmed, case-folded headers with collapsed whitespace.
pub fn lookup<'r>(row: &'r RawRow, aliases: &FieldAliases) -> Result<Option<&'r CellValue>, NormalizationError> {
    let exact = aliases
        .columns
        .iter()
        .filter_map(|column| row.get(column).map(|value| (column.to_string(), value)))
        .find(|(_, value)| !value.is_absent());

    let hit = match exact {
        Some(hit) => Some(hit),
        None => lookup_loose(row, aliases),
    };

    match hit {
        Some((column, CellValue::Nested(kind))) => Err(NormalizationError::MalformedCell {
            column,
            kind: kind.clone(),
        }),
        Some((_, value)) => Ok(Some(value)),
        None => Ok(None),
    }
}

fn lookup_loose<'r>(row: &'r RawRow, aliases: &FieldAliases) -> Option<(String, &'r CellValue)> {
    aliases.columns.iter().find_map(|alias| {
        let wanted = canonical_header(alias);
        row.columns()
            .filter(|(column, value)| !value.is_absent() && canonical_header(column) == wanted)
            // Deterministic pick when several headers fold to the same key
            .min_by(|a, b| a.0.cmp(b.0))
            .map(|(column, value)| (column.clone(), value))
    })
}

fn canonical_header(header: &str) -> String {
    header.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_present_alias_wins() {
        let row = RawRow::new(0).with(" Country", "Canada").with("Country", "USA");
        let value = lookup(&row, &candidate::COUNTRY).unwrap();
        assert_eq!(value, Some(&CellValue::from("USA")));
    }

    #[test]
    fn test_blank_alias_falls_through() {
        let row = RawRow::new(0).with("Country", "  ").with(" Country", "Canada");
        let value = lookup(&row, &candidate::COUNTRY).unwrap();
        assert_eq!(value, Some(&CellValue::from("Canada")));
    }

    #[test]
    fn test_loose_header_match() {
        let row = RawRow::new(0).with("  required   SKILLS ", "Rust");
        let value = lookup(&row, &requirement::REQUIRED_SKILLS).unwrap();
        assert_eq!(value, Some(&CellValue::from("Rust")));
    }

    #[test]
    fn test_long_header_with_newline() {
        let row = RawRow::new(0).with(
            "Field of Study (Specialization /Department)\nPlease mention your UG and PG study details",
            "Computer Science",
        );
        let value = lookup(&row, &candidate::FIELD_OF_STUDY).unwrap();
        assert_eq!(value, Some(&CellValue::from("Computer Science")));
    }

    #[test]
    fn test_missing_field() {
        let row = RawRow::new(0).with("Unrelated", "x");
        assert_eq!(lookup(&row, &candidate::NAME).unwrap(), None);
    }

    #[test]
    fn test_nested_value_is_malformed() {
        let mut row = RawRow::new(0);
        row.insert("Skills", CellValue::Nested("array".to_string()));
        let err = lookup(&row, &candidate::SKILLS).unwrap_err();
        assert!(matches!(err, NormalizationError::MalformedCell { ref column, .. } if column == "Skills"));
    }
}
