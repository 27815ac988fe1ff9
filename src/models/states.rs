//! US state code and name tables
//!
//! The code table covers the states present in the historical feed:
//! Alaska and Hawaii are not part of it, so their codes expand to nothing.

use std::collections::HashMap;
use std::sync::LazyLock;

const STATE_CODES: [(&str, &str); 48] = [
    ("AL", "Alabama"),
    ("AR", "Arkansas"),
    ("AZ", "Arizona"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("IA", "Iowa"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("MA", "Massachusetts"),
    ("MD", "Maryland"),
    ("ME", "Maine"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MO", "Missouri"),
    ("MS", "Mississippi"),
    ("MT", "Montana"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("NE", "Nebraska"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NV", "Nevada"),
    ("NY", "New York"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VA", "Virginia"),
    ("VT", "Vermont"),
    ("WA", "Washington"),
    ("WI", "Wisconsin"),
    ("WV", "West Virginia"),
    ("WY", "Wyoming"),
];

/// The fifty states offered by the state selector
pub const STATE_NAMES: [&str; 50] = [
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
];

static CODE_TO_NAME: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| STATE_CODES.into_iter().collect());

static NAME_TO_CODE: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    STATE_CODES
        .into_iter()
        .map(|(code, name)| (name.to_lowercase(), code))
        .collect()
});

/// Expand a postal code; `None` for codes outside the table
#[must_use]
pub fn state_name(code: &str) -> Option<&'static str> {
    CODE_TO_NAME.get(code.trim().to_uppercase().as_str()).copied()
}

/// Resolve either a postal code or a full state name, case-insensitively, to its code
#[must_use]
pub fn resolve_state_code(state: &str) -> Option<&'static str> {
    let state = state.trim();
    CODE_TO_NAME
        .get_key_value(state.to_uppercase().as_str())
        .map(|(code, _)| *code)
        .or_else(|| NAME_TO_CODE.get(&state.to_lowercase()).copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_name_lookup() {
        assert_eq!(state_name("CA"), Some("California"));
        assert_eq!(state_name("ny"), Some("New York"));
        assert_eq!(state_name("AK"), None);
        assert_eq!(state_name("HI"), None);
    }

    #[test]
    fn test_resolve_code_from_name_or_code() {
        assert_eq!(resolve_state_code("California"), Some("CA"));
        assert_eq!(resolve_state_code("north carolina"), Some("NC"));
        assert_eq!(resolve_state_code("tx"), Some("TX"));
        assert_eq!(resolve_state_code("Alaska"), None);
        assert_eq!(resolve_state_code("Atlantis"), None);
    }

    #[test]
    fn test_tables_are_consistent() {
        assert_eq!(CODE_TO_NAME.len(), 48);
        for (_, name) in STATE_CODES {
            assert!(STATE_NAMES.contains(&name), "{name} missing from selector list");
        }
    }
}
