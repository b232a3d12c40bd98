//! Field tag parsing.
//!
//! A tag is a comma-separated string attached to a model field, e.g.
//! `"user_id,primary"`. The first token is the column name; the literal
//! token `primary` anywhere in the remainder marks the field as the table's
//! primary key. No other tokens are recognized.

/// Parsed view of one field tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnTag {
    /// Column name: the first tag token, verbatim (possibly empty)
    pub column: String,
    /// Whether the remainder contains the `primary` marker
    pub primary: bool,
}

impl ColumnTag {
    /// Parse a tag string.
    ///
    /// Tokens are split on `,` with no trimming and no escaping; a token
    /// containing stray whitespace is preserved verbatim, so `" primary"`
    /// is not a primary-key marker. A `primary` in the first position is a
    /// column named "primary", not a marker.
    pub fn parse(tag: &str) -> Self {
        let mut tokens = tag.split(',');
        let column = tokens.next().unwrap_or("").to_string();
        let primary = tokens.any(|t| t == "primary");
        Self { column, primary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_and_primary_marker() {
        let tag = ColumnTag::parse("user_id,primary");
        assert_eq!(tag.column, "user_id");
        assert!(tag.primary);
    }

    #[test]
    fn plain_column() {
        let tag = ColumnTag::parse("x");
        assert_eq!(tag.column, "x");
        assert!(!tag.primary);
    }

    #[test]
    fn primary_in_first_position_is_a_column_name() {
        let tag = ColumnTag::parse("primary");
        assert_eq!(tag.column, "primary");
        assert!(!tag.primary);
    }

    #[test]
    fn no_whitespace_trimming() {
        let tag = ColumnTag::parse(" email , primary");
        assert_eq!(tag.column, " email ");
        assert!(!tag.primary, "' primary' with a space is not a marker");
    }

    #[test]
    fn empty_tag_yields_empty_column() {
        let tag = ColumnTag::parse("");
        assert_eq!(tag.column, "");
        assert!(!tag.primary);
    }

    #[test]
    fn marker_anywhere_in_remainder() {
        let tag = ColumnTag::parse("id,json,primary");
        assert_eq!(tag.column, "id");
        assert!(tag.primary);
    }
}
