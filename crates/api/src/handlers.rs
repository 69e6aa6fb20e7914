pub mod availability;
pub mod daily_override;
pub mod schedule_template;

use clinicdesk_core::errors::{TimeError, TimeResult};
use serde::Deserialize;

/// `?month=YYYY-MM` query shared by the override listing and availability
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: String,
}

/// Branch slugs are lowercase ASCII words joined by hyphens, e.g. `gangnam-2`
pub(crate) fn validate_branch_slug(slug: &str) -> TimeResult<()> {
    let well_formed = !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if well_formed {
        Ok(())
    } else {
        Err(TimeError::Validation(format!("Invalid branch slug: {:?}", slug)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("gangnam", true)]
    #[case("seoul-station-2", true)]
    #[case("", false)]
    #[case("Gangnam", false)]
    #[case("-gangnam", false)]
    #[case("gang nam", false)]
    fn test_validate_branch_slug(#[case] slug: &str, #[case] ok: bool) {
        assert_eq!(validate_branch_slug(slug).is_ok(), ok);
    }
}
