use validator::ValidateEmail;

use crate::{Error, Result};

/// Reject anything that is not a syntactically valid email address.
///
/// Every address placed in an outbound payload goes through here first.
/// The domain must be a dotted host name; single-label hosts and `[...]`
/// address literals are refused.
pub(crate) fn validate(email: &str) -> Result<()> {
    if email.to_owned().validate_email() && has_dotted_domain(email) {
        Ok(())
    } else {
        Err(Error::Validation(email.to_string()))
    }
}

fn has_dotted_domain(email: &str) -> bool {
    match email.rsplit_once('@') {
        Some((_, domain)) => domain.contains('.') && !domain.starts_with('['),
        None => false,
    }
}
