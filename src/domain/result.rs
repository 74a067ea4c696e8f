//! Result type alias for pii-xref

use super::errors::XrefError;

/// Result type alias for pii-xref operations
///
/// # Examples
///
/// ```
/// use pii_xref::domain::result::Result;
/// use pii_xref::domain::errors::XrefError;
///
/// fn failing_function() -> Result<()> {
///     Err(XrefError::MissingField("text"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, XrefError>;
