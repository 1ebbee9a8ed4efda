// Fixed message strings
// Everything a caller or an operator can see without the original error text

/// Messages returned to callers in place of the original error
pub mod public {
    pub const HEALTHCARE_DATA_ERROR: &str = "Healthcare data processing error";
    pub const SECURITY_VALIDATION_FAILED: &str = "Security validation failed";
    pub const COMPLIANCE_VALIDATION_FAILED: &str = "Compliance validation failed";
}

/// Generic messages written to the diagnostic sink for fully redacted categories
pub mod markers {
    pub const SECURITY_INCIDENT: &str = "Security incident detected";
    pub const COMPLIANCE_VIOLATION: &str = "Compliance violation detected";
}

/// Literal substrings that mark an API error message as sensitive.
/// Matching is case-sensitive.
pub mod sensitive {
    pub const PHI: &str = "PHI";
    pub const SENSITIVE: &str = "sensitive";

    pub const ALL: [&str; 2] = [PHI, SENSITIVE];
}

/// Context label recorded when the caller passes a blank one
pub const UNSPECIFIED_CONTEXT: &str = "unspecified";
