use base64::{engine::general_purpose, Engine as _};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use sha2::{Digest, Sha256};

/// Kinds of PII the redactor recognizes out of the box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PiiKind {
    Email,
    Ssn,
    CreditCard,
    Phone,
    IpAddress,
    MedicalRecordNumber,
}

impl PiiKind {
    pub const ALL: [PiiKind; 6] = [
        PiiKind::Email,
        PiiKind::Ssn,
        PiiKind::CreditCard,
        PiiKind::Phone,
        PiiKind::IpAddress,
        PiiKind::MedicalRecordNumber,
    ];

    /// Tag used for correlation hashes, e.g. `SSN[...]`
    pub fn tag(self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::Ssn => "SSN",
            Self::CreditCard => "CC",
            Self::Phone => "PHONE",
            Self::IpAddress => "IP",
            Self::MedicalRecordNumber => "MRN",
        }
    }

    /// Fixed replacement used when hashing is off
    pub fn mask(self) -> &'static str {
        match self {
            Self::Email => "***@***",
            Self::Ssn => "***-**-****",
            Self::CreditCard => "****-****-****-****",
            Self::Phone => "(***) ***-****",
            Self::IpAddress => "***.***.***.***",
            Self::MedicalRecordNumber => "MRN******",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            Self::Email => r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
            Self::Ssn => r"\b\d{3}-\d{2}-\d{4}\b",
            Self::CreditCard => r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}\b",
            Self::Phone => r"(?:\+1[-.\s]?)?(?:\(\d{3}\)|\b\d{3})[-.\s]?\d{3}[-.\s]?\d{4}\b",
            Self::IpAddress => r"\b(?:\d{1,3}\.){3}\d{1,3}\b",
            Self::MedicalRecordNumber => r"\bMRN\d+\b",
        }
    }
}

lazy_static! {
    // Order matters: card numbers and SSNs are scrubbed before the looser phone pattern runs
    static ref BUILTIN_PATTERNS: Vec<(PiiKind, Regex)> = PiiKind::ALL
        .iter()
        .filter_map(|kind| Regex::new(kind.pattern()).ok().map(|regex| (*kind, regex)))
        .collect();
}

/// PII redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub kinds: Vec<PiiKind>,
    /// Replace matches with a short hash so equal values stay correlatable
    pub hash_for_correlation: bool,
    pub custom_patterns: Vec<(Regex, String)>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            kinds: PiiKind::ALL.to_vec(),
            hash_for_correlation: true,
            custom_patterns: Vec::new(),
        }
    }
}

impl RedactionConfig {
    pub fn with_hashing(mut self, enabled: bool) -> Self {
        self.hash_for_correlation = enabled;
        self
    }

    pub fn without(mut self, kind: PiiKind) -> Self {
        self.kinds.retain(|k| *k != kind);
        self
    }

    pub fn with_custom_pattern(
        mut self,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> crate::error::Result<Self> {
        self.custom_patterns.push((Regex::new(pattern)?, replacement.into()));
        Ok(self)
    }
}

/// PII redactor for log messages
#[derive(Debug, Clone, Default)]
pub struct PiiRedactor {
    config: RedactionConfig,
}

impl PiiRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();

        for (kind, regex) in BUILTIN_PATTERNS.iter() {
            if !self.config.kinds.contains(kind) {
                continue;
            }
            result = regex
                .replace_all(&result, |caps: &Captures| self.replacement(*kind, &caps[0]))
                .into_owned();
        }

        for (pattern, replacement) in &self.config.custom_patterns {
            result = pattern.replace_all(&result, replacement.as_str()).into_owned();
        }

        result
    }

    fn replacement(&self, kind: PiiKind, value: &str) -> String {
        if self.config.hash_for_correlation {
            format!("{}[{}]", kind.tag(), correlation_hash(value))
        } else {
            kind.mask().to_string()
        }
    }
}

/// First 8 bytes of the SHA-256 digest, base64 encoded
fn correlation_hash(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    general_purpose::STANDARD.encode(digest.get(..8).unwrap_or_default())
}
