//! Answer trustworthiness derived from the fallback flag and citation count.

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Display for ConfidenceLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfidenceResult {
    pub level: ConfidenceLevel,
    /// 0 to 100.
    pub score: u8,
    pub label: &'static str,
}

impl ConfidenceResult {
    const fn new(level: ConfidenceLevel, score: u8, label: &'static str) -> Self {
        Self {
            level,
            score,
            label,
        }
    }
}

pub const NO_MATCH: ConfidenceResult =
    ConfidenceResult::new(ConfidenceLevel::Low, 0, "No match found");
pub const HIGH_CONFIDENCE: ConfidenceResult =
    ConfidenceResult::new(ConfidenceLevel::High, 85, "High confidence");
pub const MEDIUM_CONFIDENCE: ConfidenceResult =
    ConfidenceResult::new(ConfidenceLevel::Medium, 60, "Medium confidence");
pub const LOW_CONFIDENCE: ConfidenceResult =
    ConfidenceResult::new(ConfidenceLevel::Low, 30, "Low confidence");

const HIGH_SOURCE_COUNT: usize = 3;

#[derive(Debug, Default, Clone, Copy)]
pub struct ConfidenceClassifier;

impl ConfidenceClassifier {
    /// First matching rule wins: fallback, then three or more sources, then at least one.
    pub fn classify(is_fallback: bool, source_count: usize) -> ConfidenceResult {
        if is_fallback {
            return NO_MATCH;
        }

        match source_count {
            n if n >= HIGH_SOURCE_COUNT => HIGH_CONFIDENCE,
            0 => LOW_CONFIDENCE,
            _ => MEDIUM_CONFIDENCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_always_no_match() {
        for count in [0, 1, 2, 3, 50] {
            let result = ConfidenceClassifier::classify(true, count);
            assert_eq!(result.level, ConfidenceLevel::Low);
            assert_eq!(result.score, 0);
            assert_eq!(result.label, "No match found");
        }
    }

    #[test]
    fn source_count_thresholds() {
        assert_eq!(ConfidenceClassifier::classify(false, 0), LOW_CONFIDENCE);
        assert_eq!(ConfidenceClassifier::classify(false, 1), MEDIUM_CONFIDENCE);
        assert_eq!(ConfidenceClassifier::classify(false, 2), MEDIUM_CONFIDENCE);
        assert_eq!(ConfidenceClassifier::classify(false, 3), HIGH_CONFIDENCE);
        assert_eq!(ConfidenceClassifier::classify(false, 7).score, 85);
    }

    #[test]
    fn level_renders_lowercase() {
        assert_eq!(ConfidenceLevel::Medium.to_string(), "medium");
    }
}
