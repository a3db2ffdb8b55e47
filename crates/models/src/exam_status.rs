use crate::macros::impl_text_value;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Review state of an exam session
///
/// ```text
/// draft ──► submitted ──► approved
///              ▲   │
///              │   ▼
///             rejected
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamStatus {
    /// Created by generation or direct insert, not yet sent for review
    #[default]
    Draft,
    /// Waiting for approval
    Submitted,
    Approved,
    /// Sent back with a comment; may be resubmitted
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("cannot move exam from {from} to {to}")]
    Illegal { from: ExamStatus, to: ExamStatus },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown exam status {0:?}")]
pub struct ParseExamStatusError(pub String);

impl ExamStatus {
    /// Every legal `(from, to)` move
    const TRANSITIONS: [(Self, Self); 4] = [
        (Self::Draft, Self::Submitted),
        (Self::Submitted, Self::Approved),
        (Self::Submitted, Self::Rejected),
        (Self::Rejected, Self::Submitted),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        Self::TRANSITIONS.contains(&(self, next))
    }

    /// Validates a move and returns the new state
    pub fn transition(self, next: Self) -> Result<Self, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError::Illegal {
                from: self,
                to: next,
            })
        }
    }

    pub fn is_terminal(self) -> bool {
        !Self::TRANSITIONS.iter().any(|&(from, _)| from == self)
    }
}

impl FromStr for ExamStatus {
    type Err = ParseExamStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Spanish names come from rows written before the English values
        match s.trim().to_lowercase().as_str() {
            "draft" | "borrador" => Ok(Self::Draft),
            "submitted" | "pendiente_aprobacion" => Ok(Self::Submitted),
            "approved" | "aprobado" => Ok(Self::Approved),
            "rejected" | "rechazado" => Ok(Self::Rejected),
            _ => Err(ParseExamStatusError(s.to_string())),
        }
    }
}

impl Display for ExamStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl_text_value!(ExamStatus);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        assert_eq!(
            ExamStatus::Draft.transition(ExamStatus::Submitted),
            Ok(ExamStatus::Submitted)
        );
        assert_eq!(
            ExamStatus::Submitted.transition(ExamStatus::Approved),
            Ok(ExamStatus::Approved)
        );
        assert_eq!(
            ExamStatus::Submitted.transition(ExamStatus::Rejected),
            Ok(ExamStatus::Rejected)
        );
        assert_eq!(
            ExamStatus::Rejected.transition(ExamStatus::Submitted),
            Ok(ExamStatus::Submitted)
        );
    }

    #[test]
    fn test_illegal_transitions() {
        let illegal = [
            (ExamStatus::Draft, ExamStatus::Approved),
            (ExamStatus::Draft, ExamStatus::Rejected),
            (ExamStatus::Draft, ExamStatus::Draft),
            (ExamStatus::Approved, ExamStatus::Submitted),
            (ExamStatus::Approved, ExamStatus::Draft),
            (ExamStatus::Rejected, ExamStatus::Approved),
            (ExamStatus::Submitted, ExamStatus::Draft),
        ];

        for (from, to) in illegal {
            assert_eq!(
                from.transition(to),
                Err(TransitionError::Illegal { from, to }),
                "{from} -> {to} should be rejected"
            );
        }
    }

    #[test]
    fn test_only_approved_is_terminal() {
        assert!(ExamStatus::Approved.is_terminal());
        assert!(!ExamStatus::Draft.is_terminal());
        assert!(!ExamStatus::Submitted.is_terminal());
        assert!(!ExamStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_status_from_str_accepts_legacy_names() {
        assert_eq!("Borrador".parse(), Ok(ExamStatus::Draft));
        assert_eq!("pendiente_aprobacion".parse(), Ok(ExamStatus::Submitted));
        assert_eq!(" APROBADO ".parse(), Ok(ExamStatus::Approved));
        assert_eq!("rechazado".parse(), Ok(ExamStatus::Rejected));
        assert_eq!("approved".parse(), Ok(ExamStatus::Approved));
        assert_eq!(
            "archivado".parse::<ExamStatus>(),
            Err(ParseExamStatusError("archivado".to_string()))
        );
    }

    #[test]
    fn test_status_serde_names() {
        assert_eq!(
            serde_json::to_string(&ExamStatus::Submitted).unwrap(),
            "\"submitted\""
        );
        let parsed: ExamStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(parsed, ExamStatus::Rejected);
        assert_eq!(ExamStatus::default(), ExamStatus::Draft);
    }
}
