use crate::macros::impl_text_value;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Staff role attached to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    /// School registrar's office
    Registrar,
    /// Head of a single career; the user record names which one
    ProgramHead,
    Secretary,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role {0:?}")]
pub struct ParseRoleError(pub String);

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Registrar => "registrar",
            Self::ProgramHead => "program_head",
            Self::Secretary => "secretary",
        }
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "registrar" => Ok(Self::Registrar),
            "program_head" => Ok(Self::ProgramHead),
            "secretary" => Ok(Self::Secretary),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl_text_value!(Role);
