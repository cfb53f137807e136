use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Cpf;
use crate::error::StorageError;

pub const ROLE_ATHLETE: &str = "Atleta";
pub const ROLE_ORGANIZER: &str = "Organizador";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Athlete {
    pub cpf: Cpf,
    pub name: String,
    pub email: String,
    /// As entered at registration, normally `DD/MM/YYYY`.
    pub birth_date: String,
    /// Raw registration label, parsed into `Gender` when a result is built.
    pub gender: String,
    pub pcd: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    pub cpf: Cpf,
    pub name: String,
    pub email: String,
}

/// Any registered account. Only athletes can have race results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role")]
pub enum User {
    Athlete(Athlete),
    Organizer(Organizer),
}

impl User {
    pub fn cpf(&self) -> &Cpf {
        match self {
            Self::Athlete(a) => &a.cpf,
            Self::Organizer(o) => &o.cpf,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Athlete(a) => &a.name,
            Self::Organizer(o) => &o.name,
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            Self::Athlete(_) => ROLE_ATHLETE,
            Self::Organizer(_) => ROLE_ORGANIZER,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct UserRow {
    pub cpf: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub pcd: bool,
}

impl TryFrom<UserRow> for User {
    type Error = StorageError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let cpf = Cpf::parse(&row.cpf)
            .map_err(|e| StorageError::InvalidData(format!("user {}: {}", row.cpf, e)))?;

        match row.role.as_str() {
            ROLE_ATHLETE => Ok(Self::Athlete(Athlete {
                cpf,
                name: row.name,
                email: row.email,
                birth_date: row.birth_date.unwrap_or_default(),
                gender: row.gender.unwrap_or_default(),
                pcd: row.pcd,
            })),
            ROLE_ORGANIZER => Ok(Self::Organizer(Organizer {
                cpf,
                name: row.name,
                email: row.email,
            })),
            other => Err(StorageError::InvalidData(format!(
                "user {} has unknown role '{}'",
                row.cpf, other
            ))),
        }
    }
}
