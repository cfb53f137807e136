use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Gender as recorded at registration. Ranking is computed per gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    Masculino,
    Feminino,
    Outro,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Masculino, Gender::Feminino, Gender::Outro];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Masculino => "Masculino",
            Self::Feminino => "Feminino",
            Self::Outro => "Outro",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "masculino" | "m" => Ok(Self::Masculino),
            "feminino" | "f" => Ok(Self::Feminino),
            "outro" => Ok(Self::Outro),
            other => Err(format!("unknown gender '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_registration_labels() {
        assert_eq!("Masculino".parse::<Gender>(), Ok(Gender::Masculino));
        assert_eq!(" feminino ".parse::<Gender>(), Ok(Gender::Feminino));
        assert_eq!("Outro".parse::<Gender>(), Ok(Gender::Outro));
        assert_eq!("F".parse::<Gender>(), Ok(Gender::Feminino));
    }

    #[test]
    fn test_rejects_unknown_label() {
        assert!("".parse::<Gender>().is_err());
        assert!("X".parse::<Gender>().is_err());
    }
}
