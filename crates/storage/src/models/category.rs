use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Dates are kept as entered at registration (`DD/MM/YYYY`). ISO dates are
/// accepted too, and anything after the first space (a time of day) is ignored.
const DATE_FORMATS: [&str; 2] = ["%d/%m/%Y", "%Y-%m-%d"];

const JUNIOR_MAX_AGE: i32 = 17;
const ADULT_MAX_AGE: i32 = 49;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date '{0}': expected DD/MM/YYYY")]
pub struct DateFormatError(pub String);

pub fn parse_date(raw: &str) -> Result<NaiveDate, DateFormatError> {
    let day_part = raw.trim().split(' ').next().unwrap_or_default();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(day_part, format).ok())
        .ok_or_else(|| DateFormatError(raw.to_string()))
}

/// Competition bracket of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Category {
    #[serde(rename = "Júnior")]
    Junior,
    #[serde(rename = "Adulto")]
    Adult,
    Master,
    #[serde(rename = "PCD")]
    Pcd,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Junior,
        Category::Adult,
        Category::Master,
        Category::Pcd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Junior => "Júnior",
            Self::Adult => "Adulto",
            Self::Master => "Master",
            Self::Pcd => "PCD",
        }
    }

    /// Athletes with a disability always compete as `PCD`. Everyone else is
    /// bracketed by the age they reach by December 31 of the event's year.
    /// Dates are only parsed when the age is actually needed.
    pub fn classify(pcd: bool, birth_date: &str, event_date: &str) -> Result<Self, DateFormatError> {
        if pcd {
            return Ok(Self::Pcd);
        }

        let event_date = parse_date(event_date)?;
        let birth_date = parse_date(birth_date)?;

        Ok(Self::for_age(age_at_year_end(birth_date, event_date.year())))
    }

    pub fn for_age(age: i32) -> Self {
        if age <= JUNIOR_MAX_AGE {
            Self::Junior
        } else if age <= ADULT_MAX_AGE {
            Self::Adult
        } else {
            Self::Master
        }
    }
}

/// Age attained by December 31 of `year`.
pub fn age_at_year_end(birth_date: NaiveDate, year: i32) -> i32 {
    age_on(birth_date, NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(birth_date))
}

fn age_on(birth_date: NaiveDate, reference: NaiveDate) -> i32 {
    let mut age = reference.year() - birth_date.year();
    if (reference.month(), reference.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "júnior" | "junior" => Ok(Self::Junior),
            "adulto" => Ok(Self::Adult),
            "master" => Ok(Self::Master),
            "pcd" => Ok(Self::Pcd),
            other => Err(format!("unknown category '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turning_seventeen_is_junior() {
        let category = Category::classify(false, "31/12/2007", "10/03/2024").unwrap();
        assert_eq!(category, Category::Junior);
    }

    #[test]
    fn test_turning_eighteen_is_adult() {
        // Born late in the year: still 17 on race day, 18 by year end.
        let category = Category::classify(false, "30/12/2006", "10/03/2024").unwrap();
        assert_eq!(category, Category::Adult);
    }

    #[test]
    fn test_forty_nine_is_adult_and_fifty_is_master() {
        assert_eq!(
            Category::classify(false, "01/01/1975", "15/06/2024").unwrap(),
            Category::Adult
        );
        assert_eq!(
            Category::classify(false, "31/12/1974", "15/06/2024").unwrap(),
            Category::Master
        );
    }

    #[test]
    fn test_disability_flag_overrides_age() {
        for birth in ["01/01/2015", "01/01/1990", "01/01/1950", ""] {
            assert_eq!(
                Category::classify(true, birth, "15/06/2024").unwrap(),
                Category::Pcd
            );
        }
    }

    #[test]
    fn test_accepts_iso_and_timestamped_dates() {
        assert_eq!(
            Category::classify(false, "1990-05-20", "2024-06-15").unwrap(),
            Category::Adult
        );
        assert_eq!(
            Category::classify(false, "20/05/1990 00:00:00", "15/06/2024").unwrap(),
            Category::Adult
        );
    }

    #[test]
    fn test_rejects_unparseable_dates() {
        assert!(Category::classify(false, "1990", "15/06/2024").is_err());
        assert!(Category::classify(false, "20/05/1990", "next sunday").is_err());
        assert!(Category::classify(false, "", "15/06/2024").is_err());
    }

    #[test]
    fn test_age_on_counts_birthday() {
        let birth = NaiveDate::from_ymd_opt(2000, 6, 15).unwrap();
        assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2020, 6, 14).unwrap()), 19);
        assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2020, 6, 15).unwrap()), 20);
        assert_eq!(age_at_year_end(birth, 2020), 20);
    }

    #[test]
    fn test_category_labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }
}
