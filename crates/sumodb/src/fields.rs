use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::types::Rikishi;
use crate::utils::slugify;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("'{field}' value {value:?} does not match the expected pattern")]
    PatternMismatch { field: &'static str, value: String },
    #[error("Failed to parse date for '{field}': {reason}")]
    DateParse { field: &'static str, reason: String },
    #[error("Failed to parse number for '{field}': {reason}")]
    NumberParse { field: &'static str, reason: String },
}

/// One recognized row's contribution to a [`Rikishi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    HighestRank(String),
    RealName(String),
    BirthDate(NaiveDate),
    Origin(String),
    Measurements { height_cm: u32, weight_kg: u32 },
    University(String),
    Heya(String),
    Shikona(String),
    FirstBasho(String),
}

impl FieldUpdate {
    pub fn apply(self, rikishi: &mut Rikishi) {
        match self {
            FieldUpdate::HighestRank(rank) => rikishi.highest_rank = rank,
            FieldUpdate::RealName(name) => rikishi.real_name = name,
            FieldUpdate::BirthDate(date) => rikishi.birth_date = Some(date),
            FieldUpdate::Origin(origin) => rikishi.origin = origin,
            FieldUpdate::Measurements {
                height_cm,
                weight_kg,
            } => {
                rikishi.height_cm = height_cm;
                rikishi.weight_kg = weight_kg;
            }
            FieldUpdate::University(university) => rikishi.university = university,
            FieldUpdate::Heya(heya) => rikishi.heya = heya,
            FieldUpdate::Shikona(shikona) => rikishi.shikona = shikona,
            FieldUpdate::FirstBasho(basho) => rikishi.first_basho = basho,
        }
    }
}

const BIRTH_DATE: &str = "Birth Date";
const HEIGHT_AND_WEIGHT: &str = "Height and Weight";
const HATSU_DOHYO: &str = "Hatsu Dohyo";

/// Stored when a `Highest Rank` row is present but slugifies to nothing.
pub const UNKNOWN_RANK: &str = "unknown";

// ASCII classes only, `\d` would also match full-width digits.
static RE_BIRTH_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9A-Za-z_]+) ([0-9]+), ([0-9]{4}) \([0-9]+ years\)")
        .expect("invalid regex: birth date")
});

static RE_HEIGHT_WEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+) cm ([0-9]+) kg").expect("invalid regex: height and weight")
});

static RE_FIRST_BASHO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4}\.[0-9]{2})").expect("invalid regex: first basho"));

/// Maps one `(label, value)` row of the `rikishidata` table to an update.
///
/// Unknown labels yield `Ok(None)`. Plain text fields never fail; birth date,
/// height/weight and hatsu dohyo fail when their value drifts from the
/// expected format.
pub fn extract_field(label: &str, value: &str) -> Result<Option<FieldUpdate>, FieldError> {
    let update = match label {
        "Highest Rank" => {
            let rank = slugify(value);
            if rank.is_empty() {
                FieldUpdate::HighestRank(UNKNOWN_RANK.to_string())
            } else {
                FieldUpdate::HighestRank(rank)
            }
        }
        "Real Name" => FieldUpdate::RealName(value.to_lowercase()),
        "Shusshin" => FieldUpdate::Origin(value.to_lowercase()),
        "University" => FieldUpdate::University(value.to_lowercase()),
        "Heya" => FieldUpdate::Heya(value.to_lowercase()),
        "Shikona" => FieldUpdate::Shikona(value.to_lowercase()),
        BIRTH_DATE => FieldUpdate::BirthDate(parse_birth_date(value)?),
        HEIGHT_AND_WEIGHT => {
            let (height_cm, weight_kg) = parse_height_weight(value)?;
            FieldUpdate::Measurements {
                height_cm,
                weight_kg,
            }
        }
        HATSU_DOHYO => FieldUpdate::FirstBasho(parse_first_basho(value)?),
        _ => return Ok(None),
    };

    Ok(Some(update))
}

fn parse_month(month: &str) -> Option<u32> {
    match month.to_lowercase().as_str() {
        "january" => Some(1),
        "february" => Some(2),
        "march" => Some(3),
        "april" => Some(4),
        "may" => Some(5),
        "june" => Some(6),
        "july" => Some(7),
        "august" => Some(8),
        "september" => Some(9),
        "october" => Some(10),
        "november" => Some(11),
        "december" => Some(12),
        _ => None,
    }
}

fn date_error(reason: String) -> FieldError {
    FieldError::DateParse {
        field: BIRTH_DATE,
        reason,
    }
}

/// `January 2, 2006 (23 years)`; the age is discarded.
fn parse_birth_date(value: &str) -> Result<NaiveDate, FieldError> {
    let caps = RE_BIRTH_DATE
        .captures(value)
        .ok_or_else(|| FieldError::PatternMismatch {
            field: BIRTH_DATE,
            value: value.to_string(),
        })?;

    let month =
        parse_month(&caps[1]).ok_or_else(|| date_error(format!("Unknown month: {}", &caps[1])))?;
    let day: u32 = caps[2]
        .parse()
        .map_err(|_| date_error(format!("Invalid day: {}", &caps[2])))?;
    let year: i32 = caps[3]
        .parse()
        .map_err(|_| date_error(format!("Invalid year: {}", &caps[3])))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| date_error(format!("Invalid date: {}-{}-{}", year, month, day)))
}

/// `180 cm 120 kg`, both numbers or nothing.
fn parse_height_weight(value: &str) -> Result<(u32, u32), FieldError> {
    let caps = RE_HEIGHT_WEIGHT
        .captures(value)
        .ok_or_else(|| FieldError::PatternMismatch {
            field: HEIGHT_AND_WEIGHT,
            value: value.to_string(),
        })?;

    let parse = |digits: &str| {
        digits
            .parse::<u32>()
            .map_err(|e| FieldError::NumberParse {
                field: HEIGHT_AND_WEIGHT,
                reason: format!("{digits}: {e}"),
            })
    };

    Ok((parse(&caps[1])?, parse(&caps[2])?))
}

fn parse_first_basho(value: &str) -> Result<String, FieldError> {
    RE_FIRST_BASHO
        .captures(value.trim_start())
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| FieldError::PatternMismatch {
            field: HATSU_DOHYO,
            value: value.to_string(),
        })
}
