use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A rikishi profile as scraped from the `rikishidata` table.
///
/// Text fields are lowercased and empty when the page had no matching row.
/// `height_cm` and `weight_kg` are always set together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rikishi {
    pub id: u32,
    pub highest_rank: String,
    pub real_name: String,
    pub birth_date: Option<NaiveDate>,
    pub origin: String,
    pub height_cm: u32,
    pub weight_kg: u32,
    pub university: String,
    pub heya: String,
    pub shikona: String,
    /// Debut basho as `YYYY.MM`.
    pub first_basho: String,
}

impl Display for Rikishi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "┌─ {} ({})", self.shikona, self.id)?;
        writeln!(f, "│  Real Name:    {}", self.real_name)?;
        writeln!(f, "│  Stable:       {}", self.heya)?;
        writeln!(f, "│  Hometown:     {}", self.origin)?;
        match self.birth_date {
            Some(date) => writeln!(f, "│  Birthdate:    {}", date)?,
            None => writeln!(f, "│  Birthdate:    unknown")?,
        }
        writeln!(f, "│  Highest Rank: {}", self.highest_rank)?;
        writeln!(f, "│  University:   {}", self.university)?;
        writeln!(f, "│  Height (cm):  {}", self.height_cm)?;
        writeln!(f, "│  Weight (kg):  {}", self.weight_kg)?;
        write!(f, "└─ First Basho: {}", self.first_basho)
    }
}
