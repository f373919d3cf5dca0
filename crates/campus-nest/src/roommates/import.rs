use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::{info, warn};

use super::domain::{BudgetDocument, HabitsDocument, ProfileDocument, UserId, UserRecord};
use super::validation::validate_profile;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// A roster row that was left out of the import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based data row number, not counting the header.
    pub row: usize,
    pub user_id: String,
    pub reason: String,
}

/// Users parsed from a roster export plus the rows that could not be used.
#[derive(Debug, Default)]
pub struct RosterImport {
    pub users: Vec<UserRecord>,
    pub skipped: Vec<SkippedRow>,
}

/// Loads user records with roommate profiles from a CSV roster export.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<RosterImport, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<RosterImport, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut import = RosterImport::default();
        let mut seen: HashSet<String> = HashSet::new();

        for (index, row) in csv_reader.deserialize::<RosterRow>().enumerate() {
            let row = row?;
            let row_number = index + 1;

            let rejection = if row.id.is_empty() {
                Some("missing user id".to_string())
            } else if seen.contains(&row.id) {
                Some("duplicate user id".to_string())
            } else {
                None
            };
            if let Some(reason) = rejection {
                warn!(row = row_number, %reason, "skipping roster row");
                import.skipped.push(SkippedRow {
                    row: row_number,
                    user_id: row.id,
                    reason,
                });
                continue;
            }

            match row.into_record() {
                Ok(record) => {
                    seen.insert(record.id.0.clone());
                    import.users.push(record);
                }
                Err((user_id, reason)) => {
                    warn!(row = row_number, user = %user_id, %reason, "skipping roster row");
                    import.skipped.push(SkippedRow {
                        row: row_number,
                        user_id,
                        reason,
                    });
                }
            }
        }

        info!(
            imported = import.users.len(),
            skipped = import.skipped.len(),
            "roster import finished"
        );
        Ok(import)
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    id: String,
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    avatar: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    university: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    major: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    sleep_schedule: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    cleanliness: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    noise: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    smoking: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pets: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    cooking: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    interests: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    budget_min: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    budget_max: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    special_needs: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    bio: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    looking_for_roommate: Option<String>,
}

impl RosterRow {
    fn into_record(self) -> Result<UserRecord, (String, String)> {
        let id = self.id.clone();
        let document = self.profile_document().map_err(|reason| (id.clone(), reason))?;
        validate_profile(&document).map_err(|err| (id.clone(), err.to_string()))?;

        let mut record = UserRecord::new(UserId(self.id), self.name).with_profile(document);
        record.avatar = self.avatar.unwrap_or_default();
        Ok(record)
    }

    fn profile_document(&self) -> Result<ProfileDocument, String> {
        let has_habits = [
            &self.sleep_schedule,
            &self.cleanliness,
            &self.noise,
            &self.smoking,
            &self.pets,
            &self.cooking,
        ]
        .iter()
        .any(|cell| cell.is_some());

        let habits = if has_habits {
            Some(HabitsDocument {
                sleep_schedule: self.sleep_schedule.clone(),
                cleanliness: parse_number("cleanliness", self.cleanliness.as_deref())?,
                noise: self.noise.clone(),
                smoking: parse_flag("smoking", self.smoking.as_deref())?,
                pets: parse_flag("pets", self.pets.as_deref())?,
                cooking: self.cooking.clone(),
            })
        } else {
            None
        };

        let budget = match (
            parse_number("budget_min", self.budget_min.as_deref())?,
            parse_number("budget_max", self.budget_max.as_deref())?,
        ) {
            (Some(min), Some(max)) => Some(BudgetDocument { min, max }),
            (None, None) => None,
            _ => return Err("budget needs both budget_min and budget_max".to_string()),
        };

        let interests = self
            .interests
            .as_deref()
            .map(|raw| raw.split(';').map(|item| item.trim().to_string()).collect())
            .unwrap_or_default();

        Ok(ProfileDocument {
            university: self.university.clone(),
            major: self.major.clone(),
            habits,
            interests,
            budget,
            special_needs: self.special_needs.clone(),
            bio: self.bio.clone(),
            looking_for_roommate: parse_flag(
                "looking_for_roommate",
                self.looking_for_roommate.as_deref(),
            )?
            .unwrap_or(false),
        })
    }
}

fn parse_number(column: &str, raw: Option<&str>) -> Result<Option<f64>, String> {
    raw.map(|value| {
        value
            .parse::<f64>()
            .map_err(|_| format!("{column} must be numeric (found '{value}')"))
    })
    .transpose()
}

fn parse_flag(column: &str, raw: Option<&str>) -> Result<Option<bool>, String> {
    raw.map(|value| match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(format!("{column} must be true or false (found '{value}')")),
    })
    .transpose()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
