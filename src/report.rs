use crate::error::LayoutError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const MONTHS_ES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// The month a report covers
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// 1..=12
    pub month: u32,
    pub year: i32,
}

/// Who a memorandum is from or addressed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub title: String,
}

/// One completed task, rendered as a numbered (or bulleted) entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Everything a single report build lays out. Activities are expected in completion
/// order and are rendered in exactly the order given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportData {
    pub period: Period,
    pub generated_on: NaiveDate,
    pub sender: Identity,
    pub recipient: Identity,
    #[serde(default)]
    pub activities: Vec<ActivityItem>,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Period {
        Period { month, year }
    }

    /// The report sequence number, `zeroPad(month, 3)-year`; March 2025 is `003-2025`
    pub fn sequence_number(&self) -> String {
        format!("{:03}-{}", self.month, self.year)
    }

    /// Spanish month name, capitalised (`"Marzo"`). Months outside 1..=12 have no name.
    pub fn month_name(&self) -> Option<&'static str> {
        self.month
            .checked_sub(1)
            .and_then(|index| MONTHS_ES.get(index as usize))
            .copied()
    }
}

impl Identity {
    pub fn new<N: ToString, T: ToString>(name: N, title: T) -> Identity {
        Identity {
            name: name.to_string(),
            title: title.to_string(),
        }
    }

    /// Upper-cased first letters of each word of the name; `"Rodrigo Lira Alvarez"`
    /// becomes `"RLA"`
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    fn validate(&self, role: &str) -> Result<(), LayoutError> {
        if self.name.trim().is_empty() {
            return Err(LayoutError::InvalidReport(format!("{role} name is blank")));
        }
        if self.title.trim().is_empty() {
            return Err(LayoutError::InvalidReport(format!("{role} title is blank")));
        }
        Ok(())
    }
}

impl ActivityItem {
    pub fn new<S: ToString>(title: S) -> ActivityItem {
        ActivityItem {
            title: title.to_string(),
            description: None,
        }
    }

    pub fn with_description<S: ToString>(mut self, description: S) -> ActivityItem {
        self.description = Some(description.to_string());
        self
    }

    /// The description, if it has any visible text
    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

impl ReportData {
    /// Check the fields layout cannot do without
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.period.month_name().is_none() {
            return Err(LayoutError::InvalidReport(format!(
                "month {} is outside 1..=12",
                self.period.month
            )));
        }
        self.sender.validate("sender")?;
        self.recipient.validate("recipient")?;
        Ok(())
    }
}

/// Generation date in the long Spanish (Peru) form: `"05 de marzo de 2025"`
pub fn long_date_es(date: NaiveDate) -> String {
    let month = MONTHS_ES[date.month0() as usize].to_lowercase();
    format!("{:02} de {} de {}", date.day(), month, date.year())
}

/// File name for a rendered report, owned by callers rather than the layout engine:
/// `REPORT_<zeroPad(month,3)>-<year>_<authorInitials>.<ext>`
pub fn artifact_file_name(period: &Period, author: &Identity, extension: &str) -> String {
    format!(
        "REPORT_{}_{}.{}",
        period.sequence_number(),
        author.initials(),
        extension
    )
}
