use chrono::{NaiveTime, Weekday};
use piggy_domain::SummarySchedule;
use serde::{de::Deserializer, Deserialize, Serialize};
use std::fmt;

/// User profile and preferences consumed by the engine and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub currency: Currency,
    /// Documents written before the language preference existed were Russian.
    #[serde(default = "Language::legacy_default")]
    pub language: Language,
    #[serde(default)]
    pub appearance_mode: AppearanceMode,
    #[serde(default = "Settings::default_daily_summary_enabled")]
    pub daily_summary_enabled: bool,
    #[serde(default = "Settings::default_daily_summary_time")]
    pub daily_summary_time: NaiveTime,
    #[serde(default = "Settings::default_week_start")]
    pub week_start: Weekday,
    #[serde(default)]
    pub onboarding_completed: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            region: String::new(),
            currency: Currency::default(),
            language: Language::default(),
            appearance_mode: AppearanceMode::default(),
            daily_summary_enabled: Self::default_daily_summary_enabled(),
            daily_summary_time: Self::default_daily_summary_time(),
            week_start: Self::default_week_start(),
            onboarding_completed: false,
        }
    }
}

impl Settings {
    pub fn default_daily_summary_enabled() -> bool {
        true
    }

    pub fn default_daily_summary_time() -> NaiveTime {
        SummarySchedule::default().time
    }

    pub fn default_week_start() -> Weekday {
        Weekday::Mon
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn summary_schedule(&self) -> SummarySchedule {
        SummarySchedule {
            enabled: self.daily_summary_enabled,
            time: self.daily_summary_time,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Ruble,
    Dollar,
    Euro,
    Pound,
}

impl Currency {
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Ruble => "₽",
            Currency::Dollar => "$",
            Currency::Euro => "€",
            Currency::Pound => "£",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ruble" | "rub" => Some(Currency::Ruble),
            "dollar" | "usd" => Some(Currency::Dollar),
            "euro" | "eur" => Some(Currency::Euro),
            "pound" | "gbp" => Some(Currency::Pound),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Russian,
    #[default]
    English,
    German,
}

impl Language {
    pub fn legacy_default() -> Self {
        Language::Russian
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppearanceMode {
    #[default]
    System,
    Light,
    Dark,
}

impl AppearanceMode {
    fn from_value(value: Option<String>) -> Self {
        value
            .map(|v| AppearanceMode::from_str(v.trim()))
            .unwrap_or_default()
    }

    pub fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => AppearanceMode::Light,
            "dark" => AppearanceMode::Dark,
            _ => AppearanceMode::System,
        }
    }
}

impl fmt::Display for AppearanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AppearanceMode::System => "system",
            AppearanceMode::Light => "light",
            AppearanceMode::Dark => "dark",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for AppearanceMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(AppearanceMode::from_value(value))
    }
}
