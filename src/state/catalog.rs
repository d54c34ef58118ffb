//! Fixed catalogs the registration form offers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Job roles, in the order the role selector cycles through them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobRole {
    FullStackJsDeveloper,
    FrontEndDeveloper,
    BackEndDeveloper,
    Designer,
    Student,
    Other,
}

impl JobRole {
    pub const ALL: [JobRole; 6] = [
        JobRole::FullStackJsDeveloper,
        JobRole::FrontEndDeveloper,
        JobRole::BackEndDeveloper,
        JobRole::Designer,
        JobRole::Student,
        JobRole::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::FullStackJsDeveloper => "Full Stack JavaScript Developer",
            Self::FrontEndDeveloper => "Front End Developer",
            Self::BackEndDeveloper => "Back End Developer",
            Self::Designer => "Designer",
            Self::Student => "Student",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShirtSize {
    S,
    M,
    L,
    #[serde(rename = "XL")]
    Xl,
}

impl ShirtSize {
    pub const ALL: [ShirtSize; 4] = [ShirtSize::S, ShirtSize::M, ShirtSize::L, ShirtSize::Xl];

    pub fn label(&self) -> &'static str {
        match self {
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::Xl => "XL",
        }
    }
}

/// Shirt design; doubles as the theme a color belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShirtDesign {
    #[serde(rename = "js puns")]
    JsPuns,
    #[serde(rename = "heart js")]
    HeartJs,
}

impl ShirtDesign {
    pub const ALL: [ShirtDesign; 2] = [ShirtDesign::JsPuns, ShirtDesign::HeartJs];

    pub fn label(&self) -> &'static str {
        match self {
            Self::JsPuns => "Theme - JS Puns",
            Self::HeartJs => "Theme - I ♥ JS",
        }
    }
}

/// A selectable shirt color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShirtColor {
    pub value: String,
    pub label: String,
    pub theme: ShirtDesign,
}

impl ShirtColor {
    pub fn new(value: &str, label: &str, theme: ShirtDesign) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            theme,
        }
    }
}

/// A conference event that can be selected for registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub display_name: String,
    pub cost: u32,
    /// Activities sharing a time slot conflict; `None` never conflicts
    #[serde(default)]
    pub time_slot: Option<String>,
}

impl Activity {
    pub fn new(id: &str, display_name: &str, cost: u32, time_slot: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            cost,
            time_slot: time_slot.map(str::to_string),
        }
    }

    /// Whether two distinct activities run at the same time
    pub fn conflicts_with(&self, other: &Activity) -> bool {
        self.id != other.id
            && matches!((&self.time_slot, &other.time_slot), (Some(a), Some(b)) if a == b)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.time_slot {
            Some(slot) => write!(f, "{} — {} — ${}", self.display_name, slot, self.cost),
            None => write!(f, "{} — ${}", self.display_name, self.cost),
        }
    }
}

/// Card expiration months offered by the payment panel
pub const EXPIRATION_MONTHS: std::ops::RangeInclusive<u32> = 1..=12;

/// Card expiration years offered by the payment panel
pub const EXPIRATION_YEARS: std::ops::RangeInclusive<u32> = 2026..=2031;

/// The catalogs a form session runs against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub activities: Vec<Activity>,
    pub colors: Vec<ShirtColor>,
}

impl Catalog {
    pub fn activity(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    pub fn color(&self, value: &str) -> Option<&ShirtColor> {
        self.colors.iter().find(|c| c.value == value)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            activities: default_activities(),
            colors: default_colors(),
        }
    }
}

pub fn default_activities() -> Vec<Activity> {
    vec![
        Activity::new("all", "Main Conference", 200, None),
        Activity::new(
            "js-frameworks",
            "JavaScript Frameworks Workshop",
            100,
            Some("Tuesday 9am-12pm"),
        ),
        Activity::new(
            "js-libs",
            "JavaScript Libraries Workshop",
            100,
            Some("Tuesday 1pm-4pm"),
        ),
        Activity::new("express", "Express Workshop", 100, Some("Tuesday 9am-12pm")),
        Activity::new("node", "Node.js Workshop", 100, Some("Tuesday 1pm-4pm")),
        Activity::new(
            "build-tools",
            "Build tools Workshop",
            100,
            Some("Wednesday 9am-12pm"),
        ),
        Activity::new("npm", "npm Workshop", 100, Some("Wednesday 1pm-4pm")),
    ]
}

pub fn default_colors() -> Vec<ShirtColor> {
    vec![
        ShirtColor::new("cornflowerblue", "Cornflower Blue", ShirtDesign::JsPuns),
        ShirtColor::new("darkslategrey", "Dark Slate Grey", ShirtDesign::JsPuns),
        ShirtColor::new("gold", "Gold", ShirtDesign::JsPuns),
        ShirtColor::new("tomato", "Tomato", ShirtDesign::HeartJs),
        ShirtColor::new("steelblue", "Steel Blue", ShirtDesign::HeartJs),
        ShirtColor::new("dimgrey", "Dim Grey", ShirtDesign::HeartJs),
    ]
}
