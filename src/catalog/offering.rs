use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Duration category of an offering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassType {
    /// 25-minute session
    Half,
    /// 55-minute session
    Full,
}

impl Default for ClassType {
    fn default() -> Self {
        ClassType::Half
    }
}

impl ClassType {
    /// Session length in minutes for this class.
    pub fn duration_minutes(self) -> i64 {
        match self {
            ClassType::Half => 25,
            ClassType::Full => 55,
        }
    }

    /// List price in cents ($29 half, $49 full).
    pub fn price_cents(self) -> u32 {
        match self {
            ClassType::Half => 2900,
            ClassType::Full => 4900,
        }
    }
}

/// A bookable catalog entry. Read-only reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: String,
    pub category: String,
    pub title: String,
    pub description: String,
    /// Icon identifier used by clients
    pub icon: String,
    /// Missing class type means a half (25-minute) session
    #[serde(default)]
    pub class_type: ClassType,
}

/// The full offering list, in declaration order.
#[derive(Debug, Clone)]
pub struct Catalog {
    offerings: Vec<ServiceOffering>,
}

impl Catalog {
    /// Load the built-in offering list shipped with the crate.
    pub fn builtin() -> Result<Self> {
        let offerings: Vec<ServiceOffering> = serde_json::from_str(include_str!("data.json"))
            .context("Failed to parse built-in catalog data")?;
        Ok(Self { offerings })
    }

    pub fn from_offerings(offerings: Vec<ServiceOffering>) -> Self {
        Self { offerings }
    }

    pub fn offerings(&self) -> &[ServiceOffering] {
        &self.offerings
    }

    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }

    /// Look up an offering by id. Dangling ids are a normal condition for
    /// callers (sessions can outlive catalog edits), so this returns Option.
    pub fn offering(&self, id: &str) -> Option<&ServiceOffering> {
        self.offerings.iter().find(|o| o.id == id)
    }

    /// Distinct category labels, first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for offering in &self.offerings {
            if !seen.contains(&offering.category.as_str()) {
                seen.push(offering.category.as_str());
            }
        }
        seen
    }

    /// Render the menu summary handed to the recommendation collaborator.
    pub fn menu_context(&self) -> String {
        self.offerings
            .iter()
            .map(|o| format!("- {} ({}): {}", o.title, o.category, o.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
