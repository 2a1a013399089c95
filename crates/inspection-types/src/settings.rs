//! Inspector preferences stored alongside the inspections

use serde::{Deserialize, Serialize};

/// Personal details printed on exported reports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorProfile {
    pub name: String,
    pub email: String,
    pub company: String,
    pub signature: String,
}

impl InspectorProfile {
    pub fn is_empty(&self) -> bool {
        [&self.name, &self.email, &self.company, &self.signature]
            .iter()
            .all(|v| v.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub profile: InspectorProfile,
    /// Render the report as soon as an inspection is saved
    pub auto_generate_reports: bool,
}
