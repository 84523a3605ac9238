use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub state: Option<String>,
    pub progress: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    pub id: String,
    pub name: Option<String>,
    pub number: Option<f64>,
    pub completed_at: Option<String>,
}

impl Cycle {
    /// Unnamed cycles are shown by number.
    pub fn display_name(&self) -> String {
        match (&self.name, self.number) {
            (Some(name), _) if !name.is_empty() => name.clone(),
            (_, Some(number)) => format!("Cycle {}", number),
            _ => "Cycle".to_string(),
        }
    }
}
