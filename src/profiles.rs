use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// A researcher's external profile, shown when the article list can't be loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScholarProfile {
    pub name: String,
    pub specialised: Vec<String>,
    pub link: String,
}

impl ScholarProfile {
    fn new(name: &str, specialised: &[&str], link: &str) -> Self {
        Self {
            name: name.to_string(),
            specialised: specialised.iter().map(|s| s.to_string()).collect(),
            link: link.to_string(),
        }
    }

    pub fn tags(&self) -> String {
        self.specialised.join(" | ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FallbackProfiles(Vec<ScholarProfile>);

impl Default for FallbackProfiles {
    fn default() -> Self {
        Self(vec![
            ScholarProfile::new(
                "Moritz Müller",
                &["Biogeochemistry"],
                "https://scholar.google.com.my/citations?user=taXOvK8AAAAJ&hl=en",
            ),
            ScholarProfile::new(
                "Aazani Mujahid",
                &[
                    "Physical Operational Oceanography",
                    "Shelf Seas",
                    "Coral Reefs",
                    "Climate Change Adaptation",
                ],
                "https://scholar.google.com.my/citations?user=q2Sg9akAAAAJ&hl=en",
            ),
            ScholarProfile::new(
                "Changi Wong",
                &[
                    "Endophytes",
                    "Natural Products",
                    "Plant Tissue Culture",
                    "Microplastic",
                    "Biogeochemistry",
                ],
                "https://scholar.google.com.my/citations?hl=en&user=OgAndckAAAAJ",
            ),
            ScholarProfile::new(
                "Jenny Choo",
                &[
                    "Remote Sensing",
                    "Earth Observation",
                    "Water Quality",
                    "Land Changes",
                    "Biogeochemistry",
                ],
                "https://scholar.google.com/citations?user=gUqutgMAAAAJ&hl=en",
            ),
        ])
    }
}

impl FallbackProfiles {
    /// Built-in profiles, or the JSON array at `path` when one is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading profiles from {}", path.display()))?;
        Self::from_json(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let profiles: Self = serde_json::from_str(json)?;
        if profiles.0.is_empty() {
            bail!("profile list is empty");
        }
        Ok(profiles)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScholarProfile> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_builtin_profiles() {
        let profiles = FallbackProfiles::default();
        assert_eq!(profiles.len(), 4);
        let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Moritz Müller", "Aazani Mujahid", "Changi Wong", "Jenny Choo"]
        );
    }

    #[test]
    fn tags_are_pipe_joined() {
        let profiles = FallbackProfiles::default();
        let second = profiles.iter().nth(1).unwrap();
        assert_eq!(
            second.tags(),
            "Physical Operational Oceanography | Shelf Seas | Coral Reefs | Climate Change Adaptation"
        );
        assert_eq!(profiles.iter().next().unwrap().tags(), "Biogeochemistry");
    }

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(FallbackProfiles::load(None).unwrap(), FallbackProfiles::default());
    }

    #[test]
    fn loads_from_json() {
        let json = r#"[{"name": "Ada", "specialised": ["Engines"], "link": "https://example.org/ada"}]"#;
        let profiles = FallbackProfiles::from_json(json).unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles.iter().next().unwrap().link, "https://example.org/ada");
    }

    #[test]
    fn rejects_empty_list() {
        assert!(FallbackProfiles::from_json("[]").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = FallbackProfiles::load(Some(Path::new("/nonexistent/profiles.json"))).unwrap_err();
        assert!(err.to_string().contains("reading profiles"));
    }
}
