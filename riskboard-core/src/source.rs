//! Record source seam
//!
//! Callers hand the dashboard a [`RecordSource`] instead of the library reaching for a
//! shared database client. [`Dataset`] is the in-memory implementation and also the
//! on-disk JSON export format read by [`JsonFileSource`].

use crate::records::{
    CarbonRecord, CrisisRecord, Goal, IncidentRecord, MaterialityAssessment, ProgramRecord,
    ScenarioRiskInput,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Supplies already-fetched record collections
pub trait RecordSource {
    fn programs(&self) -> Result<Vec<ProgramRecord>>;
    fn incidents(&self) -> Result<Vec<IncidentRecord>>;
    fn crises(&self) -> Result<Vec<CrisisRecord>>;
    fn carbon_records(&self) -> Result<Vec<CarbonRecord>>;
    fn goals(&self) -> Result<Vec<Goal>>;
    fn materiality_assessments(&self) -> Result<Vec<MaterialityAssessment>>;
    fn scenarios(&self) -> Result<Vec<ScenarioRiskInput>>;
}

/// Every collection the dashboard reads, as exported from the database
///
/// Missing collections deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Dataset {
    pub programs: Vec<ProgramRecord>,
    pub incidents: Vec<IncidentRecord>,
    pub crises: Vec<CrisisRecord>,
    pub carbon: Vec<CarbonRecord>,
    pub goals: Vec<Goal>,
    pub materiality: Vec<MaterialityAssessment>,
    pub scenarios: Vec<ScenarioRiskInput>,
}

impl Dataset {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse dataset")
    }
}

impl RecordSource for Dataset {
    fn programs(&self) -> Result<Vec<ProgramRecord>> {
        Ok(self.programs.clone())
    }

    fn incidents(&self) -> Result<Vec<IncidentRecord>> {
        Ok(self.incidents.clone())
    }

    fn crises(&self) -> Result<Vec<CrisisRecord>> {
        Ok(self.crises.clone())
    }

    fn carbon_records(&self) -> Result<Vec<CarbonRecord>> {
        Ok(self.carbon.clone())
    }

    fn goals(&self) -> Result<Vec<Goal>> {
        Ok(self.goals.clone())
    }

    fn materiality_assessments(&self) -> Result<Vec<MaterialityAssessment>> {
        Ok(self.materiality.clone())
    }

    fn scenarios(&self) -> Result<Vec<ScenarioRiskInput>> {
        Ok(self.scenarios.clone())
    }
}

/// Dataset exported to a JSON file, read once on open
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    dataset: Dataset,
}

impl JsonFileSource {
    pub fn open(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dataset: {}", path.display()))?;
        let dataset = Dataset::from_json(&content)
            .with_context(|| format!("invalid dataset in: {}", path.display()))?;

        tracing::debug!(
            path = %path.display(),
            programs = dataset.programs.len(),
            incidents = dataset.incidents.len(),
            crises = dataset.crises.len(),
            "loaded dataset"
        );

        Ok(JsonFileSource {
            path: path.to_path_buf(),
            dataset,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

impl RecordSource for JsonFileSource {
    fn programs(&self) -> Result<Vec<ProgramRecord>> {
        self.dataset.programs()
    }

    fn incidents(&self) -> Result<Vec<IncidentRecord>> {
        self.dataset.incidents()
    }

    fn crises(&self) -> Result<Vec<CrisisRecord>> {
        self.dataset.crises()
    }

    fn carbon_records(&self) -> Result<Vec<CarbonRecord>> {
        self.dataset.carbon_records()
    }

    fn goals(&self) -> Result<Vec<Goal>> {
        self.dataset.goals()
    }

    fn materiality_assessments(&self) -> Result<Vec<MaterialityAssessment>> {
        self.dataset.materiality_assessments()
    }

    fn scenarios(&self) -> Result<Vec<ScenarioRiskInput>> {
        self.dataset.scenarios()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{EmissionScope, Probability, Severity};
    use std::fs;

    #[test]
    fn test_missing_collections_default_to_empty() {
        let dataset = Dataset::from_json(r#"{"carbon": [{"scope": "scope3", "co2_equivalent": 2.5}]}"#)
            .unwrap();
        assert!(dataset.programs.is_empty());
        assert!(dataset.incidents.is_empty());
        assert_eq!(dataset.carbon.len(), 1);
        assert_eq!(dataset.carbon[0].scope, EmissionScope::Scope3);
    }

    #[test]
    fn test_invalid_vocabulary_fails_whole_dataset() {
        let result = Dataset::from_json(
            r#"{"scenarios": [{"name": "Flood", "severity": "high", "probability": "sometimes"}]}"#,
        );
        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("invalid probability value 'sometimes'"));
    }

    #[test]
    fn test_json_file_source_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        fs::write(
            &path,
            r#"{"scenarios": [{"name": "Flood", "severity": "critical", "probability": "low"}]}"#,
        )
        .unwrap();

        let source = JsonFileSource::open(&path).unwrap();
        assert_eq!(source.path(), path.as_path());
        let scenarios = source.scenarios().unwrap();
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].severity, Severity::Critical);
        assert_eq!(scenarios[0].probability, Probability::Low);
        assert!(source.programs().unwrap().is_empty());
    }

    #[test]
    fn test_json_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonFileSource::open(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read dataset"));
    }
}
