//! Template file reading utilities.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::TemplateResult;
use crate::model::Template;

/// Reader for template files.
pub struct TemplateReader;

impl TemplateReader {
    /// Read a template from a YAML or JSON file, chosen by extension.
    pub fn read_file(path: impl AsRef<Path>) -> TemplateResult<Template> {
        let path = path.as_ref();
        debug!("Reading template from {:?}", path);

        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::read_json(&content),
            _ => Self::read_yaml(&content),
        }
    }

    /// Read a template from a YAML string.
    pub fn read_yaml(content: &str) -> TemplateResult<Template> {
        let template = serde_yaml::from_str(content)?;
        Ok(template)
    }

    /// Read a template from a JSON string.
    pub fn read_json(content: &str) -> TemplateResult<Template> {
        let template = serde_json::from_str(content)?;
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConnectionDetailSpec, ReadinessCheckType};

    const SAMPLE: &str = r#"
base:
  apiVersion: storage.example.org/v1
  kind: Bucket
  spec:
    forProvider:
      location: EU
patches:
  - fromFieldPath: spec.parameters.location
    toFieldPath: spec.forProvider.location
connectionDetails:
  - name: user
    value: alice
  - fromSecretKey: password
    rename: pass
readinessChecks:
  - type: MatchString
    fieldPath: status.atProvider.phase
    matchString: READY
connectionSecretRef:
  namePath: spec.secretName
  namespacePath: spec.secretNamespace
"#;

    #[test]
    fn test_read_yaml() {
        let template = TemplateReader::read_yaml(SAMPLE).unwrap();

        assert_eq!(template.base["kind"], "Bucket");
        assert_eq!(template.patches.len(), 1);
        assert_eq!(template.patches[0].target_path(), "spec.forProvider.location");
        assert_eq!(template.connection_details.len(), 2);
        assert!(matches!(
            template.connection_details[0],
            ConnectionDetailSpec::Literal { .. }
        ));
        assert_eq!(
            template.readiness_checks[0].check_type,
            ReadinessCheckType::MatchString
        );
        let reference = template.connection_secret_ref.unwrap();
        assert_eq!(reference.name_path, "spec.secretName");
    }

    #[test]
    fn test_read_file_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.yaml");
        fs::write(&path, SAMPLE).unwrap();

        let template = TemplateReader::read_file(&path).unwrap();
        assert_eq!(template.patches.len(), 1);
    }

    #[test]
    fn test_read_file_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.json");
        fs::write(&path, r#"{"base": {"kind": "Bucket"}}"#).unwrap();

        let template = TemplateReader::read_file(&path).unwrap();
        assert_eq!(template.base["kind"], "Bucket");
    }

    #[test]
    fn test_read_yaml_invalid() {
        assert!(TemplateReader::read_yaml("patches: 42").is_err());
    }
}
