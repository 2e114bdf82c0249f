//! package.json reader
//!
//! Handles:
//! - dependencies
//! - devDependencies
//! - optionalDependencies
//! - peerDependencies

use crate::domain::{Dependency, DependencySection};
use crate::error::ManifestError;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, trace};

/// Read the dependencies of a package.json file
pub fn read_dependencies(
    path: &Path,
    sections: &[DependencySection],
) -> Result<Vec<Dependency>, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::not_found(path));
    }
    let content =
        std::fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))?;
    parse_dependencies(&content, path, sections)
}

/// Parse the dependencies of package.json content.
///
/// Sections are read in the given order. A package declared in more than one
/// section is kept from the first one. Non-string declarations are skipped.
pub fn parse_dependencies(
    content: &str,
    path: &Path,
    sections: &[DependencySection],
) -> Result<Vec<Dependency>, ManifestError> {
    let json: Value = serde_json::from_str(content)
        .map_err(|e| ManifestError::json_parse_error(path, e.to_string()))?;

    let mut seen = HashSet::new();
    let mut dependencies = Vec::new();

    for section in sections {
        if let Some(deps) = json.get(section.manifest_key()).and_then(|v| v.as_object()) {
            collect_section(deps, *section, &mut seen, &mut dependencies);
        }
    }

    debug!(
        path = %path.display(),
        count = dependencies.len(),
        "read manifest dependencies"
    );
    Ok(dependencies)
}

fn collect_section(
    deps: &Map<String, Value>,
    section: DependencySection,
    seen: &mut HashSet<String>,
    dependencies: &mut Vec<Dependency>,
) {
    for (name, value) in deps {
        let Some(declaration) = value.as_str() else {
            trace!(dependency = %name, section = %section, "skipping non-string declaration");
            continue;
        };
        if !seen.insert(name.clone()) {
            trace!(dependency = %name, section = %section, "already declared in an earlier section");
            continue;
        }
        dependencies.push(Dependency::new(name.clone(), declaration, section));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MANIFEST: &str = r#"{
        "name": "demo",
        "dependencies": {
            "chalk": "^2.3.0",
            "express": "4.18.2"
        },
        "devDependencies": {
            "mocha": "^8.3.2",
            "chalk": "~2.0.0",
            "weird": 42
        },
        "peerDependencies": {
            "react": ">=17.0.0"
        }
    }"#;

    fn parse(sections: &[DependencySection]) -> Vec<Dependency> {
        parse_dependencies(MANIFEST, Path::new("package.json"), sections).unwrap()
    }

    #[test]
    fn test_parse_all_sections() {
        let deps = parse(&DependencySection::ALL);
        assert_eq!(deps.len(), 4);

        let chalk = deps.iter().find(|d| d.name == "chalk").unwrap();
        assert_eq!(chalk.declaration, "^2.3.0");
        assert_eq!(chalk.section, DependencySection::Prod);

        let mocha = deps.iter().find(|d| d.name == "mocha").unwrap();
        assert!(mocha.is_dev());

        let react = deps.iter().find(|d| d.name == "react").unwrap();
        assert_eq!(react.section, DependencySection::Peer);
    }

    #[test]
    fn test_parse_skips_non_string() {
        let deps = parse(&[DependencySection::Dev]);
        assert!(deps.iter().all(|d| d.name != "weird"));
    }

    #[test]
    fn test_parse_section_order_decides_duplicates() {
        let deps = parse(&[DependencySection::Dev, DependencySection::Prod]);
        let chalk = deps.iter().find(|d| d.name == "chalk").unwrap();
        assert_eq!(chalk.declaration, "~2.0.0");
        assert_eq!(chalk.section, DependencySection::Dev);
    }

    #[test]
    fn test_parse_missing_sections() {
        let deps =
            parse_dependencies(r#"{"name": "empty"}"#, Path::new("package.json"), &DependencySection::ALL)
                .unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_dependencies("{ not json", Path::new("package.json"), &DependencySection::ALL)
            .unwrap_err();
        assert!(matches!(err, ManifestError::JsonParseError { .. }));
    }

    #[test]
    fn test_read_dependencies_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(MANIFEST.as_bytes()).unwrap();

        let deps = read_dependencies(file.path(), &[DependencySection::Prod]).unwrap();
        assert_eq!(deps.len(), 2);
    }

    #[test]
    fn test_read_dependencies_missing_file() {
        let err = read_dependencies(Path::new("/nonexistent/package.json"), &DependencySection::ALL)
            .unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }));
    }
}
