// src/parse.rs

//! Version extraction from the unstructured output of `mvn -v`.
//!
//! Typical input:
//!
//! ```text
//! Apache Maven 3.9.4 (dfbb324ad4a7c8fb0bf182e6d91b0ae20e3d2dd9)
//! Maven home: /usr/share/maven
//! Java version: 17.0.1, vendor: Eclipse Adoptium, runtime: /opt/jdk-17
//! ```

/// Marker preceding the Maven version; the value ends at the next space.
pub const MAVEN_VERSION_MARKER: &str = "Apache Maven";
/// Marker preceding the Java version; the value ends at the next comma.
pub const JAVA_VERSION_MARKER: &str = "Java version: ";

/// Tool and runtime versions reported by the build tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionInfo {
    pub maven_version: Option<String>,
    pub java_version: Option<String>,
}

/// Extract the value that follows `marker` in `text`, up to `terminator`.
///
/// Returns `None` when the marker does not occur or the value is empty. The
/// value never extends past the marker's line; when the terminator does not
/// occur on that line the value runs to the end of the line.
pub fn extract_version(text: &str, marker: &str, terminator: char) -> Option<String> {
    if marker.is_empty() {
        return None;
    }
    let start = text.find(marker)? + marker.len();
    let rest = text[start..].trim_start_matches([' ', '\t']);
    let rest = rest.lines().next().unwrap_or("").trim();
    let value = match rest.find(terminator) {
        Some(end) => &rest[..end],
        None => rest,
    };
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Extract both versions. Each field is parsed on its own.
pub fn parse_version_info(stdout: &str) -> VersionInfo {
    VersionInfo {
        maven_version: extract_version(stdout, MAVEN_VERSION_MARKER, ' '),
        java_version: extract_version(stdout, JAVA_VERSION_MARKER, ','),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Apache Maven 3.9.4 (abc123)\nJava version: 17.0.1, vendor: ...";

    #[test]
    fn extracts_maven_version() {
        assert_eq!(
            extract_version(SAMPLE, MAVEN_VERSION_MARKER, ' ').as_deref(),
            Some("3.9.4")
        );
    }

    #[test]
    fn extracts_java_version() {
        assert_eq!(
            extract_version(SAMPLE, JAVA_VERSION_MARKER, ',').as_deref(),
            Some("17.0.1")
        );
    }

    #[test]
    fn missing_marker_is_none() {
        assert_eq!(extract_version("command not found", MAVEN_VERSION_MARKER, ' '), None);
        assert_eq!(extract_version("", JAVA_VERSION_MARKER, ','), None);
    }

    #[test]
    fn value_without_terminator_runs_to_end() {
        assert_eq!(
            extract_version("Java version: 21", JAVA_VERSION_MARKER, ',').as_deref(),
            Some("21")
        );
    }

    #[test]
    fn marker_at_end_of_text_is_none() {
        assert_eq!(extract_version("Apache Maven", MAVEN_VERSION_MARKER, ' '), None);
    }

    #[test]
    fn one_field_missing_does_not_hide_the_other() {
        let info = parse_version_info("Java version: 11.0.2, vendor: Oracle");
        assert_eq!(info.maven_version, None);
        assert_eq!(info.java_version.as_deref(), Some("11.0.2"));

        let info = parse_version_info("Apache Maven 3.8.1\nERROR: JAVA_HOME is not defined");
        assert_eq!(info.maven_version.as_deref(), Some("3.8.1"));
        assert_eq!(info.java_version, None);
    }
}
