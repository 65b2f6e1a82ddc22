//! Project descriptor sources — the built-in portfolio and JSON files.
//!
//! A descriptor file is a JSON array:
//!
//! ```json
//! [{ "title": "...", "tag": "...", "time": "2023 - 2024",
//!    "previewImg": "https://… or ./local.png",
//!    "sections": [{ "type": "title", "value": "..." },
//!                 { "type": "text",  "value": "..." }] }]
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::card::{DetailSection, ProjectDescriptor, SectionKind};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read project file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed project file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read descriptors from a JSON file on disk.
pub fn load_descriptors(path: &Path) -> Result<Vec<ProjectDescriptor>, DataError> {
    let contents = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let descriptors = parse_descriptors(&contents).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(count = descriptors.len(), path = %path.display(), "loaded project descriptors");
    Ok(descriptors)
}

pub fn parse_descriptors(json: &str) -> Result<Vec<ProjectDescriptor>, serde_json::Error> {
    serde_json::from_str(json)
}

/// The portfolio shipped with the binary.
pub fn builtin_descriptors() -> Vec<ProjectDescriptor> {
    use SectionKind::*;

    fn project(
        title: &str,
        tag: &str,
        time: &str,
        preview: &str,
        sections: &[(SectionKind, &str)],
    ) -> ProjectDescriptor {
        ProjectDescriptor {
            title: title.into(),
            tag: tag.into(),
            time: time.into(),
            preview_img: preview.into(),
            sections: sections
                .iter()
                .map(|&(kind, value)| DetailSection::new(kind, value))
                .collect(),
        }
    }

    vec![
        project(
            "智能座舱交互",
            "Automotive UX",
            "2023 - 2024",
            "https://images.unsplash.com/photo-1617788130335-53a4716fd3f1?q=80&w=1200",
            &[
                (Title, "未来出行系统的触觉反馈研究"),
                (Text, "通过对驾驶心智模型的重构，设计了一套基于空间深度的交互语言。"),
            ],
        ),
        project(
            "Transit Wayfinding",
            "Service Design",
            "2022 - 2023",
            "https://images.unsplash.com/photo-1544620347-c4fd4a3d5957?q=80&w=1200",
            &[
                (Title, "Signage that reads at walking speed"),
                (Text, "Field studies across four interchange stations shaped a layered sign system for first-time riders."),
                (Image, "Station concourse prototype"),
                (Text, "Pilot boards cut average route-finding time by a third."),
            ],
        ),
        project(
            "Clinic Booking Flow",
            "Product Design",
            "2021 - 2022",
            "https://images.unsplash.com/photo-1576091160550-2173dba999ef?q=80&w=1200",
            &[
                (Title, "Three taps to an appointment"),
                (Text, "Collapsed a nine-step booking form into a guided flow built around the patient's calendar."),
                (Image, "Booking flow storyboard"),
            ],
        ),
        project(
            "Ambient Home Hub",
            "Interaction Design",
            "2020 - 2021",
            "https://images.unsplash.com/photo-1558002038-1055907df827?q=80&w=1200",
            &[
                (Title, "A screen that stays quiet"),
                (Text, "Glanceable states replace notifications; the hub only lights up when something needs a decision."),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_descriptor_json() {
        let json = r#"[
            {
                "title": "Cockpit",
                "tag": "Automotive UX",
                "time": "2023 - 2024",
                "previewImg": "https://example.com/a.jpg",
                "sections": [
                    { "type": "title", "value": "Heading" },
                    { "type": "text", "value": "Body" },
                    { "type": "image", "value": "Caption" }
                ]
            }
        ]"#;
        let parsed = parse_descriptors(json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].preview_img, "https://example.com/a.jpg");
        let kinds: Vec<_> = parsed[0].sections.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![SectionKind::Title, SectionKind::Text, SectionKind::Image]);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let json = r#"[{ "title": "t", "tag": "g", "time": "x", "previewImg": "p" }]"#;
        let parsed = parse_descriptors(json).unwrap();
        assert!(parsed[0].sections.is_empty());
    }

    #[test]
    fn unknown_section_kind_is_rejected() {
        let json = r#"[{ "title": "t", "tag": "g", "time": "x", "previewImg": "p",
                         "sections": [{ "type": "video", "value": "v" }] }]"#;
        assert!(parse_descriptors(json).is_err());
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = load_descriptors(Path::new("/nonexistent/projects.json")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn builtin_portfolio_is_not_empty() {
        let builtin = builtin_descriptors();
        assert!(!builtin.is_empty());
        assert_eq!(builtin[0].tag, "Automotive UX");
    }
}
