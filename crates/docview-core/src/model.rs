//! Documentation tree types.
//!
//! A [`Document`] is one version of the documentation. Its sections form a
//! two-level tree: sections may carry subsections, and subsections are
//! treated as leaves.

use serde::{Deserialize, Serialize};

/// A navigable content node identified by its URL slug.
///
/// The JSON form uses `subSections` for the nested list, matching the
/// manifests produced by the documentation build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        rename = "subSections",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub_sections: Option<Vec<Section>>,
}

impl Section {
    /// Creates a leaf section with the given URL slug.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            sub_sections: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_sub_sections(mut self, sub_sections: Vec<Self>) -> Self {
        self.sub_sections = Some(sub_sections);
        self
    }

    /// Returns the subsections, or an empty slice for a leaf.
    pub fn sub_sections(&self) -> &[Self] {
        self.sub_sections.as_deref().unwrap_or(&[])
    }

    pub fn has_sub_sections(&self) -> bool {
        !self.sub_sections().is_empty()
    }
}

/// One version of the documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Document {
    pub fn new(version: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            version: version.into(),
            title: None,
            sections,
        }
    }
}
