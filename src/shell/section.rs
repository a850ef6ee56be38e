// section.rs - Content sections shown in the editor pane

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    About,
    ExperienceWork,
    Education,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::About,
        Section::ExperienceWork,
        Section::Education,
        Section::Projects,
        Section::Contact,
    ];

    /// DOM id of the section element.
    pub fn id(self) -> &'static str {
        match self {
            Section::About => "about",
            Section::ExperienceWork => "experience-work",
            Section::Education => "education",
            Section::Projects => "projects",
            Section::Contact => "contact",
        }
    }

    /// Name shown in the sidebar and the active tab.
    pub fn filename(self) -> &'static str {
        match self {
            Section::About => "about.ts",
            Section::ExperienceWork => "experience.log",
            Section::Education => "education.cert",
            Section::Projects => "projects.java",
            Section::Contact => "contact.sh",
        }
    }

    pub fn from_id(id: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for s in Section::ALL {
            assert_eq!(Section::from_id(s.id()), Some(s));
        }
        assert_eq!(Section::from_id("experience"), None);
    }

    #[test]
    fn serializes_as_dom_id() {
        assert_eq!(serde_json::to_string(&Section::ExperienceWork).unwrap(), "\"experience-work\"");
    }
}
