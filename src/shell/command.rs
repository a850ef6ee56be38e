// command.rs - The closed command table
//
// Matching is literal: trim, lower-case, exact lookup. Nothing else.

use super::catalog::PROJECTS;
use super::section::Section;
use super::ShellConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Show(Section),
    Cat(&'static str),
    Clear,
    Help,
}

impl Command {
    /// Section activated after the command runs.
    pub fn target(self) -> Option<Section> {
        match self {
            Command::Show(s) => Some(s),
            Command::Cat(_) => Some(Section::Projects),
            Command::Clear | Command::Help => None,
        }
    }
}

pub struct CommandTable {
    entries: Vec<(String, Command)>,
}

impl CommandTable {
    pub fn new(config: &ShellConfig) -> Self {
        let user = config.user.to_lowercase();
        let mut entries = vec![
            (format!("whois {user}?"), Command::Show(Section::About)),
            ("about".to_string(), Command::Show(Section::About)),
            ("show --projects".to_string(), Command::Show(Section::Projects)),
            ("projects".to_string(), Command::Show(Section::Projects)),
            ("show --experience".to_string(), Command::Show(Section::ExperienceWork)),
            ("experience".to_string(), Command::Show(Section::ExperienceWork)),
            ("show --education".to_string(), Command::Show(Section::Education)),
            ("education".to_string(), Command::Show(Section::Education)),
            (format!("sudo hire {user}"), Command::Show(Section::Contact)),
            ("contact".to_string(), Command::Show(Section::Contact)),
            ("clear".to_string(), Command::Clear),
            ("help".to_string(), Command::Help),
        ];
        for p in &PROJECTS {
            entries.push((format!("cat {}", p.id), Command::Cat(p.id)));
        }
        Self { entries }
    }

    pub fn lookup(&self, input: &str) -> Option<Command> {
        let key = input.trim().to_lowercase();
        self.entries.iter().find(|(k, _)| *k == key).map(|&(_, c)| c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
