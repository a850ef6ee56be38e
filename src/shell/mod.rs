// shell/ - Simulated terminal for the portfolio page
//
// A closed command table, a history of echoed prompts and responses,
// and the currently active section. No file system, no real shell.

mod catalog;
mod command;
mod section;

pub use catalog::{describe, find as find_project, Project, PROJECTS};
pub use command::{Command, CommandTable};
pub use section::Section;

use serde::{Deserialize, Serialize};

use crate::config::MOBILE_BREAKPOINT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub user: String,
    pub host: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            user: "sandeep".into(),
            host: "portfolio".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub prompt: String,
    pub response: String,
}

/// Result of one submitted line, serialized for the page script.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub prompt: String,
    pub response: Option<String>,
    pub target: Option<Section>,
    pub filename: Option<&'static str>,
    pub cleared: bool,
}

/// What clicking a project card should do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "command", rename_all = "lowercase")]
pub enum CardAction {
    /// Narrow viewports run the command straight away.
    Execute(String),
    /// Wide viewports put it in the input for the user to submit.
    Prefill(String),
}

pub struct Session {
    config: ShellConfig,
    table: CommandTable,
    history: Vec<HistoryEntry>,
    active: Section,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ShellConfig::default())
    }
}

impl Session {
    pub fn new(config: ShellConfig) -> Self {
        let table = CommandTable::new(&config);
        Self {
            config,
            table,
            history: Vec::new(),
            active: Section::About,
        }
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn active(&self) -> Section {
        self.active
    }

    pub fn prompt(&self, line: &str) -> String {
        format!("{}@{}:~$ {}", self.config.user, self.config.host, line)
    }

    /// Activate a section (sidebar click). Returns the tab filename.
    pub fn show(&mut self, section: Section) -> &'static str {
        self.active = section;
        section.filename()
    }

    /// Run one submitted line. Blank input is ignored.
    pub fn execute(&mut self, line: &str) -> Option<Outcome> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let prompt = self.prompt(line);
        let Some(cmd) = self.table.lookup(line) else {
            let response = format!("Error: Command not found: {line}. Type 'help' for available commands.");
            return Some(self.record(prompt, response, None));
        };

        if cmd == Command::Clear {
            self.history.clear();
            return Some(Outcome { prompt, response: None, target: None, filename: None, cleared: true });
        }

        let response = self.respond(cmd);
        Some(self.record(prompt, response, cmd.target()))
    }

    pub fn card_action(&self, project_id: &str, viewport_width: u32) -> Option<CardAction> {
        find_project(project_id)?;
        let cmd = format!("cat {project_id}");
        Some(if viewport_width <= MOBILE_BREAKPOINT {
            CardAction::Execute(cmd)
        } else {
            CardAction::Prefill(cmd)
        })
    }

    fn record(&mut self, prompt: String, response: String, target: Option<Section>) -> Outcome {
        self.history.push(HistoryEntry { prompt: prompt.clone(), response: response.clone() });
        let filename = target.map(|s| self.show(s));
        Outcome { prompt, response: Some(response), target, filename, cleared: false }
    }

    fn respond(&self, cmd: Command) -> String {
        let user = &self.config.user;
        match cmd {
            Command::Show(Section::About) => {
                "// Executing 'whois' command...\n-> Displaying about.ts.\nStatus: Success.".to_string()
            }
            Command::Show(Section::Projects) => {
                "// Running 'show --projects' command...\n-> Listing projects.java.\nStatus: Success.".to_string()
            }
            Command::Show(Section::ExperienceWork) => {
                "// Running 'show --experience' command...\n-> Fetching experience.log.\nStatus: Success.".to_string()
            }
            Command::Show(Section::Education) => {
                "// Running 'show --education' command...\n-> Fetching education.cert.\nStatus: Success.".to_string()
            }
            Command::Show(Section::Contact) => {
                format!("// Running 'sudo hire {user}' command...\n-> Initiating contact.sh.\nStatus: READY FOR HIRE")
            }
            Command::Cat(id) => describe(id),
            Command::Help => {
                let ids: Vec<&str> = PROJECTS.iter().map(|p| p.id).collect();
                format!(
                    "Available Commands:\n\
                     - whois {user}? / about\n\
                     - show --experience / experience (Work)\n\
                     - show --education / education (Education/Certifications)\n\
                     - show --projects / projects\n\
                     - sudo hire {user} / contact\n\
                     - cat [{}] (View project details)\n\
                     - clear\n\
                     - help",
                    ids.join(" | ")
                )
            }
            Command::Clear => String::new(),
        }
    }
}
