//! Menu choices and the text shown for them.

use crate::analysis::Comparison;

pub const MENU_TITLE: &str = "Aviation Data Analysis Menu:";
pub const PROMPT: &str = "Enter your choice (1-3): ";
pub const INVALID_CHOICE: &str = "Invalid choice. Please select a number between 0 and 3.";
pub const EXIT_MESSAGE: &str = "Exiting program.";

/// What a line of user input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Run(Comparison),
    Exit,
    Invalid(String),
}

impl MenuChoice {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => MenuChoice::Run(Comparison::LoadFactorVsOthers),
            "2" => MenuChoice::Run(Comparison::CargoVsPassengers),
            "3" => MenuChoice::Run(Comparison::LoadFactorTrend),
            "0" => MenuChoice::Exit,
            other => MenuChoice::Invalid(other.to_string()),
        }
    }
}

/// Menu body, one numbered line per comparison and the exit entry.
pub fn menu_text() -> String {
    let mut text = format!("\n{MENU_TITLE}\n");
    for (i, comparison) in Comparison::ALL.iter().enumerate() {
        text.push_str(&format!("{}. {}\n", i + 1, comparison.menu_label()));
    }
    text.push_str("0. Exit\n");
    text
}
