//! Named seed patterns

use super::pattern::Pattern;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    StillLife,
    Oscillator,
    Spaceship,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::StillLife => "still life",
            Category::Oscillator => "oscillator",
            Category::Spaceship => "spaceship",
        };
        f.write_str(name)
    }
}

/// A pattern table entry
pub struct NamedPattern {
    pub name: &'static str,
    pub category: Category,
    pub rows: &'static [&'static str],
}

impl NamedPattern {
    pub fn pattern(&self) -> Pattern {
        // table rows are rectangular '#'/'-' strings
        Pattern::parse(self.rows).unwrap_or_default()
    }
}

pub const PATTERNS: &[NamedPattern] = &[
    NamedPattern {
        name: "block",
        category: Category::StillLife,
        rows: &["##", "##"],
    },
    NamedPattern {
        name: "beehive",
        category: Category::StillLife,
        rows: &["-##-", "#--#", "-##-"],
    },
    NamedPattern {
        name: "loaf",
        category: Category::StillLife,
        rows: &["-##-", "#--#", "-#-#", "--#-"],
    },
    NamedPattern {
        name: "boat",
        category: Category::StillLife,
        rows: &["##-", "#-#", "-#-"],
    },
    NamedPattern {
        name: "tub",
        category: Category::StillLife,
        rows: &["-#-", "#-#", "-#-"],
    },
    NamedPattern {
        name: "blinker",
        category: Category::Oscillator,
        rows: &["###"],
    },
    NamedPattern {
        name: "toad",
        category: Category::Oscillator,
        rows: &["-###", "###-"],
    },
    NamedPattern {
        name: "beacon",
        category: Category::Oscillator,
        rows: &["##--", "#---", "---#", "--##"],
    },
    NamedPattern {
        name: "pulsar",
        category: Category::Oscillator,
        rows: &[
            "--###---###--",
            "-------------",
            "#----#-#----#",
            "#----#-#----#",
            "#----#-#----#",
            "--###---###--",
            "-------------",
            "--###---###--",
            "#----#-#----#",
            "#----#-#----#",
            "#----#-#----#",
            "-------------",
            "--###---###--",
        ],
    },
    NamedPattern {
        name: "pentadecathlon",
        category: Category::Oscillator,
        rows: &["###", "#-#", "###", "###", "###", "###", "#-#", "###"],
    },
    NamedPattern {
        name: "glider",
        category: Category::Spaceship,
        rows: &["--#", "#-#", "-##"],
    },
];

/// Look up a pattern table entry by name (case-insensitive)
pub fn lookup(name: &str) -> Option<&'static NamedPattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Parsed pattern for `name`
pub fn get(name: &str) -> Option<Pattern> {
    lookup(name).map(NamedPattern::pattern)
}

pub fn category(name: &str) -> Option<Category> {
    lookup(name).map(|p| p.category)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    PATTERNS.iter().map(|p| p.name)
}
