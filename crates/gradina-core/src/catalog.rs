//! Message categories and the built-in starter library.
//!
//! Category labels and descriptions are part of what search matches
//! against, so they live here rather than in any presentation layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    SchoolHarmony,
    ExamsTests,
    FamilyReconnection,
    OvercomingFailure,
    Personalized,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::SchoolHarmony,
        Category::ExamsTests,
        Category::FamilyReconnection,
        Category::OvercomingFailure,
        Category::Personalized,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Category::SchoolHarmony => "school-harmony",
            Category::ExamsTests => "exams-tests",
            Category::FamilyReconnection => "family-reconnection",
            Category::OvercomingFailure => "overcoming-failure",
            Category::Personalized => "personalized",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::SchoolHarmony => "Armonie la școală",
            Category::ExamsTests => "Examene și teste",
            Category::FamilyReconnection => "Reconectare în familie",
            Category::OvercomingFailure => "Depășirea eșecului",
            Category::Personalized => "Mesaje personalizate",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::SchoolHarmony => {
                "Pentru zilele grele cu colegii, prietenii și profesorii"
            }
            Category::ExamsTests => "Încurajări înainte și după teste, lucrări și examene",
            Category::FamilyReconnection => {
                "Cuvinte care apropie părinții și copiii după o zi lungă"
            }
            Category::OvercomingFailure => {
                "Sprijin când ceva nu a ieșit cum și-a dorit copilul"
            }
            Category::Personalized => "Mesaje scrise special pentru copilul tău",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.slug() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Category::ALL.iter().map(|c| c.slug()).collect();
                ValidationError::invalid(
                    "category",
                    format!("unknown category '{s}', expected one of {}", known.join(", ")),
                )
            })
    }
}

/// A supportive message from the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub content: String,
    pub category: Category,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Message {
    pub fn new(id: i64, content: impl Into<String>, category: Category) -> Self {
        Self {
            id,
            content: content.into(),
            category,
            is_active: true,
        }
    }
}

/// Messages shipped with the application, used to seed an empty library.
pub fn starter_library() -> Vec<(Category, &'static str)> {
    vec![
        (
            Category::SchoolHarmony,
            "Știu că azi a fost greu cu colegii. Ești un prieten bun și lumea va vedea asta.",
        ),
        (
            Category::SchoolHarmony,
            "Nu trebuie să placi tuturor. Cei care te cunosc cu adevărat te prețuiesc.",
        ),
        (
            Category::SchoolHarmony,
            "Dacă te simți singur în pauză, amintește-ți că acasă te așteaptă cineva care te iubește.",
        ),
        (
            Category::ExamsTests,
            "Ai învățat, te-ai pregătit. Orice notă ai lua, sunt mândru de efortul tău.",
        ),
        (
            Category::ExamsTests,
            "E normal să simți teamă înainte de examen. Respiră adânc, știi mai mult decât crezi.",
        ),
        (
            Category::ExamsTests,
            "O lucrare nu spune cine ești. Tu ești mult mai mult decât un număr.",
        ),
        (
            Category::FamilyReconnection,
            "Mi-a fost dor de tine azi. Hai să ne povestim ziua la cină.",
        ),
        (
            Category::FamilyReconnection,
            "Îmi pare rău că am fost grăbit. Te iubesc și am timp pentru tine.",
        ),
        (
            Category::FamilyReconnection,
            "Ești cea mai frumoasă parte din fiecare zi a mea.",
        ),
        (
            Category::OvercomingFailure,
            "Greșelile sunt felul în care învățăm. Mâine încercăm din nou, împreună.",
        ),
        (
            Category::OvercomingFailure,
            "Nu ai pierdut, ai descoperit ce mai ai de exersat. Am încredere în tine.",
        ),
        (
            Category::OvercomingFailure,
            "Curajul nu înseamnă să nu cazi, ci să te ridici. Și tu te ridici mereu.",
        ),
        (
            Category::Personalized,
            "Sunt atât de recunoscător că ești copilul meu. Ai o inimă uriașă.",
        ),
    ]
}
