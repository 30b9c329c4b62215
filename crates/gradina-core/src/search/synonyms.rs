//! Concept → synonym dictionary used to widen search queries.
//!
//! The built-in table is constructed once per process and never mutated.
//! Expansion favours recall: a short query pulls in every family it
//! touches, so "frica" also finds messages about courage and panic.

use std::sync::LazyLock;

use indexmap::IndexSet;

use super::normalize::normalize;

static BUILTIN: LazyLock<SynonymTable> =
    LazyLock::new(|| SynonymTable::from_entries(BUILTIN_ENTRIES));

const BUILTIN_ENTRIES: &[(&str, &[&str])] = &[
    (
        "frica",
        &[
            "frică", "teamă", "temere", "panică", "spaimă", "speriat", "speriată", "curaj",
            "emoții", "îngrijorare",
        ],
    ),
    (
        "anxietate",
        &[
            "anxietate", "neliniște", "stres", "agitație", "îngrijorat", "îngrijorată", "teamă",
            "respiră", "calm", "liniște",
        ],
    ),
    (
        "examen",
        &[
            "examen", "test", "teză", "lucrare", "evaluare", "notă", "note", "olimpiadă",
            "învățat", "pregătit",
        ],
    ),
    (
        "scoala",
        &[
            "școală", "clasă", "colegi", "profesor", "profesoară", "pauză", "lecții", "teme",
        ],
    ),
    (
        "prieteni",
        &["prieten", "prietenă", "prietenie", "colegi", "coleg", "joacă", "împreună"],
    ),
    (
        "bullying",
        &[
            "bullying", "tachinat", "jignit", "jigniri", "batjocură", "exclus", "singur",
            "respins",
        ],
    ),
    (
        "familie",
        &[
            "familie", "acasă", "mama", "tata", "părinte", "părinți", "frate", "soră", "bunici",
            "cină", "dor",
        ],
    ),
    (
        "esec",
        &[
            "eșec", "greșeală", "greșeli", "ratat", "pierdut", "cădere", "încercăm", "din nou",
            "nu a ieșit",
        ],
    ),
    (
        "tristete",
        &[
            "tristețe", "trist", "tristă", "plâns", "lacrimi", "supărat", "supărată", "dor",
            "greu",
        ],
    ),
    (
        "furie",
        &["furie", "supărare", "nervos", "nervoasă", "ceartă", "frustrare", "respiră"],
    ),
    (
        "singuratate",
        &["singurătate", "singur", "singură", "izolat", "neînțeles", "nimeni", "exclus"],
    ),
    (
        "curaj",
        &["curaj", "curajos", "curajoasă", "puternic", "puternică", "ridici", "încearcă"],
    ),
    (
        "iubire",
        &["iubire", "iubesc", "drag", "dragoste", "îmbrățișare", "recunoscător", "inimă"],
    ),
    (
        "incredere",
        &[
            "încredere", "stimă", "mândru", "mândră", "capabil", "capabilă", "poți", "reușești",
        ],
    ),
    (
        "succes",
        &["succes", "reușită", "reușit", "victorie", "bravo", "felicitări", "mândru"],
    ),
    (
        "oboseala",
        &["oboseală", "obosit", "obosită", "epuizat", "odihnă", "somn", "pauză"],
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct SynonymEntry {
    key: String,
    synonyms: Vec<String>,
}

/// Immutable concept dictionary. Keys and synonyms are stored normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymTable {
    entries: Vec<SynonymEntry>,
}

impl SynonymTable {
    /// The dictionary shipped with the application.
    pub fn builtin() -> &'static SynonymTable {
        &BUILTIN
    }

    /// A table with no entries; expansion then yields only the query itself.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: &[(&str, &[&str])]) -> Self {
        let entries = entries
            .iter()
            .map(|(key, synonyms)| SynonymEntry {
                key: normalize(key),
                synonyms: synonyms.iter().map(|s| normalize(s)).collect(),
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical concept keys, in table order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Normalized synonyms for a canonical key.
    pub fn synonyms_of(&self, key: &str) -> Option<&[String]> {
        let key = normalize(key);
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.synonyms.as_slice())
    }

    /// Search terms for `query`: the normalized query first, then every
    /// synonym of every entry whose key or any synonym contains it.
    ///
    /// A blank query expands to nothing.
    pub fn expand(&self, query: &str) -> IndexSet<String> {
        let q = normalize(query.trim());
        let mut terms = IndexSet::new();
        if q.is_empty() {
            return terms;
        }
        terms.insert(q.clone());

        for entry in &self.entries {
            let touches = entry.key.contains(&q) || entry.synonyms.iter().any(|s| s.contains(&q));
            if touches {
                terms.extend(entry.synonyms.iter().cloned());
            }
        }

        tracing::debug!(query = %q, terms = terms.len(), "expanded search query");
        terms
    }
}

/// [`SynonymTable::expand`] over the built-in table.
pub fn expand_query(query: &str) -> IndexSet<String> {
    SynonymTable::builtin().expand(query)
}
