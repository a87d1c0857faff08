use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::{KnowledgeBase, KnowledgeError};
use crate::config;

/// Locations of the four knowledge files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeSources {
    pub critical_symptoms: PathBuf,
    pub department_keywords: PathBuf,
    pub doctors: PathBuf,
    pub disease_rules: PathBuf,
}

impl KnowledgeSources {
    /// Standard file names inside one directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            critical_symptoms: dir.join(config::CRITICAL_SYMPTOMS_FILE),
            department_keywords: dir.join(config::DEPARTMENT_KEYWORDS_FILE),
            doctors: dir.join(config::DOCTOR_MAP_FILE),
            disease_rules: dir.join(config::DISEASE_MAP_FILE),
        }
    }
}

/// JSON object decoded with its key order intact.
struct OrderedMap<V>(Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// Critical symptoms may be a plain list of phrases or an object keyed by
/// phrase (values are ignored).
#[derive(Deserialize)]
#[serde(untagged)]
enum CriticalList {
    Phrases(Vec<String>),
    Keyed(OrderedMap<serde_json::Value>),
}

impl CriticalList {
    fn into_phrases(self) -> Vec<String> {
        match self {
            CriticalList::Phrases(phrases) => phrases,
            CriticalList::Keyed(map) => map.0.into_iter().map(|(k, _)| k).collect(),
        }
    }
}

impl KnowledgeBase {
    /// Load all four mappings. A missing file yields an empty mapping for
    /// that piece; an unreadable or malformed file is an error.
    pub fn load(sources: &KnowledgeSources) -> Result<Self, KnowledgeError> {
        let mut kb = KnowledgeBase::new();

        if let Some(list) = read_optional::<CriticalList>(&sources.critical_symptoms)? {
            for phrase in list.into_phrases() {
                kb = kb.with_critical_phrase(&phrase);
            }
        }

        if let Some(map) = read_optional::<OrderedMap<Vec<String>>>(&sources.department_keywords)? {
            for (department, keywords) in map.0 {
                kb = kb.with_department(&department, keywords);
            }
        }

        if let Some(map) = read_optional::<OrderedMap<String>>(&sources.doctors)? {
            for (department, doctor) in map.0 {
                kb = kb.with_doctor(&department, &doctor);
            }
        }

        if let Some(map) = read_optional::<OrderedMap<OrderedMap<String>>>(&sources.disease_rules)? {
            for (department, rules) in map.0 {
                for (keyword, label) in rules.0 {
                    kb = kb.with_disease_rule(&department, &keyword, &label);
                }
            }
        }

        tracing::info!(
            critical_phrases = kb.critical_phrases().len(),
            departments = kb.departments().len(),
            doctors = kb.doctor_count(),
            disease_rules = kb.disease_rule_count(),
            "Knowledge base loaded"
        );

        Ok(kb)
    }

    /// Load from the standard file names in `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self, KnowledgeError> {
        Self::load(&KnowledgeSources::in_dir(dir))
    }
}

/// Read and decode a JSON file; `Ok(None)` when it does not exist.
fn read_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, KnowledgeError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "Knowledge file absent, using empty mapping");
            return Ok(None);
        }
        Err(source) => {
            return Err(KnowledgeError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| KnowledgeError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
