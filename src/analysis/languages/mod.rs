//! Language-specific analyser implementations.

mod java;
mod python;

pub use java::JavaAnalyser;
pub use python::PythonAnalyser;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use super::LanguageAnalyser;
use crate::error::AnalyserError;

/// Builds a fresh analyser instance.
pub type AnalyserFactory = fn() -> Box<dyn LanguageAnalyser>;

/// Languages with a built-in analyser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Java,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Java => "java",
        }
    }

    /// Factory for this language's analyser.
    pub fn factory(&self) -> AnalyserFactory {
        match self {
            Language::Python => python_analyser,
            Language::Java => java_analyser,
        }
    }
}

fn python_analyser() -> Box<dyn LanguageAnalyser> {
    Box::new(PythonAnalyser::new())
}

fn java_analyser() -> Box<dyn LanguageAnalyser> {
    Box::new(JavaAnalyser::new())
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = AnalyserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "python" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            other => Err(AnalyserError::Config(format!(
                "unknown language '{}' (expected python or java)",
                other
            ))),
        }
    }
}

lazy_static! {
    /// Built-in extension map. Keys carry the leading dot.
    static ref DEFAULT_EXTENSIONS: HashMap<&'static str, Language> = {
        let mut m = HashMap::new();
        m.insert(".py", Language::Python);
        m.insert(".java", Language::Java);
        m
    };
}

/// The built-in extension to factory map, as a fresh owned copy.
pub fn default_factories() -> HashMap<String, AnalyserFactory> {
    DEFAULT_EXTENSIONS
        .iter()
        .map(|(ext, lang)| (ext.to_string(), lang.factory()))
        .collect()
}

/// Language registered for an extension in the built-in map.
pub fn language_for_extension(ext: &str) -> Option<Language> {
    DEFAULT_EXTENSIONS.get(ext).copied()
}
