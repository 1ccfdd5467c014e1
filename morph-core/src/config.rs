//! # Configuração
//!
//! ```json
//! { "single_root_pass": true, "multiple_root_pass": false, "rules_path": "regras.json" }
//! ```
//!
//! Todos os campos são opcionais; o que faltar assume o padrão.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rules::RuleTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisambiguatorConfig {
    /// Liga a passagem de palavras com uma única raiz.
    pub single_root_pass: bool,
    /// Liga a passagem de palavras com raízes diferentes.
    pub multiple_root_pass: bool,
    /// Tabela de regras alternativa; `None` usa a embutida.
    pub rules_path: Option<PathBuf>,
}

impl Default for DisambiguatorConfig {
    fn default() -> Self {
        Self {
            single_root_pass: true,
            multiple_root_pass: true,
            rules_path: None,
        }
    }
}

impl DisambiguatorConfig {
    /// Só as duas primeiras passagens: o que as regras não resolvem fica ambíguo.
    pub fn rules_only() -> Self {
        Self {
            single_root_pass: false,
            multiple_root_pass: false,
            rules_path: None,
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn load_rules(&self) -> Result<RuleTable, ConfigError> {
        match &self.rules_path {
            Some(path) => Ok(RuleTable::from_path(path)?),
            None => Ok(RuleTable::builtin()),
        }
    }
}
