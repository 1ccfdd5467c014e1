//! # Erros
//!
//! A desambiguação em si nunca falha: uma palavra que nenhuma regra resolve apenas
//! continua ambígua. Os erros abaixo cobrem as fronteiras do motor: entrada vinda do
//! analisador, carga da tabela de regras, configuração e persistência.

use std::path::PathBuf;

use thiserror::Error;

/// Falha ao interpretar uma análise do analisador morfológico.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("análise sem etiquetas: {analysis:?}")]
    MissingTags { analysis: String },
    #[error("análise sem raiz: {analysis:?}")]
    EmptyRoot { analysis: String },
    #[error("grupo flexional vazio em {analysis:?}")]
    EmptyGroup { analysis: String },
    #[error("etiqueta desconhecida {tag:?} em {analysis:?}")]
    UnknownTag { tag: String, analysis: String },
    #[error("análise escolhida {index} fora do conjunto de {len} candidatos")]
    ChosenOutOfRange { index: usize, len: usize },
}

/// Falha ao carregar ou validar a tabela de regras.
#[derive(Debug, Error)]
pub enum RuleTableError {
    #[error("tabela de regras inválida: {0}")]
    Json(#[from] serde_json::Error),
    #[error("não foi possível ler {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("assinatura malformada: {signature:?}")]
    MalformedSignature { signature: String },
    #[error("etiqueta desconhecida {tag:?} na assinatura {signature:?}")]
    UnknownTag { signature: String, tag: String },
    #[error("assinatura duplicada: {signature:?}")]
    DuplicateSignature { signature: String },
    #[error("regra sem escolhas: {signature:?}")]
    EmptyRule { signature: String },
    #[error("a escolha {choice:?} não é uma alternativa de {signature:?}")]
    ForeignChoice { signature: String, choice: String },
}

/// Falha ao carregar a configuração.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("não foi possível ler {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("configuração inválida: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Rules(#[from] RuleTableError),
}

/// Falha do armazenamento de sentenças.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("falha de E/S ao salvar a sentença: {0}")]
    Io(#[from] std::io::Error),
    #[error("falha ao serializar a sentença: {0}")]
    Json(#[from] serde_json::Error),
}

/// Único erro que a orquestração pode devolver: a persistência falhou.
#[derive(Debug, Error)]
pub enum DisambiguationError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
