//! # Persistência
//!
//! O orquestrador só conhece a capacidade `save`. Quem guarda, e onde, é problema do
//! chamador: memória nos testes e no serviço, arquivo JSON para uso em linha de comando.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::StoreError;
use crate::sentence::Sentence;

pub trait SentenceStore {
    fn save(&mut self, sentence: &Sentence) -> Result<(), StoreError>;
}

/// Guarda uma cópia de cada sentença salva.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    snapshots: Vec<Sentence>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantas vezes `save` foi chamado.
    pub fn saves(&self) -> usize {
        self.snapshots.len()
    }

    pub fn last(&self) -> Option<&Sentence> {
        self.snapshots.last()
    }

    pub fn snapshots(&self) -> &[Sentence] {
        &self.snapshots
    }
}

impl SentenceStore for InMemoryStore {
    fn save(&mut self, sentence: &Sentence) -> Result<(), StoreError> {
        self.snapshots.push(sentence.clone());
        Ok(())
    }
}

/// Escreve a sentença como JSON formatado, sobrescrevendo o arquivo.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SentenceStore for JsonFileStore {
    fn save(&mut self, sentence: &Sentence) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(sentence)?;
        std::fs::write(&self.path, json)?;
        info!(path = %self.path.display(), words = sentence.len(), "sentença salva");
        Ok(())
    }
}
