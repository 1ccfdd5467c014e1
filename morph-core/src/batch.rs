//! # Processamento em Lote
//!
//! Sentenças são independentes entre si, então um corpus inteiro pode ser desambiguado
//! em paralelo com Rayon. Cada sentença passa pelas quatro passagens exatamente como no
//! caminho sequencial; nada é salvo aqui, quem chama decide o que persistir a partir dos
//! relatórios.

use rayon::prelude::*;
use tracing::info;

use crate::disambiguator::{AutoDisambiguator, DisambiguationReport, EventSink};
use crate::sentence::Sentence;

/// Desambigua todas as sentenças; os relatórios saem na mesma ordem da entrada.
pub fn disambiguate_batch<D>(disambiguator: &D, sentences: &mut [Sentence]) -> Vec<DisambiguationReport>
where
    D: AutoDisambiguator + Sync,
{
    let reports: Vec<DisambiguationReport> = sentences
        .par_iter_mut()
        .map(|sentence| disambiguator.run_passes(sentence, &EventSink::silent()))
        .collect();

    let modified = reports.iter().filter(|r| r.modified()).count();
    let unresolved: usize = reports.iter().map(|r| r.unresolved).sum();
    info!(sentences = reports.len(), modified, unresolved, "lote desambiguado");
    reports
}
