//! # Análises Candidatas
//!
//! O analisador de estados finitos entrega, para cada ocorrência de palavra, uma ou mais
//! análises no formato de **lista de transições**:
//!
//! ```text
//! kitap+NOUN+A3SG+PNON+GEN
//! gel+VERB+POS+AOR^DB+ADJ+ZERO
//! ```
//!
//! - O primeiro segmento é a raiz lexical.
//! - `^DB+` marca uma fronteira de derivação e separa os **grupos flexionais**.
//!
//! O motor precisa das duas formas: a lista achatada (para casar substrings das regras)
//! e a estrutura em grupos (para perguntar classe gramatical, plural, presença de etiqueta).

use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::ParseError;
use crate::tag::MorphologicalTag;

/// Separador de grupos flexionais dentro da lista de transições.
pub const DERIVATION_BOUNDARY: &str = "^DB+";

/// Um grupo flexional: sequência de etiquetas entre duas fronteiras de derivação.
///
/// Só nasce de [`CandidateParse::new`], que rejeita grupos vazios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InflectionalGroup {
    tags: Vec<MorphologicalTag>,
}

impl InflectionalGroup {
    pub fn tags(&self) -> &[MorphologicalTag] {
        &self.tags
    }

    pub fn contains(&self, tag: MorphologicalTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Classe gramatical do grupo: a primeira etiqueta de classe, ou a primeira etiqueta.
    pub fn pos(&self) -> MorphologicalTag {
        self.tags
            .iter()
            .copied()
            .find(MorphologicalTag::is_part_of_speech)
            .unwrap_or(self.tags[0])
    }
}

/// Uma análise morfológica candidata para uma ocorrência de palavra.
///
/// Imutável depois de construída. A raiz, a forma de superfície e a lista de transições
/// ficam guardadas exatamente como o analisador as produziu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateParse {
    root: String,
    surface: String,
    transition_list: String,
    groups: Vec<InflectionalGroup>,
}

impl CandidateParse {
    /// Constrói a análise a partir da forma de superfície e da lista de transições.
    ///
    /// # Erros
    /// - [`ParseError::MissingTags`] se não houver `+` depois da raiz.
    /// - [`ParseError::EmptyRoot`] se a raiz for vazia.
    /// - [`ParseError::EmptyGroup`] se uma fronteira `^DB+` não for seguida de etiquetas.
    /// - [`ParseError::UnknownTag`] para etiquetas fora do conjunto fechado.
    pub fn new(surface: impl Into<String>, transition_list: impl Into<String>) -> Result<Self, ParseError> {
        let transition_list = transition_list.into();
        let split = transition_list.find('+').ok_or_else(|| ParseError::MissingTags {
            analysis: transition_list.clone(),
        })?;
        let (root, rest) = (&transition_list[..split], &transition_list[split + 1..]);
        if root.is_empty() {
            return Err(ParseError::EmptyRoot {
                analysis: transition_list.clone(),
            });
        }

        let mut groups = Vec::new();
        for chunk in rest.split(DERIVATION_BOUNDARY) {
            let mut tags = Vec::new();
            for label in chunk.split('+').filter(|l| !l.is_empty()) {
                let tag = MorphologicalTag::from_label(label).ok_or_else(|| ParseError::UnknownTag {
                    tag: label.to_string(),
                    analysis: transition_list.clone(),
                })?;
                tags.push(tag);
            }
            if tags.is_empty() {
                return Err(ParseError::EmptyGroup {
                    analysis: transition_list.clone(),
                });
            }
            groups.push(InflectionalGroup { tags });
        }

        Ok(Self {
            root: root.to_string(),
            surface: surface.into(),
            transition_list,
            groups,
        })
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn surface_form(&self) -> &str {
        &self.surface
    }

    /// Lista de transições achatada, incluindo a raiz (ex: `"kitap+NOUN+A3SG+PNON+GEN"`).
    pub fn transition_list(&self) -> &str {
        &self.transition_list
    }

    pub fn groups(&self) -> &[InflectionalGroup] {
        &self.groups
    }

    /// Número de grupos flexionais (1 + número de derivações).
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    fn last_group(&self) -> &InflectionalGroup {
        // `new` garante ao menos um grupo
        &self.groups[self.groups.len() - 1]
    }

    /// Classe gramatical do último grupo flexional.
    pub fn pos(&self) -> MorphologicalTag {
        self.last_group().pos()
    }

    /// Classe final no estilo do analisador: `"PROP"` para nomes próprios.
    pub fn final_pos(&self) -> &'static str {
        if self.last_group().contains(MorphologicalTag::ProperNoun) {
            MorphologicalTag::ProperNoun.as_str()
        } else {
            self.pos().as_str()
        }
    }

    pub fn contains_tag(&self, tag: MorphologicalTag) -> bool {
        self.groups.iter().any(|g| g.contains(tag))
    }

    pub fn is_noun(&self) -> bool {
        self.pos() == MorphologicalTag::Noun
    }

    /// Verdadeiro se algum grupo tiver concordância de plural.
    pub fn is_plural(&self) -> bool {
        self.groups
            .iter()
            .any(|g| g.tags().iter().any(MorphologicalTag::is_plural_agreement))
    }

    /// A forma de superfície começa com maiúscula (ex: "Ocak", "ABD").
    pub fn is_capital_word(&self) -> bool {
        self.surface
            .graphemes(true)
            .next()
            .map(|g| g.chars().any(char::is_uppercase))
            .unwrap_or(false)
    }
}

/// Todas as análises candidatas de uma ocorrência de palavra.
///
/// A ordem é a do analisador e nunca é alterada aqui; o motor apenas escolhe um elemento.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    parses: Vec<CandidateParse>,
}

impl CandidateSet {
    pub fn new(parses: Vec<CandidateParse>) -> Self {
        Self { parses }
    }

    /// Interpreta várias listas de transições para a mesma forma de superfície.
    pub fn from_analyses<S: AsRef<str>>(surface: &str, analyses: &[S]) -> Result<Self, ParseError> {
        let parses = analyses
            .iter()
            .map(|a| CandidateParse::new(surface, a.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { parses })
    }

    pub fn len(&self) -> usize {
        self.parses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parses.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CandidateParse> {
        self.parses.get(index)
    }

    pub fn first(&self) -> Option<&CandidateParse> {
        self.parses.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CandidateParse> {
        self.parses.iter()
    }

    pub fn surface_form(&self) -> Option<&str> {
        self.first().map(CandidateParse::surface_form)
    }

    /// Raízes distintas, na ordem em que aparecem.
    pub fn root_words(&self) -> Vec<&str> {
        let mut roots: Vec<&str> = Vec::new();
        for parse in &self.parses {
            if !roots.contains(&parse.root()) {
                roots.push(parse.root());
            }
        }
        roots
    }

    /// Candidato com a raiz mais longa (em caracteres); o primeiro vence em empate.
    pub fn parse_with_longest_root(&self) -> Option<(usize, &CandidateParse)> {
        let mut best: Option<(usize, &CandidateParse)> = None;
        for (i, parse) in self.parses.iter().enumerate() {
            let len = parse.root().chars().count();
            match best {
                Some((_, b)) if b.root().chars().count() >= len => {}
                _ => best = Some((i, parse)),
            }
        }
        best
    }

    /// Listas de transições, na ordem do analisador.
    pub fn transition_lists(&self) -> Vec<&str> {
        self.parses.iter().map(CandidateParse::transition_list).collect()
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a CandidateParse;
    type IntoIter = std::slice::Iter<'a, CandidateParse>;

    fn into_iter(self) -> Self::IntoIter {
        self.parses.iter()
    }
}
