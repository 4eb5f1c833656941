// src/noyau/erreurs.rs
//
// Erreurs du noyau, une famille par étape du pipeline.
// Toutes terminales pour un appel : jamais de nouvel essai.

use thiserror::Error;

/// Erreurs de tokenisation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("caractère inattendu '{caractere}' (position {position})")]
    InvalidCharacter { caractere: char, position: usize },

    /// Deux points décimaux dans un même nombre, ou un point seul.
    #[error("nombre mal formé '{texte}' (position {position})")]
    MalformedNumber { texte: String, position: usize },

    #[error("nom inconnu '{nom}' (position {position})")]
    UnknownIdentifier { nom: String, position: usize },
}

/// Erreurs de structure (analyse syntaxique).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("parenthèses non équilibrées")]
    UnbalancedParens,

    #[error("opérande manquant")]
    MissingOperand,

    #[error("jetons en trop après l’expression")]
    TrailingInput,

    #[error("entrée vide")]
    EmptyInput,

    #[error("imbrication trop profonde")]
    NestingTooDeep,
}

/// Erreurs d’évaluation numérique.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Résultat final ±∞ ou NaN (ex: 10/0).
    #[error("résultat non fini")]
    NonFinite,

    #[error("argument hors domaine pour {operation}")]
    DomainError { operation: &'static str },

    /// Factorielle au-delà de 170 : dépasse f64.
    #[error("dépassement de capacité : {operation}")]
    Overflow { operation: &'static str },
}

/// Erreur unique de la frontière `eval_expression`.
///
/// L’appelant affiche `INDICATEUR` ; le détail reste disponible pour le journal et les tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("lecture : {0}")]
    Lex(#[from] LexError),

    #[error("analyse : {0}")]
    Parse(#[from] ParseError),

    #[error("calcul : {0}")]
    Eval(#[from] EvalError),
}

impl EvaluationError {
    /// Marqueur d’erreur affiché à l’utilisateur, quel que soit le type.
    pub const INDICATEUR: &'static str = "Error";
}
