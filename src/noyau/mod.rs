//! Noyau d’évaluation
//!
//! Organisation interne :
//! - jetons.rs   : tokenisation (× ÷ normalisés, noms au plus long préfixe)
//! - symboles.rs : table fixe des constantes et fonctions
//! - expr.rs     : arbre d’expression f64
//! - analyse.rs  : pré-passe parenthèses + montée de priorité
//! - calcul.rs   : évaluation f64 + garde finale
//! - format.rs   : affichage (12 chiffres significatifs)
//! - erreurs.rs  : LexError / ParseError / EvalError / EvaluationError
//! - eval.rs     : pipeline complet

pub mod analyse;
pub mod calcul;
pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod symboles;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreurs::EvaluationError;
pub use eval::{eval_expression, eval_expression_detaillee, DemarcheNoyau};
