//! Calculatrice scientifique : évaluation d’expressions infixes en f64.
//!
//! - `noyau` : lecture, analyse, calcul, affichage (fonctions pures)
//! - `app`   : session (historique, mémoire) + dictée
//! - `config`: fichier TOML facultatif
//!
//! Contrat d’affichage : un résultat formaté (12 chiffres significatifs) ou "Error".

pub mod app;
pub mod config;
pub mod noyau;

pub use noyau::{eval_expression, EvaluationError};
