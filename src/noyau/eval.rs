//! Noyau — évaluation (pipeline réel)
//!
//! texte -> jetons -> pré-passe parenthèses -> Expr -> f64 (garde finale) -> affichage
//!
//! Fonction pure : aucun état conservé entre deux appels.

use tracing::debug;

use super::analyse::parse;
use super::calcul::evaluate;
use super::erreurs::EvaluationError;
use super::format::format_value;
use super::jetons::{format_tokens, tokenize};

#[derive(Default, Clone, Debug, PartialEq)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub arbre: String,
    pub valeur: f64,
    pub affichage: String,
}

/// API publique : évalue une expression et retourne le texte d’affichage.
///
/// En cas d’échec, l’appelant affiche `EvaluationError::INDICATEUR` ;
/// le type précis reste dans l’erreur.
pub fn eval_expression(expr_str: &str) -> Result<String, EvaluationError> {
    eval_expression_detaillee(expr_str).map(|d| d.affichage)
}

/// Comme `eval_expression`, avec la démarche (jetons, arbre, valeur brute).
pub fn eval_expression_detaillee(expr_str: &str) -> Result<DemarcheNoyau, EvaluationError> {
    let resultat = pipeline(expr_str);
    if let Err(e) = &resultat {
        debug!(entree = expr_str, erreur = %e, "évaluation refusée");
    }
    resultat
}

fn pipeline(expr_str: &str) -> Result<DemarcheNoyau, EvaluationError> {
    // 1) Jetons
    let jetons = tokenize(expr_str)?;
    let jetons_txt = format_tokens(&jetons);
    debug!(jetons = %jetons_txt, "tokenisation");

    // 2) Arbre (pré-passe parenthèses incluse)
    let expr = parse(&jetons)?;
    let arbre_txt = expr.to_string();
    debug!(arbre = %arbre_txt, "analyse");

    // 3) Valeur (toujours finie ici)
    let valeur = evaluate(&expr)?;

    // 4) Affichage
    let affichage = format_value(valeur);
    debug!(valeur, affichage = %affichage, "résultat");

    Ok(DemarcheNoyau {
        jetons: jetons_txt,
        arbre: arbre_txt,
        valeur,
        affichage,
    })
}
