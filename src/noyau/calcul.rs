// src/noyau/calcul.rs
//
// Évaluation f64 de l’arbre.
// - Arithmétique IEEE-754 : 10/0 n’est pas empêché, l’infini est capté à la fin.
// - Fonctions : NaN obtenu à partir d’un argument non-NaN => DomainError.
// - Factorielle : entiers >= 0 seulement, 170 au plus (171! dépasse f64).
// - Garde finale : jamais de ±∞/NaN rendu à l’appelant.

use num_bigint::BigUint;
use num_traits::ToPrimitive;

use super::erreurs::EvalError;
use super::expr::{Expr, OpBinaire, OpPostfixe, OpUnaire};

/// Plus grand n tel que n! reste fini en f64.
const FACTORIELLE_MAX: f64 = 170.0;

/// Évalue l’arbre ; le résultat `Ok` est toujours fini.
pub fn evaluate(expr: &Expr) -> Result<f64, EvalError> {
    let v = evaluer_noeud(expr)?;
    if !v.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(v)
}

fn evaluer_noeud(expr: &Expr) -> Result<f64, EvalError> {
    use Expr::*;

    match expr {
        Literal(v) => Ok(*v),
        Constant { name } => Ok(name.valeur()),

        // Épine gauche en boucle : ((a∘b)∘c)∘d, a d’abord puis b, c, d
        BinaryOp { .. } => {
            let (tete, droites) = expr.epine_gauche();
            let mut acc = evaluer_noeud(tete)?;
            for (op, droite) in droites {
                let b = evaluer_noeud(droite)?;
                acc = binaire(op, acc, b);
            }
            Ok(acc)
        }

        UnaryOp {
            op: OpUnaire::Neg,
            operand,
        } => Ok(-evaluer_noeud(operand)?),

        PostfixOp { op, operand } => {
            let a = evaluer_noeud(operand)?;
            match op {
                OpPostfixe::Factorielle => factorielle(a),
                OpPostfixe::Pourcent => Ok(a / 100.0),
            }
        }

        FunctionCall { name, argument } => {
            let x = evaluer_noeud(argument)?;
            let y = name.appliquer(x);
            if y.is_nan() && !x.is_nan() {
                return Err(EvalError::DomainError {
                    operation: name.nom(),
                });
            }
            Ok(y)
        }
    }
}

fn binaire(op: OpBinaire, a: f64, b: f64) -> f64 {
    match op {
        OpBinaire::Add => a + b,
        OpBinaire::Sub => a - b,
        OpBinaire::Mul => a * b,
        OpBinaire::Div => a / b,
        OpBinaire::Pow => a.powf(b),
    }
}

/// n! exact (big int) puis un seul arrondi vers f64.
fn factorielle(n: f64) -> Result<f64, EvalError> {
    // NaN amont : la garde finale s’en charge
    if n.is_nan() {
        return Ok(n);
    }
    if n > FACTORIELLE_MAX {
        return Err(EvalError::Overflow { operation: "!" });
    }
    if n < 0.0 || n.fract() != 0.0 {
        return Err(EvalError::DomainError { operation: "!" });
    }

    let k = n as u32;
    let produit: BigUint = (2..=k).map(BigUint::from).product();
    produit
        .to_f64()
        .ok_or(EvalError::Overflow { operation: "!" })
}
