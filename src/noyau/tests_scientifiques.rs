//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : trouver les limites sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//!
//! Notes :
//! - Les angles sont en radians ; les angles “spéciaux” (π/6, π/4…) ne sont exacts qu’à
//!   l’arrondi d’affichage près, c’est l’affichage à 12 chiffres qui est comparé.
//! - Idempotence : un résultat affiché, relu par le pipeline, redonne le même texte.

use std::time::{Duration, Instant};

use proptest::prelude::*;

use super::eval_expression;
use super::erreurs::{EvalError, EvaluationError, ParseError};

fn eval_ok(expr: &str) -> String {
    eval_expression(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_affiche(expr: &str, attendu: &str) {
    assert_eq!(eval_ok(expr), attendu, "expr={expr:?}");
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Invariants trig (angles spéciaux) ------------------------ */

#[test]
fn sci_angles_speciaux() {
    assert_affiche("sin(π/6)", "0.5");
    assert_affiche("cos(π/3)", "0.5");
    assert_affiche("tan(π/4)", "1");
    assert_affiche("sin(π)", "0");
    assert_affiche("cos(π)", "-1");
    assert_affiche("sin(π/4)", "0.707106781187");
}

#[test]
fn sci_identites_symetrie() {
    for x in ["0.3", "0.7", "1.2", "2.9"] {
        // sin(-x) = -sin(x)
        let s = eval_ok(&format!("sin({x})"));
        assert_affiche(&format!("sin(-{x})"), &format!("-{s}"));

        // cos(-x) = cos(x)
        let c = eval_ok(&format!("cos({x})"));
        assert_affiche(&format!("cos(-{x})"), &c);
    }
}

#[test]
fn sci_periodicite_angles() {
    // sin(x + 2π) = sin(x) : π/6 + 2π
    assert_affiche("sin(π/6+2*π)", "0.5");

    // cos(x + 2π) = cos(x) : π/3 + 2π
    assert_affiche("cos(π/3+2*π)", "0.5");

    // tan(x + π) = tan(x) : π/4 + π
    assert_affiche("tan(π/4+π)", "1");
}

#[test]
fn sci_reciproques() {
    assert_affiche("asin(sin(0.5))", "0.5");
    assert_affiche("acos(cos(1))", "1");
    assert_affiche("atan(tan(-0.25))", "-0.25");
    assert_affiche("ln(e^3)", "3");
    assert_affiche("log(10^-4)", "-4");
    assert_affiche("sqrt(2)^2", "2");
}

#[test]
fn sci_propagation_erreur_domaine() {
    // l’erreur de domaine doit contaminer toute l’expression
    for expr in ["1 + asin(2)", "asin(2) + 1", "2 * sqrt(-1)", "ln(-5) / 3", "(-1.5)!"] {
        match eval_expression(expr) {
            Err(EvaluationError::Eval(EvalError::DomainError { .. })) => {}
            autre => panic!("expr={expr:?} attendu DomainError, obtenu {autre:?}"),
        }
    }
}

/* ------------------------ Factorielle : bornes ------------------------ */

#[test]
fn sci_factorielle_bornes() {
    assert_affiche("10!", "3628800");
    assert_affiche("17!", "355687428096000");
    // 18! dépasse 1e15 : arrondi à 12 chiffres
    assert_affiche("18!", "6402373705730000");

    assert!(eval_expression("170!").is_ok());
    assert_eq!(
        eval_expression("171!"),
        Err(EvaluationError::Eval(EvalError::Overflow { operation: "!" }))
    );
    assert_eq!(
        eval_expression("1/171!"),
        Err(EvaluationError::Eval(EvalError::Overflow { operation: "!" }))
    );
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_profondeur_sqrt_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // sqrt(4) -> 2 ; (2)^2 -> 4 ; etc. On alterne pour rester exact.
    let mut expr = "4".to_string();
    for k in 0..60 {
        expr = if k % 2 == 0 {
            format!("sqrt({expr})")
        } else {
            format!("({expr})^2")
        };
        budget(t0, max);
    }

    assert_affiche(&expr, "4");
}

#[test]
fn sci_stress_taille_somme_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut expr = String::new();
    for k in 0..80 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("1/2");
        budget(t0, max);
    }

    // 80*(1/2)=40
    assert_affiche(&expr, "40");
}

#[test]
fn sci_stress_grand_litteral() {
    // 400 chiffres : dépasse f64 dès la lecture, la garde finale répond
    let big = "9".repeat(400);
    assert_eq!(
        eval_expression(&big),
        Err(EvaluationError::Eval(EvalError::NonFinite))
    );

    // 100 chiffres : fini, arrondi à 12 chiffres
    let big = format!("{}/7", "9".repeat(100));
    let r = eval_ok(&big);
    assert!(r.starts_with("142857142857"), "r={r}");
}

#[test]
fn sci_imbrication_excessive_refusee() {
    let expr = format!("{}2{}", "sqrt(".repeat(300), ")".repeat(300));
    assert_eq!(
        eval_expression(&expr),
        Err(EvaluationError::Parse(ParseError::NestingTooDeep))
    );
}

/* ------------------------ Propriétés (proptest) ------------------------ */

fn atome() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..1000).prop_map(|n| n.to_string()),
        (0u32..1000, 1u32..1000).prop_map(|(a, b)| format!("{a}.{b}")),
        Just("π".to_string()),
        Just("e".to_string()),
        (0u32..12).prop_map(|n| format!("{n}!")),
        (0u32..200).prop_map(|n| format!("{n}%")),
        (0u32..500).prop_map(|n| format!("sqrt({n})")),
        (0u32..500).prop_map(|n| format!("sin({n})")),
        (1u32..500).prop_map(|n| format!("ln({n})")),
    ]
}

fn expression() -> impl Strategy<Value = String> {
    let op = prop::sample::select(vec!['+', '-', '*', '/', '×', '÷']);
    (atome(), prop::collection::vec((op, atome()), 0..6)).prop_map(|(tete, queue)| {
        let mut s = tete;
        for (op, a) in queue {
            s.push(op);
            s.push_str(&a);
        }
        s
    })
}

fn piece() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "1", "2.5", "+", "-", "*", "/", "^", "!", "%", "sin", "π", "e", "(", ")",
    ])
}

/// true si le compteur devient négatif ou ne revient pas à zéro.
fn desequilibre(pieces: &[&str]) -> bool {
    let mut profondeur: i64 = 0;
    for p in pieces {
        match *p {
            "(" => profondeur += 1,
            ")" => {
                profondeur -= 1;
                if profondeur < 0 {
                    return true;
                }
            }
            _ => {}
        }
    }
    profondeur != 0
}

proptest! {
    #[test]
    fn prop_affichage_idempotent(expr in expression()) {
        if let Ok(r) = eval_expression(&expr) {
            let v: f64 = r.parse().expect("affichage numérique");
            if v.abs() < 1e15 {
                prop_assert_eq!(eval_expression(&r), Ok(r.clone()), "expr={}", expr);
            }
        }
    }

    #[test]
    fn prop_parentheses_desequilibrees(pieces in prop::collection::vec(piece(), 1..30)) {
        prop_assume!(desequilibre(&pieces));
        let texte = pieces.join(" ");
        prop_assert_eq!(
            eval_expression(&texte),
            Err(EvaluationError::Parse(ParseError::UnbalancedParens)),
            "texte={}", texte
        );
    }

    #[test]
    fn prop_jamais_de_valeur_non_finie(expr in expression()) {
        if let Ok(r) = eval_expression(&expr) {
            let v: f64 = r.parse().expect("affichage numérique");
            prop_assert!(v.is_finite(), "expr={} r={}", expr, r);
        }
    }
}
