//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : entiers + - * / et parenthèses => même résultat qu’un calcul infixe de référence

use std::time::{Duration, Instant};

use super::erreurs::{EvalError, EvaluationError};
use super::eval_expression;
use super::format::format_value;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Référence infixe ------------------------ */

/// Expression générée + valeur calculée par la référence (* / avant + -, gauche à droite).
struct Genere {
    texte: String,
    valeur: f64,
}

fn gen_facteur(rng: &mut Rng, depth: u32) -> Genere {
    if depth == 0 || rng.pick(4) != 0 {
        let n = 1 + rng.pick(9);
        return Genere {
            texte: n.to_string(),
            valeur: f64::from(n),
        };
    }
    let interieur = gen_somme(rng, depth - 1);
    Genere {
        texte: format!("({})", interieur.texte),
        valeur: interieur.valeur,
    }
}

/// a (op b)* sans parenthèses superflues : la précédence est réellement testée.
fn gen_somme(rng: &mut Rng, depth: u32) -> Genere {
    let n = 1 + rng.pick(5) as usize;
    let facteurs: Vec<Genere> = (0..n).map(|_| gen_facteur(rng, depth)).collect();
    let ops: Vec<char> = (1..n)
        .map(|_| ['+', '-', '*', '/'][rng.pick(4) as usize])
        .collect();

    let mut texte = facteurs[0].texte.clone();
    for (op, f) in ops.iter().zip(&facteurs[1..]) {
        texte.push(*op);
        texte.push_str(&f.texte);
    }

    // 1) termes multiplicatifs
    let mut termes: Vec<f64> = vec![facteurs[0].valeur];
    let mut signes: Vec<char> = Vec::new();
    for (op, f) in ops.iter().zip(&facteurs[1..]) {
        match op {
            '*' => *termes.last_mut().unwrap() *= f.valeur,
            '/' => *termes.last_mut().unwrap() /= f.valeur,
            _ => {
                signes.push(*op);
                termes.push(f.valeur);
            }
        }
    }

    // 2) additifs, gauche à droite
    let mut valeur = termes[0];
    for (s, t) in signes.iter().zip(&termes[1..]) {
        if *s == '+' {
            valeur += t;
        } else {
            valeur -= t;
        }
    }

    Genere { texte, valeur }
}

/* ------------------------ Entrées arbitraires ------------------------ */

const ALPHABET: &[&str] = &[
    "1", "2", "7", "0", ".", "+", "-", "*", "/", "^", "!", "%", "(", ")", " ", "×", "÷", "π", "e",
    "sin", "cos", "tan", "asin", "log", "ln", "sqrt", "abs", "x", "$",
];

fn gen_bruit(rng: &mut Rng, longueur: u32) -> String {
    (0..longueur)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_arithmetique_conforme_reference() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        let g = gen_somme(&mut rng, 3);
        let obtenu = eval_expression(&g.texte);

        if g.valeur.is_finite() {
            assert_eq!(
                obtenu,
                Ok(format_value(g.valeur)),
                "expr={:?} ref={}",
                g.texte,
                g.valeur
            );
            seen_ok += 1;
        } else {
            // division par une sous-expression nulle
            assert_eq!(
                obtenu,
                Err(EvaluationError::Eval(EvalError::NonFinite)),
                "expr={:?}",
                g.texte
            );
            seen_err += 1;
        }
    }

    // On veut surtout des succès, le fuzz doit balayer la précédence.
    assert!(seen_ok > 300, "trop peu de succès: {seen_ok} (erreurs: {seen_err})");
}

#[test]
fn fuzz_safe_determinisme_et_resultat_fini() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..500 {
        budget(t0, max);

        let texte = if rng.coin() {
            let longueur = 1 + rng.pick(12);
            gen_bruit(&mut rng, longueur)
        } else {
            // un peu de structure (bruit court) pour obtenir aussi des succès
            let n = 1 + rng.pick(9);
            let longueur = 1 + rng.pick(3);
            format!("{n}+{}", gen_bruit(&mut rng, longueur))
        };

        let a = eval_expression(&texte);
        let b = eval_expression(&texte);
        assert_eq!(a, b, "non déterministe: {texte:?}");

        match a {
            Ok(r) => {
                let v: f64 = r
                    .parse()
                    .unwrap_or_else(|_| panic!("affichage non numérique {r:?} pour {texte:?}"));
                assert!(v.is_finite());
                seen_ok += 1;
            }
            Err(_) => seen_err += 1,
        }
    }

    assert!(seen_ok > 0, "aucun succès: fuzz trop “bruité”");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("1/2", 800);
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(eval_expression(&expr), Ok("400".to_string()));
}
