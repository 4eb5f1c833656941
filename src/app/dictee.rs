// src/app/dictee.rs
//
// Dictée : transcription parlée (anglais) -> texte de calculatrice.
// "two plus three" => "2+3"
//
// La capture audio n’est pas ici : on reçoit déjà le texte transcrit.

use lazy_static::lazy_static;
use regex::Regex;

/// Réécritures par mots entiers, appliquées dans l’ordre.
/// "natural log of" passe avant "log of" (sinon "natural" resterait collé).
const REECRITURES: &[(&str, &str)] = &[
    (r"\bplus\b|\badd\b", "+"),
    (r"\bminus\b|\bsubtract\b", "-"),
    (r"\btimes\b|\bmultiplied by\b|\bmultiply\b", "*"),
    (r"\bdivided by\b|\bdivide\b", "/"),
    (r"\bsquare root of\b|\bsqrt\b", "sqrt("),
    (r"\bsine of\b|\bsin\b", "sin("),
    (r"\bcosine of\b|\bcos\b", "cos("),
    (r"\btangent of\b|\btan\b", "tan("),
    (r"\bnatural log of\b|\bln of\b", "ln("),
    (r"\blog of\b|\blogarithm of\b", "log("),
    (r"\bpi\b", "π"),
    (r"\bto the power of\b|\bpower\b|\braise to\b", "^"),
    (r"\bfactorial\b", "!"),
    (r"\bpercent\b|\bpercentage\b", "%"),
    (r"\bopen parenthesis\b|\bopen bracket\b", "("),
    (r"\bclose parenthesis\b|\bclose bracket\b", ")"),
    (r"\bpoint\b|\bdot\b", "."),
    (r"\bequals\b|\bcalculate\b|\bcompute\b", ""),
    (r"\bzero\b", "0"),
    (r"\bone\b", "1"),
    (r"\btwo\b", "2"),
    (r"\bthree\b", "3"),
    (r"\bfour\b", "4"),
    (r"\bfive\b", "5"),
    (r"\bsix\b", "6"),
    (r"\bseven\b", "7"),
    (r"\beight\b", "8"),
    (r"\bnine\b", "9"),
];

lazy_static! {
    static ref MOTIFS: Vec<(Regex, &'static str)> = REECRITURES
        .iter()
        .map(|(motif, remplacement)| (Regex::new(motif).unwrap(), *remplacement))
        .collect();

    static ref ESPACES: Regex = Regex::new(r"\s+").unwrap();

    static ref COMMANDE_EFFACER: Regex = Regex::new(r"clear|reset").unwrap();
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dictee {
    /// "clear" / "reset"
    Effacer,

    /// Texte de calculatrice ; `complete` = parenthèses équilibrées (évaluation automatique).
    Expression { texte: String, complete: bool },

    /// Rien d’exploitable après réécriture.
    Incomprise,
}

/// Convertit une transcription en texte de calculatrice.
pub fn interpreter_dictee(transcription: &str) -> Dictee {
    let bas = transcription.to_lowercase();

    if COMMANDE_EFFACER.is_match(&bas) {
        return Dictee::Effacer;
    }

    let mut texte = bas;
    for (re, remplacement) in MOTIFS.iter() {
        texte = re.replace_all(&texte, *remplacement).into_owned();
    }
    let texte = ESPACES.replace_all(&texte, "").into_owned();

    if texte.is_empty() {
        return Dictee::Incomprise;
    }

    let ouvrantes = texte.matches('(').count();
    let fermantes = texte.matches(')').count();
    Dictee::Expression {
        complete: ouvrantes == fermantes,
        texte,
    }
}
