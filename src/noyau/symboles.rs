// src/noyau/symboles.rs
//
// Table des symboles (fixe) : constantes nommées + fonctions unaires.
// - Angles en radians.
// - log = log10, ln = logarithme naturel.

use std::f64::consts;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => consts::PI,
            Constante::E => consts::E,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Constante::Pi => "π",
            Constante::E => "e",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
    Ln,
    Sqrt,
    Abs,
}

impl Fonction {
    /// Sémantique mathématique standard (f64).
    /// Hors domaine => NaN ; c’est l’évaluateur qui en fait une erreur typée.
    pub fn appliquer(self, x: f64) -> f64 {
        match self {
            Fonction::Sin => x.sin(),
            Fonction::Cos => x.cos(),
            Fonction::Tan => x.tan(),
            Fonction::Asin => x.asin(),
            Fonction::Acos => x.acos(),
            Fonction::Atan => x.atan(),
            Fonction::Log => x.log10(),
            Fonction::Ln => x.ln(),
            Fonction::Sqrt => x.sqrt(),
            Fonction::Abs => x.abs(),
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Asin => "asin",
            Fonction::Acos => "acos",
            Fonction::Atan => "atan",
            Fonction::Log => "log",
            Fonction::Ln => "ln",
            Fonction::Sqrt => "sqrt",
            Fonction::Abs => "abs",
        }
    }
}

impl fmt::Display for Fonction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nom())
    }
}

impl fmt::Display for Constante {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nom())
    }
}

/// Ce qu’un nom désigne.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbole {
    Constante(Constante),
    Fonction(Fonction),
}

/// Noms reconnus par le lexer, du plus long au plus court (plus long préfixe d’abord).
/// "pi" est l’orthographe ASCII de π.
pub const NOMS: &[&str] = &[
    "asin", "acos", "atan", "sqrt", "sin", "cos", "tan", "log", "abs", "ln", "pi", "π", "e",
];

impl Symbole {
    /// Résout un nom canonique (minuscules).
    pub fn depuis_nom(nom: &str) -> Option<Symbole> {
        use Symbole::{Constante as C, Fonction as F};

        let s = match nom {
            "π" | "pi" => C(Constante::Pi),
            "e" => C(Constante::E),
            "sin" => F(Fonction::Sin),
            "cos" => F(Fonction::Cos),
            "tan" => F(Fonction::Tan),
            "asin" => F(Fonction::Asin),
            "acos" => F(Fonction::Acos),
            "atan" => F(Fonction::Atan),
            "log" => F(Fonction::Log),
            "ln" => F(Fonction::Ln),
            "sqrt" => F(Fonction::Sqrt),
            "abs" => F(Fonction::Abs),
            _ => return None,
        };
        Some(s)
    }
}
