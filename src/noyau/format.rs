// src/noyau/format.rs
//
// Affichage du résultat (transformation d’affichage uniquement, jamais pendant le calcul).
// - |v| < 1e-10          => 0 (bruit flottant)
// - entier et |v| < 1e15 => sans point décimal
// - sinon                => arrondi à 12 chiffres significatifs, plus courte écriture décimale
//                           (égalité exacte : vers le plus grand module, 0.5 -> 1)
// - ±∞ / NaN              => "Error" (jamais "inf" ni "NaN" à l’écran)
//
// Jamais de notation exponentielle : la sortie reste une entrée valide pour le lexer.

use super::erreurs::EvaluationError;

/// En dessous : considéré comme zéro.
const SEUIL_ZERO: f64 = 1e-10;

/// Au-delà : un entier passe aussi par l’arrondi à 12 chiffres.
const LIMITE_ENTIER: f64 = 1e15;

const CHIFFRES_SIGNIFICATIFS: usize = 12;

/// Assez de décimales pour l’écriture exacte de tout f64 (767 chiffres significatifs au plus).
const CHIFFRES_EXACTS: usize = 800;

/// Valeur f64 -> texte d’affichage.
pub fn format_value(v: f64) -> String {
    if !v.is_finite() {
        return EvaluationError::INDICATEUR.to_string();
    }

    let v = if v.abs() < SEUIL_ZERO { 0.0 } else { v };

    if v.fract() == 0.0 && v.abs() < LIMITE_ENTIER {
        return format!("{v}");
    }

    format!("{}", arrondi_significatif(v))
}

/// Arrondi décimal à 12 chiffres significatifs, demi vers le plus grand module.
///
/// `{:.11e}` arrondit les égalités au pair (123456789012.5 -> ...012) : on part donc de
/// l’écriture exacte et on ne regarde que le 13e chiffre.
fn arrondi_significatif(v: f64) -> f64 {
    let exacte = format!("{:.*e}", CHIFFRES_EXACTS, v.abs());
    let Some((mantisse, exposant)) = exacte.split_once('e') else {
        return v;
    };
    let Ok(mut exposant) = exposant.parse::<i32>() else {
        return v;
    };

    let chiffres: Vec<u32> = mantisse.chars().filter_map(|c| c.to_digit(10)).collect();
    let mut gardes = chiffres[..CHIFFRES_SIGNIFICATIFS].to_vec();

    if chiffres[CHIFFRES_SIGNIFICATIFS] >= 5 {
        // retenue ; 999…9 + 1 => 100…0 avec un exposant de plus
        match gardes.iter().rposition(|&d| d != 9) {
            Some(i) => {
                gardes[i] += 1;
                gardes[i + 1..].iter_mut().for_each(|d| *d = 0);
            }
            None => {
                gardes.iter_mut().for_each(|d| *d = 0);
                gardes[0] = 1;
                exposant += 1;
            }
        }
    }

    let texte: String = gardes
        .iter()
        .filter_map(|&d| char::from_digit(d, 10))
        .collect();
    let arrondi = format!("{}.{}e{exposant}", &texte[..1], &texte[1..])
        .parse::<f64>()
        .unwrap_or(v.abs());

    if v < 0.0 {
        -arrondi
    } else {
        arrondi
    }
}
