// src/noyau/jetons.rs

use super::erreurs::LexError;
use super::symboles::NOMS;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // + - * / ^  (× et ÷ sont déjà normalisés en * et /)
    Op(char),

    // Fonction ou constante, nom canonique (minuscules, "π" pour pi)
    Ident(String),

    LPar,
    RPar,

    // ! (factorielle) ou % (pourcentage)
    Postfix(char),
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5, 5.) : au plus un point par nombre
/// - opérateurs + - * / ^, et × ÷ (symboles d’affichage)
/// - postfixes ! %
/// - parenthèses ( )
/// - noms fixes (plus long préfixe) : sin cos tan asin acos atan log ln sqrt abs π e (pi = π)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, LexError> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            '+' | '-' | '*' | '/' | '^' => {
                out.push(Tok::Op(c));
                i += 1;
                continue;
            }
            '×' => {
                out.push(Tok::Op('*'));
                i += 1;
                continue;
            }
            '÷' => {
                out.push(Tok::Op('/'));
                i += 1;
                continue;
            }
            '!' | '%' => {
                out.push(Tok::Postfix(c));
                i += 1;
                continue;
            }
            _ => {}
        }

        // Nombre : [0-9.]+ avec au plus un point
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let texte: String = chars[start..i].iter().collect();
            let mal_forme = || LexError::MalformedNumber {
                texte: texte.clone(),
                position: start,
            };

            if texte.matches('.').count() > 1 || texte == "." {
                return Err(mal_forme());
            }
            let v = texte.parse::<f64>().map_err(|_| mal_forme())?;
            out.push(Tok::Num(v));
            continue;
        }

        // Noms : plus long préfixe connu, insensible à la casse
        if c.is_ascii_alphabetic() || c == 'π' {
            match nom_en_tete(&chars[i..]) {
                Some(nom) => {
                    let canon = if nom == "pi" { "π" } else { nom };
                    out.push(Tok::Ident(canon.to_string()));
                    i += nom.chars().count();
                }
                None => {
                    let fin = chars[i..]
                        .iter()
                        .position(|ch| !ch.is_ascii_alphabetic())
                        .map_or(chars.len(), |p| i + p);
                    return Err(LexError::UnknownIdentifier {
                        nom: chars[i..fin].iter().collect(),
                        position: i,
                    });
                }
            }
            continue;
        }

        return Err(LexError::InvalidCharacter {
            caractere: c,
            position: i,
        });
    }

    Ok(out)
}

/// Plus long nom connu au début de `reste` (NOMS est trié du plus long au plus court).
fn nom_en_tete(reste: &[char]) -> Option<&'static str> {
    NOMS.iter().copied().find(|nom| {
        let n = nom.chars().count();
        reste.len() >= n
            && nom
                .chars()
                .zip(reste.iter())
                .all(|(a, b)| a == b.to_ascii_lowercase())
    })
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Op(c) | Tok::Postfix(c) => c.to_string(),
            Tok::Ident(name) => name.clone(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
