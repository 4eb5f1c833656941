// src/noyau/analyse.rs
//
// Jetons -> Expr (montée de priorité / precedence climbing)
//
// Priorités (de la plus faible à la plus forte):
//   1. + -        (gauche)
//   2. * /        (gauche)
//   3. ^          (droite)
//   4. ! %        (postfixes, gauche à droite) : 5!^2 = (5!)^2
//   5. - préfixe  : -3! = (-3)!, -2^2 = (-2)^2
//   6. primaire   : nombre, constante, f( expr ), ( expr )
//
// Garde-fous:
// - pré-passe d’équilibre des parenthèses AVANT toute analyse structurelle
// - profondeur de récursion et hauteur d’arbre bornées (pas de débordement de pile)
// - une chaîne à plat (1+1+...+1) n’est pas de l’imbrication : sa branche gauche
//   est parcourue en boucle (Expr::epine_gauche), elle ne compte pas dans la hauteur

use tracing::trace;

use super::erreurs::ParseError;
use super::expr::{Expr, OpBinaire, OpPostfixe};
use super::jetons::Tok;
use super::symboles::Symbole;

/// Imbrication maximale (parenthèses, moins préfixe, puissances à droite).
const PROFONDEUR_MAX: usize = 256;

/// Hauteur maximale de l’arbre produit, branches gauches des chaînes binaires exclues
/// (borne la récursion de l’évaluateur et de l’affichage).
const HAUTEUR_MAX: usize = 1024;

fn precedence(op: OpBinaire) -> u8 {
    match op {
        OpBinaire::Add | OpBinaire::Sub => 1,
        OpBinaire::Mul | OpBinaire::Div => 2,
        OpBinaire::Pow => 3,
    }
}

fn is_right_associative(op: OpBinaire) -> bool {
    matches!(op, OpBinaire::Pow)
}

/// Pré-passe : compteur de profondeur jamais négatif, nul à la fin.
pub fn verifier_parentheses(tokens: &[Tok]) -> Result<(), ParseError> {
    let mut profondeur: usize = 0;
    for t in tokens {
        match t {
            Tok::LPar => profondeur += 1,
            Tok::RPar => {
                profondeur = profondeur
                    .checked_sub(1)
                    .ok_or(ParseError::UnbalancedParens)?;
            }
            _ => {}
        }
    }
    if profondeur != 0 {
        return Err(ParseError::UnbalancedParens);
    }
    Ok(())
}

/// Construit l’arbre d’une suite de jetons complète.
pub fn parse(tokens: &[Tok]) -> Result<Expr, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    verifier_parentheses(tokens)?;

    let mut a = Analyseur {
        tokens,
        pos: 0,
        profondeur: 0,
    };
    let racine = a.expression(1)?;

    if a.pos < tokens.len() {
        trace!(position = a.pos, "jetons restants après l’expression");
        return Err(ParseError::TrailingInput);
    }
    Ok(racine.expr)
}

/// Expr + hauteur déjà calculée (évite de re-parcourir l’arbre).
/// Hauteur = récursion nécessaire pour parcourir l’arbre, épine gauche en boucle.
struct Noeud {
    expr: Expr,
    haut: usize,
}

impl Noeud {
    fn feuille(expr: Expr) -> Noeud {
        Noeud { expr, haut: 1 }
    }

    fn parent(expr: Expr, haut_enfant: usize) -> Result<Noeud, ParseError> {
        Noeud::borne(expr, haut_enfant + 1)
    }

    fn borne(expr: Expr, haut: usize) -> Result<Noeud, ParseError> {
        if haut > HAUTEUR_MAX {
            return Err(ParseError::NestingTooDeep);
        }
        Ok(Noeud { expr, haut })
    }
}

struct Analyseur<'a> {
    tokens: &'a [Tok],
    pos: usize,
    profondeur: usize,
}

impl<'a> Analyseur<'a> {
    fn peek(&self) -> Option<&'a Tok> {
        self.tokens.get(self.pos)
    }

    fn avancer(&mut self) -> Option<&'a Tok> {
        let t = self.tokens.get(self.pos);
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn descendre(&mut self) -> Result<(), ParseError> {
        self.profondeur += 1;
        if self.profondeur > PROFONDEUR_MAX {
            return Err(ParseError::NestingTooDeep);
        }
        Ok(())
    }

    fn remonter(&mut self) {
        self.profondeur -= 1;
    }

    /// Opérateurs binaires de priorité >= `prec_min`.
    fn expression(&mut self, prec_min: u8) -> Result<Noeud, ParseError> {
        let mut gauche = self.postfixe()?;

        while let Some(Tok::Op(c)) = self.peek() {
            let op = OpBinaire::depuis_char(*c).ok_or(ParseError::MissingOperand)?;
            let prec = precedence(op);
            if prec < prec_min {
                break;
            }
            self.pos += 1;

            let prec_droite = if is_right_associative(op) {
                prec
            } else {
                prec + 1
            };

            self.descendre()?;
            let droite = self.expression(prec_droite);
            self.remonter();
            let droite = droite?;

            let haut = gauche.haut.max(droite.haut + 1);
            gauche = Noeud::borne(Expr::binaire(op, gauche.expr, droite.expr), haut)?;
        }

        Ok(gauche)
    }

    /// Opérande suivi de zéro ou plusieurs ! / %.
    fn postfixe(&mut self) -> Result<Noeud, ParseError> {
        let mut n = self.unaire()?;

        while let Some(Tok::Postfix(c)) = self.peek() {
            let op = OpPostfixe::depuis_char(*c).ok_or(ParseError::MissingOperand)?;
            self.pos += 1;
            n = Noeud::parent(Expr::postfixe(op, n.expr), n.haut)?;
        }

        Ok(n)
    }

    /// Moins préfixe (répétable : --5 = 5).
    fn unaire(&mut self) -> Result<Noeud, ParseError> {
        if let Some(Tok::Op('-')) = self.peek() {
            self.pos += 1;

            self.descendre()?;
            let operande = self.unaire();
            self.remonter();
            let operande = operande?;

            return Noeud::parent(Expr::neg(operande.expr), operande.haut);
        }
        self.primaire()
    }

    fn primaire(&mut self) -> Result<Noeud, ParseError> {
        let tok = self.avancer().ok_or(ParseError::MissingOperand)?;

        match tok {
            Tok::Num(v) => Ok(Noeud::feuille(Expr::Literal(*v))),

            Tok::Ident(nom) => match Symbole::depuis_nom(nom) {
                Some(Symbole::Constante(c)) => Ok(Noeud::feuille(Expr::Constant { name: c })),
                Some(Symbole::Fonction(f)) => {
                    // f doit être suivie de '(' : "sin 2" n’a pas d’argument
                    if !matches!(self.peek(), Some(Tok::LPar)) {
                        return Err(ParseError::MissingOperand);
                    }
                    self.pos += 1;
                    let arg = self.groupe()?;
                    Noeud::parent(Expr::appel(f, arg.expr), arg.haut)
                }
                None => Err(ParseError::MissingOperand),
            },

            Tok::LPar => self.groupe(),

            // Opérateur sans opérande gauche, postfixe orphelin, ')' prématurée
            Tok::Op(_) | Tok::Postfix(_) | Tok::RPar => Err(ParseError::MissingOperand),
        }
    }

    /// Contenu d’un groupe, '(' déjà consommée ; exige la ')' correspondante.
    fn groupe(&mut self) -> Result<Noeud, ParseError> {
        self.descendre()?;
        let interieur = self.expression(1);
        self.remonter();
        let interieur = interieur?;

        match self.avancer() {
            Some(Tok::RPar) => Ok(interieur),
            Some(_) => Err(ParseError::TrailingInput),
            None => Err(ParseError::UnbalancedParens),
        }
    }
}
