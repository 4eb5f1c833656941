// src/noyau/expr.rs
//
// Arbre d’expression (f64).
// - Chaque noeud possède ses enfants (Box) : arbre strict, sans partage ni cycle.
// - Créé à chaque évaluation puis jeté.

use std::fmt;
use std::mem;

use super::symboles::{Constante, Fonction};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl OpBinaire {
    pub fn depuis_char(c: char) -> Option<OpBinaire> {
        match c {
            '+' => Some(OpBinaire::Add),
            '-' => Some(OpBinaire::Sub),
            '*' => Some(OpBinaire::Mul),
            '/' => Some(OpBinaire::Div),
            '^' => Some(OpBinaire::Pow),
            _ => None,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            OpBinaire::Add => '+',
            OpBinaire::Sub => '-',
            OpBinaire::Mul => '*',
            OpBinaire::Div => '/',
            OpBinaire::Pow => '^',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpUnaire {
    Neg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpPostfixe {
    Factorielle, // !
    Pourcent,    // %
}

impl OpPostfixe {
    pub fn depuis_char(c: char) -> Option<OpPostfixe> {
        match c {
            '!' => Some(OpPostfixe::Factorielle),
            '%' => Some(OpPostfixe::Pourcent),
            _ => None,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            OpPostfixe::Factorielle => '!',
            OpPostfixe::Pourcent => '%',
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(f64),
    Constant {
        name: Constante,
    },

    BinaryOp {
        op: OpBinaire,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    UnaryOp {
        op: OpUnaire,
        operand: Box<Expr>,
    },
    PostfixOp {
        op: OpPostfixe,
        operand: Box<Expr>,
    },
    FunctionCall {
        name: Fonction,
        argument: Box<Expr>,
    },
}

impl Expr {
    pub fn binaire(op: OpBinaire, left: Expr, right: Expr) -> Expr {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn neg(operand: Expr) -> Expr {
        Expr::UnaryOp {
            op: OpUnaire::Neg,
            operand: Box::new(operand),
        }
    }

    pub fn postfixe(op: OpPostfixe, operand: Expr) -> Expr {
        Expr::PostfixOp {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn appel(name: Fonction, argument: Expr) -> Expr {
        Expr::FunctionCall {
            name,
            argument: Box::new(argument),
        }
    }

    /// Chaîne gauche d’opérations binaires : ((a∘b)∘c)∘d => (a, [(∘,b), (∘,c), (∘,d)]).
    /// Parcours en boucle : une longue somme à plat ne coûte pas de pile.
    pub fn epine_gauche(&self) -> (&Expr, Vec<(OpBinaire, &Expr)>) {
        let mut droites = Vec::new();
        let mut e = self;
        while let Expr::BinaryOp { op, left, right } = e {
            droites.push((*op, right.as_ref()));
            e = left.as_ref();
        }
        droites.reverse();
        (e, droites)
    }
}

/// Libération sans récursion (arbres très profonds à gauche).
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pile = Vec::new();
        detacher_enfants(self, &mut pile);
        while let Some(mut e) = pile.pop() {
            detacher_enfants(&mut e, &mut pile);
        }
    }
}

fn detacher_enfants(e: &mut Expr, pile: &mut Vec<Expr>) {
    let vider = |b: &mut Box<Expr>| mem::replace(b.as_mut(), Expr::Literal(0.0));
    match e {
        Expr::Literal(_) | Expr::Constant { .. } => {}
        Expr::BinaryOp { left, right, .. } => {
            pile.push(vider(left));
            pile.push(vider(right));
        }
        Expr::UnaryOp { operand, .. } | Expr::PostfixOp { operand, .. } => pile.push(vider(operand)),
        Expr::FunctionCall { argument, .. } => pile.push(vider(argument)),
    }
}

/// Affichage entièrement parenthésé (démarche) : la structure est lisible sans règles de priorité.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(v) => write!(f, "{v}"),
            Expr::Constant { name } => write!(f, "{name}"),
            Expr::BinaryOp { .. } => {
                let (tete, droites) = self.epine_gauche();
                for _ in &droites {
                    f.write_str("(")?;
                }
                write!(f, "{tete}")?;
                for (op, droite) in droites {
                    write!(f, "{}{droite})", op.symbole())?;
                }
                Ok(())
            }
            Expr::UnaryOp {
                op: OpUnaire::Neg,
                operand,
            } => write!(f, "(-{operand})"),
            Expr::PostfixOp { op, operand } => write!(f, "({operand}{})", op.symbole()),
            Expr::FunctionCall { name, argument } => write!(f, "{name}({argument})"),
        }
    }
}
