//! src/app/etat.rs
//!
//! État de session (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, affichage, erreur, démarche,
//! historique, mémoire) et offrir les actions simples (C, MC/MR/M+/M-/MS).
//!
//! Contrats :
//! - L’évaluation elle-même est déléguée au noyau (fonction pure).
//! - Historique en mémoire seulement, plus récent d’abord, borné.
//! - Un échec n’entre jamais dans l’historique.

use std::collections::VecDeque;

use tracing::{info, warn};

use crate::noyau::erreurs::EvalError;
use crate::noyau::format::format_value;
use crate::noyau::{eval_expression_detaillee, DemarcheNoyau, EvaluationError};

/// Taille d’historique par défaut.
pub const HISTORIQUE_MAX_DEFAUT: usize = 50;

/// Affichage au repos.
const AFFICHAGE_INITIAL: &str = "0";

#[derive(Clone, Debug, PartialEq)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: String,
}

#[derive(Clone, Debug)]
pub struct Session {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub affichage: String,                // résultat formaté, ou "Error"
    pub erreur: Option<EvaluationError>,  // détail de l’échec (journal / tests)
    pub demarche: Option<DemarcheNoyau>,  // jetons, arbre, valeur brute

    historique: VecDeque<EntreeHistorique>,
    historique_max: usize,

    memoire: f64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(HISTORIQUE_MAX_DEFAUT)
    }
}

impl Session {
    pub fn new(historique_max: usize) -> Self {
        Self {
            entree: String::new(),
            affichage: AFFICHAGE_INITIAL.to_string(),
            erreur: None,
            demarche: None,
            historique: VecDeque::new(),
            historique_max,
            memoire: 0.0,
        }
    }

    /* ------------------------ Évaluation ------------------------ */

    /// "=" : évalue l’entrée ; succès => historique, échec => "Error" à l’affichage.
    pub fn evaluer(&mut self, entree: &str) -> Result<String, EvaluationError> {
        self.entree = entree.trim().to_string();

        match eval_expression_detaillee(&self.entree) {
            Ok(d) => {
                self.affichage = d.affichage.clone();
                self.erreur = None;
                self.ajouter_historique(self.entree.clone(), d.affichage.clone());
                self.demarche = Some(d);
                Ok(self.affichage.clone())
            }
            Err(e) => {
                self.affichage = EvaluationError::INDICATEUR.to_string();
                self.erreur = Some(e.clone());
                self.demarche = None;
                Err(e)
            }
        }
    }

    /// C : remet l’entrée et l’affichage à zéro (historique et mémoire conservés).
    pub fn effacer(&mut self) {
        self.entree.clear();
        self.affichage = AFFICHAGE_INITIAL.to_string();
        self.erreur = None;
        self.demarche = None;
    }

    /// Valeur numérique de l’affichage ; "Error" ou vide comptent pour 0.
    pub fn valeur_affichee(&self) -> f64 {
        self.affichage
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    /* ------------------------ Historique ------------------------ */

    fn ajouter_historique(&mut self, expression: String, resultat: String) {
        self.historique.push_front(EntreeHistorique {
            expression,
            resultat,
        });
        self.historique.truncate(self.historique_max);
    }

    /// Plus récent d’abord.
    pub fn historique(&self) -> impl Iterator<Item = &EntreeHistorique> {
        self.historique.iter()
    }

    pub fn effacer_historique(&mut self) {
        self.historique.clear();
        info!("historique effacé");
    }

    /* ------------------------ Mémoire ------------------------ */

    pub fn memoire(&self) -> f64 {
        self.memoire
    }

    /// MC
    pub fn memoire_effacer(&mut self) {
        self.memoire = 0.0;
        info!("mémoire effacée");
    }

    /// MR : la mémoire passe à l’affichage.
    pub fn memoire_rappeler(&mut self) -> &str {
        self.affichage = format_value(self.memoire);
        self.erreur = None;
        &self.affichage
    }

    /// M+
    pub fn memoire_ajouter(&mut self) -> Result<(), EvaluationError> {
        self.memoire_ajuster(self.memoire + self.valeur_affichee(), "M+")
    }

    /// M-
    pub fn memoire_soustraire(&mut self) -> Result<(), EvaluationError> {
        self.memoire_ajuster(self.memoire - self.valeur_affichee(), "M-")
    }

    /// MS
    pub fn memoire_stocker(&mut self) {
        self.memoire = self.valeur_affichee();
        info!(memoire = self.memoire, "MS");
    }

    /// Le registre reste fini : un débordement laisse l’ancienne valeur et affiche "Error".
    fn memoire_ajuster(&mut self, nouvelle: f64, action: &str) -> Result<(), EvaluationError> {
        if !nouvelle.is_finite() {
            let e = EvaluationError::from(EvalError::NonFinite);
            self.affichage = EvaluationError::INDICATEUR.to_string();
            self.erreur = Some(e.clone());
            warn!(memoire = self.memoire, action, "mémoire : résultat non fini refusé");
            return Err(e);
        }
        self.memoire = nouvelle;
        info!(memoire = self.memoire, "{action}");
        Ok(())
    }
}
