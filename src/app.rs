// src/app.rs
//
// Calculatrice — module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + dictee.rs)
// - Traduire une ligne saisie en commande (mémoire, historique, C, expression)
// - Exécuter la commande sur la Session et produire le texte à afficher
//
// Aucune I/O ici : main.rs lit/écrit, ce module ne fait que transformer.

pub mod dictee;
pub mod etat;

pub use dictee::{interpreter_dictee, Dictee};
pub use etat::Session;

use crate::noyau::EvaluationError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Commande {
    Evaluer(String),
    MemoireEffacer,
    MemoireRappeler,
    MemoireAjouter,
    MemoireSoustraire,
    MemoireStocker,
    Historique,
    EffacerHistorique,
    Effacer,
    Quitter,
}

impl Commande {
    /// Mots réservés (insensibles à la casse), sinon expression à évaluer.
    pub fn depuis_ligne(ligne: &str) -> Commande {
        let l = ligne.trim();
        match l.to_lowercase().as_str() {
            "mc" => Commande::MemoireEffacer,
            "mr" => Commande::MemoireRappeler,
            "m+" => Commande::MemoireAjouter,
            "m-" => Commande::MemoireSoustraire,
            "ms" => Commande::MemoireStocker,
            "historique" => Commande::Historique,
            "effacer-historique" => Commande::EffacerHistorique,
            "c" | "effacer" => Commande::Effacer,
            "q" | "quitter" => Commande::Quitter,
            _ => Commande::Evaluer(l.to_string()),
        }
    }
}

/// Options d’affichage de la boucle.
#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    pub demarche: bool,
    pub dictee: bool,
}

/// Ce que la boucle doit faire après une ligne.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reponse {
    Afficher(String),
    /// Rien n’a été calculé (erreur, dictée incomplète ou incomprise) : texte à afficher quand même.
    Echec(String),
    Rien,
    Quitter,
}

impl Reponse {
    /// Code de sortie 1 en mode une-fois.
    pub fn est_echec(&self) -> bool {
        matches!(self, Reponse::Echec(_))
    }
}

impl Session {
    /// Traite une ligne (dictée éventuelle, puis commande).
    pub fn traiter_ligne(&mut self, ligne: &str, options: Options) -> Reponse {
        if ligne.trim().is_empty() {
            return Reponse::Rien;
        }

        if options.dictee {
            match interpreter_dictee(ligne) {
                Dictee::Effacer => return self.executer(Commande::Effacer, options),
                Dictee::Incomprise => {
                    return Reponse::Echec("dictée incomprise".to_string());
                }
                Dictee::Expression {
                    texte,
                    complete: false,
                } => {
                    self.entree = texte;
                    return Reponse::Echec(format!("expression incomplète : {}", self.entree));
                }
                Dictee::Expression { texte, .. } => {
                    return self.executer(Commande::Evaluer(texte), options);
                }
            }
        }

        self.executer(Commande::depuis_ligne(ligne), options)
    }

    pub fn executer(&mut self, commande: Commande, options: Options) -> Reponse {
        match commande {
            Commande::Evaluer(texte) => match self.evaluer(&texte) {
                Ok(affichage) => {
                    if options.demarche {
                        Reponse::Afficher(format!("{}\n{affichage}", self.texte_demarche()))
                    } else {
                        Reponse::Afficher(affichage)
                    }
                }
                Err(e) if options.demarche => Reponse::Echec(format!(
                    "{}\n  ({e})",
                    EvaluationError::INDICATEUR
                )),
                Err(_) => Reponse::Echec(EvaluationError::INDICATEUR.to_string()),
            },

            Commande::MemoireEffacer => {
                self.memoire_effacer();
                Reponse::Rien
            }
            Commande::MemoireRappeler => Reponse::Afficher(self.memoire_rappeler().to_string()),
            Commande::MemoireAjouter => match self.memoire_ajouter() {
                Ok(()) => Reponse::Rien,
                Err(_) => Reponse::Echec(self.affichage.clone()),
            },
            Commande::MemoireSoustraire => match self.memoire_soustraire() {
                Ok(()) => Reponse::Rien,
                Err(_) => Reponse::Echec(self.affichage.clone()),
            },
            Commande::MemoireStocker => {
                self.memoire_stocker();
                Reponse::Rien
            }

            Commande::Historique => {
                let lignes: Vec<String> = self
                    .historique()
                    .map(|h| format!("{} = {}", h.expression, h.resultat))
                    .collect();
                if lignes.is_empty() {
                    Reponse::Afficher("(historique vide)".to_string())
                } else {
                    Reponse::Afficher(lignes.join("\n"))
                }
            }

            Commande::EffacerHistorique => {
                self.effacer_historique();
                Reponse::Rien
            }

            Commande::Effacer => {
                self.effacer();
                Reponse::Afficher(self.affichage.clone())
            }

            Commande::Quitter => Reponse::Quitter,
        }
    }

    fn texte_demarche(&self) -> String {
        match &self.demarche {
            Some(d) => format!(
                "  jetons : {}\n  arbre  : {}\n  valeur : {}",
                d.jetons, d.arbre, d.valeur
            ),
            None => String::new(),
        }
    }
}
