// src/config.rs
//
// Configuration facultative (TOML).
// Emplacement par défaut : <config_dir>/calculatrice-sci/config.toml
//
// Toutes les clés sont facultatives :
//   historique_max = 50
//   demarche = false
//   journal = "warn"

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::app::etat::HISTORIQUE_MAX_DEFAUT;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Nombre d’entrées gardées dans l’historique de session.
    pub historique_max: usize,
    /// Afficher la démarche (jetons, arbre) à chaque évaluation.
    pub demarche: bool,
    /// Filtre de journal par défaut si RUST_LOG est absent.
    pub journal: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            historique_max: HISTORIQUE_MAX_DEFAUT,
            demarche: false,
            journal: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn chemin_defaut() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("calculatrice-sci").join("config.toml"))
    }

    /// Charge `chemin` s’il est donné (absent => erreur), sinon le chemin par défaut
    /// (absent => valeurs par défaut).
    pub fn charger(chemin: Option<&Path>) -> anyhow::Result<Config> {
        let (chemin, explicite) = match chemin {
            Some(c) => (c.to_path_buf(), true),
            None => match Self::chemin_defaut() {
                Some(c) => (c, false),
                None => return Ok(Config::default()),
            },
        };

        let texte = match fs::read_to_string(&chemin) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound && !explicite => {
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("lecture impossible : {}", chemin.display()));
            }
        };

        Self::depuis_toml(&texte)
            .with_context(|| format!("configuration invalide : {}", chemin.display()))
    }

    pub fn depuis_toml(texte: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(texte)
    }
}
