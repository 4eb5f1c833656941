// src/main.rs
//
// Calculatrice scientifique — point d’entrée en ligne de commande
// ----------------------------------------------------------------
// - Avec des arguments : une seule évaluation, résultat ou "Error" (code 1 ; de même pour
//   une dictée incomplète ou incomprise)
// - Sans argument      : boucle sur l’entrée standard (une ligne = une commande)
//
// Journal sur stderr (RUST_LOG prioritaire sur la configuration).

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use calculatrice_sci::app::{Options, Reponse, Session};
use calculatrice_sci::config::Config;

#[derive(Parser, Debug)]
#[command(name = "calculatrice-sci", version, about = "Calculatrice scientifique en ligne de commande")]
struct Args {
    /// Expression à évaluer (les mots sont joints par des espaces)
    expression: Vec<String>,

    /// Afficher les jetons et l’arbre avant le résultat
    #[arg(long)]
    demarche: bool,

    /// Lire l’entrée comme une dictée ("two plus three")
    #[arg(long)]
    dictee: bool,

    /// Fichier de configuration (TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/* ------------------------ Journal ------------------------ */

fn installer_journal(niveau: &str) {
    let filtre = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(niveau))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/* ------------------------ Entrée ------------------------ */

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let config = Config::charger(args.config.as_deref())?;

    installer_journal(&config.journal);
    debug!(?config, "configuration chargée");

    let options = Options {
        demarche: args.demarche || config.demarche,
        dictee: args.dictee,
    };
    let mut session = Session::new(config.historique_max);

    if !args.expression.is_empty() {
        return Ok(une_fois(&mut session, &args.expression.join(" "), options));
    }

    boucle(&mut session, options)?;
    Ok(ExitCode::SUCCESS)
}

/// Échec (erreur, dictée incomplète ou incomprise) => code 1.
fn une_fois(session: &mut Session, ligne: &str, options: Options) -> ExitCode {
    let reponse = session.traiter_ligne(ligne, options);
    if let Reponse::Afficher(texte) | Reponse::Echec(texte) = &reponse {
        println!("{texte}");
    }

    if reponse.est_echec() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn boucle(session: &mut Session, options: Options) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let interactif = stdin.is_terminal();
    let mut sortie = io::stdout().lock();

    let mut lignes = stdin.lock().lines();
    loop {
        if interactif {
            write!(sortie, "> ")?;
            sortie.flush()?;
        }

        let Some(ligne) = lignes.next() else { break };
        let ligne = ligne.context("lecture de l’entrée standard")?;

        match session.traiter_ligne(&ligne, options) {
            Reponse::Afficher(texte) | Reponse::Echec(texte) => writeln!(sortie, "{texte}")?,
            Reponse::Rien => {}
            Reponse::Quitter => break,
        }
    }

    Ok(())
}
