// src/main.rs
//
// Calculatrice à étapes — point d’entrée terminal
// ------------------------------------------------
// - eval <expr> [--json] : une évaluation, code de sortie 1 si erreur
// - trace <expr>         : démarche pas à pas
// - repl (défaut)        : boucle ligne à ligne (voir :aide)
//
// Journal sur stderr : RUST_LOG prioritaire, sinon "warn" (ou "debug" avec --verbose).

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use calculatrice_etapes::app::{AppCalc, Historique, Sortie};
use calculatrice_etapes::app::etat::AFFICHAGE_ERREUR;
use calculatrice_etapes::config::Config;
use calculatrice_etapes::noyau::{evaluer, formater, tracer_brut, Reponse};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Fichier de configuration (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Démarche pas à pas dans la boucle interactive
    #[arg(short, long, global = true)]
    etapes: bool,

    /// Journal détaillé sur stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Ni lecture ni écriture du fichier d’historique
    #[arg(long, global = true)]
    sans_historique: bool,

    #[command(subcommand)]
    commande: Option<Mode>,
}

#[derive(Subcommand)]
enum Mode {
    /// Évalue une expression et affiche le résultat formaté
    Eval {
        expr: String,
        /// Réponse discriminée en JSON
        #[arg(long)]
        json: bool,
    },
    /// Affiche la démarche pas à pas
    Trace { expr: String },
    /// Boucle interactive
    Repl,
}

fn initialiser_journal(verbose: bool) {
    let defaut = if verbose { "debug" } else { "warn" };
    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(defaut));
    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_writer(io::stderr)
        .init();
}

fn eval(expr: &str, json: bool) -> Result<ExitCode> {
    let resultat = evaluer(expr);

    if json {
        let reponse = Reponse::from(&resultat);
        println!("{}", serde_json::to_string(&reponse)?);
    } else {
        match &resultat {
            Ok(v) => println!("{}", formater(*v)),
            Err(e) => {
                println!("{AFFICHAGE_ERREUR}");
                eprintln!("{e}");
            }
        }
    }

    Ok(if resultat.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn trace(expr: &str) {
    for ligne in tracer_brut(expr) {
        println!("{ligne}");
    }
}

fn repl(config: &Config, persister: bool) -> Result<()> {
    let historique = if persister {
        config.charger_historique().unwrap_or_else(|e| {
            warn!("historique ignoré : {e:#}");
            Historique::avec_limite(config.limite_historique)
        })
    } else {
        Historique::avec_limite(config.limite_historique)
    };
    info!(entrees = historique.len(), "historique chargé");

    let mut calc = AppCalc::new(historique, config.mode_etapes);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    writeln!(stdout, "Calculatrice à étapes (:aide pour l’aide, :q pour quitter)")?;
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut ligne = String::new();
        if stdin.lock().read_line(&mut ligne).context("lecture de l’entrée")? == 0 {
            break;
        }

        match calc.executer(&ligne) {
            Sortie::Afficher(texte) => writeln!(stdout, "{texte}")?,
            Sortie::AfficherEtSauver(texte) => {
                writeln!(stdout, "{texte}")?;
                if persister {
                    if let Err(e) = config.sauver_historique(&calc.historique) {
                        warn!("sauvegarde de l’historique : {e:#}");
                    }
                }
            }
            Sortie::Quitter => break,
        }
    }

    debug!("fin de session");
    Ok(())
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::charger(cli.config.as_deref())?;
    config.mode_etapes |= cli.etapes;
    debug!(?config, "configuration");

    match cli.commande.unwrap_or(Mode::Repl) {
        Mode::Eval { expr, json } => eval(&expr, json),
        Mode::Trace { expr } => {
            trace(&expr);
            Ok(ExitCode::SUCCESS)
        }
        Mode::Repl => {
            repl(&config, !cli.sans_historique)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    initialiser_journal(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Erreur : {e:#}");
            ExitCode::FAILURE
        }
    }
}
