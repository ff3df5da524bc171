//! Configuration (TOML).
//!
//! Emplacement par défaut : `<config_dir>/calculatrice-etapes/config.toml`.
//! Fichier absent => valeurs par défaut. Chaque clé est optionnelle.
//!
//! ```toml
//! mode_etapes = true
//! limite_historique = 50
//! fichier_historique = "/tmp/historique.json"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::app::historique::{Historique, LIMITE_DEFAUT};

const DOSSIER: &str = "calculatrice-etapes";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mode_etapes: bool,
    pub limite_historique: usize,
    pub fichier_historique: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode_etapes: false,
            limite_historique: LIMITE_DEFAUT,
            fichier_historique: dirs::config_dir().map(|d| d.join(DOSSIER).join("historique.json")),
        }
    }
}

impl Config {
    pub fn chemin_defaut() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(DOSSIER).join("config.toml"))
    }

    /// Charge `chemin` (ou l’emplacement par défaut) ; absent => défauts.
    pub fn charger(chemin: Option<&Path>) -> Result<Self> {
        let chemin = match chemin.map(Path::to_path_buf).or_else(Self::chemin_defaut) {
            Some(c) => c,
            None => return Ok(Self::default()),
        };

        if !chemin.exists() {
            debug!(chemin = %chemin.display(), "pas de fichier de configuration");
            return Ok(Self::default());
        }

        let texte = fs::read_to_string(&chemin)
            .with_context(|| format!("lecture de {}", chemin.display()))?;
        Self::depuis_toml(&texte).with_context(|| format!("configuration invalide : {}", chemin.display()))
    }

    pub fn depuis_toml(texte: &str) -> Result<Self> {
        Ok(toml::from_str(texte)?)
    }

    /// Relit l’historique stocké ; fichier absent => historique vide.
    pub fn charger_historique(&self) -> Result<Historique> {
        let Some(chemin) = &self.fichier_historique else {
            return Ok(Historique::avec_limite(self.limite_historique));
        };
        if !chemin.exists() {
            return Ok(Historique::avec_limite(self.limite_historique));
        }

        let json = fs::read_to_string(chemin)
            .with_context(|| format!("lecture de {}", chemin.display()))?;
        Historique::from_json(&json, self.limite_historique)
            .with_context(|| format!("historique illisible : {}", chemin.display()))
    }

    pub fn sauver_historique(&self, historique: &Historique) -> Result<()> {
        let Some(chemin) = &self.fichier_historique else {
            return Ok(());
        };
        if let Some(parent) = chemin.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("création de {}", parent.display()))?;
        }
        fs::write(chemin, historique.to_json()?)
            .with_context(|| format!("écriture de {}", chemin.display()))
    }
}
