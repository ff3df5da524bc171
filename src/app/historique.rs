//! src/app/historique.rs
//!
//! Historique des calculs réussis.
//!
//! Contrats :
//! - le plus récent en tête
//! - plafonné (50 par défaut) : les plus anciens tombent
//! - identifiants strictement croissants, jamais réutilisés (même après suppression)
//! - sérialisable tel quel (serde) pour le stockage externe

use serde::{Deserialize, Serialize};

/// Plafond par défaut.
pub const LIMITE_DEFAUT: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntreeHistorique {
    pub id: u64,
    pub expression: String,
    pub resultat: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Historique {
    entrees: Vec<EntreeHistorique>,
    prochain_id: u64,
    #[serde(skip, default = "limite_defaut")]
    limite: usize,
}

fn limite_defaut() -> usize {
    LIMITE_DEFAUT
}

impl Default for Historique {
    fn default() -> Self {
        Self::avec_limite(LIMITE_DEFAUT)
    }
}

impl Historique {
    pub fn avec_limite(limite: usize) -> Self {
        Self {
            entrees: Vec::new(),
            prochain_id: 1,
            limite: limite.max(1),
        }
    }

    /// Applique un nouveau plafond (coupe immédiatement si besoin).
    pub fn set_limite(&mut self, limite: usize) {
        self.limite = limite.max(1);
        self.entrees.truncate(self.limite);
    }

    /// Ajoute en tête ; retourne l'id attribué.
    pub fn ajouter(&mut self, expression: impl Into<String>, resultat: impl Into<String>) -> u64 {
        let id = self.prochain_id;
        self.prochain_id += 1;

        self.entrees.insert(
            0,
            EntreeHistorique {
                id,
                expression: expression.into(),
                resultat: resultat.into(),
            },
        );
        self.entrees.truncate(self.limite);
        id
    }

    /// Retourne true si une entrée a été retirée.
    pub fn supprimer(&mut self, id: u64) -> bool {
        let avant = self.entrees.len();
        self.entrees.retain(|e| e.id != id);
        self.entrees.len() != avant
    }

    pub fn vider(&mut self) {
        self.entrees.clear();
    }

    pub fn trouver(&self, id: u64) -> Option<&EntreeHistorique> {
        self.entrees.iter().find(|e| e.id == id)
    }

    pub fn entrees(&self) -> &[EntreeHistorique] {
        &self.entrees
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Relit un historique stocké ; le plafond courant est réappliqué.
    pub fn from_json(json: &str, limite: usize) -> serde_json::Result<Self> {
        let mut h: Historique = serde_json::from_str(json)?;
        // garde-fou : un fichier édité à la main ne doit pas faire reculer les ids
        let max_id = h.entrees.iter().map(|e| e.id).max().unwrap_or(0);
        h.prochain_id = h.prochain_id.max(max_id + 1);
        h.set_limite(limite);
        Ok(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_recent_en_tete() {
        let mut h = Historique::default();
        h.ajouter("1+1", "2");
        h.ajouter("2*3", "6");
        let exprs: Vec<&str> = h.entrees().iter().map(|e| e.expression.as_str()).collect();
        assert_eq!(exprs, vec!["2*3", "1+1"]);
    }

    #[test]
    fn plafond_de_cinquante() {
        let mut h = Historique::default();
        for k in 0..60 {
            h.ajouter(format!("{k}+0"), k.to_string());
        }
        assert_eq!(h.len(), 50);
        assert_eq!(h.entrees()[0].expression, "59+0");
        assert_eq!(h.entrees()[49].expression, "10+0");
    }

    #[test]
    fn ids_croissants_meme_apres_suppression() {
        let mut h = Historique::default();
        let a = h.ajouter("1", "1");
        let b = h.ajouter("2", "2");
        assert!(b > a);
        assert!(h.supprimer(b));
        assert!(!h.supprimer(b));
        let c = h.ajouter("3", "3");
        assert!(c > b);
        assert_eq!(h.trouver(a).map(|e| e.resultat.as_str()), Some("1"));
        h.vider();
        assert!(h.is_empty());
    }

    #[test]
    fn aller_retour_json() {
        let mut h = Historique::default();
        h.ajouter("(2+3)*4", "20");
        let json = h.to_json().unwrap();
        let mut relu = Historique::from_json(&json, 50).unwrap();
        assert_eq!(relu.entrees(), h.entrees());
        // l'id suivant continue après le dernier stocké
        assert_eq!(relu.ajouter("1", "1"), 2);
    }
}
