//! src/app/etat.rs
//!
//! État de la calculatrice (sans vue).
//!
//! Rôle : contenir l’état (entrée + curseur, affichage, explication, mémoire, historique)
//! et offrir les actions des boutons. L’évaluation est déléguée au noyau.
//!
//! Contrats :
//! - Actions déterministes, sans effet de bord caché.
//! - Un échec d’évaluation n’écrit que "Error" + message : historique et dernier
//!   résultat restent intacts.
//! - Affichage vide => "0".

use tracing::debug;

use super::historique::Historique;
use crate::noyau::{evaluer, formater, inserer_valeur, tracer, ErreurCalcul};

/// Texte affiché quand l’évaluation échoue.
pub const AFFICHAGE_ERREUR: &str = "Error";

/// Texte affiché quand l’entrée est vide.
pub const AFFICHAGE_VIDE: &str = "0";

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,
    curseur: usize, // en caractères
    ancre: usize,   // autre bout de la sélection (== curseur si pas de sélection)

    // --- sorties ---
    pub affichage: String,        // résultat formaté, "0" ou "Error"
    pub explication: String,      // démarche (mode étapes) ou message d’erreur
    pub dernier_resultat: String, // dernier résultat réussi (jamais écrasé par une erreur)

    // --- registres ---
    pub memoire: f64,
    pub historique: Historique,

    // --- paramètres ---
    pub mode_etapes: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Historique::default(), false)
    }
}

impl AppCalc {
    pub fn new(historique: Historique, mode_etapes: bool) -> Self {
        Self {
            entree: String::new(),
            curseur: 0,
            ancre: 0,
            affichage: AFFICHAGE_VIDE.to_string(),
            explication: String::new(),
            dernier_resultat: String::new(),
            memoire: 0.0,
            historique,
            mode_etapes,
        }
    }

    /* ------------------------ Curseur / sélection ------------------------ */

    pub fn curseur(&self) -> usize {
        self.curseur
    }

    fn longueur(&self) -> usize {
        self.entree.chars().count()
    }

    /// Place le curseur (sans sélection), borné à la longueur de l’entrée.
    pub fn placer_curseur(&mut self, pos: usize) {
        self.curseur = pos.min(self.longueur());
        self.ancre = self.curseur;
    }

    /// Sélectionne [debut, fin) ; le curseur se place en `fin`.
    pub fn selectionner(&mut self, debut: usize, fin: usize) {
        let n = self.longueur();
        self.ancre = debut.min(n);
        self.curseur = fin.min(n);
    }

    fn selection(&self) -> (usize, usize) {
        (self.ancre.min(self.curseur), self.ancre.max(self.curseur))
    }

    /// Remplace toute l’entrée (saisie clavier), curseur en fin.
    pub fn saisir(&mut self, texte: &str) {
        self.entree = texte.to_string();
        self.placer_curseur(usize::MAX);
        self.saisie_modifiee();
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    /// Insère au curseur (remplace la sélection), multiplication implicite devant une constante.
    pub fn inserer(&mut self, valeur: &str) {
        let (debut, fin) = self.selection();
        let (entree, curseur) = inserer_valeur(&self.entree, debut, fin, valeur);
        self.entree = entree;
        self.placer_curseur(curseur);
        self.saisie_modifiee();
    }

    /// DEL : efface la sélection, sinon le caractère avant le curseur.
    pub fn supprimer(&mut self) {
        let (debut, fin) = self.selection();
        let mut chars: Vec<char> = self.entree.chars().collect();

        if debut != fin {
            chars.drain(debut..fin);
            self.entree = chars.into_iter().collect();
            self.placer_curseur(debut);
        } else if debut > 0 {
            chars.remove(debut - 1);
            self.entree = chars.into_iter().collect();
            self.placer_curseur(debut - 1);
        }

        self.saisie_modifiee();
    }

    /// C : efface l’entrée, l’affichage et l’explication.
    pub fn effacer(&mut self) {
        self.entree.clear();
        self.placer_curseur(0);
        self.affichage = AFFICHAGE_VIDE.to_string();
        self.explication.clear();
    }

    /// Évaluation “au fil de la frappe” : affiche sans toucher à l’historique.
    pub fn saisie_modifiee(&mut self) {
        if self.entree.trim().is_empty() {
            self.affichage = AFFICHAGE_VIDE.to_string();
            self.explication.clear();
            return;
        }

        match evaluer(&self.entree) {
            Ok(v) => self.set_resultat(v),
            Err(e) => self.set_erreur(&e),
        }
    }

    /// "=" : évalue, archive dans l’historique, vide l’entrée.
    /// Retourne l’id d’historique en cas de succès.
    pub fn calculer(&mut self) -> Option<u64> {
        let expression = self.entree.trim().to_string();
        if expression.is_empty() {
            return None;
        }

        match evaluer(&expression) {
            Ok(v) => {
                self.set_resultat(v);
                let id = self.historique.ajouter(expression.as_str(), self.affichage.as_str());
                debug!(id, expression = %expression, resultat = %self.affichage, "historique");
                self.entree.clear();
                self.placer_curseur(0);
                Some(id)
            }
            Err(e) => {
                self.set_erreur(&e);
                None
            }
        }
    }

    /* ------------------------ Mémoire ------------------------ */

    /// MC
    pub fn memoire_effacer(&mut self) {
        self.memoire = 0.0;
    }

    /// MR : insère la valeur mémorisée au curseur.
    /// Négative => entre parenthèses ("2*(-5)") ; non finie => rien.
    pub fn memoire_rappel(&mut self) {
        if !self.memoire.is_finite() {
            debug!(memoire = self.memoire, "rappel mémoire ignoré");
            return;
        }
        let v = formater(self.memoire);
        if self.memoire < 0.0 {
            self.inserer(&format!("({v})"));
        } else {
            self.inserer(&v);
        }
    }

    /// M+ : ajoute la valeur de l’entrée courante ; une entrée invalide est ignorée.
    pub fn memoire_ajouter(&mut self) {
        if let Ok(v) = evaluer(&self.entree) {
            self.memoire += v;
        }
    }

    /* ------------------------ Historique ------------------------ */

    /// Recharge une expression archivée dans l’entrée.
    pub fn rappeler(&mut self, id: u64) -> bool {
        let Some(expression) = self.historique.trouver(id).map(|e| e.expression.clone()) else {
            return false;
        };
        self.saisir(&expression);
        true
    }

    /// Texte copiable : rien si l’affichage est vide ou en erreur.
    pub fn resultat_copiable(&self) -> Option<&str> {
        match self.affichage.as_str() {
            AFFICHAGE_VIDE | AFFICHAGE_ERREUR | "" => None,
            s => Some(s),
        }
    }

    /* ------------------------ Utilitaires ------------------------ */

    fn set_resultat(&mut self, v: f64) {
        self.affichage = formater(v);
        self.dernier_resultat = self.affichage.clone();
        self.explication = if self.mode_etapes {
            tracer(&self.entree, v).to_string()
        } else {
            String::new()
        };
    }

    /// Choix UX : "Error" à l’affichage, le message dans l’explication.
    fn set_erreur(&mut self, e: &ErreurCalcul) {
        self.affichage = AFFICHAGE_ERREUR.to_string();
        self.explication = e.to_string();
    }
}
