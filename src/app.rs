// src/app.rs
//
// Calculatrice — module App (collaborateur du noyau)
// --------------------------------------------------
// Rôle:
// - etat.rs       : état (entrée, affichage, mémoire) + actions des boutons
// - historique.rs : calculs réussis, plus récent en tête, plafonné
// - vue.rs        : commandes terminal + rendu texte
//
// Le noyau reste sans état : tout ce qui persiste d’un calcul à l’autre vit ici.

pub mod etat;
pub mod historique;
pub mod vue;

// Ré-exports pratiques : `use crate::app::AppCalc;`
pub use etat::AppCalc;
pub use historique::{EntreeHistorique, Historique};
pub use vue::{Commande, Sortie};
