//! Noyau d'évaluation
//!
//! Organisation interne :
//! - normalise.rs : glyphes, pi, ln/log + insertion au curseur (multiplication implicite)
//! - verif.rs     : pré-passe de validité (motifs regex)
//! - jetons.rs    : tokenisation
//! - rpn.rs       : shunting-yard + évaluation RPN (f64)
//! - eval.rs      : pipeline complet
//! - nombre.rs    : union numérique fermée (réel / NaN / ±infini)
//! - format.rs    : affichage stable (exponentiel, arrondi 10 décimales)
//! - demarche.rs  : explication pas à pas (réécriture textuelle)
//! - erreur.rs    : taxonomie des erreurs
//! - reponse.rs   : réponse discriminée sérialisable

pub mod demarche;
pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod nombre;
pub mod normalise;
pub mod reponse;
pub mod rpn;
pub mod verif;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use demarche::{tracer, tracer_brut, Demarche, Etape};
pub use erreur::{ErreurCalcul, TypeErreur};
pub use eval::{evaluer, evaluer_normalise};
pub use format::formater;
pub use nombre::{Nombre, Special};
pub use normalise::{inserer_valeur, normaliser};
pub use reponse::Reponse;
