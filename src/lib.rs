//! Calculatrice à étapes : noyau d'évaluation d'expressions + collaborateur terminal.
//!
//! - `noyau`  : normaliser -> évaluer -> formater / tracer (sans état)
//! - `app`    : état de la calculatrice, historique, vue terminal
//! - `config` : fichier de configuration TOML

pub mod app;
pub mod config;
pub mod noyau;
