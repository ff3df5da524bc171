// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// - Jamais de panique sur une entrée utilisateur : tout passe par ErreurCalcul.
// - TypeErreur = discriminant exposé au collaborateur (noms stables).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    #[error("Entrée vide")]
    EntreeVide,

    #[error("Erreur de syntaxe : {0}")]
    Syntaxe(String),

    #[error("Symbole inconnu : {0}")]
    SymboleInconnu(String),

    #[error("Erreur mathématique : {0}")]
    Math(String),
}

/// Discriminant seul (sans message), tel que vu de l'extérieur.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeErreur {
    #[serde(rename = "EmptyInputError")]
    EntreeVide,
    #[serde(rename = "SyntaxError")]
    Syntaxe,
    #[serde(rename = "UnknownSymbolError")]
    SymboleInconnu,
    #[serde(rename = "MathError")]
    Math,
}

impl ErreurCalcul {
    pub fn kind(&self) -> TypeErreur {
        match self {
            Self::EntreeVide => TypeErreur::EntreeVide,
            Self::Syntaxe(_) => TypeErreur::Syntaxe,
            Self::SymboleInconnu(_) => TypeErreur::SymboleInconnu,
            Self::Math(_) => TypeErreur::Math,
        }
    }

    pub(crate) fn syntaxe(msg: impl Into<String>) -> Self {
        Self::Syntaxe(msg.into())
    }

    pub(crate) fn math(msg: impl Into<String>) -> Self {
        Self::Math(msg.into())
    }
}

impl fmt::Display for TypeErreur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nom = match self {
            Self::EntreeVide => "EmptyInputError",
            Self::Syntaxe => "SyntaxError",
            Self::SymboleInconnu => "UnknownSymbolError",
            Self::Math => "MathError",
        };
        f.write_str(nom)
    }
}
