// src/noyau/reponse.rs
//
// Réponse discriminée pour le collaborateur (UI) :
//   { "ok": true,  "value": 20, "display": "20" }
//   { "ok": false, "kind": "MathError", "message": "..." }

use serde::Serialize;

use super::erreur::{ErreurCalcul, TypeErreur};
use super::format::formater;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Reponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<TypeErreur>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&Result<f64, ErreurCalcul>> for Reponse {
    fn from(r: &Result<f64, ErreurCalcul>) -> Self {
        match r {
            Ok(v) => Reponse {
                ok: true,
                value: Some(*v),
                display: Some(formater(*v)),
                kind: None,
                message: None,
            },
            Err(e) => Reponse {
                ok: false,
                value: None,
                display: None,
                kind: Some(e.kind()),
                message: Some(e.to_string()),
            },
        }
    }
}
