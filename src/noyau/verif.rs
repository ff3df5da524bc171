// src/noyau/verif.rs
//
// Pré-passe de validité (motifs), AVANT le parse complet.
// But : échouer vite avec un diagnostic précis au lieu d'une erreur de parse opaque.
//
// Motifs rejetés (ErreurCalcul::Syntaxe) :
// - ")(" sans opérateur entre les deux
// - deux opérateurs + - * / ^ consécutifs
// - nombre collé à une lettre ("2x", "2pi") ; l'exposant scientifique reste permis ("1e20")
// - nombre collé à une parenthèse ouvrante ("2(3)")
// - constante appelée comme fonction ("pi(2)") ou nom bégayé ("fff(3)")
//
// Les autres noms inconnus devant "(" passent : l'évaluateur les signale
// comme SymboleInconnu.

use lazy_static::lazy_static;
use regex::Regex;

use super::erreur::ErreurCalcul;

lazy_static! {
    static ref PARENS_COLLEES: Regex = Regex::new(r"\)\s*\(").unwrap();
    static ref OPERATEURS_DOUBLES: Regex = Regex::new(r"[+\-*/^]{2}").unwrap();
    static ref NOMBRE: Regex = Regex::new(r"(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").unwrap();
    static ref NOM_APPELE: Regex = Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\s*\(").unwrap();
}

pub fn verifier(s: &str) -> Result<(), ErreurCalcul> {
    if s.trim().is_empty() {
        return Err(ErreurCalcul::EntreeVide);
    }

    if let Some(m) = PARENS_COLLEES.find(s) {
        return Err(ErreurCalcul::syntaxe(format!(
            "parenthèses « {} » sans opérateur entre elles",
            m.as_str()
        )));
    }

    if let Some(m) = OPERATEURS_DOUBLES.find(s) {
        return Err(ErreurCalcul::syntaxe(format!(
            "opérateurs consécutifs « {} »",
            m.as_str()
        )));
    }

    verifier_nombres(s)?;
    verifier_noms_appeles(s)
}

fn verifier_nombres(s: &str) -> Result<(), ErreurCalcul> {
    for m in NOMBRE.find_iter(s) {
        // chiffres internes à un identifiant (log10, x2) : pas un littéral
        let precedent = s[..m.start()].chars().last();
        if precedent.is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
            continue;
        }

        let reste = &s[m.end()..];
        if let Some(c) = reste.chars().next() {
            if c.is_alphabetic() || c == '_' {
                return Err(ErreurCalcul::syntaxe(format!(
                    "nombre « {} » collé à la lettre « {c} » sans opérateur",
                    m.as_str()
                )));
            }
        }
        if reste.trim_start().starts_with('(') {
            return Err(ErreurCalcul::syntaxe(format!(
                "nombre « {} » suivi de « ( » sans opérateur",
                m.as_str()
            )));
        }
    }
    Ok(())
}

fn verifier_noms_appeles(s: &str) -> Result<(), ErreurCalcul> {
    for caps in NOM_APPELE.captures_iter(s) {
        let nom = caps[1].to_lowercase();

        if nom == "pi" || nom == "e" {
            return Err(ErreurCalcul::syntaxe(format!(
                "la constante « {nom} » ne s'applique pas comme une fonction"
            )));
        }

        if est_begaye(&nom) {
            return Err(ErreurCalcul::syntaxe(format!(
                "appel de fonction invalide « {nom}( »"
            )));
        }
    }
    Ok(())
}

/// "fff", "xx" : une seule lettre répétée.
fn est_begaye(nom: &str) -> bool {
    let mut chars = nom.chars();
    match chars.next() {
        Some(premier) => nom.chars().count() >= 2 && chars.all(|c| c == premier),
        None => false,
    }
}
