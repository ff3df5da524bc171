//! Démarche : explication pas à pas d'un calcul déjà évalué.
//!
//! Réécriture TEXTUELLE (pas d'AST) :
//! - on cherche le groupe parenthésé le plus interne, le plus à gauche
//!   (avec son nom de fonction éventuel : `sqrt(16)` forme un seul groupe)
//! - on l'évalue seul (normaliser + évaluer + formater)
//! - on remplace le groupe par sa valeur formatée dans l'expression de travail
//! - on recommence jusqu'à ce qu'il ne reste plus de parenthèses
//!
//! Une étape qui échoue n'est jamais remontée : la démarche s'arrête là
//! et se termine quand même par le résultat final déjà connu.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::eval::evaluer;
use super::format::formater;

lazy_static! {
    static ref GROUPE_INTERNE: Regex =
        Regex::new(r"(?:√|[A-Za-z_][A-Za-z0-9_]*)?\([^()]+\)").unwrap();
}

#[derive(Clone, Debug, PartialEq)]
pub enum Etape {
    /// Écho de l'expression telle que saisie.
    Entree(String),
    /// Sous-expression évaluée seule.
    Evaluation { sous_expression: String, valeur: String },
    /// Expression de travail après remplacement.
    Substitution(String),
    /// Dernier calcul une fois les parenthèses résolues.
    CalculFinal { expression: String, valeur: String },
    /// Expression sans parenthèses, avec opérateur.
    Calcul { expression: String, valeur: String },
    /// Expression sans opérateur (nombre ou constante seule).
    Directe { expression: String, valeur: String },
    Resultat(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Demarche {
    pub etapes: Vec<Etape>,
}

impl Demarche {
    /// Lignes numérotées ("Step n") prêtes à afficher.
    pub fn lignes(&self) -> Vec<String> {
        let mut n = 0;
        let mut numero = || {
            n += 1;
            n
        };

        self.etapes
            .iter()
            .map(|e| match e {
                Etape::Entree(s) => format!("Input: {s}"),
                Etape::Evaluation {
                    sous_expression,
                    valeur,
                } => format!("Step {}: Evaluate {sous_expression} = {valeur}", numero()),
                Etape::Substitution(s) => format!("Step {}: Substitute → {s}", numero()),
                Etape::CalculFinal { expression, valeur } => {
                    format!("Step {}: Final calculation: {expression} = {valeur}", numero())
                }
                Etape::Calcul { expression, valeur } => {
                    format!("Step {}: Calculate {expression} = {valeur}", numero())
                }
                Etape::Directe { expression, valeur } => {
                    format!("Step {}: Direct evaluation: {expression} = {valeur}", numero())
                }
                Etape::Resultat(v) => format!("Final Result: {v}"),
            })
            .collect()
    }
}

impl fmt::Display for Demarche {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lignes().join("\n"))
    }
}

/// Construit la démarche d'une expression dont le résultat est déjà connu.
pub fn tracer(expression: &str, resultat: f64) -> Demarche {
    let final_txt = formater(resultat);
    let mut etapes = vec![Etape::Entree(expression.to_string())];

    if GROUPE_INTERNE.is_match(expression) {
        let mut travail = expression.to_string();
        let mut resolu = true;

        // chaque tour retire une paire de parenthèses : borne naturelle
        let max_tours = expression.matches('(').count();
        for _ in 0..max_tours {
            let Some(m) = GROUPE_INTERNE.find(&travail) else {
                break;
            };
            let groupe = m.as_str().to_string();

            let valeur = match evaluer(&groupe) {
                Ok(v) => formater(v),
                Err(e) => {
                    debug!(groupe = %groupe, erreur = %e, "étape ignorée dans la démarche");
                    resolu = false;
                    break;
                }
            };

            travail.replace_range(m.range(), &valeur);
            etapes.push(Etape::Evaluation {
                sous_expression: groupe,
                valeur,
            });
            etapes.push(Etape::Substitution(travail.clone()));
        }

        if resolu && !travail.contains('(') && contient_operateur(&travail) {
            etapes.push(Etape::CalculFinal {
                expression: travail,
                valeur: final_txt.clone(),
            });
        }
    } else if contient_operateur(expression) {
        etapes.push(Etape::Calcul {
            expression: expression.trim().to_string(),
            valeur: final_txt.clone(),
        });
    } else {
        etapes.push(Etape::Directe {
            expression: expression.trim().to_string(),
            valeur: final_txt.clone(),
        });
    }

    etapes.push(Etape::Resultat(final_txt));
    Demarche { etapes }
}

/// Démarche depuis une saisie brute : évalue d'abord, ne remonte jamais d'erreur.
pub fn tracer_brut(brut: &str) -> Vec<String> {
    match evaluer(brut) {
        Ok(v) => tracer(brut, v).lignes(),
        Err(e) => vec![format!("Input: {brut}"), format!("Invalid expression: {e}")],
    }
}

/// Vrai s'il reste un opérateur arithmétique.
/// Ignore le signe de tête ("-3") et le signe d'un exposant ("1.000000e+20").
fn contient_operateur(s: &str) -> bool {
    let chars: Vec<char> = s.trim().chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if !matches!(c, '+' | '-' | '*' | '/' | '^' | '×' | '÷' | '−') {
            continue;
        }
        if i == 0 && matches!(c, '+' | '-' | '−') {
            continue;
        }
        let exposant = matches!(c, '+' | '-')
            && i >= 2
            && matches!(chars[i - 1], 'e' | 'E')
            && chars[i - 2].is_ascii_digit();
        if exposant {
            continue;
        }
        return true;
    }
    false
}
