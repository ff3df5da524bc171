// src/noyau/normalise.rs
//
// Normalisation : texte utilisateur -> forme canonique pour l'évaluateur.
// - glyphes décoratifs  : × ÷ − π √  -> * / - pi sqrt
// - constante           : "pi" (toute casse) -> "pi" ; "e" isolé laissé tel quel
// - logarithmes         : ln( -> log( (népérien) ; log( -> log10( (base 10)
//
// IMPORTANT : la réécriture ln/log se fait en UNE passe.
// Deux remplacements successifs transformeraient ln( en log10(.
//
// La multiplication implicite (2 puis pi => 2*pi) est insérée à la SAISIE
// (inserer_valeur), pas ici.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref MOT_PI: Regex = Regex::new(r"(?i)\bpi\b").unwrap();
    static ref APPEL_LOG: Regex = Regex::new(r"(?i)\b(ln|log)\s*\(").unwrap();
}

/// Constantes insérables depuis le sélecteur.
const CONSTANTES: &[&str] = &["pi", "π", "e"];

/// Fonction totale : ne peut pas échouer.
pub fn normaliser(brut: &str) -> String {
    let mut s = String::with_capacity(brut.len());
    for c in brut.chars() {
        match c {
            '×' => s.push('*'),
            '÷' => s.push('/'),
            '−' => s.push('-'),
            'π' => s.push_str("pi"),
            '√' => s.push_str("sqrt"),
            _ => s.push(c),
        }
    }

    let s = MOT_PI.replace_all(&s, "pi");
    let s = APPEL_LOG.replace_all(&s, |caps: &Captures| {
        if caps[1].eq_ignore_ascii_case("ln") {
            "log(".to_string()
        } else {
            "log10(".to_string()
        }
    });

    s.into_owned()
}

/// Insère `valeur` à la place de la sélection [debut, fin) (indices en caractères).
///
/// Si `valeur` est une constante collée à une valeur déjà saisie
/// (chiffre, `)` ou autre constante), on insère `*` devant : "2" + "pi" -> "2*pi".
///
/// Retourne (nouvelle entrée, nouvelle position du curseur).
pub fn inserer_valeur(entree: &str, debut: usize, fin: usize, valeur: &str) -> (String, usize) {
    let chars: Vec<char> = entree.chars().collect();
    let fin = fin.min(chars.len());
    let debut = debut.min(fin);

    let avant: String = chars[..debut].iter().collect();
    let apres: String = chars[fin..].iter().collect();

    let mut insere = String::new();
    if CONSTANTES.contains(&valeur) && termine_par_valeur(&avant) {
        insere.push('*');
    }
    insere.push_str(valeur);

    let curseur = debut + insere.chars().count();
    (format!("{avant}{insere}{apres}"), curseur)
}

/// Vrai si le texte se termine par un opérande complet (chiffre, `)`, π, pi, e).
fn termine_par_valeur(avant: &str) -> bool {
    match avant.chars().last() {
        Some(c) if c.is_ascii_digit() || c == ')' || c == 'π' || c == '.' => true,
        Some(_) => {
            let bas = avant.to_lowercase();
            ["pi", "e"].into_iter().any(|constante| {
                bas.strip_suffix(constante)
                    .is_some_and(|reste| !reste.ends_with(|c: char| c.is_alphanumeric() || c == '_'))
            })
        }
        None => false,
    }
}
