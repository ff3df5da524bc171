// src/noyau/format.rs
//
// Affichage stable d'un résultat numérique.
// - NaN / Infinity / -Infinity en toutes lettres
// - |v| > 1e10 ou 0 < |v| < 1e-6 : notation exponentielle, 6 chiffres après la virgule
// - sinon : arrondi à 10 décimales, demi loin de zéro (epsilon ajouté avant), sans zéros finaux
//
// Invariant : formater(parse(formater(x))) == formater(x).

use super::nombre::{Nombre, Special};

const SEUIL_GRAND: f64 = 1e10;
const SEUIL_PETIT: f64 = 1e-6;
const DECIMALES: usize = 10;
const CHIFFRES_MANTISSE: usize = 6;
const DECIMALES_EXACTES: usize = 80;

pub fn formater(n: impl Into<Nombre>) -> String {
    match n.into() {
        Nombre::Special(Special::NaN) => "NaN".to_string(),
        Nombre::Special(Special::PlusInfini) => "Infinity".to_string(),
        Nombre::Special(Special::MoinsInfini) => "-Infinity".to_string(),
        Nombre::Reel(v) => formater_reel(v),
    }
}

fn formater_reel(v: f64) -> String {
    if !est_exponentiel(v) {
        return formater_decimal(v);
    }

    let exp = formater_exponentiel(v);
    // Mantisse arrondie retombée dans la plage décimale (ex: 1.0000000001e10) :
    // on affiche la forme décimale de la valeur relue, sinon formater ne serait plus idempotent.
    match exp.parse::<f64>() {
        Ok(relu) if !est_exponentiel(relu) => formater_decimal(relu),
        _ => exp,
    }
}

fn est_exponentiel(v: f64) -> bool {
    let a = v.abs();
    a > SEUIL_GRAND || (a > 0.0 && a < SEUIL_PETIT)
}

/// "1.000000e+20", "-2.500000e-7" (exposant toujours signé).
fn formater_exponentiel(v: f64) -> String {
    let brut = format!("{:.*e}", CHIFFRES_MANTISSE, v);
    match brut.split_once('e') {
        Some((mantisse, exposant)) if !exposant.starts_with('-') => {
            format!("{mantisse}e+{exposant}")
        }
        _ => brut,
    }
}

/// Arrondi à 10 décimales (epsilon poussé loin de zéro), relu, puis rendu le plus court.
///
/// Pas de `round(v * 1e10)` : au-delà de 2^53 le produit n'est plus exact
/// et des chiffres parasites apparaissent près de 1e10.
fn formater_decimal(v: f64) -> String {
    let ajuste = v + v.signum() * f64::EPSILON;
    let arrondi = arrondir_loin_de_zero(ajuste);

    // -0 s'affiche "0"
    if arrondi == 0.0 {
        return "0".to_string();
    }
    // Display f64 : représentation la plus courte, jamais de ".0" ni d'exposant
    format!("{arrondi}")
}

/// Arrondi à `DECIMALES` sur le développement décimal exact, demi loin de zéro.
///
/// `format!("{:.10}")` arrondit les égalités exactes au pair (2.00048828125 -> ...812).
fn arrondir_loin_de_zero(v: f64) -> f64 {
    // un f64 >= 1e-6 a au plus ~72 décimales : ce développement est exact
    let exact = format!("{:.*}", DECIMALES_EXACTES, v.abs());
    let (entier, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut chiffres: Vec<char> = entier
        .chars()
        .chain(fraction.chars().chain(std::iter::repeat('0')).take(DECIMALES))
        .collect();

    if fraction.chars().nth(DECIMALES).is_some_and(|c| c >= '5') {
        let mut i = chiffres.len();
        loop {
            if i == 0 {
                chiffres.insert(0, '1');
                break;
            }
            i -= 1;
            if chiffres[i] == '9' {
                chiffres[i] = '0';
            } else {
                chiffres[i] = char::from(chiffres[i] as u8 + 1);
                break;
            }
        }
    }

    let coupe = chiffres.len() - DECIMALES;
    let texte: String = chiffres[..coupe]
        .iter()
        .chain(std::iter::once(&'.'))
        .chain(&chiffres[coupe..])
        .collect();
    let module: f64 = texte.parse().unwrap_or(v.abs());

    if v < 0.0 {
        -module
    } else {
        module
    }
}
