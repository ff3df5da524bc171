//! Tests de propriétés : contrat externe du noyau.
//!
//! - taxonomie des erreurs (vide, syntaxe, symbole inconnu, math)
//! - formatage idempotent (proptest)
//! - multiplication implicite à la saisie
//! - démarche de référence "(2+3)*4"
//! - relecture de la forme exponentielle

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::{evaluer, formater, inserer_valeur, tracer, tracer_brut, TypeErreur};

fn kind(expr: &str) -> TypeErreur {
    evaluer(expr)
        .err()
        .unwrap_or_else(|| panic!("expr={expr:?} aurait dû échouer"))
        .kind()
}

fn affiche(expr: &str) -> String {
    formater(evaluer(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}")))
}

/* ------------------------ Erreurs ------------------------ */

#[test]
fn prop_entree_vide() {
    assert_eq!(kind(""), TypeErreur::EntreeVide);
    assert_eq!(kind("   "), TypeErreur::EntreeVide);
}

#[test]
fn prop_division_par_zero() {
    assert_eq!(kind("2/0"), TypeErreur::Math);
}

#[test]
fn prop_motifs_de_syntaxe() {
    assert_eq!(kind("2(3)"), TypeErreur::Syntaxe);
    assert_eq!(kind("fff(3)"), TypeErreur::Syntaxe);
}

#[test]
fn prop_symbole_inconnu() {
    assert_eq!(kind("foo(1)"), TypeErreur::SymboleInconnu);
    assert_eq!(kind("bar + 1"), TypeErreur::SymboleInconnu);
}

/* ------------------------ Valeurs ------------------------ */

#[test]
fn prop_pi_et_multiplication_implicite() {
    assert_eq!(affiche("2*pi"), "6.2831853072");

    // "2" puis la constante pi choisie dans le sélecteur
    let (saisie, _curseur) = inserer_valeur("2", 1, 1, "pi");
    assert_eq!(saisie, "2*pi");
    assert_eq!(affiche(&saisie), affiche("2*pi"));
}

#[test]
fn prop_precedence_standard() {
    assert_eq!(affiche("1+2*3-4/2"), "5");
    assert_eq!(affiche("2*3+4*5"), "26");
    assert_eq!(affiche("100/10/2"), "5");
    assert_eq!(affiche("1-2-3"), "-4");
}

#[test]
fn prop_relecture_exponentielle() {
    let texte = affiche("1e20");
    assert_eq!(texte, "1.000000e+20");
    let relu = evaluer(&texte).unwrap();
    assert!((relu - 1e20).abs() <= 1e20 * 1e-12);
}

/* ------------------------ Démarche ------------------------ */

#[test]
fn prop_demarche_reference() {
    assert_eq!(
        tracer("(2+3)*4", 20.0).lignes(),
        vec![
            "Input: (2+3)*4",
            "Step 1: Evaluate (2+3) = 5",
            "Step 2: Substitute → 5*4",
            "Step 3: Final calculation: 5*4 = 20",
            "Final Result: 20",
        ]
    );
    assert_eq!(tracer_brut("(2+3)*4"), tracer("(2+3)*4", 20.0).lignes());
}

#[test]
fn prop_demarche_glyphes_conserves() {
    let l = tracer_brut("(6×2)÷4");
    assert_eq!(l[1], "Step 1: Evaluate (6×2) = 12");
    assert_eq!(l[2], "Step 2: Substitute → 12÷4");
    assert_eq!(l.last().unwrap(), "Final Result: 3");
}

/* ------------------------ Formatage idempotent ------------------------ */

proptest! {
    #[test]
    fn prop_formatage_idempotent(x in prop::num::f64::NORMAL | prop::num::f64::ZERO) {
        let une = formater(x);
        let relu: f64 = une.parse().unwrap();
        prop_assert_eq!(formater(relu), une);
    }

    #[test]
    fn prop_formatage_idempotent_plage_usuelle(x in -1e12f64..1e12f64) {
        let une = formater(x);
        let relu: f64 = une.parse().unwrap();
        prop_assert_eq!(formater(relu), une);
    }
}
