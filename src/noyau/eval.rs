//! Noyau — évaluation (pipeline réel)
//!
//! normaliser -> pré-passe (motifs) -> jetons -> RPN -> valeur f64
//!
//! Aucun état partagé : chaque appel construit ses propres jetons et sa propre pile.

use tracing::{debug, trace};

use super::erreur::ErreurCalcul;
use super::jetons::{format_tokens, tokenize};
use super::normalise::normaliser;
use super::rpn::{eval_rpn, format_rpn, to_rpn};
use super::verif::verifier;

/// API publique : évalue une expression brute (telle que saisie).
pub fn evaluer(brut: &str) -> Result<f64, ErreurCalcul> {
    if brut.trim().is_empty() {
        return Err(ErreurCalcul::EntreeVide);
    }
    evaluer_normalise(&normaliser(brut))
}

/// Évalue une expression déjà normalisée.
pub fn evaluer_normalise(s: &str) -> Result<f64, ErreurCalcul> {
    // 1) Pré-passe : motifs invalides évidents
    verifier(s)?;

    // 2) Jetons
    let jetons = tokenize(s)?;
    trace!(jetons = %format_tokens(&jetons), "jetons");

    // 3) RPN
    let rpn = to_rpn(&jetons)?;
    trace!(rpn = %format_rpn(&rpn), "rpn");

    // 4) Valeur
    let resultat = eval_rpn(&rpn);
    match &resultat {
        Ok(v) => debug!(expression = s, valeur = *v, "évaluation réussie"),
        Err(e) => debug!(expression = s, erreur = %e, "évaluation refusée"),
    }
    resultat
}

#[cfg(test)]
mod tests {
    use super::evaluer;
    use crate::noyau::erreur::TypeErreur;

    fn ok(s: &str) -> f64 {
        evaluer(s).unwrap_or_else(|e| panic!("evaluer({s:?}) erreur: {e}"))
    }

    fn kind(s: &str) -> TypeErreur {
        match evaluer(s) {
            Ok(v) => panic!("evaluer({s:?}) aurait dû échouer, a donné {v}"),
            Err(e) => e.kind(),
        }
    }

    #[test]
    fn arithmetique_de_base() {
        assert_eq!(ok("1+2*3"), 7.0);
        assert_eq!(ok("(1+2)*3"), 9.0);
        assert_eq!(ok("10-4-3"), 3.0);
        assert_eq!(ok("2^10"), 1024.0);
        assert_eq!(ok("  7 / 2 "), 3.5);
    }

    #[test]
    fn glyphes_et_logarithmes() {
        assert_eq!(ok("6×7"), 42.0);
        assert_eq!(ok("9÷3−1"), 2.0);
        assert!((ok("ln(e)") - 1.0).abs() < 1e-12);
        assert!((ok("log(100)") - 2.0).abs() < 1e-12);
        assert!((ok("2*π") - 2.0 * std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn taxonomie_des_erreurs() {
        assert_eq!(kind(""), TypeErreur::EntreeVide);
        assert_eq!(kind("   "), TypeErreur::EntreeVide);
        assert_eq!(kind("2/0"), TypeErreur::Math);
        assert_eq!(kind("sqrt(-1)"), TypeErreur::Math);
        assert_eq!(kind("2(3)"), TypeErreur::Syntaxe);
        assert_eq!(kind("fff(3)"), TypeErreur::Syntaxe);
        assert_eq!(kind("2pi"), TypeErreur::Syntaxe);
        assert_eq!(kind("foo(1)"), TypeErreur::SymboleInconnu);
        assert_eq!(kind("1 + ? 2"), TypeErreur::Syntaxe);
    }

    #[test]
    fn message_precis() {
        let e = evaluer("foo(1)").unwrap_err();
        assert!(e.to_string().contains("foo"), "{e}");
        let e = evaluer("1+*2").unwrap_err();
        assert!(e.to_string().contains("+*"), "{e}");
    }
}
