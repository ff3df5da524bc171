// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur f64
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis évaluer la RPN sur une pile de f64
//
// Règles:
// - Ident(name) suivi de "(" => appel de fonction (sortie après la parenthèse fermante)
// - Ident(name) seul         => constante (pi, e), sinon SymboleInconnu
// - Moins unaire : opérateur préfixe Neg, plus lié que * / mais moins que ^
//   ("-2^2" = -4 ; "2 ^ -1" = 0.5)
// - ^ associatif à droite

use std::f64::consts::{E, PI};
use std::fmt;

use super::erreur::ErreurCalcul;
use super::jetons::Tok;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bin {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Fonctions unaires reconnues (noms canoniques après normalisation).
/// `log` = népérien, `log10` = base 10.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sqrt,
    Log,
    Log10,
    Sin,
    Cos,
    Tan,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Valeur(f64),
    Binaire(Bin),
    Neg,
    Appel(Fonction),
}

/// Pile d'opérateurs (shunting-yard).
#[derive(Clone, Copy, Debug)]
enum Attente {
    LPar,
    Binaire(Bin),
    Neg,
    Appel(Fonction),
}

impl Bin {
    fn depuis_tok(t: &Tok) -> Option<Bin> {
        match t {
            Tok::Plus => Some(Bin::Add),
            Tok::Minus => Some(Bin::Sub),
            Tok::Star => Some(Bin::Mul),
            Tok::Slash => Some(Bin::Div),
            Tok::Caret => Some(Bin::Pow),
            _ => None,
        }
    }

    fn symbole(self) -> char {
        match self {
            Bin::Add => '+',
            Bin::Sub => '-',
            Bin::Mul => '*',
            Bin::Div => '/',
            Bin::Pow => '^',
        }
    }
}

impl Fonction {
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        match nom {
            "sqrt" => Some(Fonction::Sqrt),
            "log" => Some(Fonction::Log),
            "log10" => Some(Fonction::Log10),
            "sin" => Some(Fonction::Sin),
            "cos" => Some(Fonction::Cos),
            "tan" => Some(Fonction::Tan),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sqrt => "sqrt",
            Fonction::Log => "log",
            Fonction::Log10 => "log10",
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
        }
    }

    /// Domaine réel : on refuse explicitement plutôt que de laisser filer un NaN.
    fn appliquer(self, x: f64) -> Result<f64, ErreurCalcul> {
        match self {
            Fonction::Sqrt if x < 0.0 => Err(ErreurCalcul::math(format!(
                "racine carrée d'un nombre négatif ({x})"
            ))),
            Fonction::Log | Fonction::Log10 if x <= 0.0 => Err(ErreurCalcul::math(format!(
                "logarithme d'un nombre non positif ({x})"
            ))),
            Fonction::Sqrt => Ok(x.sqrt()),
            Fonction::Log => Ok(x.ln()),
            Fonction::Log10 => Ok(x.log10()),
            Fonction::Sin => Ok(x.sin()),
            Fonction::Cos => Ok(x.cos()),
            Fonction::Tan => Ok(x.tan()),
        }
    }
}

pub fn constante(nom: &str) -> Option<f64> {
    match nom {
        "pi" => Some(PI),
        "e" => Some(E),
        _ => None,
    }
}

fn precedence(a: Attente) -> i32 {
    match a {
        Attente::Binaire(Bin::Add | Bin::Sub) => 1,
        Attente::Binaire(Bin::Mul | Bin::Div) => 2,
        Attente::Neg => 3,
        Attente::Binaire(Bin::Pow) => 4,
        Attente::LPar | Attente::Appel(_) => 0,
    }
}

fn vers_sortie(a: Attente) -> Option<Element> {
    match a {
        Attente::Binaire(b) => Some(Element::Binaire(b)),
        Attente::Neg => Some(Element::Neg),
        Attente::Appel(f) => Some(Element::Appel(f)),
        Attente::LPar => None,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sqrt"), LPar, Num(2), Plus, Num(2), RPar]
///   rpn:    [2, 2, +, sqrt]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Element>, ErreurCalcul> {
    let mut out: Vec<Element> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Attente> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et les opérandes manquants.
    let mut prev_was_value = false;

    for (i, tok) in tokens.iter().enumerate() {
        match tok {
            Tok::Num(v) => {
                if prev_was_value {
                    return Err(ErreurCalcul::syntaxe(format!(
                        "nombre « {v} » inattendu (opérateur manquant)"
                    )));
                }
                out.push(Element::Valeur(*v));
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if prev_was_value {
                    return Err(ErreurCalcul::syntaxe(format!(
                        "nom « {name} » inattendu (opérateur manquant)"
                    )));
                }
                let appel = matches!(tokens.get(i + 1), Some(Tok::LPar));
                if appel {
                    let f = Fonction::depuis_nom(name).ok_or_else(|| {
                        ErreurCalcul::SymboleInconnu(format!("fonction « {name} »"))
                    })?;
                    // fonction : on la garde sur la pile (elle sortira après son argument)
                    ops.push(Attente::Appel(f));
                    prev_was_value = false;
                } else if let Some(v) = constante(name) {
                    out.push(Element::Valeur(v));
                    prev_was_value = true;
                } else if Fonction::depuis_nom(name).is_some() {
                    return Err(ErreurCalcul::syntaxe(format!(
                        "la fonction « {name} » attend un argument entre parenthèses"
                    )));
                } else {
                    return Err(ErreurCalcul::SymboleInconnu(format!("« {name} »")));
                }
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(ErreurCalcul::syntaxe("« ( » inattendue (opérateur manquant)"));
                }
                ops.push(Attente::LPar);
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(ErreurCalcul::syntaxe("opérande manquant avant « ) »"));
                }
                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    match vers_sortie(top) {
                        Some(e) => out.push(e),
                        None => {
                            ouverte = true;
                            break;
                        }
                    }
                }
                if !ouverte {
                    return Err(ErreurCalcul::syntaxe("« ) » sans « ( » correspondante"));
                }

                // si une fonction est au sommet, on la sort aussi
                if let Some(Attente::Appel(f)) = ops.last().copied() {
                    ops.pop();
                    out.push(Element::Appel(f));
                }

                prev_was_value = true;
            }

            Tok::Plus if !prev_was_value => {
                // plus unaire : neutre
            }

            Tok::Minus if !prev_was_value => {
                // moins unaire : préfixe, ne dépile rien
                ops.push(Attente::Neg);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let Some(b) = Bin::depuis_tok(tok) else {
                    continue;
                };
                if !prev_was_value {
                    return Err(ErreurCalcul::syntaxe(format!(
                        "opérande manquant avant « {} »",
                        b.symbole()
                    )));
                }

                let entrant = Attente::Binaire(b);
                let p_tok = precedence(entrant);

                // dépile tant que la précédence/associativité l'exige
                // ('(' et appels ont précédence 0 : ils bloquent)
                while let Some(top) = ops.last().copied() {
                    let p_top = precedence(top);
                    let doit_pop = if b == Bin::Pow {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };
                    if !doit_pop || p_top == 0 {
                        break;
                    }
                    ops.pop();
                    if let Some(e) = vers_sortie(top) {
                        out.push(e);
                    }
                }

                ops.push(entrant);
                prev_was_value = false;
            }
        }
    }

    if !prev_was_value {
        return Err(ErreurCalcul::syntaxe("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        match vers_sortie(op) {
            Some(e) => out.push(e),
            None => return Err(ErreurCalcul::syntaxe("parenthèses non fermées")),
        }
    }

    Ok(out)
}

/// Évalue une RPN. Toute valeur intermédiaire non finie est une ErreurCalcul::Math.
pub fn eval_rpn(rpn: &[Element]) -> Result<f64, ErreurCalcul> {
    let mut st: Vec<f64> = Vec::with_capacity(rpn.len());

    for el in rpn {
        let v = match el {
            Element::Valeur(v) => *v,

            Element::Neg => {
                let x = st.pop().ok_or_else(|| ErreurCalcul::syntaxe("expression invalide"))?;
                -x
            }

            Element::Appel(f) => {
                let x = st
                    .pop()
                    .ok_or_else(|| ErreurCalcul::syntaxe("fonction sans argument"))?;
                f.appliquer(x)?
            }

            Element::Binaire(b) => {
                let rhs = st.pop().ok_or_else(|| ErreurCalcul::syntaxe("expression invalide"))?;
                let lhs = st.pop().ok_or_else(|| ErreurCalcul::syntaxe("expression invalide"))?;
                match b {
                    Bin::Add => lhs + rhs,
                    Bin::Sub => lhs - rhs,
                    Bin::Mul => lhs * rhs,
                    Bin::Div => {
                        if rhs == 0.0 {
                            return Err(ErreurCalcul::math("division par zéro"));
                        }
                        lhs / rhs
                    }
                    Bin::Pow => lhs.powf(rhs),
                }
            }
        };

        if v.is_nan() {
            return Err(ErreurCalcul::math(format!("résultat indéfini ({el})")));
        }
        if v.is_infinite() {
            return Err(ErreurCalcul::math(format!("dépassement de capacité ({el})")));
        }
        st.push(v);
    }

    if st.len() != 1 {
        return Err(ErreurCalcul::syntaxe("expression invalide"));
    }
    st.pop().ok_or_else(|| ErreurCalcul::syntaxe("expression invalide"))
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Valeur(v) => write!(f, "{v}"),
            Element::Binaire(b) => write!(f, "{}", b.symbole()),
            Element::Neg => f.write_str("neg"),
            Element::Appel(fun) => f.write_str(fun.nom()),
        }
    }
}

/// Format utilitaire (journal) : RPN en texte.
pub fn format_rpn(rpn: &[Element]) -> String {
    rpn.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(" ")
}
