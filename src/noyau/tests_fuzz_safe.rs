//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : pour + - * / sur des littéraux, même valeur qu'une réduction
//!   indépendante (produits d'abord, puis somme de gauche à droite)

use std::time::{Duration, Instant};

use super::{evaluer, formater, tracer_brut, TypeErreur};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération ------------------------ */

fn gen_litteral(rng: &mut Rng) -> f64 {
    // jamais 0 : pas de division par zéro dans la propriété de précédence
    let entier = (rng.pick(9) + 1) as f64;
    if rng.coin() {
        entier + 0.5
    } else {
        entier
    }
}

/// Expression plate "a op b op c ..." + valeurs et opérateurs pour la réduction de référence.
fn gen_plate(rng: &mut Rng, n: usize) -> (String, Vec<f64>, Vec<char>) {
    let mut valeurs = vec![gen_litteral(rng)];
    let mut ops = Vec::new();
    let mut texte = valeurs[0].to_string();

    for _ in 1..n {
        let op = match rng.pick(4) {
            0 => '+',
            1 => '-',
            2 => '*',
            _ => '/',
        };
        let v = gen_litteral(rng);
        texte.push(op);
        texte.push_str(&v.to_string());
        ops.push(op);
        valeurs.push(v);
    }
    (texte, valeurs, ops)
}

/// Réduction de référence : * / d'abord (gauche à droite), puis + - (gauche à droite).
fn reduction_reference(valeurs: &[f64], ops: &[char]) -> f64 {
    let mut termes = vec![valeurs[0]];
    let mut signes = vec!['+'];

    for (op, &v) in ops.iter().zip(&valeurs[1..]) {
        match op {
            '*' => {
                if let Some(t) = termes.last_mut() {
                    *t *= v;
                }
            }
            '/' => {
                if let Some(t) = termes.last_mut() {
                    *t /= v;
                }
            }
            s => {
                termes.push(v);
                signes.push(*s);
            }
        }
    }

    termes
        .iter()
        .zip(&signes)
        .fold(0.0, |acc, (t, s)| if *s == '-' { acc - t } else { acc + t })
}

fn gen_atome(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "pi".to_string(),
        1 => "e".to_string(),
        2 => format!("sqrt({})", rng.pick(20)),
        3 => format!("ln({})", rng.pick(5)),
        4 => format!("log({})", rng.pick(1000)),
        _ => rng.pick(10).to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atome(rng);
    }
    let a = gen_expr(rng, depth - 1);
    let b = gen_expr(rng, depth - 1);
    match rng.pick(7) {
        0 => format!("({a}+{b})"),
        1 => format!("({a}-{b})"),
        2 => format!("({a}*{b})"),
        3 => format!("({a}/{b})"),
        4 => format!("sin({a})"),
        5 => format!("cos({b})"),
        _ => gen_atome(rng),
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_precedence_contre_reference() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..300 {
        budget(t0, max);

        let n = 2 + rng.pick(6) as usize;
        let (expr, valeurs, ops) = gen_plate(&mut rng, n);
        let attendu = reduction_reference(&valeurs, &ops);
        let obtenu = evaluer(&expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));

        let tolerance = 1e-9 * attendu.abs().max(1.0);
        assert!(
            (obtenu - attendu).abs() <= tolerance,
            "expr={expr:?} obtenu={obtenu} attendu={attendu}"
        );
    }
}

#[test]
fn fuzz_safe_determinisme_et_erreurs_classees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_ok = 0usize;
    let mut seen_math = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        // même entrée => même sortie
        let a = evaluer(&expr);
        let b = evaluer(&expr);
        assert_eq!(a, b, "expr={expr:?}");

        match a {
            Ok(v) => {
                assert!(v.is_finite(), "expr={expr:?} valeur non finie {v}");
                seen_ok += 1;
            }
            Err(e) => {
                // expressions générées bien formées : seules les erreurs de domaine sont permises
                assert_eq!(e.kind(), TypeErreur::Math, "expr={expr:?} err={e}");
                seen_math += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_math > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_demarche_finit_toujours_par_le_resultat() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..100 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        let lignes = tracer_brut(&expr);
        assert_eq!(lignes[0], format!("Input: {expr}"));

        if let Ok(v) = evaluer(&expr) {
            let derniere = lignes.last().cloned().unwrap_or_default();
            assert_eq!(derniere, format!("Final Result: {}", formater(v)), "expr={expr:?}");
        }
    }
}

#[test]
fn fuzz_safe_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // pile d'évaluation itérative : une somme longue ne doit pas faire sauter la pile
    let expr = vec!["0.5"; 2000].join("+");
    budget(t0, max);

    let v = evaluer(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    assert_eq!(formater(v), "1000");
}
