//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants clés : Ok => valeur finie ; la forme canonique se ré-évalue à l’identique

use std::time::{Duration, Instant};

use super::erreur::ErreurCalcul;
use super::{arrondir, eval_expression, forme_canonique};

/* ------------------------ RNG déterministe minimal ------------------------ */

/// Partagé avec les tests de l’état UI (app/etat.rs).
#[derive(Clone)]
pub(crate) struct Rng {
    state: u64,
}
impl Rng {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    pub(crate) fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    pub(crate) fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    pub(crate) fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    // 0 inclus : la division par zéro doit arriver naturellement
    let n = rng.pick(13);
    match rng.pick(4) {
        0 => format!("{n}.{}", rng.pick(100)),
        1 => format!("{n}%"),
        _ => format!("{n}"),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_nombre(rng);
    }

    let a = gen_expr(rng, depth - 1);
    let b = gen_expr(rng, depth - 1);
    match rng.pick(6) {
        0 => gen_nombre(rng),
        1 => format!("({a}+{b})"),
        2 => format!("{a}-{b}"),
        3 => format!("{a}*{b}"),
        4 => format!("({a})/{b}"),
        _ => {
            if rng.coin() {
                format!("-({a})")
            } else {
                format!("{a}*-{b}")
            }
        }
    }
}

/// Chaîne arbitraire sur l’alphabet complet (souvent malformée).
fn gen_bruit(rng: &mut Rng, len: usize) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '2', '5', '9', '.', '+', '-', '*', '/', '(', ')', '%', ' ',
    ];
    (0..len)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_invariant_fini() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        // Même entrée => même sortie
        let r1 = eval_expression(&expr);
        let r2 = eval_expression(&expr);
        assert_eq!(
            r1.as_ref().map(|v| v.to_bits()),
            r2.as_ref().map(|v| v.to_bits()),
            "non déterministe: {expr:?}"
        );

        match r1 {
            Ok(v) => {
                assert!(v.is_finite(), "Ok non fini: expr={expr:?}");
                seen_ok += 1;
            }
            Err(e) => {
                // Les générateurs ne produisent que des expressions bien formées :
                // seul le non-fini (division par zéro) est attendu.
                assert_eq!(
                    e,
                    ErreurCalcul::ResultatNonFini,
                    "erreur non attendue: expr={expr:?}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_forme_canonique_reevaluable() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        let Ok(v) = eval_expression(&expr) else {
            continue;
        };

        // "=" puis "=" : la forme affichée doit se relire à la même valeur
        let affichee = arrondir(v);
        let texte = forme_canonique(affichee);
        let relu = eval_expression(&texte)
            .unwrap_or_else(|e| panic!("forme canonique illisible: {texte:?} ({expr:?}) err={e}"));
        assert_eq!(relu, affichee, "texte={texte:?} expr={expr:?}");
    }
}

#[test]
fn fuzz_safe_bruit_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..500 {
        budget(t0, max);

        let len = 1 + rng.pick(16) as usize;
        let expr = gen_bruit(&mut rng, len);

        // Contrat : jamais de panique, et Ok => fini
        if let Ok(v) = eval_expression(&expr) {
            assert!(v.is_finite(), "Ok non fini: expr={expr:?}");
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("0.5", 800);
    budget(t0, max);

    let v = eval_expression(&expr).unwrap_or_else(|e| panic!("err: {e}"));

    // 800*(1/2) = 400
    assert_eq!(forme_canonique(arrondir(v)), "400");
}

#[test]
fn fuzz_safe_imbrication_profonde() {
    // Tout est itératif (pas de récursion) : 2000 niveaux ne doivent pas faire déborder la pile.
    let n = 2000;
    let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(eval_expression(&expr), Ok(1.0));
}
