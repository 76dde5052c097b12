// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur f64
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis l’évaluer sur une pile (pas d’AST : le domaine est purement numérique)
//
// Règles:
// - '*' '/' avant '+' '-', associativité à gauche
// - Signe unaire:
//    - si '+' ou '-' arrive quand on attend une valeur, c’est un signe (Pos/Neg),
//      préfixe, plus prioritaire que '*' et '/' : "2*-3" = 2 * (-3)
// - Deux valeurs côte à côte ("2(3)", "(2)(3)", "5 5") : refusé
//
// NOTE:
// - Division par zéro : IEEE (±∞ / NaN). C’est eval.rs qui refuse le non-fini.

use super::erreur::ErreurCalcul;
use super::jetons::Tok;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Neg,
    Pos,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rpn {
    Num(f64),
    Op(Op),
}

/// Élément de la pile d’opérateurs.
#[derive(Clone, Copy, Debug)]
enum Pile {
    LPar,
    Op(Op),
}

fn precedence(op: Op) -> u8 {
    match op {
        Op::Add | Op::Sub => 1,
        Op::Mul | Op::Div => 2,
        Op::Neg | Op::Pos => 3,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Star, Minus, Num(3)]
///   rpn:    [Num(2), Num(3), Neg, Mul]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, ErreurCalcul> {
    let mut out: Vec<Rpn> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Pile> = Vec::new();

    // “valeur” = un nombre ou une parenthèse fermée.
    // Sert à détecter le signe unaire et les juxtapositions.
    let mut prev_was_value = false;

    for tok in tokens {
        match tok {
            Tok::Num(v) => {
                if prev_was_value {
                    return Err(ErreurCalcul::malformee("deux valeurs côte à côte"));
                }
                out.push(Rpn::Num(*v));
                prev_was_value = true;
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(ErreurCalcul::malformee("deux valeurs côte à côte"));
                }
                ops.push(Pile::LPar);
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(ErreurCalcul::malformee("parenthèse fermée sans opérande"));
                }
                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Pile::LPar) => break,
                        Some(Pile::Op(op)) => out.push(Rpn::Op(op)),
                        None => return Err(ErreurCalcul::malformee("parenthèse fermante en trop")),
                    }
                }
                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus if !prev_was_value => {
                // signe préfixe : rien à dépiler (pas d’opérande gauche)
                let op = if matches!(tok, Tok::Minus) { Op::Neg } else { Op::Pos };
                ops.push(Pile::Op(op));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                if !prev_was_value {
                    return Err(ErreurCalcul::malformee("opérateur sans opérande gauche"));
                }
                let op = match tok {
                    Tok::Plus => Op::Add,
                    Tok::Minus => Op::Sub,
                    Tok::Star => Op::Mul,
                    _ => Op::Div,
                };

                // associativité à gauche : on sort tout ce qui est au moins aussi prioritaire
                while let Some(Pile::Op(top)) = ops.last().copied() {
                    if precedence(top) < precedence(op) {
                        break;
                    }
                    out.push(Rpn::Op(top));
                    ops.pop();
                }

                ops.push(Pile::Op(op));
                prev_was_value = false;
            }
        }
    }

    if !prev_was_value {
        return Err(ErreurCalcul::malformee("opérande manquant en fin d’expression"));
    }

    // vide la pile ops
    while let Some(p) = ops.pop() {
        match p {
            Pile::LPar => return Err(ErreurCalcul::malformee("parenthèses non fermées")),
            Pile::Op(op) => out.push(Rpn::Op(op)),
        }
    }

    Ok(out)
}

/// Évalue une RPN sur une pile de f64 (sémantique IEEE).
pub fn eval_rpn(rpn: &[Rpn]) -> Result<f64, ErreurCalcul> {
    let mut st: Vec<f64> = Vec::new();
    let manque = || ErreurCalcul::malformee("expression invalide");

    for item in rpn {
        match *item {
            Rpn::Num(v) => st.push(v),

            Rpn::Op(op @ (Op::Neg | Op::Pos)) => {
                let x = st.pop().ok_or_else(manque)?;
                st.push(if op == Op::Neg { -x } else { x });
            }

            Rpn::Op(op) => {
                let b = st.pop().ok_or_else(manque)?;
                let a = st.pop().ok_or_else(manque)?;
                let v = match op {
                    Op::Add => a + b,
                    Op::Sub => a - b,
                    Op::Mul => a * b,
                    Op::Div => a / b,
                    Op::Neg | Op::Pos => unreachable!(),
                };
                st.push(v);
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err(manque()),
    }
}

/// Format utilitaire (journaux) : RPN en texte.
pub fn format_rpn(rpn: &[Rpn]) -> String {
    rpn.iter()
        .map(|r| match r {
            Rpn::Num(v) => format!("{v}"),
            Rpn::Op(Op::Add) => "+".to_string(),
            Rpn::Op(Op::Sub) => "-".to_string(),
            Rpn::Op(Op::Mul) => "*".to_string(),
            Rpn::Op(Op::Div) => "/".to_string(),
            Rpn::Op(Op::Neg) => "neg".to_string(),
            Rpn::Op(Op::Pos) => "pos".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::jetons::tokenize;

    fn calc(s: &str) -> Result<f64, ErreurCalcul> {
        let rpn = to_rpn(&tokenize(s)?)?;
        eval_rpn(&rpn)
    }

    #[test]
    fn precedence_classique() {
        assert_eq!(calc("2+3*4"), Ok(14.0));
        assert_eq!(calc("(2+3)*4"), Ok(20.0));
        assert_eq!(calc("8/4/2"), Ok(1.0));
        assert_eq!(calc("10-4-3"), Ok(3.0));
    }

    #[test]
    fn rpn_lisible() {
        let rpn = to_rpn(&tokenize("2*-3").unwrap()).unwrap();
        assert_eq!(format_rpn(&rpn), "2 3 neg *");
    }

    #[test]
    fn signes_unaires() {
        assert_eq!(calc("2*-3"), Ok(-6.0));
        assert_eq!(calc("-2*3"), Ok(-6.0));
        assert_eq!(calc("5+-3"), Ok(2.0));
        assert_eq!(calc("-(1+2)"), Ok(-3.0));
        assert_eq!(calc("+4"), Ok(4.0));
    }

    #[test]
    fn juxtaposition_refusee() {
        assert!(calc("2(3)").is_err());
        assert!(calc("(2)(3)").is_err());
        assert!(calc("5 5").is_err());
    }

    #[test]
    fn parentheses_desequilibrees() {
        assert!(calc("(1+2").is_err());
        assert!(calc("1+2)").is_err());
        assert!(calc("()").is_err());
    }

    #[test]
    fn operandes_manquants() {
        assert!(calc("5+").is_err());
        assert!(calc("*5").is_err());
        assert!(calc("5*/2").is_err());
        assert!(calc("").is_err());
    }

    #[test]
    fn division_par_zero_ieee() {
        assert_eq!(calc("1/0"), Ok(f64::INFINITY));
        assert!(calc("0/0").unwrap().is_nan());
    }
}
