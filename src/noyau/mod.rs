//! Noyau de calcul (f64)
//!
//! Organisation interne :
//! - erreur.rs   : taxonomie des échecs (thiserror)
//! - pourcent.rs : alphabet strict + réécriture "N%" -> "(N/100)"
//! - jetons.rs   : tokenisation
//! - rpn.rs      : shunting-yard + évaluation sur pile
//! - format.rs   : arrondi 12 décimales + forme canonique
//! - eval.rs     : pipeline complet

pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod pourcent;
pub mod rpn;

#[cfg(test)]
pub(crate) mod tests_fuzz_safe;

// API publique minimale
pub use eval::eval_expression;
pub use format::{arrondir, forme_canonique};
