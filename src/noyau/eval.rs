//! Noyau — évaluation (pipeline réel)
//!
//! alphabet -> pourcentages -> jetons -> RPN -> f64 -> fini ?
//!
//! Remarque : aucune étape ne touche à l’état de l’appelant ; toute erreur
//! remonte en valeur (`ErreurCalcul`), à l’état UI de la traduire en "Error".

use tracing::{debug, trace};

use super::erreur::ErreurCalcul;
use super::jetons::{format_tokens, tokenize};
use super::pourcent::{reecrire_pourcents, valider_caracteres};
use super::rpn::{eval_rpn, format_rpn, to_rpn};

/// API publique : évalue une expression et retourne une valeur finie (non arrondie).
pub fn eval_expression(expr_str: &str) -> Result<f64, ErreurCalcul> {
    if expr_str.trim().is_empty() {
        return Err(ErreurCalcul::malformee("entrée vide"));
    }

    // 1) Alphabet (variante stricte)
    valider_caracteres(expr_str)?;

    // 2) Pourcentages : "N%" -> "(N/100)"
    let reecrite = reecrire_pourcents(expr_str);

    // 3) Jetons
    let jetons = tokenize(&reecrite)?;
    trace!(jetons = %format_tokens(&jetons), "jetons");

    // 4) RPN
    let rpn = to_rpn(&jetons)?;
    trace!(rpn = %format_rpn(&rpn), "rpn");

    // 5) Valeur
    let v = eval_rpn(&rpn)?;

    // 6) Fini ?
    if !v.is_finite() {
        return Err(ErreurCalcul::ResultatNonFini);
    }

    debug!(expression = expr_str, %reecrite, valeur = v, "évaluation");
    Ok(v)
}
