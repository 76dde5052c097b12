// src/noyau/pourcent.rs
//
// Pré-traitement textuel (avant jetons) :
// - validation de l’alphabet (variante stricte)
// - réécriture "N%" -> "(N/100)"
//
// Les deux motifs sont compilés une seule fois (OnceLock).

use std::sync::OnceLock;

use regex::Regex;

use super::erreur::ErreurCalcul;

/// Alphabet autorisé, tel quel (sans \d : Regex est Unicode par défaut).
const MOTIF_ALPHABET: &str = r"^[0-9+\-*/(). %]+$";

/// Nombre maximal (entier ou décimal) collé à un '%'.
const MOTIF_POURCENT: &str = r"([0-9]+(?:\.[0-9]+)?)%";

static ALPHABET: OnceLock<Regex> = OnceLock::new();
static POURCENT: OnceLock<Regex> = OnceLock::new();

fn alphabet() -> &'static Regex {
    ALPHABET.get_or_init(|| Regex::new(MOTIF_ALPHABET).expect("motif alphabet"))
}

fn pourcent() -> &'static Regex {
    POURCENT.get_or_init(|| Regex::new(MOTIF_POURCENT).expect("motif pourcent"))
}

fn est_autorise(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.' | '%' | ' ')
}

/// Refuse toute chaîne contenant un symbole hors alphabet.
/// L’erreur porte le premier caractère fautif.
pub fn valider_caracteres(s: &str) -> Result<(), ErreurCalcul> {
    if alphabet().is_match(s) {
        return Ok(());
    }
    match s.chars().find(|c| !est_autorise(*c)) {
        Some(c) => Err(ErreurCalcul::CaractereInvalide(c)),
        None => Err(ErreurCalcul::malformee("entrée vide")),
    }
}

/// "50%" -> "(50/100)", "2+12.5%" -> "2+(12.5/100)".
/// Un '%' orphelin reste en place (le tokenizer le refusera).
pub fn reecrire_pourcents(s: &str) -> String {
    pourcent().replace_all(s, "(${1}/100)").into_owned()
}
