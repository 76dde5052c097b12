// src/noyau/format.rs
//
// Affichage du résultat :
// - arrondi à 12 décimales (biais epsilon contre les restes binaires : 0.1+0.2 -> 0.3)
// - forme canonique texte (relisible par le tokenizer, jamais d’exposant)

/// Nombre de décimales conservées à l’affichage.
pub const CHIFFRES_ARRONDI: i32 = 12;

/// Arrondi "demi vers le haut" à CHIFFRES_ARRONDI décimales, après biais f64::EPSILON.
///
/// Pas de `(s + 0.5).floor()` : entre 2^52 et 2^53 l’addition arrondit elle-même
/// (pair le plus proche). `s - s.floor()` est exact.
///
/// Si la mise à l’échelle déborde (|v| énorme), `v` est rendu tel quel :
/// ces valeurs n’ont de toute façon plus de partie fractionnaire représentable.
pub fn arrondir(v: f64) -> f64 {
    let echelle = 10f64.powi(CHIFFRES_ARRONDI);
    let s = (v + f64::EPSILON) * echelle;
    if !s.is_finite() {
        return v;
    }
    let plancher = s.floor();
    let arrondi = if s - plancher >= 0.5 {
        plancher + 1.0
    } else {
        plancher
    };
    arrondi / echelle
}

/// Texte canonique d’une valeur finie : "14", "0.3", "-2.5".
/// `-0` devient "0".
pub fn forme_canonique(v: f64) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    format!("{v}")
}
