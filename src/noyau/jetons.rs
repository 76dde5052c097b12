// src/noyau/jetons.rs

use super::erreur::ErreurCalcul;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    Plus,
    Minus,
    Star,
    Slash,

    LPar,
    RPar,
}

/// Tokenize une chaîne (déjà validée + pourcentages réécrits) en jetons.
/// Supporte:
/// - nombres décimaux : 12, 12.5, 5., .5 (un seul '.', au moins un chiffre)
/// - opérateurs + - * /
/// - parenthèses ( )
/// - espaces ignorés
///
/// Les zéros de tête sont lus en décimal ("010" = 10).
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalcul> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            _ => None,
        };
        if let Some(tok) = simple {
            out.push(tok);
            i += 1;
            continue;
        }

        // Nombre : suite maximale de chiffres et de '.'
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let texte: String = chars[start..i].iter().collect();
            let v = texte
                .parse::<f64>()
                .map_err(|_| ErreurCalcul::malformee(format!("nombre invalide: {texte:?}")))?;
            out.push(Tok::Num(v));
            continue;
        }

        // '%' orphelin (non réécrit) ou tout autre symbole
        return Err(ErreurCalcul::malformee(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// Format utilitaire (journaux) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(|t| match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
