// src/noyau/erreur.rs
//
// Taxonomie des échecs du noyau.
// L’état UI (app/etat.rs) les écrase toutes en un seul affichage "Error" :
// la distinction ne sert qu’aux journaux et aux tests.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurCalcul {
    /// Symbole hors alphabet {0-9 . + - * / ( ) % espace}.
    #[error("caractère invalide: {0:?}")]
    CaractereInvalide(char),

    /// Échec syntaxique (parenthèses, opérande manquant, nombre mal formé…).
    #[error("expression malformée: {0}")]
    ExpressionMalformee(String),

    /// Division par zéro, 0/0 ou dépassement.
    #[error("résultat non fini")]
    ResultatNonFini,
}

impl ErreurCalcul {
    pub(crate) fn malformee(msg: impl Into<String>) -> Self {
        Self::ExpressionMalformee(msg.into())
    }
}
