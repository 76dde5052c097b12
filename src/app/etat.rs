//! src/app/etat.rs
//!
//! État UI (sans vue) : la machine à états de saisie.
//!
//! Rôle : posséder l’expression en cours, le dernier résultat et la minuterie
//! d’effacement d’erreur ; offrir les opérations "touche" (valeur / action).
//!
//! Contrats :
//! - Un seul propriétaire (AppCalc), pas d’état global.
//! - Le temps est injecté (`maintenant`) : aucune horloge cachée, tests déterministes.
//! - Toute saisie annule la minuterie en cours (annulation explicite, pas de re-vérification).
//!
//! Transitions :
//!   Vide --saisie--> Édition --Egal(ok)--> Affiché --saisie--> Édition
//!   Édition|Affiché --Egal(échec)--> Erreur --délai ou saisie--> Vide

use std::time::Duration;

use tracing::{debug, warn};

use super::theme::Theme;
use crate::noyau::{arrondir, eval_expression, forme_canonique};

/// Délai avant retour automatique de "Error" vers l’état vide.
pub const DELAI_EFFACEMENT_ERREUR: Duration = Duration::from_secs(2);

/// Affiché à la place d’une expression vide (garde la hauteur de ligne).
pub const ESPACE_INSECABLE: &str = "\u{00A0}";

/// Texte affiché pour tout échec d’évaluation.
pub const TEXTE_ERREUR: &str = "Error";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resultat {
    /// Pas d’évaluation depuis la dernière modification.
    Absent,
    /// Valeur finie, déjà arrondie.
    Valeur(f64),
    Erreur,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Effacer,
    Retour,
    Pourcent,
    Egal,
}

/// Minuterie armée après un échec : poignée annulable (on la jette pour annuler).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Minuterie {
    echeance: Duration,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- saisie ---
    pub expression: String,

    // --- sortie ---
    pub resultat: Resultat,

    // --- effacement différé de l’erreur ---
    minuterie: Option<Minuterie>,

    // --- préférences ---
    pub theme: Theme,

    // --- UX ---
    // Posé par vue.rs ; app.rs applique + persiste (il a accès au stockage eframe).
    pub bascule_theme_demandee: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::avec_theme(Theme::default())
    }
}

fn est_operateur(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/')
}

fn est_jeton_valeur(c: char) -> bool {
    c.is_ascii_digit() || est_operateur(c) || matches!(c, '.' | '(' | ')')
}

impl AppCalc {
    pub fn avec_theme(theme: Theme) -> Self {
        Self {
            expression: String::new(),
            resultat: Resultat::Absent,
            minuterie: None,
            theme,
            bascule_theme_demandee: false,
        }
    }

    /* ------------------------ Saisie ------------------------ */

    /// Touche "valeur" : chiffre, '.', opérateur ou parenthèse.
    ///
    /// Refus silencieux si :
    /// - '.' alors que le nombre en cours contient déjà un '.'
    /// - opérateur derrière un opérateur, sauf un '-' (signe) derrière un autre que '-'
    pub fn appuyer_valeur(&mut self, jeton: char) {
        if !est_jeton_valeur(jeton) {
            debug!(?jeton, "jeton ignoré");
            return;
        }
        self.sortir_erreur();

        if jeton == '.' && self.nombre_en_cours_a_un_point() {
            return;
        }

        if est_operateur(jeton) {
            if let Some(dernier) = self.expression.chars().last() {
                if est_operateur(dernier) && (jeton != '-' || dernier == '-') {
                    return;
                }
            }
        }

        self.expression.push(jeton);
        self.resultat = Resultat::Absent;
    }

    /// Touches "action" : C, DEL, %, =.
    /// `maintenant` ne sert qu’à armer la minuterie en cas d’échec de "=".
    pub fn action(&mut self, action: Action, maintenant: Duration) {
        self.sortir_erreur();

        match action {
            Action::Effacer => {
                self.expression.clear();
                self.resultat = Resultat::Absent;
            }
            Action::Retour => {
                if self.expression.pop().is_some() {
                    self.resultat = Resultat::Absent;
                }
            }
            Action::Pourcent => {
                if !self.expression.is_empty() && !self.expression.ends_with('%') {
                    self.expression.push('%');
                    self.resultat = Resultat::Absent;
                }
            }
            Action::Egal => self.evaluer(maintenant),
        }
    }

    fn evaluer(&mut self, maintenant: Duration) {
        if self.expression.trim().is_empty() {
            return;
        }

        match eval_expression(&self.expression) {
            Ok(v) => {
                let v = arrondir(v);
                self.resultat = Resultat::Valeur(v);
                // Nouvelle saisie = suite de la forme affichée, pas de l’ancienne expression.
                self.expression = forme_canonique(v);
            }
            Err(e) => {
                warn!(expression = %self.expression, erreur = %e, "calcul en erreur");
                self.resultat = Resultat::Erreur;
                self.expression.clear();
                self.minuterie = Some(Minuterie {
                    echeance: maintenant + DELAI_EFFACEMENT_ERREUR,
                });
            }
        }
    }

    /// Le nombre en fin d’expression (chiffres de queue) est-il précédé d’un '.' ?
    fn nombre_en_cours_a_un_point(&self) -> bool {
        self.expression
            .trim_end_matches(|c: char| c.is_ascii_digit())
            .ends_with('.')
    }

    /// Toute saisie quitte l’état Erreur et annule la minuterie.
    fn sortir_erreur(&mut self) {
        if self.minuterie.take().is_some() {
            debug!("minuterie d’erreur annulée");
        }
        if self.resultat == Resultat::Erreur {
            self.resultat = Resultat::Absent;
            self.expression.clear();
        }
    }

    /* ------------------------ Minuterie ------------------------ */

    /// À appeler à chaque image : déclenche la minuterie échue.
    pub fn tic(&mut self, maintenant: Duration) {
        let Some(m) = self.minuterie else {
            return;
        };
        if maintenant < m.echeance {
            return;
        }

        self.minuterie = None;
        self.resultat = Resultat::Absent;
        self.expression.clear();
        debug!("erreur effacée (délai écoulé)");
    }

    /// Temps restant avant déclenchement (None si aucune minuterie armée).
    pub fn delai_restant(&self, maintenant: Duration) -> Option<Duration> {
        self.minuterie
            .map(|m| m.echeance.saturating_sub(maintenant))
    }

    /* ------------------------ Affichage ------------------------ */

    /// Ligne "expression" : l’expression, ou une espace insécable si vide.
    pub fn affichage_expression(&self) -> &str {
        if self.expression.is_empty() {
            ESPACE_INSECABLE
        } else {
            &self.expression
        }
    }

    /// Ligne "résultat".
    pub fn affichage_resultat(&self) -> String {
        match self.resultat {
            Resultat::Absent if self.expression.is_empty() => "0".to_string(),
            Resultat::Absent => self.expression.clone(),
            Resultat::Valeur(v) => forme_canonique(v),
            Resultat::Erreur => TEXTE_ERREUR.to_string(),
        }
    }
}
