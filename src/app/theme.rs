//! src/app/theme.rs
//!
//! Préférence clair/sombre, indépendante du calcul.
//! Stockée sous une seule clé texte ("light" | "dark") :
//! localStorage côté web, fichier de persistance eframe côté natif.

use std::str::FromStr;

use eframe::egui;
use thiserror::Error;
use tracing::{debug, warn};

/// Clé de stockage (identique à l’ancienne version web : préférences conservées).
pub const CLE_THEME: &str = "calc-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Clair,
    Sombre,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("thème inconnu: {0:?}")]
pub struct ThemeInconnu(String);

impl FromStr for Theme {
    type Err = ThemeInconnu;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Clair),
            "dark" => Ok(Theme::Sombre),
            autre => Err(ThemeInconnu(autre.to_string())),
        }
    }
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Clair => "light",
            Theme::Sombre => "dark",
        }
    }

    pub fn bascule(self) -> Self {
        match self {
            Theme::Clair => Theme::Sombre,
            Theme::Sombre => Theme::Clair,
        }
    }

    pub fn visuel(self) -> egui::Theme {
        match self {
            Theme::Clair => egui::Theme::Light,
            Theme::Sombre => egui::Theme::Dark,
        }
    }

    /// Lecture au démarrage : absent ou illisible => clair.
    pub fn charger(storage: Option<&dyn eframe::Storage>) -> Self {
        let Some(brut) = storage.and_then(|s| s.get_string(CLE_THEME)) else {
            debug!("aucun thème enregistré, clair par défaut");
            return Theme::default();
        };

        brut.parse().unwrap_or_else(|e: ThemeInconnu| {
            warn!(erreur = %e, "thème enregistré ignoré");
            Theme::default()
        })
    }

    /// Écriture immédiate (appelée à chaque bascule + à la sauvegarde eframe).
    pub fn sauver(self, storage: &mut dyn eframe::Storage) {
        storage.set_string(CLE_THEME, self.as_str().to_string());
        storage.flush();
    }
}
