// src/app.rs
//
// Calculatrice — module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + theme.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB) :
//   horloge -> minuterie, clavier global, thème (application + persistance)
//
// Important:
// - Le temps vient d’egui (`i.time`, secondes depuis le démarrage) :
//   std::time::Instant n’existe pas en wasm32-unknown-unknown.

pub mod etat;
pub mod theme;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use std::time::Duration;

use eframe::egui;
use tracing::info;

use etat::Action;
use theme::Theme;

impl AppCalc {
    /// Construction au démarrage : thème relu du stockage puis appliqué.
    pub fn depuis_contexte(cc: &eframe::CreationContext<'_>) -> Self {
        let theme = Theme::charger(cc.storage);
        cc.egui_ctx.set_theme(theme.visuel());
        info!(theme = theme.as_str(), "démarrage");
        Self::avec_theme(theme)
    }

    fn basculer_theme(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.theme = self.theme.bascule();
        ctx.set_theme(self.theme.visuel());
        if let Some(storage) = frame.storage_mut() {
            self.theme.sauver(storage);
        }
        info!(theme = self.theme.as_str(), "thème basculé");
    }

    /// Clavier global (pas de champ texte) :
    /// chiffres/opérateurs/parenthèses/'.' -> valeur ; Enter ou '=' -> égal ;
    /// Backspace -> retour ; Escape -> effacer ; '%' -> pourcent.
    ///
    /// Enter est consommé avant la vue : sinon egui le rejoue en clic sur la
    /// touche focalisée (Tab) et "=" partirait après un chiffre fantôme.
    fn clavier(&mut self, ctx: &egui::Context, maintenant: Duration) {
        let events = ctx.input_mut(|i| {
            let events = i.events.clone();
            i.consume_key(egui::Modifiers::NONE, egui::Key::Enter);
            events
        });

        for event in events {
            match event {
                egui::Event::Text(texte) => {
                    for c in texte.chars() {
                        match c {
                            '=' => self.action(Action::Egal, maintenant),
                            '%' => self.action(Action::Pourcent, maintenant),
                            '0'..='9' | '+' | '-' | '*' | '/' | '(' | ')' | '.' => {
                                self.appuyer_valeur(c)
                            }
                            _ => {}
                        }
                    }
                }
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => match key {
                    egui::Key::Enter if modifiers.is_none() => {
                        self.action(Action::Egal, maintenant)
                    }
                    egui::Key::Backspace => self.action(Action::Retour, maintenant),
                    egui::Key::Escape => self.action(Action::Effacer, maintenant),
                    _ => {}
                },
                _ => {}
            }
        }
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        let maintenant = Duration::from_secs_f64(ctx.input(|i| i.time).max(0.0));

        // Minuterie d’erreur échue ?
        self.tic(maintenant);

        self.clavier(ctx, maintenant);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui, maintenant);
        });

        if std::mem::take(&mut self.bascule_theme_demandee) {
            self.basculer_theme(ctx, frame);
        }

        // egui ne redessine que sur événement : on se réveille pile à l’échéance.
        if let Some(reste) = self.delai_restant(maintenant) {
            ctx.request_repaint_after(reste);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.theme.sauver(storage);
    }
}
