// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Écran deux lignes : expression (petite) + résultat (grand)
// - Tactile : gros boutons, pavé 4 colonnes
// - Bouton thème : ne fait que poser une demande (app.rs applique + persiste)
//
// Note :
// - Le clavier est géré dans app.rs (global, pas de champ texte à focaliser)

use std::time::Duration;

use eframe::egui;

use super::etat::{Action, AppCalc, Resultat};
use super::theme::Theme;

/// Taille d’une touche du pavé.
const TOUCHE: [f32; 2] = [64.0, 48.0];

/// Pavé : une ligne = quatre touches.
const PAVE: [[Touche; 4]; 5] = [
    [
        Touche::Action("C", Action::Effacer),
        Touche::Action("DEL", Action::Retour),
        Touche::Action("%", Action::Pourcent),
        Touche::Valeur('/'),
    ],
    [
        Touche::Valeur('7'),
        Touche::Valeur('8'),
        Touche::Valeur('9'),
        Touche::Valeur('*'),
    ],
    [
        Touche::Valeur('4'),
        Touche::Valeur('5'),
        Touche::Valeur('6'),
        Touche::Valeur('-'),
    ],
    [
        Touche::Valeur('1'),
        Touche::Valeur('2'),
        Touche::Valeur('3'),
        Touche::Valeur('+'),
    ],
    [
        Touche::Valeur('('),
        Touche::Valeur('0'),
        Touche::Valeur(')'),
        Touche::Valeur('.'),
    ],
];

#[derive(Clone, Copy, Debug)]
enum Touche {
    Valeur(char),
    Action(&'static str, Action),
}

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui, maintenant: Duration) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        ui.horizontal(|ui| {
            ui.heading(crate::TITRE_APP);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                self.ui_bouton_theme(ui);
            });
        });

        ui.add_space(8.0);
        self.ui_ecran(ui);
        ui.add_space(8.0);
        self.ui_pave(ui, maintenant);
    }

    fn ui_bouton_theme(&mut self, ui: &mut egui::Ui) {
        let (libelle, tip) = match self.theme {
            Theme::Clair => ("🌙", "Passer en thème sombre"),
            Theme::Sombre => ("☀", "Passer en thème clair"),
        };
        let resp = ui
            .add(egui::Button::new(libelle).selected(self.theme == Theme::Sombre))
            .on_hover_text(tip);
        if resp.clicked() {
            self.bascule_theme_demandee = true;
        }
    }

    fn ui_ecran(&self, ui: &mut egui::Ui) {
        // Affichage lecture seule “stable” (pas de TextEdit), cadre visuel via Frame.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.monospace(self.affichage_expression());

                    let texte = egui::RichText::new(self.affichage_resultat())
                        .monospace()
                        .size(32.0);
                    if self.resultat == Resultat::Erreur {
                        ui.label(texte.color(ui.visuals().error_fg_color));
                    } else {
                        ui.label(texte);
                    }
                });
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui, maintenant: Duration) {
        egui::Grid::new("pave_calculatrice")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in PAVE {
                    for touche in ligne {
                        self.bouton(ui, touche, maintenant);
                    }
                    ui.end_row();
                }
            });

        ui.add_space(6.0);

        let largeur = 4.0 * TOUCHE[0] + 3.0 * 6.0;
        let eq = ui.add_sized([largeur, TOUCHE[1]], egui::Button::new("="));
        if eq.clicked() {
            self.action(Action::Egal, maintenant);
        }
    }

    fn bouton(&mut self, ui: &mut egui::Ui, touche: Touche, maintenant: Duration) {
        let libelle = match touche {
            Touche::Valeur(c) => c.to_string(),
            Touche::Action(l, _) => l.to_string(),
        };

        let resp = ui.add_sized(TOUCHE, egui::Button::new(libelle));
        if !resp.clicked() {
            return;
        }

        match touche {
            Touche::Valeur(c) => self.appuyer_valeur(c),
            Touche::Action(_, a) => self.action(a, maintenant),
        }
    }
}
