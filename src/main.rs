// src/main.rs
//
// Calculatrice — point d’entrée NATIF + WEB (WASM)
// ------------------------------------------------
// But:
// - NATIF (Linux/Windows/macOS) : eframe::run_native + NativeOptions + tracing-subscriber
// - WEB  (wasm32)              : eframe::WebRunner + WebOptions + <canvas>
//                                + journaux vers la console + service worker (hors-ligne)
//
// Côté WEB (WASM) : index.html (racine du dépôt) contient le canvas :
//   <canvas id="the_canvas_id"></canvas>
//
// IMPORTANT (structure projet):
// - `impl eframe::App for AppCalc` vit dans src/app.rs
// - Ici: point d’entrée seulement (natif + web)

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;
mod noyau;

use app::AppCalc;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use tracing_subscriber::EnvFilter;

    // RUST_LOG=debug pour suivre jetons / RPN / minuterie
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([320.0, 520.0])
            .with_min_inner_size([300.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(|cc| Ok(Box::new(AppCalc::depuis_contexte(cc)))),
    )
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
    // On laisse main() vide pour rester clair.
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, TITRE_APP};

    use tracing::{info, warn};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{window, HtmlCanvasElement, Window};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Script du service worker (servi à côté de index.html).
    const SERVICE_WORKER: &str = "./sw.js";

    /// Point d’entrée automatique au chargement de la page.
    /// - Branche les journaux (tracing -> log -> console)
    /// - Fixe le titre de l’onglet (document.title)
    /// - Récupère le <canvas id="the_canvas_id">
    /// - Démarre eframe WebRunner dessus
    /// - Enregistre le service worker (échec journalisé, jamais bloquant)
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        // 0) journaux : la feature "log" de tracing relaie vers eframe::WebLogger
        // (déjà installé si la page recharge le module : on ignore l’erreur)
        let _ = eframe::WebLogger::init(log::LevelFilter::Info);

        // 1) window/document
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        // 1.5) Titre onglet
        d.set_title(TITRE_APP);

        // 2) element by id
        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        // 3) cast -> HtmlCanvasElement
        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        // 4) run web
        let web_options = eframe::WebOptions::default();

        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(AppCalc::depuis_contexte(cc)))),
            )
            .await?;

        // 5) hors-ligne (PWA)
        wasm_bindgen_futures::spawn_local(enregistrer_service_worker(w));

        Ok(())
    }

    async fn enregistrer_service_worker(w: Window) {
        let navigator = w.navigator();

        // navigateur ancien ou contexte non sécurisé (http) : pas de service worker
        let dispo = js_sys::Reflect::has(&navigator, &"serviceWorker".into()).unwrap_or(false);
        if !dispo {
            info!("service worker indisponible, mode hors-ligne désactivé");
            return;
        }

        let container = navigator.service_worker();
        match JsFuture::from(container.register(SERVICE_WORKER)).await {
            Ok(_) => info!(script = SERVICE_WORKER, "service worker enregistré"),
            Err(e) => warn!(script = SERVICE_WORKER, erreur = ?e, "service worker refusé"),
        }
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
