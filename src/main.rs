//! Formkeeper demo entry point
//!
//! Wires the autosave controller to a small search form: the draft snapshot
//! captures the query box, and a restored draft is applied back on load.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_demo {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde::{Deserialize, Serialize};
    use wasm_bindgen::JsCast;
    use web_sys::HtmlInputElement;

    use formkeeper::events;
    use formkeeper::{Autosave, AutosaveConfig, LocalStore};

    /// Draft state for the demo search form
    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct SearchDraft {
        query: String,
        /// Unix timestamp (ms) of the last edit
        edited_at: f64,
    }

    fn query_input() -> Option<HtmlInputElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id("search-input")?
            .dyn_into()
            .ok()
    }

    fn capture_draft() -> SearchDraft {
        SearchDraft {
            query: query_input().map(|input| input.value()).unwrap_or_default(),
            edited_at: js_sys::Date::now(),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Formkeeper demo starting...");

        let ctrl = Rc::new(RefCell::new(Autosave::<SearchDraft, _>::new(
            AutosaveConfig::default(),
            LocalStore::new(),
        )));

        // Empty subscription list: watch the whole document
        let restored = events::initialize(&ctrl, Vec::new(), capture_draft);

        if let Some(draft) = restored {
            if let Some(input) = query_input() {
                input.set_value(&draft.query);
            }
            log::info!("Applied restored draft (edited at {:.0})", draft.edited_at);
        }

        log::info!("Formkeeper demo running");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_demo::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Formkeeper (native) starting...");
    log::info!("Native mode has no DOM; running an in-memory smoke pass");

    smoke_roundtrip();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_roundtrip() {
    use formkeeper::{Autosave, AutosaveConfig, MemoryStore};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Draft {
        query: String,
    }

    let snapshot = Draft {
        query: "two bedroom loft".to_string(),
    };

    let mut autosave: Autosave<Draft, _> =
        Autosave::new(AutosaveConfig::new(100, "smoke_draft"), MemoryStore::new());

    autosave.schedule_autosave(0.0);
    assert!(!autosave.save_if_due(50.0, &snapshot));
    assert!(autosave.save_if_due(100.0, &snapshot));
    assert_eq!(autosave.restore(), Some(snapshot));

    println!("✓ Autosave round-trip passed!");
}
