//! Browser event wiring (WASM only)
//!
//! Connects a shared controller to real DOM activity: "input" and "change"
//! listeners on a host-registered subscription list, plus one reusable
//! setTimeout callback that performs the deferred persist. Uses the
//! Rc<RefCell<..>> + forgotten-Closure pattern for page-lifetime callbacks.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::EventTarget;

use crate::consts::ACTIVITY_EVENTS;
use crate::controller::Autosave;
use crate::storage::SnapshotStore;

/// Controller handle shared between event listeners and the timer callback
pub type SharedAutosave<T, S> = Rc<RefCell<Autosave<T, S>>>;

/// Wire the controller to the page and hand back any restored snapshot.
///
/// `targets` is the host's subscription list; an empty list falls back to
/// the whole document, so any input/change anywhere resets the debounce.
/// `source` is called at fire time to capture the snapshot to persist.
/// Mapping restored fields back onto widgets stays the host's job.
pub fn initialize<T, S>(
    ctrl: &SharedAutosave<T, S>,
    targets: Vec<EventTarget>,
    source: impl Fn() -> T + 'static,
) -> Option<T>
where
    T: Serialize + DeserializeOwned + 'static,
    S: SnapshotStore + 'static,
{
    let targets = if targets.is_empty() {
        document_target().into_iter().collect()
    } else {
        targets
    };

    // One timeout callback reused for every debounce window. It must never
    // be dropped from inside its own invocation, so it lives as long as the
    // (forgotten) activity listener that schedules it.
    let fire: Rc<Closure<dyn FnMut()>> = Rc::new(Closure::new({
        let ctrl = ctrl.clone();
        move || {
            let snapshot = source();
            let mut c = ctrl.borrow_mut();
            c.timer = None;
            c.cancel_pending();
            c.persist(&snapshot);
        }
    }));

    let activity = Closure::<dyn FnMut(web_sys::Event)>::new({
        let ctrl = ctrl.clone();
        let fire = fire.clone();
        move |_event: web_sys::Event| schedule_autosave(&ctrl, &fire)
    });

    for target in &targets {
        for name in ACTIVITY_EVENTS {
            if let Err(e) =
                target.add_event_listener_with_callback(name, activity.as_ref().unchecked_ref())
            {
                log::error!("Failed to attach {name} listener: {e:?}");
            }
        }
    }
    log::info!("Autosave listening on {} target(s)", targets.len());

    // Listeners live for the page lifetime
    activity.forget();

    ctrl.borrow().restore()
}

/// Cancel the armed timer (if any) and arm a fresh one a full interval out.
/// The superseded timer simply never fires.
pub fn schedule_autosave<T, S>(ctrl: &SharedAutosave<T, S>, fire: &Rc<Closure<dyn FnMut()>>)
where
    T: Serialize + DeserializeOwned,
    S: SnapshotStore,
{
    let Some(window) = web_sys::window() else {
        log::error!("No window; cannot schedule autosave");
        return;
    };

    let mut c = ctrl.borrow_mut();
    if let Some(handle) = c.timer.take() {
        window.clear_timeout_with_handle(handle);
    }
    c.schedule_autosave(js_sys::Date::now());

    let callback: &Closure<dyn FnMut()> = fire;
    let delay = c.config().interval_ms as i32;
    match window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.as_ref().unchecked_ref(), delay)
    {
        Ok(handle) => c.timer = Some(handle),
        Err(e) => {
            c.cancel_pending();
            log::error!("Failed to arm autosave timer: {e:?}");
        }
    }
}

fn document_target() -> Option<EventTarget> {
    let document = web_sys::window().and_then(|w| w.document());
    if document.is_none() {
        log::error!("No document to watch for activity");
    }
    document.map(EventTarget::from)
}
