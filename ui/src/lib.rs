//! Browser enhancement layer for the server-rendered conversion page.
//!
//! The page is fully functional without this bundle (the form submits as a
//! plain GET); mounting the controller adds live slider dragging and
//! partial-page refreshes.

use wasm_bindgen::prelude::*;

pub mod controller;
mod logs;

use controller::RangeController;
use payloads::range::Snap;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    logs::init_logging();

    match RangeController::mount(Snap::Minute) {
        Ok(Some(controller)) => {
            // the controller owns page-lifetime event listeners
            controller.forget();
        }
        Ok(None) => {
            tracing::warn!(
                "essential page elements missing; controller not mounted"
            );
        }
        Err(e) => {
            tracing::error!("failed to mount range controller: {e:?}");
        }
    }
    Ok(())
}
