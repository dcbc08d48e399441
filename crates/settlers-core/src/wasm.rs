//! WebAssembly bindings for the settlers engine.
//!
//! A browser front end drives the game through `requestRoll` and
//! `requestPlacement` and renders from the JSON snapshot and log.

use wasm_bindgen::prelude::*;

use crate::actions::GameAction;
use crate::game::Game;
use crate::player::PlayerColor;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a game from a JSON array of names; colors are assigned by seat
    #[wasm_bindgen(constructor)]
    pub fn new(player_names_json: &str) -> Result<WasmGame, JsValue> {
        let names: Vec<String> = serde_json::from_str(player_names_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid player names: {}", e)))?;

        if names.len() < 2 {
            return Err(JsValue::from_str("At least two players are needed"));
        }
        if names.len() > u8::MAX as usize {
            return Err(JsValue::from_str("Too many players"));
        }

        let colors = (0..names.len()).map(|i| PlayerColor::for_player(i as u8)).collect();
        Ok(WasmGame {
            game: Game::new(names, colors),
        })
    }

    /// Roll for the current player; returns events JSON or the rejection
    #[wasm_bindgen(js_name = requestRoll)]
    pub fn request_roll(&mut self) -> Result<String, JsValue> {
        self.apply(GameAction::RequestRoll)
    }

    /// Place near a point in board coordinates
    #[wasm_bindgen(js_name = requestPlacement)]
    pub fn request_placement(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        self.apply(GameAction::RequestPlacement { x, y })
    }

    /// Apply an action from JSON, returns events JSON or error
    #[wasm_bindgen(js_name = applyAction)]
    pub fn apply_action(&mut self, action_json: &str) -> Result<String, JsValue> {
        let action: GameAction = serde_json::from_str(action_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid action JSON: {}", e)))?;
        self.apply(action)
    }

    /// Get the render snapshot as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        serde_json::to_string(&self.game.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get the current player ID, if any
    #[wasm_bindgen(js_name = getCurrentPlayer)]
    pub fn get_current_player(&self) -> Option<u8> {
        self.game.current_player()
    }

    /// Take pending log lines as a JSON array of strings
    #[wasm_bindgen(js_name = drainLog)]
    pub fn drain_log(&mut self) -> String {
        serde_json::to_string(&self.game.drain_log()).unwrap_or_else(|_| "[]".to_string())
    }
}

impl WasmGame {
    fn apply(&mut self, action: GameAction) -> Result<String, JsValue> {
        match self.game.apply_action(action) {
            Ok(events) => Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())),
            Err(e) => Err(JsValue::from_str(&e.to_string())),
        }
    }
}
