use geodash::{Config, GeoPoint, Globe, InputEvent, Key, MouseButton};
use std::time::Duration;
use tracing::{event, Level};
use wasm_bindgen::prelude::*;

fn setup_console_log() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // A logger may already be installed by the host page.
        let _ = console_log::init_with_level(log::Level::Info);
        // Also show panic messages in console
        console_error_panic_hook::set_once();

        event!(Level::INFO, "Console logging initialized");
    });
}

fn to_js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn map_key(name: &str) -> Option<Key> {
    match name {
        "ArrowUp" => Some(Key::ArrowUp),
        "ArrowDown" => Some(Key::ArrowDown),
        "ArrowLeft" => Some(Key::ArrowLeft),
        "ArrowRight" => Some(Key::ArrowRight),
        "=" | "+" | "PageDown" => Some(Key::ZoomIn),
        "-" | "PageUp" => Some(Key::ZoomOut),
        _ => None,
    }
}

fn map_button(button: i16) -> Option<MouseButton> {
    match button {
        0 => Some(MouseButton::Left),
        1 => Some(MouseButton::Middle),
        2 => Some(MouseButton::Right),
        _ => None,
    }
}

/// The globe dashboard controller as seen from JavaScript. The page owns the
/// renderer and the DOM; it forwards input and asks for one frame per
/// `requestAnimationFrame`.
#[wasm_bindgen]
pub struct GlobeView {
    globe: Globe,
}

#[wasm_bindgen]
impl GlobeView {
    /// `config` is an optional partial config object; missing fields take
    /// their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<GlobeView, JsValue> {
        setup_console_log();

        let config: Config = if config.is_undefined() || config.is_null() {
            Config::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let mut globe = Globe::new(&config).map_err(to_js_err)?;
        // open on the overview, as the dashboard does on mount
        globe.reset_view();
        Ok(GlobeView { globe })
    }

    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.globe.set_viewport(width, height);
    }

    #[wasm_bindgen(js_name = setAutoRotate)]
    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.globe.set_auto_rotate(enabled);
    }

    #[wasm_bindgen(js_name = goToAnchor)]
    pub fn go_to_anchor(&mut self, name: &str) -> Result<(), JsValue> {
        self.globe.go_to_anchor(name).map_err(to_js_err)
    }

    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&mut self, lat: f64, lon: f64) -> bool {
        self.globe.go_to(GeoPoint::new(lat, lon))
    }

    #[wasm_bindgen(js_name = resetView)]
    pub fn reset_view(&mut self) {
        self.globe.reset_view();
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self) -> bool {
        self.globe.zoom_in()
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self) -> bool {
        self.globe.zoom_out()
    }

    #[wasm_bindgen(js_name = anchorNames)]
    pub fn anchor_names(&self) -> Vec<String> {
        self.globe.anchors().iter().map(|a| a.name.clone()).collect()
    }

    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str) {
        if let Some(key) = map_key(key) {
            self.globe.input(InputEvent::KeyPressed(key));
        }
    }

    #[wasm_bindgen(js_name = keyUp)]
    pub fn key_up(&mut self, key: &str) {
        if let Some(key) = map_key(key) {
            self.globe.input(InputEvent::KeyReleased(key));
        }
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, button: i16) {
        if let Some(button) = map_button(button) {
            self.globe.input(InputEvent::MouseButtonPressed(button));
        }
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, button: i16) {
        if let Some(button) = map_button(button) {
            self.globe.input(InputEvent::MouseButtonReleased(button));
        }
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.globe.input(InputEvent::MouseMoved(x, y));
    }

    /// `delta_y` as reported by a wheel event; positive zooms in.
    pub fn wheel(&mut self, delta_y: f64) {
        self.globe.input(InputEvent::MouseScrolled(delta_y));
    }

    pub fn blur(&mut self) {
        self.globe.input(InputEvent::WindowFocused(false));
    }

    /// Advances one frame. Pass the time since the previous frame in
    /// milliseconds, or a negative value to use the wall clock.
    pub fn frame(&mut self, dt_ms: f64) -> Result<JsValue, JsValue> {
        let out = if dt_ms >= 0.0 && dt_ms.is_finite() {
            self.globe
                .update_with_dt(Duration::from_secs_f64((dt_ms / 1000.0).min(60.0)))
        } else {
            self.globe.update()
        };
        Ok(serde_wasm_bindgen::to_value(&out)?)
    }
}
