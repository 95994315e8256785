//! Browser-side tests for the JS-facing bindings
//!
//! Run with `wasm-pack test --headless --firefox wasm`.

#![cfg(target_arch = "wasm32")]

use smart_agro_wasm::{sample_scenario_names, validate_prediction_input};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn scenario_names_are_a_js_array() {
    let names = sample_scenario_names();
    assert_eq!(names.length(), 3);
    assert!(names.get(1).as_string().unwrap().contains("pulses"));
}

#[wasm_bindgen_test]
fn invalid_form_rejects_with_message() {
    let json = r#"{"month": 13, "lag1": 60, "lag2": 55, "lag3": 50,
                   "N": 60, "P": 40, "K": 50, "temperature": 23, "humidity": 55, "pH": 6.2}"#;
    let err = validate_prediction_input(json).unwrap_err();
    assert!(err.as_string().unwrap().contains("month"));
}
