//! WASM bindings for ohmnet.
//!
//! This module provides JavaScript-friendly bindings for reducing netlists
//! in the browser.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { equivalent_resistance, explain_reduction } from 'ohmnet';
//!
//! await init();
//!
//! const netlist = `
//!   .source in
//!   .target out
//!   R1 in  mid 500
//!   R2 mid out 1k
//!   R3 mid out 1k
//! `;
//!
//! const ohms = equivalent_resistance(netlist); // 1000
//! for (const line of explain_reduction(netlist)) console.log(line);
//! ```

use wasm_bindgen::prelude::*;

use crate::dsl;
use crate::error::{ReduceError, Result};
use crate::network::Network;
use crate::reduce::{ReduceConfig, Reducer, Reduction};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Equivalent resistance in ohms between the netlist's `.source` and
/// `.target` nodes.
///
/// Throws the error message as a string if the netlist is invalid or
/// cannot be reduced.
#[wasm_bindgen]
pub fn equivalent_resistance(netlist: &str) -> std::result::Result<f64, JsValue> {
    reduce_netlist(netlist, false)
        .map(|r| r.resistance)
        .map_err(to_js)
}

/// Reduce a netlist and describe every applied rewrite, one line each.
#[wasm_bindgen]
pub fn explain_reduction(netlist: &str) -> std::result::Result<Vec<String>, JsValue> {
    reduce_netlist(netlist, true)
        .map(|r| r.explain())
        .map_err(to_js)
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn reduce_netlist(netlist: &str, record_steps: bool) -> Result<Reduction> {
    let ast = dsl::parse(netlist)?;
    let network = Network::from_ast(&ast)?;
    let terminals = ast.terminals(&network)?;

    let config = ReduceConfig::new().with_steps(record_steps);
    Reducer::with_config(config).reduce(&network, terminals)
}

fn to_js(err: ReduceError) -> JsValue {
    let err = ReduceError::WasmError {
        message: err.to_string(),
    };
    JsValue::from_str(&err.to_string())
}
