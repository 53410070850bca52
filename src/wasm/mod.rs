//! WASM module for the browser dashboard
//!
//! Exposes the query layer to JavaScript so a client-rendered dashboard
//! reads the same projects, agents, and statistics as the CLI.
//!
//! # Usage
//!
//! Built with `wasm-pack build --target web --features wasm`:
//!
//! ```javascript
//! import init, { MissionControl, formatTokens } from './mission_control.js';
//!
//! async function main() {
//!     await init();
//!     const mc = new MissionControl();
//!     const stats = JSON.parse(mc.stats());
//!     const verify = JSON.parse(mc.agents('verify', 'complete', null));
//!     console.log(formatTokens(stats.total_tokens));
//! }
//! ```

// Includes both wasm_bindgen exports for wasm32 and the internal state
// used for testing on all platforms
mod bindings;

pub use bindings::*;

/// Initialize WASM panic hook for better error messages in browser console
#[cfg(target_arch = "wasm32")]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Version information for the WASM module
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
