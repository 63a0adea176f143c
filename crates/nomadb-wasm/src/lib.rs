//! nomadb-wasm — WebAssembly bindings for nomadb-core
//!
//! This crate exposes a small, ergonomic JS/WASM API built on top of
//! `nomadb-core`. It embeds the seed dataset in the WASM binary and provides
//! the listing/filter engine plus the per-card optimistic interaction
//! controller, callable from JavaScript.
//!
//! What it provides
//! ----------------
//! - Automatic initialization on module load (via `#[wasm_bindgen(start)]`)
//! - Basic queries: `city_count()`, `city_name(slug)`, `total_stats()`
//! - Listing with the client-side filter evaluator:
//!   - `list_cities(filters)` where `filters` is a plain object mirroring
//!     `FilterState` (or null/undefined for no constraint)
//!   - `search_cities("busan")`
//! - A `CityCard` class wrapping the optimistic like/dislike state machine:
//!   a press returns the mutation intent to send, `confirm()`/`reject()`
//!   settle it after the fetch resolves.
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { list_cities, CityCard } from 'nomadb-wasm';
//!
//! async function main() {
//!   await init(); // initializes the embedded directory
//!
//!   const rows = list_cities({ regions: "all", environments: ["nature"] });
//!   const card = new CityCard(rows[0].city.slug);
//!
//!   const intent = card.press_like();
//!   if (intent) {
//!     const res = await fetch('/api/toggle-like', {
//!       method: 'POST', body: JSON.stringify(intent),
//!     });
//!     res.ok ? card.confirm() : card.reject();
//!   }
//! }
//! main();
//! ```
//!
//! Notes
//! -----
//! - The build embeds the bundled `cities.json`; rebuild the crate to
//!   refresh the embedded data.
//! - All exported functions are `wasm_bindgen` bindings and return plain
//!   types or `JsValue` containing JSON-serializable arrays/objects.

use std::sync::OnceLock;
use wasm_bindgen::prelude::*;

// Core imports
use nomadb_core::prelude::*;
use serde_wasm_bindgen::{from_value, to_value};

// The prelude re-exports core's `Result<T>` alias, which would otherwise
// shadow `std::result::Result` for the `wasm_bindgen` signatures below.
use std::result::Result;

// 1. Embed the dataset
static EMBEDDED_SEED: &str = include_str!("../../nomadb-core/data/cities.json");

// 2. Static instance
static DIR: OnceLock<MemoryDirectory> = OnceLock::new();

fn dir() -> &'static MemoryDirectory {
    DIR.get_or_init(|| {
        let dataset = nomadb_core::loader::parse_seed_str(EMBEDDED_SEED)
            .expect("embedded dataset parses");
        MemoryDirectory::from_dataset(dataset)
    })
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Initializing nomadb WASM module...".into());

    let stats = dir().total_stats().expect("in-memory stats");
    web_sys::console::log_1(&format!("✓ Loaded {} cities", stats.cities).into());
}

/* --------------------------------------------------------------------------
   Basic Queries
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub fn city_count() -> usize {
    dir().total_stats().map(|s| s.cities).unwrap_or(0)
}

#[wasm_bindgen]
pub fn city_name(slug: &str) -> Option<String> {
    dir()
        .city_by_slug(slug)
        .ok()
        .map(|payload| payload.city.name().to_string())
}

#[wasm_bindgen]
pub fn total_stats() -> Result<JsValue, JsValue> {
    let stats = dir().total_stats().map_err(to_js_err)?;
    to_value(&stats).map_err(Into::into)
}

/* --------------------------------------------------------------------------
   Listing & Search
-------------------------------------------------------------------------- */

/// Evaluate the filter engine over the embedded directory.
///
/// `filters` mirrors `FilterState` (`budget`, `regions`, `environments`,
/// `season`, `query`); pass null/undefined for the unconstrained listing.
/// Rows come back filtered and ordered by like count, ready to render.
#[wasm_bindgen]
pub fn list_cities(filters: JsValue) -> Result<JsValue, JsValue> {
    let filters: FilterState = if filters.is_null() || filters.is_undefined() {
        FilterState::default()
    } else {
        from_value(filters)?
    };

    let records = dir().list_cities(None).map_err(to_js_err)?;
    let visible: Vec<&CityRecord> = filters.apply(&records);
    to_value(&visible).map_err(Into::into)
}

#[wasm_bindgen]
pub fn search_cities(query: &str) -> Result<JsValue, JsValue> {
    let hits = dir().search_cities(query, 10).map_err(to_js_err)?;
    to_value(&hits).map_err(Into::into)
}

#[wasm_bindgen]
pub fn city_by_slug(slug: &str) -> Result<JsValue, JsValue> {
    match dir().city_by_slug(slug) {
        Ok(payload) => to_value(&payload).map_err(Into::into),
        Err(err) if err.is_not_found() => Ok(JsValue::NULL),
        Err(err) => Err(to_js_err(err)),
    }
}

/* --------------------------------------------------------------------------
   Optimistic Card Interaction
-------------------------------------------------------------------------- */

/// Per-card like/dislike controller for JS consumers.
///
/// A press applies the optimistic flip and returns the mutation intent
/// (`{city_id, want_like}`) to send to the backend, or null while a prior
/// mutation is still in flight. After the fetch resolves, call `confirm()`
/// on success or `reject()` on failure; rejection restores the exact
/// pre-press state.
#[wasm_bindgen]
pub struct CityCard {
    inner: CardInteraction,
}

#[wasm_bindgen]
impl CityCard {
    /// Mount a card for a city, seeded from the embedded stats.
    #[wasm_bindgen(constructor)]
    pub fn new(slug: &str) -> Result<CityCard, JsValue> {
        let payload = dir().city_by_slug(slug).map_err(to_js_err)?;
        Ok(CityCard {
            inner: CardInteraction::mount(payload.city.id.clone(), payload.stats.as_ref()),
        })
    }

    pub fn press_like(&mut self) -> Result<JsValue, JsValue> {
        press_to_js(self.inner.press(Press::Like))
    }

    pub fn press_dislike(&mut self) -> Result<JsValue, JsValue> {
        press_to_js(self.inner.press(Press::Dislike))
    }

    /// Settle the in-flight mutation as successful.
    pub fn confirm(&mut self) {
        let _ = self.inner.resolve(Ok(ToggleAction::Updated));
    }

    /// Settle the in-flight mutation as failed; the optimistic update is
    /// rolled back and the reason is returned for display.
    pub fn reject(&mut self, reason: Option<String>) -> String {
        let err = match reason {
            Some(msg) => NomadError::Backend(msg),
            None => NomadError::Backend("request failed".into()),
        };
        match self.inner.resolve(Err(err)) {
            Err(e) => e.to_string(),
            Ok(_) => String::new(),
        }
    }

    pub fn liked(&self) -> bool {
        self.inner.liked()
    }

    pub fn disliked(&self) -> bool {
        self.inner.disliked()
    }

    pub fn like_count(&self) -> u32 {
        self.inner.like_count()
    }

    pub fn dislike_count(&self) -> u32 {
        self.inner.dislike_count()
    }

    pub fn is_pending(&self) -> bool {
        self.inner.is_pending()
    }
}

fn press_to_js(intent: Option<ToggleIntent>) -> Result<JsValue, JsValue> {
    match intent {
        Some(intent) => {
            let obj = serde_json::json!({
                "city_id": intent.city_id,
                "want_like": intent.want_like,
            });
            to_value(&obj).map_err(Into::into)
        }
        None => Ok(JsValue::NULL),
    }
}

fn to_js_err(err: NomadError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
