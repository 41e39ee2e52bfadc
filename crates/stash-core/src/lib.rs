//! stash-core: inventory selection engine
//!
//! The selection machinery behind a survival roguelike's inventory
//! screens: categorized, paginated, filterable columns of item
//! entries, with pluggable per-screen policy (pick one, multi-select
//! with quantities, compare, pickup, insert into container, two-party
//! trade). No terminal I/O lives here; the engine consumes logical
//! [`actions::Action`]s and lays columns out into abstract
//! [`render::DisplayRow`]s for a front end to paint.

pub mod actions;
pub mod cache;
pub mod column;
pub mod entry;
pub mod errors;
pub mod filter;
pub mod item;
pub mod preset;
pub mod render;
pub mod selector;
pub mod source;
pub mod trade;
pub mod uistate;

pub use actions::{Action, FilterEdit, InputSource, ScriptedInput};
pub use column::{Column, ColumnRole, Line, Scroll};
pub use entry::Entry;
pub use errors::StashError;
pub use filter::Filter;
pub use item::{Capacity, ItemCategory, ItemFlags, ItemHandle, ItemId, ItemPool};
pub use preset::{CellSpec, DefaultPreset, InsertPreset, SelectorPreset, TradePreset};
pub use render::{CellStyle, DisplayCell, DisplayRow};
pub use selector::{
    ColumnView, CompareSelector, DirectAction, InsertSelector, MultiSelector, NavigationMode,
    Outcome, PickOneSelector, PickupOutcome, PickupSelector, Selection, Selector,
};
pub use source::{ItemSource, LocationRef, VecSource};
pub use trade::{TradeOutcome, TradeParty, TradePane, TradeResult, TradeSession};
pub use uistate::UiState;
