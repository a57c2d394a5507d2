//! Farmstead — the economy core of a farming game.
//!
//! Items that stack, wear out, and fall into categories; bounded slot
//! inventories; crops that grow through discrete stages on a daily tick
//! under a watering/regrow contract. Everything here mutates synchronously
//! in response to discrete external events (a day-advance, a player action)
//! and reports back through explicit observer lists.
//!
//! What this crate deliberately does NOT do: rendering, input, UI, shops,
//! audio, persistence encoding, or time-keeping. A calendar collaborator
//! tells us the season and when a day ends; a UI collaborator calls the
//! inventory and crop operations and subscribes to change notifications.

pub mod shared;
pub mod events;
pub mod items;
pub mod inventory;
pub mod farming;
pub mod context;
pub mod data;
