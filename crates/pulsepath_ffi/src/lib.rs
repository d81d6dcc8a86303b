//! Flutter bridge surface for PulsePath.
//!
//! Only `api` is exported to Dart; everything else stays in `pulsepath_core`.

pub mod api;
