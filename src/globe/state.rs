// src/globe/state.rs

use bevy::prelude::*;

/// Lebenszyklus der Globus-Szene.
///
/// `Loading` wartet auf die Erd-Textur; erst mit `Active` existieren
/// Szenen-Entities und laufen Eingabe- und Frame-Systeme. Der Wechsel
/// zurück nach `Loading` baut die Szene vollständig ab und wieder auf.
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GlobePhase {
    #[default] // Startzustand
    Loading,
    Active,
}
