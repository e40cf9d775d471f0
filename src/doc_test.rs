#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use uuid::Uuid;

use super::*;

fn make_effect(name: &str, width_mm: f64, height_mm: f64) -> Effect {
    Effect {
        id: Uuid::new_v4(),
        name: name.to_string(),
        width_mm,
        height_mm,
        memo: None,
    }
}

fn make_effect_with_id(id: Uuid, name: &str) -> Effect {
    Effect {
        id,
        name: name.to_string(),
        width_mm: 70.0,
        height_mm: 120.0,
        memo: None,
    }
}

// =============================================================
// Rotation
// =============================================================

#[test]
fn rotation_default_is_upright() {
    assert_eq!(Rotation::default(), Rotation::R0);
}

#[test]
fn rotation_degrees() {
    assert_eq!(Rotation::R0.degrees(), 0);
    assert_eq!(Rotation::R90.degrees(), 90);
    assert_eq!(Rotation::R180.degrees(), 180);
    assert_eq!(Rotation::R270.degrees(), 270);
}

#[test]
fn rotation_quarter_turn_cycles() {
    assert_eq!(Rotation::R0.quarter_turn(), Rotation::R90);
    assert_eq!(Rotation::R90.quarter_turn(), Rotation::R180);
    assert_eq!(Rotation::R180.quarter_turn(), Rotation::R270);
    assert_eq!(Rotation::R270.quarter_turn(), Rotation::R0);
}

#[test]
fn rotation_four_quarter_turns_return_home() {
    let mut r = Rotation::R0;
    for _ in 0..4 {
        r = r.quarter_turn();
    }
    assert_eq!(r, Rotation::R0);
}

#[test]
fn rotation_inverse_undoes() {
    for r in [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270] {
        let mut back = r;
        // applying the inverse as quarter turns lands on 0
        let steps = r.inverse().degrees() / 90;
        for _ in 0..steps {
            back = back.quarter_turn();
        }
        assert_eq!(back, Rotation::R0);
    }
}

#[test]
fn rotation_swaps_axes_only_sideways() {
    assert!(!Rotation::R0.swaps_axes());
    assert!(Rotation::R90.swaps_axes());
    assert!(!Rotation::R180.swaps_axes());
    assert!(Rotation::R270.swaps_axes());
}

#[test]
fn rotation_clone_and_copy() {
    let a = Rotation::R90;
    let b = a;
    let c = a.clone();
    assert_eq!(a, b);
    assert_eq!(a, c);
}

// =============================================================
// Rotation serde
// =============================================================

#[test]
fn rotation_serializes_as_degree_number() {
    assert_eq!(serde_json::to_string(&Rotation::R0).unwrap(), "0");
    assert_eq!(serde_json::to_string(&Rotation::R90).unwrap(), "90");
    assert_eq!(serde_json::to_string(&Rotation::R180).unwrap(), "180");
    assert_eq!(serde_json::to_string(&Rotation::R270).unwrap(), "270");
}

#[test]
fn rotation_deserializes_from_degree_number() {
    let cases = [
        ("0", Rotation::R0),
        ("90", Rotation::R90),
        ("180", Rotation::R180),
        ("270", Rotation::R270),
    ];
    for (input, expected) in cases {
        let r: Rotation = serde_json::from_str(input).unwrap();
        assert_eq!(r, expected);
    }
}

#[test]
fn rotation_rejects_off_step_degrees() {
    assert!(serde_json::from_str::<Rotation>("45").is_err());
    assert!(serde_json::from_str::<Rotation>("360").is_err());
    assert!(serde_json::from_str::<Rotation>("91").is_err());
}

#[test]
fn rotation_try_from_error_names_the_value() {
    let err = Rotation::try_from(45).unwrap_err();
    assert_eq!(err, RotationError(45));
    assert!(err.to_string().contains("45"));
}

// =============================================================
// Effect / Board serde
// =============================================================

#[test]
fn effect_serde_roundtrip() {
    let effect = Effect {
        id: Uuid::nil(),
        name: "Tube Screamer".to_string(),
        width_mm: 70.0,
        height_mm: 120.0,
        memo: Some("true bypass".to_string()),
    };
    let serialized = serde_json::to_string(&effect).unwrap();
    let back: Effect = serde_json::from_str(&serialized).unwrap();
    assert_eq!(back.id, effect.id);
    assert_eq!(back.name, effect.name);
    assert_eq!(back.width_mm, effect.width_mm);
    assert_eq!(back.height_mm, effect.height_mm);
    assert_eq!(back.memo, effect.memo);
}

#[test]
fn effect_serde_skips_absent_memo() {
    let effect = make_effect("Fuzz", 100.0, 115.0);
    let serialized = serde_json::to_string(&effect).unwrap();
    assert!(!serialized.contains("\"memo\""));
}

#[test]
fn effect_serde_uses_mm_field_names() {
    let effect = make_effect("Delay", 120.0, 95.0);
    let serialized = serde_json::to_string(&effect).unwrap();
    assert!(serialized.contains("\"width_mm\""));
    assert!(serialized.contains("\"height_mm\""));
}

#[test]
fn board_serde_roundtrip() {
    let board = Board {
        id: Uuid::nil(),
        name: "Pedaltrain Metro".to_string(),
        width_mm: 400.0,
        height_mm: 300.0,
        memo: None,
    };
    let serialized = serde_json::to_string(&board).unwrap();
    let back: Board = serde_json::from_str(&serialized).unwrap();
    assert_eq!(back.name, board.name);
    assert_eq!(back.width_mm, 400.0);
    assert_eq!(back.height_mm, 300.0);
}

// =============================================================
// PlacedEffect serde
// =============================================================

#[test]
fn placed_effect_serde_roundtrip() {
    let placed = PlacedEffect {
        effect_id: Uuid::nil(),
        x: 25.0,
        y: 40.0,
        rotation: Rotation::R270,
    };
    let serialized = serde_json::to_string(&placed).unwrap();
    let back: PlacedEffect = serde_json::from_str(&serialized).unwrap();
    assert_eq!(back.effect_id, placed.effect_id);
    assert_eq!(back.x, 25.0);
    assert_eq!(back.y, 40.0);
    assert_eq!(back.rotation, Rotation::R270);
}

#[test]
fn placed_effect_rotation_is_a_bare_number_on_the_wire() {
    let placed = PlacedEffect {
        effect_id: Uuid::nil(),
        x: 0.0,
        y: 0.0,
        rotation: Rotation::R90,
    };
    let serialized = serde_json::to_string(&placed).unwrap();
    assert!(serialized.contains("\"rotation\":90"));
}

#[test]
fn placed_effect_missing_rotation_reads_as_upright() {
    let json = format!("{{\"effect_id\":\"{}\",\"x\":10.0,\"y\":20.0}}", Uuid::nil());
    let placed: PlacedEffect = serde_json::from_str(&json).unwrap();
    assert_eq!(placed.rotation, Rotation::R0);
}

#[test]
fn placed_effect_invalid_rotation_rejects() {
    let json = format!("{{\"effect_id\":\"{}\",\"x\":0.0,\"y\":0.0,\"rotation\":45}}", Uuid::nil());
    assert!(serde_json::from_str::<PlacedEffect>(&json).is_err());
}

// =============================================================
// LayoutData
// =============================================================

#[test]
fn layout_default_is_empty() {
    let layout = LayoutData::default();
    assert!(layout.is_empty());
    assert_eq!(layout.len(), 0);
}

#[test]
fn layout_serde_shape() {
    let layout = LayoutData {
        effects: vec![PlacedEffect {
            effect_id: Uuid::nil(),
            x: 5.0,
            y: 10.0,
            rotation: Rotation::R0,
        }],
    };
    let serialized = serde_json::to_string(&layout).unwrap();
    assert!(serialized.starts_with("{\"effects\":["));
    let back: LayoutData = serde_json::from_str(&serialized).unwrap();
    assert_eq!(back.len(), 1);
    assert_eq!(back.effects[0].x, 5.0);
}

#[test]
fn layout_deserialize_preserves_order() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let json = format!(
        "{{\"effects\":[{{\"effect_id\":\"{a}\",\"x\":0.0,\"y\":0.0}},{{\"effect_id\":\"{b}\",\"x\":50.0,\"y\":0.0}}]}}"
    );
    let layout: LayoutData = serde_json::from_str(&json).unwrap();
    assert_eq!(layout.effects[0].effect_id, a);
    assert_eq!(layout.effects[1].effect_id, b);
}

#[test]
fn layout_index_of_finds_placement() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let layout = LayoutData {
        effects: vec![
            PlacedEffect { effect_id: a, x: 0.0, y: 0.0, rotation: Rotation::R0 },
            PlacedEffect { effect_id: b, x: 80.0, y: 0.0, rotation: Rotation::R0 },
        ],
    };
    assert_eq!(layout.index_of(&a), Some(0));
    assert_eq!(layout.index_of(&b), Some(1));
    assert_eq!(layout.index_of(&Uuid::new_v4()), None);
}

#[test]
fn layout_get_returns_placement() {
    let id = Uuid::new_v4();
    let layout = LayoutData {
        effects: vec![PlacedEffect { effect_id: id, x: 12.0, y: 34.0, rotation: Rotation::R180 }],
    };
    let placed = layout.get(&id).unwrap();
    assert_eq!(placed.x, 12.0);
    assert_eq!(placed.y, 34.0);
    assert!(layout.get(&Uuid::new_v4()).is_none());
}

// =============================================================
// EffectCatalog
// =============================================================

#[test]
fn catalog_new_is_empty() {
    let catalog = EffectCatalog::new();
    assert!(catalog.is_empty());
    assert_eq!(catalog.len(), 0);
}

#[test]
fn catalog_default_is_empty() {
    let catalog = EffectCatalog::default();
    assert!(catalog.is_empty());
}

#[test]
fn catalog_insert_and_get() {
    let mut catalog = EffectCatalog::new();
    let effect = make_effect("Phaser", 70.0, 115.0);
    let id = effect.id;
    catalog.insert(effect);
    assert_eq!(catalog.len(), 1);
    let retrieved = catalog.get(&id).unwrap();
    assert_eq!(retrieved.name, "Phaser");
    assert_eq!(retrieved.width_mm, 70.0);
}

#[test]
fn catalog_get_nonexistent_returns_none() {
    let catalog = EffectCatalog::new();
    assert!(catalog.get(&Uuid::new_v4()).is_none());
}

#[test]
fn catalog_insert_overwrites_same_id() {
    let mut catalog = EffectCatalog::new();
    let id = Uuid::new_v4();
    catalog.insert(make_effect_with_id(id, "old name"));
    catalog.insert(make_effect_with_id(id, "new name"));
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get(&id).unwrap().name, "new name");
}

#[test]
fn catalog_remove() {
    let mut catalog = EffectCatalog::new();
    let effect = make_effect("Chorus", 70.0, 120.0);
    let id = effect.id;
    catalog.insert(effect);
    let removed = catalog.remove(&id);
    assert!(removed.is_some());
    assert_eq!(removed.unwrap().id, id);
    assert!(catalog.is_empty());
}

#[test]
fn catalog_remove_nonexistent_returns_none() {
    let mut catalog = EffectCatalog::new();
    assert!(catalog.remove(&Uuid::new_v4()).is_none());
}

#[test]
fn catalog_load_replaces_existing() {
    let mut catalog = EffectCatalog::new();
    let old = make_effect("Old", 50.0, 50.0);
    let old_id = old.id;
    catalog.insert(old);

    let new1 = make_effect("New A", 70.0, 120.0);
    let new1_id = new1.id;
    catalog.load(vec![new1, make_effect("New B", 90.0, 120.0)]);

    assert_eq!(catalog.len(), 2);
    assert!(catalog.get(&old_id).is_none());
    assert!(catalog.get(&new1_id).is_some());
}

#[test]
fn catalog_load_empty_clears() {
    let mut catalog = EffectCatalog::new();
    catalog.insert(make_effect("Flanger", 70.0, 115.0));
    catalog.load(vec![]);
    assert!(catalog.is_empty());
}

#[test]
fn sorted_effects_by_name() {
    let mut catalog = EffectCatalog::new();
    catalog.insert(make_effect("Wah", 100.0, 250.0));
    catalog.insert(make_effect("Booster", 45.0, 95.0));
    catalog.insert(make_effect("Octaver", 70.0, 120.0));

    let sorted = catalog.sorted_effects();
    assert_eq!(sorted[0].name, "Booster");
    assert_eq!(sorted[1].name, "Octaver");
    assert_eq!(sorted[2].name, "Wah");
}

#[test]
fn sorted_effects_tiebreak_by_id() {
    let mut catalog = EffectCatalog::new();
    let id_low = Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap();
    let id_high = Uuid::parse_str("ffffffff-ffff-ffff-ffff-ffffffffffff").unwrap();

    // insert high first so the sort is not insertion order
    catalog.insert(make_effect_with_id(id_high, "Same"));
    catalog.insert(make_effect_with_id(id_low, "Same"));

    let sorted = catalog.sorted_effects();
    assert_eq!(sorted[0].id, id_low);
    assert_eq!(sorted[1].id, id_high);
}

#[test]
fn sorted_effects_empty() {
    let catalog = EffectCatalog::new();
    assert!(catalog.sorted_effects().is_empty());
}
