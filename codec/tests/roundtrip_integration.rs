use catalog::Specialization;
use codec::{
    decode_build, decode_payload, encode_build, encode_build_as, encode_payload, Build,
    CodecLimits, Equipment, FallbackWarning, GameMode, Legend, Profession, ProfessionMechanics,
    Slot, SpecializationCatalog, SpecializationChoice, WireLimits, WireVersion,
};

const INSCRIPTIONS: u32 = 38;
const FIREARMS: u32 = 6;
const MECHANIST: u32 = 70;

fn catalog() -> SpecializationCatalog {
    SpecializationCatalog::new(vec![
        Specialization::new(FIREARMS, [1878, 1914, 1923, 510, 526, 2006, 433, 1930, 1984])
            .named("Firearms")
            .profession("Engineer"),
        Specialization::new(INSCRIPTIONS, [1909, 1863, 1919, 1916, 1917, 1940, 1892, 1890, 1913])
            .named("Explosives")
            .profession("Engineer"),
        Specialization::new(MECHANIST, [2282, 2290, 2291, 2276, 2278, 2298, 2281, 2292, 2297])
            .named("Mechanist")
            .profession("Engineer")
            .elite(true),
    ])
    .unwrap()
}

fn decode(code: &str) -> codec::DecodeReport {
    decode_build(
        code,
        &catalog(),
        &WireLimits::default(),
        &CodecLimits::default(),
    )
    .unwrap()
}

/// Engineer build with every section populated.
fn engineer_build() -> Build {
    let mut build = Build::new(Profession::Engineer, GameMode::PvE);
    for entry in &mut build.equipment {
        entry.stat = "Viper".to_owned();
    }
    build.equipment_mut(Slot::Amulet).unwrap().stat = "Sinister".to_owned();
    *build.equipment_mut(Slot::MainHand1).unwrap() = Equipment::new(Slot::MainHand1, "Viper")
        .weapon("Rifle")
        .sigils(Some(24_615), Some(24_868))
        .infusions([Some(49_432), Some(49_432), None]);
    build.equipment_mut(Slot::Helm).unwrap().infusions = [Some(49_432), None, None];
    build.skills.heal = Some(5_857);
    build.skills.utilities = [Some(5_927), Some(6_020), Some(5_805)];
    build.skills.elite = Some(5_868);
    build.specializations = vec![
        SpecializationChoice::new(FIREARMS, [Some(1914), Some(526), Some(1930)]),
        SpecializationChoice::new(INSCRIPTIONS, [Some(1909), Some(1940), Some(1890)]),
        SpecializationChoice::new(MECHANIST, [Some(2282), Some(2298), Some(2292)]),
    ];
    build.rune_id = Some(24_688);
    build.relic_id = Some(100_916);
    build.mechanics = ProfessionMechanics::Engineer {
        morphs: [Some(76_757), Some(77_079), Some(76_612)],
    };
    build
}

#[test]
fn integration_engineer_v6_shorter_than_v2() {
    let catalog = catalog();
    let build = engineer_build();

    let v6 = encode_build_as(&build, WireVersion::V6, &catalog).unwrap();
    let v2 = encode_build_as(&build, WireVersion::V2, &catalog).unwrap();
    assert!(
        v6.code.len() < v2.code.len(),
        "v6 {} vs v2 {}",
        v6.code.len(),
        v2.code.len()
    );
    assert!(v6.payload_len < v2.payload_len);
    assert!(v6.warnings.is_empty());

    let decoded = decode(&v6.code);
    assert_eq!(decoded.version, WireVersion::V6);
    assert_eq!(decoded.build.profession, Profession::Engineer);
    assert_eq!(decoded.build.game_mode, GameMode::PvE);
    assert_eq!(decoded.build.skills, build.skills);
    assert_eq!(decoded.build.specializations, build.specializations);
    assert_eq!(decoded.build.mechanics, build.mechanics);
}

#[test]
fn integration_v6_roundtrip_redistributes_infusions() {
    let build = engineer_build();
    let decoded = decode(&encode_build(&build, &catalog()).unwrap()).build;

    // Total counts survive; placement restarts from the first slot.
    let total: Vec<u32> = decoded
        .equipment
        .iter()
        .flat_map(Equipment::infusion_ids)
        .collect();
    assert_eq!(total, vec![49_432; 3]);
    assert_eq!(
        decoded.equipment(Slot::Helm).unwrap().infusions,
        [Some(49_432), None, None]
    );
    assert_eq!(
        decoded.equipment(Slot::Shoulders).unwrap().infusions,
        [Some(49_432), None, None]
    );

    let mut expected = build;
    for entry in &mut expected.equipment {
        entry.infusions = [None; 3];
    }
    let mut decoded = decoded;
    for entry in &mut decoded.equipment {
        entry.infusions = [None; 3];
    }
    assert_eq!(decoded, expected);
}

#[test]
fn integration_encoding_is_deterministic() {
    let build = engineer_build();
    for version in WireVersion::ALL {
        let first = encode_build_as(&build, version, &catalog()).unwrap();
        let second = encode_build_as(&build.clone(), version, &catalog()).unwrap();
        assert_eq!(first.code, second.code, "{version}");
    }
}

#[test]
fn integration_minstrel_default_omits_matching_slots() {
    let mut build = Build::new(Profession::Guardian, GameMode::PvE);
    let armor_and_trinkets: Vec<Slot> = codec::SLOTS
        .into_iter()
        .filter(|slot| !slot.is_weapon())
        .collect();
    for slot in &armor_and_trinkets[..10] {
        build.equipment_mut(*slot).unwrap().stat = "Minstrel".to_owned();
    }
    assert_eq!(codec::default_stat(&build), "Minstrel");

    let payload = encode_payload(&build, WireVersion::V6, &catalog()).unwrap();
    let decoded = decode_payload(&payload.bytes, &catalog(), &CodecLimits::default()).unwrap();
    assert_eq!(decoded.build, build);

    // Only the two Berserker trinkets and four Berserker weapons are explicit.
    let sections = payload.bytes[3];
    assert_eq!(sections & 0b11, 0b11);
    assert_eq!(payload.bytes[5], 6);
}

#[test]
fn integration_seven_matches_is_not_a_default() {
    let mut build = Build::new(Profession::Guardian, GameMode::PvE);
    for slot in codec::SLOTS.into_iter().filter(|slot| !slot.is_weapon()).take(7) {
        build.equipment_mut(slot).unwrap().stat = "Minstrel".to_owned();
    }
    assert_eq!(codec::default_stat(&build), codec::FALLBACK_STAT);
    let decoded = decode(&encode_build(&build, &catalog()).unwrap());
    assert_eq!(decoded.build, build);
}

#[test]
fn integration_trait_ids_roundtrip() {
    let mut build = Build::new(Profession::Engineer, GameMode::WvW);
    build.specializations = vec![SpecializationChoice::new(
        MECHANIST,
        [Some(2290), Some(2276), Some(2297)],
    )];
    let decoded = decode(&encode_build(&build, &catalog()).unwrap());
    assert_eq!(decoded.build.specializations, build.specializations);
}

#[test]
fn integration_trait_outside_tier_degrades() {
    let mut build = Build::new(Profession::Engineer, GameMode::WvW);
    // 2297 is a tier 2 trait placed in tier 0
    build.specializations = vec![SpecializationChoice::new(
        MECHANIST,
        [Some(2297), None, None],
    )];
    let report = encode_build_as(&build, WireVersion::V6, &catalog()).unwrap();
    assert_eq!(
        report.warnings,
        vec![FallbackWarning::TraitNotInTier {
            specialization: MECHANIST,
            tier: 0,
            trait_id: 2297
        }]
    );
    let decoded = decode(&report.code);
    assert_eq!(
        decoded.build.specializations[0].traits,
        [Some(2282), None, None]
    );
}

#[test]
fn integration_mechanics_by_version() {
    let mut build = Build::new(Profession::Revenant, GameMode::PvP);
    build.mechanics = ProfessionMechanics::Revenant {
        legend1: Some(Legend::Dragon),
        legend2: Some(Legend::Centaur),
    };
    for version in WireVersion::ALL {
        let report = encode_build_as(&build, version, &catalog()).unwrap();
        let decoded = decode(&report.code).build;
        if version >= WireVersion::V5 {
            assert_eq!(decoded.mechanics, build.mechanics, "{version}");
            assert!(report.warnings.is_empty());
        } else {
            assert_eq!(decoded.mechanics, ProfessionMechanics::None, "{version}");
            assert_eq!(report.warnings.len(), 1);
        }
    }
}

#[test]
fn integration_unknown_stat_survives_every_version() {
    let mut build = Build::new(Profession::Thief, GameMode::PvE);
    build.equipment_mut(Slot::Boots).unwrap().stat = "Hypothetical".to_owned();
    for version in WireVersion::ALL {
        let report = encode_build_as(&build, version, &catalog()).unwrap();
        let decoded = decode(&report.code);
        assert_eq!(
            decoded.build.equipment(Slot::Boots).unwrap().stat,
            "Hypothetical",
            "{version}"
        );
    }
}

#[test]
fn integration_unknown_specialization_rejected() {
    let mut build = Build::new(Profession::Engineer, GameMode::PvE);
    build.specializations = vec![SpecializationChoice::new(999, [None; 3])];
    assert_eq!(
        encode_build(&build, &catalog()),
        Err(codec::CodecError::UnknownSpecialization { id: 999 })
    );
    // Older layouts store trait IDs directly and need no catalog.
    assert!(encode_build_as(&build, WireVersion::V5, &catalog()).is_ok());
}

#[test]
fn integration_encode_rejects_what_decode_would_refuse() {
    let mut build = engineer_build();
    build.specializations = [FIREARMS, INSCRIPTIONS, MECHANIST, FIREARMS]
        .into_iter()
        .map(|id| SpecializationChoice::new(id, [None; 3]))
        .collect();
    for version in WireVersion::ALL {
        assert_eq!(
            encode_build_as(&build, version, &catalog()),
            Err(codec::CodecError::LimitsExceeded {
                kind: codec::LimitKind::Specializations,
                limit: 3,
                actual: 4
            }),
            "{version}"
        );
    }

    let mut build = engineer_build();
    build.equipment_mut(Slot::Helm).unwrap().stat = "X".repeat(129);
    assert_eq!(
        encode_build(&build, &catalog()),
        Err(codec::CodecError::LimitsExceeded {
            kind: codec::LimitKind::StringLength,
            limit: 128,
            actual: 129
        })
    );

    // The longest name a default decoder accepts still roundtrips.
    build.equipment_mut(Slot::Helm).unwrap().stat = "X".repeat(128);
    for version in WireVersion::ALL {
        let report = encode_build_as(&build, version, &catalog()).unwrap();
        let decoded = decode(&report.code).build;
        assert_eq!(decoded.equipment(Slot::Helm).unwrap().stat, "X".repeat(128));
    }
}
