//! # City Generation Integration Tests
//!
//! Whole-chunk and whole-world scenarios through the public API only.

use infinitecity_procedural::{
    BuildingCatalog, ChunkContentGenerator, ChunkCoord, ChunkRng, CityConfig, CityWorld,
    GenerationError, LotType, Rect, Tile, GROUND_HEIGHT,
};

fn is_street(x: usize, y: usize, size: [usize; 3]) -> bool {
    x < 2 || y < 2 || x + 3 > size[0] || y + 3 > size[1]
}

/// Test: A 16x16x16 city block with min lot 8 holds exactly one building.
#[test]
fn test_city_block_single_lot() {
    for seed in 0..50 {
        let mut gen = ChunkContentGenerator::new([16, 16, 16]).unwrap();
        let mut rng = ChunkRng::from_seed(seed);
        gen.flatten_world();
        let plans = gen
            .construct_buildings(8, &BuildingCatalog::default(), &mut rng)
            .unwrap();

        assert_eq!(plans.len(), 1, "seed {seed}");
        let plan = plans[0];
        assert_eq!(plan.lot, Rect::new(2, 2, 13, 13).unwrap());
        assert!(plan.floors >= 1 && plan.roof_height() <= 15, "seed {seed}: {plan:?}");

        let volume = gen.volume();
        for (x, y, z, tile) in volume.cells() {
            let z = i32::try_from(z).unwrap();
            if z <= GROUND_HEIGHT {
                assert_eq!(tile, Tile::Solid, "ground hole at ({x}, {y}, {z})");
            } else if is_street(x, y, [16, 16, 16]) || z > plan.roof_height() {
                assert_eq!(tile, Tile::Air, "seed {seed}: stray tile at ({x}, {y}, {z})");
            }
        }
    }
}

/// Test: Towers never reach past the top layer of the chunk.
#[test]
fn test_skyscraper_fits_chunk() {
    for seed in 0..100 {
        let mut gen = ChunkContentGenerator::new([16, 20, 16]).unwrap();
        let mut rng = ChunkRng::from_seed(seed);
        gen.flatten_world();
        let plan = gen.construct_skyscraper(&mut rng).unwrap();

        assert_eq!(plan.lot, Rect::new(2, 2, 13, 17).unwrap());
        assert!(plan.roof_height() <= 15, "seed {seed}: {plan:?}");
        assert_eq!(plan.corner_pillar, plan.wall_height != 2);

        // Top slab covers the whole foundation
        let f = plan.foundation;
        for y in f.y1..=f.y2 {
            for x in f.x1..=f.x2 {
                assert_eq!(gen.volume().get(x, y, plan.roof_height()), Some(Tile::Solid));
            }
        }
    }
}

/// Test: Same seed, same city.
#[test]
fn test_same_seed_same_world() {
    let config = CityConfig {
        seed: 1234,
        world_chunks: [3, 3, 1],
        ..CityConfig::default()
    };
    let (a, stats_a) = CityWorld::new(config.clone()).unwrap().generate().unwrap();
    let (b, stats_b) = CityWorld::new(config).unwrap().generate().unwrap();
    assert_eq!(a, b);
    assert_eq!(stats_a, stats_b);
}

/// Test: Different seeds give different cities.
#[test]
fn test_different_seed_different_world() {
    let make = |seed| {
        let config = CityConfig {
            seed,
            world_chunks: [4, 4, 1],
            ..CityConfig::default()
        };
        CityWorld::new(config).unwrap().generate().unwrap().0
    };
    assert_ne!(make(1), make(2));
}

/// Test: Worker count does not change the result.
#[test]
fn test_parallel_generation_matches_sequential() {
    let config = CityConfig {
        seed: 77,
        world_chunks: [4, 3, 2],
        ..CityConfig::default()
    };
    let world = CityWorld::new(config).unwrap();
    let (sequential, stats) = world.generate().unwrap();
    for workers in [1, 2, 3, 8] {
        let (parallel, parallel_stats) = world.generate_parallel(workers).unwrap();
        assert_eq!(sequential, parallel, "{workers} workers");
        assert_eq!(stats, parallel_stats);
    }
    assert_eq!(stats.total_chunks(), 24);
}

/// Test: Every chunk lands at chunk index times chunk size.
#[test]
fn test_chunks_tile_the_world() {
    let config = CityConfig {
        seed: 9,
        chunk_size: [16, 16, 16],
        world_chunks: [2, 2, 2],
        ..CityConfig::default()
    };
    let world = CityWorld::new(config).unwrap();
    let (store, _) = world.generate().unwrap();
    assert_eq!(store.size(), [32, 32, 32]);

    for coord in world.chunk_coords() {
        let chunk = world.generate_chunk(coord).unwrap();
        let origin = coord.origin([16, 16, 16]);
        for (x, y, z, tile) in chunk.volume.cells() {
            let gx = usize::try_from(origin[0]).unwrap() + x;
            let gy = usize::try_from(origin[1]).unwrap() + y;
            let gz = usize::try_from(origin[2]).unwrap() + z;
            assert_eq!(store.get(gx, gy, gz), Some(tile));
        }
    }

    // Stacked chunks each carry their own ground
    assert_eq!(store.get(0, 0, 16), Some(Tile::Solid));
}

/// Test: Lot type counts add up and every lot type shows up in a big world.
#[test]
fn test_world_stats() {
    let config = CityConfig {
        seed: 3,
        world_chunks: [8, 8, 1],
        ..CityConfig::default()
    };
    let (store, stats) = CityWorld::new(config).unwrap().generate().unwrap();
    assert_eq!(stats.total_chunks(), 64);
    for lot_type in LotType::ALL {
        assert!(stats.chunks(lot_type) > 0, "no {lot_type:?} chunks");
    }
    assert_eq!(
        stats.buildings,
        stats.chunks(LotType::CityBlock) + stats.chunks(LotType::Skyscraper)
    );
    assert!(stats.floors >= stats.buildings as u64);
    assert!(store.count(Tile::Window) > 0);
}

/// Test: Generation is rejected up front for chunks that cannot hold a floor.
#[test]
fn test_invalid_world_rejected() {
    let config = CityConfig {
        chunk_size: [16, 16, 4],
        ..CityConfig::default()
    };
    assert!(CityWorld::new(config).is_err());

    let mut gen = ChunkContentGenerator::new([16, 16, 4]).unwrap();
    gen.flatten_world();
    let err = gen.construct_skyscraper(&mut ChunkRng::from_seed(0)).unwrap_err();
    assert!(matches!(err, GenerationError::Config(_)), "{err}");
}

/// Test: Chunks far from the origin generate like any other.
#[test]
fn test_far_chunks() {
    let world = CityWorld::new(CityConfig::default()).unwrap();
    for coord in [
        ChunkCoord::new(1_000_000, -1_000_000, 0),
        ChunkCoord::new(i32::MAX, i32::MIN, 3),
    ] {
        let a = world.generate_chunk(coord).unwrap();
        let b = world.generate_chunk(coord).unwrap();
        assert_eq!(a.volume, b.volume);
    }
}

/// Test: A minimum lot size larger than any chunk leaves one lot per block.
#[test]
fn test_huge_min_lot_size_builds_whole_blocks() {
    let config = CityConfig {
        min_lot_size: i32::MAX,
        lot_types: vec![LotType::CityBlock],
        world_chunks: [2, 2, 1],
        ..CityConfig::default()
    };
    let world = CityWorld::new(config).unwrap();
    let chunk = world.generate_chunk(ChunkCoord::new(0, 0, 0)).unwrap();
    assert_eq!(chunk.buildings.len(), 1);
    assert_eq!(chunk.buildings[0].lot, Rect::new(2, 2, 13, 13).unwrap());

    let (_, stats) = world.generate().unwrap();
    assert_eq!(stats.buildings, 4);
}
