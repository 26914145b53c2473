//! Property-based tests for block matching, reconstruction and crossover.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use symbios_patterns::{
    BLOCK_SIZE, Genotype, IMAGE_SIZE, NUM_BLOCKS, NUM_PATTERNS,
    image::{Image, PIXEL_COUNT},
    loss::{best_match, compute_loss},
    pattern::{Pattern, PatternSet},
    reconstruct::reconstruct_with_loss,
};

fn arb_image() -> impl Strategy<Value = Image> {
    prop::collection::vec(any::<bool>(), PIXEL_COUNT).prop_map(|bits| {
        let mut image = Image::filled(false);
        for (index, bit) in bits.into_iter().enumerate() {
            image.set(index / IMAGE_SIZE, index % IMAGE_SIZE, bit);
        }
        image
    })
}

fn arb_pattern() -> impl Strategy<Value = Pattern> {
    prop::collection::vec(any::<bool>(), BLOCK_SIZE * BLOCK_SIZE).prop_map(|bits| {
        Pattern::new(std::array::from_fn(|i| {
            std::array::from_fn(|j| bits[i * BLOCK_SIZE + j])
        }))
    })
}

fn arb_pattern_set() -> impl Strategy<Value = PatternSet> {
    prop::collection::vec(arb_pattern(), NUM_PATTERNS)
        .prop_map(|patterns| PatternSet::new(std::array::from_fn(|i| patterns[i])))
}

/// Independent loss: straight loops over image coordinates.
fn brute_force_loss(image: &Image, patterns: &PatternSet) -> u32 {
    let mut total = 0;
    for block_row in 0..NUM_BLOCKS {
        for block_col in 0..NUM_BLOCKS {
            let mut best = u32::MAX;
            for pattern in patterns.iter() {
                let mut distance = 0;
                for i in 0..BLOCK_SIZE {
                    for j in 0..BLOCK_SIZE {
                        let pixel = image.get(block_row * BLOCK_SIZE + i, block_col * BLOCK_SIZE + j);
                        if pixel != pattern.get(i, j) {
                            distance += 1;
                        }
                    }
                }
                best = best.min(distance);
            }
            total += best;
        }
    }
    total
}

proptest! {
    #[test]
    fn loss_is_bounded_by_pixel_count(image in arb_image(), patterns in arb_pattern_set()) {
        let loss = compute_loss(&image, &patterns);
        prop_assert!(loss as usize <= NUM_BLOCKS * NUM_BLOCKS * BLOCK_SIZE * BLOCK_SIZE);
    }

    #[test]
    fn loss_matches_exhaustive_search(image in arb_image(), patterns in arb_pattern_set()) {
        prop_assert_eq!(compute_loss(&image, &patterns), brute_force_loss(&image, &patterns));
    }

    #[test]
    fn best_match_is_a_true_minimum(block in arb_pattern(), patterns in arb_pattern_set()) {
        let matched = best_match(&block, &patterns);
        let distances: Vec<u32> = patterns.iter().map(|p| block.hamming(p)).collect();
        let minimum = *distances.iter().min().unwrap();

        prop_assert_eq!(matched.distance, minimum);
        prop_assert_eq!(distances[matched.pattern_index], minimum);
        prop_assert!(distances[..matched.pattern_index].iter().all(|&d| d > minimum));
    }

    #[test]
    fn reconstruction_distance_equals_loss(image in arb_image(), patterns in arb_pattern_set()) {
        let reconstruction = reconstruct_with_loss(&image, &patterns);
        let differing = (0..IMAGE_SIZE)
            .flat_map(|row| (0..IMAGE_SIZE).map(move |col| (row, col)))
            .filter(|&(row, col)| image.get(row, col) != reconstruction.image.get(row, col))
            .count() as u32;

        prop_assert_eq!(reconstruction.loss, compute_loss(&image, &patterns));
        prop_assert_eq!(differing, reconstruction.loss);
    }

    #[test]
    fn crossover_child_slots_come_from_a_parent(
        a in arb_pattern_set(),
        b in arb_pattern_set(),
        seed in any::<u64>()
    ) {
        let mut rng = Pcg64::seed_from_u64(seed);
        let child = a.crossover(&b, &mut rng);
        for slot in 0..NUM_PATTERNS {
            prop_assert!(child.get(slot) == a.get(slot) || child.get(slot) == b.get(slot));
        }
    }

    #[test]
    fn hamming_is_a_metric(a in arb_pattern(), b in arb_pattern()) {
        prop_assert_eq!(a.hamming(&b), b.hamming(&a));
        prop_assert_eq!(a.hamming(&a), 0);
        prop_assert!(a.hamming(&b) <= (BLOCK_SIZE * BLOCK_SIZE) as u32);
    }

    #[test]
    fn image_text_round_trips(image in arb_image()) {
        let parsed: Image = image.to_string().parse().unwrap();
        prop_assert_eq!(parsed, image);
    }
}
