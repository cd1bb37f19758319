// Cross-module properties of the CPS lattice generator.
//
// Exercises the whole tree through the public API: slot counts and products
// for every (n,k), the typeA/typeB decomposition identity, update locality
// (bit-identical untouched slots), idempotent recomputation, and the
// selection index against resolved paths.

use eikosany_lattice::selection::Branch;
use eikosany_lattice::tables;
use eikosany_lattice::{CpsNode, EulerGenus, GeneratorSet, NodePath, Selection};
use eikosany_pitch::PitchValue;

const PRIMES: [(i64, i64); 6] = [(3, 1), (5, 1), (7, 1), (11, 1), (13, 1), (17, 1)];

fn gens(n: usize) -> GeneratorSet {
    GeneratorSet::from_ratios(&PRIMES[..n]).unwrap()
}

fn frequencies(node: &CpsNode) -> Vec<f64> {
    node.derived().iter().map(|v| v.frequency()).collect()
}

fn bits(node: &CpsNode) -> Vec<u64> {
    node.derived()
        .iter()
        .map(|v| v.frequency().to_bits())
        .collect()
}

fn sorted(mut v: Vec<f64>) -> Vec<f64> {
    v.sort_by(f64::total_cmp);
    v
}

#[test]
fn every_node_has_binomial_count_and_exact_products() {
    for n in 1..=6usize {
        let generators = gens(n);
        for k in 1..=n {
            let node = CpsNode::new(generators.clone(), k).unwrap();
            let table = tables::subset_table(n, k).unwrap();
            assert_eq!(node.derived().count(), tables::binomial(n, k), "({n},{k})");
            for (slot, subset) in table.iter().enumerate() {
                let expected: f64 = subset
                    .iter()
                    .map(|&gi| generators.at(gi as usize).unwrap().frequency())
                    .product();
                let got = node.derived().at(slot).unwrap().frequency();
                assert_eq!(got, expected, "slot {slot} of ({n},{k})");
            }
        }
    }
}

#[test]
fn child_counts_follow_the_topology() {
    for n in 1..=6usize {
        for k in 1..=n {
            let node = CpsNode::with_depth(gens(n), k, 1).unwrap();
            if k == n {
                assert!(node.type_a().is_empty(), "({n},{k})");
                assert!(node.type_b().is_empty(), "({n},{k})");
            } else if k == 1 {
                assert!(node.type_a().is_empty(), "({n},{k})");
                assert_eq!(node.type_b().len(), n, "({n},{k})");
            } else {
                assert_eq!(node.type_a().len(), n, "({n},{k})");
                assert_eq!(node.type_b().len(), n, "({n},{k})");
            }
            for child in node.type_a() {
                assert_eq!((child.n(), child.k()), (n - 1, k - 1));
            }
            for child in node.type_b() {
                assert_eq!((child.n(), child.k()), (n - 1, k));
            }
        }
    }
}

/// For every removed generator, the typeA products (removed generator
/// factored in as common tone) plus the typeB products are exactly the
/// parent's product multiset.
#[test]
fn type_a_and_type_b_partition_the_parent() {
    for n in 2..=6usize {
        for k in 2..n {
            let node = CpsNode::with_depth(gens(n), k, 1).unwrap();
            let parent = sorted(frequencies(&node));
            for i in 0..n {
                let mut union = frequencies(&node.type_a()[i]);
                union.extend(frequencies(&node.type_b()[i]));
                assert_eq!(sorted(union), parent, "removed {i} from ({n},{k})");
            }
        }
    }
}

#[test]
fn update_changes_only_slots_containing_the_edited_generator() {
    let generators = gens(4);
    for k in 1..=4usize {
        let mut node = CpsNode::new(generators.clone(), k).unwrap();
        let before = bits(&node);

        let mut edited = generators.clone();
        edited.set(0, PitchValue::from_ratio(19, 1).unwrap()).unwrap();
        node.update(edited).unwrap();
        let after = bits(&node);

        let table = tables::subset_table(4, k).unwrap();
        for (slot, subset) in table.iter().enumerate() {
            let contains_a = subset.contains(&0);
            if contains_a {
                assert_ne!(before[slot], after[slot], "slot {slot} of (4,{k})");
            } else {
                assert_eq!(before[slot], after[slot], "slot {slot} of (4,{k})");
            }
        }
    }
}

#[test]
fn update_with_unchanged_generators_is_bit_identical() {
    let mut node = CpsNode::with_depth(gens(5), 3, 2).unwrap();
    let before = bits(&node);
    let child_before = bits(&node.type_a()[2]);

    node.update(gens(5)).unwrap();
    assert_eq!(bits(&node), before);
    assert_eq!(bits(&node.type_a()[2]), child_before);

    node.update(gens(5)).unwrap();
    assert_eq!(bits(&node), before);
}

#[test]
fn two_generator_scenario() {
    let genus = EulerGenus::new(gens(2)).unwrap();
    assert_eq!(frequencies(genus.row(1).unwrap()), vec![3.0, 5.0]);
    assert_eq!(frequencies(genus.row(2).unwrap()), vec![15.0]);
}

#[test]
fn four_generator_scenario() {
    let genus = EulerGenus::new(gens(4)).unwrap();
    assert_eq!(
        sorted(frequencies(genus.row(1).unwrap())),
        vec![3.0, 5.0, 7.0, 11.0]
    );
    assert_eq!(
        sorted(frequencies(genus.row(2).unwrap())),
        vec![15.0, 21.0, 33.0, 35.0, 55.0, 77.0]
    );
    assert_eq!(
        sorted(frequencies(genus.row(3).unwrap())),
        vec![105.0, 165.0, 231.0, 385.0]
    );
    assert_eq!(frequencies(genus.row(4).unwrap()), vec![1155.0]);
}

#[test]
fn editing_one_generator_touches_only_its_subsets_across_the_genus() {
    let mut genus = EulerGenus::new(gens(4)).unwrap();
    let before: Vec<Vec<u64>> = genus.rows().iter().map(bits).collect();

    let mut edited = gens(4);
    edited.set(0, PitchValue::from_ratio(19, 1).unwrap()).unwrap();
    genus.update(edited).unwrap();

    for (row, old) in genus.rows().iter().zip(&before) {
        let table = tables::subset_table(4, row.k()).unwrap();
        for (slot, subset) in table.iter().enumerate() {
            let new = row.derived().at(slot).unwrap().frequency().to_bits();
            if subset.contains(&0) {
                assert_ne!(new, old[slot], "k={} slot {slot}", row.k());
            } else {
                assert_eq!(new, old[slot], "k={} slot {slot}", row.k());
            }
        }
    }
}

#[test]
fn selection_is_a_single_global_pointer() {
    let genus = EulerGenus::with_depth(gens(6), 2).unwrap();
    let mut selection = Selection::new();

    // Default row for n=6 is the eikosany, k=3.
    let default = genus.default_selection();
    assert_eq!(default, NodePath::row(3));
    selection.select(default.clone());

    // Walk two levels down and select a grandchild.
    let grandchild = NodePath::row(3)
        .child(Branch::TypeA, 1)
        .child(Branch::TypeB, 4);
    let node = genus.resolve(&grandchild).unwrap();
    assert_eq!((node.n(), node.k()), (4, 2));
    selection.select(grandchild.clone());

    assert!(selection.is_selected(&grandchild));
    assert!(!selection.is_selected(&default));
    assert_eq!(selection.selected(), Some(&grandchild));
}

#[test]
fn deep_allocation_of_the_eikosany_row() {
    // n=6, k=3 with two levels: children are (5,2)/(5,3), grandchildren
    // (4,1)/(4,2)/(4,3).
    let node = CpsNode::with_depth(gens(6), 3, 2).unwrap();
    assert_eq!(node.derived().count(), 20);
    assert_eq!(node.type_a().len(), 6);
    let child = &node.type_a()[0];
    assert_eq!((child.n(), child.k()), (5, 2));
    assert_eq!(child.type_a().len(), 5);
    assert_eq!(
        (child.type_a()[0].n(), child.type_a()[0].k()),
        (4, 1)
    );
    // Common tones accumulate down the typeA chain.
    assert_eq!(child.type_a()[0].common_tones().count(), 2);
}
