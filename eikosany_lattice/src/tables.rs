// Canonical subset-to-slot tables for every CPS(n,k) lattice.
//
// Each table maps slot index -> the k-element subset of generator indices
// (0=A .. 5=F) whose product occupies that slot. The slot order is
// transcribed from the published lattice diagrams and is literal reference
// data: consuming code (geometry, subset decomposition, export) depends on
// index correspondence, and several distinct valid enumerations exist, so
// these tables must never be regenerated by a combinations routine. Most
// rows follow the diagrams' grow-by-generator order — the sub-lattice over
// the first m generators appears first, then each new generator's products
// are appended. The 6-choose-2 table departs from that order where the
// drawing does: the BD vertex sits on the AB–BC edge run.
//
// Tests validate transcription (size C(n,k), subset width k, no duplicate
// subsets, indices < n) but never the order itself.

// One static table per (n, k).

pub static CPS_1_1: &[&[u8]] = &[&[0]]; // A

pub static CPS_2_1: &[&[u8]] = &[&[0], &[1]]; // A, B
pub static CPS_2_2: &[&[u8]] = &[&[0, 1]]; // AB

pub static CPS_3_1: &[&[u8]] = &[&[0], &[1], &[2]]; // A, B, C
pub static CPS_3_2: &[&[u8]] = &[
    &[0, 1], // AB
    &[0, 2], // AC
    &[1, 2], // BC
];
pub static CPS_3_3: &[&[u8]] = &[&[0, 1, 2]]; // ABC

pub static CPS_4_1: &[&[u8]] = &[&[0], &[1], &[2], &[3]]; // A, B, C, D
pub static CPS_4_2: &[&[u8]] = &[
    &[0, 1], // AB
    &[0, 2], // AC
    &[1, 2], // BC
    &[0, 3], // AD
    &[1, 3], // BD
    &[2, 3], // CD
];
pub static CPS_4_3: &[&[u8]] = &[
    &[0, 1, 2], // ABC
    &[0, 1, 3], // ABD
    &[0, 2, 3], // ACD
    &[1, 2, 3], // BCD
];
pub static CPS_4_4: &[&[u8]] = &[&[0, 1, 2, 3]]; // ABCD

pub static CPS_5_1: &[&[u8]] = &[&[0], &[1], &[2], &[3], &[4]]; // A..E
pub static CPS_5_2: &[&[u8]] = &[
    &[0, 1], // AB
    &[0, 2], // AC
    &[1, 2], // BC
    &[0, 3], // AD
    &[1, 3], // BD
    &[2, 3], // CD
    &[0, 4], // AE
    &[1, 4], // BE
    &[2, 4], // CE
    &[3, 4], // DE
];
pub static CPS_5_3: &[&[u8]] = &[
    &[0, 1, 2], // ABC
    &[0, 1, 3], // ABD
    &[0, 2, 3], // ACD
    &[1, 2, 3], // BCD
    &[0, 1, 4], // ABE
    &[0, 2, 4], // ACE
    &[1, 2, 4], // BCE
    &[0, 3, 4], // ADE
    &[1, 3, 4], // BDE
    &[2, 3, 4], // CDE
];
pub static CPS_5_4: &[&[u8]] = &[
    &[0, 1, 2, 3], // ABCD
    &[0, 1, 2, 4], // ABCE
    &[0, 1, 3, 4], // ABDE
    &[0, 2, 3, 4], // ACDE
    &[1, 2, 3, 4], // BCDE
];
pub static CPS_5_5: &[&[u8]] = &[&[0, 1, 2, 3, 4]]; // ABCDE

pub static CPS_6_1: &[&[u8]] = &[&[0], &[1], &[2], &[3], &[4], &[5]]; // A..F
pub static CPS_6_2: &[&[u8]] = &[
    &[0, 1], // AB
    &[1, 3], // BD
    &[1, 2], // BC
    &[2, 3], // CD
    &[0, 2], // AC
    &[0, 3], // AD
    &[0, 4], // AE
    &[2, 4], // CE
    &[1, 4], // BE
    &[3, 4], // DE
    &[0, 5], // AF
    &[1, 5], // BF
    &[2, 5], // CF
    &[3, 5], // DF
    &[4, 5], // EF
];
pub static CPS_6_3: &[&[u8]] = &[
    &[0, 1, 2], // ABC
    &[0, 1, 3], // ABD
    &[0, 2, 3], // ACD
    &[1, 2, 3], // BCD
    &[0, 1, 4], // ABE
    &[0, 2, 4], // ACE
    &[1, 2, 4], // BCE
    &[0, 3, 4], // ADE
    &[1, 3, 4], // BDE
    &[2, 3, 4], // CDE
    &[0, 1, 5], // ABF
    &[0, 2, 5], // ACF
    &[1, 2, 5], // BCF
    &[0, 3, 5], // ADF
    &[1, 3, 5], // BDF
    &[2, 3, 5], // CDF
    &[0, 4, 5], // AEF
    &[1, 4, 5], // BEF
    &[2, 4, 5], // CEF
    &[3, 4, 5], // DEF
];
pub static CPS_6_4: &[&[u8]] = &[
    &[0, 1, 2, 3], // ABCD
    &[0, 1, 2, 4], // ABCE
    &[0, 1, 3, 4], // ABDE
    &[0, 2, 3, 4], // ACDE
    &[1, 2, 3, 4], // BCDE
    &[0, 1, 2, 5], // ABCF
    &[0, 1, 3, 5], // ABDF
    &[0, 2, 3, 5], // ACDF
    &[1, 2, 3, 5], // BCDF
    &[0, 1, 4, 5], // ABEF
    &[0, 2, 4, 5], // ACEF
    &[1, 2, 4, 5], // BCEF
    &[0, 3, 4, 5], // ADEF
    &[1, 3, 4, 5], // BDEF
    &[2, 3, 4, 5], // CDEF
];
pub static CPS_6_5: &[&[u8]] = &[
    &[0, 1, 2, 3, 4], // ABCDE
    &[0, 1, 2, 3, 5], // ABCDF
    &[0, 1, 2, 4, 5], // ABCEF
    &[0, 1, 3, 4, 5], // ABDEF
    &[0, 2, 3, 4, 5], // ACDEF
    &[1, 2, 3, 4, 5], // BCDEF
];
pub static CPS_6_6: &[&[u8]] = &[&[0, 1, 2, 3, 4, 5]]; // ABCDEF

/// Look up the slot table for a given (n, k). `None` when n or k is outside
/// the supported range.
pub fn subset_table(n: usize, k: usize) -> Option<&'static [&'static [u8]]> {
    Some(match (n, k) {
        (1, 1) => CPS_1_1,
        (2, 1) => CPS_2_1,
        (2, 2) => CPS_2_2,
        (3, 1) => CPS_3_1,
        (3, 2) => CPS_3_2,
        (3, 3) => CPS_3_3,
        (4, 1) => CPS_4_1,
        (4, 2) => CPS_4_2,
        (4, 3) => CPS_4_3,
        (4, 4) => CPS_4_4,
        (5, 1) => CPS_5_1,
        (5, 2) => CPS_5_2,
        (5, 3) => CPS_5_3,
        (5, 4) => CPS_5_4,
        (5, 5) => CPS_5_5,
        (6, 1) => CPS_6_1,
        (6, 2) => CPS_6_2,
        (6, 3) => CPS_6_3,
        (6, 4) => CPS_6_4,
        (6, 5) => CPS_6_5,
        (6, 6) => CPS_6_6,
        _ => return None,
    })
}

/// C(n, k) for the small arguments the lattice uses.
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result = 1usize;
    for i in 0..k {
        result = result * (n - i) / (i + 1);
    }
    result
}
