//! Decomposition of SMT-LIB logic names into theory feature flags.

use crate::storage::Store;
use rusqlite::params;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogicFeatures {
    pub quantifier_free: bool,
    pub arrays: bool,
    pub uninterpreted_functions: bool,
    pub bitvectors: bool,
    pub floating_point: bool,
    pub data_types: bool,
    pub strings: bool,
    pub non_linear: bool,
    pub difference: bool,
    pub reals: bool,
    pub integers: bool,
}

impl LogicFeatures {
    /// Tokenizes a logic name front to back: `QF_` prefix, the `AX`
    /// special case, then A / UF / BV / FP / DT / S theory markers (BV, FP
    /// and DT may appear in either order) and finally the arithmetic
    /// suffix.
    pub fn parse(logic: &str) -> Self {
        let mut f = LogicFeatures::default();
        let mut rest = logic;

        if let Some(stripped) = rest.strip_prefix("QF_") {
            f.quantifier_free = true;
            rest = stripped;
        }
        if rest == "AX" {
            f.arrays = true;
            return f;
        }
        if let Some(stripped) = rest.strip_prefix('A') {
            f.arrays = true;
            rest = stripped;
        }
        if let Some(stripped) = rest.strip_prefix("UF") {
            f.uninterpreted_functions = true;
            rest = stripped;
        }
        if let Some(stripped) = rest.strip_prefix("BV") {
            f.bitvectors = true;
            rest = stripped;
        }
        // FP and DT occur in either order; try each twice.
        for _ in 0..2 {
            if let Some(stripped) = rest.strip_prefix("FP") {
                f.floating_point = true;
                rest = stripped;
            }
            if let Some(stripped) = rest.strip_prefix("DT") {
                f.data_types = true;
                rest = stripped;
            }
        }
        if rest == "S" {
            f.strings = true;
            rest = "";
        } else if let Some(stripped) = rest.strip_prefix('S') {
            f.strings = true;
            rest = stripped;
        }

        match rest {
            "IDL" => {
                f.integers = true;
                f.difference = true;
            }
            "RDL" => {
                f.reals = true;
                f.difference = true;
            }
            "LIA" => f.integers = true,
            "LRA" => f.reals = true,
            "LIRA" => {
                f.integers = true;
                f.reals = true;
            }
            "NIA" => {
                f.integers = true;
                f.non_linear = true;
            }
            "NRA" => {
                f.reals = true;
                f.non_linear = true;
            }
            "NIRA" => {
                f.integers = true;
                f.reals = true;
                f.non_linear = true;
            }
            _ => {}
        }
        f
    }
}

pub const KNOWN_LOGICS: &[&str] = &[
    "ABV", "ABVFP", "ABVFPLRA", "ALIA", "ANIA", "AUFBV", "AUFBVDTLIA", "AUFBVDTNIA",
    "AUFBVDTNIRA", "AUFBVFP", "AUFDTLIA", "AUFDTLIRA", "AUFDTNIRA", "AUFFPDTNIRA", "AUFLIA",
    "AUFLIRA", "AUFNIA", "AUFNIRA", "BV", "BVFP", "BVFPLRA", "FP", "FPLRA", "LIA", "LRA", "NIA",
    "NRA", "QF_ABV", "QF_ABVFP", "QF_ABVFPLRA", "QF_ALIA", "QF_ANIA", "QF_AUFBV", "QF_AUFBVFP",
    "QF_AUFBVLIA", "QF_AUFBVNIA", "QF_AUFLIA", "QF_AUFNIA", "QF_AX", "QF_BV", "QF_BVFP",
    "QF_BVFPLRA", "QF_BVLRA", "QF_DT", "QF_FP", "QF_FPLRA", "QF_IDL", "QF_LIA", "QF_LIRA",
    "QF_LRA", "QF_NIA", "QF_NIRA", "QF_NRA", "QF_RDL", "QF_S", "QF_SLIA", "QF_SNIA", "QF_UF",
    "QF_UFBV", "QF_UFBVDT", "QF_UFBVLIA", "QF_UFDT", "QF_UFDTLIA", "QF_UFDTLIRA", "QF_UFDTNIA",
    "QF_UFFP", "QF_UFFPDTNIRA", "QF_UFIDL", "QF_UFLIA", "QF_UFLRA", "QF_UFNIA", "QF_UFNRA", "UF",
    "UFBV", "UFBVDT", "UFBVFP", "UFBVLIA", "UFDT", "UFDTLIA", "UFDTLIRA", "UFDTNIA", "UFDTNIRA",
    "UFFPDTNIRA", "UFIDL", "UFLIA", "UFLRA", "UFNIA", "UFNIRA", "UFNRA",
];

/// Writes the feature decomposition of every known logic.
pub fn install_all(store: &Store) -> anyhow::Result<()> {
    let conn = store.lock();
    let mut stmt = conn.prepare(
        "INSERT INTO Logics(
            logic, quantifierFree, arrays, uninterpretedFunctions, bitvectors,
            floatingPoint, dataTypes, strings, nonLinear, difference, reals, integers
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
    )?;
    for logic in KNOWN_LOGICS {
        let f = LogicFeatures::parse(logic);
        stmt.execute(params![
            logic,
            f.quantifier_free,
            f.arrays,
            f.uninterpreted_functions,
            f.bitvectors,
            f.floating_point,
            f.data_types,
            f.strings,
            f.non_linear,
            f.difference,
            f.reals,
            f.integers,
        ])?;
    }
    Ok(())
}
