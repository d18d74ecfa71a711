//! Canonical solver identities and the many literal name strings they
//! appeared under across competitions. Built once at pipeline start and
//! passed by reference to every ingestion adapter; there are no global
//! mutable lookup tables.

use crate::storage::Store;
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, Copy)]
pub struct SolverSpec {
    pub name: &'static str,
    pub link: &'static str,
    /// Literal submitted-name spellings seen in competition results
    /// (wrapped, fixed, versioned, per-submission variants).
    pub variants: &'static [&'static str],
}

const SOLVERS: &[SolverSpec] = &[
    SolverSpec {
        name: "Bitwuzla",
        link: "https://bitwuzla.github.io/",
        // A "-fixed" Bitwuzla ran in 2022 but is indistinguishable in the
        // raw results.
        variants: &["Bitwuzla-wrapped", "bitwuzla", "Bitwuzla (with SymFPU)"],
    },
    SolverSpec {
        name: "COLIBRI",
        link: "https://colibri.frama-c.com/",
        variants: &["COLIBRI 22_06_18", "COLIBRI 2023_05_10"],
    },
    SolverSpec {
        name: "CVC4",
        link: "https://cvc4.github.io/",
        variants: &["CVC4-sq-final", "CVC4 (with SymFPU)"],
    },
    SolverSpec {
        name: "cvc5",
        link: "https://cvc5.github.io/",
        variants: &[
            "cvc5-default-2022-07-02-b15e116-wrapped",
            "CVC5",
            "cvc5-default-2023-05-16-ea045f305",
        ],
    },
    SolverSpec {
        name: "MathSAT",
        link: "https://mathsat.fbk.eu/",
        variants: &["MathSAT-5.6.8", "Mathsat5", "MathSAT5", "Mathsat"],
    },
    SolverSpec {
        name: "NRA-LS",
        link: "https://github.com/minghao-liu/NRA-LS",
        variants: &["NRA-LS-FINAL", "cvc5-NRA-LS-sq"],
    },
    SolverSpec {
        name: "OpenSMT",
        link: "https://verify.inf.usi.ch/opensmt",
        variants: &["opensmt fixed", "OpenSMT a78dcf01"],
    },
    SolverSpec {
        name: "OSTRICH",
        link: "https://github.com/uuverifiers/ostrich",
        variants: &["OSTRICH 1.2", "Ostrich", "OSTRICH 1.3 SMT-COMP fixed"],
    },
    SolverSpec {
        name: "Par4",
        link: "",
        variants: &["Par4-wrapped-sq"],
    },
    SolverSpec {
        name: "Q3B",
        link: "https://github.com/martinjonas/Q3B/",
        variants: &["Q3B"],
    },
    SolverSpec {
        name: "Q3B-pBNN",
        link: "https://www.fi.muni.cz/~xpavlik5/Q3B-pBDD/",
        variants: &["Q3B-pBDD SMT-COMP 2022 final"],
    },
    SolverSpec {
        name: "SMTInterpol",
        link: "https://ultimate.informatik.uni-freiburg.de/smtinterpol",
        variants: &[
            "smtinterpol-fixed-2.5-1148-gf2d8e6b0",
            "smtinterpol-2.5-1272-g2d6d356c",
        ],
    },
    SolverSpec {
        name: "SMT-RAT",
        link: "https://smtrat.github.io/",
        variants: &["SMT-RAT-MCSAT"],
    },
    SolverSpec {
        name: "solmt",
        link: "https://github.com/ethereum/solidity/",
        variants: &["solsmt-5b37426cad388922a-wrapped"],
    },
    SolverSpec {
        name: "STP",
        link: "https://stp.github.io/",
        variants: &["STP 2022.4"],
    },
    SolverSpec {
        name: "UltimateEliminator+MathSAT",
        link: "https://ultimate.informatik.uni-freiburg.de/eliminator/",
        variants: &[
            "UltimateEliminator+MathSAT-5.6.7-wrapped",
            "UltimateEliminator+MathSAT-5.6.9",
        ],
    },
    SolverSpec {
        name: "Vampire",
        link: "https://vprover.github.io/",
        variants: &["vampire_4.7_smt_fix-wrapped", "vampire", "vampire_4.8_smt_pre"],
    },
    SolverSpec {
        name: "veriT",
        link: "https://verit-solver.org/",
        variants: &[],
    },
    SolverSpec {
        name: "veriT+raSAT+Redlog",
        link: "https://verit-solver.org/",
        variants: &[],
    },
    SolverSpec {
        name: "Yices2",
        link: "https://yices.csl.sri.com/",
        variants: &[
            "Yices 2.6.2 for SMTCOMP 2021",
            "yices2",
            "Yices 2",
            "Yices 2 for SMTCOMP 2023",
        ],
    },
    SolverSpec {
        name: "Yices-ismt",
        link: "https://github.com/MRVAPOR/Yices-ismt",
        variants: &["yices-ismt-0721", "yices-ismt-sq-0526"],
    },
    SolverSpec {
        name: "YicesQS",
        link: "https://github.com/disteph/yicesQS",
        variants: &["yicesQS-2022-07-02-optim-under10"],
    },
    SolverSpec {
        name: "Z3++",
        link: "https://z3-plus-plus.github.io/",
        variants: &["z3++0715", "Z3++_sq_0526"],
    },
    SolverSpec {
        name: "Z3",
        link: "https://github.com/Z3Prover/z3",
        variants: &["z3-4.8.17", "z3", "z3;", "z3-4.8.11"],
    },
    SolverSpec {
        name: "Z3++BV",
        link: "https://z3-plus-plus.github.io/",
        variants: &["z3++bv_0702"],
    },
    SolverSpec {
        name: "Z3string",
        link: "https://z3string.github.io/",
        variants: &["Z3-str2", "Z3str3", "Z3str4", "Z3str3RE"],
    },
    SolverSpec {
        name: "CVC3",
        link: "https://cs.nyu.edu/acsys/cvc3/",
        variants: &[],
    },
    SolverSpec {
        name: "ABC",
        link: "https://dl.acm.org/doi/10.1007/978-3-642-14295-6_5",
        variants: &[],
    },
    SolverSpec {
        name: "Norn",
        link: "https://user.it.uu.se/~jarst116/norn/",
        variants: &[],
    },
    SolverSpec {
        name: "S3P",
        link: "https://trinhmt.github.io/home/S3/",
        variants: &[],
    },
    SolverSpec {
        name: "Trau",
        link: "https://github.com/diepbp/Trau",
        variants: &[],
    },
    SolverSpec {
        name: "Alt-Ergo",
        link: "https://alt-ergo.ocamlpro.com/",
        variants: &[],
    },
    SolverSpec {
        name: "Barcelogic",
        link: "https://www.cs.upc.edu/~oliveras/bclt-main.html",
        variants: &[],
    },
    SolverSpec {
        name: "Boolector",
        link: "https://boolector.github.io/",
        variants: &[],
    },
    SolverSpec {
        name: "Yices",
        link: "https://yices.csl.sri.com/old/yices1-documentation.html",
        variants: &["YICES"],
    },
    SolverSpec {
        name: "CryptoMiniSat",
        link: "https://www.msoos.org/cryptominisat5/",
        variants: &[],
    },
    SolverSpec {
        name: "Z3-Trau",
        link: "https://github.com/diepbp/z3-trau",
        variants: &[],
    },
    SolverSpec {
        name: "Kaluza",
        link: "https://doi.org/10.1109/SP.2010.38",
        variants: &[],
    },
    SolverSpec {
        name: "SLENT",
        link: "https://github.com/NTU-ALComLab/SLENT",
        variants: &[],
    },
    SolverSpec {
        name: "Woorpje",
        link: "https://www.informatik.uni-kiel.de/~mku/woorpje/",
        variants: &["WOORPJE"],
    },
    SolverSpec {
        name: "Kepler_22",
        link: "https://doi.org/10.1007/978-3-030-02768-1_19",
        variants: &[],
    },
    SolverSpec {
        name: "SPASS-IQ",
        link: "https://www.mpi-inf.mpg.de/de/departments/automation-of-logic/software/spass-workbench/spass-iq",
        variants: &[],
    },
    SolverSpec {
        name: "iProver",
        link: "https://gitlab.com/korovin/iprover",
        variants: &["iProver-3.8-fix"],
    },
    SolverSpec {
        name: "UltimateIntBlastingWrapper+SMTInterpol",
        link: "https://ultimate-pa.org/",
        variants: &[],
    },
    SolverSpec {
        name: "Z3alpha",
        link: "https://github.com/JohnLyu2/z3alpha",
        variants: &["z3alpha"],
    },
    SolverSpec {
        name: "Z3-Noodler",
        link: "https://github.com/VeriFIT/z3-noodler",
        variants: &[],
    },
    SolverSpec {
        name: "Z3-Owl",
        link: "https://z3-owl.github.io/",
        variants: &["z3-Owl-Final"],
    },
];

/// Immutable lookup from any historical solver name spelling to its
/// canonical solver.
pub struct SolverRegistry {
    by_variant: HashMap<&'static str, &'static SolverSpec>,
}

impl SolverRegistry {
    pub fn new() -> Self {
        let mut by_variant = HashMap::new();
        for spec in SOLVERS {
            // The canonical name doubles as a variant spelling.
            by_variant.insert(spec.name, spec);
            for v in spec.variants {
                by_variant.insert(*v, spec);
            }
        }
        Self { by_variant }
    }

    pub fn solver_for_variant(&self, full_name: &str) -> Option<&'static SolverSpec> {
        self.by_variant.get(full_name).copied()
    }

    pub fn specs(&self) -> &'static [SolverSpec] {
        SOLVERS
    }

    /// Writes the canonical solver table and the global (evaluation-less)
    /// variant names into the database.
    pub fn install(&self, store: &Store) -> anyhow::Result<()> {
        for spec in SOLVERS {
            let link = if spec.link.is_empty() {
                None
            } else {
                Some(spec.link)
            };
            let solver = store.insert_solver(spec.name, link)?;
            store.insert_variant(spec.name, solver, None)?;
            for v in spec.variants {
                store.insert_variant(v, solver, None)?;
            }
        }
        Ok(())
    }
}

impl Default for SolverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Irregularly formatted target-solver annotations that the separator
/// grammar cannot split; grown as new spellings are found in the corpus.
const ANNOTATION_EXCEPTIONS: &[(&str, &[&str])] = &[
    ("Boolector, MathSAT and Z3", &["Boolector", "MathSAT", "Z3"]),
    ("CVC4 Yices", &["CVC4", "Yices"]),
];

/// Splits a free-text target-solver annotation into individual solver
/// names. Separators are `/`, `,` and the literal word `or`; known
/// irregular strings are handled by the exception table.
pub fn parse_target_solvers(annotation: &str) -> Vec<String> {
    let trimmed = annotation.trim();
    for (literal, names) in ANNOTATION_EXCEPTIONS {
        if trimmed == *literal {
            return names.iter().map(|s| s.to_string()).collect();
        }
    }
    trimmed
        .split('/')
        .flat_map(|part| part.split(','))
        .flat_map(|part| part.split(" or "))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Maps annotation names to canonical solvers, warning on (and dropping)
/// names the registry does not know.
pub fn match_target_solvers<'r>(
    registry: &'r SolverRegistry,
    annotation: &str,
) -> Vec<&'r SolverSpec> {
    let mut out = Vec::new();
    for name in parse_target_solvers(annotation) {
        match registry.solver_for_variant(&name) {
            Some(spec) => out.push(spec),
            None => warn!(name = %name, "unknown target solver in annotation"),
        }
    }
    out
}
